use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::rules::{SegmentRules, NAME_SEPARATOR, SENTENCE_SEPARATOR};
use crate::store::DishRecord;

static CJK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\u{4E00}-\u{9FA5}]+").unwrap());

/// Why a dish candidate produced no record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("too short ({0} chars)")]
    TooShort(usize),
    #[error("empty name")]
    EmptyName,
    #[error("name {name:?} starts with {lead_in:?}")]
    LeadIn { name: String, lead_in: &'static str },
}

/// Segment cleaned section text into dish records.
///
/// A rejected candidate is logged and skipped; it never stops the batch.
pub fn segment(text: &str, rules: &SegmentRules) -> Vec<DishRecord> {
    let candidates = split_candidates(text, rules);
    debug!("{} dish candidates", candidates.len());

    let mut dishes = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        match parse_candidate(candidate, rules) {
            Ok(dish) => dishes.push(dish),
            Err(reason) => debug!("Skipping candidate {:?}: {}", truncate(candidate, 40), reason),
        }
    }
    dishes
}

/// Group ". "-separated fragments into per-dish spans.
///
/// A fragment opens a new dish if it carries a " — " name separator or begins
/// with a known dish name; anything else continues the current dish. Text seen
/// before the first dish opens keeps its leading ". ", so it parses with an
/// empty name and is rejected.
pub fn split_candidates(text: &str, rules: &SegmentRules) -> Vec<String> {
    let text = skip_preamble(text, rules).trim();
    let text = text.strip_suffix('.').unwrap_or(text);

    let mut candidates = Vec::new();
    let mut current = String::new();

    for fragment in text.split(SENTENCE_SEPARATOR) {
        let starts_dish =
            fragment.contains(NAME_SEPARATOR) || rules.starts_with_known_dish(fragment);

        if starts_dish {
            flush(&mut current, &mut candidates);
            current.push_str(fragment);
        } else {
            current.push_str(SENTENCE_SEPARATOR);
            current.push_str(fragment);
        }
    }
    flush(&mut current, &mut candidates);

    candidates
}

fn flush(current: &mut String, candidates: &mut Vec<String>) {
    let span = std::mem::take(current);
    let span = span.trim();
    if !span.trim_start_matches(['.', ' ']).is_empty() {
        candidates.push(span.to_string());
    }
}

/// Drop everything before the preamble marker. If the marker's own sentence
/// carries a " — " and names a known dish before it, the lead-in clause goes too.
fn skip_preamble<'a>(text: &'a str, rules: &SegmentRules) -> &'a str {
    let Some(start) = text.find(rules.preamble_marker) else {
        return text;
    };
    let text = &text[start..];

    let first_sentence = text.split(SENTENCE_SEPARATOR).next().unwrap_or(text);
    let Some((lead, _)) = first_sentence.split_once(NAME_SEPARATOR) else {
        return text;
    };
    match rules.first_known_dish(lead) {
        Some(offset) => &text[offset..],
        None => text,
    }
}

/// Parse one candidate span into a record.
pub fn parse_candidate(candidate: &str, rules: &SegmentRules) -> Result<DishRecord, Rejection> {
    let candidate = candidate.trim();
    let len = candidate.chars().count();
    if len < rules.min_candidate_chars {
        return Err(Rejection::TooShort(len));
    }

    let (name_part, description) = candidate
        .split_once(NAME_SEPARATOR)
        .or_else(|| candidate.split_once(SENTENCE_SEPARATOR))
        .unwrap_or((candidate, ""));

    let (main_name, alternate_name) = split_alternate(name_part, rules);
    let name = clean_name(main_name);

    if name.is_empty() {
        return Err(Rejection::EmptyName);
    }
    if let Some(lead_in) = rules.forbidden_lead_in(&name) {
        return Err(Rejection::LeadIn { name, lead_in });
    }

    Ok(DishRecord::local_cuisine(name, alternate_name, description.trim()))
}

/// Split "Name (payload)" into the main name and an alternate-script name.
fn split_alternate<'a>(name_part: &'a str, rules: &SegmentRules) -> (&'a str, String) {
    let (Some(open), Some(close)) = (name_part.find('('), name_part.find(')')) else {
        return (name_part.trim(), String::new());
    };

    let main = name_part[..open].trim();
    let mut payload = if close > open {
        name_part[open + 1..close].trim()
    } else {
        ""
    };
    if payload.contains("known as") {
        payload = payload.split("known as").nth(1).unwrap_or("").trim();
    }

    let cjk: String = CJK_RE.find_iter(payload).map(|m| m.as_str()).collect();
    let alternate = if cjk.is_empty() {
        rules
            .alternate_override(payload)
            .map(str::to_string)
            .unwrap_or_default()
    } else {
        cjk
    };
    (main, alternate)
}

fn clean_name(name: &str) -> String {
    let name = name.strip_prefix("also known as").unwrap_or(name).trim();
    name.trim_end_matches(',').trim().to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
