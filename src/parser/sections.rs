use std::sync::LazyLock;

use regex::Regex;

static NEXT_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n=+ [^=]").unwrap());
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());
static EDITORIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?:edit|citation needed)\]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Body of one article section, plus the heading it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSection {
    pub heading: String,
    pub content: String,
}

/// Find the first heading (in `headings` priority order) whose body is non-empty.
///
/// Headings use the wiki plain-text form `== Title ==`. A body runs until the
/// next heading line of any level, or the end of the article.
pub fn isolate_section<S: AsRef<str>>(article: &str, headings: &[S]) -> Option<ArticleSection> {
    for heading in headings {
        let heading = heading.as_ref();
        let Ok(re) = Regex::new(&format!(r"=+ {} =+\n", regex::escape(heading))) else {
            continue;
        };

        let mut pos = 0;
        while let Some(m) = re.find_at(article, pos) {
            let body_start = m.end();
            let body_end = NEXT_HEADING_RE
                .find_at(article, body_start)
                .map(|n| n.start())
                .unwrap_or(article.len());

            let body = article[body_start..body_end].trim();
            if !body.is_empty() {
                return Some(ArticleSection {
                    heading: heading.to_string(),
                    content: body.to_string(),
                });
            }
            pos = body_end;
        }
    }
    None
}

/// Drop citation and editorial markers, collapse whitespace runs, trim.
pub fn clean_text(text: &str) -> String {
    let text = CITATION_RE.replace_all(text, "");
    let text = EDITORIAL_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SECTION_HEADINGS;

    #[test]
    fn sibu_fixture_cuisine() {
        let article = std::fs::read_to_string("tests/fixtures/sibu_extract.txt").unwrap();
        let section = isolate_section(&article, SECTION_HEADINGS).unwrap();
        assert_eq!(section.heading, "Cuisine");
        assert!(section.content.starts_with("Sibu is known for its Foochow cuisine."));
        // Stops before the next heading
        assert!(!section.content.contains("Transport"));
        assert!(!section.content.contains("=="));
    }

    #[test]
    fn priority_order_beats_document_order() {
        let article = "Intro\n\n== Local food ==\nstalls\n\n== Food ==\nmarket\n\n== Cuisine ==\nnoodles\n\n== Sport ==\nfootball";
        let section = isolate_section(article, SECTION_HEADINGS).unwrap();
        assert_eq!(section.heading, "Cuisine");
        assert_eq!(section.content, "noodles");
    }

    #[test]
    fn empty_body_falls_through() {
        let article = "== Cuisine ==\n   \n\n== Food ==\nkompia and kampua\n";
        let section = isolate_section(article, SECTION_HEADINGS).unwrap();
        assert_eq!(section.heading, "Food");
        assert_eq!(section.content, "kompia and kampua");
    }

    #[test]
    fn second_match_of_same_heading() {
        let article = "== Cuisine ==\n\n== Other ==\nx\n=== Cuisine ===\nbian nyuk\n";
        let section = isolate_section(article, &["Cuisine"]).unwrap();
        assert_eq!(section.content, "bian nyuk");
    }

    #[test]
    fn body_runs_to_end_of_article() {
        let article = "== History ==\nold\n== Local cuisine ==\nlast section\nwith two lines";
        let section = isolate_section(article, SECTION_HEADINGS).unwrap();
        assert_eq!(section.content, "last section\nwith two lines");
    }

    #[test]
    fn no_candidate_heading() {
        let article = "== History ==\nold\n== Geography ==\nriver";
        assert!(isolate_section(article, SECTION_HEADINGS).is_none());
        assert!(isolate_section("", SECTION_HEADINGS).is_none());
    }

    #[test]
    fn clean_strips_markers_and_whitespace() {
        let raw = "  Kampua[1] is served\n\nwith  pork.[23][edit] Kompia[citation needed]\tbread ";
        assert_eq!(clean_text(raw), "Kampua is served with pork. Kompia bread");
    }

    #[test]
    fn clean_keeps_non_numeric_brackets() {
        assert_eq!(clean_text("[a] note"), "[a] note");
    }
}
