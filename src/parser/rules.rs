//! Heuristic tables driving dish segmentation.
//!
//! These lists are tuned to the phrasing of one article. Supporting another
//! article should mean extending a table here, not touching the segmenter.

/// Text before this phrase is scene-setting and is discarded.
pub const PREAMBLE_MARKER: &str = "Common dishes that can be found";

/// Separator between a dish name and its description.
pub const NAME_SEPARATOR: &str = " — ";

/// Sentence separator used for candidate splitting.
pub const SENTENCE_SEPARATOR: &str = ". ";

/// Fragments beginning with one of these start a new dish.
pub const KNOWN_DISHES: &[&str] = &[
    "Kampua",
    "Dian Mian",
    "Kompia",
    "Bian Nyuk",
    "Bazhen",
    "Sarawak",
    "Tebaloi",
    "Kek Lapis",
    "Manok",
    "Terung",
    "Empurau",
    "Rojak",
    "You Zhar",
];

/// Names starting with these (case-insensitive) are mis-split sentences, not dishes.
pub const FORBIDDEN_LEAD_INS: &[&str] = &["is a", "are", "can be", "one of", "many", "common"];

/// Alternate name used when a parenthesised payload has no CJK characters
/// but mentions the trigger (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateOverride {
    pub triggers: &'static [&'static str],
    pub alternate: &'static str,
}

pub const ALTERNATE_OVERRIDES: &[AlternateOverride] = &[
    // Deep-fried dough sticks
    AlternateOverride {
        triggers: &["油炸", "you zhar", "you char"],
        alternate: "油炸桧",
    },
];

/// Candidates shorter than this many characters are boilerplate.
pub const MIN_CANDIDATE_CHARS: usize = 10;

/// The full rule set handed to the segmenter.
#[derive(Debug, Clone)]
pub struct SegmentRules {
    pub preamble_marker: &'static str,
    pub known_dishes: &'static [&'static str],
    pub forbidden_lead_ins: &'static [&'static str],
    pub alternate_overrides: &'static [AlternateOverride],
    pub min_candidate_chars: usize,
}

impl Default for SegmentRules {
    fn default() -> Self {
        Self {
            preamble_marker: PREAMBLE_MARKER,
            known_dishes: KNOWN_DISHES,
            forbidden_lead_ins: FORBIDDEN_LEAD_INS,
            alternate_overrides: ALTERNATE_OVERRIDES,
            min_candidate_chars: MIN_CANDIDATE_CHARS,
        }
    }
}

impl SegmentRules {
    pub fn starts_with_known_dish(&self, fragment: &str) -> bool {
        self.known_dishes.iter().any(|name| fragment.starts_with(name))
    }

    /// Byte offset of the earliest known dish name in `text`, if any.
    pub fn first_known_dish(&self, text: &str) -> Option<usize> {
        self.known_dishes.iter().filter_map(|name| text.find(name)).min()
    }

    pub fn forbidden_lead_in(&self, name: &str) -> Option<&'static str> {
        let lower = name.to_lowercase();
        self.forbidden_lead_ins
            .iter()
            .copied()
            .find(|prefix| lower.starts_with(prefix))
    }

    pub fn alternate_override(&self, payload: &str) -> Option<&'static str> {
        let lower = payload.to_lowercase();
        self.alternate_overrides
            .iter()
            .find(|o| o.triggers.iter().any(|t| lower.contains(t)))
            .map(|o| o.alternate)
    }
}
