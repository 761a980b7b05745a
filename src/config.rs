use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_PAGE_TITLE: &str = "Sibu";
pub const DEFAULT_RAW_DATA_DIR: &str = "raw_data";
pub const DEFAULT_OUTPUT_DIR: &str = "datasets";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Headings tried in priority order when isolating the cuisine section.
pub const SECTION_HEADINGS: &[&str] = &["Cuisine", "Food", "Local cuisine", "Local food"];

/// Everything a run needs to know about where to read from and write to.
#[derive(Debug, Clone)]
pub struct MinerConfig {
    pub api_url: String,
    pub page_title: String,
    pub user_agent: String,
    pub section_headings: Vec<String>,
    pub raw_data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            user_agent: USER_AGENT.to_string(),
            section_headings: SECTION_HEADINGS.iter().map(|s| s.to_string()).collect(),
            raw_data_dir: PathBuf::from(DEFAULT_RAW_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl MinerConfig {
    pub fn with_paths(
        page_title: impl Into<String>,
        raw_data_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            page_title: page_title.into(),
            raw_data_dir: raw_data_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_locations() {
        let c = MinerConfig::default();
        assert_eq!(c.page_title, "Sibu");
        assert_eq!(c.raw_data_dir, PathBuf::from("raw_data"));
        assert_eq!(c.output_dir, PathBuf::from("datasets"));
        assert_eq!(c.section_headings[0], "Cuisine");
        assert_eq!(c.section_headings.len(), 4);
    }

    #[test]
    fn with_paths_keeps_endpoint() {
        let c = MinerConfig::with_paths("Kuching", "/tmp/raw", "/tmp/out");
        assert_eq!(c.page_title, "Kuching");
        assert_eq!(c.api_url, DEFAULT_API_URL);
        assert_eq!(c.output_dir, PathBuf::from("/tmp/out"));
    }
}
