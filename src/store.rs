use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const RAW_DATA_FILE: &str = "wikipedia_data.json";
pub const LOCAL_CUISINE: &str = "local_cuisine";
const FOOD_CATEGORY: &str = "food";

/// One dish, as written to the final artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    pub name: String,
    #[serde(rename = "chinese_name")]
    pub alternate_name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category: String,
}

impl DishRecord {
    pub fn local_cuisine(
        name: impl Into<String>,
        alternate_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            alternate_name: alternate_name.into(),
            description: description.into(),
            category: LOCAL_CUISINE.to_string(),
        }
    }

    /// "Name (alternate)", or just "Name" when there is no alternate.
    pub fn display_name(&self) -> String {
        if self.alternate_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.alternate_name)
        }
    }
}

/// Raw-data audit artifact: the cleaned section as fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawData {
    pub cuisine: RawSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSection {
    pub category: String,
    pub subcategory: String,
    pub content: String,
}

impl RawData {
    pub fn local_cuisine(content: impl Into<String>) -> Self {
        Self {
            cuisine: RawSection {
                category: FOOD_CATEGORY.to_string(),
                subcategory: LOCAL_CUISINE.to_string(),
                content: content.into(),
            },
        }
    }
}

pub fn ensure_dirs(dirs: &[&Path]) -> Result<()> {
    for dir in dirs {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(())
}

/// Overwrite the raw-data artifact in `dir`.
pub fn save_raw(dir: &Path, data: &RawData) -> Result<PathBuf> {
    let path = dir.join(RAW_DATA_FILE);
    write_json(&path, data)?;
    Ok(path)
}

pub fn load_raw(path: &Path) -> Result<RawData> {
    read_json(path)
}

/// Write dishes to a fresh `sibu_food_<timestamp>.json` in `dir`.
pub fn save_dishes(dir: &Path, dishes: &[DishRecord], at: DateTime<Local>) -> Result<PathBuf> {
    let path = dir.join(output_file_name(at));
    write_json(&path, dishes)?;
    Ok(path)
}

pub fn load_dishes(path: &Path) -> Result<Vec<DishRecord>> {
    read_json(path)
}

pub fn output_file_name(at: DateTime<Local>) -> String {
    format!("sibu_food_{}.json", at.format("%Y%m%d_%H%M%S"))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<DishRecord> {
        vec![
            DishRecord::local_cuisine("Kampua mee", "干盘面", "dry noodles. Eaten at breakfast"),
            DishRecord::local_cuisine("Tebaloi", "", "sago biscuit"),
            DishRecord::local_cuisine("Kompia", "光饼", ""),
        ]
    }

    #[test]
    fn dishes_round_trip_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let path = save_dishes(dir.path(), &sample(), at).unwrap();

        assert_eq!(path.file_name().unwrap(), "sibu_food_20240309_070501.json");
        assert_eq!(load_dishes(&path).unwrap(), sample());
    }

    #[test]
    fn dish_json_field_names() {
        let json = serde_json::to_value(&sample()[0]).unwrap();
        assert_eq!(json["name"], "Kampua mee");
        assert_eq!(json["chinese_name"], "干盘面");
        assert_eq!(json["type"], "local_cuisine");
        assert!(json.get("alternate_name").is_none());
    }

    #[test]
    fn written_json_is_indented_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let at = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let path = save_dishes(dir.path(), &sample()[..1], at).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("干盘面"));
        assert!(text.contains("\n        \"name\": \"Kampua mee\""));
    }

    #[test]
    fn raw_artifact_shape_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("raw_data");
        save_raw(&nested, &RawData::local_cuisine("first")).unwrap();
        let path = save_raw(&nested, &RawData::local_cuisine("second")).unwrap();

        assert_eq!(path, nested.join(RAW_DATA_FILE));
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["cuisine"]["category"], "food");
        assert_eq!(value["cuisine"]["subcategory"], "local_cuisine");
        assert_eq!(value["cuisine"]["content"], "second");
        assert_eq!(load_raw(&path).unwrap().cuisine.content, "second");
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dishes(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn display_name_with_and_without_alternate() {
        let dishes = sample();
        assert_eq!(dishes[0].display_name(), "Kampua mee (干盘面)");
        assert_eq!(dishes[1].display_name(), "Tebaloi");
    }
}
