pub mod dishes;
pub mod rules;
pub mod sections;

use crate::store::{DishRecord, RawData};
use rules::SegmentRules;

/// Raw-data artifact → dish records.
pub fn process_raw(raw: &RawData, rules: &SegmentRules) -> Vec<DishRecord> {
    dishes::segment(&raw.cuisine.content, rules)
}
