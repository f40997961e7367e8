//! Defaults for freshly constructed targets

use super::fields::{has_text, NumericInput};
use super::kinds::{Granularity, QueryType};
use super::types::QueryTarget;
use serde::Deserialize;

pub const DEFAULT_FILTER_TYPE: &str = "selector";
pub const DEFAULT_AGGREGATOR_TYPE: &str = "count";

/// Values seeded into a target when the editor opens it
///
/// Only unset (or falsy) fields are seeded; anything the user already typed is
/// left alone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditorDefaults {
    #[serde(default = "default_query_type")]
    pub query_type: String,

    #[serde(default = "default_custom_granularity")]
    pub custom_granularity: String,

    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default = "default_threshold")]
    pub threshold: i64,

    #[serde(default = "default_max_string_bytes")]
    pub max_string_bytes: i64,
}

fn default_query_type() -> String {
    QueryType::GroupBy.as_str().to_string()
}

fn default_custom_granularity() -> String {
    Granularity::Hour.as_str().to_string()
}

fn default_limit() -> i64 {
    0
}

fn default_threshold() -> i64 {
    10
}

fn default_max_string_bytes() -> i64 {
    1024
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            query_type: default_query_type(),
            custom_granularity: default_custom_granularity(),
            limit: default_limit(),
            threshold: default_threshold(),
            max_string_bytes: default_max_string_bytes(),
        }
    }
}

impl EditorDefaults {
    /// Fill unset fields of `target`
    pub fn seed(&self, target: &mut QueryTarget) {
        if !has_text(&target.query_type) {
            target.query_type = Some(self.query_type.clone());
        }
        if !has_text(&target.custom_granularity) {
            target.custom_granularity = Some(self.custom_granularity.clone());
        }
        seed_number(&mut target.limit, self.limit);
        seed_number(&mut target.threshold, self.threshold);
        seed_number(&mut target.max_string_bytes, self.max_string_bytes);
    }
}

fn seed_number(field: &mut Option<NumericInput>, default: i64) {
    if !field.as_ref().is_some_and(NumericInput::is_truthy) {
        *field = Some(NumericInput::Int(default));
    }
}
