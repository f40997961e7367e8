//! Query-level field validators
//!
//! Each validator checks the fields one query type needs, records messages in
//! the error map and returns whether everything passed. On success the inputs
//! are coerced in place: numbers become integers, delimited strings become
//! lists. Coercion only touches raw values, so running a validator again is a
//! no-op.

use super::errors::{keys, ErrorMap};
use crate::target::{has_text, ListInput, NumericInput, QueryTarget};

/// `timeseries` has no extra requirements
pub fn validate_timeseries_query(_target: &mut QueryTarget, _errs: &mut ErrorMap) -> bool {
    true
}

/// `scan` has no extra requirements
pub fn validate_scan_query(_target: &mut QueryTarget, _errs: &mut ErrorMap) -> bool {
    true
}

/// `groupBy` needs dimensions, a limit and an optional ordering
pub fn validate_group_by_query(target: &mut QueryTarget, errs: &mut ErrorMap) -> bool {
    normalize_list(&mut target.group_by);
    if !target.group_by.as_ref().is_some_and(ListInput::is_truthy) {
        errs.insert(keys::GROUP_BY, "Must list dimensions to group by.");
        return false;
    }
    if !validate_limit(target, errs) || !validate_order_by(target) {
        return false;
    }
    true
}

/// `topN` needs a dimension, a metric and a threshold
pub fn validate_top_n_query(target: &mut QueryTarget, errs: &mut ErrorMap) -> bool {
    let mut ok = true;
    if !has_text(&target.dimension) {
        errs.insert(keys::DIMENSION, "Must specify a dimension");
        ok = false;
    }
    if !has_text(&target.druid_metric) {
        errs.insert(keys::DRUID_METRIC, "Must specify a metric");
        ok = false;
    }
    ok && validate_threshold(target, errs)
}

/// `limit` is required and must be an integer; zero is a valid limit
pub fn validate_limit(target: &mut QueryTarget, errs: &mut ErrorMap) -> bool {
    validate_required_int(
        &mut target.limit,
        keys::LIMIT,
        "Must specify a limit",
        "Limit must be an integer",
        errs,
    )
}

/// `threshold` is required and must be an integer
pub fn validate_threshold(target: &mut QueryTarget, errs: &mut ErrorMap) -> bool {
    validate_required_int(
        &mut target.threshold,
        keys::THRESHOLD,
        "Must specify a threshold",
        "Threshold must be an integer",
        errs,
    )
}

/// `maxDataPoints` is optional; when set it must be a positive integer
pub fn validate_max_data_points(target: &mut QueryTarget, errs: &mut ErrorMap) -> bool {
    let Some(raw) = target.max_data_points.as_ref().filter(|v| v.is_truthy()) else {
        return true;
    };
    match raw.parse_int() {
        Some(max) if max > 0 => {
            target.max_data_points = Some(NumericInput::Int(max));
            true
        }
        _ => {
            errs.insert(keys::MAX_DATA_POINTS, "Must be a positive integer");
            false
        }
    }
}

/// `orderBy` is optional; a delimited string is split into a list
pub fn validate_order_by(target: &mut QueryTarget) -> bool {
    normalize_list(&mut target.order_by);
    true
}

fn normalize_list(field: &mut Option<ListInput>) {
    if let Some(list) = field.as_mut().filter(|l| l.is_truthy()) {
        list.normalize();
    }
}

fn validate_required_int(
    field: &mut Option<NumericInput>,
    key: &str,
    missing: &str,
    invalid: &str,
    errs: &mut ErrorMap,
) -> bool {
    let Some(raw) = field.as_ref() else {
        errs.insert(key, missing);
        return false;
    };
    match raw.parse_int() {
        Some(value) => {
            *field = Some(NumericInput::Int(value));
            true
        }
        None => {
            errs.insert(key, invalid);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_limit_zero_is_defined() {
        let mut target = QueryTarget::new();
        target.limit = Some(NumericInput::Int(0));
        let mut errs = ErrorMap::new();

        assert!(validate_limit(&mut target, &mut errs));
        assert!(errs.is_empty());
    }

    #[test]
    fn test_limit_missing() {
        let mut target = QueryTarget::new();
        let mut errs = ErrorMap::new();

        assert!(!validate_limit(&mut target, &mut errs));
        assert_eq!(errs.get(keys::LIMIT), Some("Must specify a limit"));
    }

    #[test]
    fn test_limit_coerced_from_text() {
        let mut target = QueryTarget::new();
        target.limit = Some(NumericInput::from("25"));
        let mut errs = ErrorMap::new();

        assert!(validate_limit(&mut target, &mut errs));
        assert_eq!(target.limit, Some(NumericInput::Int(25)));
    }

    #[test]
    fn test_limit_not_an_integer() {
        let mut target = QueryTarget::new();
        target.limit = Some(NumericInput::from("lots"));
        let mut errs = ErrorMap::new();

        assert!(!validate_limit(&mut target, &mut errs));
        assert_eq!(errs.get(keys::LIMIT), Some("Limit must be an integer"));
        assert_eq!(target.limit, Some(NumericInput::from("lots")));
    }

    #[test]
    fn test_threshold_messages() {
        let mut target = QueryTarget::new();
        let mut errs = ErrorMap::new();
        assert!(!validate_threshold(&mut target, &mut errs));
        assert_eq!(errs.get(keys::THRESHOLD), Some("Must specify a threshold"));

        target.threshold = Some(NumericInput::from("ten"));
        let mut errs = ErrorMap::new();
        assert!(!validate_threshold(&mut target, &mut errs));
        assert_eq!(errs.get(keys::THRESHOLD), Some("Threshold must be an integer"));
    }

    #[test]
    fn test_max_data_points() {
        let mut target = QueryTarget::new();
        let mut errs = ErrorMap::new();
        assert!(validate_max_data_points(&mut target, &mut errs));

        target.max_data_points = Some(NumericInput::from("500"));
        assert!(validate_max_data_points(&mut target, &mut errs));
        assert_eq!(target.max_data_points, Some(NumericInput::Int(500)));

        target.max_data_points = Some(NumericInput::from("-3"));
        assert!(!validate_max_data_points(&mut target, &mut errs));
        assert_eq!(errs.get(keys::MAX_DATA_POINTS), Some("Must be a positive integer"));
    }

    #[test]
    fn test_max_data_points_zero_is_unset() {
        let mut target = QueryTarget::new();
        target.max_data_points = Some(NumericInput::Int(0));
        let mut errs = ErrorMap::new();

        assert!(validate_max_data_points(&mut target, &mut errs));
        assert!(errs.is_empty());

        target.max_data_points = Some(NumericInput::from("0"));
        assert!(!validate_max_data_points(&mut target, &mut errs));
    }

    #[test]
    fn test_group_by_split_keeps_whitespace() {
        let mut target = QueryTarget::new();
        target.group_by = Some(ListInput::from("a, b,c"));
        target.limit = Some(NumericInput::Int(0));
        let mut errs = ErrorMap::new();

        assert!(validate_group_by_query(&mut target, &mut errs));
        assert_eq!(target.group_by, Some(ListInput::List(strings(&["a", " b", "c"]))));
    }

    #[test]
    fn test_group_by_missing() {
        let mut target = QueryTarget::new();
        target.limit = Some(NumericInput::Int(5));
        let mut errs = ErrorMap::new();

        assert!(!validate_group_by_query(&mut target, &mut errs));
        assert_eq!(errs.get(keys::GROUP_BY), Some("Must list dimensions to group by."));

        target.group_by = Some(ListInput::from(""));
        let mut errs = ErrorMap::new();
        assert!(!validate_group_by_query(&mut target, &mut errs));
        assert!(errs.contains(keys::GROUP_BY));
    }

    #[test]
    fn test_group_by_requires_limit() {
        let mut target = QueryTarget::new();
        target.group_by = Some(ListInput::from("page"));
        let mut errs = ErrorMap::new();

        assert!(!validate_group_by_query(&mut target, &mut errs));
        assert!(errs.contains(keys::LIMIT));
        assert!(!errs.contains(keys::GROUP_BY));
    }

    #[test]
    fn test_order_by_split() {
        let mut target = QueryTarget::new();
        target.order_by = Some(ListInput::from("count,page"));
        assert!(validate_order_by(&mut target));
        assert_eq!(target.order_by, Some(ListInput::List(strings(&["count", "page"]))));

        // Already a list: untouched
        assert!(validate_order_by(&mut target));
        assert_eq!(target.order_by, Some(ListInput::List(strings(&["count", "page"]))));
    }

    #[test]
    fn test_top_n_reports_both_missing_fields() {
        let mut target = QueryTarget::new();
        target.threshold = Some(NumericInput::Int(10));
        let mut errs = ErrorMap::new();

        assert!(!validate_top_n_query(&mut target, &mut errs));
        assert!(errs.contains(keys::DIMENSION));
        assert!(errs.contains(keys::DRUID_METRIC));
        assert!(!errs.contains(keys::THRESHOLD));
    }

    #[test]
    fn test_top_n_valid() {
        let mut target = QueryTarget::new();
        target.dimension = Some("page".to_string());
        target.druid_metric = Some("edits".to_string());
        target.threshold = Some(NumericInput::from("5"));
        let mut errs = ErrorMap::new();

        assert!(validate_top_n_query(&mut target, &mut errs));
        assert!(errs.is_empty());
        assert_eq!(target.threshold, Some(NumericInput::Int(5)));
    }
}
