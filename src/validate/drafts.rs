//! Draft validators
//!
//! Validators for the filter, aggregator and post-aggregator being edited.
//! Each returns `None` when the draft can be committed, or the message to show
//! next to it.

use crate::target::{
    has_text, Aggregator, ArithmeticFn, FieldAccess, Filter, NumericInput, PostAggregator,
};

pub fn validate_selector_filter(filter: &Filter) -> Option<String> {
    if !has_text(&filter.dimension) {
        return Some("Must provide dimension name for selector filter.".to_string());
    }
    // An empty value would match null rows, but the editor has no way to ask for that yet
    if !has_text(&filter.value) {
        return Some("Must provide dimension value for selector filter.".to_string());
    }
    None
}

pub fn validate_regex_filter(filter: &Filter) -> Option<String> {
    if !has_text(&filter.dimension) {
        return Some("Must provide dimension name for regex filter.".to_string());
    }
    if !has_text(&filter.pattern) {
        return Some("Must provide pattern for regex filter.".to_string());
    }
    None
}

pub fn validate_javascript_filter(filter: &Filter) -> Option<String> {
    if !has_text(&filter.dimension) {
        return Some("Must provide dimension name for javascript filter.".to_string());
    }
    if !has_text(&filter.function) {
        return Some("Must provide func value for javascript filter.".to_string());
    }
    None
}

pub fn validate_count_aggregator(aggregator: &Aggregator) -> Option<String> {
    if !has_text(&aggregator.name) {
        return Some("Must provide an output name for count aggregator.".to_string());
    }
    None
}

/// Output name plus input metric, with `kind` named in the message
pub fn validate_simple_aggregator(kind: &str, aggregator: &Aggregator) -> Option<String> {
    if !has_text(&aggregator.name) {
        return Some(format!("Must provide an output name for {} aggregator.", kind));
    }
    if !has_text(&aggregator.field_name) {
        return Some(format!("Must provide a metric name for {} aggregator.", kind));
    }
    None
}

pub fn validate_approx_histogram_fold_aggregator(aggregator: &Aggregator) -> Option<String> {
    validate_simple_aggregator("approxHistogramFold", aggregator)
}

pub fn validate_theta_sketch_aggregator(aggregator: &Aggregator) -> Option<String> {
    validate_simple_aggregator("thetaSketch", aggregator)
}

/// Output name plus source aggregator, with `kind` named in the message
pub fn validate_simple_post_aggregator(kind: &str, post: &PostAggregator) -> Option<String> {
    if !has_text(&post.name) {
        return Some(format!("Must provide an output name for {} post aggregator.", kind));
    }
    if !has_text(&post.field_name) {
        return Some(format!(
            "Must provide an aggregator name for {} post aggregator.",
            kind
        ));
    }
    None
}

pub fn validate_max_post_aggregator(post: &mut PostAggregator) -> Option<String> {
    validate_simple_post_aggregator("max", post)
}

pub fn validate_min_post_aggregator(post: &mut PostAggregator) -> Option<String> {
    validate_simple_post_aggregator("min", post)
}

pub fn validate_quantile_post_aggregator(post: &mut PostAggregator) -> Option<String> {
    if let Some(err) = validate_simple_post_aggregator("quantile", post) {
        return Some(err);
    }
    if !post.probability.as_ref().is_some_and(NumericInput::is_truthy) {
        return Some("Must provide a probability for the quantile post aggregator.".to_string());
    }
    None
}

/// Arithmetic needs a name, a known function and at least two operands
///
/// Typed `fieldNames` are split on commas, trimmed and turned into
/// `fieldAccess` entries stored in `fields`. The typed text is kept so the
/// editor can show it again.
pub fn validate_arithmetic_post_aggregator(post: &mut PostAggregator) -> Option<String> {
    if !has_text(&post.name) {
        return Some("Must provide an output name for arithmetic post aggregator.".to_string());
    }
    let Some(func) = post.func.as_deref().filter(|f| !f.is_empty()) else {
        return Some("Must provide a function for arithmetic post aggregator.".to_string());
    };
    if ArithmeticFn::parse_name(func).is_none() {
        return Some("Invalid arithmetic function".to_string());
    }

    match post.field_names.as_ref() {
        Some(names) if names.is_truthy() => {
            if !names.is_list() || post.fields.is_none() {
                let fields = names.trimmed_entries().into_iter().map(FieldAccess::new).collect();
                post.fields = Some(fields);
            }
        }
        _ => {
            return Some("Must provide a list of fields for arithmetic post aggregator.".to_string());
        }
    }

    if post.fields.as_ref().map_or(0, Vec::len) < 2 {
        return Some(
            "Must provide at least two fields for arithmetic post aggregator.".to_string(),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{AggregatorType, ListInput, PostAggregatorType};

    #[test]
    fn test_selector_filter() {
        let mut filter = Filter::new("selector");
        assert_eq!(
            validate_selector_filter(&filter).as_deref(),
            Some("Must provide dimension name for selector filter.")
        );
        filter.dimension = Some("page".to_string());
        assert_eq!(
            validate_selector_filter(&filter).as_deref(),
            Some("Must provide dimension value for selector filter.")
        );
        assert_eq!(validate_selector_filter(&Filter::selector("page", "Main")), None);
    }

    #[test]
    fn test_regex_and_javascript_filters() {
        let mut filter = Filter::new("regex");
        filter.dimension = Some("page".to_string());
        assert_eq!(
            validate_regex_filter(&filter).as_deref(),
            Some("Must provide pattern for regex filter.")
        );
        assert_eq!(validate_regex_filter(&Filter::regex("page", "^Main")), None);

        let filter = Filter::new("javascript");
        assert_eq!(
            validate_javascript_filter(&filter).as_deref(),
            Some("Must provide dimension name for javascript filter.")
        );
        let mut filter = Filter::javascript("page", "");
        assert_eq!(
            validate_javascript_filter(&filter).as_deref(),
            Some("Must provide func value for javascript filter.")
        );
        filter.function = Some("function(x) { return true; }".to_string());
        assert_eq!(validate_javascript_filter(&filter), None);
    }

    #[test]
    fn test_count_aggregator_needs_only_name() {
        assert_eq!(
            validate_count_aggregator(&Aggregator::new("count")).as_deref(),
            Some("Must provide an output name for count aggregator.")
        );
        assert_eq!(validate_count_aggregator(&Aggregator::count("rows")), None);
    }

    #[test]
    fn test_simple_aggregator_messages_name_the_kind() {
        let agg = Aggregator::new("longSum").named("total");
        assert_eq!(
            validate_simple_aggregator("longSum", &agg).as_deref(),
            Some("Must provide a metric name for longSum aggregator.")
        );
        assert_eq!(
            validate_theta_sketch_aggregator(&Aggregator::new("thetaSketch")).as_deref(),
            Some("Must provide an output name for thetaSketch aggregator.")
        );
        let agg = Aggregator::simple(AggregatorType::ApproxHistogramFold, "h", "latency");
        assert_eq!(validate_approx_histogram_fold_aggregator(&agg), None);
    }

    #[test]
    fn test_quantile_needs_probability() {
        let mut post = PostAggregator::simple(PostAggregatorType::Quantile, "p95", "h");
        assert_eq!(
            validate_quantile_post_aggregator(&mut post).as_deref(),
            Some("Must provide a probability for the quantile post aggregator.")
        );
        post.probability = Some(NumericInput::Float(0.95));
        assert_eq!(validate_quantile_post_aggregator(&mut post), None);
    }

    #[test]
    fn test_min_max_post_aggregators() {
        let mut post = PostAggregator::new("max");
        post.name = Some("peak".to_string());
        assert_eq!(
            validate_max_post_aggregator(&mut post).as_deref(),
            Some("Must provide an aggregator name for max post aggregator.")
        );
        let mut post = PostAggregator::new("min");
        assert_eq!(
            validate_min_post_aggregator(&mut post).as_deref(),
            Some("Must provide an output name for min post aggregator.")
        );
    }

    #[test]
    fn test_arithmetic_fields_are_trimmed() {
        let mut post = PostAggregator::arithmetic("ratio", ArithmeticFn::Divide, " a , b");
        assert_eq!(validate_arithmetic_post_aggregator(&mut post), None);
        assert_eq!(
            post.fields,
            Some(vec![FieldAccess::new("a"), FieldAccess::new("b")])
        );
        // The typed text is left as typed
        assert_eq!(post.field_names, Some(ListInput::from(" a , b")));
    }

    #[test]
    fn test_arithmetic_needs_two_fields() {
        let mut post = PostAggregator::arithmetic("ratio", ArithmeticFn::Plus, "a");
        assert_eq!(
            validate_arithmetic_post_aggregator(&mut post).as_deref(),
            Some("Must provide at least two fields for arithmetic post aggregator.")
        );
    }

    #[test]
    fn test_arithmetic_function_checks() {
        let mut post = PostAggregator::arithmetic("ratio", ArithmeticFn::Plus, "a,b");
        post.func = Some("%".to_string());
        assert_eq!(
            validate_arithmetic_post_aggregator(&mut post).as_deref(),
            Some("Invalid arithmetic function")
        );
        post.func = None;
        assert_eq!(
            validate_arithmetic_post_aggregator(&mut post).as_deref(),
            Some("Must provide a function for arithmetic post aggregator.")
        );
    }

    #[test]
    fn test_arithmetic_needs_field_names() {
        let mut post = PostAggregator::default_draft();
        post.name = Some("sum".to_string());
        assert_eq!(
            validate_arithmetic_post_aggregator(&mut post).as_deref(),
            Some("Must provide a list of fields for arithmetic post aggregator.")
        );
    }

    #[test]
    fn test_arithmetic_list_field_names() {
        let mut post = PostAggregator::default_draft();
        post.name = Some("sum".to_string());
        post.field_names = Some(ListInput::List(vec!["x".to_string(), " y".to_string()]));
        assert_eq!(validate_arithmetic_post_aggregator(&mut post), None);
        assert_eq!(
            post.fields,
            Some(vec![FieldAccess::new("x"), FieldAccess::new("y")])
        );
    }
}
