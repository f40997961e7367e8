//! Whole-target validation
//!
//! Runs every applicable check against a target and returns a fresh error map.
//! Drafts are only checked while the user is adding one; an idle draft is not
//! an error.

use super::errors::{keys, ErrorMap};
use super::query::validate_max_data_points;
use super::registry::ValidatorRegistry;
use crate::target::{has_text, Granularity, QueryTarget};

/// Which drafts are currently being edited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveDrafts {
    pub filter: bool,
    pub aggregator: bool,
    pub post_aggregator: bool,
}

/// Validate the whole target
///
/// Checks run in a fixed order because later checks read fields that earlier
/// ones coerce (the query type validator normalizes `groupBy`, for example).
/// Calling this again without edits yields the same map and leaves coerced
/// fields unchanged.
pub fn validate_target(
    registry: &ValidatorRegistry,
    target: &mut QueryTarget,
    active: ActiveDrafts,
) -> ErrorMap {
    let mut errs = ErrorMap::new();

    if !has_text(&target.druid_ds) {
        errs.insert(keys::DRUID_DS, "You must supply a druidDS name.");
    }

    match target.query_type.clone().filter(|t| !t.is_empty()) {
        None => errs.insert(keys::QUERY_TYPE, "You must supply a query type."),
        Some(query_type) => match registry.query_validator(&query_type) {
            Some(validator) => {
                validator(target, &mut errs);
            }
            None => errs.insert(
                keys::QUERY_TYPE,
                format!("Unknown query type: {}.", query_type),
            ),
        },
    }

    if target.should_override_granularity {
        match target.custom_granularity.as_deref().filter(|g| !g.is_empty()) {
            None => errs.insert(keys::CUSTOM_GRANULARITY, "You must choose a granularity."),
            Some(granularity) if Granularity::parse_name(granularity).is_none() => {
                errs.insert(keys::CUSTOM_GRANULARITY, "Invalid granularity.")
            }
            Some(_) => {}
        }
    } else {
        validate_max_data_points(target, &mut errs);
    }

    if active.filter {
        let filter = &target.current_filter;
        match registry.filter_validator(&filter.kind) {
            None => errs.insert(
                keys::CURRENT_FILTER,
                format!("Invalid filter type: {}.", filter.kind),
            ),
            Some(validator) => {
                if let Some(message) = validator(filter) {
                    errs.insert(keys::CURRENT_FILTER, message);
                }
            }
        }
    }

    if active.aggregator {
        let aggregator = &target.current_aggregator;
        match registry.aggregator_validator(&aggregator.kind) {
            None => errs.insert(
                keys::CURRENT_AGGREGATOR,
                format!("Invalid aggregator type: {}.", aggregator.kind),
            ),
            Some(validator) => {
                if let Some(message) = validator(aggregator) {
                    errs.insert(keys::CURRENT_AGGREGATOR, message);
                }
            }
        }
    }

    if target.aggregators.is_empty() && !target.is_scan() {
        errs.insert(keys::AGGREGATORS, "You must supply at least one aggregator");
    }

    if active.post_aggregator {
        let post = &mut target.current_post_aggregator;
        match registry.post_aggregator_validator(&post.kind) {
            None => errs.insert(
                keys::CURRENT_POST_AGGREGATOR,
                format!("Invalid post aggregator type: {}.", post.kind),
            ),
            Some(validator) => {
                if let Some(message) = validator(post) {
                    errs.insert(keys::CURRENT_POST_AGGREGATOR, message);
                }
            }
        }
    }

    tracing::trace!(errors = errs.len(), "validated target");
    errs
}
