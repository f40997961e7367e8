//! Draft staging
//!
//! Each editable list on a target has a draft slot next to it. The slot is
//! either idle or in add mode; the editor moves drafts between the slot and
//! the committed list.

use crate::target::{Aggregator, Filter, PostAggregator, QueryTarget};
use crate::validate::{keys, ActiveDrafts};

/// The lists that have a draft slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftKind {
    Filter,
    Aggregator,
    PostAggregator,
    SelectDimension,
    SelectMetric,
    ScanColumn,
}

impl DraftKind {
    pub const ALL: [Self; 6] = [
        Self::Filter,
        Self::Aggregator,
        Self::PostAggregator,
        Self::SelectDimension,
        Self::SelectMetric,
        Self::ScanColumn,
    ];

    fn index(&self) -> usize {
        match self {
            Self::Filter => 0,
            Self::Aggregator => 1,
            Self::PostAggregator => 2,
            Self::SelectDimension => 3,
            Self::SelectMetric => 4,
            Self::ScanColumn => 5,
        }
    }
}

impl std::fmt::Display for DraftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filter => write!(f, "filter"),
            Self::Aggregator => write!(f, "aggregator"),
            Self::PostAggregator => write!(f, "post aggregator"),
            Self::SelectDimension => write!(f, "select dimension"),
            Self::SelectMetric => write!(f, "select metric"),
            Self::ScanColumn => write!(f, "scan column"),
        }
    }
}

/// Add-mode flags, all off initially
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StagingModes {
    adding: [bool; 6],
}

impl StagingModes {
    pub fn is_adding(&self, kind: DraftKind) -> bool {
        self.adding[kind.index()]
    }

    pub(crate) fn set(&mut self, kind: DraftKind, adding: bool) {
        self.adding[kind.index()] = adding;
    }

    /// The drafts whole-target validation should check
    pub fn active_drafts(&self) -> ActiveDrafts {
        ActiveDrafts {
            filter: self.is_adding(DraftKind::Filter),
            aggregator: self.is_adding(DraftKind::Aggregator),
            post_aggregator: self.is_adding(DraftKind::PostAggregator),
        }
    }
}

/// A committed list and its draft on the target
pub(crate) trait DraftSlot {
    type Item;

    const KIND: DraftKind;

    /// Error key that must be clear before the draft is committed; `None`
    /// commits unconditionally
    const GATE: Option<&'static str>;

    fn list(target: &mut QueryTarget) -> &mut Vec<Self::Item>;

    fn draft(target: &mut QueryTarget) -> &mut Self::Item;

    /// A fresh default-shaped draft
    fn blank() -> Self::Item;
}

pub(crate) struct FilterSlot;

impl DraftSlot for FilterSlot {
    type Item = Filter;
    const KIND: DraftKind = DraftKind::Filter;
    const GATE: Option<&'static str> = Some(keys::CURRENT_FILTER);

    fn list(target: &mut QueryTarget) -> &mut Vec<Filter> {
        &mut target.filters
    }

    fn draft(target: &mut QueryTarget) -> &mut Filter {
        &mut target.current_filter
    }

    fn blank() -> Filter {
        Filter::default_draft()
    }
}

pub(crate) struct AggregatorSlot;

impl DraftSlot for AggregatorSlot {
    type Item = Aggregator;
    const KIND: DraftKind = DraftKind::Aggregator;
    const GATE: Option<&'static str> = Some(keys::CURRENT_AGGREGATOR);

    fn list(target: &mut QueryTarget) -> &mut Vec<Aggregator> {
        &mut target.aggregators
    }

    fn draft(target: &mut QueryTarget) -> &mut Aggregator {
        &mut target.current_aggregator
    }

    fn blank() -> Aggregator {
        Aggregator::default_draft()
    }
}

pub(crate) struct PostAggregatorSlot;

impl DraftSlot for PostAggregatorSlot {
    type Item = PostAggregator;
    const KIND: DraftKind = DraftKind::PostAggregator;
    const GATE: Option<&'static str> = Some(keys::CURRENT_POST_AGGREGATOR);

    fn list(target: &mut QueryTarget) -> &mut Vec<PostAggregator> {
        &mut target.post_aggregators
    }

    fn draft(target: &mut QueryTarget) -> &mut PostAggregator {
        &mut target.current_post_aggregator
    }

    fn blank() -> PostAggregator {
        PostAggregator::default_draft()
    }
}

pub(crate) struct SelectDimensionSlot;

impl DraftSlot for SelectDimensionSlot {
    type Item = String;
    const KIND: DraftKind = DraftKind::SelectDimension;
    const GATE: Option<&'static str> = None;

    fn list(target: &mut QueryTarget) -> &mut Vec<String> {
        &mut target.select_dimensions
    }

    fn draft(target: &mut QueryTarget) -> &mut String {
        &mut target.current_select.dimension
    }

    fn blank() -> String {
        String::new()
    }
}

pub(crate) struct SelectMetricSlot;

impl DraftSlot for SelectMetricSlot {
    type Item = String;
    const KIND: DraftKind = DraftKind::SelectMetric;
    const GATE: Option<&'static str> = None;

    fn list(target: &mut QueryTarget) -> &mut Vec<String> {
        &mut target.select_metrics
    }

    fn draft(target: &mut QueryTarget) -> &mut String {
        &mut target.current_select.metric
    }

    fn blank() -> String {
        String::new()
    }
}

pub(crate) struct ScanColumnSlot;

impl DraftSlot for ScanColumnSlot {
    type Item = String;
    const KIND: DraftKind = DraftKind::ScanColumn;
    const GATE: Option<&'static str> = None;

    fn list(target: &mut QueryTarget) -> &mut Vec<String> {
        &mut target.scan_columns
    }

    fn draft(target: &mut QueryTarget) -> &mut String {
        &mut target.current_scan.column
    }

    fn blank() -> String {
        String::new()
    }
}
