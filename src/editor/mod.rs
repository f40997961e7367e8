//! Query Editor
//!
//! Stateful editing over a [`QueryTarget`] owned by the caller. The editor
//! keeps the add-mode flags for every draft slot and the latest error map;
//! the target itself is passed in by reference to every operation.
//!
//! # Draft workflow
//!
//! Each list (filters, aggregators, post-aggregators, select dimensions,
//! select metrics, scan columns) follows the same steps:
//!
//! 1. `add_*` once: enter add mode so the caller shows the draft inputs
//! 2. The caller edits the draft on the target (`current_filter`, ...)
//! 3. `add_*` again: validate and, if the draft passes, move it onto the list
//! 4. `clear_current_*` drops the draft, `edit_*` pulls an entry back into it,
//!    `remove_*` deletes an entry
//!
//! Filters, aggregators and post-aggregators only commit when their draft
//! validates; the name lists commit unconditionally.
//!
//! Every mutating operation returns the fresh error map and invokes the
//! refresh hook, if one is installed, so the host can re-run the query.
//!
//! # Example
//!
//! ```rust
//! use druidq::editor::QueryEditor;
//! use druidq::target::QueryTarget;
//!
//! let mut editor = QueryEditor::default();
//! let mut target = QueryTarget::new().with_datasource("wikipedia");
//! editor.init(&mut target);
//!
//! editor.add_aggregator(&mut target); // show the inputs
//! target.current_aggregator.name = Some("rows".to_string());
//! editor.add_aggregator(&mut target); // commit
//!
//! assert_eq!(target.aggregators.len(), 1);
//! ```

mod staging;

pub use staging::{DraftKind, StagingModes};

use crate::target::{ArithmeticFn, ArithmeticOrdering, EditorDefaults, Granularity, QueryTarget};
use crate::validate::{validate_target, ErrorMap, ValidatorRegistry};
use staging::{
    AggregatorSlot, DraftSlot, FilterSlot, PostAggregatorSlot, ScanColumnSlot,
    SelectDimensionSlot, SelectMetricSlot,
};

/// Called with the target after each mutation
pub type RefreshHook = Box<dyn FnMut(&QueryTarget) + Send>;

/// Editing session state for one query target
pub struct QueryEditor {
    registry: ValidatorRegistry,
    defaults: EditorDefaults,
    modes: StagingModes,
    errors: ErrorMap,
    refresh: Option<RefreshHook>,
}

impl QueryEditor {
    /// Create an editor that seeds targets with `defaults`
    pub fn new(defaults: EditorDefaults) -> Self {
        Self {
            registry: ValidatorRegistry::new(),
            defaults,
            modes: StagingModes::default(),
            errors: ErrorMap::new(),
            refresh: None,
        }
    }

    /// Install a hook invoked after every mutation
    pub fn with_refresh(mut self, hook: impl FnMut(&QueryTarget) + Send + 'static) -> Self {
        self.refresh = Some(Box::new(hook));
        self
    }

    /// Prepare a target for editing
    ///
    /// Seeds unset fields from the defaults, leaves every slot idle and
    /// computes the initial error map. The refresh hook is not called.
    pub fn init(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.defaults.seed(target);
        self.modes = StagingModes::default();
        self.errors = self.validate_target(target);
        tracing::debug!(
            query_type = target.query_type.as_deref().unwrap_or(""),
            errors = self.errors.len(),
            "editor initialized"
        );
        &self.errors
    }

    /// Validate the whole target against the current add modes
    pub fn validate_target(&self, target: &mut QueryTarget) -> ErrorMap {
        validate_target(&self.registry, target, self.modes.active_drafts())
    }

    /// Re-validate after the caller edited a field directly
    pub fn target_blur(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        let errors = self.validate_target(target);
        self.publish(errors, target)
    }

    /// Latest error map
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn modes(&self) -> &StagingModes {
        &self.modes
    }

    pub fn is_adding(&self, kind: DraftKind) -> bool {
        self.modes.is_adding(kind)
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn defaults(&self) -> &EditorDefaults {
        &self.defaults
    }

    /// Arithmetic functions offered for post-aggregators
    pub fn arithmetic_fns(&self) -> Vec<&'static str> {
        ArithmeticFn::names()
    }

    /// Orderings offered for arithmetic post-aggregators
    pub fn arithmetic_orderings(&self) -> Vec<&'static str> {
        ArithmeticOrdering::names()
    }

    /// Granularities offered when overriding
    pub fn granularities(&self) -> Vec<&'static str> {
        Granularity::names()
    }

    // Filters

    pub fn add_filter(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.add::<FilterSlot>(target)
    }

    pub fn edit_filter(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.edit::<FilterSlot>(target, index)
    }

    pub fn remove_filter(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.remove::<FilterSlot>(target, index)
    }

    pub fn clear_current_filter(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.clear::<FilterSlot>(target)
    }

    // Aggregators

    pub fn add_aggregator(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.add::<AggregatorSlot>(target)
    }

    pub fn edit_aggregator(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.edit::<AggregatorSlot>(target, index)
    }

    pub fn remove_aggregator(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.remove::<AggregatorSlot>(target, index)
    }

    pub fn clear_current_aggregator(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.clear::<AggregatorSlot>(target)
    }

    // Post-aggregators

    pub fn add_post_aggregator(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.add::<PostAggregatorSlot>(target)
    }

    pub fn edit_post_aggregator(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.edit::<PostAggregatorSlot>(target, index)
    }

    pub fn remove_post_aggregator(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.remove::<PostAggregatorSlot>(target, index)
    }

    pub fn clear_current_post_aggregator(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.clear::<PostAggregatorSlot>(target)
    }

    // Select dimensions

    pub fn add_select_dimension(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.add::<SelectDimensionSlot>(target)
    }

    pub fn remove_select_dimension(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.remove::<SelectDimensionSlot>(target, index)
    }

    pub fn clear_current_select_dimension(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.clear::<SelectDimensionSlot>(target)
    }

    // Select metrics

    pub fn add_select_metric(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.add::<SelectMetricSlot>(target)
    }

    pub fn remove_select_metric(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.remove::<SelectMetricSlot>(target, index)
    }

    pub fn clear_current_select_metric(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.clear::<SelectMetricSlot>(target)
    }

    // Scan columns

    pub fn add_scan_column(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.add::<ScanColumnSlot>(target)
    }

    pub fn remove_scan_column(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        self.remove::<ScanColumnSlot>(target, index)
    }

    pub fn clear_current_scan_column(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        self.clear::<ScanColumnSlot>(target)
    }

    // Slot transitions

    fn add<S: DraftSlot>(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        if !self.modes.is_adding(S::KIND) {
            self.modes.set(S::KIND, true);
            tracing::debug!(draft = %S::KIND, "add mode enabled");
            return &self.errors;
        }

        if let Some(gate) = S::GATE {
            let errors = self.validate_target(target);
            if let Some(message) = errors.get(gate) {
                tracing::debug!(draft = %S::KIND, error = %message, "draft rejected");
                return self.publish(errors, target);
            }
        }

        let draft = std::mem::replace(S::draft(target), S::blank());
        S::list(target).push(draft);
        self.modes.set(S::KIND, false);
        tracing::debug!(
            draft = %S::KIND,
            committed = S::list(target).len(),
            "draft committed"
        );

        self.target_blur(target)
    }

    fn edit<S: DraftSlot>(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        let list = S::list(target);
        if index >= list.len() {
            tracing::warn!(draft = %S::KIND, index, len = list.len(), "edit index out of range");
            return &self.errors;
        }

        let entry = list.remove(index);
        *S::draft(target) = entry;
        self.modes.set(S::KIND, true);
        tracing::debug!(draft = %S::KIND, index, "entry moved to draft");
        &self.errors
    }

    fn remove<S: DraftSlot>(&mut self, target: &mut QueryTarget, index: usize) -> &ErrorMap {
        let list = S::list(target);
        if index < list.len() {
            list.remove(index);
            tracing::debug!(draft = %S::KIND, index, "entry removed");
        } else {
            tracing::warn!(draft = %S::KIND, index, len = list.len(), "remove index out of range");
        }
        self.target_blur(target)
    }

    fn clear<S: DraftSlot>(&mut self, target: &mut QueryTarget) -> &ErrorMap {
        *S::draft(target) = S::blank();
        self.modes.set(S::KIND, false);
        self.target_blur(target)
    }

    fn publish(&mut self, errors: ErrorMap, target: &QueryTarget) -> &ErrorMap {
        self.errors = errors;
        if let Some(refresh) = self.refresh.as_mut() {
            refresh(target);
        }
        &self.errors
    }
}

impl Default for QueryEditor {
    fn default() -> Self {
        Self::new(EditorDefaults::default())
    }
}

impl std::fmt::Debug for QueryEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEditor")
            .field("defaults", &self.defaults)
            .field("modes", &self.modes)
            .field("errors", &self.errors)
            .field("refresh", &self.refresh.is_some())
            .finish()
    }
}
