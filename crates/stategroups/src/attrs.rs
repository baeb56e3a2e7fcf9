//! DOM attributes written and read by the engine.
//!
//! Only [`OPTIONS`] is input; every other attribute is a projection of engine
//! state, written after the state changed.

/// Serialized [`crate::ElementConfig`], produced by the host
pub const OPTIONS: &str = "data-state-options";
/// Process-unique id of a set-up node
pub const UID: &str = "data-state-uid";
/// `true` or `waitingforgroup`
pub const READY: &str = "data-state-ready";
/// `group` or `element`
pub const ROLE: &str = "data-state-role";
/// Group the node belongs to (or is, for groups)
pub const GROUP_ID: &str = "data-state-groupid";
/// Explicit parent group of an inheriting group
pub const PARENT_GROUP_ID: &str = "data-state-parentgroupid";
/// Aggregate busy flag of a group anchor
pub const GROUP_STATUS: &str = "data-state-group-status";

/// Boolean attribute value
pub(crate) fn bool_value(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
