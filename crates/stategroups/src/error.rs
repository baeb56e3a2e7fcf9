//! Engine errors

use stategroups_dom::{DomError, NodeId};

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `data-state-options` is not a valid options blob
    #[error("Invalid state options on node {node}: {source}")]
    InvalidOptions {
        node: NodeId,
        #[source]
        source: serde_json::Error,
    },

    /// Element names no group and sits under no group
    #[error(
        "Cannot find group of node {node}: no group id specified and no group found upwards in the DOM tree"
    )]
    NoEnclosingGroup { node: NodeId },

    /// Group resolved, but no registered anchor exists at registration time
    #[error("Element cannot be set up because group {group_id} cannot be found")]
    GroupNotRegistered { group_id: String },

    /// Node is not part of the document arena or not an element
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// Host markup could not be read
    #[error("HTML error: {0}")]
    Html(#[from] stategroups_html::HtmlError),

    /// One or more elements failed during a scan
    #[error("{} element(s) failed setup; first: {}", .0.len(), first_failure(.0))]
    Scan(Vec<(NodeId, Error)>),
}

fn first_failure(failures: &[(NodeId, Error)]) -> String {
    failures
        .first()
        .map(|(node, err)| format!("{node}: {err}"))
        .unwrap_or_default()
}
