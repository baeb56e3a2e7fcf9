//! State Groups
//!
//! Tracks busy/idle state across a hierarchy of DOM regions ("groups") and
//! the indicator/trigger elements nested inside them. State is reflected by
//! toggling CSS classes and attributes; nothing is re-rendered.
//!
//! # Overview
//! - [`ElementConfig`]: per-element options, read from `data-state-options`
//! - [`Engine`]: registry of set-up nodes plus the busy/idle signaling protocol
//! - [`StatePage`]: a document and its engine behind [`StateGroupsService`]
//!
//! # Example
//! ```rust,ignore
//! use stategroups::{EngineConfig, StateGroupsService, StatePage};
//!
//! let mut page = StatePage::from_html(html, EngineConfig::default())?;
//! page.setup_elements()?;
//! page.set_busy("save-form", None)?;
//! ```

pub mod attrs;
mod config;
mod engine;
mod error;
mod events;
mod hygiene;
mod options;
mod page;
mod propagate;
mod registry;
mod resolve;
mod setup;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use options::{DomAttribute, ElementConfig, OptionsBuilder, Role};
pub use page::{StateGroupsService, StatePage};
pub use registry::{Readiness, RegisteredNode, Registry, Uid};
pub use setup::{ScanReport, SetupOutcome};

pub use stategroups_dom as dom;
pub use stategroups_html as html;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
