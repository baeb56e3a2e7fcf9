//! State Groups HTML Parser
//!
//! HTML5 parsing built on html5ever. Host pages and fixtures are turned into
//! a [`stategroups_dom::Document`] the state engine can scan.

mod parser;

pub use parser::HtmlParser;

use stategroups_dom::Document;

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
