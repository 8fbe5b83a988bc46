//! Markup tree parsing and querying
//!
//! This module provides the host-independent tree the rest of the crate
//! works on:
//! - MarkupNode / ElementNode: element, text, and comment nodes
//! - parse_markup: HTML string → tree via html5ever
//! - Selector queries: first-match-wins candidate lookup and
//!   document-order enumeration

pub mod node;
pub mod parse;
pub mod select;

pub use node::{ElementNode, MarkupNode};
pub use parse::parse_markup;
pub use select::{find_in, select_all, select_first, Selector};
