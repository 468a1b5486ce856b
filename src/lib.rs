//! Renders introspected interface descriptions as human-readable API
//! documentation.
//!
//! The input is a serialized interface model: one namespace of classes,
//! records, interfaces, aliases and functions, already parsed and
//! cross-referenced by the tool that produced it. This crate walks that
//! read-only tree, builds a page graph with stable identifiers, and emits
//! either a single DocBook document or a directory of Mallard pages.

pub mod markup;
pub mod model;
pub mod pages;
pub mod render;

pub use model::Library;
pub use pages::{parent_chain, Page, PageGraph, PageNode};
pub use render::{DocBookWriter, Language, MallardWriter, OutputFormat};

#[cfg(test)]
mod tests;
