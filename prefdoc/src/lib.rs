//! Preference-pane documentation generator.
//!
//! `prefdoc` extracts documentation comments embedded in preference-pane
//! markup, cross-references the discovered preferences against a defaults
//! mapping, and renders one Markdown reference document grouped by UI panel,
//! hidden preferences included. The pipeline is strictly linear: load →
//! extract → correlate → validate → render → write; any inconsistency
//! between the three sources aborts the run before output is written.
//!
//! The `prefdoc` binary provides the command-line surface.

pub mod cli;
pub mod defaults;
pub mod entities;
pub mod error;
pub mod extract;
pub mod markup;
pub mod model;
pub mod output;
pub mod render;
pub mod walk;
pub mod xref;
