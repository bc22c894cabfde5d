//! Checkflow - a checklist graph editor core.
//!
//! Nodes are checklist items connected by directed dependency edges. A node
//! stays locked (disabled) while any of its ancestors is unchecked. This crate
//! provides the graph store, the disablement engine, the presentation view
//! handed to a renderer, the JSON snapshot codec, and a CLI front end.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod editor;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod view;

// Application context and CLI (needed by binary)
pub mod app;
pub mod cli;
pub mod commands;
pub mod output;
