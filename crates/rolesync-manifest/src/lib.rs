//! Requirements manifest model and loader for rolesync
//!
//! A requirements document is a YAML file in one of two shapes: a bare
//! sequence of entries, or a map with a single `roles` key holding that
//! sequence. Entries are identified by their derived name; within any merged
//! set names are unique.

pub mod document;
pub mod entry;
pub mod error;

pub use document::{dedup, installable_len, load, merge, persist, sort_by_name};
pub use entry::Entry;
pub use error::{Error, Result};
