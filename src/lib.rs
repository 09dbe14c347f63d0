//! # Veer Core Library
//!
//! This crate contains the core logic of `veer` – a user-level alternatives
//! switcher. It registers multiple versions ("tags") of a logical command
//! under one name and atomically points a single launch entry in the user's
//! personal binary directory at exactly one tagged variant.
//!
//! A tag can wrap a file on disk (optionally copied into managed storage) or
//! a shell command, which is materialized as a small wrapper script. The
//! whole registry lives in one TOML document; every command is a single
//! load → mutate → save cycle, with atomic rename discipline on both the
//! registry file and the installed launch entries.
//!
//! This library backs the `veer` CLI, but the operations are plain functions
//! over explicit [`registry::Registry`] and [`paths::Layout`] values, so it
//! can be reused (and tested) without touching the real home directory.
//!
//! ## Modules Overview
//! - [`registry`] – The persisted application → tag → entry mapping
//! - [`entry`] – Path and command entry variants and target resolution
//! - [`tag`] – Content fingerprints and derived tags
//! - [`switch`] – Tracking, switching and the atomic install primitive
//! - [`query`] – Read-only listing projection
//! - [`paths`] – Per-user filesystem layout (config, storage, bin dir)
//! - [`util`] – Natural ordering for version-like tags
//! - [`error`] – Every error the core can return

pub mod entry;
pub mod error;
pub mod paths;
pub mod query;
pub mod registry;
pub mod switch;
pub mod tag;
pub mod util;

pub use entry::*;
pub use error::*;
pub use paths::*;
pub use query::*;
pub use registry::*;
pub use switch::*;
pub use tag::*;
pub use util::*;
