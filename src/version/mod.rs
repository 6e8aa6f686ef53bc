//! Version generation, normalization, and filtering
//!
//! This module implements the version pipeline: wildcard templates from the
//! config are expanded into concrete version strings, parsed, deduplicated,
//! sorted, and compared against a target version.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Template   │────▶│  Normalize  │────▶│   Filter    │
//! │  (expand)   │     │ (dedup/sort)│     │ (< target)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`template`]: wildcard template parsing and expansion
//! - [`generate`]: repeated expansion into version-string batches
//! - [`semver`]: shared version parsing with partial-version padding
//! - [`pipeline`]: the generate → normalize → filter → report flow
//! - [`error`]: error types for version parsing

pub mod error;
pub mod generate;
pub mod pipeline;
pub mod semver;
pub mod template;
