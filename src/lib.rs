//! Small release automation utilities.
//!
//! Three independent tools behind one binary:
//!
//! - [`version`]: expands wildcard version templates into concrete version
//!   numbers, deduplicates and sorts them, and filters out versions older
//!   than a target.
//! - [`timesync`]: probes a remote time-sync endpoint and reports the clock
//!   offset and round-trip time.
//! - [`package`]: clones a git repository, prunes it down to one source
//!   tree, stamps a version manifest, and zips the result.
//!
//! The tools share no state; each runs to completion within a single
//! invocation.

pub mod config;
pub mod package;
pub mod timesync;
pub mod version;
