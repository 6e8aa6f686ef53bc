//! The generate → normalize → filter → report flow

use std::io::{self, Write};

use rand::Rng;
use semver::Version;
use tracing::{error, warn};

use crate::config::TemplateConfig;
use crate::version::generate::generate_versions;
use crate::version::semver::parse_version;

/// Expand every template in the config, `count` versions per template.
///
/// Output order is config order, then generation order within a template.
pub fn generate_all<R: Rng>(config: &TemplateConfig, rng: &mut R, count: usize) -> Vec<String> {
    let mut versions = Vec::with_capacity(config.len() * count);
    for (_, template) in config.iter() {
        versions.extend(generate_versions(template, rng, count));
    }
    versions
}

/// Parse, deduplicate, and sort generated version strings.
///
/// Unparseable entries are skipped with a warning. Equality is semver value
/// equality after partial-version padding, so `"1.2"` and `"1.2.0"` count
/// as duplicates. The result is strictly increasing.
pub fn normalize_versions(raw: &[String]) -> Vec<Version> {
    let mut unique: Vec<Version> = Vec::new();
    for candidate in raw {
        match parse_version(candidate) {
            Ok(version) => {
                if !unique.contains(&version) {
                    unique.push(version);
                }
            }
            Err(err) => warn!("skipping generated version: {err}"),
        }
    }
    unique.sort();
    unique
}

/// Keep the versions that are strictly older than `target`.
///
/// Input order is preserved. An unparseable target yields an empty result;
/// unparseable candidates are skipped with a warning.
pub fn filter_older(versions: &[String], target: &str) -> Vec<String> {
    let target_version = match parse_version(target) {
        Ok(version) => version,
        Err(err) => {
            error!("cannot filter against target: {err}");
            return Vec::new();
        }
    };

    versions
        .iter()
        .filter(|candidate| match parse_version(candidate) {
            Ok(version) => version < target_version,
            Err(err) => {
                warn!("skipping candidate version: {err}");
                false
            }
        })
        .cloned()
        .collect()
}

/// Run the whole pipeline and write the two report sections to `out`.
pub fn run<R: Rng, W: Write>(
    config: &TemplateConfig,
    target: &str,
    count: usize,
    rng: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let generated = generate_all(config, rng, count);
    let sorted: Vec<String> = normalize_versions(&generated)
        .iter()
        .map(Version::to_string)
        .collect();

    writeln!(out, "All generated and sorted version numbers:")?;
    for version in &sorted {
        writeln!(out, "{version}")?;
    }

    let older = filter_older(&sorted, target);
    writeln!(out)?;
    writeln!(out, "Versions older than {target}:")?;
    for version in &older {
        writeln!(out, "{version}")?;
    }

    Ok(())
}
