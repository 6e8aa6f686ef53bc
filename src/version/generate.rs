//! Repeated template expansion into version-string batches

use rand::Rng;

use crate::version::template::VersionTemplate;

/// Default number of versions generated per template.
pub const DEFAULT_GENERATE_COUNT: usize = 2;

/// Expand `template` `count` times, in order.
///
/// The caller owns the RNG, so a seeded generator produces the same batch
/// on every run.
pub fn generate_versions<R: Rng>(
    template: &VersionTemplate,
    rng: &mut R,
    count: usize,
) -> Vec<String> {
    (0..count).map(|_| template.expand(rng)).collect()
}
