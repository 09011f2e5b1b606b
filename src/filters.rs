//! The filter set deciding which manifests count as orphaned. Exactly two
//! predicates, compiled once per run and applied to every manifest: age
//! (uploaded strictly before the cutoff) and naming (untagged, or none of
//! the tags match the pattern).

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::SweepError;
use crate::listing::ManifestSummary;

/// A pure manifest predicate. A manifest is reported only if every filter
/// in the set returns true.
pub type ManifestFilter = Box<dyn Fn(&ManifestSummary) -> bool + Send + Sync>;

/// Builds the filter set. An invalid pattern fails here, before any network
/// access.
///
/// With a non-empty pattern, a tag MATCHING the pattern disqualifies the
/// manifest; only manifests whose tags all fail to match (or that have no
/// tags at all) are reported. With an empty pattern only fully untagged
/// manifests are reported.
pub fn build_filters(
    cutoff: DateTime<Utc>,
    pattern: &str,
) -> Result<Vec<ManifestFilter>, SweepError> {
    let matcher = if pattern.is_empty() {
        None
    } else {
        Some(Regex::new(pattern)?)
    };

    let age: ManifestFilter = Box::new(move |manifest| manifest.uploaded < cutoff);

    let naming: ManifestFilter = match matcher {
        None => Box::new(|manifest| manifest.tags.is_empty()),
        Some(matcher) => {
            Box::new(move |manifest| !manifest.tags.iter().any(|tag| matcher.is_match(tag)))
        }
    };

    Ok(vec![age, naming])
}
