//! Structural duplicate detection.

use std::collections::BTreeMap;

use serde::Serialize;

use super::range::PortFinding;

/// A numeric port value held by more than one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// The shared port value.
    pub value: u64,
    /// Keys holding it, in configuration order.
    pub keys: Vec<String>,
}

impl std::fmt::Display for DuplicateGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is used by {}", self.value, self.keys.join(", "))
    }
}

/// Group candidates by numeric value and keep groups with more than one key.
///
/// Pure and deterministic: groups come back ordered by port value. Values
/// compare by their digits without leading zeros, so `015001` and `15001`
/// collide while two different numbers beyond `u64` do not.
///
/// # Examples
///
/// ```
/// use portband::validation::{find_duplicates, PortFinding};
///
/// let groups = find_duplicates(&[
///     PortFinding::new("arangodb", 15001),
///     PortFinding::new("qdrant_http", 15001),
///     PortFinding::new("qdrant_grpc", 15002),
/// ]);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].keys, vec!["arangodb", "qdrant_http"]);
/// ```
#[must_use]
pub fn find_duplicates(candidates: &[PortFinding]) -> Vec<DuplicateGroup> {
    let mut by_value: BTreeMap<(u64, &str), Vec<String>> = BTreeMap::new();
    for finding in candidates {
        let keys = by_value
            .entry((finding.value, finding.literal()))
            .or_default();
        if !keys.contains(&finding.key) {
            keys.push(finding.key.clone());
        }
    }

    by_value
        .into_iter()
        .filter(|(_, keys)| keys.len() > 1)
        .map(|((value, _), keys)| DuplicateGroup { value, keys })
        .collect()
}
