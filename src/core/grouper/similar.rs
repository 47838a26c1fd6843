//! Distance-threshold clustering.

use super::DuplicateGroup;
use crate::core::hasher::PerceptualHash;
use std::path::PathBuf;

/// Default maximum Hamming distance for two images to be considered similar.
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 5;

/// Cluster paths by Hamming distance to a seed, single greedy pass.
///
/// Paths are processed in input (discovery) order. Each unassigned path
/// opens a new group and sweeps all later unassigned paths once, pulling
/// in those within `threshold` of the *seed's* hash. Groups with 2+
/// members are emitted; lone seeds are discarded.
///
/// This produces star-shaped clusters around the first-seen member, not
/// transitive equivalence classes: two members can be farther than the
/// threshold from each other as long as both are close to the seed, and
/// a path assigned to an earlier group is never reconsidered for a later
/// one. Intentional - see `seed_linkage_is_one_hop_not_transitive` below.
pub fn cluster_by_distance(
    entries: Vec<(PathBuf, PerceptualHash)>,
    threshold: u32,
) -> Vec<DuplicateGroup> {
    let mut assigned = vec![false; entries.len()];
    let mut groups = Vec::new();

    for i in 0..entries.len() {
        if assigned[i] {
            continue;
        }

        let (seed_path, seed_hash) = &entries[i];
        let mut members = vec![seed_path.clone()];
        assigned[i] = true;

        for j in (i + 1)..entries.len() {
            if assigned[j] {
                continue;
            }

            let (path, hash) = &entries[j];
            if seed_hash.distance(hash) <= threshold {
                members.push(path.clone());
                assigned[j] = true;
            }
        }

        if members.len() >= 2 {
            groups.push(DuplicateGroup::new(members));
        }
    }

    groups
}
