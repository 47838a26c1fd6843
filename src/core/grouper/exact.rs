//! Equality-based bucketing.

use super::DuplicateGroup;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;

/// Bucket paths by equal key and keep buckets with 2+ members.
///
/// Groups come out in first-seen key order and members stay in input
/// order, so discovery-order determinism carries through. Works for any
/// hashable key: content digests for byte-identity, or perceptual hashes
/// for the stricter "identical fingerprint" mode (which deliberately
/// misses hashes that differ by even one bit).
pub fn group_by_key<K>(entries: Vec<(PathBuf, K)>) -> Vec<DuplicateGroup>
where
    K: Eq + Hash,
{
    // Insertion-ordered buckets: the map only remembers each key's slot
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<Vec<PathBuf>> = Vec::new();

    for (path, key) in entries {
        let slot = *slots.entry(key).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(path);
    }

    buckets
        .into_iter()
        .filter(|bucket| bucket.len() >= 2)
        .map(DuplicateGroup::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, key: u32) -> (PathBuf, u32) {
        (PathBuf::from(path), key)
    }

    #[test]
    fn empty_input_returns_no_groups() {
        let groups = group_by_key(Vec::<(PathBuf, u32)>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn singletons_are_discarded() {
        let groups = group_by_key(vec![entry("/a.jpg", 1), entry("/b.jpg", 2)]);
        assert!(groups.is_empty());
    }

    #[test]
    fn equal_keys_are_grouped() {
        let groups = group_by_key(vec![
            entry("/a.jpg", 1),
            entry("/b.jpg", 1),
            entry("/c.jpg", 2),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].files,
            vec![PathBuf::from("/a.jpg"), PathBuf::from("/b.jpg")]
        );
    }

    #[test]
    fn groups_follow_first_seen_key_order() {
        let groups = group_by_key(vec![
            entry("/a.jpg", 7),
            entry("/b.jpg", 3),
            entry("/c.jpg", 3),
            entry("/d.jpg", 7),
            entry("/e.jpg", 7),
        ]);

        // Key 7 was seen first, so its group comes first
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].files.len(), 3);
        assert_eq!(groups[0].representative(), &PathBuf::from("/a.jpg"));
        assert_eq!(groups[1].files.len(), 2);
        assert_eq!(groups[1].representative(), &PathBuf::from("/b.jpg"));
    }

    #[test]
    fn members_keep_input_order() {
        let groups = group_by_key(vec![
            entry("/z.jpg", 1),
            entry("/m.jpg", 1),
            entry("/a.jpg", 1),
        ]);

        assert_eq!(
            groups[0].files,
            vec![
                PathBuf::from("/z.jpg"),
                PathBuf::from("/m.jpg"),
                PathBuf::from("/a.jpg")
            ]
        );
    }
}
