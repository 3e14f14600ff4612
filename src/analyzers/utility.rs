use std::collections::BTreeMap;

/// Counts occurrences of each value. Keys come back in ascending order.
pub fn count_values<K: Ord>(values: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Picks the entry with the highest count. Ties go to the smallest key.
/// Returns `None` for empty input.
pub fn top_count<K: Ord>(counts: BTreeMap<K, usize>) -> Option<(K, usize)> {
    counts
        .into_iter()
        .fold(None, |best, (key, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
}

/// Orders counts by descending count, then ascending key.
pub fn ranked<K: Ord>(counts: BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    // stable sort keeps the ascending key order among equal counts
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_values() {
        let counts = count_values(["b", "a", "b", "c", "b"]);
        assert_eq!(counts.get("b"), Some(&3));
        assert_eq!(counts.get("a"), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_top_count_strict_winner() {
        assert_eq!(top_count(count_values([3, 1, 3, 2])), Some((3, 2)));
    }

    #[test]
    fn test_top_count_tie_takes_smallest_key() {
        assert_eq!(top_count(count_values([9, 4, 9, 4, 7])), Some((4, 2)));
        assert_eq!(
            top_count(count_values(["Zebra", "Apple", "Zebra", "Apple"])),
            Some(("Apple", 2))
        );
    }

    #[test]
    fn test_top_count_empty() {
        assert_eq!(top_count(count_values(Vec::<u32>::new())), None);
    }

    #[test]
    fn test_ranked_order() {
        let ranked = ranked(count_values(["c", "a", "b", "b", "c", "d", "d", "d"]));
        assert_eq!(ranked, vec![("d", 3), ("b", 2), ("c", 2), ("a", 1)]);
    }
}
