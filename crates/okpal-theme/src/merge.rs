//! Lock-aware merging of regenerated values.
//!
//! Derived sets (utility roles, theme tokens) are always regenerable from a
//! palette, but anything the user locked has to come back verbatim. The
//! merge is a pure function over slices; nothing is mutated in place.

/// Combine a fresh generation with the previous one position by position.
///
/// Position `i` takes `existing[i]` when `lock_mask[i]` is set and an
/// existing value is present, and `fresh[i]` otherwise. The output always
/// has the length of `fresh`.
#[must_use]
pub fn merge_locked<T: Clone>(existing: &[T], fresh: Vec<T>, lock_mask: &[bool]) -> Vec<T> {
    fresh
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            if lock_mask.get(i).copied().unwrap_or(false) {
                existing.get(i).cloned().unwrap_or(value)
            } else {
                value
            }
        })
        .collect()
}

/// [`merge_locked`] for keyed records whose lock flag lives on the record.
///
/// Each fresh value is paired with the existing value of the same key; the
/// existing one wins when it is locked. Keys missing from `existing` take
/// the fresh value.
#[must_use]
pub fn merge_locked_by_key<T, K, F, L>(existing: &[T], fresh: Vec<T>, key: F, is_locked: L) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
    L: Fn(&T) -> bool,
{
    let aligned: Vec<Option<&T>> = fresh
        .iter()
        .map(|value| existing.iter().find(|prev| key(prev) == key(value)))
        .collect();
    let mask: Vec<bool> = aligned.iter().map(|prev| prev.is_some_and(&is_locked)).collect();
    let previous: Vec<T> = fresh
        .iter()
        .zip(&aligned)
        .map(|(value, prev)| prev.unwrap_or(value).clone())
        .collect();

    merge_locked(&previous, fresh, &mask)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn locked_positions_keep_existing() {
        let merged = merge_locked(&["a", "b", "c"], vec!["x", "y", "z"], &[false, true, false]);
        assert_eq!(merged, vec!["x", "b", "z"]);
    }

    #[test]
    fn short_mask_means_unlocked() {
        let merged = merge_locked(&[1, 2, 3], vec![7, 8, 9], &[true]);
        assert_eq!(merged, vec![1, 8, 9]);
    }

    #[test]
    fn missing_existing_falls_back_to_fresh() {
        let merged = merge_locked(&[1], vec![7, 8], &[true, true]);
        assert_eq!(merged, vec![1, 8]);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        key: &'static str,
        value: u8,
        locked: bool,
    }

    const fn entry(key: &'static str, value: u8, locked: bool) -> Entry {
        Entry { key, value, locked }
    }

    #[test]
    fn keyed_merge_matches_by_key_not_position() {
        let existing = [entry("b", 2, true), entry("a", 1, false)];
        let fresh = vec![entry("a", 10, false), entry("b", 20, false), entry("c", 30, false)];
        let merged = merge_locked_by_key(&existing, fresh, |e| e.key, |e| e.locked);
        assert_eq!(
            merged,
            vec![entry("a", 10, false), entry("b", 2, true), entry("c", 30, false)]
        );
    }

    #[test]
    fn output_length_follows_fresh() {
        let merged = merge_locked(&[1, 2, 3, 4], vec![9], &[false, true, true, true]);
        assert_eq!(merged, vec![9]);
    }
}
