//! Logical operators on ordered match sets
//!
//! A match set is keyed by identity (observation id or subject id) and keeps
//! first-seen order.

use indexmap::IndexMap;

/// Ordered set of matches keyed by identity
pub type MatchSet<T> = IndexMap<String, T>;

/// AND: entries of `left` whose key is also in `right`, in `left`'s order
pub fn intersect<T>(mut left: MatchSet<T>, right: &MatchSet<T>) -> MatchSet<T> {
    left.retain(|key, _| right.contains_key(key));
    left
}

/// OR: `left` followed by the entries of `right` not already present
pub fn union<T>(mut left: MatchSet<T>, right: MatchSet<T>) -> MatchSet<T> {
    for (key, value) in right {
        left.entry(key).or_insert(value);
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> MatchSet<()> {
        keys.iter().map(|k| (k.to_string(), ())).collect()
    }

    fn keys(set: &MatchSet<()>) -> Vec<&str> {
        set.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_intersect_keeps_left_order() {
        let result = intersect(set(&["obs3", "obs2", "obs1"]), &set(&["obs1", "obs3"]));
        assert_eq!(keys(&result), ["obs3", "obs1"]);
    }

    #[test]
    fn test_union_appends_new_keys() {
        let result = union(set(&["obs1", "obs2"]), set(&["obs2", "obs3"]));
        assert_eq!(keys(&result), ["obs1", "obs2", "obs3"]);
    }
}
