//! Value-semantics comparisons used by the answer rules.

use std::collections::{BTreeMap, BTreeSet};

/// Set equality: order is irrelevant and duplicates collapse.
pub fn same_set<S: AsRef<str>>(submitted: &[S], answer: &BTreeSet<String>) -> bool {
    let submitted: BTreeSet<&str> = submitted.iter().map(AsRef::as_ref).collect();
    submitted.len() == answer.len() && answer.iter().all(|a| submitted.contains(a.as_str()))
}

/// Element-wise, order-sensitive equality.
pub fn same_sequence<S: AsRef<str>>(submitted: &[S], answer: &[String]) -> bool {
    submitted.len() == answer.len()
        && submitted
            .iter()
            .zip(answer)
            .all(|(s, a)| s.as_ref() == a.as_str())
}

/// Key-set equality plus per-key value equality.
pub fn same_mapping(submitted: &BTreeMap<String, String>, answer: &BTreeMap<String, String>) -> bool {
    submitted.len() == answer.len()
        && answer
            .iter()
            .all(|(key, value)| submitted.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sets_ignore_order_and_duplicates() {
        let answer = set(&["a", "b"]);
        assert!(same_set(&["b", "a"], &answer));
        assert!(same_set(&["a", "b", "a"], &answer));
        assert!(!same_set(&["a"], &answer));
        assert!(!same_set(&["a", "b", "c"], &answer));
        assert!(!same_set::<&str>(&[], &answer));
    }

    #[test]
    fn sequences_respect_order() {
        let answer = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert!(same_sequence(&["x", "y", "z"], &answer));
        assert!(!same_sequence(&["y", "x", "z"], &answer));
        assert!(!same_sequence(&["x", "y"], &answer));
    }

    #[test]
    fn mappings_compare_key_for_key() {
        let answer = map(&[("cat", "mammal"), ("eagle", "bird")]);
        assert!(same_mapping(&map(&[("eagle", "bird"), ("cat", "mammal")]), &answer));
        assert!(!same_mapping(&map(&[("cat", "mammal")]), &answer));
        assert!(!same_mapping(
            &map(&[("cat", "mammal"), ("eagle", "bird"), ("cod", "fish")]),
            &answer
        ));
        assert!(!same_mapping(&map(&[("cat", "mammal"), ("owl", "bird")]), &answer));
    }
}
