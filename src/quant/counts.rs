use ahash::AHashMap;

/// Mapped read counts per molecule ID for a single sample
///
/// Built incrementally by the SAM loader and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleCounts {
    counts: AHashMap<String, u64>,
}

impl SampleCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more read against `molecule_id`
    pub(crate) fn increment(&mut self, molecule_id: &str) {
        // Avoid allocating a key for molecules already seen
        if let Some(count) = self.counts.get_mut(molecule_id) {
            *count += 1;
        } else {
            self.counts.insert(molecule_id.to_string(), 1);
        }
    }

    /// Read count for a molecule, 0 if it never appeared in this sample
    pub fn get(&self, molecule_id: &str) -> u64 {
        self.counts.get(molecule_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, molecule_id: &str) -> bool {
        self.counts.contains_key(molecule_id)
    }

    /// Number of distinct molecules
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of reads counted across all molecules
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn molecule_ids(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for SampleCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = AHashMap::new();
        for (id, count) in iter {
            *counts.entry(id.into()).or_insert(0) += count;
        }
        SampleCounts { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_lookup() {
        let mut counts = SampleCounts::new();
        counts.increment("GENE1");
        counts.increment("GENE2");
        counts.increment("GENE1");

        assert_eq!(counts.get("GENE1"), 2);
        assert_eq!(counts.get("GENE2"), 1);
        assert_eq!(counts.get("GENE3"), 0);
        assert!(!counts.contains("GENE3"));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_from_iterator_merges_duplicate_ids() {
        let counts: SampleCounts = vec![("a", 2), ("b", 1), ("a", 3)].into_iter().collect();
        assert_eq!(counts.get("a"), 5);
        assert_eq!(counts.get("b"), 1);

        let mut ids: Vec<&str> = counts.molecule_ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
