//! Observed row heights.

/// Last rendered height of each row, by position.
///
/// Entries belong to positions, not items: replacing or reordering the
/// items invalidates the whole cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightCache {
    heights: Vec<Option<f32>>,
}

impl HeightCache {
    /// An empty cache for `len` rows.
    pub fn new(len: usize) -> Self {
        Self {
            heights: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// The observed height of `row`, if it has been rendered.
    pub fn get(&self, row: usize) -> Option<f32> {
        self.heights.get(row).copied().flatten()
    }

    /// Records the height `row` rendered at. Returns true if it changed.
    pub fn record(&mut self, row: usize, height: f32) -> bool {
        match self.heights.get_mut(row) {
            Some(slot) if *slot == Some(height) => false,
            Some(slot) => {
                *slot = Some(height);
                true
            }
            None => false,
        }
    }

    /// Forgets every height and resizes to `len` rows.
    pub fn invalidate(&mut self, len: usize) {
        self.heights.clear();
        self.heights.resize(len, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_and_invalidate() {
        let mut cache = HeightCache::new(2);
        assert_eq!(cache.get(0), None);
        assert!(cache.record(0, 44.0));
        assert!(!cache.record(0, 44.0));
        assert_eq!(cache.get(0), Some(44.0));

        cache.invalidate(3);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(0), None);
    }

    #[test]
    fn test_out_of_range_rows_are_ignored() {
        let mut cache = HeightCache::new(1);
        assert!(!cache.record(5, 10.0));
        assert_eq!(cache.get(5), None);
    }

    proptest! {
        #[test]
        fn prop_cache_keeps_last_recorded_height(
            len in 0usize..20,
            writes in prop::collection::vec((0usize..25, 1u16..500), 0..40),
        ) {
            let mut cache = HeightCache::new(len);
            let mut expected: Vec<Option<f32>> = vec![None; len];

            for (row, height) in writes {
                let height = f32::from(height);
                let changed = cache.record(row, height);
                match expected.get_mut(row) {
                    Some(slot) => {
                        prop_assert_eq!(changed, *slot != Some(height));
                        *slot = Some(height);
                    }
                    None => prop_assert!(!changed),
                }
            }
            for row in 0..len + 5 {
                prop_assert_eq!(cache.get(row), expected.get(row).copied().flatten());
            }

            cache.invalidate(len);
            prop_assert!((0..len).all(|row| cache.get(row).is_none()));
        }
    }
}
