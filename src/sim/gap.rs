//! Gap placement for obstacle rows

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::RowTuning;

/// Contiguous band of slots `[hole, hole + span)` left empty in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub hole: u32,
    pub span: u32,
}

impl Gap {
    pub fn new(hole: u32, span: u32) -> Self {
        Self { hole, span }
    }

    /// True if slot `index` is part of the gap
    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index
            .checked_sub(self.hole)
            .is_some_and(|offset| offset < self.span)
    }

    /// Excluded slots that actually fall inside a row of `capacity`.
    /// Less than `span` only when the hole range lets the gap overhang.
    pub fn excluded_within(&self, capacity: u32) -> u32 {
        capacity.saturating_sub(self.hole).min(self.span)
    }
}

/// Draw this row's gap from the tuning's hole policy
pub fn draw_gap<R: Rng + ?Sized>(rng: &mut R, rows: &RowTuning) -> Gap {
    let (min, max) = rows.hole_range();
    let hole = rng.random_range(min..=max.max(min));
    Gap::new(hole, rows.gap_span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{GapPolicy, Tuning};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_contains_band() {
        let gap = Gap::new(3, 2);
        let excluded: Vec<u32> = (0..10).filter(|&i| gap.contains(i)).collect();
        assert_eq!(excluded, vec![3, 4]);
        assert_eq!(gap.excluded_within(10), 2);
    }

    #[test]
    fn test_contains_near_u32_max() {
        let gap = Gap::new(u32::MAX - 1, 5);
        assert!(!gap.contains(0));
        assert!(gap.contains(u32::MAX - 1));
        assert!(gap.contains(u32::MAX));
        assert_eq!(gap.excluded_within(10), 0);
    }

    #[test]
    fn test_overhanging_gap_is_truncated() {
        // Classic hole 5 with a 2-slot gap in a 6-slot row
        let gap = Gap::new(5, 2);
        assert_eq!(gap.excluded_within(6), 1);
        assert_eq!(Gap::new(7, 2).excluded_within(6), 0);
    }

    #[test]
    fn test_classic_holes_cover_one_to_five() {
        let rows = Tuning::classic().rows;
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let gap = draw_gap(&mut rng, &rows);
            assert!((1..=5).contains(&gap.hole));
            seen[gap.hole as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
        assert!(!seen[0]);
    }

    proptest! {
        #[test]
        fn prop_scaled_gap_is_contiguous_and_full(
            seed in any::<u64>(),
            capacity in 5u32..40,
            span in 1u32..4,
        ) {
            let mut rows = Tuning::classic().rows;
            rows.row_capacity = capacity;
            rows.gap_span = span;
            rows.gap_policy = GapPolicy::Scaled;
            prop_assume!(span + 2 < capacity);

            let mut rng = Pcg32::seed_from_u64(seed);
            let gap = draw_gap(&mut rng, &rows);
            let excluded: Vec<u32> = (0..capacity).filter(|&i| gap.contains(i)).collect();

            prop_assert_eq!(excluded.len() as u32, span);
            prop_assert!(excluded.windows(2).all(|w| w[1] == w[0] + 1));
            prop_assert!(gap.hole >= 1);
        }
    }
}
