//! Region lookup over sorted offsets.
//!
//! A weighted pool laid out on a number line gives every item a region
//! `[offsets[i], offsets[i + 1])`; the last region is open on the right.
//! Mapping a uniform point to an item is then a search for the region that
//! contains it.
//!
//! ```text
//! [ 0.0, 1.5, 3.7, 4.9, 8.0, 11.6, 17.7 ], target 9.4
//!                        ^ region 4 = [8.0, 11.6)
//! ```

/// Find the region of `regions[lo..hi]` that contains `target`.
///
/// `regions` must be non-decreasing. The result is the index `i` with
/// `regions[i] < target <= regions[i + 1]`; a target at or before
/// `regions[lo]` yields `lo`, and a target past every boundary yields the
/// last index of the window. `hi` is clamped to `regions.len()`, and an empty
/// window (`lo >= hi`) returns `lo` (clamped into bounds).
///
/// Runs in `O(log(hi - lo))`.
///
/// # Panics
///
/// Panics if `regions` is empty.
pub fn binary_search_region(regions: &[f64], target: f64, lo: usize, hi: usize) -> usize {
    assert!(
        !regions.is_empty(),
        "binary_search_region: regions must be non-empty"
    );

    let last = regions.len() - 1;
    let mut lo = lo;
    let mut hi = hi.min(regions.len());
    if lo >= hi {
        return lo.min(last);
    }

    loop {
        if lo == hi {
            return lo;
        }

        let mid = lo + (hi - lo) / 2;
        if regions[mid] >= target {
            hi = mid;
        } else if mid == last || regions[mid + 1] >= target {
            return mid;
        } else if mid + 1 >= hi {
            // Target lies beyond the window; stay inside it.
            return hi - 1;
        } else {
            lo = mid + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGIONS: [f64; 7] = [0.0, 1.5, 3.7, 4.9, 8.0, 11.6, 17.7];

    #[test]
    fn finds_region_containing_target() {
        assert_eq!(binary_search_region(&REGIONS, 9.4, 0, REGIONS.len()), 4);
    }

    #[test]
    fn every_interior_point_maps_to_its_region() {
        for i in 0..REGIONS.len() - 1 {
            let mid = (REGIONS[i] + REGIONS[i + 1]) / 2.0;
            assert_eq!(binary_search_region(&REGIONS, mid, 0, REGIONS.len()), i);
            // Upper boundary is inclusive.
            assert_eq!(
                binary_search_region(&REGIONS, REGIONS[i + 1], 0, REGIONS.len()),
                i
            );
        }
    }

    #[test]
    fn target_at_or_below_start_returns_lo() {
        assert_eq!(binary_search_region(&REGIONS, 0.0, 0, REGIONS.len()), 0);
        assert_eq!(binary_search_region(&REGIONS, -3.0, 0, REGIONS.len()), 0);
    }

    #[test]
    fn target_past_every_boundary_clamps_to_last() {
        assert_eq!(binary_search_region(&REGIONS, 100.0, 0, REGIONS.len()), 6);
        assert_eq!(binary_search_region(&REGIONS, 100.0, 0, 99), 6);
    }

    #[test]
    fn target_past_a_narrow_window_stays_inside_it() {
        assert_eq!(binary_search_region(&REGIONS, 100.0, 1, 4), 3);
    }

    #[test]
    fn zero_width_window_returns_lo() {
        assert_eq!(binary_search_region(&REGIONS, 9.4, 3, 3), 3);
        assert_eq!(binary_search_region(&REGIONS, 9.4, 40, 40), 6);
    }

    #[test]
    fn zero_width_regions_are_skipped() {
        let offsets = [0.0, 0.0, 0.0, 2.0];
        assert_eq!(binary_search_region(&offsets, 0.5, 0, offsets.len()), 2);
        assert_eq!(binary_search_region(&offsets, 2.5, 0, offsets.len()), 3);
    }

    #[test]
    fn single_region() {
        assert_eq!(binary_search_region(&[0.0], 5.0, 0, 1), 0);
    }

    #[test]
    #[should_panic(expected = "regions must be non-empty")]
    fn empty_regions_panic() {
        binary_search_region(&[], 1.0, 0, 0);
    }
}
