//! Contiguous vertex-range partitioning for worker pools.

use std::ops::Range;

/// Splits `[0, num_vertices)` into exactly `parts` disjoint contiguous
/// ranges whose union is the whole vertex space.
///
/// Each range holds `ceil(V / parts)` vertices, with the final ranges
/// clipped; when `parts > V` the excess ranges are empty, so surplus workers
/// terminate immediately without error.
///
/// # Panics
///
/// Panics if `parts` is zero.
pub(crate) fn vertex_ranges(num_vertices: u32, parts: usize) -> Vec<Range<u32>> {
    assert!(parts != 0, "parts must be > 0");
    let total = u64::from(num_vertices);
    let parts_wide = parts as u64;
    let per_part = ((total + parts_wide - 1) / parts_wide).max(1);
    (0..parts_wide)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let start = (i * per_part).min(total) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let end = ((i + 1) * per_part).min(total) as u32;
            start..end
        })
        .collect()
}
