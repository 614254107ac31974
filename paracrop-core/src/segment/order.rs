use crate::layout::region::Region;

/// Sorts regions into reading order.
///
/// Ascending by origin x, then origin y. Grouping by horizontal
/// position first approximates column-major reading for multi-column
/// layouts; within a column, regions run top to bottom. The sort is
/// stable, so regions sharing an origin keep their extraction order.
/// This key is the only ordering guarantee in the pipeline — the
/// contour detector's output order is unspecified and must not be
/// relied on.
pub fn sort_reading_order(regions: &mut [Region]) {
    regions.sort_by_key(|region| (region.bbox.min.x, region.bbox.min.y));
}
