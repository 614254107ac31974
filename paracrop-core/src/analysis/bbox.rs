use glam::UVec2;
use imageproc::point::Point;
use serde::Serialize;

/// An axis-aligned bounding box in page pixel coordinates.
///
/// `min` is inclusive and `max` is exclusive, so `max - min` is the box
/// size in pixels. Boxes are produced from the boundary points of
/// connected foreground components and used to cut matching crops from
/// the page raster and its binary mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bbox {
    /// Top-left corner (inclusive).
    pub min: UVec2,
    /// Bottom-right corner (exclusive).
    pub max: UVec2,
}

impl Bbox {
    /// Creates a new bounding box from corner points.
    pub fn new(min: UVec2, max: UVec2) -> Self {
        Self { min, max }
    }

    /// Computes the tight bounding box of a set of boundary points.
    ///
    /// The maximum corner is exclusive, so a single point yields a 1x1
    /// box. Returns `None` for an empty point set.
    ///
    /// # Example
    /// ```
    /// use imageproc::point::Point;
    /// use paracrop_core::analysis::bbox::Bbox;
    /// let points = [Point::new(2u32, 3), Point::new(5, 4)];
    /// let bbox = Bbox::from_points(&points).unwrap();
    /// assert_eq!(bbox.width(), 4);
    /// assert_eq!(bbox.height(), 2);
    /// ```
    pub fn from_points(points: &[Point<u32>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = UVec2::new(first.x, first.y);
        let mut max = min;

        for point in &points[1..] {
            min = min.min(UVec2::new(point.x, point.y));
            max = max.max(UVec2::new(point.x, point.y));
        }

        Some(Self::new(min, max + UVec2::ONE))
    }

    /// Box width in pixels.
    pub fn width(&self) -> u32 {
        self.max.x.saturating_sub(self.min.x)
    }

    /// Box height in pixels.
    pub fn height(&self) -> u32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Box area in pixels.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Clamps the box so it does not extend beyond `bounds`
    /// (typically the page dimensions).
    pub fn clamp(&self, bounds: UVec2) -> Self {
        Self {
            min: self.min.min(bounds),
            max: self.max.min(bounds),
        }
    }

    /// Checks whether the box covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }
}
