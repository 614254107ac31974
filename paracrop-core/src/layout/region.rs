use image::{DynamicImage, GrayImage};

use crate::analysis::bbox::Bbox;

/// A candidate paragraph cut out of a page.
///
/// `crop` holds the raw page pixels inside `bbox` and is what gets
/// written to disk if the region survives classification. `mask` is the
/// matching cut from the pre-dilation binary mask and is what the
/// classifier inspects; both crops always have the same dimensions.
pub struct Region {
    pub bbox: Bbox,
    pub crop: DynamicImage,
    pub mask: GrayImage,
}
