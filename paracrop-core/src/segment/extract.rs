use glam::UVec2;
use image::{DynamicImage, GrayImage, imageops};
use imageproc::contours::{BorderType, find_contours};
use tracing::debug;

use crate::analysis::bbox::Bbox;
use crate::layout::region::Region;

/// Extracts candidate paragraph regions from a page.
///
/// Bounding boxes come from the outer, non-nested contours of the
/// dilated mask, where nearby text fragments have already merged into
/// single components. The crops are then cut from the raw page and
/// from the pre-dilation mask at the same box: dilation exists only to
/// merge fragments, and letting it bleed into the classification crop
/// would manufacture the long foreground runs the classifier rejects.
///
/// An empty mask yields an empty vector. The output order is whatever
/// the contour detector produced; callers impose their own order.
pub fn extract_regions(
    page: &DynamicImage,
    raw_mask: &GrayImage,
    dilated_mask: &GrayImage,
) -> Vec<Region> {
    let bounds = UVec2::new(page.width(), page.height());
    let contours = find_contours::<u32>(dilated_mask);
    debug!("found {} contours", contours.len());

    let mut regions = Vec::new();
    for contour in &contours {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }
        let Some(bbox) = Bbox::from_points(&contour.points) else {
            continue;
        };
        let bbox = bbox.clamp(bounds);
        if bbox.is_empty() {
            continue;
        }

        let crop = page.crop_imm(bbox.min.x, bbox.min.y, bbox.width(), bbox.height());
        let mask = imageops::crop_imm(raw_mask, bbox.min.x, bbox.min.y, bbox.width(), bbox.height())
            .to_image();
        regions.push(Region { bbox, crop, mask });
    }

    regions
}
