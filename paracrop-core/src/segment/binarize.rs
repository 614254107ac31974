use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::dilate;

/// Converts a page to an inverted binary mask.
///
/// Grayscale, Gaussian blur, then an Otsu threshold with inverted
/// output so ink becomes foreground (255) and paper background (0).
/// `blur_kernel` is the odd side length of the blur kernel; the sigma
/// is derived from it the same way OpenCV does for a zero sigma.
pub fn binarize(page: &DynamicImage, blur_kernel: u32) -> GrayImage {
    let gray = page.to_luma8();
    let blurred = gaussian_blur_f32(&gray, blur_sigma(blur_kernel));
    let level = otsu_level(&blurred);
    threshold(&blurred, level, ThresholdType::BinaryInverted)
}

/// Grows foreground blobs so nearby text fragments merge into single
/// connected components.
///
/// `kernel` is the odd side length of the square structuring element;
/// each iteration dilates by its radius under the L-infinity norm.
/// The result is only used for bounding-box extraction, never for
/// classification.
pub fn dilate_mask(mask: &GrayImage, kernel: u32, iterations: u32) -> GrayImage {
    let radius = (kernel / 2) as u8;
    let mut dilated = mask.clone();
    for _ in 0..iterations {
        dilated = dilate(&dilated, Norm::LInf, radius);
    }
    dilated
}

// OpenCV's sigma-from-kernel rule for GaussianBlur(ksize, 0).
pub(crate) fn blur_sigma(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
