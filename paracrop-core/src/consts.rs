/// Pixel value marking foreground (ink) in a binary mask.
///
/// Binarization inverts the page so that dark ink becomes white (255)
/// and paper becomes black (0). Every downstream stage — dilation,
/// contour detection, run counting — treats exactly this value as
/// foreground.
pub const FOREGROUND: u8 = 255;

/// Default side length of the Gaussian blur kernel applied before
/// thresholding.
///
/// Blurring suppresses scanner noise so that Otsu's method picks a
/// stable threshold. Must be odd.
pub const DEFAULT_BLUR_KERNEL: u32 = 7;

/// Default side length of the square structuring element used for
/// dilation.
///
/// Dilation grows ink blobs until the words of a paragraph merge into
/// one connected component, so that a single bounding box covers the
/// whole paragraph. Must be odd.
pub const DEFAULT_DILATE_KERNEL: u32 = 9;

/// Default number of dilation passes.
///
/// More passes merge lines that sit further apart, at the cost of
/// occasionally gluing adjacent paragraphs together.
pub const DEFAULT_DILATE_ITERATIONS: u32 = 5;

/// Default run-length threshold for the table/figure classifier.
///
/// A region whose binary mask contains a run of at least this many
/// consecutive foreground pixels (in row-major scan order) is rejected
/// as non-text: long unbroken runs are characteristic of table
/// gridlines and solid graphic fills, while natural text breaks up into
/// much shorter segments. The value is resolution dependent — 40 suits
/// pages scanned at roughly 300 dpi.
pub const DEFAULT_RUN_THRESHOLD: u32 = 40;
