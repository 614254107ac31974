use image::GrayImage;

use crate::consts::FOREGROUND;

/// Decides whether a region's binary mask crop looks like text.
///
/// The crop is scanned as a flattened row-major pixel stream (row by
/// row, left to right) while counting consecutive foreground pixels.
/// The counter resets on any background pixel but not at row
/// boundaries, so a run may continue from the right edge of one row
/// onto the left edge of the next. If the counter ever reaches
/// `run_threshold` the region is rejected as non-text and scanning
/// stops immediately.
///
/// Long unbroken runs are characteristic of table gridlines and solid
/// graphic fills; natural text, even after heavy dilation elsewhere in
/// the pipeline, breaks into segments well below typical thresholds.
pub fn is_text(mask: &GrayImage, run_threshold: u32) -> bool {
    scan(mask, run_threshold).0
}

/// Run scan returning the verdict and the number of pixels examined.
///
/// Split out from [`is_text`] so the short-circuit behavior stays
/// observable in tests.
pub(crate) fn scan(mask: &GrayImage, run_threshold: u32) -> (bool, usize) {
    let mut run = 0u32;
    for (examined, pixel) in mask.pixels().enumerate() {
        if pixel.0[0] == FOREGROUND {
            run += 1;
            if run >= run_threshold {
                return (false, examined + 1);
            }
        } else {
            run = 0;
        }
    }
    (true, (mask.width() * mask.height()) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const T: u32 = 40;

    fn mask_from_fn(w: u32, h: u32, f: impl Fn(u32, u32) -> bool) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([if f(x, y) { FOREGROUND } else { 0 }]))
    }

    #[test]
    fn test_all_background_is_text() {
        let mask = mask_from_fn(60, 60, |_, _| false);
        assert!(is_text(&mask, T));
    }

    #[test]
    fn test_long_horizontal_run_is_non_text() {
        // One row of 50 consecutive foreground pixels, like a gridline
        let mask = mask_from_fn(60, 10, |x, y| y == 4 && (5..55).contains(&x));
        assert!(!is_text(&mask, T));
    }

    #[test]
    fn test_runs_just_below_threshold_are_text() {
        // Runs of 39 separated by single background columns, filling
        // the whole crop
        let mask = mask_from_fn(80, 20, |x, _| x % 40 != 39);
        assert!(is_text(&mask, T));
    }

    #[test]
    fn test_thin_vertical_line_is_text() {
        // A 1-px-wide vertical line in a wider crop: each row
        // contributes one foreground pixel followed by background, so
        // the counter never builds up
        let mask = mask_from_fn(5, 60, |x, _| x == 2);
        assert!(is_text(&mask, T));
    }

    #[test]
    fn test_run_spans_row_boundary() {
        // Foreground reaching the right edge of row 3 and continuing
        // from the left edge of row 4: 25 + 25 = 50 in the flattened
        // stream, which crosses the threshold even though neither row
        // holds 40 on its own
        let mask = mask_from_fn(25, 10, |_, y| y == 3 || y == 4);
        assert!(!is_text(&mask, T));
    }

    #[test]
    fn test_scan_short_circuits() {
        // Threshold reached 40 pixels into the first row of a large
        // crop; the rest must not be examined
        let mask = mask_from_fn(100, 100, |_, _| true);
        let (verdict, examined) = scan(&mask, T);
        assert!(!verdict);
        assert_eq!(examined, 40);

        // A clean crop is examined in full
        let clean = mask_from_fn(30, 30, |_, _| false);
        let (verdict, examined) = scan(&clean, T);
        assert!(verdict);
        assert_eq!(examined, 900);
    }

    #[test]
    fn test_reset_on_background_pixel() {
        // 39 foreground, one background, 39 foreground in the same row
        let mask = mask_from_fn(79, 1, |x, _| x != 39);
        assert!(is_text(&mask, T));

        // Removing the gap turns it into a run of 79
        let solid = mask_from_fn(79, 1, |_, _| true);
        assert!(!is_text(&solid, T));
    }
}
