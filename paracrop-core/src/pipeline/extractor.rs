use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use snafu::{ResultExt, ensure};
use tracing::{error, info};

use crate::consts::{
    DEFAULT_BLUR_KERNEL, DEFAULT_DILATE_ITERATIONS, DEFAULT_DILATE_KERNEL, DEFAULT_RUN_THRESHOLD,
};
use crate::error::{
    ConfigSnafu, CreateDirSnafu, ImageReadSnafu, ImageWriteSnafu, ParacropError, PatternSnafu,
    WalkSnafu,
};
use crate::segment::binarize::{binarize, dilate_mask};
use crate::segment::classify::is_text;
use crate::segment::extract::extract_regions;
use crate::segment::order::sort_reading_order;

/// Tunable knobs for the page pipeline.
///
/// Kernel sizes are side lengths of square kernels and must be odd;
/// the run threshold is resolution dependent (see [`crate::consts`]).
#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    pub blur_kernel: u32,
    pub dilate_kernel: u32,
    pub dilate_iterations: u32,
    pub run_threshold: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            blur_kernel: DEFAULT_BLUR_KERNEL,
            dilate_kernel: DEFAULT_DILATE_KERNEL,
            dilate_iterations: DEFAULT_DILATE_ITERATIONS,
            run_threshold: DEFAULT_RUN_THRESHOLD,
        }
    }
}

/// Outcome of one successfully processed page.
#[derive(Clone, Debug, Serialize)]
pub struct PageReport {
    /// Page identifier, the input file stem.
    pub page: String,
    /// Candidate regions found before classification.
    pub candidates: usize,
    /// Regions classified as text and written to disk.
    pub survivors: usize,
}

/// A page that failed to process; the rest of the batch continues.
#[derive(Clone, Debug, Serialize)]
pub struct PageFailure {
    pub page: String,
    pub error: String,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub pages: Vec<PageReport>,
    pub failures: Vec<PageFailure>,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-page paragraph extraction pipeline.
///
/// Holds validated configuration only; pages share no mutable state,
/// so one extractor can process a whole batch in parallel.
pub struct PageExtractor {
    config: ExtractorConfig,
}

impl PageExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ParacropError> {
        ensure!(
            config.blur_kernel % 2 == 1,
            ConfigSnafu {
                message: format!("blur kernel must be odd, got {}", config.blur_kernel),
            }
        );
        ensure!(
            config.dilate_kernel % 2 == 1 && (3..=255).contains(&config.dilate_kernel),
            ConfigSnafu {
                message: format!(
                    "dilation kernel must be odd and within 3..=255, got {}",
                    config.dilate_kernel
                ),
            }
        );
        ensure!(
            config.dilate_iterations >= 1,
            ConfigSnafu {
                message: "dilation iterations must be at least 1".to_string(),
            }
        );
        ensure!(
            config.run_threshold >= 1,
            ConfigSnafu {
                message: "run threshold must be at least 1".to_string(),
            }
        );

        Ok(Self { config })
    }

    /// Runs the full pipeline for one page.
    ///
    /// Decode, binarize, dilate, extract candidate regions, drop
    /// non-text regions, sort the survivors into reading order and
    /// write them as `001.png`, `002.png`, ... under
    /// `<output_root>/<page-stem>/`. The page folder is created even
    /// when nothing survives.
    pub fn process_page(
        &self,
        page_path: &Path,
        output_root: &Path,
    ) -> Result<PageReport, ParacropError> {
        let page_name = page_stem(page_path);
        info!("processing page `{}`", page_name);

        let page = image::open(page_path).context(ImageReadSnafu {
            path: page_path.display().to_string(),
        })?;

        let raw_mask = binarize(&page, self.config.blur_kernel);
        let dilated_mask = dilate_mask(
            &raw_mask,
            self.config.dilate_kernel,
            self.config.dilate_iterations,
        );

        // Boxes come from the dilated mask, classification crops from
        // the raw one
        let mut regions = extract_regions(&page, &raw_mask, &dilated_mask);
        let candidates = regions.len();

        regions.retain(|region| is_text(&region.mask, self.config.run_threshold));
        sort_reading_order(&mut regions);

        let page_dir = output_root.join(&page_name);
        fs::create_dir_all(&page_dir).context(CreateDirSnafu {
            path: page_dir.display().to_string(),
        })?;

        for (index, region) in regions.iter().enumerate() {
            let out_path = page_dir.join(format!("{:03}.png", index + 1));
            region.crop.save(&out_path).context(ImageWriteSnafu {
                path: out_path.display().to_string(),
            })?;
        }

        info!(
            "page `{}`: {} candidates, {} paragraphs written",
            page_name,
            candidates,
            regions.len()
        );

        Ok(PageReport {
            page: page_name,
            candidates,
            survivors: regions.len(),
        })
    }

    /// Processes every page matching `pattern` under `input_dir`.
    ///
    /// Pages are independent and run in parallel. A failing page is
    /// logged and recorded in the summary without aborting the rest of
    /// the batch.
    pub fn process_batch(
        &self,
        input_dir: &Path,
        pattern: &str,
        output_root: &Path,
    ) -> Result<BatchSummary, ParacropError> {
        let full_pattern = input_dir.join(pattern).to_string_lossy().into_owned();
        let entries = glob::glob(&full_pattern).context(PatternSnafu {
            pattern: pattern.to_string(),
        })?;

        let mut pages = Vec::new();
        for entry in entries {
            pages.push(entry.context(WalkSnafu)?);
        }
        pages.sort();

        info!("found {} pages matching `{}`", pages.len(), full_pattern);

        let results: Vec<(PathBuf, Result<PageReport, ParacropError>)> = pages
            .into_par_iter()
            .map(|path| {
                let result = self.process_page(&path, output_root);
                (path, result)
            })
            .collect();

        let mut summary = BatchSummary::default();
        for (path, result) in results {
            match result {
                Ok(report) => summary.pages.push(report),
                Err(err) => {
                    error!("page `{}` failed: {}", path.display(), err);
                    summary.failures.push(PageFailure {
                        page: page_stem(&path),
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(summary)
    }
}

fn page_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use tempfile::tempdir;

    /// White page with black rectangles at the given (x, y, w, h) spots.
    fn synthetic_page(width: u32, height: u32, ink: &[(u32, u32, u32, u32)]) -> RgbImage {
        RgbImage::from_fn(width, height, |px, py| {
            let inked = ink.iter().any(|&(x, y, w, h)| {
                (x..x + w).contains(&px) && (y..y + h).contains(&py)
            });
            if inked {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    fn write_page(dir: &Path, name: &str, page: &RgbImage) -> PathBuf {
        let path = dir.join(name);
        page.save(&path).unwrap();
        path
    }

    #[test]
    fn test_config_validation() {
        let mut config = ExtractorConfig::default();
        assert!(PageExtractor::new(config.clone()).is_ok());

        config.blur_kernel = 8;
        assert!(PageExtractor::new(config.clone()).is_err());
        config.blur_kernel = 7;

        config.dilate_kernel = 4;
        assert!(PageExtractor::new(config.clone()).is_err());
        config.dilate_kernel = 9;

        config.dilate_iterations = 0;
        assert!(PageExtractor::new(config.clone()).is_err());
        config.dilate_iterations = 5;

        config.run_threshold = 0;
        assert!(PageExtractor::new(config).is_err());
    }

    #[test]
    fn test_table_line_is_filtered_out() {
        let dir = tempdir().unwrap();
        // A paragraph-like cluster of short bars plus a long gridline
        let page = synthetic_page(
            300,
            300,
            &[
                (20, 20, 30, 5),
                (20, 30, 30, 5),
                (20, 40, 30, 5),
                (100, 200, 150, 4),
            ],
        );
        let page_path = write_page(dir.path(), "007.png", &page);
        let output_root = dir.path().join("Output");

        let extractor = PageExtractor::new(ExtractorConfig::default()).unwrap();
        let report = extractor.process_page(&page_path, &output_root).unwrap();

        assert_eq!(report.page, "007");
        assert_eq!(report.candidates, 2);
        assert_eq!(report.survivors, 1);

        let page_dir = output_root.join("007");
        assert!(page_dir.join("001.png").exists());
        assert!(!page_dir.join("002.png").exists());
    }

    #[test]
    fn test_output_follows_reading_order() {
        let dir = tempdir().unwrap();
        // Wider paragraph bottom-left, narrower one top-right; the
        // (x, y) key puts the left one first despite its lower position
        let page = synthetic_page(
            400,
            400,
            &[(40, 300, 30, 6), (300, 40, 16, 6)],
        );
        let page_path = write_page(dir.path(), "page.png", &page);
        let output_root = dir.path().join("Output");

        let extractor = PageExtractor::new(ExtractorConfig::default()).unwrap();
        let report = extractor.process_page(&page_path, &output_root).unwrap();
        assert_eq!(report.survivors, 2);

        let first = image::open(output_root.join("page/001.png")).unwrap();
        let second = image::open(output_root.join("page/002.png")).unwrap();
        assert!(first.width() > second.width());
    }

    #[test]
    fn test_blank_page_creates_empty_folder() {
        let dir = tempdir().unwrap();
        let page = synthetic_page(100, 100, &[]);
        let page_path = write_page(dir.path(), "blank.png", &page);
        let output_root = dir.path().join("Output");

        let extractor = PageExtractor::new(ExtractorConfig::default()).unwrap();
        let report = extractor.process_page(&page_path, &output_root).unwrap();

        assert_eq!(report.survivors, 0);
        let page_dir = output_root.join("blank");
        assert!(page_dir.is_dir());
        assert!(!page_dir.join("001.png").exists());
    }

    #[test]
    fn test_written_crop_round_trips_losslessly() {
        let dir = tempdir().unwrap();
        let crop = RgbImage::from_fn(23, 17, |x, y| {
            Rgb([(x * 11 % 256) as u8, (y * 7 % 256) as u8, ((x + y) % 256) as u8])
        });
        let path = dir.path().join("crop.png");
        DynamicImage::ImageRgb8(crop.clone()).save(&path).unwrap();

        let reread = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reread.as_raw(), crop.as_raw());
    }

    #[test]
    fn test_batch_isolates_decode_failures() {
        let dir = tempdir().unwrap();
        let good = synthetic_page(200, 200, &[(20, 20, 30, 5)]);
        write_page(dir.path(), "001.png", &good);
        // Not a PNG at all
        std::fs::write(dir.path().join("002.png"), b"not an image").unwrap();
        let output_root = dir.path().join("Output");

        let extractor = PageExtractor::new(ExtractorConfig::default()).unwrap();
        let summary = extractor
            .process_batch(dir.path(), "*.png", &output_root)
            .unwrap();

        assert_eq!(summary.pages.len(), 1);
        assert_eq!(summary.pages[0].page, "001");
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].page, "002");
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_batch_with_no_matches_is_empty_success() {
        let dir = tempdir().unwrap();
        let extractor = PageExtractor::new(ExtractorConfig::default()).unwrap();
        let summary = extractor
            .process_batch(dir.path(), "*.png", &dir.path().join("Output"))
            .unwrap();

        assert!(summary.pages.is_empty());
        assert!(summary.all_succeeded());
    }
}
