pub mod analysis;
pub mod consts;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod segment;

// Re-export commonly used types
pub use pipeline::extractor::{
    BatchSummary, ExtractorConfig, PageExtractor, PageFailure, PageReport,
};
