use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ParacropError {
    #[snafu(display("Image read error for `{}`: {}", path, source))]
    ImageRead {
        source: image::ImageError,
        path: String,
    },
    #[snafu(display("Image write error for `{}`: {}", path, source))]
    ImageWrite {
        source: image::ImageError,
        path: String,
    },
    #[snafu(display("Create directory `{}` error: {}", path, source))]
    CreateDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid glob pattern `{}`: {}", pattern, source))]
    Pattern {
        source: glob::PatternError,
        pattern: String,
    },
    #[snafu(display("Directory walk error: {}", source))]
    Walk { source: glob::GlobError },
    #[snafu(display("Invalid configuration: {}", message))]
    Config { message: String },
}
