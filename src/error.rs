use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout configuration: {0}")]
    Config(String),
}

/// Why an optional image could not be loaded. Never fatal to a render.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImageLoadError {
    #[error("fetch failed for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("fetch for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode {format} image: {reason}")]
    Decode { format: &'static str, reason: String },

    #[error("unsupported image data: {0}")]
    Unsupported(String),

    #[error("image exceeds {limit} bytes")]
    TooLarge { limit: u64 },
}
