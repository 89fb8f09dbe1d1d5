use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("image at {url} exceeds {limit} bytes")]
    ImageTooLarge { url: String, limit: usize },

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image decode task failed: {0}")]
    DecodeTask(#[from] tokio::task::JoinError),
}
