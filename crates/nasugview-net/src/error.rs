use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetError {
    /// Connection refused, DNS failure, timeout, broken body...
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status with a body that is not a backend reply.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// 2xx status with a body that is not the expected JSON shape.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid image attachment: {0}")]
    InvalidAttachment(String),
}
