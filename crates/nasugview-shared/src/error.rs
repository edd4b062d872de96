use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown review tag: {0}")]
    UnknownTag(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
}

/// Local form checks. The `Display` text is what the user sees in the alert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please rate all traits and write a comment.")]
    IncompleteReview,

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("Please enter both username and password.")]
    MissingCredentials,

    #[error("Please fill in all fields.")]
    IncompleteSignup,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Write a caption or pick an image.")]
    EmptyPost,

    #[error("Image file has no extension: {0}")]
    MissingImageExtension(String),
}
