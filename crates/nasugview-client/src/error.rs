use std::path::PathBuf;

use nasugview_net::NetError;
use nasugview_shared::ValidationError;
use nasugview_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// A local form check failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No usable reply arrived.
    #[error("Network error: {0}")]
    Network(#[from] NetError),

    /// The backend answered with `success: false`.
    #[error("Rejected by server: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Invalid route: {0}")]
    Navigation(String),

    #[error("Cannot read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A submission is already in progress")]
    Busy,
}

/// How a failure reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected locally before any request.
    Validation,
    /// The request never produced a decodable reply.
    Transport,
    /// The backend replied with `success: false`.
    Application,
    /// Local storage, navigation or file problems.
    Local,
}

impl ClientError {
    pub fn rejected(message: Option<&str>) -> Self {
        ClientError::Rejected {
            message: message.map(str::to_string),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Validation(_) => FailureKind::Validation,
            ClientError::Network(_) => FailureKind::Transport,
            ClientError::Rejected { .. } => FailureKind::Application,
            ClientError::Store(_)
            | ClientError::NotSignedIn
            | ClientError::Navigation(_)
            | ClientError::Io { .. }
            | ClientError::Busy => FailureKind::Local,
        }
    }

    /// The text shown to the user. A rejection shows the server's message or
    /// `rejected_fallback`; a transport failure shows whatever `network`
    /// renders; everything else shows its own description.
    pub fn user_message(
        &self,
        rejected_fallback: &str,
        network: impl FnOnce(&NetError) -> String,
    ) -> String {
        match self {
            ClientError::Rejected { message } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(rejected_fallback)
                .to_string(),
            ClientError::Network(e) => network(e),
            ClientError::Validation(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}
