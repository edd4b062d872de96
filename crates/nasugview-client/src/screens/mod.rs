//! Headless screen controllers.
//!
//! Each sub-module holds one screen's local state and exposes its user
//! gestures as methods. Gestures return a [`ClientError`] for callers and
//! leave the user-facing [`Notice`](crate::notice::Notice) in the screen's
//! notice slot.

pub mod auth;
pub mod calendar;
pub mod directory;
pub mod my_reviews;
pub mod profile;
pub mod reviews;
pub mod submit_review;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nasugview_net::wire::Reply;
use nasugview_net::ImageAttachment;
use nasugview_shared::media::mime_for_extension;

use crate::error::ClientError;
use crate::navigation::Navigator;

pub type SharedNavigator = Arc<Mutex<Navigator>>;

/// Lock the navigator, recovering from a poisoned lock.
pub fn lock_nav(nav: &SharedNavigator) -> MutexGuard<'_, Navigator> {
    nav.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Turn a `success: false` reply into [`ClientError::Rejected`].
pub(crate) fn accepted<R: Reply>(reply: R) -> Result<R, ClientError> {
    if reply.succeeded() {
        Ok(reply)
    } else {
        Err(ClientError::rejected(reply.message()))
    }
}

/// Read a picked image into memory as an upload part.
pub(crate) async fn read_attachment(
    path: &Path,
    file_name: String,
    extension: &str,
) -> Result<ImageAttachment, ClientError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(ImageAttachment {
        file_name,
        mime: mime_for_extension(extension),
        data,
    })
}

#[cfg(test)]
mod tests {
    use nasugview_net::ApiReply;

    use super::*;

    #[test]
    fn test_rejection_keeps_server_message() {
        let reply = ApiReply {
            success: false,
            message: Some("Already reviewed".into()),
        };
        match accepted(reply) {
            Err(ClientError::Rejected { message }) => {
                assert_eq!(message.as_deref(), Some("Already reviewed"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IMG_1.JPG");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let image = read_attachment(&path, "photo.jpg".into(), "jpg").await.unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.data, vec![1, 2, 3]);

        let missing = read_attachment(&dir.path().join("gone.png"), "x.png".into(), "png").await;
        assert!(matches!(missing, Err(ClientError::Io { .. })));
    }
}
