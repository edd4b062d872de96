//! Profile page: profile and cover photos plus the user's post feed.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use nasugview_net::{Backend, PhotoUpload, PostSubmission};
use nasugview_shared::media::{
    image_extension, original_file_name, photo_source, profile_photo_name, resolve_url,
    ImageSource,
};
use nasugview_shared::validation::PostDraft;
use nasugview_shared::{PhotoKind, Post};

use crate::error::ClientError;
use crate::notice::{Notice, NoticeSlot};
use crate::screens::{accepted, read_attachment};
use crate::session::{Session, SessionManager};

pub const UPLOAD_REJECTED: &str = "Upload failed.";
pub const POST_REJECTED: &str = "Post failed.";
pub const POST_UPLOADED: &str = "Post uploaded!";

pub struct ProfileScreen {
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    base_url: String,
    posts: Vec<Post>,
    pub compose: PostDraft,
    notice: NoticeSlot,
}

impl ProfileScreen {
    pub fn new(backend: Arc<dyn Backend>, session: Arc<SessionManager>, base_url: &str) -> Self {
        Self {
            backend,
            session,
            base_url: base_url.to_string(),
            posts: Vec::new(),
            compose: PostDraft::default(),
            notice: NoticeSlot::default(),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.visible()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Where the profile or cover picture currently comes from.
    pub fn photo(&self, kind: PhotoKind) -> ImageSource {
        let session = self.session.current();
        let path = match &session {
            Session::SignedIn(profile) => match kind {
                PhotoKind::Profile => profile.profile_image.as_deref(),
                PhotoKind::Cover => profile.cover_image.as_deref(),
            },
            Session::SignedOut => None,
        };
        photo_source(&self.base_url, kind, path)
    }

    pub fn post_image_url(&self, post: &Post) -> Option<String> {
        post.image
            .as_deref()
            .map(|path| resolve_url(&self.base_url, path))
    }

    /// Replace the feed with the server's copy. Failures keep the old feed.
    pub async fn load_posts(&mut self) -> Result<(), ClientError> {
        let username = self.session.username()?;
        let result = match self.backend.load_user_posts(&username).await {
            Ok(reply) => accepted(reply),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(reply) => {
                self.posts = reply.posts;
                Ok(())
            }
            Err(e) => {
                warn!(%username, error = %e, "Loading posts failed");
                Err(e)
            }
        }
    }

    /// Upload a new profile or cover photo right away.
    pub async fn change_photo(&mut self, kind: PhotoKind, path: &Path) -> Result<(), ClientError> {
        match self.upload_photo(kind, path).await {
            Ok(()) => {
                self.notice
                    .show(Notice::status(format!("{} photo updated!", kind.label())));
                Ok(())
            }
            Err(e) => {
                let message =
                    e.user_message(UPLOAD_REJECTED, |net| format!("Upload failed: {net}"));
                warn!(%kind, error = %e, "Photo upload failed");
                self.notice.show(Notice::status(message));
                Err(e)
            }
        }
    }

    async fn upload_photo(&mut self, kind: PhotoKind, path: &Path) -> Result<(), ClientError> {
        let username = self.session.username()?;
        let ext = image_extension(path)?;
        let file_name = profile_photo_name(
            &username,
            kind,
            chrono::Utc::now().timestamp_millis(),
            &ext,
        );
        let image = read_attachment(path, file_name, &ext).await?;

        let reply = accepted(
            self.backend
                .upload_photo(PhotoUpload {
                    username: username.clone(),
                    kind,
                    image,
                })
                .await?,
        )?;

        if let Some(stored) = reply.image {
            info!(%username, %kind, path = %stored, "Photo updated");
            self.session.set_photo(kind, stored)?;
        }
        Ok(())
    }

    /// Send the compose form, then reload the whole feed.
    pub async fn submit_post(&mut self) -> Result<(), ClientError> {
        match self.send_post().await {
            Ok(()) => {
                self.compose.reset();
                self.notice.show(Notice::status(POST_UPLOADED));
                if let Err(e) = self.load_posts().await {
                    warn!(error = %e, "Feed reload after posting failed");
                }
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(POST_REJECTED, |net| format!("Post failed: {net}"));
                warn!(error = %e, "Post upload failed");
                self.notice.show(Notice::status(message));
                Err(e)
            }
        }
    }

    async fn send_post(&mut self) -> Result<(), ClientError> {
        self.compose.validate()?;
        let username = self.session.username()?;

        let image = match &self.compose.image {
            Some(path) => {
                let ext = image_extension(path)?;
                Some(read_attachment(path, original_file_name(path), &ext).await?)
            }
            None => None,
        };

        accepted(
            self.backend
                .upload_post(PostSubmission {
                    username,
                    caption: self.compose.caption.clone(),
                    image,
                })
                .await?,
        )?;
        Ok(())
    }
}
