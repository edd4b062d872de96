//! The seam between screens and the backend.
//!
//! Screens hold an `Arc<dyn Backend>` so they can be driven against the real
//! HTTP client or an in-memory double.

use async_trait::async_trait;

use crate::error::NetError;
use crate::wire::{
    ApiReply, LoginRequest, LoginResponse, PhotoResponse, PhotoUpload, PostSubmission,
    PostsResponse, ReviewSubmission, ReviewsResponse, SignupRequest, UserReviewsResponse,
};

/// One method per backend endpoint.
///
/// `Ok` means a reply was received and decoded, whatever its `success`
/// flag; `Err` means no usable reply arrived.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, NetError>;

    async fn signup(&self, request: &SignupRequest) -> Result<ApiReply, NetError>;

    /// `upload_profile.php` or `upload_cover.php` depending on the kind.
    async fn upload_photo(&self, upload: PhotoUpload) -> Result<PhotoResponse, NetError>;

    async fn upload_post(&self, post: PostSubmission) -> Result<ApiReply, NetError>;

    async fn load_user_posts(&self, username: &str) -> Result<PostsResponse, NetError>;

    async fn submit_review(&self, review: ReviewSubmission) -> Result<ApiReply, NetError>;

    async fn get_reviews(&self, business_name: &str) -> Result<ReviewsResponse, NetError>;

    async fn load_user_reviews(&self, username: &str) -> Result<UserReviewsResponse, NetError>;
}
