//! Request and response shapes of the PHP endpoints.
//!
//! Every reply carries `success` and usually a `message`; the remaining
//! fields depend on the endpoint. Missing fields decode to their defaults
//! because the backend omits them on failure.

use serde::{Deserialize, Serialize};

use nasugview_shared::types::{lenient, PhotoKind, Post, Review, UserReview};
use nasugview_shared::RatingHistogram;

/// Common view over every endpoint's reply.
pub trait Reply {
    fn succeeded(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

macro_rules! impl_reply {
    ($($ty:ty),+ $(,)?) => {
        $(impl Reply for $ty {
            fn succeeded(&self) -> bool {
                self.success
            }

            fn message(&self) -> Option<&str> {
                self.message.as_deref().filter(|m| !m.is_empty())
            }
        })+
    };
}

impl_reply!(
    ApiReply,
    LoginResponse,
    PhotoResponse,
    PostsResponse,
    ReviewsResponse,
    UserReviewsResponse,
);

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// An image read from disk, ready to become a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub username: String,
    pub business_name: String,
    pub excellent_rating: u8,
    pub service_rating: u8,
    pub comment: String,
    pub image: Option<ImageAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSubmission {
    pub username: String,
    pub caption: String,
    pub image: Option<ImageAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub username: String,
    pub kind: PhotoKind,
    pub image: ImageAttachment,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Reply of endpoints that only acknowledge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub profile_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoResponse {
    #[serde(default)]
    pub success: bool,
    /// Server-relative path of the stored photo
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub image: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// 5★ first
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub star_counts: Vec<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ReviewsResponse {
    pub fn histogram(&self) -> RatingHistogram {
        RatingHistogram::from_counts(&self.star_counts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReviewsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reviews: Vec<UserReview>,
    #[serde(default)]
    pub message: Option<String>,
}
