// HTTP access to the NasugView PHP backend.

pub mod backend;
pub mod client;
pub mod error;
pub mod wire;

pub use backend::Backend;
pub use client::HttpBackend;
pub use error::NetError;
pub use wire::{
    ApiReply, ImageAttachment, LoginRequest, LoginResponse, PhotoResponse, PhotoUpload,
    PostSubmission, PostsResponse, ReviewSubmission, ReviewsResponse, SignupRequest,
    UserReviewsResponse,
};
