//! `reqwest`-backed implementation of [`Backend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use nasugview_shared::constants::{
    ENDPOINT_GET_REVIEWS, ENDPOINT_LOAD_USER_POSTS, ENDPOINT_LOAD_USER_REVIEWS, ENDPOINT_LOGIN,
    ENDPOINT_SIGNUP, ENDPOINT_SUBMIT_REVIEW, ENDPOINT_UPLOAD_COVER, ENDPOINT_UPLOAD_POST,
    ENDPOINT_UPLOAD_PROFILE,
};
use nasugview_shared::types::PhotoKind;

use crate::backend::Backend;
use crate::error::NetError;
use crate::wire::{
    ApiReply, ImageAttachment, LoginRequest, LoginResponse, PhotoResponse, PhotoUpload,
    PostSubmission, PostsResponse, ReviewSubmission, ReviewsResponse, SignupRequest,
    UserReviewsResponse,
};

/// HTTP client bound to one backend installation.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` is the directory holding the PHP scripts, e.g.
    /// `http://192.168.0.199/NasugView`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NetError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(NetError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nasugview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, script: &str) -> String {
        format!("{}/{}", self.base_url, script)
    }
}

fn image_part(image: ImageAttachment) -> Result<Part, NetError> {
    Part::bytes(image.data)
        .file_name(image.file_name)
        .mime_str(&image.mime)
        .map_err(|e| NetError::InvalidAttachment(e.to_string()))
}

/// Decode a backend reply. A body that fails to decode on a non-2xx status
/// is reported as the status rather than as a decode error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, NetError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<T>(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(NetError::Status(status.as_u16())),
        Err(e) => Err(NetError::Decode(e)),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, NetError> {
        debug!(username = %request.username, "POST login");
        let response = self
            .http
            .post(self.endpoint(ENDPOINT_LOGIN))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<ApiReply, NetError> {
        debug!(username = %request.username, "POST signup");
        let response = self
            .http
            .post(self.endpoint(ENDPOINT_SIGNUP))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn upload_photo(&self, upload: PhotoUpload) -> Result<PhotoResponse, NetError> {
        let script = match upload.kind {
            PhotoKind::Profile => ENDPOINT_UPLOAD_PROFILE,
            PhotoKind::Cover => ENDPOINT_UPLOAD_COVER,
        };
        debug!(
            username = %upload.username,
            kind = %upload.kind,
            file = %upload.image.file_name,
            "POST photo"
        );

        let form = Form::new()
            .text("username", upload.username)
            .part("image", image_part(upload.image)?);

        let response = self
            .http
            .post(self.endpoint(script))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn upload_post(&self, post: PostSubmission) -> Result<ApiReply, NetError> {
        debug!(username = %post.username, has_image = post.image.is_some(), "POST post");

        let mut form = Form::new()
            .text("username", post.username)
            .text("caption", post.caption);
        if let Some(image) = post.image {
            form = form.part("image", image_part(image)?);
        }

        let response = self
            .http
            .post(self.endpoint(ENDPOINT_UPLOAD_POST))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn load_user_posts(&self, username: &str) -> Result<PostsResponse, NetError> {
        debug!(username, "GET posts");
        let response = self
            .http
            .get(self.endpoint(ENDPOINT_LOAD_USER_POSTS))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }

    async fn submit_review(&self, review: ReviewSubmission) -> Result<ApiReply, NetError> {
        debug!(
            username = %review.username,
            business = %review.business_name,
            has_image = review.image.is_some(),
            "POST review"
        );

        let mut form = Form::new()
            .text("username", review.username)
            .text("business_name", review.business_name)
            .text("excellent_rating", review.excellent_rating.to_string())
            .text("service_rating", review.service_rating.to_string())
            .text("comment", review.comment);
        if let Some(image) = review.image {
            form = form.part("image", image_part(image)?);
        }

        let response = self
            .http
            .post(self.endpoint(ENDPOINT_SUBMIT_REVIEW))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_reviews(&self, business_name: &str) -> Result<ReviewsResponse, NetError> {
        debug!(business = business_name, "GET reviews");
        let response = self
            .http
            .get(self.endpoint(ENDPOINT_GET_REVIEWS))
            .query(&[("business_name", business_name)])
            .send()
            .await?;
        decode(response).await
    }

    async fn load_user_reviews(&self, username: &str) -> Result<UserReviewsResponse, NetError> {
        debug!(username, "POST user reviews");
        let response = self
            .http
            .post(self.endpoint(ENDPOINT_LOAD_USER_REVIEWS))
            .form(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }
}
