//! Form state and the local checks run before anything is sent.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingDimension {
    ExcellentQuality,
    GoodService,
}

/// A review being composed. A rating of 0 means "not rated yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub excellent_rating: u8,
    pub service_rating: u8,
    pub comment: String,
    pub image: Option<PathBuf>,
}

impl ReviewDraft {
    /// Tap on the n-th star of one dimension.
    pub fn rate(&mut self, dimension: RatingDimension, stars: u8) -> Result<(), ValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&stars) {
            return Err(ValidationError::RatingOutOfRange(stars));
        }
        match dimension {
            RatingDimension::ExcellentQuality => self.excellent_rating = stars,
            RatingDimension::GoodService => self.service_rating = stars,
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.excellent_rating == 0 || self.service_rating == 0 || self.comment.trim().is_empty()
        {
            return Err(ValidationError::IncompleteReview);
        }
        for rating in [self.excellent_rating, self.service_rating] {
            if rating > MAX_RATING {
                return Err(ValidationError::RatingOutOfRange(rating));
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            &self.email,
            &self.username,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ValidationError::IncompleteSignup);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// A feed post being composed; needs a caption or an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub caption: String,
    pub image: Option<PathBuf>,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.caption.trim().is_empty() && self.image.is_none() {
            return Err(ValidationError::EmptyPost);
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
