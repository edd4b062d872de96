//! Tag filters over an already-fetched review list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::GOOD_RATING_THRESHOLD;
use crate::error::SharedError;
use crate::types::Review;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewTag {
    #[default]
    All,
    GoodService,
    ExcellentQuality,
}

impl ReviewTag {
    /// Display order of the tag chips.
    pub const ALL: [ReviewTag; 3] = [
        ReviewTag::All,
        ReviewTag::GoodService,
        ReviewTag::ExcellentQuality,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewTag::All => "All",
            ReviewTag::GoodService => "Good Service",
            ReviewTag::ExcellentQuality => "Excellent Quality",
        }
    }

    pub fn matches(&self, review: &Review) -> bool {
        match self {
            ReviewTag::All => true,
            ReviewTag::GoodService => review.service_rating >= GOOD_RATING_THRESHOLD,
            ReviewTag::ExcellentQuality => review.excellent_rating >= GOOD_RATING_THRESHOLD,
        }
    }

    pub fn apply<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        reviews.iter().filter(|r| self.matches(r)).collect()
    }
}

impl fmt::Display for ReviewTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReviewTag {
    type Err = SharedError;

    /// Accepts the chip label ("Good Service") or a kebab form ("good-service").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        ReviewTag::ALL
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| SharedError::UnknownTag(s.to_string()))
    }
}
