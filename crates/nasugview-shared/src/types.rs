use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::MAP_SPAN_DEGREES;
use crate::error::SharedError;

// ---------------------------------------------------------------------------
// Business directory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Clothes,
    Resorts,
    Restaurants,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Clothes, Category::Resorts, Category::Restaurants];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Clothes => "Clothes",
            Category::Resorts => "Resorts",
            Category::Restaurants => "Restaurants",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SharedError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Visible map area centred on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Coordinates {
    pub fn region(&self) -> MapRegion {
        MapRegion {
            center: *self,
            latitude_delta: MAP_SPAN_DEGREES,
            longitude_delta: MAP_SPAN_DEGREES,
        }
    }
}

/// A directory entry. The name is the lookup key everywhere, including the
/// backend's review tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Business {
    pub name: &'static str,
    /// Bundled asset path
    pub image: &'static str,
    pub address: &'static str,
    pub category: Option<Category>,
    /// 0-5, one decimal
    pub rating: f32,
    pub location: Coordinates,
    pub phone: &'static str,
    pub hours: &'static str,
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// A review as listed for one business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub username: String,
    #[serde(deserialize_with = "lenient::number")]
    pub excellent_rating: u8,
    #[serde(deserialize_with = "lenient::number")]
    pub service_rating: u8,
    #[serde(default, deserialize_with = "lenient::text")]
    pub comment: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub image_path: Option<String>,
}

/// A review as listed on the author's own "my reviews" page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReview {
    #[serde(deserialize_with = "lenient::number")]
    pub id: i64,
    pub username: String,
    pub business_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub excellent_rating: u8,
    #[serde(deserialize_with = "lenient::number")]
    pub service_rating: u8,
    #[serde(default, deserialize_with = "lenient::text")]
    pub comment: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub image_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Profile feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub caption: String,
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoKind {
    Profile,
    Cover,
}

impl PhotoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoKind::Profile => "profile",
            PhotoKind::Cover => "cover",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhotoKind::Profile => "Profile",
            PhotoKind::Cover => "Cover",
        }
    }
}

impl fmt::Display for PhotoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is signed in, plus the photo paths the backend returned at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

impl UserProfile {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile_image: None,
            cover_image: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub date: NaiveDate,
    pub name: &'static str,
    pub location: &'static str,
    pub time: &'static str,
}

// ---------------------------------------------------------------------------
// Lenient decoding for PHP-produced JSON
// ---------------------------------------------------------------------------

/// The backend emits numbers either as JSON numbers or as numeric strings,
/// and "no image" as `null` or `""`.
pub mod lenient {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText<T> {
        Num(T),
        Text(String),
    }

    impl<T> NumOrText<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        fn resolve<E: de::Error>(self) -> Result<T, E> {
            match self {
                NumOrText::Num(n) => Ok(n),
                NumOrText::Text(s) => s.trim().parse().map_err(E::custom),
            }
        }
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        NumOrText::<T>::deserialize(deserializer)?.resolve()
    }

    pub fn numbers<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Vec::<NumOrText<T>>::deserialize(deserializer)?
            .into_iter()
            .map(NumOrText::resolve)
            .collect()
    }

    pub fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.trim().is_empty()))
    }

    /// `null` text columns decode as an empty string.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
