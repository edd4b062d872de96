//! # nasugview-shared
//!
//! Domain types and pure client-side logic shared by every NasugView crate:
//! the static business and event fixtures, review filtering, the star
//! histogram, form validation, calendar marking and upload naming.
//!
//! Nothing in here performs I/O.

pub mod calendar;
pub mod constants;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod histogram;
pub mod media;
pub mod types;
pub mod validation;

pub use error::{SharedError, ValidationError};
pub use filter::ReviewTag;
pub use histogram::{HistogramBar, RatingHistogram};
pub use types::*;
