/// Application name
pub const APP_NAME: &str = "NasugView";

/// Base URL of the PHP backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://192.168.0.199/NasugView";

/// Period of the silent review refresh in milliseconds
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1_000;

/// Upper bound for the refresh backoff after repeated failures
pub const DEFAULT_REFRESH_MAX_BACKOFF_MS: u64 = 30_000;

/// HTTP request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// How long a transient status notice stays visible
pub const STATUS_NOTICE_MS: u64 = 1_500;

/// Star rating bounds
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Ratings at or above this value count as "good" for tag filtering
pub const GOOD_RATING_THRESHOLD: u8 = 4;

/// Number of buckets in a star histogram (5★ down to 1★)
pub const HISTOGRAM_BUCKETS: usize = 5;

/// Key under which the signed-in username is persisted
pub const SESSION_USERNAME_KEY: &str = "username";

/// Map span around a business pin, in degrees
pub const MAP_SPAN_DEGREES: f64 = 0.01;

/// Bundled fallbacks when a user has not uploaded photos
pub const DEFAULT_PROFILE_IMAGE: &str = "assets/images/default.png";
pub const DEFAULT_COVER_IMAGE: &str = "assets/images/default-cover.jpg";

/// Server directory holding review photos
pub const REVIEW_IMAGE_DIR: &str = "reviews";

/// Backend endpoints, relative to the base URL
pub const ENDPOINT_LOGIN: &str = "login.php";
pub const ENDPOINT_SIGNUP: &str = "signup.php";
pub const ENDPOINT_UPLOAD_PROFILE: &str = "upload_profile.php";
pub const ENDPOINT_UPLOAD_COVER: &str = "upload_cover.php";
pub const ENDPOINT_UPLOAD_POST: &str = "upload_post.php";
pub const ENDPOINT_LOAD_USER_POSTS: &str = "load_user_post.php";
pub const ENDPOINT_SUBMIT_REVIEW: &str = "submit_review.php";
pub const ENDPOINT_GET_REVIEWS: &str = "get_reviews.php";
pub const ENDPOINT_LOAD_USER_REVIEWS: &str = "load_user_reviews.php";
