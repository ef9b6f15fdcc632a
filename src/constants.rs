//! Application constants

/// GCS bucket holding recorded space audio
pub const AUDIO_BUCKET: &str = "spacescribe_media";

/// Signed URL expiry time in seconds (15 minutes)
pub const SIGNED_URL_EXPIRY_SECS: u32 = 15 * 60;

/// Default page size for paginated list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size for paginated list endpoints
pub const MAX_PAGE_SIZE: i64 = 100;

/// Display limit for a single tweet
pub const TWEET_CHAR_LIMIT: usize = 280;

/// Transcript segments served per detail-view page
pub const SEGMENT_PAGE_SIZE: i64 = 20;
