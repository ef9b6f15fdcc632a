//! Generated Twitter thread artifacts and their display helpers.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::constants::TWEET_CHAR_LIMIT;

/// Version of the generated thread the read path serves
pub const THREAD_VERSION: &str = "v1";

/// An ordered sequence of tweet-length strings generated from a space
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TwitterThread {
    pub space_id: String,
    #[allow(dead_code)] // Fetched from DB but intentionally not exposed in API responses
    pub version: String,
    pub tweets: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

pub async fn get_twitter_thread(
    pool: &PgPool,
    space_id: &str,
) -> Result<Option<TwitterThread>, sqlx::Error> {
    sqlx::query_as::<_, TwitterThread>(
        r#"
        SELECT space_id, version, tweets, generated_at
        FROM twitter_threads
        WHERE space_id = $1 AND version = $2
        "#,
    )
    .bind(space_id)
    .bind(THREAD_VERSION)
    .fetch_optional(pool)
    .await
}

/// Character count as shown next to the compose box.
pub fn char_count(tweet: &str) -> usize {
    tweet.chars().count()
}

/// Display flag only. Nothing trims or rejects long tweets.
pub fn over_limit(tweet: &str) -> bool {
    char_count(tweet) > TWEET_CHAR_LIMIT
}

/// Compose-intent link carrying the whole thread, tweets separated by blank
/// lines.
pub fn share_intent_url(tweets: &[String]) -> String {
    let text = tweets.join("\n\n");
    format!("https://x.com/intent/tweet?text={}", percent_encode(&text))
}

fn percent_encode(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_limit_boundary() {
        let at_limit = "x".repeat(280);
        let past_limit = "x".repeat(281);
        assert!(!over_limit(&at_limit));
        assert!(over_limit(&past_limit));
    }

    #[test]
    fn test_char_count_is_scalar_values() {
        assert_eq!(char_count("héllo"), 5);
    }

    #[test]
    fn test_share_intent_url_joins_with_blank_lines() {
        let url = share_intent_url(&["a".to_string(), "b".to_string()]);
        let (base, query) = url.split_once("?text=").unwrap();
        assert_eq!(base, "https://x.com/intent/tweet");
        let decoded = percent_encoding::percent_decode_str(query)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, "a\n\nb");
    }

    #[test]
    fn test_share_intent_url_empty_thread() {
        assert_eq!(
            share_intent_url(&[]),
            "https://x.com/intent/tweet?text="
        );
    }
}
