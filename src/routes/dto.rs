//! Response shapes shared across route modules

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::spaces::{Participant, Segment, Space, SpaceKind, TranscriptionStatus};
use crate::domain::threads::{self, TwitterThread};

#[derive(Debug, Serialize)]
pub struct SpaceResponse {
    pub space_id: String,
    pub transcription_status: TranscriptionStatus,
    pub kind: SpaceKind,
    pub title: String,
    pub admins: Vec<Participant>,
    pub speakers: Vec<Participant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Space> for SpaceResponse {
    fn from(space: Space) -> Self {
        Self {
            space_id: space.space_id,
            transcription_status: space.transcription_status,
            kind: space.kind,
            title: space.title,
            admins: space.admins.0,
            speakers: space.speakers.0,
            transcript_text: space.transcript_text,
            created_at: space.created_at,
        }
    }
}

/// Field names mirror the stored segment documents.
#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub idx: i32,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub seek: f64,
    pub no_speech_prob: f64,
}

impl From<Segment> for SegmentResponse {
    fn from(segment: Segment) -> Self {
        Self {
            idx: segment.idx,
            start: segment.start_sec,
            end: segment.end_sec,
            text: segment.text,
            seek: segment.seek_off,
            no_speech_prob: segment.no_speech_prob,
        }
    }
}

/// One tweet of the generated thread, display-annotated
#[derive(Debug, Serialize)]
pub struct TweetView {
    pub text: String,
    pub char_count: usize,
    pub over_limit: bool,
}

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub space_id: String,
    pub tweets: Vec<TweetView>,
    pub share_url: String,
    pub generated_at: DateTime<Utc>,
}

impl From<TwitterThread> for ThreadResponse {
    fn from(thread: TwitterThread) -> Self {
        let share_url = threads::share_intent_url(&thread.tweets);
        let tweets = thread
            .tweets
            .into_iter()
            .map(|text| TweetView {
                char_count: threads::char_count(&text),
                over_limit: threads::over_limit(&text),
                text,
            })
            .collect();

        Self {
            space_id: thread.space_id,
            tweets,
            share_url,
            generated_at: thread.generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_response_flags_long_tweets() {
        let thread = TwitterThread {
            space_id: "1nAKEgjnRRkJL".to_string(),
            version: "v1".to_string(),
            tweets: vec!["x".repeat(280), "x".repeat(281)],
            generated_at: Utc::now(),
        };

        let response = ThreadResponse::from(thread);
        assert_eq!(response.tweets[0].char_count, 280);
        assert!(!response.tweets[0].over_limit);
        assert!(response.tweets[1].over_limit);
        assert!(response.share_url.starts_with("https://x.com/intent/tweet?text="));
    }
}
