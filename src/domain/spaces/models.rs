//! Space record models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::types::Json;
use sqlx::{Decode, Encode, Postgres, Type};

/// Transcription lifecycle state, set by the backend only. This service never
/// transitions it; it reads and reacts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranscriptionStatus {
    Started,
    Processing,
    Failed,
    Ended,
    ShortEnded,
}

impl TranscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionStatus::Started => "STARTED",
            TranscriptionStatus::Processing => "PROCESSING",
            TranscriptionStatus::Failed => "FAILED",
            TranscriptionStatus::Ended => "ENDED",
            TranscriptionStatus::ShortEnded => "SHORT_ENDED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "STARTED" => TranscriptionStatus::Started,
            "PROCESSING" => TranscriptionStatus::Processing,
            "FAILED" => TranscriptionStatus::Failed,
            "ENDED" => TranscriptionStatus::Ended,
            "SHORT_ENDED" => TranscriptionStatus::ShortEnded,
            _ => TranscriptionStatus::Started,
        }
    }
}

// sqlx Type/Decode/Encode for TranscriptionStatus to enable FromRow on Space
impl Type<Postgres> for TranscriptionStatus {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for TranscriptionStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <String as Decode<Postgres>>::decode(value)?;
        Ok(TranscriptionStatus::from_str(&s))
    }
}

impl Encode<'_, Postgres> for TranscriptionStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <String as Encode<Postgres>>::encode_by_ref(&self.as_str().to_owned(), buf)
    }
}

/// Source modality of a space recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    Recorded,
    Live,
}

impl SpaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceKind::Recorded => "recorded",
            SpaceKind::Live => "live",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "live" => SpaceKind::Live,
            _ => SpaceKind::Recorded,
        }
    }
}

impl Type<Postgres> for SpaceKind {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for SpaceKind {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <String as Decode<Postgres>>::decode(value)?;
        Ok(SpaceKind::from_str(&s))
    }
}

impl Encode<'_, Postgres> for SpaceKind {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <String as Encode<Postgres>>::encode_by_ref(&self.as_str().to_owned(), buf)
    }
}

/// A host or speaker listed on a space. Field names follow the stored
/// documents, which the backend writes from the upstream space metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub display_name: String,
    pub twitter_screen_name: String,
    pub avatar_url: String,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

/// One recorded space session and its transcription lifecycle
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Space {
    pub space_id: String,
    pub transcription_status: TranscriptionStatus,
    pub kind: SpaceKind,
    pub title: String,
    pub admins: Json<Vec<Participant>>,
    pub speakers: Json<Vec<Participant>>,
    pub transcript_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Time-aligned transcript chunk, ordered by `idx` within a space
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Segment {
    pub idx: i32,
    pub start_sec: f64,
    pub end_sec: f64,
    pub text: String,
    pub seek_off: f64,
    pub no_speech_prob: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["STARTED", "PROCESSING", "FAILED", "ENDED", "SHORT_ENDED"] {
            assert_eq!(TranscriptionStatus::from_str(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_falls_back() {
        assert_eq!(
            TranscriptionStatus::from_str("REWINDING"),
            TranscriptionStatus::Started
        );
    }
}
