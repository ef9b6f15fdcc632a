//! Signed download URLs for space audio recordings.

use crate::constants::{AUDIO_BUCKET, SIGNED_URL_EXPIRY_SECS};

/// Resolve a short-lived download URL for the stored `spaces/{id}.mp3` object.
pub async fn audio_download_url(
    space_id: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let object_path = format!("spaces/{}.mp3", space_id);

    let client = cloud_storage::Client::default();
    let object = client.object().read(AUDIO_BUCKET, &object_path).await?;

    Ok(object.download_url(SIGNED_URL_EXPIRY_SECS)?)
}
