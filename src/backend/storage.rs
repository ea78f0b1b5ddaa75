use serde::Deserialize;

use super::SupabaseClient;
use crate::core::VocadexError;

/// Bucket holding every uploaded pronunciation asset.
pub const AUDIO_BUCKET: &str = "vocab-audio";

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// A missing bucket is a setup problem, not a transient failure, and is
/// reported as one.
fn is_bucket_missing(message: &str) -> bool {
    message.to_ascii_lowercase().contains("bucket")
}

/// Upload raw bytes under `path`; returns the object path on success.
pub async fn upload_blob(
    client: &SupabaseClient,
    bucket: &str,
    path: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<String, VocadexError> {
    let url = client.endpoint(&format!("/storage/v1/object/{}/{}", bucket, path));
    let response = client
        .authed(client.http().post(&url))
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(bytes)
        .send()
        .await?;

    if response.status().is_success() {
        return Ok(path.to_string());
    }

    let status = response.status();
    let message = match response.json::<StorageErrorBody>().await {
        Ok(body) => body
            .message
            .or(body.error)
            .unwrap_or_else(|| format!("HTTP {}", status)),
        Err(_) => format!("HTTP {}", status),
    };

    if is_bucket_missing(&message) {
        return Err(VocadexError::BucketNotFound(bucket.to_string()));
    }

    Err(VocadexError::backend(format!("Upload failed: {}", message)))
}

/// Public object URL. String construction only; no request involved.
pub fn public_url(client: &SupabaseClient, bucket: &str, path: &str) -> String {
    client.endpoint(&format!("/storage/v1/object/public/{}/{}", bucket, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendSettings;

    #[test]
    fn test_bucket_missing_classifier() {
        assert!(is_bucket_missing("Bucket not found"));
        assert!(is_bucket_missing("The resource bucket does not exist"));
        assert!(!is_bucket_missing("row violates row-level security policy"));
    }

    #[test]
    fn test_public_url_shape() {
        let settings = BackendSettings {
            base_url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        };
        let client = SupabaseClient::new(&settings).unwrap();

        assert_eq!(
            public_url(&client, AUDIO_BUCKET, "audio/1714560000000_a1b2c3.mp3"),
            "https://example.supabase.co/storage/v1/object/public/vocab-audio/audio/1714560000000_a1b2c3.mp3"
        );
    }
}
