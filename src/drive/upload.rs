use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::token::TokenCache;
use super::{DriveError, Uploader};
use crate::config::Config;

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct CreatedFile {
    id: String,
}

/// Google Drive v3 client. Refreshes the cached token when it is about to
/// expire, then creates the file with a single multipart/related request.
pub struct DriveClient {
    http: reqwest::Client,
    upload_url: String,
    cache: TokenCache,
}

impl DriveClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: config.drive_upload_url.clone(),
            cache: TokenCache::new(&config.token_cache_path),
        }
    }

    async fn access_token(&self) -> Result<String, DriveError> {
        let mut creds = self.cache.load()?;
        if !creds.needs_refresh() {
            return Ok(creds.access_token);
        }

        let refresh_token = creds.refresh_token.clone().ok_or_else(|| {
            DriveError::Credentials("cached token expired and no refresh token is present".into())
        })?;

        tracing::debug!("cached access token expired, refreshing");
        let resp = self
            .http
            .post(&creds.token_uri)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DriveError::Refresh(format!("{status}: {body}")));
        }

        let refreshed: RefreshResponse = resp.json().await?;
        creds.access_token = refreshed.access_token;
        creds.expiry = Some(Utc::now() + Duration::seconds(refreshed.expires_in));
        self.cache.save(&creds)?;
        Ok(creds.access_token)
    }
}

/// Drive's simple multipart upload: a JSON metadata part naming the file,
/// then the media part, inside one multipart/related body.
fn multipart_related(boundary: &str, file_name: &str, mime_type: &str, bytes: &[u8]) -> Vec<u8> {
    let metadata = serde_json::json!({ "name": file_name });
    let mut body = Vec::with_capacity(bytes.len() + 512);
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());
    body
}

#[async_trait::async_trait]
impl Uploader for DriveClient {
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, DriveError> {
        let token = self.access_token().await?;

        let boundary = format!("slip_{}", Uuid::new_v4().to_simple());
        let body = multipart_related(&boundary, file_name, mime_type, &bytes);

        let resp = self
            .http
            .post(&self.upload_url)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .bearer_auth(&token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(DriveError::Api { status, message });
        }

        let created: CreatedFile = resp.json().await?;
        tracing::info!(file = %file_name, id = %created.id, "uploaded slip to drive");
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_body_carries_metadata_then_media() {
        let body = multipart_related("b42", "Alice_007_2024-03-15.txt", "text/plain", b"Name: Alice\n");
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with("--b42\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n"));
        assert!(text.contains(r#"{"name":"Alice_007_2024-03-15.txt"}"#));
        assert!(text.contains("--b42\r\nContent-Type: text/plain\r\n\r\nName: Alice\n"));
        assert!(text.ends_with("\r\n--b42--"));
    }
}
