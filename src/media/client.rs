use serde::Deserialize;

use crate::config::MediaConfig;

use super::TempUpload;

/// Client for the external media host. Upload and delete degrade to
/// `None`/`false` on failure — callers decide whether that is fatal.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    result: String,
}

impl MediaClient {
    pub fn new(cfg: &MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
        }
    }

    pub async fn upload(&self, file: &TempUpload) -> Option<UploadedMedia> {
        let bytes = match tokio::fs::read(file.path()).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read spooled upload");
                return None;
            }
        };

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file.file_name().to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .multipart(form)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<UploadResponse>().await {
                    Ok(body) => {
                        tracing::info!(url = %body.url, "media uploaded");
                        Some(UploadedMedia { url: body.url })
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "media host returned an unreadable upload response");
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "media upload rejected");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "media upload failed");
                None
            }
        }
    }

    /// Deletes a previously uploaded asset, addressed by the public id
    /// derived from its URL. Returns true only when the host confirms.
    pub async fn delete(&self, url: &str) -> bool {
        let Some(public_id) = public_id(url) else {
            return false;
        };

        let response = self
            .http
            .post(format!("{}/destroy", self.base_url))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .form(&[("public_id", public_id.as_str())])
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<DeleteResponse>().await {
                    Ok(body) if body.result == "ok" => {
                        tracing::info!(public_id = %public_id, "media deleted");
                        true
                    }
                    Ok(body) => {
                        tracing::warn!(result = %body.result, "media delete not confirmed");
                        false
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "media host returned an unreadable delete response");
                        false
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "media delete rejected");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "media delete failed");
                false
            }
        }
    }
}

/// The hosted asset id is the file stem of the URL's last path segment.
fn public_id(url: &str) -> Option<String> {
    let last = url.rsplit('/').next()?;
    let last = last.split(['?', '#']).next()?;
    let stem = std::path::Path::new(last).file_stem()?;
    let stem = stem.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}
