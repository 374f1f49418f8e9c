use std::collections::HashMap;

use axum::extract::Multipart;

use crate::{error::AppError, media::TempUpload};

/// A fully drained multipart form: text fields plus file parts spooled to
/// temp files. Empty file parts (a submitted but blank file input) are
/// treated as absent.
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, TempUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = HashMap::new();
        let mut files = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| AppError::bad_request(format!("Malformed multipart body: {err}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await.map_err(|err| {
                    AppError::bad_request(format!("Failed to read uploaded file: {err}"))
                })?;
                if bytes.is_empty() {
                    continue;
                }
                files.insert(name, TempUpload::from_bytes(&bytes, &file_name)?);
            } else {
                let text = field.text().await.map_err(|err| {
                    AppError::bad_request(format!("Failed to read form field: {err}"))
                })?;
                fields.insert(name, text);
            }
        }

        Ok(Self { fields, files })
    }

    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn take_file(&mut self, name: &str) -> Option<TempUpload> {
        self.files.remove(name)
    }
}
