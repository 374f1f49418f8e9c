use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::AppError;

/// A received upload spooled to a named temp file. The local file is removed
/// when the value drops, whether or not the remote upload went through.
pub struct TempUpload {
    file: NamedTempFile,
    file_name: String,
}

impl TempUpload {
    pub fn from_bytes(bytes: &[u8], file_name: &str) -> Result<Self, AppError> {
        let mut file = NamedTempFile::new()
            .map_err(|err| AppError::internal(format!("Failed to create temp file: {err}")))?;
        file.write_all(bytes)
            .map_err(|err| AppError::internal(format!("Failed to write temp file: {err}")))?;
        Ok(Self {
            file,
            file_name: file_name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}
