use serde::{Deserialize, Serialize};

/// Messages shown after each upload.
pub const FILE_UPLOAD_SUCCESS: &str = "File uploaded successfuly!";
pub const FILE_UPLOAD_ERROR: &str = "Error occured during file upload!";

/// A locally chosen file waiting to be uploaded with the shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Files queued for upload, unique by exact (case-sensitive) name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PendingFiles {
    files: Vec<PendingFile>,
}

impl PendingFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add dropped files. A dropped file replaces a queued one of the same
    /// name; queued files that were not re-dropped keep their position
    /// ahead of the new ones.
    pub fn drop_files(&mut self, dropped: Vec<PendingFile>) {
        self.files
            .retain(|existing| !dropped.iter().any(|f| f.name == existing.name));
        for file in dropped {
            if let Some(pos) = self.files.iter().position(|f| f.name == file.name) {
                self.files[pos] = file;
            } else {
                self.files.push(file);
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.files.retain(|f| f.name != name);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingFile> {
        self.files.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    pub fn to_vec(&self) -> Vec<PendingFile> {
        self.files.clone()
    }
}

/// Best-effort content type from a file extension.
pub fn mime_from_filename(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
    .to_string()
}
