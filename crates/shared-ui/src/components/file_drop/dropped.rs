/// A file read from the drop zone or the file picker.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedFile {
    pub name: String,
    /// As reported by the browser; `None` when it reported nothing.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DroppedFile {
    /// Browsers report unknown types as an empty string, which is folded
    /// into `None`.
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type
                .map(|ct| ct.trim().to_string())
                .filter(|ct| !ct.is_empty()),
            bytes,
        }
    }
}
