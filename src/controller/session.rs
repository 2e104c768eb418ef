use crate::types::wire::Segment;

/// What the window remembers between clicks. Both fields are replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub current_file_path: Option<String>,
    /// Preprocessing and augmentation always start from this text, never from each other's output.
    pub current_segment: Option<Segment>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment_text(&self) -> Option<&str> {
        self.current_segment.as_ref().map(|s| s.text.as_str())
    }
}
