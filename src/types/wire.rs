//*** START FILE: src/types/wire.rs ***//
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PreprocessOptions {
    pub remove_punctuation: bool,
    pub tokenize: bool,
    pub pad_length: Option<i64>,
}

impl PreprocessOptions {
    /// True when at least one option would change the text. A zero pad length counts as off.
    pub fn is_active(&self) -> bool {
        self.remove_punctuation || self.tokenize || is_truthy(self.pad_length)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AugmentOptions {
    pub random_insertion: Option<i64>,
    pub synonym_replacement: Option<i64>,
}

impl AugmentOptions {
    pub fn is_active(&self) -> bool {
        is_truthy(self.random_insertion) || is_truthy(self.synonym_replacement)
    }
}

fn is_truthy(count: Option<i64>) -> bool {
    matches!(count, Some(n) if n != 0)
}

/// A sampled passage. Fields the backend adds beyond the known ones are kept as-is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }
}

/// Body of `POST /process`. The window only ever fills `file_path` and `n_words`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SampleRequest {
    pub file_path: String,
    pub n_words: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocess_opts: Option<PreprocessOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub augment_opts: Option<AugmentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

impl SampleRequest {
    pub fn new(file_path: impl Into<String>, n_words: u32) -> Self {
        Self { file_path: file_path.into(), n_words, ..Default::default() }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PreprocessRequest<'a> {
    pub text: &'a str,
    pub preprocess_opts: &'a PreprocessOptions,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AugmentRequest<'a> {
    pub text: &'a str,
    pub augment_opts: &'a AugmentOptions,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UploadResponse {
    pub file_path: Option<String>,
}

/// `{text}` on success, `{error}` when the backend refused.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TextResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preprocess_body_keeps_null_pad_length() {
        let opts = PreprocessOptions { remove_punctuation: false, tokenize: true, pad_length: None };
        let body = serde_json::to_value(PreprocessRequest { text: "The quick fox.", preprocess_opts: &opts }).unwrap();
        assert_eq!(
            body,
            json!({
                "text": "The quick fox.",
                "preprocess_opts": {"remove_punctuation": false, "tokenize": true, "pad_length": null}
            })
        );
    }

    #[test]
    fn augment_body_keeps_null_counts() {
        let opts = AugmentOptions { random_insertion: Some(2), synonym_replacement: None };
        let body = serde_json::to_value(AugmentRequest { text: "a b", augment_opts: &opts }).unwrap();
        assert_eq!(
            body,
            json!({"text": "a b", "augment_opts": {"random_insertion": 2, "synonym_replacement": null}})
        );
    }

    #[test]
    fn plain_sample_request_sends_only_path_and_size() {
        let body = serde_json::to_value(SampleRequest::new("uploads/a.txt", 100)).unwrap();
        assert_eq!(body, json!({"file_path": "uploads/a.txt", "n_words": 100}));
    }

    #[test]
    fn segment_keeps_unknown_fields() {
        let segment: Segment = serde_json::from_value(json!({
            "text": "To be",
            "segment_type": "CHARACTER",
            "segment_id": "HAMLET",
            "source": "folio"
        }))
        .unwrap();
        assert_eq!(segment.text, "To be");
        assert_eq!(segment.segment_type.as_deref(), Some("CHARACTER"));
        assert_eq!(segment.segment_id.as_deref(), Some("HAMLET"));
        assert_eq!(segment.extra.get("source"), Some(&json!("folio")));
    }

    #[test]
    fn zero_counts_are_inactive() {
        assert!(!PreprocessOptions { pad_length: Some(0), ..Default::default() }.is_active());
        assert!(PreprocessOptions { pad_length: Some(-3), ..Default::default() }.is_active());
        assert!(!AugmentOptions { random_insertion: Some(0), synonym_replacement: None }.is_active());
        assert!(AugmentOptions { random_insertion: None, synonym_replacement: Some(1) }.is_active());
        assert!(!AugmentOptions::default().is_active());
    }
}
//*** END FILE: src/types/wire.rs ***//
