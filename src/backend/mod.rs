//! Calls into the text service: upload, sample, preprocess, augment.

mod http;

pub use http::HttpBackend;

use crate::error::ClientError;
use std::fs;
use std::path::Path;
use crate::types::wire::{AugmentOptions, PreprocessOptions, SampleRequest, Segment, TextResponse, UploadResponse};

pub trait TextBackend: Send + Sync {
    /// Stores `bytes` on the server and returns the path to sample from.
    fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError>;

    fn sample(&self, request: &SampleRequest) -> Result<Segment, ClientError>;

    fn preprocess(&self, text: &str, opts: &PreprocessOptions) -> Result<String, ClientError>;

    fn augment(&self, text: &str, opts: &AugmentOptions) -> Result<String, ClientError>;
}

/// Reads a local file for upload, returning the name the server should store it under.
pub fn read_local_file(path: &Path) -> Result<(String, Vec<u8>), ClientError> {
    let io_error = |source| ClientError::Io { path: path.display().to_string(), source };
    let bytes = fs::read(path).map_err(io_error)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.txt".to_string());
    Ok((file_name, bytes))
}

fn check_status(status: u16) -> Result<(), ClientError> {
    if status >= 400 {
        return Err(ClientError::Status(status));
    }
    Ok(())
}

pub(crate) fn parse_upload_response(status: u16, body: &str) -> Result<String, ClientError> {
    check_status(status)?;
    let parsed: UploadResponse = serde_json::from_str(body)?;
    parsed.file_path.ok_or(ClientError::MissingField("file_path"))
}

pub(crate) fn parse_sample_response(status: u16, body: &str) -> Result<Segment, ClientError> {
    check_status(status)?;
    Ok(serde_json::from_str(body)?)
}

/// Status first, then the `error` field, then `text`. An empty `error` string is no error.
pub(crate) fn parse_text_response(status: u16, body: &str) -> Result<String, ClientError> {
    check_status(status)?;
    let parsed: TextResponse = serde_json::from_str(body)?;
    match parsed.error {
        Some(message) if !message.is_empty() => Err(ClientError::Backend(message)),
        _ => parsed.text.ok_or(ClientError::MissingField("text")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_is_read_with_its_name() {
        let path = std::env::temp_dir().join(format!("textaug-read-{}.txt", std::process::id()));
        fs::write(&path, b"To be, or not to be").unwrap();
        let (name, bytes) = read_local_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(name, path.file_name().unwrap().to_string_lossy());
        assert_eq!(bytes, b"To be, or not to be");
    }

    #[test]
    fn missing_local_file_is_an_io_error() {
        let path = std::env::temp_dir().join("textaug-definitely-missing.txt");
        let err = read_local_file(&path).unwrap_err();
        assert!(matches!(err, ClientError::Io { .. }));
        assert!(err.to_string().contains("textaug-definitely-missing.txt"));
    }

    #[test]
    fn text_response_success() {
        assert_eq!(parse_text_response(200, r#"{"text": "The quick fox ."}"#).unwrap(), "The quick fox .");
    }

    #[test]
    fn error_field_wins_over_text() {
        let err = parse_text_response(200, r#"{"error": "boom", "text": "ignored"}"#).unwrap_err();
        assert_eq!(err.display_message(), "Error: boom. Please try again.");
    }

    #[test]
    fn empty_error_field_is_ignored() {
        assert_eq!(parse_text_response(200, r#"{"error": "", "text": "ok"}"#).unwrap(), "ok");
    }

    #[test]
    fn failing_status_is_reported_before_body() {
        let err = parse_text_response(500, r#"{"detail": "Internal Server Error"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Status(500)));
        let err = parse_text_response(404, "not json at all").unwrap_err();
        assert!(matches!(err, ClientError::Status(404)));
    }

    #[test]
    fn missing_text_is_an_error() {
        let err = parse_text_response(200, "{}").unwrap_err();
        assert!(matches!(err, ClientError::MissingField("text")));
    }

    #[test]
    fn upload_needs_a_file_path() {
        assert_eq!(parse_upload_response(200, r#"{"file_path": "uploads/a.txt"}"#).unwrap(), "uploads/a.txt");
        assert!(matches!(parse_upload_response(200, "{}"), Err(ClientError::MissingField("file_path"))));
        assert!(matches!(parse_upload_response(500, "{}"), Err(ClientError::Status(500))));
    }

    #[test]
    fn sample_with_null_text_fails_to_decode() {
        let err = parse_sample_response(200, r#"{"segment_type": null, "segment_id": null, "text": null}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
