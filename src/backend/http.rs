use super::{parse_sample_response, parse_text_response, parse_upload_response, TextBackend};
use crate::config::Config;
use crate::error::ClientError;
use crate::types::wire::{AugmentOptions, AugmentRequest, PreprocessOptions, PreprocessRequest, SampleRequest, Segment};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;

/// Talks to the text service over plain HTTP. One instance is shared by all worker threads.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        // reqwest's blocking client times out after 30s unless told otherwise.
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RequestBuilder {
        self.client.post(self.url(path)).json(body)
    }

    fn send(&self, request: RequestBuilder) -> Result<(u16, String), ClientError> {
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "backend responded");
        Ok((status, body))
    }
}

impl TextBackend for HttpBackend {
    fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let (status, body) = self.send(self.client.post(self.url("/upload")).multipart(form))?;
        parse_upload_response(status, &body)
    }

    fn sample(&self, request: &SampleRequest) -> Result<Segment, ClientError> {
        let (status, body) = self.send(self.post_json("/process", request))?;
        parse_sample_response(status, &body)
    }

    fn preprocess(&self, text: &str, opts: &PreprocessOptions) -> Result<String, ClientError> {
        let request = PreprocessRequest { text, preprocess_opts: opts };
        let (status, body) = self.send(self.post_json("/preprocess", &request))?;
        parse_text_response(status, &body)
    }

    fn augment(&self, text: &str, opts: &AugmentOptions) -> Result<String, ClientError> {
        let request = AugmentRequest { text, augment_opts: opts };
        let (status, body) = self.send(self.post_json("/augment", &request))?;
        parse_text_response(status, &body)
    }
}
