//! Session state, form state and the three output regions, plus the handlers that move
//! between them. Backend calls run on worker threads; their results are applied on the
//! thread that owns the controller when it calls [`UiController::poll`].

pub mod form;
pub mod session;

pub use form::{parse_int_prefix, FormState, Visibility};
pub use session::Session;

use crate::backend::TextBackend;
use crate::config::Config;
use crate::error::ClientError;
use crate::types::wire::{SampleRequest, Segment};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

pub const ALERT_NO_FILE: &str = "Please select a file first";
pub const ALERT_NO_SAMPLE: &str = "Please get a sample first";

/// Called from a worker thread after it has queued a completion, so the UI can wake up.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRegions {
    pub original: String,
    pub preprocessed: String,
    pub augmented: String,
}

/// What a handler did with the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    /// Nothing to ask the backend; the region was reset to the original text.
    ShortCircuited,
    /// A precondition failed and the user was alerted. No request was made.
    Alerted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Upload,
    Sample,
    Preprocess,
    Augment,
}

enum Outcome {
    Uploaded(Result<String, ClientError>),
    Sampled(Result<Segment, ClientError>),
    Preprocessed(Result<String, ClientError>),
    Augmented(Result<String, ClientError>),
}

impl Outcome {
    /// The outcome a worker reports when its job died before producing one.
    fn failed(kind: RequestKind, error: ClientError) -> Self {
        match kind {
            RequestKind::Upload => Outcome::Uploaded(Err(error)),
            RequestKind::Sample => Outcome::Sampled(Err(error)),
            RequestKind::Preprocess => Outcome::Preprocessed(Err(error)),
            RequestKind::Augment => Outcome::Augmented(Err(error)),
        }
    }

    fn kind(&self) -> RequestKind {
        match self {
            Outcome::Uploaded(_) => RequestKind::Upload,
            Outcome::Sampled(_) => RequestKind::Sample,
            Outcome::Preprocessed(_) => RequestKind::Preprocess,
            Outcome::Augmented(_) => RequestKind::Augment,
        }
    }
}

struct Completion {
    ticket: u64,
    outcome: Outcome,
}

/// Latest ticket handed out per request kind.
#[derive(Debug, Default)]
struct Tickets {
    upload: u64,
    sample: u64,
    preprocess: u64,
    augment: u64,
}

impl Tickets {
    fn latest(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Upload => self.upload,
            RequestKind::Sample => self.sample,
            RequestKind::Preprocess => self.preprocess,
            RequestKind::Augment => self.augment,
        }
    }

    fn slot(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Upload => &mut self.upload,
            RequestKind::Sample => &mut self.sample,
            RequestKind::Preprocess => &mut self.preprocess,
            RequestKind::Augment => &mut self.augment,
        }
    }

    fn next(&mut self, kind: RequestKind) -> u64 {
        let slot = self.slot(kind);
        *slot += 1;
        *slot
    }

    fn is_latest(&self, kind: RequestKind, ticket: u64) -> bool {
        self.latest(kind) == ticket
    }
}

pub struct UiController<B: TextBackend + 'static> {
    backend: Arc<B>,
    builtin_sample_path: String,
    sample_words: u32,
    discard_stale: bool,
    session: Session,
    pub form: FormState,
    visibility: Visibility,
    regions: OutputRegions,
    alert: Option<String>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
    issued: Tickets,
    waker: Option<Waker>,
}

impl<B: TextBackend + 'static> UiController<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend: Arc::new(backend),
            builtin_sample_path: config.builtin_sample_path.clone(),
            sample_words: config.sample_words,
            discard_stale: config.discard_stale_responses,
            session: Session::new(),
            form: FormState::default(),
            visibility: Visibility::default(),
            regions: OutputRegions::default(),
            alert: None,
            tx,
            rx,
            in_flight: 0,
            issued: Tickets::default(),
            waker: None,
        }
    }

    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn regions(&self) -> &OutputRegions {
        &self.regions
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Acknowledges the pending alert.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // --- checkbox change handlers ---

    pub fn toggle_padding_fields(&mut self) {
        self.visibility.pad_length_group = self.form.pad_text;
    }

    pub fn toggle_augment_params(&mut self) {
        self.visibility.augment_params_group = self.form.random_insertion || self.form.synonym_replacement;
    }

    // --- click handlers ---

    pub fn upload_file(&mut self, file_name: &str, bytes: Vec<u8>) -> Dispatch {
        info!(file_name, bytes = bytes.len(), "uploading file");
        let file_name = file_name.to_string();
        self.dispatch(RequestKind::Upload, move |backend| {
            Outcome::Uploaded(backend.upload(&file_name, bytes))
        });
        Dispatch::Sent
    }

    pub fn use_builtin_sample(&mut self) -> Dispatch {
        self.session.current_file_path = Some(self.builtin_sample_path.clone());
        self.fetch_sample()
    }

    pub fn get_sample(&mut self) -> Dispatch {
        if self.session.current_file_path.is_none() {
            self.raise_alert(ALERT_NO_FILE);
            return Dispatch::Alerted;
        }
        self.fetch_sample()
    }

    pub fn apply_preprocessing(&mut self) -> Dispatch {
        let Some(text) = self.session.segment_text().map(str::to_string) else {
            self.raise_alert(ALERT_NO_SAMPLE);
            return Dispatch::Alerted;
        };
        let opts = self.form.preprocess_options();
        if !opts.is_active() {
            // anything still in flight was asked for before this reset
            self.issued.next(RequestKind::Preprocess);
            self.regions.preprocessed = text;
            return Dispatch::ShortCircuited;
        }
        debug!(?opts, "requesting preprocessing");
        self.dispatch(RequestKind::Preprocess, move |backend| {
            Outcome::Preprocessed(backend.preprocess(&text, &opts))
        });
        Dispatch::Sent
    }

    pub fn apply_augmentation(&mut self) -> Dispatch {
        let Some(text) = self.session.segment_text().map(str::to_string) else {
            self.raise_alert(ALERT_NO_SAMPLE);
            return Dispatch::Alerted;
        };
        let opts = self.form.augment_options();
        if !opts.is_active() {
            self.issued.next(RequestKind::Augment);
            self.regions.augmented = text;
            return Dispatch::ShortCircuited;
        }
        debug!(?opts, "requesting augmentation");
        self.dispatch(RequestKind::Augment, move |backend| {
            Outcome::Augmented(backend.augment(&text, &opts))
        });
        Dispatch::Sent
    }

    // --- completions ---

    /// Applies every completion that has arrived. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    self.apply(completion);
                    applied = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Blocks until nothing is in flight, including follow-up requests such as the sample
    /// fetched after an upload.
    pub fn wait_idle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv() {
                Ok(completion) => self.apply(completion),
                Err(_) => break,
            }
        }
    }

    fn raise_alert(&mut self, message: &str) {
        info!(alert = message, "blocking user until acknowledged");
        self.alert = Some(message.to_string());
    }

    fn fetch_sample(&mut self) -> Dispatch {
        let Some(file_path) = self.session.current_file_path.clone() else {
            self.raise_alert(ALERT_NO_FILE);
            return Dispatch::Alerted;
        };
        let request = SampleRequest::new(file_path, self.sample_words);
        debug!(file_path = %request.file_path, n_words = request.n_words, "requesting sample");
        self.dispatch(RequestKind::Sample, move |backend| Outcome::Sampled(backend.sample(&request)));
        Dispatch::Sent
    }

    fn dispatch<F>(&mut self, kind: RequestKind, job: F)
    where
        F: FnOnce(&B) -> Outcome + Send + 'static,
    {
        let ticket = self.issued.next(kind);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            // A panicking job still has to report, or `in_flight` never drains.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(&backend))).unwrap_or_else(|_| {
                error!(?kind, "request worker panicked");
                Outcome::failed(kind, ClientError::WorkerPanicked)
            });
            // the controller may already be gone
            let _ = tx.send(Completion { ticket, outcome });
            if let Some(wake) = waker {
                wake();
            }
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let kind = completion.outcome.kind();
        if self.discard_stale && !self.issued.is_latest(kind, completion.ticket) {
            debug!(?kind, ticket = completion.ticket, "dropping stale response");
            return;
        }

        match completion.outcome {
            Outcome::Uploaded(Ok(file_path)) => {
                info!(%file_path, "upload stored");
                self.session.current_file_path = Some(file_path);
                self.fetch_sample();
            }
            Outcome::Uploaded(Err(e)) => {
                error!(error = %e, "Error uploading file");
            }
            Outcome::Sampled(Ok(segment)) => {
                // results for the previous segment must not land next to this one
                self.issued.next(RequestKind::Preprocess);
                self.issued.next(RequestKind::Augment);
                self.regions.original = segment.text.clone();
                self.regions.preprocessed = segment.text.clone();
                self.regions.augmented = segment.text.clone();
                self.session.current_segment = Some(segment);
            }
            Outcome::Sampled(Err(e)) => {
                error!(error = %e, "Error getting new sample");
            }
            Outcome::Preprocessed(result) => {
                self.regions.preprocessed = render_result(result);
            }
            Outcome::Augmented(result) => {
                self.regions.augmented = render_result(result);
            }
        }
    }
}

fn render_result(result: Result<String, ClientError>) -> String {
    result.unwrap_or_else(|e| {
        error!(error = %e, "Error processing text");
        e.display_message()
    })
}
