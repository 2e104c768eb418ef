use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, info, Level};

use textaug_gui::config::{load_config_or_default, DEFAULT_CONFIG_FILE};
use textaug_gui::types::wire::{AugmentOptions, PreprocessOptions, SampleRequest, Segment};
use textaug_gui::{read_local_file, HttpBackend, TextBackend};

/// Fetch text samples from the preprocessing service, optionally preprocessed and
/// augmented on the server.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the text file as the server knows it
    #[arg(required_unless_present = "upload", conflicts_with = "upload")]
    file_path: Option<String>,

    /// Upload this local file first and sample from the stored copy
    #[arg(long)]
    upload: Option<PathBuf>,

    /// Number of words to return
    #[arg(long, default_value_t = 100)]
    words: u32,

    /// Number of samples to show
    #[arg(long, default_value_t = 1)]
    samples: u32,

    /// Remove punctuation
    #[arg(long)]
    remove_punctuation: bool,

    /// Tokenize text
    #[arg(long)]
    tokenize: bool,

    /// Pad or truncate to this many tokens
    #[arg(long)]
    pad_length: Option<i64>,

    /// Number of random insertions
    #[arg(long)]
    random_insertion: Option<i64>,

    /// Number of synonym replacements
    #[arg(long)]
    synonym_replacement: Option<i64>,

    /// Fetch this segment (e.g. P3, L12 or a character name) instead of a random one
    #[arg(long)]
    segment_id: Option<String>,

    /// Base URL of the service; overrides the config file
    #[arg(long)]
    server: Option<String>,

    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Log requests and responses
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            remove_punctuation: self.remove_punctuation,
            tokenize: self.tokenize,
            pad_length: self.pad_length,
        }
    }

    fn augment_options(&self) -> AugmentOptions {
        AugmentOptions {
            random_insertion: self.random_insertion,
            synonym_replacement: self.synonym_replacement,
        }
    }

    fn sample_request(&self, file_path: &str) -> SampleRequest {
        let preprocess = self.preprocess_options();
        let augment = self.augment_options();
        SampleRequest {
            file_path: file_path.to_string(),
            n_words: self.words,
            preprocess_opts: preprocess.is_active().then_some(preprocess),
            augment_opts: augment.is_active().then_some(augment),
            segment_id: self.segment_id.clone(),
        }
    }
}

fn format_sample(index: u32, segment: &Segment) -> String {
    format!(
        "\nSample {}:\nType: {}\nID: {}\nText: {}\n{}",
        index,
        segment.segment_type.as_deref().unwrap_or("None"),
        segment.segment_id.as_deref().unwrap_or("None"),
        segment.text,
        "-".repeat(80)
    )
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = load_config_or_default(&args.config)?;
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    let backend = HttpBackend::new(&config)?;
    debug!(server = backend.base_url(), "using backend");

    let file_path = match (&args.upload, &args.file_path) {
        (Some(local), _) => {
            let (file_name, bytes) = read_local_file(local)?;
            let stored = backend.upload(&file_name, bytes)?;
            info!(local = %local.display(), stored = %stored, "uploaded");
            stored
        }
        (None, Some(path)) => path.clone(),
        (None, None) => return Err("either FILE_PATH or --upload is required".into()),
    };

    let request = args.sample_request(&file_path);
    for i in 0..args.samples {
        let segment = backend.sample(&request)?;
        println!("{}", format_sample(i + 1, &segment));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
