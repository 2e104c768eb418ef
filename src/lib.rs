//*** START FILE: src/lib.rs ***//

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod types;

pub use backend::{read_local_file, HttpBackend, TextBackend};
pub use config::Config;
pub use controller::{Dispatch, UiController};
pub use error::ClientError;

//*** END FILE: src/lib.rs ***//
