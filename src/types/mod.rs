pub mod wire;

pub use wire::{AugmentOptions, PreprocessOptions, SampleRequest, Segment};
