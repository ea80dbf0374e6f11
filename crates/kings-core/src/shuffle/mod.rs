pub mod trace;

pub use trace::{ShuffleTrace, encode_trace, replay, verify};
