//! Server-Sent-Events frame decoding.

pub mod decoder;

pub use decoder::{FrameEvent, SseDecoder};
