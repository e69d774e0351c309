//! Interactive terminal chat client.
//!
//! Talks to a running `silk serve` instance: owns the client-side
//! [`silk_core::chat::session::ChatSession`], posts to the relay endpoint,
//! and feeds the response bytes through the SSE decoder so the reply
//! renders incrementally.

mod banner;
mod input;
mod loop_runner;

pub use loop_runner::run_chat_loop;
