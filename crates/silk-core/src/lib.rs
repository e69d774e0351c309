//! Business logic for the SILK loan-origination assistant.
//!
//! Everything here is infrastructure-free: the intent classifier and prompt
//! composer, the SSE frame decoder and its drive loop, the chat session
//! state machine, the repository traits implemented in `silk-infra`, and
//! the EMI/sanction calculators.

pub mod agent;
pub mod chat;
pub mod loan;
pub mod sse;
