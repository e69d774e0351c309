//! Shared domain types for the SILK loan-origination assistant.
//!
//! This crate has no I/O and no async code: it defines the message and
//! conversation shapes, the intent labels, the upstream gateway wire types
//! and error taxonomy, and the loan/EMI domain types shared by every other
//! crate in the workspace.

pub mod conversation;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod loan;
pub mod message;
pub mod profile;
