//! Concrete infrastructure for the SILK assistant: the upstream gateway
//! client and the SQLite-backed stores.

pub mod gateway;
pub mod sqlite;
