//! json-exporter server library entry.
//!
//! This crate wires config loading, the gauge registry, the document source,
//! the polling loop and the HTTP endpoints around the core mapping engine. It
//! is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod obs;
pub mod ops;
pub mod poller;
pub mod router;
pub mod source;
