//! Top-level facade crate for json-exporter.
//!
//! Re-exports the mapping engine and the server library so users can depend on a single crate.

pub mod core {
    pub use json_exporter_core::*;
}

pub mod server {
    pub use json_exporter_server::*;
}
