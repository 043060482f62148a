//! Library target for the `replay-cli` package.
//!
//! The primary deliverable of this package is the `replay` CLI binary
//! (`src/main.rs`). This library exists so CI can run
//! `cargo test -p replay-cli --doc` for feature/doctype validation.

#[doc(hidden)]
pub use replay_parser;
