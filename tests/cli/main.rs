//! CLI integration tests for markout.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (render, tokens)
//! - Stdin/stdout handling
//! - Exit codes
//! - File I/O operations
//! - Error handling

mod common;
mod render;
mod tokens;
