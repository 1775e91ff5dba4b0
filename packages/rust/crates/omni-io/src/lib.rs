#![allow(clippy::doc_markdown)]

//! omni-io - Safe file I/O for the Omni scaffolder
//!
//! Reads source files with size limits and binary detection, writes them back
//! atomically, and stages template assets concurrently.
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & strict decoding
//! ├── sync.rs     # Synchronous read / atomic write
//! └── async_io.rs # Asynchronous read / concurrent copy (Tokio)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_io::{read_text_safe, write_text_atomic};
//!
//! let content = read_text_safe("src/pages/_app.tsx", 1024 * 1024)?;
//! write_text_atomic("src/pages/_app.tsx", &content)?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod async_io;
mod detect;
mod error;
mod sync;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use async_io::{copy_all_async, copy_file_async, read_text_safe_async};
pub use error::IoError;
pub use sync::{read_text_safe, write_text_atomic};

// Re-export detection utilities for advanced use
pub use detect::{decode_buffer, is_binary};
