//! Shared utility functions.
//!
//! This module contains utility functions that are used across multiple
//! modules in the downl crate.
//!
//! - [`content_length`] - Expected body length from HTTP response headers
//!
//! # Examples
//!
//! ## Parsing Content-Range Headers
//!
//! ```rust
//! use downl::utils::parse_content_range_total;
//!
//! // Extract total size from a Content-Range header
//! let header_value = "bytes 0-1023/2048";
//! if let Some(total_size) = parse_content_range_total(header_value) {
//!     println!("Total file size: {} bytes", total_size);
//! }
//! ```

pub mod content_length;

// Re-export commonly used utilities
pub use content_length::{expected_length, parse_content_range_total};
