//! File type sniffing.
//!
//! Two independent sources can suggest an extension for a payload that was
//! served without one:
//!
//! - [`file_type`] - magic numbers found in the bytes themselves
//! - [`mime`] - the `Content-Type` the server declared
//!
//! The byte signature is the stronger signal and is always consulted first
//! by the filename resolver.
//!
//! # Examples
//!
//! ```rust
//! use downl::sniff::{extension_from_bytes, extension_from_mime};
//!
//! assert_eq!(extension_from_bytes(b"%PDF-1.7\n"), Some("pdf"));
//! assert_eq!(extension_from_mime("application/zip"), Some("zip"));
//! // `image/jpeg` is served as jpg, jpeg and jpe: no guess is made.
//! assert_eq!(extension_from_mime("image/jpeg"), None);
//! ```

pub mod file_type;
pub mod mime;

pub use file_type::extension_from_bytes;
pub use mime::{extension_from_mime, extensions_for_mime};
