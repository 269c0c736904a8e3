//! # Overprint - Overlay Form Filler
//!
//! Overprint fills scanned carrier application forms by laying text over
//! the page images at fixed positions. It provides:
//!
//! - **Templates**: page images, side-panel inputs, and field positions per form
//! - **Overlay rendering**: the scaled on-screen preview, with a debug picker
//! - **Print composition**: the same layout in millimetres on A4 pages
//! - **Room rotation**: a persisted address counter for the LG Story form
//!
//! ## Quick Start
//!
//! ```
//! use overprint::{
//!     form::FormInput,
//!     print::PrintComposer,
//!     templates::{self, FormContext},
//! };
//!
//! let template = templates::by_id("lg-hanpass").unwrap();
//! let ctx = FormContext::new("2025.12.02", None);
//! let input = FormInput::new()
//!     .with("applicationType", "transfer")
//!     .with("phoneNumber", "01012345678")
//!     .normalize(template.inputs())
//!     .or_defaults(&template.defaults(&ctx));
//!
//! let resolved = template.resolve(&input);
//! let html = PrintComposer::new(&resolved).compose(&["/pages/lg/hanpass_prepaid.jpg".to_string()]);
//! assert!(html.contains("210mm"));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`templates`] | Registered carrier forms |
//! | [`form`] | Side-panel inputs, form state, focus order |
//! | [`schema`] | Field positions, values, variant composition |
//! | [`format`] | Date, phone, and text formatters |
//! | [`overlay`] | On-screen preview and debug picker |
//! | [`print`] | A4 print document and readiness gate |
//! | [`assets`] | Page image loading and caching |
//! | [`room`] | Room number rotation |
//! | [`server`] | HTTP editor and JSON API |
//! | [`error`] | Error types |

pub mod assets;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod html;
pub mod overlay;
pub mod print;
pub mod room;
pub mod schema;
pub mod server;
pub mod templates;
pub mod units;

// Re-exports for convenience
pub use error::OverprintError;
pub use templates::{Template, by_id};
