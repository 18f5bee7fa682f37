//! # brasa-link
//!
//! Chat deep-link library - low-level sending capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW an order leaves the kiosk:
//! - chat-markdown text building (`*bold*`, bullets, blank-line sections)
//! - deep-link construction (`https://wa.me/<phone>?text=<encoded>`)
//! - opening the link with the platform URL handler
//!
//! Business logic (WHAT the message says) stays in the kiosk application:
//! - order message composition → brasa-kiosk
//!
//! ## Example
//!
//! ```ignore
//! use brasa_link::{DeepLink, LinkOpener, MessageBuilder, SystemOpener};
//!
//! let mut b = MessageBuilder::new();
//! b.line(&MessageBuilder::bold("NUEVO PEDIDO"));
//! b.blank();
//! b.pair("Mesa", "4");
//!
//! let link = DeepLink::new("https://wa.me", "51936684281")?;
//! SystemOpener::new().open(&link.url_for(&b.finalize())).await?;
//! ```

mod error;
mod link;
mod message;
mod opener;

// Re-exports
pub use error::{LinkError, LinkResult};
pub use link::{DeepLink, query_param};
pub use message::MessageBuilder;
pub use opener::{AnyOpener, DryRunOpener, LinkOpener, RecordingOpener, SystemOpener};
