//! Display-oriented rewriting of chapter markup and stylesheets.
//!
//! Both rewriters are plain values built from [`IngestOptions`](crate::IngestOptions)
//! and are safe to share between threads.

pub mod css;
mod dom;
pub mod entities;
pub mod report;
pub mod xhtml;

pub use self::css::{CssScoper, ScopedStylesheet};
pub use self::report::{RewriteOutcome, RewriteReport};
pub use self::xhtml::{Sanitized, XhtmlSanitizer};
