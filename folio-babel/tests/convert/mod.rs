//! DocumentConverter tests
//!
//! End-to-end HTML → Markdown conversion, checked both as text and by parsing
//! the output back with comrak.

mod kitchensink;
mod properties;
mod scenarios;
