//! HTML to Markdown content records for a static portfolio site
//!
//!     This crate turns pages scraped from a hosted site builder into the Markdown content
//!     records a static-site generator consumes: blog posts, standalone pages and artwork
//!     entries, each a front-matter header plus a Markdown body.
//!
//!     TLDR:
//!         - Scraping is not done here. Inputs are `<name>.html` plus the scraper's
//!           `<name>.meta.json` sidecar listing the images it downloaded.
//!         - The converter is a pure function of (markup tree, image table). No I/O, no clock.
//!         - Everything that varied between one-off conversion scripts (grid detection,
//!           description rule, date locale, fallback year) is an option, not a fork.
//!
//!     This is a pure lib: it powers the folio CLI but is shell agnostic. No code here prints
//!     to stdout or reads env vars; diagnostics go through the `log` facade.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs                # PipelineError
//!     ├── markup                  # Owned markup tree, html5ever parsing, chrome pruning
//!     ├── images.rs               # Image-reference table and asset-id probing
//!     ├── convert                 # DocumentConverter (tree walk) and the Markdown writer
//!     ├── describe.rs             # Description strategies (comrak over the converted body)
//!     ├── dates.rs                # Localized publish-date derivation
//!     ├── extract.rs              # Hook-based page metadata (title, author, counters)
//!     ├── record                  # DocumentRecord and the front-matter format
//!     ├── slug.rs
//!     ├── source.rs               # Scraped inputs and discovery
//!     ├── collections             # Collection trait: blog, pages, artworks
//!     ├── registry.rs             # CollectionRegistry for discovery and selection
//!     ├── publish.rs              # Record layout on disk
//!     └── batch.rs                # Parallel batch run
//!
//!     Data flow for one page:
//!
//!         html ──parse_html──▶ MarkupNode ──PageFacts::extract──▶ title, date, content root
//!                                              │
//!         meta.json ──▶ ImageRefTable ─────────┤
//!                                              ▼
//!                          prune_chrome ──▶ DocumentConverter ──▶ body
//!                                                                  │
//!                                  Describer, DateDeriver ─────────┤
//!                                                                  ▼
//!                                                DocumentRecord ──▶ <content>/<dir>/<locale>/<slug>.md
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs                  # Entry point, wires the area modules below
//!     ├── common/mod.rs           # Fixture loading
//!     ├── convert/                # End-to-end conversion and property tests
//!     ├── record/                 # Persisted record format
//!     ├── batch/                  # Full runs over a temp directory
//!     └── fixtures/
//!
//!     Rust does not discover tests in subdirectories by default, so they are included as
//!     modules from tests/lib.rs.

pub mod batch;
pub mod collections;
pub mod convert;
pub mod dates;
pub mod describe;
pub mod error;
pub mod extract;
pub mod images;
pub mod markup;
pub mod publish;
pub mod record;
pub mod registry;
pub mod slug;
pub mod source;

pub use batch::{BatchReport, BatchRun};
pub use collections::{BuildContext, Collection, PipelineOptions};
pub use convert::{ConversionResult, ConverterOptions, DocumentConverter};
pub use error::{PipelineError, Result};
pub use images::{ImageRefTable, ImageReference};
pub use markup::{parse_html, MarkupNode};
pub use record::DocumentRecord;
pub use registry::CollectionRegistry;

/// Convert an HTML document or fragment with default options.
///
/// The `<body>` is converted when present. Handy for one-off conversions and
/// tests; batch code should go through a [`Collection`].
pub fn convert_html(html: &str, refs: &ImageRefTable) -> ConversionResult {
    let root = parse_html(html);
    DocumentConverter::default().convert_element(markup::body(&root), refs)
}
