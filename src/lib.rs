//! Resolve `[[symbol]]` cross-references in markdown ASTs against a TypeDoc
//! reflection tree.
//!
//! The crate consumes two externally owned inputs — a documentation-model
//! tree (the JSON reflection of a codebase's exported symbols) and an
//! mdast-shaped document tree — and rewrites symbol-link spans into link
//! nodes pointing at the generated API-documentation site.
//!
//! ```no_run
//! use tsdoc_links::rewrite::transformer;
//! use tsdoc_links::types::Options;
//!
//! let session = transformer(Options::default());
//! // session.transform(&mut document) for each document in the pipeline.
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod index;
pub mod kinds;
pub mod link;
pub mod mdast;
pub mod rewrite;
pub mod types;
pub mod watch;
