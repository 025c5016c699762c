//! The library code for `folio`, which turns a directory of dated markdown
//! articles into paginated listing pages. The architecture can be broken down
//! into four steps that run in order, once per generation run:
//!
//! 1. Ingesting articles from source files ([`crate::ingest`]). Each article
//!    gets a display date, a permalink, a title, and an excerpt, and the
//!    article identities are ordered newest-first.
//! 2. Partitioning the ordered articles into fixed-size pages
//!    ([`crate::paginate`]).
//! 3. Synthesizing one extra listing document per page beyond the first
//!    ([`crate::synthesize`]). Each synthesized document is a copy of the
//!    listing ("loop") document whose aggregate placeholders have been
//!    renamed to page-numbered placeholders.
//! 4. Filling each listing document while it is rendered ([`crate::fill`]):
//!    the page's placeholders are replaced with the concatenated article
//!    fragments and the `{{pagination}}` placeholder with prev/next links.
//!
//! Steps 3 and 4 must agree on placeholder names; both go through
//! [`crate::token`]. All state shared between the steps lives in a
//! [`crate::state::RunState`] that is created by step 1 and passed along
//! explicitly.
//!
//! [`crate::build`] is a small host that wires the steps together with
//! markdown rendering and writes a site to disk.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod date;
pub mod document;
pub mod fill;
pub mod hooks;
pub mod ingest;
pub mod markdown;
pub mod paginate;
pub mod state;
pub mod synthesize;
pub mod token;
