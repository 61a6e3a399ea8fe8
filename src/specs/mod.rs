// src/specs/mod.rs
//! # Vendor “specs” module
//!
//! One spec per vendor. Each spec knows **where the ground truth lives** in that
//! vendor's documents (PDF lines and boxes, HTML selectors, table cell positions)
//! and turns one raw document into vendor-shaped records.
//!
//! ## What lives here
//! - **Pure document parsing**: a spec receives text it has already been handed
//!   (PDF pages, HTML strings) and never fetches or writes anything itself.
//! - **Layout assumptions**, kept local: header phrases, fixed table indices,
//!   the geometry of Apollo's rating boxes (`boxes`).
//! - **Raw record types** (`ApolloFilter`, `LeeFilter`, `RoscoFilter`), serialized
//!   as-is to `raw/<vendor>.json`.
//!
//! ## What does **not** live here
//! - Fetching and batching (`scrape::collect_*`).
//! - Mapping to the canonical record (`ingest`), merging and export (`store`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_<vendor> → specs::<vendor>::…Extractor::extract()
//!                               ↘  Vec<raw record> → store::save_raw
//! cli compile → store::load_raw → ingest::from_<vendor> → store::compile
//! ```
//!
//! ## Conventions
//! - A document that does not match the expected shape is `Error::Parse`
//!   naming the document; a template mismatch in the box geometry is
//!   `Error::Layout`. Neither is ever papered over with a guess.
//! - Fixtures in the tests are small literal documents, not captured pages.

use serde::{Serialize, de::DeserializeOwned};

use crate::config::options::Vendor;
use crate::error::Result;

pub mod apollo;
pub mod boxes;
pub mod lee;
pub mod rosco;

/// Narrow seam between a vendor's document layout and the rest of the pipeline.
pub trait Extractor {
    /// One raw document as handed over by the batch loop.
    type Input;
    /// Vendor-shaped record, dumped to the raw JSON file.
    type Record: Serialize + DeserializeOwned;

    fn vendor(&self) -> Vendor;

    fn extract(&self, raw: &Self::Input) -> Result<Vec<Self::Record>>;
}
