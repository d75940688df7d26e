//! Localization key extraction pipeline.
//!
//! The pipeline runs in four stages:
//!
//! 1. **Discovery** (`discovery`): expand glob patterns into a deduplicated
//!    list of regular files.
//! 2. **Extractor resolution** (`extractor`): pick the built-in parser or
//!    load a user-supplied plugin; resolved once per run.
//! 3. **Parallel extraction** (`pool`): run the extractor against every file
//!    on a bounded worker pool with per-file fault isolation.
//! 4. **Aggregation** (`aggregate`): fold per-file results into the final
//!    namespace-partitioned `FilteredKeys` map.
//!
//! `pipeline::extract_keys` wires the stages together.

pub mod aggregate;
pub mod discovery;
pub mod extractor;
pub mod keys;
pub mod pipeline;
pub mod pool;

pub use aggregate::{FilteredKeys, Namespace};
pub use extractor::{Extract, Extractor};
pub use keys::{ExtractedKey, ExtractionResult};
