//! Extractor strategies.
//!
//! An extractor turns one source file into an ordered list of
//! [`ExtractedKey`]s. Two strategies exist: the built-in parser for the
//! supported source dialects, and a user-supplied plugin process speaking a
//! versioned JSON protocol over stdin/stdout. The strategy is resolved once
//! per run and shared immutably by every worker.

use std::path::Path;

use anyhow::Result;
use enum_dispatch::enum_dispatch;

use crate::error::ExtractError;
use crate::extraction::keys::ExtractedKey;

mod builtin;
mod custom;

pub use builtin::BuiltinExtractor;
pub use custom::CustomExtractor;

/// Contract every extractor satisfies: file in, ordered key list out.
///
/// Implementations must be side-effect free with respect to the
/// orchestrator; everything they return crosses the worker isolation
/// boundary as plain data.
#[enum_dispatch]
pub trait Extract {
    fn extract(&self, file: &Path, source: &str) -> Result<Vec<ExtractedKey>>;
}

/// The extractor selected for a run. Uses `enum_dispatch` for zero-cost
/// dispatch over the two strategies.
#[enum_dispatch(Extract)]
pub enum Extractor {
    Builtin(BuiltinExtractor),
    Custom(CustomExtractor),
}

impl Extractor {
    /// Resolve the extractor for a run. Called exactly once per run; every
    /// worker submission reuses the returned value.
    ///
    /// With no custom module path the built-in parser is used. A custom
    /// path is verified to exist and to answer the protocol handshake
    /// before any extraction work is scheduled.
    pub fn resolve(custom_module: Option<&Path>) -> Result<Self, ExtractError> {
        match custom_module {
            None => Ok(Self::Builtin(BuiltinExtractor::default())),
            Some(path) => Ok(Self::Custom(CustomExtractor::load(path)?)),
        }
    }
}
