//! Configuration schema types for textfinder.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod markup;
mod search;
mod system;

pub use markup::*;
pub use search::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct FinderConfig {
    pub search: SearchConfig,
    pub reveal: RevealConfig,
    pub highlight: HighlightConfig,
    pub indicator: IndicatorConfig,
    pub visibility: VisibilityConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
