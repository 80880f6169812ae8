//! # Motion Configuration
//!
//! Motion types and the JSON parameter file that supplies each motion's
//! section text.
//!
//! ## File Format
//! ```json
//! {
//!   "compel": {
//!     "title": "MOTION TO COMPEL DISCOVERY",
//!     "introduction": "...",
//!     "relief": "..."
//!   },
//!   "emergency": { "title": "EMERGENCY MOTION" }
//! }
//! ```
//!
//! Every field is optional; a motion type with no entry gets all defaults.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DocsError, DocsResult};

// =============================================================================
// Motion Type
// =============================================================================

/// The supported kinds of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    Compel,
    Sanctions,
    Modify,
    Emergency,
}

impl MotionType {
    pub const ALL: [MotionType; 4] = [
        MotionType::Compel,
        MotionType::Sanctions,
        MotionType::Modify,
        MotionType::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MotionType::Compel => "compel",
            MotionType::Sanctions => "sanctions",
            MotionType::Modify => "modify",
            MotionType::Emergency => "emergency",
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MotionType {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MotionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| DocsError::UnknownMotionType(s.to_string()))
    }
}

// =============================================================================
// Motion Parameters
// =============================================================================

/// Section text and contact details for one motion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub title: Option<String>,
    pub introduction: Option<String>,
    pub background: Option<String>,
    pub legal_standard: Option<String>,
    pub argument: Option<String>,
    pub conclusion: Option<String>,
    pub relief: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Motion Configuration
// =============================================================================

/// Parameter file contents: params keyed by motion type name.
///
/// Keys that are not a known motion type are kept but never selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotionConfig {
    motions: HashMap<String, MotionParams>,
}

impl MotionConfig {
    pub fn load(path: impl AsRef<Path>) -> DocsResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading motion configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> DocsResult<Self> {
        let config: MotionConfig = serde_json::from_str(contents)?;
        debug!(entries = config.motions.len(), "Parsed motion configuration");
        Ok(config)
    }

    /// Params for a motion type; defaults when the file has no entry.
    pub fn params_for(&self, motion_type: MotionType) -> MotionParams {
        self.motions
            .get(motion_type.as_str())
            .cloned()
            .unwrap_or_default()
    }

    pub fn insert(&mut self, motion_type: MotionType, params: MotionParams) {
        self.motions.insert(motion_type.as_str().to_string(), params);
    }
}
