use serde::{Deserialize, Serialize};

use crate::types::SelectionError;

/// Ordering strategy for candidate encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Narrowest widths first.
    #[default]
    Smallest,
    /// Fixed signed/unsigned interleave by width.
    Balanced,
    /// 32-bit and 64-bit first, then the narrow widths.
    Wide,
}

// Key point:
// Serializable
// Comparable
// Explicit defaults
// Unknown keys rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionOptions {
    pub policy: Policy,
    /// Lower bound by canonical catalog position. Unrecognized codes are ignored.
    pub min_type: Option<String>,
    /// Upper bound by canonical catalog position. Unrecognized codes are ignored.
    pub max_type: Option<String>,
    pub prefer_signed: bool,
    pub allow_float_downgrade: bool,
    pub no_float: bool,
    pub strict: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            policy: Policy::Smallest,
            min_type: None,
            max_type: None,
            prefer_signed: false,
            allow_float_downgrade: true,
            no_float: false,
            strict: false,
        }
    }
}

impl SelectionOptions {
    /// Parse options from a JSON object, rejecting unknown keys.
    pub fn from_json(raw: &str) -> Result<Self, SelectionError> {
        serde_json::from_str(raw).map_err(|e| SelectionError::InvalidOptions(e.to_string()))
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_min_type(mut self, code: impl Into<String>) -> Self {
        self.min_type = Some(code.into());
        self
    }

    pub fn with_max_type(mut self, code: impl Into<String>) -> Self {
        self.max_type = Some(code.into());
        self
    }

    pub fn with_prefer_signed(mut self, prefer_signed: bool) -> Self {
        self.prefer_signed = prefer_signed;
        self
    }

    pub fn with_float_downgrade(mut self, allow: bool) -> Self {
        self.allow_float_downgrade = allow;
        self
    }

    pub fn with_no_float(mut self, no_float: bool) -> Self {
        self.no_float = no_float;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
