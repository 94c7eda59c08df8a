//! Profile data model
//!
//! A profile is a named, reusable set of margin fractions and layout flags.
//! Margins are stored as fractions of the page dimensions, all measured from
//! the top/left edge; conversion to "distance from the far edge" happens only
//! when building converter arguments.

use serde::{Deserialize, Serialize};

use crate::constants::config::DEFAULT_PROFILE_NAME;

/// A complete set of margin and layout settings
///
/// Names are display labels, not keys: duplicates are legal and all
/// selection happens by list position. The store never validates margin
/// ordering (`leftmargin < rightmargin` is the editor's concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,

    // Layout flags
    #[serde(default)]
    pub skip_first_page: bool,
    #[serde(default)]
    pub many_cols: bool,
    #[serde(default)]
    pub color: bool,

    // Margin fractions, all measured from the top/left edge
    #[serde(default)]
    pub leftmargin: f64,
    #[serde(default = "full_extent")]
    pub rightmargin: f64,
    #[serde(default)]
    pub topmargin: f64,
    #[serde(default = "full_extent")]
    pub bottommargin: f64,
}

fn full_extent() -> f64 {
    1.0
}

impl Profile {
    /// Create a profile with default margins (full page) and the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skip_first_page: false,
            many_cols: false,
            color: false,
            leftmargin: 0.0,
            rightmargin: 1.0,
            topmargin: 0.0,
            bottommargin: 1.0,
        }
    }
}

/// The built-in profile list used on first run and after fallback
pub fn default_profiles() -> Vec<Profile> {
    vec![Profile::new(DEFAULT_PROFILE_NAME)]
}
