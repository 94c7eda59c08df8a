//! Application-wide constants
//!
//! Single source of truth for the magic numbers and string literals
//! used throughout the application.

/// Configuration file location constants
pub mod config {
    /// Directory name under the per-user config dir
    pub const APP_DIR: &str = "pdfreflow";

    /// Configuration file name
    pub const FILENAME: &str = "config.json";

    /// Name of the built-in profile created on first run
    pub const DEFAULT_PROFILE_NAME: &str = "Default";
}

/// Page geometry constants
pub mod page {
    /// US letter page width in inches
    pub const LETTER_WIDTH_IN: f64 = 8.5;

    /// US letter page height in inches
    pub const LETTER_HEIGHT_IN: f64 = 11.0;
}

/// External converter constants
pub mod converter {
    /// Binary name resolved from $PATH when no override is configured
    pub const DEFAULT_BINARY: &str = "k2pdfopt";

    /// Suffix appended to the input file stem for the default output path
    pub const OUTPUT_SUFFIX: &str = "_output";

    /// Column count passed for the standard two-column layout
    pub const NARROW_COLUMNS: u8 = 2;

    /// Column count passed when a profile requests the wide layout
    pub const WIDE_COLUMNS: u8 = 4;
}
