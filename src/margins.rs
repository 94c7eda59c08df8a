//! Margin fraction → page-inch arithmetic
//!
//! Profiles store margins as fractions of the page, all measured from the
//! top/left edge. The converter wants absolute inches measured from each
//! edge, so the right/bottom fractions are inverted here and nowhere else.

use crate::config::Profile;
use crate::constants::page;

/// Physical page dimensions in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        width_in: page::LETTER_WIDTH_IN,
        height_in: page::LETTER_HEIGHT_IN,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Absolute margins in inches, one per page edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginsInches {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl MarginsInches {
    /// Convert a profile's edge fractions to absolute inches on `page`
    pub fn from_profile(profile: &Profile, page: PageSize) -> Self {
        Self {
            left: profile.leftmargin * page.width_in,
            right: (1.0 - profile.rightmargin) * page.width_in,
            top: profile.topmargin * page.height_in,
            bottom: (1.0 - profile.bottommargin) * page.height_in,
        }
    }
}

/// Converter page-range string: first page depends on the skip-first flag
pub fn page_range(skip_first_page: bool, page_count: usize) -> String {
    let first = if skip_first_page { 2 } else { 1 };
    format!("{first}-{page_count}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_has_zero_margins() {
        let profile = Profile::new("p");
        let margins = MarginsInches::from_profile(&profile, PageSize::LETTER);
        assert_eq!(margins.left, 0.0);
        assert_eq!(margins.right, 0.0);
        assert_eq!(margins.top, 0.0);
        assert_eq!(margins.bottom, 0.0);
    }

    #[test]
    fn test_fractions_scale_to_letter_inches() {
        let mut profile = Profile::new("p");
        profile.leftmargin = 0.1;
        profile.rightmargin = 0.9;
        profile.topmargin = 0.25;
        profile.bottommargin = 0.5;

        let margins = MarginsInches::from_profile(&profile, PageSize::LETTER);
        assert!((margins.left - 0.85).abs() < 1e-9);
        assert!((margins.right - 0.85).abs() < 1e-9);
        assert!((margins.top - 2.75).abs() < 1e-9);
        assert!((margins.bottom - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(false, 12), "1-12");
        assert_eq!(page_range(true, 12), "2-12");
        assert_eq!(page_range(false, 1), "1-1");
    }
}
