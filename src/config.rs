//! Rendering configuration for pileview.
//!
//! The renderer carries its own configuration value; there is no global
//! state, so two renders with different widths can run side by side.

use crate::error::{PileupError, Result};

/// Number of reference bases shown per printed line unless overridden.
pub const DEFAULT_LINE_WIDTH: usize = 100;

/// Largest accepted line width.
pub const MAX_LINE_WIDTH: usize = 1 << 20;

/// Width of the `"Ref:  "` / `"Read: "` row labels.
pub const LABEL_WIDTH: usize = 6;

/// Offset value marking a read that did not align.
pub const UNALIGNED: i64 = -1;

/// Layout parameters for a pileup render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PileupConfig {
    /// Reference bases per segment, and the maximum characters per lane row.
    pub line_width: usize,
}

impl Default for PileupConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl PileupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line width.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Check that the configuration can drive a render.
    pub fn validate(&self) -> Result<()> {
        if self.line_width == 0 {
            return Err(PileupError::invalid("line width must be positive"));
        }
        if self.line_width > MAX_LINE_WIDTH {
            return Err(PileupError::invalid(format!(
                "line width {} exceeds the maximum of {}",
                self.line_width, MAX_LINE_WIDTH
            )));
        }
        Ok(())
    }

    /// Length of the dashed divider printed between blocks.
    ///
    /// # Example
    ///
    /// ```
    /// use pileview::config::PileupConfig;
    ///
    /// assert_eq!(PileupConfig::default().divider_width(), 106);
    /// ```
    #[inline]
    pub fn divider_width(&self) -> usize {
        self.line_width.saturating_add(LABEL_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_width() {
        let config = PileupConfig::default();
        assert_eq!(config.line_width, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = PileupConfig::new().with_line_width(0);
        assert!(matches!(
            config.validate(),
            Err(PileupError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_oversized_width_rejected() {
        assert!(PileupConfig::new()
            .with_line_width(MAX_LINE_WIDTH)
            .validate()
            .is_ok());

        for width in [MAX_LINE_WIDTH + 1, usize::MAX] {
            let config = PileupConfig::new().with_line_width(width);
            assert!(matches!(
                config.validate(),
                Err(PileupError::InvalidInput(_))
            ));
            assert_eq!(config.divider_width(), width.saturating_add(LABEL_WIDTH));
        }
    }

    #[test]
    fn test_divider_tracks_width() {
        assert_eq!(PileupConfig::new().with_line_width(5).divider_width(), 11);
    }
}
