use crate::error::{AprioriError, Result};

/// Mining thresholds.
///
/// `minimum_confidence` is kept for association-rule generation and is not
/// read by frequent itemset mining.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    minimum_support: Option<f64>,
    minimum_confidence: Option<f64>,
}

impl Thresholds {
    pub fn new(minimum_support: f64, minimum_confidence: Option<f64>) -> Result<Self> {
        let mut thresholds = Thresholds::default();
        thresholds.set_minimum_support(minimum_support)?;
        if let Some(confidence) = minimum_confidence {
            thresholds.set_minimum_confidence(confidence)?;
        }
        Ok(thresholds)
    }

    pub fn minimum_support(&self) -> Option<f64> {
        self.minimum_support
    }

    pub fn minimum_confidence(&self) -> Option<f64> {
        self.minimum_confidence
    }

    /// Support must lie in (0, 1].
    pub fn set_minimum_support(&mut self, minimum_support: f64) -> Result<()> {
        if !(minimum_support > 0.0 && minimum_support <= 1.0) {
            return Err(AprioriError::Configuration(format!(
                "minimum support must be in (0, 1], got {}",
                minimum_support
            )));
        }
        self.minimum_support = Some(minimum_support);
        Ok(())
    }

    /// Confidence must lie in [0, 1].
    pub fn set_minimum_confidence(&mut self, minimum_confidence: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&minimum_confidence) {
            return Err(AprioriError::Configuration(format!(
                "minimum confidence must be in [0, 1], got {}",
                minimum_confidence
            )));
        }
        self.minimum_confidence = Some(minimum_confidence);
        Ok(())
    }

    /// The support threshold, or a configuration error if it was never set.
    pub(crate) fn require_support(&self) -> Result<f64> {
        self.minimum_support.ok_or_else(|| {
            AprioriError::Configuration("minimum support is not set".to_string())
        })
    }
}
