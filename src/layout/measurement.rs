//! Measurement resolution.
//!
//! Turns a [`Measure`] into pixels. Fractions never get here: they are
//! normalized to percents while the configuration is parsed.

use crate::error::{LayoutError, Result};
use crate::types::{Axis, Measure};

/// Resolve a measurement against the parent's pixel size on `axis`.
///
/// `Px` values pass through untouched. `Percent` needs `parent`; without it
/// the result is [`LayoutError::MissingParentDimension`].
pub fn resolve(measure: Measure, parent: Option<f32>, axis: Axis) -> Result<f32> {
    match measure {
        Measure::Px(v) => Ok(v),
        Measure::Percent(p) => parent
            .map(|pixels| pixels * p)
            .ok_or(LayoutError::MissingParentDimension { axis }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_ignores_parent() {
        assert_eq!(resolve(Measure::Px(12.0), None, Axis::X), Ok(12.0));
        assert_eq!(resolve(Measure::Px(12.0), Some(500.0), Axis::X), Ok(12.0));
    }

    #[test]
    fn test_percent_of_parent() {
        assert_eq!(resolve(Measure::Percent(0.25), Some(200.0), Axis::X), Ok(50.0));
    }

    #[test]
    fn test_percent_without_parent() {
        assert_eq!(
            resolve(Measure::Percent(0.25), None, Axis::Y),
            Err(LayoutError::MissingParentDimension { axis: Axis::Y })
        );
    }

    #[test]
    fn test_fraction_resolves_like_percent() {
        let fraction = Measure::fraction(1.0, 4.0).unwrap();
        assert_eq!(
            resolve(fraction, Some(200.0), Axis::X),
            resolve(Measure::Percent(0.25), Some(200.0), Axis::X)
        );
    }
}
