//! Core types for spark-layout.
//!
//! These types define the vocabulary every resolver speaks: axes, keywords,
//! measurements, size specifications and constraints. They are small `Copy`
//! values so an immutable snapshot can hold them inline.
//!
//! Per-axis pairs reuse taffy's geometry types (`Point`, `Size`, `Rect`)
//! through the [`AlongAxis`] accessor.

use std::fmt;

use taffy::geometry::{Point, Rect, Size};

use crate::error::ConfigError;

// =============================================================================
// Axis
// =============================================================================

/// One of the two independent layout dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (x, width).
    X,
    /// Vertical axis (y, height).
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Name of the extent measured along this axis.
    pub const fn extent_name(self) -> &'static str {
        match self {
            Axis::X => "width",
            Axis::Y => "height",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Per-axis access into taffy's geometry pairs.
///
/// `Point` maps x/y directly, `Size` maps width to [`Axis::X`] and height to
/// [`Axis::Y`].
pub trait AlongAxis<T> {
    /// Read the component for `axis`.
    fn along(&self, axis: Axis) -> T;

    /// Replace the component for `axis`.
    fn set_along(&mut self, axis: Axis, value: T);
}

impl<T: Copy> AlongAxis<T> for Point<T> {
    #[inline]
    fn along(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn set_along(&mut self, axis: Axis, value: T) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

impl<T: Copy> AlongAxis<T> for Size<T> {
    #[inline]
    fn along(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    fn set_along(&mut self, axis: Axis, value: T) {
        match axis {
            Axis::X => self.width = value,
            Axis::Y => self.height = value,
        }
    }
}

/// Padding before the content on `axis` (left or top).
#[inline]
pub fn padding_start(padding: &Rect<f32>, axis: Axis) -> f32 {
    match axis {
        Axis::X => padding.left,
        Axis::Y => padding.top,
    }
}

/// Total padding consumed on `axis`.
#[inline]
pub fn padding_sum(padding: &Rect<f32>, axis: Axis) -> f32 {
    match axis {
        Axis::X => padding.left + padding.right,
        Axis::Y => padding.top + padding.bottom,
    }
}

/// Padding of zero on every side.
pub const NO_PADDING: Rect<f32> = Rect {
    left: 0.0,
    right: 0.0,
    top: 0.0,
    bottom: 0.0,
};

// =============================================================================
// Keywords
// =============================================================================

/// Alignment of a node inside its parent on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Take the parent's full inner size on this axis.
    Fill,
}

/// Which point of a node's own box its anchor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pivot {
    #[default]
    Start,
    Center,
    End,
}

/// Direction in which a container flows its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Children are placed left to right (flow axis x).
    Row,
    /// Children are placed top to bottom (flow axis y).
    #[default]
    Column,
}

impl Direction {
    /// The axis along which children are placed sequentially.
    #[inline]
    pub const fn flow_axis(self) -> Axis {
        match self {
            Direction::Row => Axis::X,
            Direction::Column => Axis::Y,
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
            Align::Fill => "fill",
        })
    }
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pivot::Start => "start",
            Pivot::Center => "center",
            Pivot::End => "end",
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Row => "row",
            Direction::Column => "column",
        })
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// A length that is either literal or relative to the parent.
///
/// - `Px(n)`: absolute value in pixels
/// - `Percent(p)`: fraction of the parent's inner size, `p` in `[0, 1]`
///
/// # Examples
///
/// ```
/// use spark_layout::types::Measure;
///
/// let quarter = Measure::fraction(1.0, 4.0).unwrap();
/// assert_eq!(quarter, Measure::Percent(0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Px(f32),
    Percent(f32),
}

impl Default for Measure {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl Measure {
    /// Normalize a `value` over `base` fraction into a percent measure.
    ///
    /// Requires `base > 0` and `base >= value`.
    pub fn fraction(value: f32, base: f32) -> Result<Self, ConfigError> {
        if !value.is_finite() || !base.is_finite() || base <= 0.0 || base < value {
            return Err(ConfigError::InvalidFraction { value, base });
        }
        Ok(Self::Percent(value / base))
    }
}

impl From<f32> for Measure {
    fn from(value: f32) -> Self {
        Self::Px(value)
    }
}

/// How a node's extent on one axis is determined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeSpec {
    /// Literal size in pixels.
    Px(f32),
    /// Fraction of the parent's inner size, in `[0, 1]`.
    Percent(f32),
    /// Size derived from children and content.
    #[default]
    Hug,
    /// Weighted share of the free space left in the parent's flow.
    Grow(f32),
}

impl SizeSpec {
    /// The equivalent measurement, for literal and percent specs.
    pub const fn as_measure(self) -> Option<Measure> {
        match self {
            SizeSpec::Px(v) => Some(Measure::Px(v)),
            SizeSpec::Percent(p) => Some(Measure::Percent(p)),
            SizeSpec::Hug | SizeSpec::Grow(_) => None,
        }
    }
}

impl From<Measure> for SizeSpec {
    fn from(measure: Measure) -> Self {
        match measure {
            Measure::Px(v) => SizeSpec::Px(v),
            Measure::Percent(p) => SizeSpec::Percent(p),
        }
    }
}

/// Optional min/max pixel bounds for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl Bounds {
    pub const fn new(min: Option<f32>, max: Option<f32>) -> Self {
        Self { min, max }
    }

    pub const fn min(min: f32) -> Self {
        Self { min: Some(min), max: None }
    }

    pub const fn max(max: f32) -> Self {
        Self { min: None, max: Some(max) }
    }

    /// Both bounds present with `min > max`.
    pub fn is_contradictory(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

// =============================================================================
// Content
// =============================================================================

/// Opaque payload carried by a node.
///
/// The engine never interprets content except through a
/// [`ContentMeasurer`](crate::layout::ContentMeasurer).
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    /// Reference to an external resource (image, sprite, ...).
    Resource(String),
}

impl Content {
    /// Tag name used by the configuration surface.
    pub const fn tag(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Resource(_) => "resource",
        }
    }
}

// =============================================================================
// Mutation flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// What a committed mutation changed, computed by diffing snapshots.
    ///
    /// Combine with bitwise OR: `Mutation::SIZE | Mutation::ORDER`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mutation: u16 {
        const POSITION = 1 << 0;
        const SIZE = 1 << 1;
        const ALIGN = 1 << 2;
        const PIVOT = 1 << 3;
        const DIRECTION = 1 << 4;
        const ORDER = 1 << 5;
        const ABSOLUTE = 1 << 6;
        const CONSTRAIN = 1 << 7;
        const SPACING = 1 << 8;
        const CONTENT = 1 << 9;
        const CHILDREN = 1 << 10;
    }
}

impl Mutation {
    /// Changes that can alter sibling paint order.
    pub fn affects_paint_order(self) -> bool {
        self.intersects(Mutation::ORDER | Mutation::CHILDREN)
    }
}

// =============================================================================
// Resolved geometry
// =============================================================================

/// Resolved geometry of one node.
///
/// `x`/`y` are the top-left corner in the parent's frame, `abs_x`/`abs_y` in
/// the root's frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub abs_x: f32,
    pub abs_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_cross() {
        assert_eq!(Axis::X.cross(), Axis::Y);
        assert_eq!(Axis::Y.cross(), Axis::X);
        assert_eq!(Axis::X.extent_name(), "width");
    }

    #[test]
    fn test_direction_flow_axis() {
        assert_eq!(Direction::Row.flow_axis(), Axis::X);
        assert_eq!(Direction::Column.flow_axis(), Axis::Y);
        assert_eq!(Direction::default(), Direction::Column);
    }

    #[test]
    fn test_along_axis() {
        let mut point = Point { x: 1.0f32, y: 2.0 };
        assert_eq!(point.along(Axis::Y), 2.0);
        point.set_along(Axis::X, 5.0);
        assert_eq!(point.x, 5.0);

        let size = Size { width: SizeSpec::Px(10.0), height: SizeSpec::Hug };
        assert_eq!(size.along(Axis::X), SizeSpec::Px(10.0));
        assert_eq!(size.along(Axis::Y), SizeSpec::Hug);
    }

    #[test]
    fn test_fraction_normalizes_to_percent() {
        assert_eq!(Measure::fraction(1.0, 4.0), Ok(Measure::Percent(0.25)));
        assert_eq!(Measure::fraction(4.0, 4.0), Ok(Measure::Percent(1.0)));
    }

    #[test]
    fn test_fraction_rejects_bad_base() {
        assert!(Measure::fraction(1.0, 0.0).is_err());
        assert!(Measure::fraction(1.0, -2.0).is_err());
        assert!(Measure::fraction(5.0, 4.0).is_err());
    }

    #[test]
    fn test_bounds_contradiction() {
        assert!(Bounds::new(Some(10.0), Some(8.0)).is_contradictory());
        assert!(!Bounds::new(Some(8.0), Some(10.0)).is_contradictory());
        assert!(!Bounds::min(3.0).is_contradictory());
    }

    #[test]
    fn test_mutation_flags() {
        let change = Mutation::ORDER | Mutation::CONTENT;
        assert!(change.affects_paint_order());
        assert!(!Mutation::CONTENT.affects_paint_order());
    }
}
