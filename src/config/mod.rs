//! Configuration surface - declarative node specifications.
//!
//! A [`BoxSpec`] is what callers hand to the engine, either built in Rust or
//! deserialized from JSON. Normalizing it validates every invariant of the
//! data model and produces an immutable [`BoxConfig`] snapshot; nothing is
//! committed unless the whole spec (children included) is valid.
//!
//! # Example
//!
//! ```
//! use spark_layout::config::BoxSpec;
//!
//! let spec = BoxSpec::from_json(r#"{
//!     "area": { "x": 10, "y": 20, "width": 400, "height": "hug" },
//!     "align": { "direction": "row" },
//!     "children": {
//!         "icon": { "area": { "width": 16, "height": 16 } },
//!         "label": { "area": { "width": "grow" }, "align": { "y": "↔" } }
//!     }
//! }"#).unwrap();
//!
//! let root = spec.normalize_root().unwrap();
//! assert_eq!(root.ordered_children().len(), 2);
//! ```

mod keywords;
mod sizing;

use std::collections::BTreeMap;

use serde::Deserialize;
use taffy::geometry::Rect;

use crate::engine::BoxConfig;
use crate::error::ConfigError;
use crate::types::{Axis, Bounds, Content, Measure};

pub use keywords::{parse_align, parse_direction, parse_pivot};
pub use sizing::{
    AxisSizing, MeasureInput, SizeInput, SizeMode, from_size_input, from_size_mode, parse_measure,
};

// =============================================================================
// Declarative input types
// =============================================================================

/// Declarative specification of one node and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoxSpec {
    pub area: AreaSpec,
    pub align: AlignSpec,
    /// Legacy explicit size modes. Mutually exclusive with `area` sizes per axis.
    pub sizing: SizingSpec,
    pub constrain: ConstrainSpec,
    pub spacing: SpacingSpec,
    pub order: Option<f32>,
    pub absolute: bool,
    pub content: Option<ContentSpec>,
    pub children: BTreeMap<String, BoxSpec>,
}

/// Anchor, size and pivot per axis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AreaSpec {
    pub x: Option<MeasureInput>,
    pub y: Option<MeasureInput>,
    pub width: Option<SizeInput>,
    pub height: Option<SizeInput>,
    pub px: Option<String>,
    pub py: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlignSpec {
    pub x: Option<String>,
    pub y: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingSpec {
    pub x: Option<SizeMode>,
    pub y: Option<SizeMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstrainSpec {
    pub x: Option<BoundsSpec>,
    pub y: Option<BoundsSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundsSpec {
    pub min: Option<NumberInput>,
    pub max: Option<NumberInput>,
}

/// A constraint bound as written. Anything but a number is rejected during
/// normalization with a constraint error rather than a parse error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f32),
    Other(serde_json::Value),
}

impl From<f32> for NumberInput {
    fn from(value: f32) -> Self {
        NumberInput::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpacingSpec {
    pub gap: Option<f32>,
    pub padding: Option<PaddingInput>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PaddingInput {
    Uniform(f32),
    Sides {
        #[serde(default)]
        top: f32,
        #[serde(default)]
        right: f32,
        #[serde(default)]
        bottom: f32,
        #[serde(default)]
        left: f32,
    },
}

/// Tagged content: exactly one of `text` or `resource`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentSpec {
    pub text: Option<String>,
    pub resource: Option<String>,
}

// =============================================================================
// Accessors per axis
// =============================================================================

impl AreaSpec {
    fn anchor(&self, axis: Axis) -> Option<&MeasureInput> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }

    fn extent(&self, axis: Axis) -> Option<&SizeInput> {
        match axis {
            Axis::X => self.width.as_ref(),
            Axis::Y => self.height.as_ref(),
        }
    }

    fn pivot(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.px.as_deref(),
            Axis::Y => self.py.as_deref(),
        }
    }
}

impl AlignSpec {
    fn along(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x.as_deref(),
            Axis::Y => self.y.as_deref(),
        }
    }
}

impl SizingSpec {
    fn along(&self, axis: Axis) -> Option<&SizeMode> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }
}

impl ConstrainSpec {
    fn along(&self, axis: Axis) -> Option<&BoundsSpec> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }
}

// =============================================================================
// Construction helpers
// =============================================================================

impl BoxSpec {
    /// Parse a spec from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserialize a spec from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// A spec anchored at literal pixel coordinates.
    pub fn at(x: f32, y: f32) -> Self {
        let mut spec = Self::default();
        spec.area.x = Some(MeasureInput::Px(x));
        spec.area.y = Some(MeasureInput::Px(y));
        spec
    }

    /// Fixed pixel width and height.
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.area.width = Some(SizeInput::Px(width));
        self.area.height = Some(SizeInput::Px(height));
        self
    }

    pub fn with_direction(mut self, direction: &str) -> Self {
        self.align.direction = Some(direction.to_string());
        self
    }

    pub fn with_order(mut self, order: f32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_child(mut self, key: &str, child: BoxSpec) -> Self {
        self.children.insert(key.to_string(), child);
        self
    }

    // =========================================================================
    // Normalization
    // =========================================================================

    /// Normalize as the root of a tree: both anchors must be literal pixels.
    pub fn normalize_root(&self) -> Result<BoxConfig, ConfigError> {
        self.build(true)
    }

    /// Normalize as a descendant node.
    pub fn normalize(&self) -> Result<BoxConfig, ConfigError> {
        self.build(false)
    }

    fn build(&self, root: bool) -> Result<BoxConfig, ConfigError> {
        let mut config = BoxConfig::default();

        for axis in Axis::BOTH {
            self.build_axis(&mut config, axis, root)?;
        }

        if let Some(direction) = self.align.direction.as_deref() {
            config.set_direction(parse_direction(direction)?);
        }

        if let Some(gap) = self.spacing.gap {
            config.set_gap(gap)?;
        }
        if let Some(padding) = &self.spacing.padding {
            config.set_padding(padding.to_rect())?;
        }

        if let Some(order) = self.order {
            config.set_order(order)?;
        }
        config.set_absolute(self.absolute);

        if let Some(content) = &self.content {
            config.set_content(content.normalize()?);
        }

        for (key, child) in &self.children {
            let child_config = child.build(false).map_err(|err| err.in_child(key))?;
            config.insert_child(key, child_config);
        }

        Ok(config)
    }

    fn build_axis(
        &self,
        config: &mut BoxConfig,
        axis: Axis,
        root: bool,
    ) -> Result<(), ConfigError> {
        // Anchor
        match self.area.anchor(axis) {
            Some(input) => {
                let anchor = parse_measure("area anchor", input)?;
                if root && !matches!(anchor, Measure::Px(_)) {
                    return Err(ConfigError::RootAnchor { axis });
                }
                config.set_anchor(axis, anchor)?;
            }
            None if root => return Err(ConfigError::RootAnchor { axis }),
            None => {}
        }

        // Alignment, then size from whichever vocabulary declares it
        let explicit_align = self.align.along(axis).map(parse_align).transpose()?;
        if let Some(align) = explicit_align {
            config.set_align(axis, align);
        }

        match (self.area.extent(axis), self.sizing.along(axis)) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingSize { axis }),
            (Some(input), None) => {
                config.set_size_spec(axis, from_size_input(axis, input)?)?;
            }
            (None, Some(mode)) => {
                let sizing = from_size_mode(axis, mode)?;
                config.set_size_spec(axis, sizing.size)?;
                if let Some(implied) = sizing.align {
                    if explicit_align.is_some_and(|align| align != implied) {
                        return Err(ConfigError::ConflictingSize { axis });
                    }
                    config.set_align(axis, implied);
                }
            }
            (None, None) => {}
        }

        if let Some(pivot) = self.area.pivot(axis) {
            config.set_pivot(axis, parse_pivot(pivot)?);
        }

        if let Some(bounds) = self.constrain.along(axis) {
            config.set_constraint(axis, Some(bounds.normalize(axis)?))?;
        }

        Ok(())
    }
}

impl BoundsSpec {
    fn normalize(&self, axis: Axis) -> Result<Bounds, ConfigError> {
        let read = |bound: &'static str, input: &Option<NumberInput>| match input {
            None => Ok(None),
            Some(NumberInput::Number(v)) => Ok(Some(*v)),
            Some(NumberInput::Other(value)) => Err(ConfigError::InvalidConstraint {
                axis,
                bound,
                reason: format!("expected a number, got `{value}`"),
            }),
        };
        Ok(Bounds::new(read("min", &self.min)?, read("max", &self.max)?))
    }
}

impl PaddingInput {
    fn to_rect(&self) -> Rect<f32> {
        match *self {
            PaddingInput::Uniform(all) => Rect {
                left: all,
                right: all,
                top: all,
                bottom: all,
            },
            PaddingInput::Sides { top, right, bottom, left } => Rect { left, right, top, bottom },
        }
    }
}

impl ContentSpec {
    fn normalize(&self) -> Result<Option<Content>, ConfigError> {
        match (&self.text, &self.resource) {
            (Some(_), Some(_)) => Err(ConfigError::DuplicateContentTag {
                first: "text",
                second: "resource",
            }),
            (Some(text), None) => Ok(Some(Content::Text(text.clone()))),
            (None, Some(resource)) => Ok(Some(Content::Resource(resource.clone()))),
            (None, None) => Ok(None),
        }
    }
}
