//! Size vocabularies.
//!
//! Two front-ends feed the same axis contract `(SizeSpec, Option<Align>)`:
//!
//! - **area** (current): a measurement per axis plus `align: fill`.
//!   `100`, `"100px"`, `"25%"`, `{ "value": 1, "base": 4 }`, `{ "percent": 0.5 }`,
//!   `"hug"`, `"grow"`, `{ "grow": 2 }`.
//! - **sizing** (legacy): explicit mode tags,
//!   `{ "mode": "fixed" | "percent" | "fraction" | "fill" | "hug" | "grow", ... }`.
//!
//! Fractions are normalized to percents here and never reach the resolver.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{Align, Axis, Measure, SizeSpec};

/// A position or length written in the area vocabulary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MeasureInput {
    Px(f32),
    /// `"12"`, `"12px"` or `"50%"`.
    Token(String),
    Fraction { value: f32, base: f32 },
    Percent { percent: f32 },
}

impl From<f32> for MeasureInput {
    fn from(value: f32) -> Self {
        MeasureInput::Px(value)
    }
}

impl From<&str> for MeasureInput {
    fn from(token: &str) -> Self {
        MeasureInput::Token(token.to_string())
    }
}

/// A size written in the area vocabulary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SizeInput {
    Px(f32),
    /// `"12px"`, `"50%"`, `"hug"`, `"grow"`, ...
    Token(String),
    Fraction { value: f32, base: f32 },
    Percent { percent: f32 },
    Grow { grow: f32 },
}

impl SizeInput {
    pub fn percent(percent: f32) -> Self {
        SizeInput::Percent { percent }
    }

    pub fn grow(weight: f32) -> Self {
        SizeInput::Grow { grow: weight }
    }

    pub fn hug() -> Self {
        SizeInput::Token("hug".to_string())
    }
}

impl From<f32> for SizeInput {
    fn from(value: f32) -> Self {
        SizeInput::Px(value)
    }
}

impl From<&str> for SizeInput {
    fn from(token: &str) -> Self {
        SizeInput::Token(token.to_string())
    }
}

/// A legacy explicit size-mode declaration for one axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeMode {
    pub mode: String,
    #[serde(default)]
    pub value: Option<f32>,
    #[serde(default)]
    pub base: Option<f32>,
    #[serde(default)]
    pub weight: Option<f32>,
}

impl SizeMode {
    pub fn new(mode: &str) -> Self {
        Self {
            mode: mode.to_string(),
            value: None,
            base: None,
            weight: None,
        }
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }
}

/// What one axis resolves to after either front-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSizing {
    pub size: SizeSpec,
    /// Alignment implied by the declaration (`fill` in the legacy vocabulary).
    pub align: Option<Align>,
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

/// Parse `"12"`, `"12px"` or `"50%"`.
fn parse_length_token(field: &'static str, token: &str) -> Result<Measure, ConfigError> {
    let trimmed = token.trim();
    if let Some(number) = trimmed.strip_suffix('%') {
        let percent: f32 = number
            .trim()
            .parse()
            .map_err(|_| invalid(field, format!("`{token}` is not a percentage")))?;
        return Ok(Measure::Percent(percent / 100.0));
    }
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number
        .trim()
        .parse()
        .map(Measure::Px)
        .map_err(|_| invalid(field, format!("`{token}` is not a length")))
}

/// Normalize an anchor or length in the area vocabulary.
pub fn parse_measure(field: &'static str, input: &MeasureInput) -> Result<Measure, ConfigError> {
    match input {
        MeasureInput::Px(v) => Ok(Measure::Px(*v)),
        MeasureInput::Token(token) => parse_length_token(field, token),
        MeasureInput::Fraction { value, base } => Measure::fraction(*value, *base),
        MeasureInput::Percent { percent } => Ok(Measure::Percent(*percent)),
    }
}

/// Area front-end: a size declaration to its spec.
pub fn from_size_input(axis: Axis, input: &SizeInput) -> Result<SizeSpec, ConfigError> {
    let field = axis.extent_name();
    match input {
        SizeInput::Px(v) => Ok(SizeSpec::Px(*v)),
        SizeInput::Token(token) => match token.trim().to_lowercase().as_str() {
            "hug" | "auto" | "fit" | "content" => Ok(SizeSpec::Hug),
            "grow" | "flex" => Ok(SizeSpec::Grow(1.0)),
            _ => parse_length_token(field, token).map(SizeSpec::from),
        },
        SizeInput::Fraction { value, base } => Measure::fraction(*value, *base).map(SizeSpec::from),
        SizeInput::Percent { percent } => Ok(SizeSpec::Percent(*percent)),
        SizeInput::Grow { grow } => Ok(SizeSpec::Grow(*grow)),
    }
}

/// Legacy front-end: an explicit mode tag to the same contract.
pub fn from_size_mode(axis: Axis, mode: &SizeMode) -> Result<AxisSizing, ConfigError> {
    let require_value = || {
        mode.value.ok_or_else(|| {
            invalid(
                "sizing",
                format!("mode `{}` on the {axis} axis needs a value", mode.mode),
            )
        })
    };
    let plain = |size: SizeSpec| AxisSizing { size, align: None };

    match mode.mode.trim().to_lowercase().as_str() {
        "fixed" | "px" => Ok(plain(SizeSpec::Px(require_value()?))),
        "percent" => Ok(plain(SizeSpec::Percent(require_value()?))),
        "fraction" => {
            let base = mode.base.ok_or_else(|| {
                invalid("sizing", format!("fraction on the {axis} axis needs a base"))
            })?;
            Measure::fraction(require_value()?, base).map(|m| plain(m.into()))
        }
        "fill" => Ok(AxisSizing {
            size: SizeSpec::Percent(1.0),
            align: Some(Align::Fill),
        }),
        "hug" | "fit" => Ok(plain(SizeSpec::Hug)),
        "grow" | "flex" => Ok(plain(SizeSpec::Grow(mode.weight.unwrap_or(1.0)))),
        other => Err(ConfigError::InvalidKeyword {
            field: "sizing mode",
            value: other.to_string(),
        }),
    }
}
