//! Keyword parsing with alias normalization.
//!
//! Every keyword accepts its canonical spelling plus a small set of
//! shorthand aliases (arrows, CSS-ish words). Matching is case-insensitive
//! after trimming. Only the canonical enum value is ever stored.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{Align, Direction, Pivot};

const START: &[&str] = &["start", "<", "^", "←", "↑", "left", "top"];
const CENTER: &[&str] = &["center", "|", "-", "·", "middle"];
const END: &[&str] = &["end", ">", "v", "→", "↓", "right", "bottom"];
const FILL: &[&str] = &["fill", "<>", "^v", "↔", "↕", "stretch"];

const ROW: &[&str] = &["row", "horizontal", "x"];
const COLUMN: &[&str] = &["column", "col", "vertical", "y"];

fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

fn matches(table: &[&str], token: &str) -> bool {
    table.contains(&token)
}

/// Parse an alignment keyword (`start`, `center`, `end`, `fill` or an alias).
pub fn parse_align(token: &str) -> Result<Align, ConfigError> {
    let key = normalize(token);
    if matches(START, &key) {
        Ok(Align::Start)
    } else if matches(CENTER, &key) {
        Ok(Align::Center)
    } else if matches(END, &key) {
        Ok(Align::End)
    } else if matches(FILL, &key) {
        Ok(Align::Fill)
    } else {
        Err(ConfigError::InvalidKeyword {
            field: "align",
            value: token.to_string(),
        })
    }
}

/// Parse a pivot keyword. Fill tokens are rejected: a pivot is a point.
pub fn parse_pivot(token: &str) -> Result<Pivot, ConfigError> {
    let key = normalize(token);
    if matches(START, &key) {
        Ok(Pivot::Start)
    } else if matches(CENTER, &key) {
        Ok(Pivot::Center)
    } else if matches(END, &key) {
        Ok(Pivot::End)
    } else {
        Err(ConfigError::InvalidKeyword {
            field: "pivot",
            value: token.to_string(),
        })
    }
}

pub fn parse_direction(token: &str) -> Result<Direction, ConfigError> {
    let key = normalize(token);
    if matches(ROW, &key) {
        Ok(Direction::Row)
    } else if matches(COLUMN, &key) {
        Ok(Direction::Column)
    } else {
        Err(ConfigError::InvalidKeyword {
            field: "direction",
            value: token.to_string(),
        })
    }
}

impl FromStr for Align {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_align(s)
    }
}

impl FromStr for Pivot {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pivot(s)
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_direction(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_and_alias_align_agree() {
        for (canonical, aliases) in [
            ("start", START),
            ("center", CENTER),
            ("end", END),
            ("fill", FILL),
        ] {
            let expected = parse_align(canonical).unwrap();
            for alias in aliases {
                assert_eq!(parse_align(alias).unwrap(), expected, "alias {alias}");
            }
        }
    }

    #[test]
    fn test_align_case_and_whitespace() {
        assert_eq!(parse_align("  CENTER ").unwrap(), Align::Center);
        assert_eq!("Right".parse::<Align>().unwrap(), Align::End);
    }

    #[test]
    fn test_pivot_rejects_fill() {
        assert_eq!(parse_pivot("→").unwrap(), Pivot::End);
        assert_eq!(
            parse_pivot("fill"),
            Err(ConfigError::InvalidKeyword {
                field: "pivot",
                value: "fill".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_align_keyword() {
        let err = parse_align("sideways").unwrap_err();
        assert_eq!(err.to_string(), "invalid align keyword `sideways`");
    }

    #[test]
    fn test_direction_aliases() {
        assert_eq!(parse_direction("horizontal").unwrap(), Direction::Row);
        assert_eq!("col".parse::<Direction>().unwrap(), Direction::Column);
        assert!(parse_direction("diagonal").is_err());
    }
}
