//! Content Measurement
//!
//! Hug sizing asks a [`ContentMeasurer`] how much room a node's content
//! needs. The engine never interprets content itself.
//!
//! - [`OpaqueContent`]: every payload measures 0 (the default).
//! - [`CellMeasurer`]: text in terminal cells, using `unicode-width`.
//!   ASCII is 1 cell, CJK and most emoji 2, combining marks 0.

use taffy::geometry::Size;
use unicode_width::UnicodeWidthStr;

use crate::types::{Axis, Content};

/// Reports the natural extent of a node's content on one axis.
///
/// `available` is the node's inner space on each axis, when known. Text
/// measurers use `available.width` to wrap before counting lines.
pub trait ContentMeasurer {
    fn measure(&self, content: &Content, axis: Axis, available: Size<Option<f32>>) -> f32;
}

/// Treats all content as having no intrinsic size.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueContent;

impl ContentMeasurer for OpaqueContent {
    fn measure(&self, _content: &Content, _axis: Axis, _available: Size<Option<f32>>) -> f32 {
        0.0
    }
}

/// Measures text content in terminal cells.
///
/// Width is the widest line. Height is the number of lines after wrapping
/// at the available width (unwrapped when the width is unknown).
/// Resources measure 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl ContentMeasurer for CellMeasurer {
    fn measure(&self, content: &Content, axis: Axis, available: Size<Option<f32>>) -> f32 {
        let Content::Text(text) = content else {
            return 0.0;
        };
        match axis {
            Axis::X => text.lines().map(string_width).max().unwrap_or(0) as f32,
            Axis::Y => {
                let wrap = available.width.map(|w| w.max(0.0).floor() as usize);
                measure_text_height(text, wrap) as f32
            }
        }
    }
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Lines `text` occupies when wrapped at `available_width` cells.
///
/// Wrapping is per character; explicit newlines always break. Empty text is
/// 0 lines, and a zero width degenerates to one line per source line.
pub fn measure_text_height(text: &str, available_width: Option<usize>) -> usize {
    if text.is_empty() {
        return 0;
    }

    let Some(width) = available_width.filter(|w| *w > 0) else {
        return text.lines().count().max(1);
    };

    text.lines()
        .map(|line| {
            let mut lines = 1;
            let mut current = 0;
            for c in line.chars() {
                let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
                if current + char_width > width && current > 0 {
                    lines += 1;
                    current = char_width;
                } else {
                    current += char_width;
                }
            }
            lines
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbounded() -> Size<Option<f32>> {
        Size { width: None, height: None }
    }

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_string_width_wide_chars() {
        assert_eq!(string_width("日本"), 4);
    }

    #[test]
    fn test_text_height_wraps() {
        assert_eq!(measure_text_height("hello world", Some(5)), 3);
        assert_eq!(measure_text_height("hello", Some(10)), 1);
        assert_eq!(measure_text_height("a\nb\nc", Some(10)), 3);
        assert_eq!(measure_text_height("", Some(10)), 0);
    }

    #[test]
    fn test_text_height_unwrapped() {
        assert_eq!(measure_text_height("one\ntwo", None), 2);
        assert_eq!(measure_text_height("one", Some(0)), 1);
    }

    #[test]
    fn test_cell_measurer_text() {
        let text = Content::Text("ab\nwider".to_string());
        assert_eq!(CellMeasurer.measure(&text, Axis::X, unbounded()), 5.0);
        assert_eq!(CellMeasurer.measure(&text, Axis::Y, unbounded()), 2.0);

        let narrow = Size { width: Some(3.0), height: None };
        assert_eq!(CellMeasurer.measure(&text, Axis::Y, narrow), 3.0);
    }

    #[test]
    fn test_resources_and_opaque_measure_zero() {
        let resource = Content::Resource("icon.png".to_string());
        assert_eq!(CellMeasurer.measure(&resource, Axis::X, unbounded()), 0.0);

        let text = Content::Text("hello".to_string());
        assert_eq!(OpaqueContent.measure(&text, Axis::X, unbounded()), 0.0);
    }
}
