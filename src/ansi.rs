//! ANSI terminal styling: [`AnsiStyle`] as a concrete annotation type, plus
//! a renderer that turns an annotated stream into SGR escape sequences.
//!
//! Styles nest by merging: entering a region pushes the region's style
//! merged over the enclosing one, and leaving re-emits the enclosing style
//! in full — SGR has no way to pop a single attribute, so every transition
//! is a reset followed by the complete attribute list.

use crate::simple_doc::{RenderError, SimpleDoc};
use std::cell::RefCell;
use std::ops::Add;

/// The eight base terminal colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Intensity {
    Dull,
    Vivid,
}

/// A set of optional style facets. [`AnsiStyle::default`] is the empty
/// style; [`AnsiStyle::combine`] (also `+`) merges left-biased, so the
/// left operand's facets win where both are set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct AnsiStyle {
    pub foreground: Option<(Intensity, Color)>,
    pub background: Option<(Intensity, Color)>,
    pub bold: bool,
    pub italicized: bool,
    pub underlined: bool,
}

impl AnsiStyle {
    pub fn empty() -> AnsiStyle {
        AnsiStyle::default()
    }

    /// Left-biased merge: facets set on `self` beat facets set on `other`.
    pub fn combine(self, other: AnsiStyle) -> AnsiStyle {
        AnsiStyle {
            foreground: self.foreground.or(other.foreground),
            background: self.background.or(other.background),
            bold: self.bold || other.bold,
            italicized: self.italicized || other.italicized,
            underlined: self.underlined || other.underlined,
        }
    }

    /// The SGR escape sequence selecting exactly this style: a reset
    /// followed by each set facet.
    pub fn to_raw_string(&self) -> String {
        let mut codes = vec![0];
        if let Some((intensity, color)) = self.foreground {
            codes.push(
                match intensity {
                    Intensity::Dull => 30,
                    Intensity::Vivid => 90,
                } + color.code(),
            );
        }
        if let Some((intensity, color)) = self.background {
            codes.push(
                match intensity {
                    Intensity::Dull => 40,
                    Intensity::Vivid => 100,
                } + color.code(),
            );
        }
        if self.bold {
            codes.push(1);
        }
        if self.underlined {
            codes.push(4);
        }
        if self.italicized {
            codes.push(3);
        }
        let body = codes
            .iter()
            .map(|code| code.to_string())
            .collect::<Vec<_>>()
            .join(";");
        format!("\x1b[{}m", body)
    }
}

impl Add<AnsiStyle> for AnsiStyle {
    type Output = AnsiStyle;

    /// Shorthand for [`AnsiStyle::combine`].
    fn add(self, other: AnsiStyle) -> AnsiStyle {
        self.combine(other)
    }
}

impl Color {
    fn code(self) -> i32 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
        }
    }
}

pub fn color(c: Color) -> AnsiStyle {
    AnsiStyle {
        foreground: Some((Intensity::Vivid, c)),
        ..AnsiStyle::default()
    }
}

pub fn color_dull(c: Color) -> AnsiStyle {
    AnsiStyle {
        foreground: Some((Intensity::Dull, c)),
        ..AnsiStyle::default()
    }
}

pub fn bg_color(c: Color) -> AnsiStyle {
    AnsiStyle {
        background: Some((Intensity::Vivid, c)),
        ..AnsiStyle::default()
    }
}

pub fn bg_color_dull(c: Color) -> AnsiStyle {
    AnsiStyle {
        background: Some((Intensity::Dull, c)),
        ..AnsiStyle::default()
    }
}

pub fn bold() -> AnsiStyle {
    AnsiStyle {
        bold: true,
        ..AnsiStyle::default()
    }
}

pub fn italicized() -> AnsiStyle {
    AnsiStyle {
        italicized: true,
        ..AnsiStyle::default()
    }
}

pub fn underlined() -> AnsiStyle {
    AnsiStyle {
        underlined: true,
        ..AnsiStyle::default()
    }
}

impl SimpleDoc<AnsiStyle> {
    /// Render to a string with embedded SGR escape codes. Built on
    /// [`SimpleDoc::render_decorated`]; keeps a stack of merged styles so
    /// leaving a region restores exactly the enclosing style.
    pub fn render_ansi_string(&self) -> Result<String, RenderError> {
        let styles = RefCell::new(vec![AnsiStyle::empty()]);
        self.render_decorated(
            String::new(),
            |mut acc, piece| {
                acc.push_str(&piece);
                acc
            },
            |text| text.to_owned(),
            |ann| {
                let mut stack = styles.borrow_mut();
                let top = stack.last().copied().unwrap_or_default();
                let merged = ann.combine(top);
                stack.push(merged);
                merged.to_raw_string()
            },
            |_closed| {
                let mut stack = styles.borrow_mut();
                stack.pop();
                stack.last().copied().unwrap_or_default().to_raw_string()
            },
        )
    }
}
