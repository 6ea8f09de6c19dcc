//! Colors, alignment and per-cell styles.
//!
//! Widgets carry a coarse [`Style`] (colors plus text alignment); the renderer
//! turns it into a [`CellStyle`] per emitted cell.

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color as TermColor;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A terminal color: one of the sixteen named colors or a 24-bit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    DarkGrey,
    Rgb { r: u8, g: u8, b: u8 },
}

/// Error returned when a color string is neither a known name nor a hex code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised color {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#rrggbb`, `#rgb` and case-insensitive names such as `red`,
    /// `dark_blue` or `gray`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }

        let color = match trimmed.to_ascii_lowercase().as_str() {
            "reset" | "default" => Color::Reset,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "grey" | "gray" => Color::Grey,
            "dark_red" | "darkred" => Color::DarkRed,
            "dark_green" | "darkgreen" => Color::DarkGreen,
            "dark_yellow" | "darkyellow" => Color::DarkYellow,
            "dark_blue" | "darkblue" => Color::DarkBlue,
            "dark_magenta" | "darkmagenta" => Color::DarkMagenta,
            "dark_cyan" | "darkcyan" => Color::DarkCyan,
            "dark_grey" | "dark_gray" | "darkgrey" | "darkgray" => Color::DarkGrey,
            _ => return Err(ParseColorError(s.to_string())),
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb { r, g, b })
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::Rgb { r: r * 17, g: g * 17, b: b * 17 })
        }
        _ => None,
    }
}

impl From<Color> for TermColor {
    fn from(color: Color) -> TermColor {
        match color {
            Color::Reset => TermColor::Reset,
            Color::Black => TermColor::Black,
            Color::Red => TermColor::Red,
            Color::Green => TermColor::Green,
            Color::Yellow => TermColor::Yellow,
            Color::Blue => TermColor::Blue,
            Color::Magenta => TermColor::Magenta,
            Color::Cyan => TermColor::Cyan,
            Color::White => TermColor::White,
            Color::Grey => TermColor::Grey,
            Color::DarkRed => TermColor::DarkRed,
            Color::DarkGreen => TermColor::DarkGreen,
            Color::DarkYellow => TermColor::DarkYellow,
            Color::DarkBlue => TermColor::DarkBlue,
            Color::DarkMagenta => TermColor::DarkMagenta,
            Color::DarkCyan => TermColor::DarkCyan,
            Color::DarkGrey => TermColor::DarkGrey,
            Color::Rgb { r, g, b } => TermColor::Rgb { r, g, b },
        }
    }
}

// ---------------------------------------------------------------------------
// Align
// ---------------------------------------------------------------------------

/// Horizontal text alignment inside a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Column offset at which text of `len` cells starts in a row of `width`.
    pub fn offset(self, len: i32, width: i32) -> i32 {
        let slack = (width - len).max(0);
        match self {
            Align::Left => 0,
            Align::Center => slack / 2,
            Align::Right => slack,
        }
    }
}

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Per-node presentation: colors and text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub align: Align,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// The base cell style used for text drawn with this style.
    pub fn cell(&self) -> CellStyle {
        CellStyle { fg: self.fg, bg: self.bg, ..CellStyle::default() }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        };
        f.write_str(name)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
