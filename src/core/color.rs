//! Zero-alloc ANSI colour wrapper + the colour-id palette.  No external deps.
//!
//! Rasterized pixels carry small integer colour ids; [`Palette`] resolves an
//! id to the escape emitted at glyph-encoding time.  Ids 0 and 1 both mean
//! "no colour" (terminal default foreground).

use std::{fmt, str};

#[derive(Debug)]
pub enum ColorError {
    InvalidHexDigit,
    InvalidHexLength,
    UnknownName(String),
}

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

impl AnsiCode {
    /// Terminal default foreground, the "no colour" escape.
    pub const fn default_fg() -> Self {
        Self::Static("\x1b[39m")
    }
    pub const fn red() -> Self {
        Self::Static("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self::Static("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self::Static("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self::Static("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self::Static("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self::Static("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self::Static("\x1b[37m")
    }
    pub const fn orange() -> Self {
        Self::Static("\x1b[38;2;255;165;0m")
    }
    pub const fn pink() -> Self {
        Self::Static("\x1b[38;2;255;105;180m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            len: len as u8,
        }
    }

    /// Parse colour names or `#rrggbb`.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "none" => Ok(Self::default_fg()),
            "red" => Ok(Self::red()),
            "green" => Ok(Self::green()),
            "yellow" => Ok(Self::yellow()),
            "blue" => Ok(Self::blue()),
            "magenta" => Ok(Self::magenta()),
            "cyan" => Ok(Self::cyan()),
            "white" => Ok(Self::white()),
            "orange" => Ok(Self::orange()),
            "pink" => Ok(Self::pink()),
            other if other.starts_with('#') => Self::from_hex(other),
            other => Err(ColorError::UnknownName(other.to_string())),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            // buf only ever holds ASCII escape bytes
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or(""),
        }
    }
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}

// --- Palette ---

/// Colour ids handed to [`ColorMode::Auto`](crate::core::config::ColorMode),
/// in cycling order.
pub const AUTO_COLOR_IDS: [u8; 7] = [2, 3, 4, 5, 6, 7, 8];

/// Neutral id every series gets under
/// [`ColorMode::Monochrome`](crate::core::config::ColorMode).
pub const NEUTRAL_COLOR_ID: u8 = 1;

/// Maps small positive colour ids to terminal escapes.
///
/// Index = id.  Ids past the end of the table resolve to the default
/// foreground, so lookups are total.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    codes: Vec<AnsiCode>,
}

impl Palette {
    /// `0`/`1` default, `2` red, `3` blue, `4` green, `5` yellow,
    /// `6` magenta, `7` orange, `8` pink.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            codes: vec![
                AnsiCode::default_fg(),
                AnsiCode::default_fg(),
                AnsiCode::red(),
                AnsiCode::blue(),
                AnsiCode::green(),
                AnsiCode::yellow(),
                AnsiCode::magenta(),
                AnsiCode::orange(),
                AnsiCode::pink(),
            ],
        }
    }

    /// Escape for a colour id; out-of-range ids are "no colour".
    #[inline]
    #[must_use]
    pub fn escape(&self, id: u8) -> AnsiCode {
        self.codes
            .get(id as usize)
            .copied()
            .unwrap_or_else(AnsiCode::default_fg)
    }

    /// Replace the escape behind one id (e.g. a user-picked `--color`).
    pub fn set(&mut self, id: u8, code: AnsiCode) {
        let idx = id as usize;
        if idx >= self.codes.len() {
            self.codes.resize(idx + 1, AnsiCode::default_fg());
        }
        self.codes[idx] = code;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidHexDigit => f.write_str("invalid hex colour digit"),
            ColorError::InvalidHexLength => f.write_str("hex colour must be exactly 6 digits"),
            ColorError::UnknownName(s) => write!(f, "unknown colour name `{s}`"),
        }
    }
}
impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_escape_shape() {
        assert_eq!(AnsiCode::rgb(255, 165, 0).as_str(), "\x1b[38;2;255;165;0m");
        assert_eq!(AnsiCode::rgb(0, 7, 42).as_str(), "\x1b[38;2;0;7;42m");
    }

    #[test]
    fn from_name_and_hex() {
        assert_eq!(AnsiCode::from_name("Red").unwrap(), AnsiCode::red());
        assert_eq!(
            AnsiCode::from_name("#ffa500").unwrap().as_str(),
            AnsiCode::orange().as_str()
        );
        assert!(AnsiCode::from_name("#12345").is_err());
        assert!(AnsiCode::from_name("#12345g").is_err());
        assert!(matches!(
            AnsiCode::from_name("crimson"),
            Err(ColorError::UnknownName(_))
        ));
    }

    #[test]
    fn palette_total_lookup() {
        let p = Palette::standard();
        assert_eq!(p.escape(0), AnsiCode::default_fg());
        assert_eq!(p.escape(1), AnsiCode::default_fg());
        assert_eq!(p.escape(2), AnsiCode::red());
        assert_eq!(p.escape(200), AnsiCode::default_fg());
    }

    #[test]
    fn palette_set_extends() {
        let mut p = Palette::standard();
        p.set(12, AnsiCode::cyan());
        assert_eq!(p.escape(12), AnsiCode::cyan());
        assert_eq!(p.escape(10), AnsiCode::default_fg());
    }
}
