//! A collection of constants.

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// First codepoint of the braille block; adding an 8-bit dot pattern
/// selects the glyph.
pub const BRAILLE_BASE: u32 = 0x2800;

/// Chart width in character cells when neither the caller nor the
/// terminal supplies one.
pub const DEFAULT_WIDTH: usize = 80;
/// Chart height in character cells when neither the caller nor the
/// terminal supplies one.
pub const DEFAULT_HEIGHT: usize = 20;

/// Decimal places on the Min/Max annotation lines.
///
/// 14.83219 becomes 14.8322
pub const MINMAX_DECIMALS: usize = 4;

/// Capacity of a fixed store created without an explicit one.
pub const DEFAULT_CAPACITY: usize = 2048;
