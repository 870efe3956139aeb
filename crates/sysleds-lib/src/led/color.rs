//! Color helpers for LED control.
//!
//! Colors use the packed format `0xAARRGGBB`; only the low 24 bits are
//! significant.

/// Mask selecting the 24 significant color bits.
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// True if any of the red, green or blue bytes is non-zero.
pub fn is_lit(color: u32) -> bool {
    color & RGB_MASK != 0
}

/// Luma approximation: `(77*R + 150*G + 29*B) >> 8`.
///
/// The weights sum to 256, so the result always fits in a byte.
pub fn rgb_to_brightness(color: u32) -> u8 {
    let (r, g, b) = split_rgb(color);
    let luma = (77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b)) >> 8;
    luma as u8
}

/// Split a packed color into its red, green and blue bytes.
pub fn split_rgb(color: u32) -> (u8, u8, u8) {
    let [_, r, g, b] = color.to_be_bytes();
    (r, g, b)
}

/// Parse a color string into `0x00RRGGBB`.
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
/// - Packed: `"0xFF00FF00"` (alpha byte dropped)
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`, `"off"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(0x00FF_0000),
        "green" => return Ok(0x0000_FF00),
        "blue" => return Ok(0x0000_00FF),
        "white" => return Ok(0x00FF_FFFF),
        "orange" => return Ok(0x00FF_8000),
        "yellow" => return Ok(0x00FF_FF00),
        "purple" => return Ok(0x0080_00FF),
        "cyan" => return Ok(0x0000_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    if let Some(packed) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if packed.is_empty() || packed.len() > 8 || !is_hex_digits(packed) {
            return Err(crate::LightsError::Color(format!(
                "Invalid packed color: {s} (use 0xAARRGGBB)"
            )));
        }
        let val = u32::from_str_radix(packed, 16)
            .map_err(|_| crate::LightsError::Color(format!("Invalid packed color: {s}")))?;
        return Ok(val & RGB_MASK);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !is_hex_digits(hex) {
        return Err(crate::LightsError::Color(format!(
            "Invalid color: {s} (use #RRGGBB, 0xAARRGGBB or a color name)"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LightsError::Color(format!("Invalid hex color: {s}")))
}

/// `from_str_radix` tolerates a leading sign; color strings must not.
fn is_hex_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Format a color as `#RRGGBB`, ignoring alpha.
pub fn format_color(color: u32) -> String {
    let (r, g, b) = split_rgb(color);
    format!("#{r:02X}{g:02X}{b:02X}")
}
