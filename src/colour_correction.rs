use rgb::RGB;

pub const WHITE_RGB: RGB<u8> = RGB::new(255, 255, 255);
pub const BLACK_RGB: RGB<u8> = RGB::new(0, 0, 0);

/// Normalize a colour string to 6-char RRGGBB (no '#').
///
/// Rules:
/// - Strip all non-hex chars (this removes '#').
/// - Uppercase A–F.
/// - If exactly 6 chars: keep as-is.
/// - If exactly 3 chars: expand like CSS "ABC" -> "AABBCC".
/// - If 1–5 chars: left-pad with '0' to reach length 6.
/// - If >6 chars: use the **last** 6 chars.
/// - If there are no hex chars at all: return None.
pub fn normalize_colour(input: &str) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let hex: String = s
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    match hex.len() {
        0 => None,
        6 => Some(hex),
        3 => Some(hex.chars().flat_map(|ch| [ch, ch]).collect()),
        n if n > 6 => Some(hex[n - 6..].to_string()),
        n => Some(format!("{}{}", "0".repeat(6 - n), hex)),
    }
}

pub fn parse_hex_rgb(input: &str) -> Option<RGB<u8>> {
    let hex = normalize_colour(input)?;

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(RGB::new(r, g, b))
}

pub fn rgb_to_hex(colour: RGB<u8>) -> String {
    format!("{:02X}{:02X}{:02X}", colour.r, colour.g, colour.b)
}

/// Feed colour as the agency wants to see it. Black is how this feed marks
/// "no colour", so it is dropped.
pub fn fix_feed_colour(colour: Option<&str>) -> Option<RGB<u8>> {
    let colour = parse_hex_rgb(colour?)?;

    if colour == BLACK_RGB {
        None
    } else {
        Some(colour)
    }
}

pub fn contrasting_text_colour(background: RGB<u8>) -> RGB<u8> {
    // ITU-R BT.601 luma
    let luma =
        0.299 * background.r as f32 + 0.587 * background.g as f32 + 0.114 * background.b as f32;

    if luma > 150.0 { BLACK_RGB } else { WHITE_RGB }
}
