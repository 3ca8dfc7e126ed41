//! Color string utilities.
//!
//! Drawing engines normalize colors inconsistently: a hex fill can read
//! back as `rgb(r, g, b)`. These helpers let the mediators present hex
//! to the panels regardless.

/// Check whether `color` is an `rgb(r, g, b)` string.
#[must_use]
pub fn is_rgb_color(color: &str) -> bool {
    parse_rgb(color).is_some()
}

/// Check whether `color` is a `#rgb` or `#rrggbb` hex string.
#[must_use]
pub fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Convert an `rgb(r, g, b)` string to `#rrggbb`. Inputs that are not
/// rgb strings are returned unchanged.
#[must_use]
pub fn rgb_to_hex(color: &str) -> String {
    match parse_rgb(color) {
        Some((r, g, b)) => format!("#{r:02x}{g:02x}{b:02x}"),
        None => color.to_string(),
    }
}

/// Whether a hex color is light (HSL lightness above 50%). Used to pick
/// contrasting foregrounds over slide backgrounds.
#[must_use]
pub fn is_light(hex: &str) -> bool {
    let Some((r, g, b)) = parse_hex(hex) else {
        return false;
    };
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let lightness = (cmax + cmin) / 2.0;
    lightness > 0.5
}

fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let inner = color.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b))
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    match digits.len() {
        3 => {
            let mut chars = digits.chars();
            let r = chars.next()?.to_digit(16)? as u8;
            let g = chars.next()?.to_digit(16)? as u8;
            let b = chars.next()?.to_digit(16)? as u8;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rgb_color() {
        assert!(is_rgb_color("rgb(0, 128, 255)"));
        assert!(is_rgb_color("rgb(0,128,255)"));
        assert!(!is_rgb_color("#aabbcc"));
        assert!(!is_rgb_color("rgb(0, 128)"));
        assert!(!is_rgb_color("rgb(0, 128, 255, 1)"));
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#abc"));
        assert!(is_hex_color("#AABBCC"));
        assert!(!is_hex_color("abc"));
        assert!(!is_hex_color("#abcd"));
        assert!(!is_hex_color("#xyzxyz"));
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex("rgb(255, 0, 0)"), "#ff0000");
        assert_eq!(rgb_to_hex("rgb(1, 2, 3)"), "#010203");
        // Non-rgb input passes through untouched.
        assert_eq!(rgb_to_hex("#123456"), "#123456");
    }

    #[test]
    fn test_is_light() {
        assert!(is_light("#ffffff"));
        assert!(is_light("#fff"));
        assert!(!is_light("#000000"));
        assert!(!is_light("#1a1a2e"));
        assert!(!is_light("not-a-color"));
    }
}
