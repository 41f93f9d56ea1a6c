/// Normalize a source color attribute to `#RRGGBB`, or `None` for "no color".
///
/// `#RRGGBB` passes through unchanged and `rgb(r, g, b)` becomes uppercase hex. `none` and
/// anything else, shorthand `#RGB` included, map to `None`.
pub fn convert_color(raw: &str) -> Option<String> {
    let s = raw.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let valid = hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit());
        return valid.then(|| s.to_owned());
    }
    if s == "none" {
        return None;
    }
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return None;
    };
    Some(format!(
        "#{:02X}{:02X}{:02X}",
        channel(r)?,
        channel(g)?,
        channel(b)?
    ))
}

fn channel(s: &str) -> Option<u8> {
    let v: f64 = s.parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(v.round().clamp(0.0, 255.0) as u8)
}
