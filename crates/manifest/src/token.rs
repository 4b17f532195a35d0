//! Drawable token derivation.

/// Derives the icon resource token for a display name.
///
/// Transliterates Unicode to ASCII with `deunicode`, lowercases, maps
/// runs of non-alphanumeric characters to a single `_`, and trims the
/// ends. Falls back to `"icon"` when nothing survives, so the token is
/// always a usable resource key.
pub fn drawable_token(name: &str) -> String {
    let transliterated = deunicode::deunicode(name);
    let mut out = String::with_capacity(transliterated.len());

    for ch in transliterated.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        return "icon".to_string();
    }
    out
}
