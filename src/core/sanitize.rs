// src/core/sanitize.rs

/// Decode the handful of entities the Party Finder page actually emits.
pub fn decode_entities(s: &str) -> String {
    s.replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hex_apostrophe() {
        assert_eq!(decode_entities("Dragonsong&#x27;s Reprise"), "Dragonsong's Reprise");
    }

    #[test]
    fn amp_decoded_last() {
        assert_eq!(decode_entities("&amp;#x27;"), "&#x27;");
    }

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }
}
