// src/core/html.rs

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Case-insensitive substring search from `from`. Returns absolute index.
pub fn find_ci(s: &str, pat: &str, from: usize) -> Option<usize> {
    let lc = to_lower(s);
    let p = to_lower(pat);
    lc.get(from..)?.find(&p).map(|i| i + from)
}

/// Inner text between the first `open_pat...>` and the following `close_pat`.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}

/// The full opening tag starting at `start` (up to and including '>').
pub fn open_tag_at(s: &str, start: usize) -> Option<&str> {
    let end = s[start..].find('>')? + start + 1;
    Some(&s[start..end])
}

/// Value of `name="..."` inside a single tag. Quotes required.
pub fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let i = find_ci(tag, &needle, 0)? + needle.len();
    let j = tag[i..].find('"')? + i;
    Some(&tag[i..j])
}

/// End index (exclusive) of the first `close` that is followed, across
/// whitespace only, by a second `close`. Mirrors a non-greedy
/// `[\s\S]*?</div>\s*</div>` match.
pub fn find_double_close(s: &str, from: usize, close: &str) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = find_ci(s, close, pos) {
        let after_first = i + close.len();
        let rest = &s[after_first..];
        let ws = rest.len() - rest.trim_start().len();
        if find_ci(rest, close, 0) == Some(ws) {
            return Some(after_first + ws + close.len());
        }
        pos = after_first;
    }
    None
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}
