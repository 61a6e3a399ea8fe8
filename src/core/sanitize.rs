// src/core/sanitize.rs

/// Collapse runs of whitespace into a single space and trim.
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

/// Curly quotes → straight quotes.
pub fn straighten_quotes(s: &str) -> String {
    s.replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Trim, and append a period unless the text already ends with one.
/// Empty stays empty.
pub fn ensure_period(s: &str) -> String {
    let t = s.trim();
    if t.is_empty() || t.ends_with('.') { s!(t) } else { join!(t, ".") }
}

/// Canonical description text: single-spaced, period-terminated.
pub fn finish_description(s: &str) -> String {
    ensure_period(&normalize_ws(s))
}

/// Join wrapped PDF lines into one paragraph, keeping exactly one space
/// between the end of one line and the start of the next.
pub fn join_wrapped_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        let line = line.as_ref();
        out.push_str(line);
        if !line.ends_with(' ') {
            out.push(' ');
        }
    }
    out.replace("  ", " ")
}

/// Rosco prose: drop doubled periods and degree signs.
pub fn tidy_rosco_prose(s: &str) -> String {
    s.replace("..", ".").replace('\u{00b0}', "")
}
