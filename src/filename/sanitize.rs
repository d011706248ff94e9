//! Filesystem-safe file names.

/// Character substituted for anything that cannot appear in a file name.
pub const REPLACEMENT: char = '!';

/// Longest file name produced, in characters.
pub const MAX_FILENAME_LENGTH: usize = 100;

const WINDOWS_RESERVED: &[&str] = &["con", "prn", "aux", "nul"];

fn is_reserved_char(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

fn is_windows_reserved(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name).to_ascii_lowercase();
    if WINDOWS_RESERVED.contains(&stem.as_str()) {
        return true;
    }
    match stem.as_bytes() {
        [a, b, c, d] => {
            (&[*a, *b, *c] == b"com" || &[*a, *b, *c] == b"lpt") && (b'1'..=b'9').contains(d)
        }
        _ => false,
    }
}

/// Turn `name` into something every common filesystem accepts.
///
/// Reserved characters and control characters become [`REPLACEMENT`],
/// leading dots are replaced, runs of the replacement collapse and are
/// trimmed from both ends, Windows device names get a suffix and overlong
/// names are shortened while keeping their extension.
///
/// ```rust
/// use downl::filename::sanitize_filename;
///
/// assert_eq!(sanitize_filename("foo*bar.zip"), "foo!bar.zip");
/// assert_eq!(sanitize_filename("a/b\\c"), "a!b!c");
/// assert_eq!(sanitize_filename("CON"), "CON!");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let mut replaced: String = name
        .trim()
        .chars()
        .map(|c| if is_reserved_char(c) { REPLACEMENT } else { c })
        .collect();

    // "..", "../x" and friends must not escape the destination.
    if replaced.starts_with('.') {
        let rest = replaced.trim_start_matches(|c| c == '.' || c == REPLACEMENT);
        replaced = format!("{REPLACEMENT}{rest}");
    }

    let mut collapsed = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        if c == REPLACEMENT && collapsed.ends_with(REPLACEMENT) {
            continue;
        }
        collapsed.push(c);
    }

    let mut out = if collapsed.chars().count() > 1 {
        collapsed.trim_matches(REPLACEMENT).to_string()
    } else {
        collapsed
    };

    if is_windows_reserved(&out) {
        // The suffix goes on the stem so `nul.txt` keeps its extension.
        let stem_end = out.find('.').unwrap_or(out.len());
        out.insert(stem_end, REPLACEMENT);
    }

    truncate(out)
}

fn truncate(name: String) -> String {
    if name.chars().count() <= MAX_FILENAME_LENGTH {
        return name;
    }
    match name.rfind('.') {
        // The extension only survives when some of the stem fits next to it.
        Some(idx) if idx > 0 && name[idx..].chars().count() < MAX_FILENAME_LENGTH => {
            let (stem, ext) = name.split_at(idx);
            let keep = MAX_FILENAME_LENGTH - ext.chars().count();
            let stem: String = stem.chars().take(keep).collect();
            format!("{stem}{ext}")
        }
        _ => name.chars().take(MAX_FILENAME_LENGTH).collect(),
    }
}
