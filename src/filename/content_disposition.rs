//! `Content-Disposition` header parsing.
//!
//! Handles the forms servers send in practice:
//!
//! - `attachment; filename="example.zip"`
//! - `attachment; filename=example.zip`
//! - `attachment; filename*=UTF-8''%E2%82%AC%20rates.pdf` (RFC 5987)
//!
//! When both `filename` and `filename*` are present the extended value wins.

use percent_encoding::percent_decode_str;

/// A parsed `Content-Disposition` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    /// Disposition type, lowercased (`attachment`, `inline`...).
    pub disposition: String,
    /// Parameters in header order with lowercased names.
    ///
    /// Extended (`name*`) parameters are stored decoded.
    pub parameters: Vec<(String, String)>,
}

impl ContentDisposition {
    /// Parse a header value. Returns `None` for malformed input.
    pub fn parse(header: &str) -> Option<Self> {
        let mut cursor = Cursor::new(header);

        let disposition = cursor.token()?.to_ascii_lowercase();
        let mut parameters: Vec<(String, String)> = Vec::new();

        loop {
            cursor.skip_whitespace();
            if cursor.is_empty() {
                break;
            }
            cursor.expect(';')?;
            cursor.skip_whitespace();
            // Tolerate a trailing ";".
            if cursor.is_empty() {
                break;
            }

            let name = cursor.token()?.to_ascii_lowercase();
            cursor.skip_whitespace();
            cursor.expect('=')?;
            cursor.skip_whitespace();

            let value = if name.ends_with('*') {
                decode_extended(&cursor.unquoted_value())?
            } else if cursor.peek() == Some('"') {
                cursor.quoted_string()?
            } else {
                cursor.unquoted_value()
            };

            if !parameters.iter().any(|(n, _)| *n == name) {
                parameters.push((name, value));
            }
        }

        Some(Self {
            disposition,
            parameters,
        })
    }

    /// Look up a parameter by (case-insensitive) name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.parameters
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The suggested file name, preferring `filename*` over `filename`.
    pub fn filename(&self) -> Option<&str> {
        self.parameter("filename*")
            .or_else(|| self.parameter("filename"))
            .filter(|f| !f.is_empty())
    }
}

/// Parse `header` and return its suggested file name, if any.
pub fn parse_content_disposition(header: &str) -> Option<String> {
    ContentDisposition::parse(header)?
        .filename()
        .map(String::from)
}

/// Decode an RFC 5987 `charset'language'value` string.
fn decode_extended(raw: &str) -> Option<String> {
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?.to_ascii_lowercase();
    let _language = parts.next()?;
    let encoded = parts.next()?;

    let bytes: Vec<u8> = percent_decode_str(encoded).collect();
    match charset.as_str() {
        "utf-8" => String::from_utf8(bytes).ok(),
        "iso-8859-1" => Some(bytes.into_iter().map(char::from).collect()),
        _ => None,
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input.trim(),
        }
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn expect(&mut self, c: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(c)?;
        Some(())
    }

    fn token(&mut self) -> Option<&'a str> {
        let end = self
            .rest
            .find(|c: char| !is_token_char(c))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }

    /// Everything up to the next `;`, trimmed.
    fn unquoted_value(&mut self) -> String {
        let end = self.rest.find(';').unwrap_or(self.rest.len());
        let (value, rest) = self.rest.split_at(end);
        self.rest = rest;
        value.trim().to_string()
    }

    fn quoted_string(&mut self) -> Option<String> {
        self.expect('"')?;
        let rest = self.rest;
        let mut out = String::new();
        let mut chars = rest.char_indices();
        while let Some((idx, c)) = chars.next() {
            match c {
                '"' => {
                    self.rest = &rest[idx + 1..];
                    return Some(out);
                }
                '\\' => out.push(chars.next()?.1),
                c => out.push(c),
            }
        }
        // Unterminated quoted string.
        None
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$&+-.^_`|~*%'".contains(c)
}
