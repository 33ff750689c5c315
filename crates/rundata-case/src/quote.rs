//! Go double-quoted string literals.
//!
//! The declarations file is Go source, so values are written the way
//! `strconv.Quote` writes them and read back the way `strconv.Unquote` reads
//! double-quoted literals.

/// Quote `s` as a Go interpreted string literal, including the quotes.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x80 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if (c as u32) < 0x10000 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

// Close to Go's unicode.IsPrint: graphic characters plus the ASCII space.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{F0000}'..='\u{10FFFF}'
    )
}

/// Error from [`unquote`], describing what was wrong with the literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid string literal: {0}")]
pub struct UnquoteError(pub String);

/// Unquote a Go interpreted string literal (with its surrounding quotes).
pub fn unquote(literal: &str) -> Result<String, UnquoteError> {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| UnquoteError("missing surrounding double quotes".into()))?;

    // \x and octal escapes produce raw bytes, so decode into bytes first.
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Err(UnquoteError("unescaped double quote".into())),
            '\n' => return Err(UnquoteError("newline in string".into())),
            '\\' => {
                let esc = chars
                    .next()
                    .ok_or_else(|| UnquoteError("trailing backslash".into()))?;
                match esc {
                    'a' => bytes.push(0x07),
                    'b' => bytes.push(0x08),
                    'f' => bytes.push(0x0C),
                    'n' => bytes.push(b'\n'),
                    'r' => bytes.push(b'\r'),
                    't' => bytes.push(b'\t'),
                    'v' => bytes.push(0x0B),
                    '\\' => bytes.push(b'\\'),
                    '"' => bytes.push(b'"'),
                    'x' => {
                        let v = take_hex(&mut chars, 2)?;
                        bytes.push(v as u8);
                    }
                    'u' | 'U' => {
                        let digits = if esc == 'u' { 4 } else { 8 };
                        let v = take_hex(&mut chars, digits)?;
                        let ch = char::from_u32(v).ok_or_else(|| {
                            UnquoteError(format!("invalid code point \\{esc}{v:x}"))
                        })?;
                        let mut buf = [0u8; 4];
                        bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                    }
                    '0'..='7' => {
                        let mut v = esc as u32 - '0' as u32;
                        for _ in 0..2 {
                            let d = chars
                                .next()
                                .and_then(|d| d.to_digit(8))
                                .ok_or_else(|| UnquoteError("short octal escape".into()))?;
                            v = v * 8 + d;
                        }
                        if v > 0xFF {
                            return Err(UnquoteError(format!("octal escape out of range: {v:o}")));
                        }
                        bytes.push(v as u8);
                    }
                    other => {
                        return Err(UnquoteError(format!("unknown escape sequence \\{other}")))
                    }
                }
            }
            c => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(bytes).map_err(|_| UnquoteError("escapes do not form valid UTF-8".into()))
}

fn take_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<u32, UnquoteError> {
    let mut v = 0u32;
    for _ in 0..digits {
        let d = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or_else(|| UnquoteError(format!("expected {digits} hex digits")))?;
        v = v * 16 + d;
    }
    Ok(v)
}
