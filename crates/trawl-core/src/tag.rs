//! Struct tag metadata.
//!
//! A tag is a string of `key:"value"` pairs separated by spaces, e.g.
//! `json:"name,omitempty" db:"name"`. Values are double-quoted and may use
//! backslash escapes.

use std::borrow::Cow;
use std::fmt;

/// Tag attached to a struct field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tag(&'static str);

impl Tag {
    pub const EMPTY: Tag = Tag("");

    pub const fn new(raw: &'static str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value under `key`, or an empty string if the key is absent or the tag
    /// is malformed before reaching it.
    pub fn get(&self, key: &str) -> Cow<'static, str> {
        self.lookup(key).unwrap_or(Cow::Borrowed(""))
    }

    /// Value under `key`, distinguishing an absent key from an empty value.
    pub fn lookup(&self, key: &str) -> Option<Cow<'static, str>> {
        let mut rest = self.0;

        while !rest.is_empty() {
            rest = rest.trim_start_matches(' ');
            let bytes = rest.as_bytes();

            let mut i = 0;
            while i < bytes.len()
                && bytes[i] > b' '
                && bytes[i] != b':'
                && bytes[i] != b'"'
                && bytes[i] != 0x7f
            {
                i += 1;
            }
            if i == 0 || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
                return None;
            }
            let name = &rest[..i];
            rest = &rest[i + 1..];

            let bytes = rest.as_bytes();
            let mut j = 1;
            while j < bytes.len() && bytes[j] != b'"' {
                if bytes[j] == b'\\' {
                    j += 1;
                }
                j += 1;
            }
            if j >= bytes.len() {
                return None;
            }
            let quoted = &rest[..=j];
            rest = &rest[j + 1..];

            if name == key {
                return unquote(quoted);
            }
        }

        None
    }

    /// Identifier under `key`: the value up to the first comma, with `-`
    /// meaning "no identifier".
    pub fn ident(&self, key: &str) -> Cow<'static, str> {
        match self.get(key) {
            Cow::Borrowed(value) => Cow::Borrowed(tag_ident(value)),
            Cow::Owned(value) => Cow::Owned(tag_ident(&value).to_owned()),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Leading identifier of a tag value: everything before the first comma.
/// Empty and `-` both mean "no identifier".
///
/// ```
/// use trawl_core::tag_ident;
///
/// assert_eq!(tag_ident("name,omitempty"), "name");
/// assert_eq!(tag_ident("-,omitempty"), "");
/// ```
pub fn tag_ident(value: &str) -> &str {
    let ident = value.split_once(',').map_or(value, |(head, _)| head);
    if ident == "-" { "" } else { ident }
}

/// Strip the surrounding quotes and resolve escapes. Borrows when there is
/// nothing to resolve.
fn unquote(quoted: &'static str) -> Option<Cow<'static, str>> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    if !inner.contains('\\') {
        return Some(Cow::Borrowed(inner));
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'x' => hex_char(&mut chars, 2)?,
            'u' => hex_char(&mut chars, 4)?,
            'U' => hex_char(&mut chars, 8)?,
            _ => return None,
        };
        out.push(escaped);
    }
    Some(Cow::Owned(out))
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}
