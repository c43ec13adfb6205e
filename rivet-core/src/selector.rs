use std::fmt::{self, Write};

use crate::source::Element;

/// Attribute predicate used to locate mount points and refs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Selector<'a> {
    /// `[attr]`
    Has(&'a str),
    /// `[attr="value"]`, compared with plain string equality.
    Equals(&'a str, &'a str),
}

impl<'a> Selector<'a> {
    pub fn attr(&self) -> &'a str {
        match *self {
            Self::Has(attr) | Self::Equals(attr, _) => attr,
        }
    }

    pub fn matches<E: Element>(&self, element: &E) -> bool {
        match *self {
            Self::Has(attr) => element.attr(attr).is_some(),
            Self::Equals(attr, value) => element.attr(attr).as_deref() == Some(value),
        }
    }

    /// Renders the selector as CSS for native `querySelectorAll` lookups.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Has(attr) => {
                f.write_char('[')?;
                ident_escape(f, attr)?;
                f.write_char(']')
            }
            Self::Equals(attr, value) => {
                f.write_char('[')?;
                ident_escape(f, attr)?;
                f.write_str("=\"")?;
                css_escape(f, value)?;
                f.write_str("\"]")
            }
        }
    }
}

// See https://drafts.csswg.org/cssom/#serialize-an-identifier
fn ident_escape<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    let mut chars = s.chars().peekable();
    let mut first = true;
    let mut leading_dash = false;

    while let Some(c) = chars.next() {
        match c {
            '\0' => w.write_str("\u{FFFD}")?,
            '\u{1}'..='\u{1f}' | '\u{7f}' => write!(w, "\\{:x} ", c as u32)?,
            '0'..='9' if first || leading_dash => write!(w, "\\{:x} ", c as u32)?,
            '-' if first && chars.peek().is_none() => w.write_str("\\-")?,
            '-' | '_' | 'a'..='z' | 'A'..='Z' | '0'..='9' => w.write_char(c)?,
            c if !c.is_ascii() => w.write_char(c)?,
            _ => write!(w, "\\{c}")?,
        }

        leading_dash = first && c == '-';
        first = false;
    }
    Ok(())
}

// See https://www.w3.org/TR/css-syntax-3/#consume-string-token
fn css_escape<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\0' => w.write_str("\u{FFFD}")?,
            c if c.is_control() => write!(w, "\\{:x} ", c as u32)?,
            _ => w.write_char(c)?,
        }
    }
    Ok(())
}
