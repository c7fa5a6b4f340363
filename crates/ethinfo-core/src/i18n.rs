//! Label translation.
//!
//! Every human-readable string goes through a [`Translator`] keyed by its
//! English source text. Translations are opaque templates: arguments are
//! substituted by [`format_template`], never by string concatenation.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::path::Path;

use crate::error::CoreError;

/// Maps an English message id to the display language.
pub trait Translator {
    fn translate<'a>(&'a self, msgid: &'a str) -> Cow<'a, str>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        (**self).translate(msgid)
    }
}

/// Passes every message through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Translator for Identity {
    fn translate<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(msgid)
    }
}

/// Message catalog loaded from a flat TOML table (`"msgid" = "translation"`).
///
/// Missing or empty translations fall back to the message id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let messages: HashMap<String, String> = toml::from_str(raw)?;
        Ok(Self { messages })
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CoreError::read(path, e))?;
        Self::from_toml(&raw).map_err(|e| CoreError::parse(path, e))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for Catalog {
    fn translate<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        match self.messages.get(msgid) {
            Some(text) if !text.is_empty() => Cow::Borrowed(text.as_str()),
            _ => Cow::Borrowed(msgid),
        }
    }
}

// ── Templates ───────────────────────────────────────────────────────

enum Directive {
    Percent,
    Next,
    Position(usize),
}

/// Parse the directive following a `%`. Returns the directive and the
/// number of bytes it spans after the `%`.
fn parse_directive(rest: &[u8]) -> Option<(Directive, usize)> {
    match rest.first()? {
        b'%' => Some((Directive::Percent, 1)),
        b's' | b'd' => Some((Directive::Next, 1)),
        b'1'..=b'9' => {
            let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            if rest.get(digits) != Some(&b'$') || !matches!(rest.get(digits + 1), Some(b's' | b'd'))
            {
                return None;
            }
            let n = std::str::from_utf8(rest.get(..digits)?).ok()?.parse().ok()?;
            Some((Directive::Position(n), digits + 2))
        }
        _ => None,
    }
}

/// Substitute arguments into a translated template.
///
/// Supports `%s` / `%d` (next argument), `%N$s` / `%N$d` (1-based
/// positional argument) and `%%`. Missing arguments render as nothing;
/// unrecognised directives are copied through verbatim.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        out.push_str(&template[literal_start..i]);

        let arg = match parse_directive(&bytes[i + 1..]) {
            Some((Directive::Percent, len)) => {
                out.push('%');
                i += 1 + len;
                None
            }
            Some((Directive::Next, len)) => {
                i += 1 + len;
                next_arg += 1;
                args.get(next_arg - 1)
            }
            Some((Directive::Position(n), len)) => {
                i += 1 + len;
                args.get(n - 1)
            }
            None => {
                out.push('%');
                i += 1;
                None
            }
        };
        if let Some(arg) = arg {
            let _ = write!(out, "{arg}");
        }
        literal_start = i;
    }

    out.push_str(&template[literal_start..]);
    out
}
