//! Small HTML helpers shared by the overlay, print, and page renderers.

use std::fmt::Write as _;

/// Escape text content and attribute values.
///
/// Newlines are kept; field text relies on `white-space: pre-wrap`.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_into(input, &mut out);
    out
}

pub fn escape_into(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// A CSS length with trailing zeros trimmed (`12px`, `3.175mm`).
///
/// Values are printed with up to four decimals so that page layouts stay
/// stable in tests and diffs.
pub fn length(value: f64, unit: &str) -> String {
    let mut s = format!("{:.4}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s.push_str(unit);
    s
}

/// Inline `style` attribute builder.
#[derive(Debug, Default, Clone)]
pub struct Style(String);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: &str, value: impl AsRef<str>) -> Self {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        let _ = write!(self.0, "{}: {};", property, value.as_ref());
        self
    }

    pub fn set_if(self, cond: bool, property: &str, value: impl AsRef<str>) -> Self {
        if cond { self.set(property, value) } else { self }
    }

    pub fn len(self, property: &str, value: f64, unit: &str) -> Self {
        self.set(property, length(value, unit))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ` style="..."`, escaped.
    pub fn attr(&self) -> String {
        format!(" style=\"{}\"", escape(&self.0))
    }
}
