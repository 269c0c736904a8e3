//! # Form Model
//!
//! Side-panel inputs of a template, the raw state they produce, and the
//! order the cursor moves through them.
//!
//! ## Flow
//!
//! ```text
//! query/body ──► FormInput ──normalize(specs)──► FormInput ──► Template::resolve
//!                                   │
//!                                   └── date / phone / 4-digit masks
//! ```
//!
//! Focus order is an explicit [`FieldSequence`] built from the template's
//! declared inputs, not discovered from rendered markup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::format::{self, DateDigits};

/// One option of a radio group or select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Widget type of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Date { digits: DateDigits },
    Phone,
    /// Free text capped at `max` characters
    Short { max: usize },
    Radio { choices: &'static [Choice] },
    Select { choices: &'static [Choice] },
}

impl InputKind {
    /// Whether Enter on this input moves the cursor along the sequence.
    pub fn is_focusable(&self) -> bool {
        !matches!(self, InputKind::Radio { .. } | InputKind::Select { .. })
    }

    /// Apply the widget's mask to a raw value.
    ///
    /// Radio and select values outside their choices come back as `None`, so
    /// the template falls back to its default.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        match self {
            InputKind::Text => Some(raw.to_string()),
            InputKind::Date { digits } => Some(format::date_input(raw, *digits)),
            InputKind::Phone => Some(format::phone_input(raw)),
            InputKind::Short { max } => Some(format::max_chars(raw, *max)),
            InputKind::Radio { choices } | InputKind::Select { choices } => choices
                .iter()
                .find(|c| c.value == raw)
                .map(|c| c.value.to_string()),
        }
    }

    /// Placeholder used when the input declares none.
    pub fn default_placeholder(&self) -> &'static str {
        match self {
            InputKind::Date { digits } => digits.placeholder(),
            InputKind::Phone => "010-1234-5678",
            _ => "",
        }
    }

    /// `maxlength` attribute for text-like widgets.
    pub fn max_len(&self) -> Option<usize> {
        match self {
            InputKind::Date { digits } => Some(digits.max_len()),
            InputKind::Phone => Some(13),
            InputKind::Short { max } => Some(*max),
            _ => None,
        }
    }
}

/// Show an input only while another input holds one of `values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub input: &'static str,
    pub values: &'static [&'static str],
}

impl Condition {
    pub fn holds(&self, input: &FormInput) -> bool {
        let current = input.text(self.input);
        self.values.iter().any(|v| *v == current)
    }
}

/// Declarative description of one side-panel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub kind: InputKind,
    pub placeholder: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_when: Option<Condition>,
    /// Second condition that must hold together with `only_when`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub and_when: Option<Condition>,
}

impl InputSpec {
    pub const fn new(name: &'static str, label: &'static str, section: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            section,
            kind,
            placeholder: "",
            required: false,
            only_when: None,
            and_when: None,
        }
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn only_when(mut self, input: &'static str, values: &'static [&'static str]) -> Self {
        self.only_when = Some(Condition { input, values });
        self
    }

    pub const fn and_when(mut self, input: &'static str, values: &'static [&'static str]) -> Self {
        self.and_when = Some(Condition { input, values });
        self
    }

    pub fn effective_placeholder(&self) -> &'static str {
        if self.placeholder.is_empty() {
            self.kind.default_placeholder()
        } else {
            self.placeholder
        }
    }

    /// Whether the input is shown for the current state.
    pub fn is_visible(&self, input: &FormInput) -> bool {
        [&self.only_when, &self.and_when]
            .into_iter()
            .flatten()
            .all(|cond| cond.holds(input))
    }
}

/// A discriminator enum that doubles as a radio group.
pub trait Discriminator: Sized + Copy + Default {
    /// Radio options in display order.
    const CHOICES: &'static [Choice];

    fn from_value(value: &str) -> Option<Self>;

    fn value(&self) -> &'static str;
}

/// Raw form state: input name → current string.
///
/// Deserializes from a query string, an urlencoded body, or a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput(BTreeMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Current value, `""` when unset.
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Parse a discriminator, falling back to its default.
    pub fn discriminator<D: Discriminator>(&self, name: &str) -> D {
        self.0
            .get(name)
            .and_then(|v| D::from_value(v))
            .unwrap_or_default()
    }

    /// Fill in `defaults` for names that aren't set.
    pub fn or_defaults(mut self, defaults: &FormInput) -> Self {
        for (k, v) in &defaults.0 {
            self.0.entry(k.clone()).or_insert_with(|| v.clone());
        }
        self
    }

    /// Run every declared input through its widget mask.
    ///
    /// Names with no spec are dropped; invalid choices are removed.
    pub fn normalize(&self, specs: &[InputSpec]) -> FormInput {
        let mut out = FormInput::new();
        for spec in specs {
            if let Some(raw) = self.0.get(spec.name)
                && let Some(value) = spec.kind.normalize(raw)
            {
                out.set(spec.name, value);
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Ordered cursor path through the visible text-like inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSequence(Vec<&'static str>);

impl FieldSequence {
    pub fn new(specs: &[InputSpec], input: &FormInput) -> Self {
        Self(
            specs
                .iter()
                .filter(|s| s.kind.is_focusable() && s.is_visible(input))
                .map(|s| s.name)
                .collect(),
        )
    }

    /// Input after `current`; `None` at the end or for names not in the path.
    pub fn focus_next(&self, current: &str) -> Option<&'static str> {
        let idx = self.0.iter().position(|n| *n == current)?;
        self.0.get(idx + 1).copied()
    }

    pub fn first(&self) -> Option<&'static str> {
        self.0.first().copied()
    }

    pub fn names(&self) -> &[&'static str] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: &[Choice] = &[Choice::new("prepaid", "선불"), Choice::new("transfer", "명의변경")];

    fn specs() -> Vec<InputSpec> {
        vec![
            InputSpec::new("applicationType", "신청유형", "신청유형", InputKind::Radio { choices: KINDS }),
            InputSpec::new("name", "이름", "고객정보", InputKind::Text).required(),
            InputSpec::new("birthDate", "생년월일", "고객정보", InputKind::Date { digits: DateDigits::Six }),
            InputSpec::new("wishNumber1", "1순위", "선불 정보", InputKind::Short { max: 4 })
                .only_when("applicationType", &["prepaid"]),
            InputSpec::new("phoneNumber", "휴대폰번호", "전화번호", InputKind::Phone)
                .only_when("applicationType", &["transfer"]),
            InputSpec::new("signDate", "날짜", "신청날짜", InputKind::Date { digits: DateDigits::Eight }),
        ]
    }

    #[test]
    fn test_normalize_applies_masks() {
        let raw = FormInput::new()
            .with("name", "홍길동")
            .with("birthDate", "900101")
            .with("signDate", "19900101")
            .with("wishNumber1", "123456")
            .with("phoneNumber", "01012345678")
            .with("unknown", "dropped");
        let input = raw.normalize(&specs());
        assert_eq!(input.text("name"), "홍길동");
        assert_eq!(input.text("birthDate"), "900101");
        assert_eq!(input.text("signDate"), "1990.01.01");
        assert_eq!(input.text("wishNumber1"), "1234");
        assert_eq!(input.text("phoneNumber"), "010-1234-5678");
        assert_eq!(input.text("unknown"), "");
    }

    #[test]
    fn test_normalize_removes_invalid_choice() {
        let raw = FormInput::new().with("applicationType", "postpaid");
        let input = raw.normalize(&specs());
        assert_eq!(input.text("applicationType"), "");
    }

    #[test]
    fn test_or_defaults_keeps_existing() {
        let defaults = FormInput::new().with("signDate", "2025.12.02").with("name", "");
        let input = FormInput::new().with("name", "홍길동").or_defaults(&defaults);
        assert_eq!(input.text("name"), "홍길동");
        assert_eq!(input.text("signDate"), "2025.12.02");
    }

    #[test]
    fn test_focus_next_follows_declared_order() {
        let input = FormInput::new().with("applicationType", "prepaid");
        let seq = FieldSequence::new(&specs(), &input);
        assert_eq!(seq.names(), &["name", "birthDate", "wishNumber1", "signDate"]);
        assert_eq!(seq.focus_next("name"), Some("birthDate"));
        assert_eq!(seq.focus_next("wishNumber1"), Some("signDate"));
        assert_eq!(seq.focus_next("signDate"), None);
    }

    #[test]
    fn test_focus_next_skips_hidden_inputs() {
        let input = FormInput::new().with("applicationType", "transfer");
        let seq = FieldSequence::new(&specs(), &input);
        assert_eq!(seq.focus_next("birthDate"), Some("phoneNumber"));
        assert_eq!(seq.focus_next("wishNumber1"), None);
        assert_eq!(seq.focus_next("applicationType"), None);
    }

    #[test]
    fn test_both_conditions_must_hold() {
        let spec = InputSpec::new("mvnoDetail", "알뜰폰 통신사명", "변경전 통신사", InputKind::Text)
            .only_when("applicationType", &["transfer"])
            .and_when("prevCarrier", &["mvno"]);
        let input = FormInput::new().with("applicationType", "transfer").with("prevCarrier", "mvno");
        assert!(spec.is_visible(&input));
        assert!(!spec.is_visible(&input.clone().with("prevCarrier", "kt")));
        assert!(!spec.is_visible(&input.with("applicationType", "new")));
    }

    #[test]
    fn test_spec_serializes_kind_tag() {
        let spec = InputSpec::new("signDate", "날짜", "신청날짜", InputKind::Date { digits: DateDigits::Eight });
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(json["kind"]["type"], "date");
        assert_eq!(json["kind"]["digits"], "eight");
        assert_eq!(spec.effective_placeholder(), "YYYY.MM.DD");
    }
}
