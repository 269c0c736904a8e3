//! # Input and Display Formatting
//!
//! Two families of total functions:
//!
//! - **Input formatters** mirror the side-panel widgets. They filter raw
//!   keystrokes down to digits, truncate, and apply the progressive mask the
//!   widget shows (`1990.01`, `010-1234`).
//! - **Display formatters** turn a stored value into the string placed on
//!   the scanned form: spaced sign dates, dash or wide-gap phone numbers,
//!   and two-line joins.
//!
//! None of these can fail. Garbage in yields an empty or partially
//! formatted string.
//!
//! ```
//! use overprint::format;
//!
//! assert_eq!(format::date_input("19900101", format::DateDigits::Eight), "1990.01.01");
//! assert_eq!(format::phone_dashed("01012345678"), "010-1234-5678");
//! assert_eq!(format::phone_wide("01012345678"), "1234\u{a0}\u{a0}\u{a0}\u{a0}5678");
//! ```

use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Non-breaking space. Plain spaces collapse in HTML, these don't.
pub const NBSP: char = '\u{a0}';

/// Gap between the two halves of the wide phone form.
const PHONE_WIDE_GAP: usize = 4;

/// Canonical phone length (`010` + 8 digits).
const PHONE_DIGITS: usize = 11;

/// Number of digits a date widget keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateDigits {
    /// `YYMMDD`, stored without separators
    Six,
    /// `YYYYMMDD`, stored as `YYYY.MM.DD`
    Eight,
}

impl DateDigits {
    /// Placeholder shown in the empty widget.
    pub fn placeholder(&self) -> &'static str {
        match self {
            DateDigits::Six => "YYMMDD",
            DateDigits::Eight => "YYYY.MM.DD",
        }
    }

    /// Maximum characters the widget accepts, separators included.
    pub fn max_len(&self) -> usize {
        match self {
            DateDigits::Six => 6,
            DateDigits::Eight => 10,
        }
    }
}

/// Keep only ASCII digits.
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// First `n` characters of `s`.
fn take(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Join `parts` with `sep`, skipping the trailing empties of a progressive mask.
fn progressive(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

/// Split `s` at the given character offsets (clamped to its length).
fn segments<'a>(s: &'a str, cuts: &[usize]) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts {
        let end = cut.min(s.len()).max(start);
        out.push(&s[start..end]);
        start = end;
    }
    out.push(&s[start..]);
    out
}

/// Date widget formatter.
///
/// Everything but digits and dots is dropped, then the dots, so a value can
/// be re-fed through the widget unchanged.
pub fn date_input(raw: &str, mode: DateDigits) -> String {
    let numbers = digits(raw);
    match mode {
        DateDigits::Six => take(&numbers, 6).to_string(),
        DateDigits::Eight => {
            let limited = take(&numbers, 8);
            progressive(&segments(limited, &[4, 6]), ".")
        }
    }
}

/// Phone widget formatter: up to 11 digits, masked `XXX-XXXX-XXXX`.
pub fn phone_input(raw: &str) -> String {
    let numbers = digits(raw);
    phone_dashed(take(&numbers, PHONE_DIGITS))
}

/// Dash-grouped phone form, progressive for short input.
///
/// ```
/// use overprint::format::phone_dashed;
///
/// assert_eq!(phone_dashed("010"), "010");
/// assert_eq!(phone_dashed("0101234"), "010-1234");
/// assert_eq!(phone_dashed("010-1234-5678"), "010-1234-5678");
/// ```
pub fn phone_dashed(phone: &str) -> String {
    let numbers = digits(phone);
    progressive(&segments(&numbers, &[3, 7]), "-")
}

/// Wide-gap phone form: the area code is dropped and the remaining digits
/// are split after four with a run of non-breaking spaces.
pub fn phone_wide(phone: &str) -> String {
    let numbers = digits(phone);
    let remaining = numbers.get(3..).unwrap_or("");
    if remaining.len() <= 4 {
        return remaining.to_string();
    }
    let gap: String = std::iter::repeat_n(NBSP, PHONE_WIDE_GAP).collect();
    format!("{}{}{}", &remaining[..4], gap, &remaining[4..])
}

/// Respace a `YYYY.MM.DD` date so each part lands in its printed box.
///
/// `after_year` and `after_month` are calibrated per template. Anything
/// that does not split into exactly three parts is returned unchanged.
///
/// ```
/// use overprint::format::spaced_date;
///
/// assert_eq!(spaced_date("2025.12.02", 1, 2), "2025\u{a0}12\u{a0}\u{a0}02");
/// assert_eq!(spaced_date("2025.12", 1, 2), "2025.12");
/// ```
pub fn spaced_date(date: &str, after_year: usize, after_month: usize) -> String {
    let parts: Vec<&str> = date.split('.').collect();
    if parts.len() != 3 {
        return date.to_string();
    }
    let mut out = String::with_capacity(date.len() + (after_year + after_month) * 2);
    out.push_str(parts[0]);
    out.extend(std::iter::repeat_n(NBSP, after_year));
    out.push_str(parts[1]);
    out.extend(std::iter::repeat_n(NBSP, after_month));
    out.push_str(parts[2]);
    out
}

/// Two inputs stacked on one field, rendered with `pre-wrap`.
pub fn two_lines(first: &str, second: &str) -> String {
    format!("{}\n{}", first, second)
}

/// Truncate free text to `max` characters (4-digit wish numbers etc).
pub fn max_chars(raw: &str, max: usize) -> String {
    take(raw, max).to_string()
}

/// A date as `YYYY.MM.DD`.
pub fn dotted(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

/// Today's local date as `YYYY.MM.DD`, the default sign date.
pub fn today() -> String {
    dotted(Local::now().date_naive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn nbsp(n: usize) -> String {
        std::iter::repeat_n(NBSP, n).collect()
    }

    #[test]
    fn test_six_digit_date_has_no_dots() {
        assert_eq!(date_input("900101", DateDigits::Six), "900101");
        assert_eq!(date_input("90.01.01", DateDigits::Six), "900101");
        assert_eq!(date_input("9001011234", DateDigits::Six), "900101");
    }

    #[test]
    fn test_eight_digit_date_progressive_mask() {
        assert_eq!(date_input("", DateDigits::Eight), "");
        assert_eq!(date_input("1990", DateDigits::Eight), "1990");
        assert_eq!(date_input("19900", DateDigits::Eight), "1990.0");
        assert_eq!(date_input("199001", DateDigits::Eight), "1990.01");
        assert_eq!(date_input("1990010", DateDigits::Eight), "1990.01.0");
        assert_eq!(date_input("19900101", DateDigits::Eight), "1990.01.01");
        assert_eq!(date_input("1990010199", DateDigits::Eight), "1990.01.01");
    }

    #[test]
    fn test_date_input_idempotent_on_own_digits() {
        for raw in ["1", "1990", "199001", "19900101", "abc1990x01y01"] {
            for mode in [DateDigits::Six, DateDigits::Eight] {
                let once = date_input(raw, mode);
                let twice = date_input(&digits(&once), mode);
                assert_eq!(once, twice, "raw={raw} mode={mode:?}");
            }
        }
    }

    #[test]
    fn test_date_input_drops_letters() {
        assert_eq!(date_input("1990-01-01", DateDigits::Eight), "1990.01.01");
        assert_eq!(date_input("년월일", DateDigits::Eight), "");
    }

    #[test]
    fn test_phone_input_truncates_to_eleven() {
        assert_eq!(phone_input("010123456789999"), "010-1234-5678");
        assert_eq!(phone_input("010-12"), "010-12");
        assert_eq!(phone_input("phone"), "");
    }

    #[test]
    fn test_phone_forms_share_digits() {
        let raw = "01012345678";
        let dashed = phone_dashed(raw);
        let wide = phone_wide(raw);
        assert_eq!(dashed, "010-1234-5678");
        assert_eq!(wide, format!("1234{}5678", nbsp(4)));
        assert_eq!(&digits(&dashed)[3..], digits(&wide).as_str());
    }

    #[test]
    fn test_phone_wide_short_input() {
        assert_eq!(phone_wide(""), "");
        assert_eq!(phone_wide("01"), "");
        assert_eq!(phone_wide("0101"), "1");
        assert_eq!(phone_wide("0101234"), "1234");
        assert_eq!(phone_wide("01012345"), format!("1234{}5", nbsp(4)));
    }

    #[test]
    fn test_phone_wide_accepts_dashed_input() {
        assert_eq!(phone_wide("010-1234-5678"), format!("1234{}5678", nbsp(4)));
    }

    #[test]
    fn test_spaced_date() {
        assert_eq!(
            spaced_date("2025.12.02", 7, 7),
            format!("2025{}12{}02", nbsp(7), nbsp(7))
        );
        assert_eq!(
            spaced_date("2025.12.02", 11, 13),
            format!("2025{}12{}02", nbsp(11), nbsp(13))
        );
    }

    #[test]
    fn test_spaced_date_passthrough() {
        assert_eq!(spaced_date("", 7, 7), "");
        assert_eq!(spaced_date("2025", 7, 7), "2025");
        assert_eq!(spaced_date("2025.1.2.3", 7, 7), "2025.1.2.3");
        // Incomplete but three parts still spaces
        assert_eq!(spaced_date("2025.12.", 1, 1), format!("2025{}12{}", nbsp(1), nbsp(1)));
    }

    #[test]
    fn test_two_lines() {
        assert_eq!(two_lines("USIM-A", "1234 5678"), "USIM-A\n1234 5678");
        assert_eq!(two_lines("", ""), "\n");
    }

    #[test]
    fn test_max_chars_counts_characters() {
        assert_eq!(max_chars("123456", 4), "1234");
        assert_eq!(max_chars("홍길동전", 2), "홍길");
        assert_eq!(max_chars("12", 4), "12");
    }

    #[test]
    fn test_dotted() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
        assert_eq!(dotted(date), "2025.12.02");
        assert_eq!(today().len(), 10);
    }
}
