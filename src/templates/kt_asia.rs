//! KT Asia prepaid application.

use super::{Carrier, FormContext, Template, birth_date_input, sign_date_input};
use crate::form::{FormInput, InputKind, InputSpec};
use crate::format;
use crate::schema::{FieldPosition, FieldValues, PageImages, Resolved, active_fields};

/// NBSP runs after year and month on the sign date line.
const SIGN_DATE_GAPS: (usize, usize) = (7, 7);

const SECTION: &str = "가입고객정보";

static INPUTS: &[InputSpec] = &[
    InputSpec::new("name", "이름", SECTION, InputKind::Text)
        .placeholder("'웰'은 비우기 (손글씨)")
        .required(),
    birth_date_input(),
    InputSpec::new("passportNumber", "여권번호", SECTION, InputKind::Text).placeholder("M12345678"),
    InputSpec::new("usimNumber", "USIM 일련번호", SECTION, InputKind::Text)
        .placeholder("89820000000000000000")
        .required(),
    InputSpec::new("wishNumber1", "선호번호 1", SECTION, InputKind::Short { max: 4 }).placeholder("1234"),
    InputSpec::new("wishNumber2", "선호번호 2", SECTION, InputKind::Short { max: 4 }).placeholder("5678"),
    sign_date_input(),
];

fn base_fields() -> Vec<FieldPosition> {
    vec![
        FieldPosition::new("name", 1, 128.0, 208.0).size(210.0, 45.0).font_size(18.0),
        FieldPosition::new("birthAndPassport", 1, 128.0, 588.0).size(190.0, 45.0).font_size(14.0),
        FieldPosition::new("usimNumber", 1, 312.0, 208.0).size(210.0, 45.0).font_size(14.0),
        FieldPosition::new("wishNumber1", 1, 280.0, 240.0).size(70.0, 34.0).font_size(14.0),
        FieldPosition::new("wishNumber2", 1, 280.0, 340.0).size(70.0, 34.0).font_size(14.0),
        FieldPosition::new("signDate", 1, 1052.0, 600.0).height(30.0).font_size(14.0),
    ]
}

/// 선불 KT 아시아
pub struct KtAsia;

impl Template for KtAsia {
    fn id(&self) -> &'static str {
        "kt-asia"
    }

    fn carrier(&self) -> Carrier {
        Carrier::Kt
    }

    fn title(&self) -> &'static str {
        "선불 KT 아시아"
    }

    fn page_images(&self) -> PageImages {
        PageImages::new(["kt/asia_mobile.jpg"])
    }

    fn inputs(&self) -> &'static [InputSpec] {
        INPUTS
    }

    fn defaults(&self, ctx: &FormContext) -> FormInput {
        FormInput::new().with("signDate", ctx.today.clone())
    }

    fn resolve(&self, input: &FormInput) -> Resolved {
        let (year_gap, month_gap) = SIGN_DATE_GAPS;
        let values = FieldValues::new()
            .with("name", input.text("name"))
            .with(
                "birthAndPassport",
                format::two_lines(input.text("birthDate"), input.text("passportNumber")),
            )
            .with("usimNumber", input.text("usimNumber"))
            .with("wishNumber1", input.text("wishNumber1"))
            .with("wishNumber2", input.text("wishNumber2"))
            .with("signDate", format::spaced_date(input.text("signDate"), year_gap, month_gap));

        Resolved::new(active_fields(&(), &base_fields()), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_and_passport_on_two_lines() {
        let input = FormInput::new()
            .with("birthDate", "900101")
            .with("passportNumber", "M12345678");
        let resolved = KtAsia.resolve(&input);
        assert_eq!(resolved.values.get("birthAndPassport"), "900101\nM12345678");
    }

    #[test]
    fn test_sign_date_spacing() {
        let input = KtAsia.defaults(&FormContext::new("2025.12.02", None));
        let resolved = KtAsia.resolve(&input);
        let nbsp7 = "\u{a0}".repeat(7);
        assert_eq!(resolved.values.get("signDate"), format!("2025{nbsp7}12{nbsp7}02"));
    }

    #[test]
    fn test_fields_match_form() {
        let resolved = KtAsia.resolve(&FormInput::new());
        let name = resolved.fields.get("name").unwrap();
        assert_eq!((name.top, name.left), (128.0, 208.0));
        assert_eq!(name.effective_font_size(), 18.0);
        assert_eq!(resolved.fields.len(), 6);
    }
}
