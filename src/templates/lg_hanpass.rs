//! LG U+ Hanpass prepaid / ownership transfer application.
//!
//! Prepaid sign-ups fill the wish numbers and USIM; transfers print the
//! phone number three times (wide form once, dashed twice).

use super::{ApplicationType, CHECK_MARK, Carrier, FormContext, Template, check, sign_date_input};
use crate::form::{Discriminator, FormInput, InputKind, InputSpec};
use crate::format;
use crate::schema::{FieldPosition, FieldValues, PageImages, Resolved, Variant, active_fields};

const SIGN_DATE_GAPS: (usize, usize) = (9, 7);

const PREPAID: &[&str] = &["prepaid"];
const TRANSFER: &[&str] = &["transfer"];

static INPUTS: &[InputSpec] = &[
    InputSpec::new(
        "applicationType",
        "신청유형",
        "신청유형",
        InputKind::Radio { choices: ApplicationType::CHOICES },
    ),
    InputSpec::new("foreignerNumber", "외국인등록/여권번호", "고객정보", InputKind::Text)
        .placeholder("외국인등록번호 또는 여권번호")
        .required(),
    InputSpec::new("wishNumber1", "희망번호 뒷 네자리 (1순위)", "선불 정보", InputKind::Short { max: 4 })
        .placeholder("1234")
        .only_when("applicationType", PREPAID),
    InputSpec::new("wishNumber2", "희망번호 뒷 네자리 (2순위)", "선불 정보", InputKind::Short { max: 4 })
        .placeholder("5678")
        .only_when("applicationType", PREPAID),
    InputSpec::new("usimModel", "USIM 모델명", "선불 정보", InputKind::Text)
        .placeholder("모델명")
        .required()
        .only_when("applicationType", PREPAID),
    InputSpec::new("usimNumber", "USIM 일련번호", "선불 정보", InputKind::Text)
        .placeholder("일련번호")
        .required()
        .only_when("applicationType", PREPAID),
    InputSpec::new("phoneNumber", "전화번호", "전화번호", InputKind::Phone)
        .required()
        .only_when("applicationType", TRANSFER),
    sign_date_input(),
];

fn base_fields() -> Vec<FieldPosition> {
    vec![
        FieldPosition::new("foreignerNumber", 1, 197.0, 258.0).size(179.0, 33.0).font_size(16.0),
        FieldPosition::new("signDate", 1, 1044.0, 492.0).size(137.0, 30.0).font_size(16.0),
    ]
}

/// Field layout per application type.
struct Layout(ApplicationType);

impl Variant for Layout {
    fn fields(&self) -> Vec<FieldPosition> {
        match self.0 {
            ApplicationType::Prepaid => vec![
                check("typeCheck", 120.0, 130.0),
                FieldPosition::new("wishNumber1", 1, 297.0, 237.0).size(76.0, 24.0).font_size(14.0),
                FieldPosition::new("wishNumber2", 1, 298.0, 334.0).size(76.0, 24.0).font_size(14.0),
                FieldPosition::new("usimModel", 1, 369.0, 216.0).size(93.0, 24.0).font_size(14.0),
                FieldPosition::new("usimNumber", 1, 369.0, 318.0).size(137.0, 26.0).font_size(14.0),
            ],
            ApplicationType::Transfer => vec![
                check("typeCheck", 120.0, 272.0),
                // last four digits, set apart
                FieldPosition::new("phoneNumber2", 1, 110.0, 634.0).size(139.0, 29.0).font_size(16.0),
                FieldPosition::new("phoneNumber3", 1, 623.0, 208.0).size(240.0, 26.0).font_size(16.0),
                FieldPosition::new("phoneNumber4", 1, 649.0, 208.0).size(240.0, 26.0).font_size(16.0),
            ],
        }
    }
}

/// 한패스 선불-명변
pub struct LgHanpass;

impl Template for LgHanpass {
    fn id(&self) -> &'static str {
        "lg-hanpass"
    }

    fn carrier(&self) -> Carrier {
        Carrier::LgUplus
    }

    fn title(&self) -> &'static str {
        "한패스 선불-명변"
    }

    fn page_images(&self) -> PageImages {
        PageImages::new(["lg/hanpass_prepaid.jpg"])
    }

    fn inputs(&self) -> &'static [InputSpec] {
        INPUTS
    }

    fn defaults(&self, ctx: &FormContext) -> FormInput {
        FormInput::new()
            .with("applicationType", ApplicationType::default().value())
            .with("signDate", ctx.today.clone())
    }

    fn resolve(&self, input: &FormInput) -> Resolved {
        let kind: ApplicationType = input.discriminator("applicationType");
        let phone = input.text("phoneNumber");
        let (year_gap, month_gap) = SIGN_DATE_GAPS;
        let values = FieldValues::new()
            .with("typeCheck", CHECK_MARK)
            .with("foreignerNumber", input.text("foreignerNumber"))
            .with("wishNumber1", input.text("wishNumber1"))
            .with("wishNumber2", input.text("wishNumber2"))
            .with("usimModel", input.text("usimModel"))
            .with("usimNumber", input.text("usimNumber"))
            .with("phoneNumber2", format::phone_wide(phone))
            .with("phoneNumber3", format::phone_dashed(phone))
            .with("phoneNumber4", format::phone_dashed(phone))
            .with("signDate", format::spaced_date(input.text("signDate"), year_gap, month_gap));

        Resolved::new(active_fields(&Layout(kind), &base_fields()), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldSequence;

    fn transfer() -> FormInput {
        FormInput::new()
            .with("applicationType", "transfer")
            .with("phoneNumber", "010-1234-5678")
            .with("wishNumber1", "1111")
    }

    #[test]
    fn test_transfer_prints_phone_three_times() {
        let resolved = LgHanpass.resolve(&transfer());
        assert_eq!(resolved.values.get("phoneNumber2"), "1234\u{a0}\u{a0}\u{a0}\u{a0}5678");
        assert_eq!(resolved.values.get("phoneNumber3"), "010-1234-5678");
        assert_eq!(resolved.values.get("phoneNumber4"), "010-1234-5678");
        assert_eq!(resolved.fields.get("typeCheck").unwrap().left, 272.0);
    }

    #[test]
    fn test_transfer_drops_prepaid_fields() {
        let resolved = LgHanpass.resolve(&transfer());
        assert!(!resolved.fields.contains("wishNumber1"));
        assert!(!resolved.values.contains("wishNumber1"));
        assert!(!resolved.fields.contains("usimModel"));
    }

    #[test]
    fn test_prepaid_layout() {
        let input = LgHanpass.defaults(&FormContext::new("2025.12.02", None));
        let resolved = LgHanpass.resolve(&input);
        let ids: Vec<_> = resolved.fields.ids().collect();
        assert_eq!(
            ids,
            vec!["foreignerNumber", "signDate", "typeCheck", "wishNumber1", "wishNumber2", "usimModel", "usimNumber"]
        );
        assert!(!resolved.values.contains("phoneNumber2"));
        let nbsp = |n| "\u{a0}".repeat(n);
        assert_eq!(resolved.values.get("signDate"), format!("2025{}12{}02", nbsp(9), nbsp(7)));
    }

    #[test]
    fn test_focus_path_follows_type() {
        let seq = FieldSequence::new(LgHanpass.inputs(), &transfer());
        assert_eq!(seq.names(), &["foreignerNumber", "phoneNumber", "signDate"]);

        let prepaid = FormInput::new().with("applicationType", "prepaid");
        let seq = FieldSequence::new(LgHanpass.inputs(), &prepaid);
        assert_eq!(seq.focus_next("usimNumber"), Some("signDate"));
    }
}
