//! LG U+ "이야기" ownership transfer application.

use super::{CHECK_MARK, Carrier, FormContext, Template, birth_date_input, check, sign_date_input};
use crate::form::{Choice, Discriminator, FormInput, InputKind, InputSpec};
use crate::format;
use crate::schema::{FieldPosition, FieldValues, PageImages, Resolved, Variant, active_fields};

const SIGN_DATE_GAPS: (usize, usize) = (12, 12);

/// Network the line is currently on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Network {
    Skt,
    #[default]
    Lg,
    Kt,
}

impl Discriminator for Network {
    const CHOICES: &'static [Choice] = &[
        Choice::new("SKT", "SKT"),
        Choice::new("LG", "LG"),
        Choice::new("KT", "KT"),
    ];

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "SKT" => Some(Network::Skt),
            "LG" => Some(Network::Lg),
            "KT" => Some(Network::Kt),
            _ => None,
        }
    }

    fn value(&self) -> &'static str {
        match self {
            Network::Skt => "SKT",
            Network::Lg => "LG",
            Network::Kt => "KT",
        }
    }
}

impl Variant for Network {
    fn fields(&self) -> Vec<FieldPosition> {
        let left = match self {
            Network::Skt => 118.0,
            Network::Lg => 174.0,
            Network::Kt => 236.0,
        };
        vec![check("networkCheck", 58.0, left)]
    }
}

static INPUTS: &[InputSpec] = &[
    InputSpec::new("networkType", "통신망", "통신망 선택", InputKind::Radio { choices: Network::CHOICES }),
    InputSpec::new("phoneNumber", "휴대폰번호", "고객정보", InputKind::Phone).required(),
    InputSpec::new("name", "이름", "고객정보", InputKind::Text)
        .placeholder("홍길동")
        .required(),
    birth_date_input(),
    InputSpec::new("foreignerNumber", "외국인등록번호", "고객정보", InputKind::Text)
        .placeholder("1234567890123")
        .required(),
    sign_date_input(),
];

fn base_fields() -> Vec<FieldPosition> {
    vec![
        FieldPosition::new("name", 1, 127.0, 227.0).size(218.0, 32.0).font_size(14.0),
        FieldPosition::new("birthDate", 1, 128.0, 575.0).size(182.0, 32.0).font_size(16.0),
        FieldPosition::new("foreignerNumber", 1, 162.0, 575.0).size(182.0, 32.0).font_size(16.0),
        FieldPosition::new("phoneNumber", 1, 69.0, 590.0).size(208.0, 43.0).font_size(14.0),
        FieldPosition::new("signDate", 1, 1040.0, 578.0).height(30.0).font_size(15.0),
    ]
}

/// 이야기 명의변경
pub struct LgStoryTransfer;

impl Template for LgStoryTransfer {
    fn id(&self) -> &'static str {
        "lg-story-transfer"
    }

    fn carrier(&self) -> Carrier {
        Carrier::LgUplus
    }

    fn title(&self) -> &'static str {
        "이야기 명의변경"
    }

    fn subtitle(&self) -> &'static str {
        "이동전화 서비스 명의변경 신청서"
    }

    fn page_images(&self) -> PageImages {
        PageImages::new(["lg/story_transfer.jpg"])
    }

    fn inputs(&self) -> &'static [InputSpec] {
        INPUTS
    }

    fn defaults(&self, ctx: &FormContext) -> FormInput {
        FormInput::new()
            .with("networkType", Network::default().value())
            .with("signDate", ctx.today.clone())
    }

    fn resolve(&self, input: &FormInput) -> Resolved {
        let network: Network = input.discriminator("networkType");
        let (year_gap, month_gap) = SIGN_DATE_GAPS;
        let values = FieldValues::new()
            .with("networkCheck", CHECK_MARK)
            .with("name", input.text("name"))
            .with("birthDate", input.text("birthDate"))
            .with("foreignerNumber", input.text("foreignerNumber"))
            .with("phoneNumber", format::phone_wide(input.text("phoneNumber")))
            .with("signDate", format::spaced_date(input.text("signDate"), year_gap, month_gap));

        Resolved::new(active_fields(&network, &base_fields()), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_moves_check() {
        for (value, left) in [("SKT", 118.0), ("LG", 174.0), ("KT", 236.0)] {
            let input = FormInput::new().with("networkType", value);
            let resolved = LgStoryTransfer.resolve(&input);
            let mark = resolved.fields.get("networkCheck").unwrap();
            assert_eq!(mark.left, left);
            assert_eq!(resolved.values.get("networkCheck"), CHECK_MARK);
        }
    }

    #[test]
    fn test_unknown_network_falls_back_to_lg() {
        let input = FormInput::new().with("networkType", "SKY");
        let resolved = LgStoryTransfer.resolve(&input);
        assert_eq!(resolved.fields.get("networkCheck").unwrap().left, 174.0);
    }

    #[test]
    fn test_phone_uses_wide_form() {
        let input = FormInput::new().with("phoneNumber", "010-1234-5678");
        let resolved = LgStoryTransfer.resolve(&input);
        assert_eq!(resolved.values.get("phoneNumber"), "1234\u{a0}\u{a0}\u{a0}\u{a0}5678");
    }

    #[test]
    fn test_sign_date_twelve_gaps() {
        let input = FormInput::new().with("signDate", "2025.12.02");
        let resolved = LgStoryTransfer.resolve(&input);
        let gap = "\u{a0}".repeat(12);
        assert_eq!(resolved.values.get("signDate"), format!("2025{gap}12{gap}02"));
    }
}
