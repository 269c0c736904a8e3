//! LG U+ Ins prepaid / ownership transfer application.
//!
//! Both application types share one layout; only the check mark moves.

use super::{
    ApplicationType, CHECK_MARK, Carrier, FormContext, INS_PLANS, Template, birth_date_input, check,
    ins_plan_name, sign_date_input,
};
use crate::form::{Discriminator, FormInput, InputKind, InputSpec};
use crate::format;
use crate::schema::{FieldPosition, FieldValues, PageImages, Resolved, Variant, active_fields};

const SIGN_DATE_GAPS: (usize, usize) = (11, 13);

static INPUTS: &[InputSpec] = &[
    InputSpec::new(
        "applicationType",
        "신청유형",
        "신청유형",
        InputKind::Radio { choices: ApplicationType::CHOICES },
    ),
    InputSpec::new("phoneNumber", "개통번호", "고객정보", InputKind::Phone).required(),
    InputSpec::new("name", "이름", "고객정보", InputKind::Text)
        .placeholder("홍길동")
        .required(),
    birth_date_input(),
    InputSpec::new("foreignerNumber", "외국인등록번호", "고객정보", InputKind::Text)
        .placeholder("1234567890123")
        .required(),
    InputSpec::new("plan", "요금제", "요금제", InputKind::Select { choices: INS_PLANS })
        .placeholder("요금제를 선택하세요")
        .required(),
    InputSpec::new("usimModel", "유심모델", "USIM 정보", InputKind::Text)
        .placeholder("모델명")
        .required(),
    InputSpec::new("usimNumber", "유심번호", "USIM 정보", InputKind::Text)
        .placeholder("0000 0000")
        .required(),
    InputSpec::new("wishNumber1", "1순위", "희망번호 뒷자리", InputKind::Short { max: 4 }).placeholder("1234"),
    InputSpec::new("wishNumber2", "2순위", "희망번호 뒷자리", InputKind::Short { max: 4 }).placeholder("5678"),
    sign_date_input(),
];

fn base_fields() -> Vec<FieldPosition> {
    vec![
        FieldPosition::new("phoneNumber", 1, 66.0, 180.0).size(210.0, 36.0).font_size(16.0),
        FieldPosition::new("name", 1, 114.0, 145.0).size(259.0, 30.0).font_size(16.0),
        FieldPosition::new("birthDate", 1, 114.0, 500.0).size(155.0, 26.0).font_size(16.0),
        FieldPosition::new("foreignerNumber", 1, 140.0, 500.0).size(200.0, 30.0).font_size(16.0),
        FieldPosition::new("plan", 1, 295.0, 147.0).size(255.0, 30.0).font_size(14.0),
        FieldPosition::new("usimModel", 1, 296.0, 539.0).size(85.0, 26.0).font_size(16.0),
        FieldPosition::new("usimNumber", 1, 296.0, 660.0).size(85.0, 26.0).font_size(14.0),
        FieldPosition::new("wishNumber1", 1, 325.0, 189.0).size(100.0, 25.0).font_size(14.0),
        FieldPosition::new("wishNumber2", 1, 350.0, 189.0).size(100.0, 25.0).font_size(14.0),
        FieldPosition::new("signDate", 1, 1037.0, 140.0).size(274.0, 38.0).font_size(16.0),
    ]
}

struct TypeCheck(ApplicationType);

impl Variant for TypeCheck {
    fn fields(&self) -> Vec<FieldPosition> {
        let left = match self.0 {
            ApplicationType::Prepaid => 444.0,
            ApplicationType::Transfer => 564.0,
        };
        vec![check("typeCheck", 12.0, left)]
    }
}

/// 인스 선불-명변
pub struct LgIns;

impl Template for LgIns {
    fn id(&self) -> &'static str {
        "lg-ins"
    }

    fn carrier(&self) -> Carrier {
        Carrier::LgUplus
    }

    fn title(&self) -> &'static str {
        "인스 선불-명변"
    }

    fn page_images(&self) -> PageImages {
        PageImages::new(["lg/ins_prepaid_transfer.jpg"])
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
        let (year_gap, month_gap) = SIGN_DATE_GAPS;
        let values = FieldValues::new()
            .with("typeCheck", CHECK_MARK)
            .with("phoneNumber", format::phone_wide(input.text("phoneNumber")))
            .with("name", input.text("name"))
            .with("birthDate", input.text("birthDate"))
            .with("foreignerNumber", input.text("foreignerNumber"))
            .with("plan", ins_plan_name(input.text("plan")))
            .with("usimModel", input.text("usimModel"))
            .with("usimNumber", input.text("usimNumber"))
            .with("wishNumber1", input.text("wishNumber1"))
            .with("wishNumber2", input.text("wishNumber2"))
            .with("signDate", format::spaced_date(input.text("signDate"), year_gap, month_gap));

        Resolved::new(active_fields(&TypeCheck(kind), &base_fields()), values)
    }
}
