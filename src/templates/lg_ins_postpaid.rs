//! LG U+ Ins postpaid application.
//!
//! New sign-ups print wish numbers. Transfers print the transferor's number
//! twice and tick the previous carrier, with a free-text MVNO name when the
//! line came from a budget carrier.

use super::{
    CHECK_MARK, Carrier, FormContext, INS_PLANS, Template, birth_date_input, check, ins_plan_name,
    sign_date_input,
};
use crate::form::{Choice, Discriminator, FormInput, InputKind, InputSpec};
use crate::format::{self, DateDigits};
use crate::schema::{FieldPosition, FieldValues, PageImages, Resolved, Variant, active_fields};

const SIGN_DATE_GAPS: (usize, usize) = (20, 20);

const NEW: &[&str] = &["new"];
const TRANSFER: &[&str] = &["transfer"];
const MVNO: &[&str] = &["mvno"];

/// 신규가입 or 명의변경.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Signup {
    #[default]
    New,
    Transfer,
}

impl Discriminator for Signup {
    const CHOICES: &'static [Choice] = &[Choice::new("new", "신규가입"), Choice::new("transfer", "명의변경")];

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Signup::New),
            "transfer" => Some(Signup::Transfer),
            _ => None,
        }
    }

    fn value(&self) -> &'static str {
        match self {
            Signup::New => "new",
            Signup::Transfer => "transfer",
        }
    }
}

/// Carrier the line is transferred from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrevCarrier {
    #[default]
    Mvno,
    Skt,
    Kt,
    Lg,
}

impl Discriminator for PrevCarrier {
    const CHOICES: &'static [Choice] = &[
        Choice::new("mvno", "알뜰폰"),
        Choice::new("skt", "SKT"),
        Choice::new("kt", "KT"),
        Choice::new("lg", "LG U+"),
    ];

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "mvno" => Some(PrevCarrier::Mvno),
            "skt" => Some(PrevCarrier::Skt),
            "kt" => Some(PrevCarrier::Kt),
            "lg" => Some(PrevCarrier::Lg),
            _ => None,
        }
    }

    fn value(&self) -> &'static str {
        match self {
            PrevCarrier::Mvno => "mvno",
            PrevCarrier::Skt => "skt",
            PrevCarrier::Kt => "kt",
            PrevCarrier::Lg => "lg",
        }
    }
}

impl PrevCarrier {
    fn check_left(&self) -> f64 {
        match self {
            PrevCarrier::Skt => 501.0,
            PrevCarrier::Kt => 546.0,
            PrevCarrier::Lg => 584.0,
            PrevCarrier::Mvno => 632.0,
        }
    }
}

static INPUTS: &[InputSpec] = &[
    InputSpec::new("applicationType", "신청유형", "신청유형", InputKind::Radio { choices: Signup::CHOICES }),
    InputSpec::new("name", "이름", "고객정보", InputKind::Text)
        .placeholder("홍길동")
        .required(),
    InputSpec::new("phoneNumber", "개통번호", "고객정보", InputKind::Phone).required(),
    birth_date_input(),
    InputSpec::new("foreignerNumber", "외국인등록번호", "고객정보", InputKind::Text)
        .placeholder("1234567890123")
        .required(),
    InputSpec::new("address", "주소", "고객정보", InputKind::Text)
        .placeholder("서울시 강남구 테헤란로 123")
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
    InputSpec::new("wishNumber1", "1순위", "희망번호 뒷자리", InputKind::Short { max: 4 })
        .placeholder("1234")
        .only_when("applicationType", NEW),
    InputSpec::new("wishNumber2", "2순위", "희망번호 뒷자리", InputKind::Short { max: 4 })
        .placeholder("5678")
        .only_when("applicationType", NEW),
    InputSpec::new(
        "prevCarrier",
        "변경전 통신사",
        "변경전 통신사",
        InputKind::Radio { choices: PrevCarrier::CHOICES },
    )
    .only_when("applicationType", TRANSFER),
    InputSpec::new("mvnoDetail", "알뜰폰 통신사명", "변경전 통신사", InputKind::Text)
        .placeholder("알뜰폰 통신사명 입력")
        .required()
        .only_when("applicationType", TRANSFER)
        .and_when("prevCarrier", MVNO),
    InputSpec::new("accountHolder", "예금주", "요금납부", InputKind::Text)
        .placeholder("홍길동")
        .required(),
    InputSpec::new(
        "accountBirthDate",
        "예금주 생년월일",
        "요금납부",
        InputKind::Date { digits: DateDigits::Six },
    )
    .required(),
    InputSpec::new("bank", "은행", "요금납부", InputKind::Text)
        .placeholder("은행명 입력")
        .required(),
    InputSpec::new("accountNumber", "계좌번호", "요금납부", InputKind::Text)
        .placeholder("000-000-000000")
        .required(),
    sign_date_input(),
];

fn base_fields() -> Vec<FieldPosition> {
    vec![
        FieldPosition::new("phoneNumber", 1, 50.0, 490.0).size(270.0, 28.0).font_size(16.0),
        FieldPosition::new("name", 1, 50.0, 136.0).size(270.0, 28.0).font_size(16.0),
        FieldPosition::new("birthDate", 1, 76.0, 136.0).size(270.0, 28.0).font_size(16.0),
        FieldPosition::new("foreignerNumber", 1, 76.0, 490.0).size(270.0, 28.0).font_size(16.0),
        FieldPosition::new("address", 1, 130.0, 136.0).size(620.0, 27.0).font_size(14.0),
        FieldPosition::new("plan", 1, 160.0, 136.0).size(272.0, 24.0).font_size(14.0),
        FieldPosition::new("usimModel", 1, 160.0, 534.0).size(85.0, 27.0).font_size(16.0),
        FieldPosition::new("usimNumber", 1, 160.0, 660.0).size(89.0, 24.0).font_size(14.0),
        FieldPosition::new("accountHolder", 1, 314.0, 136.0).size(180.0, 28.0).font_size(16.0),
        FieldPosition::new("accountBirthDate", 1, 314.0, 484.0).size(146.0, 28.0).font_size(16.0),
        FieldPosition::new("bank", 1, 340.0, 136.0).size(115.0, 30.0).font_size(14.0),
        FieldPosition::new("accountNumber", 1, 340.0, 328.0).size(300.0, 29.0).font_size(16.0),
        FieldPosition::new("signDate", 1, 1039.0, 130.0).size(280.0, 38.0).font_size(16.0),
    ]
}

struct Layout {
    signup: Signup,
    carrier: PrevCarrier,
}

impl Variant for Layout {
    fn fields(&self) -> Vec<FieldPosition> {
        match self.signup {
            Signup::New => vec![
                check("typeCheck", 20.0, 342.0),
                FieldPosition::new("wishNumber1", 1, 186.0, 180.0).size(110.0, 29.0).font_size(14.0),
                FieldPosition::new("wishNumber2", 1, 212.0, 180.0).size(110.0, 29.0).font_size(14.0),
            ],
            Signup::Transfer => {
                let mut fields = vec![
                    check("typeCheck", 20.0, 462.0),
                    // transferor
                    FieldPosition::new("phoneNumber2", 1, 974.0, 540.0).size(204.0, 29.0).font_size(16.0),
                    // transferee
                    FieldPosition::new("phoneNumber3", 1, 242.0, 135.0).size(273.0, 25.0).font_size(16.0),
                    check("carrierCheck", 246.0, self.carrier.check_left()),
                ];
                if self.carrier == PrevCarrier::Mvno {
                    fields.push(FieldPosition::new("mvnoDetail", 1, 246.0, 672.0).size(87.0, 23.0).font_size(12.0));
                }
                fields
            }
        }
    }
}

/// 인스 후불
pub struct LgInsPostpaid;

impl Template for LgInsPostpaid {
    fn id(&self) -> &'static str {
        "lg-ins-postpaid"
    }

    fn carrier(&self) -> Carrier {
        Carrier::LgUplus
    }

    fn title(&self) -> &'static str {
        "인스 후불"
    }

    fn page_images(&self) -> PageImages {
        PageImages::new(["lg/ins_postpaid.jpg"])
    }

    fn inputs(&self) -> &'static [InputSpec] {
        INPUTS
    }

    fn defaults(&self, ctx: &FormContext) -> FormInput {
        FormInput::new()
            .with("applicationType", Signup::default().value())
            .with("prevCarrier", PrevCarrier::default().value())
            .with("signDate", ctx.today.clone())
    }

    fn resolve(&self, input: &FormInput) -> Resolved {
        let layout = Layout {
            signup: input.discriminator("applicationType"),
            carrier: input.discriminator("prevCarrier"),
        };
        let phone = input.text("phoneNumber");
        let (year_gap, month_gap) = SIGN_DATE_GAPS;
        let values = FieldValues::new()
            .with("typeCheck", CHECK_MARK)
            .with("phoneNumber", format::phone_dashed(phone))
            .with("phoneNumber2", format::phone_wide(phone))
            .with("phoneNumber3", format::phone_dashed(phone))
            .with("name", input.text("name"))
            .with("birthDate", input.text("birthDate"))
            .with("foreignerNumber", input.text("foreignerNumber"))
            .with("address", input.text("address"))
            .with("plan", ins_plan_name(input.text("plan")))
            .with("usimModel", input.text("usimModel"))
            .with("usimNumber", input.text("usimNumber"))
            .with("wishNumber1", input.text("wishNumber1"))
            .with("wishNumber2", input.text("wishNumber2"))
            .with("carrierCheck", CHECK_MARK)
            .with("mvnoDetail", input.text("mvnoDetail"))
            .with("accountHolder", input.text("accountHolder"))
            .with("accountBirthDate", input.text("accountBirthDate"))
            .with("bank", input.text("bank"))
            .with("accountNumber", input.text("accountNumber"))
            .with("signDate", format::spaced_date(input.text("signDate"), year_gap, month_gap));

        Resolved::new(active_fields(&layout, &base_fields()), values)
    }
}
