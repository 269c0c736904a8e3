//! LG U+ "이야기" prepaid application.
//!
//! The address line only carries the room number, handwritten-style, taken
//! from the room rotation (see [`crate::room`]).

use super::{Carrier, FormContext, Template, birth_date_input, sign_date_input};
use crate::form::{FormInput, InputKind, InputSpec};
use crate::format;
use crate::schema::{
    FieldPosition, FieldValues, HANDWRITING_FONT_FAMILY, PageImages, Resolved, active_fields,
};

const SIGN_DATE_GAPS: (usize, usize) = (7, 7);

static INPUTS: &[InputSpec] = &[
    InputSpec::new("name", "이름 (법인명)", "가입고객정보", InputKind::Text)
        .placeholder("홍길동")
        .required(),
    birth_date_input(),
    InputSpec::new("passportNumber", "여권번호", "가입고객정보", InputKind::Text).placeholder("M12345678"),
    InputSpec::new("usimModel", "USIM 모델명", "USIM 정보", InputKind::Text)
        .placeholder("모델명")
        .required(),
    InputSpec::new("usimNumber", "USIM 일련번호", "USIM 정보", InputKind::Text)
        .placeholder("0000 0000")
        .required(),
    InputSpec::new("address", "호수", "주소", InputKind::Text)
        .placeholder(", 101")
        .required(),
    sign_date_input(),
];

fn base_fields() -> Vec<FieldPosition> {
    vec![
        FieldPosition::new("name", 1, 128.0, 225.0).size(218.0, 36.0).font_size(14.0),
        FieldPosition::new("birthDate", 1, 128.0, 580.0).size(182.0, 34.0).font_size(14.0),
        FieldPosition::new("passportNumber", 1, 160.0, 580.0).size(182.0, 34.0).font_size(14.0),
        FieldPosition::new("usimInfo", 1, 343.0, 290.0).size(145.0, 41.0).font_size(14.0),
        FieldPosition::new("address", 1, 194.0, 450.0)
            .size(82.0, 38.0)
            .font_size(17.0)
            .font_family(HANDWRITING_FONT_FAMILY)
            .italic()
            .opacity(0.8),
        FieldPosition::new("signDate", 1, 1035.0, 575.0).height(39.0).font_size(14.0),
    ]
}

/// Address line for a room number: `", 101"`.
pub fn room_address(room: u16) -> String {
    format!(", {}", room)
}

/// 선불 LG 이야기
pub struct LgStory;

impl Template for LgStory {
    fn id(&self) -> &'static str {
        "lg-story"
    }

    fn carrier(&self) -> Carrier {
        Carrier::LgUplus
    }

    fn title(&self) -> &'static str {
        "선불 LG 이야기"
    }

    fn page_images(&self) -> PageImages {
        PageImages::new(["lg/story_prepaid.jpg"])
    }

    fn preview_scale(&self) -> f64 {
        0.6
    }

    fn inputs(&self) -> &'static [InputSpec] {
        INPUTS
    }

    fn defaults(&self, ctx: &FormContext) -> FormInput {
        let address = ctx.room.map(room_address).unwrap_or_default();
        FormInput::new()
            .with("address", address)
            .with("signDate", ctx.today.clone())
    }

    fn resolve(&self, input: &FormInput) -> Resolved {
        let (year_gap, month_gap) = SIGN_DATE_GAPS;
        let values = FieldValues::new()
            .with("name", input.text("name"))
            .with("birthDate", input.text("birthDate"))
            .with("passportNumber", input.text("passportNumber"))
            .with(
                "usimInfo",
                format::two_lines(input.text("usimModel"), input.text("usimNumber")),
            )
            .with("address", input.text("address"))
            .with("signDate", format::spaced_date(input.text("signDate"), year_gap, month_gap));

        Resolved::new(active_fields(&(), &base_fields()), values)
    }

    fn uses_room_counter(&self) -> bool {
        true
    }
}
