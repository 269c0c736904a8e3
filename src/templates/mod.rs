//! # Carrier Templates
//!
//! Each template is a scanned application form plus the data needed to fill
//! it: page images, side-panel inputs, field positions, and a resolver that
//! turns the current form state into display strings.
//!
//! ## Available Templates
//!
//! | Id | Carrier | Form | Discriminator |
//! |----|---------|------|---------------|
//! | `kt-asia` | KT | 선불 KT 아시아 | none |
//! | `lg-story` | LG U+ | 선불 LG 이야기 | none (room rotation) |
//! | `lg-story-transfer` | LG U+ | 이야기 명의변경 | network |
//! | `lg-hanpass` | LG U+ | 한패스 선불-명변 | application type |
//! | `lg-ins` | LG U+ | 인스 선불-명변 | application type |
//! | `lg-ins-postpaid` | LG U+ | 인스 후불 | application type, previous carrier |
//!
//! ## Usage
//!
//! ```
//! use overprint::form::FormInput;
//! use overprint::templates::{self, FormContext};
//!
//! let template = templates::by_id("kt-asia").unwrap();
//! let ctx = FormContext::new("2025.12.02", None);
//! let input = FormInput::new()
//!     .with("name", "홍길동")
//!     .or_defaults(&template.defaults(&ctx));
//! let resolved = template.resolve(&input);
//! assert_eq!(resolved.values.get("name"), "홍길동");
//! ```

mod kt_asia;
mod lg_hanpass;
mod lg_ins;
mod lg_ins_postpaid;
mod lg_story;
mod lg_story_transfer;

pub use kt_asia::KtAsia;
pub use lg_hanpass::LgHanpass;
pub use lg_ins::LgIns;
pub use lg_ins_postpaid::LgInsPostpaid;
pub use lg_story::LgStory;
pub use lg_story_transfer::LgStoryTransfer;

use serde::Serialize;

use crate::form::{Choice, Discriminator, FormInput, InputKind, InputSpec};
use crate::format::DateDigits;
use crate::schema::{FieldPosition, PageImages, Resolved};

/// Value rendered into check-box fields.
pub const CHECK_MARK: &str = "✓";

/// Subtitle shared by most forms.
const SERVICE_APPLICATION: &str = "이동전화 서비스 신청서";

/// Carrier grouping used by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    Kt,
    Skt,
    LgUplus,
}

impl Carrier {
    pub const ALL: [Carrier; 3] = [Carrier::Kt, Carrier::Skt, Carrier::LgUplus];

    pub fn label(&self) -> &'static str {
        match self {
            Carrier::Kt => "KT",
            Carrier::Skt => "SKT",
            Carrier::LgUplus => "LG U+",
        }
    }
}

/// Per-mount context for initial form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormContext {
    /// Default sign date, `YYYY.MM.DD`
    pub today: String,
    /// Next room number from the rotation, if the caller read one
    pub room: Option<u16>,
}

impl FormContext {
    pub fn new(today: impl Into<String>, room: Option<u16>) -> Self {
        Self {
            today: today.into(),
            room,
        }
    }
}

/// A fillable carrier form.
pub trait Template: Send + Sync {
    /// URL-safe identifier.
    fn id(&self) -> &'static str;

    fn carrier(&self) -> Carrier;

    fn title(&self) -> &'static str;

    fn subtitle(&self) -> &'static str {
        SERVICE_APPLICATION
    }

    /// Page image references, relative to the asset directory or absolute URLs.
    fn page_images(&self) -> PageImages;

    /// Preview scale used by the side-by-side editor.
    fn preview_scale(&self) -> f64 {
        0.9
    }

    /// Side-panel inputs in display (and focus) order.
    fn inputs(&self) -> &'static [InputSpec];

    /// Initial state for a freshly mounted form.
    fn defaults(&self, ctx: &FormContext) -> FormInput;

    /// Active fields and values for `input`.
    ///
    /// `input` is expected to be normalized; missing entries resolve to
    /// empty strings and unknown discriminator values to the default variant.
    fn resolve(&self, input: &FormInput) -> Resolved;

    /// Whether completing a print cycle advances the room rotation.
    fn uses_room_counter(&self) -> bool {
        false
    }
}

static TEMPLATES: [&dyn Template; 6] = [
    &KtAsia,
    &LgStory,
    &LgStoryTransfer,
    &LgHanpass,
    &LgIns,
    &LgInsPostpaid,
];

/// All registered templates, in menu order.
pub fn all() -> &'static [&'static dyn Template] {
    &TEMPLATES
}

/// Look up a template by id.
pub fn by_id(id: &str) -> Option<&'static dyn Template> {
    TEMPLATES.iter().copied().find(|t| t.id() == id)
}

/// Templates of one carrier, in menu order.
pub fn for_carrier(carrier: Carrier) -> impl Iterator<Item = &'static dyn Template> {
    TEMPLATES.iter().copied().filter(move |t| t.carrier() == carrier)
}

/// Summary of a template for menus and the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub carrier: Carrier,
    pub carrier_label: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub pages: usize,
    pub preview_scale: f64,
}

impl TemplateInfo {
    pub fn of(template: &dyn Template) -> Self {
        Self {
            id: template.id(),
            carrier: template.carrier(),
            carrier_label: template.carrier().label(),
            title: template.title(),
            subtitle: template.subtitle(),
            pages: template.page_images().len(),
            preview_scale: template.preview_scale(),
        }
    }
}

// ============================================================================
// SHARED FIELDS AND INPUTS
// ============================================================================

/// Rate plans offered on the Ins forms: value is the monthly fee.
pub(crate) const INS_PLANS: &[Choice] = &[
    Choice::new("19800", "19,800 인스 유심 올프리 7GB+"),
    Choice::new("29600", "29,600 인스 유심 스트롱 15GB+"),
    Choice::new("39000", "39,000 인스 유심 스트롱 11GB+"),
    Choice::new("45900", "45,900 인스 유심 스트롱 100GB+"),
];

/// Plan name as printed on the form (the label without the fee).
pub(crate) fn ins_plan_name(value: &str) -> &'static str {
    INS_PLANS
        .iter()
        .find(|c| c.value == value)
        .and_then(|c| c.label.split_once(' '))
        .map(|(_, name)| name)
        .unwrap_or("")
}

/// Prepaid sign-up or ownership transfer, as on the Hanpass and Ins forms.
///
/// Only the discriminator lives here. Each form wraps it in its own
/// [`Variant`](crate::schema::Variant) since the check boxes sit elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationType {
    #[default]
    Prepaid,
    Transfer,
}

impl Discriminator for ApplicationType {
    const CHOICES: &'static [Choice] = &[Choice::new("prepaid", "선불"), Choice::new("transfer", "명의변경")];

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "prepaid" => Some(ApplicationType::Prepaid),
            "transfer" => Some(ApplicationType::Transfer),
            _ => None,
        }
    }

    fn value(&self) -> &'static str {
        match self {
            ApplicationType::Prepaid => "prepaid",
            ApplicationType::Transfer => "transfer",
        }
    }
}

/// A check mark at one of several discriminator-dependent spots.
pub(crate) fn check(id: &str, top: f64, left: f64) -> FieldPosition {
    FieldPosition::new(id, 1, top, left).font_size(14.0)
}

pub(crate) const fn sign_date_input() -> InputSpec {
    InputSpec::new("signDate", "날짜", "신청날짜", InputKind::Date { digits: DateDigits::Eight }).required()
}

pub(crate) const fn birth_date_input() -> InputSpec {
    InputSpec::new("birthDate", "생년월일", "고객정보", InputKind::Date { digits: DateDigits::Six }).required()
}

// ============================================================================
// TESTS
// ============================================================================
