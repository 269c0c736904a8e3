//! # Overlay Renderer
//!
//! Renders the page stack of a template at a display scale with the active
//! field values positioned over each scanned page.
//!
//! ## Geometry
//!
//! Every length in a [`FieldPosition`] is in the 794×1123 reference frame and
//! is multiplied by the scale here, never earlier:
//!
//! ```text
//! screen_top  = top  * scale
//! screen_left = left * scale
//! font_size   = (fontSize or 12) * scale
//! ```
//!
//! ## States
//!
//! The view is gated on the whole page set. While any page is still loading
//! a single loading message is shown; if any page failed, a single error
//! message replaces all pages. Output is a pure function of the load state,
//! fields, values, scale, and debug flag.

pub mod picker;

use std::fmt::Write as _;

use crate::assets::{LoadState, page_href};
use crate::html::{Style, escape};
use crate::schema::{ActiveFields, FieldPosition, FieldValues, FontStyle, Resolved, TextAlign};
use crate::units::{PageFrame, scaled};

/// Shown while page images are loading.
pub const LOADING_TEXT: &str = "로딩 중...";

/// Shown when any page image failed to load.
pub const LOAD_ERROR_TEXT: &str = "이미지를 로드할 수 없습니다.";

/// Outline size, in reference px, for fields without an explicit box.
const DEBUG_DEFAULT_WIDTH: f64 = 100.0;
const DEBUG_DEFAULT_HEIGHT: f64 = 20.0;

/// A field resolved to on-screen geometry and text.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub id: String,
    pub page: u32,
    pub top: f64,
    pub left: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: f64,
    pub letter_spacing: Option<f64>,
    pub align: TextAlign,
    pub font_family: String,
    pub font_style: FontStyle,
    pub opacity: f64,
    pub text: String,
}

impl PlacedLabel {
    /// Place `field` at `scale`, looking its text up in `values`.
    pub fn place(field: &FieldPosition, values: &FieldValues, scale: f64) -> Self {
        Self {
            id: field.id.clone(),
            page: field.page,
            top: scaled(field.top, scale),
            left: scaled(field.left, scale),
            width: field.width.map(|w| scaled(w, scale)),
            height: field.height.map(|h| scaled(h, scale)),
            font_size: scaled(field.effective_font_size(), scale),
            letter_spacing: field.letter_spacing.map(|s| scaled(s, scale)),
            align: field.effective_align(),
            font_family: field.effective_font_family().to_string(),
            font_style: field.effective_font_style(),
            opacity: field.effective_opacity(),
            text: values.get(&field.id).to_string(),
        }
    }

    fn style(&self) -> Style {
        let mut style = Style::new()
            .set("position", "absolute")
            .len("top", self.top, "px")
            .len("left", self.left, "px");
        if let Some(width) = self.width {
            style = style.len("width", width, "px");
        }
        if let Some(height) = self.height {
            style = style.len("height", height, "px");
        }
        if let Some(spacing) = self.letter_spacing {
            style = style.len("letter-spacing", spacing, "px");
        }
        style
            .len("font-size", self.font_size, "px")
            .set("font-family", &self.font_family)
            .set("font-style", self.font_style.css())
            .set_if(self.opacity < 1.0, "opacity", self.opacity.to_string())
            .set("display", "flex")
            .set("align-items", "center")
            .set("white-space", "pre-wrap")
            .set("word-break", "keep-all")
            .set("line-height", "1.1")
            .set("color", "#000")
            .set("font-weight", "500")
    }

    /// Label markup; the inner span carries the alignment.
    pub fn to_html(&self) -> String {
        let inner = Style::new().set("width", "100%").set("text-align", self.align.css());
        format!(
            "<div class=\"overprint-field\" data-field=\"{}\"{}><span{}>{}</span></div>",
            escape(&self.id),
            self.style().attr(),
            inner.attr(),
            escape(&self.text)
        )
    }
}

/// A template's pages with resolved values laid over them.
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    fields: &'a ActiveFields,
    values: &'a FieldValues,
    scale: f64,
    debug: bool,
    frame: PageFrame,
}

impl<'a> OverlayView<'a> {
    pub fn new(resolved: &'a Resolved, scale: f64) -> Self {
        Self::from_parts(&resolved.fields, &resolved.values, scale)
    }

    pub fn from_parts(fields: &'a ActiveFields, values: &'a FieldValues, scale: f64) -> Self {
        Self {
            fields,
            values,
            scale,
            debug: false,
            frame: PageFrame::A4,
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Labels for page `page` (1-based), in field order.
    pub fn labels(&self, page: u32) -> Vec<PlacedLabel> {
        self.fields
            .on_page(page)
            .map(|f| PlacedLabel::place(f, self.values, self.scale))
            .collect()
    }

    /// Full view for the current load state.
    pub fn render(&self, state: &LoadState) -> String {
        match state {
            LoadState::Loading => status_view("overprint-loading", LOADING_TEXT),
            LoadState::Failed(_) => status_view("overprint-error", LOAD_ERROR_TEXT),
            LoadState::Ready(pages) => {
                let total = pages.len();
                let mut out = String::from("<div class=\"overprint-pages\">");
                for (i, page) in pages.iter().enumerate() {
                    out.push_str(&self.render_page(i as u32 + 1, total, &page_href(&page.reference)));
                }
                out.push_str("</div>");
                out
            }
        }
    }

    /// One page: image, field layer, badge, and debug outlines.
    pub fn render_page(&self, page: u32, total: usize, href: &str) -> String {
        let (width, height) = self.frame.scaled_size(self.scale);
        let container = Style::new()
            .set("position", "relative")
            .len("width", width, "px")
            .len("height", height, "px")
            .set_if(self.debug, "cursor", "crosshair")
            .set_if(self.debug, "user-select", "none");

        let mut out = String::new();
        let _ = write!(
            out,
            "<div class=\"overprint-page\" data-page=\"{}\" data-scale=\"{}\"{}{}>",
            page,
            self.scale,
            if self.debug { " data-debug=\"1\"" } else { "" },
            container.attr()
        );

        let image = Style::new()
            .set("position", "absolute")
            .set("inset", "0")
            .set("width", "100%")
            .set("height", "100%")
            .set("object-fit", self.frame.fit.css())
            .set("pointer-events", "none");
        let _ = write!(
            out,
            "<img class=\"overprint-page-image\" src=\"{}\" alt=\"Page {}\" draggable=\"false\"{}>",
            escape(href),
            page,
            image.attr()
        );

        let layer = Style::new()
            .set("position", "absolute")
            .set("inset", "0")
            .set_if(!self.debug, "pointer-events", "none");
        let _ = write!(out, "<div class=\"overprint-fields\"{}>", layer.attr());
        for label in self.labels(page) {
            out.push_str(&label.to_html());
        }
        out.push_str("</div>");

        if self.debug {
            for field in self.fields.on_page(page) {
                out.push_str(&self.outline(field));
            }
        }

        let _ = write!(out, "<span class=\"overprint-page-badge\">{} / {}</span>", page, total);
        out.push_str("</div>");
        out
    }

    fn outline(&self, field: &FieldPosition) -> String {
        let width = field.width.unwrap_or(DEBUG_DEFAULT_WIDTH);
        let height = field.height.unwrap_or(DEBUG_DEFAULT_HEIGHT);
        let style = Style::new()
            .set("position", "absolute")
            .len("top", scaled(field.top, self.scale), "px")
            .len("left", scaled(field.left, self.scale), "px")
            .len("width", scaled(width, self.scale), "px")
            .len("height", scaled(height, self.scale), "px")
            .set("border", "1px dashed rgba(220, 38, 38, 0.8)")
            .set("background", "rgba(220, 38, 38, 0.08)")
            .set("pointer-events", "none");
        format!(
            "<div class=\"overprint-outline\" data-field=\"{id}\"{}><span class=\"overprint-outline-id\">{id}</span></div>",
            style.attr(),
            id = escape(&field.id)
        )
    }
}

fn status_view(class: &str, text: &str) -> String {
    format!("<div class=\"overprint-status {}\"><p>{}</p></div>", class, escape(text))
}

// ============================================================================
// TESTS
// ============================================================================
