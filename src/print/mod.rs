//! # Print Composer
//!
//! Builds a standalone A4 HTML document for the browser's print dialog.
//!
//! Every length is converted from reference px to millimetres with
//! [`px_to_mm`], so the output is independent of the on-screen scale:
//!
//! ```text
//! top_mm       = top / 794 * 210
//! font_size_mm = (fontSize or 12) / 794 * 210
//! ```
//!
//! Each page is a 210mm × 297mm box with the scanned image stretched using
//! the same fit mode as the screen preview. Pages are separated by
//! `page-break-after: always`, except the last, so no trailing blank page is
//! emitted.
//!
//! ## Example
//!
//! ```
//! use overprint::print::PrintComposer;
//! use overprint::schema::{ActiveFields, FieldPosition, FieldValues, Resolved};
//!
//! let fields = ActiveFields::new(vec![FieldPosition::new("name", 1, 794.0, 0.0)]);
//! let resolved = Resolved::new(fields, FieldValues::new().with("name", "홍길동"));
//! let html = PrintComposer::new(&resolved).compose(&["/pages/form.jpg".to_string()]);
//! assert!(html.contains("top: 210mm;"));
//! ```

pub mod readiness;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write as _;

use crate::assets::{LoadedPage, page_href};
use crate::html::{Style, escape, length};
use crate::schema::{ActiveFields, FieldPosition, FieldValues, Resolved};
use crate::units::{A4_HEIGHT_MM, A4_WIDTH_MM, PageFrame, px_to_mm};

/// Document title.
pub const PRINT_TITLE: &str = "인쇄 미리보기";

/// Attempts of the in-page image poll before it gives up on auto-print.
const SCRIPT_POLL_ATTEMPTS: u32 = 600;

/// How page images are referenced from the print document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// `src` points back at the server
    #[default]
    Linked,
    /// `src` is a base64 data URI; the document is self-contained
    Inline,
}

/// `src` for a loaded page in `mode`.
pub fn image_src(page: &LoadedPage, mode: ImageMode) -> String {
    match mode {
        ImageMode::Linked => page_href(&page.reference),
        ImageMode::Inline => format!("data:{};base64,{}", page.mime, STANDARD.encode(&page.bytes)),
    }
}

/// A field's box in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmBox {
    pub top: f64,
    pub left: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: f64,
    pub letter_spacing: Option<f64>,
}

/// Convert a field's geometry to millimetres.
pub fn position_mm(field: &FieldPosition) -> MmBox {
    MmBox {
        top: px_to_mm(field.top),
        left: px_to_mm(field.left),
        width: field.width.map(px_to_mm),
        height: field.height.map(px_to_mm),
        font_size: px_to_mm(field.effective_font_size()),
        letter_spacing: field.letter_spacing.map(px_to_mm),
    }
}

/// Print document builder for one resolved form.
#[derive(Debug, Clone, Copy)]
pub struct PrintComposer<'a> {
    fields: &'a ActiveFields,
    values: &'a FieldValues,
    frame: PageFrame,
    auto_print: bool,
}

impl<'a> PrintComposer<'a> {
    pub fn new(resolved: &'a Resolved) -> Self {
        Self {
            fields: &resolved.fields,
            values: &resolved.values,
            frame: PageFrame::A4,
            auto_print: false,
        }
    }

    /// Open the print dialog once every image reports complete.
    pub fn auto_print(mut self, on: bool) -> Self {
        self.auto_print = on;
        self
    }

    /// Compose from loaded pages.
    pub fn compose_pages(&self, pages: &[impl AsRef<LoadedPage>], mode: ImageMode) -> String {
        let srcs: Vec<String> = pages.iter().map(|p| image_src(p.as_ref(), mode)).collect();
        self.compose(&srcs)
    }

    /// Compose from image `src` values, one per page.
    pub fn compose(&self, srcs: &[String]) -> String {
        let mut body = String::new();
        let total = srcs.len();
        for (i, src) in srcs.iter().enumerate() {
            body.push_str(&self.page(i as u32 + 1, src, i + 1 == total));
        }

        let mut out = String::with_capacity(body.len() + 2048);
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", PRINT_TITLE);
        out.push_str(FONT_LINKS);
        out.push_str("<style>\n");
        out.push_str(PRINT_CSS);
        out.push_str("</style>\n</head>\n<body>\n");
        out.push_str(&body);
        if self.auto_print {
            out.push_str("<script>\n");
            out.push_str(&auto_print_script());
            out.push_str("</script>\n");
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    fn page(&self, page: u32, src: &str, last: bool) -> String {
        let container = Style::new()
            .len("width", A4_WIDTH_MM, "mm")
            .len("height", A4_HEIGHT_MM, "mm")
            .set("position", "relative")
            .set_if(!last, "page-break-after", "always")
            .set("overflow", "hidden")
            .set("background", "white");
        let image = Style::new()
            .set("position", "absolute")
            .set("top", "0")
            .set("left", "0")
            .set("width", "100%")
            .set("height", "100%")
            .set("object-fit", self.frame.fit.css());

        let mut out = String::new();
        let _ = write!(out, "<div class=\"page\"{}>", container.attr());
        let _ = write!(out, "<img src=\"{}\" alt=\"Page {}\"{}>", escape(src), page, image.attr());
        for field in self.fields.on_page(page) {
            out.push_str(&self.field(field));
        }
        out.push_str("</div>\n");
        out
    }

    fn field(&self, field: &FieldPosition) -> String {
        let mm = position_mm(field);
        let mut style = Style::new()
            .set("position", "absolute")
            .len("top", mm.top, "mm")
            .len("left", mm.left, "mm")
            .len("font-size", mm.font_size, "mm")
            .set("white-space", "pre-wrap")
            .set("word-break", "keep-all")
            .set("line-height", "1.1")
            .set("color", "#000")
            .set("font-family", field.effective_font_family())
            .set("font-style", field.effective_font_style().css())
            .set("font-weight", "500")
            .set("opacity", field.effective_opacity().to_string());
        if let Some(width) = mm.width {
            style = style.len("width", width, "mm");
        }
        if let Some(height) = mm.height {
            style = style
                .len("height", height, "mm")
                .set("display", "flex")
                .set("align-items", "center");
        }
        if let Some(spacing) = mm.letter_spacing {
            style = style.len("letter-spacing", spacing, "mm");
        }
        let inner = Style::new()
            .set("width", "100%")
            .set("text-align", field.effective_align().css());
        format!(
            "<div data-field=\"{}\"{}><span{}>{}</span></div>",
            escape(&field.id),
            style.attr(),
            inner.attr(),
            escape(self.values.get(&field.id))
        )
    }
}

const FONT_LINKS: &str = "<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">\n\
<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>\n\
<link href=\"https://fonts.googleapis.com/css2?family=Caveat:wght@400;500;600&family=Nanum+Pen+Script&display=swap\" rel=\"stylesheet\">\n";

const PRINT_CSS: &str = "* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: #525659; display: flex; flex-direction: column; align-items: center; padding: 20px; gap: 20px; }
.page { box-shadow: 0 2px 8px rgba(0, 0, 0, 0.3); }
@media print {
  body { background: white; padding: 0; gap: 0; }
  .page { box-shadow: none; margin: 0; }
}
@page { size: A4; margin: 0; }
";

/// Polls `img.complete` every 100 ms, then opens the print dialog.
fn auto_print_script() -> String {
    format!(
        "(function () {{
  function ready() {{
    return Array.prototype.every.call(document.images, function (img) {{ return img.complete; }});
  }}
  function poll(left) {{
    if (ready()) {{ window.print(); return; }}
    if (left > 0) {{ setTimeout(function () {{ poll(left - 1); }}, {interval}); }}
  }}
  setTimeout(function () {{ poll({attempts}); }}, {interval});
}})();
",
        interval = readiness::POLL_INTERVAL.as_millis(),
        attempts = SCRIPT_POLL_ATTEMPTS
    )
}

/// Page size line used by the CLI summary.
pub fn page_size_label() -> String {
    format!("{} × {}", length(A4_WIDTH_MM, "mm"), length(A4_HEIGHT_MM, "mm"))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved() -> Resolved {
        let fields = ActiveFields::new(vec![
            FieldPosition::new("name", 1, 397.0, 794.0).size(397.0, 79.4).font_size(12.0),
            FieldPosition::new("signDate", 2, 0.0, 0.0),
        ]);
        Resolved::new(fields, FieldValues::new().with("name", "A&B"))
    }

    fn srcs(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("/pages/p{}.jpg", i)).collect()
    }

    #[test]
    fn test_position_mm() {
        let r = resolved();
        let mm = position_mm(r.fields.get("name").unwrap());
        assert_eq!(mm.top, 105.0);
        assert_eq!(mm.left, 210.0);
        assert_eq!(mm.width, Some(105.0));
        assert!((mm.height.unwrap() - 21.0).abs() < 1e-9);
        assert!((mm.font_size - 12.0 / 794.0 * 210.0).abs() < 1e-12);
        assert_eq!(mm.letter_spacing, None);
    }

    #[test]
    fn test_page_breaks_between_pages_only() {
        let r = resolved();
        for n in 1..=3 {
            let html = PrintComposer::new(&r).compose(&srcs(n));
            assert_eq!(html.matches("class=\"page\"").count(), n);
            assert_eq!(html.matches("page-break-after: always").count(), n - 1);
        }
    }

    #[test]
    fn test_document_is_standalone_a4() {
        let r = resolved();
        let html = PrintComposer::new(&r).compose(&srcs(1));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@page { size: A4; margin: 0; }"));
        assert!(html.contains("width: 210mm; height: 297mm;"));
        assert!(html.contains(PRINT_TITLE));
        assert!(html.contains("object-fit: fill;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_fields_on_their_page_with_values() {
        let r = resolved();
        let html = PrintComposer::new(&r).compose(&srcs(2));
        let (first, second) = html.split_at(html.find("p2.jpg").unwrap());
        assert!(first.contains("data-field=\"name\""));
        assert!(first.contains("A&amp;B"));
        assert!(first.contains("display: flex; align-items: center;"));
        assert!(second.contains("data-field=\"signDate\""));
    }

    #[test]
    fn test_field_without_height_not_flex() {
        let fields = ActiveFields::new(vec![FieldPosition::new("x", 1, 0.0, 0.0)]);
        let r = Resolved::new(fields, FieldValues::new());
        let html = PrintComposer::new(&r).compose(&srcs(1));
        assert!(!html.contains("display: flex; align-items: center;"));
    }

    #[test]
    fn test_auto_print_script_polls() {
        let r = resolved();
        let html = PrintComposer::new(&r).auto_print(true).compose(&srcs(1));
        assert!(html.contains("window.print()"));
        assert!(html.contains("}, 100);"));
    }

    #[test]
    fn test_inline_images() {
        let page = LoadedPage {
            reference: "kt/a.png".into(),
            mime: "image/png",
            width: 1,
            height: 1,
            bytes: vec![1, 2, 3],
        };
        assert_eq!(image_src(&page, ImageMode::Inline), "data:image/png;base64,AQID");
        assert_eq!(image_src(&page, ImageMode::Linked), "/pages/kt/a.png");
    }

    #[test]
    fn test_page_size_label() {
        assert_eq!(page_size_label(), "210mm × 297mm");
    }
}
