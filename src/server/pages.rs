//! Server-rendered HTML pages: the carrier menu and the form editor.

use std::fmt::Write as _;

use crate::assets::LoadState;
use crate::form::{FieldSequence, FormInput, InputKind, InputSpec};
use crate::html::escape;
use crate::overlay::OverlayView;
use crate::schema::Resolved;
use crate::templates::{self, Carrier, Template};

/// Notice shown after a lost room-rotation race.
pub const ROOM_CONFLICT_NOTICE: &str = "다른 창에서 호실 번호가 이미 사용되었습니다. 새 번호로 다시 작성하세요.";

/// Everything the editor page needs.
pub struct FormPage<'a> {
    pub template: &'a dyn Template,
    /// Normalized form state
    pub input: &'a FormInput,
    pub resolved: &'a Resolved,
    pub load: &'a LoadState,
    pub debug: bool,
    /// Rotation index the address was taken from, echoed back on completion
    pub room_index: Option<usize>,
    pub notice: Option<&'a str>,
    /// Cache-busting suffix for static assets
    pub asset_version: u64,
}

fn head(title: &str, version: u64) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/app.css?v={v}\">\n\
         <script src=\"/static/app.js?v={v}\" defer></script>\n</head>\n",
        escape(title),
        v = version
    )
}

/// Carrier menu with one link per registered form.
pub fn home(version: u64) -> String {
    let mut out = head("신청서 작성", version);
    out.push_str("<body class=\"menu\">\n<main class=\"menu-main\">\n<h1>신청서 작성</h1>\n");
    for carrier in Carrier::ALL {
        let _ = write!(out, "<section class=\"carrier\"><h2>{}</h2>", carrier.label());
        let mut forms = templates::for_carrier(carrier).peekable();
        if forms.peek().is_none() {
            out.push_str("<p class=\"carrier-empty\">준비 중</p>");
        } else {
            out.push_str("<ul>");
            for t in forms {
                let _ = write!(
                    out,
                    "<li><a href=\"/templates/{id}\">{title}</a><small>{subtitle}</small></li>",
                    id = escape(t.id()),
                    title = escape(t.title()),
                    subtitle = escape(t.subtitle()),
                );
            }
            out.push_str("</ul>");
        }
        out.push_str("</section>\n");
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

/// Query string that reproduces `input` (plus the debug flag).
pub fn query_string(input: &FormInput, debug: bool) -> String {
    let mut pairs: Vec<(&str, &str)> = input.iter().collect();
    if debug {
        pairs.push(("debug", "1"));
    }
    serde_urlencoded::to_string(&pairs).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "form state not encodable as a query");
        String::new()
    })
}

impl FormPage<'_> {
    pub fn render(&self) -> String {
        let t = self.template;
        let mut out = head(&format!("{} - {}", t.title(), t.subtitle()), self.asset_version);
        let _ = write!(
            out,
            "<body class=\"editor\" data-template=\"{}\">\n<header class=\"editor-header\">\
             <a class=\"back\" href=\"/\">← 목록</a><div><h1>{}</h1><p>{}</p></div></header>\n",
            escape(t.id()),
            escape(t.title()),
            escape(t.subtitle())
        );
        if let Some(notice) = self.notice {
            let _ = write!(out, "<p class=\"notice\" role=\"alert\">{}</p>\n", escape(notice));
        }
        out.push_str("<div class=\"editor-body\">\n");
        out.push_str(&self.side_panel());
        out.push_str("<section class=\"preview\">\n");
        if self.debug {
            out.push_str("<ol class=\"pick-log\" aria-live=\"polite\"></ol>\n");
        }
        out.push_str(&OverlayView::new(self.resolved, t.preview_scale()).debug(self.debug).render(self.load));
        out.push_str("\n</section>\n</div>\n</body>\n</html>\n");
        out
    }

    fn side_panel(&self) -> String {
        let t = self.template;
        let action = format!("/templates/{}", escape(t.id()));
        let sequence = FieldSequence::new(t.inputs(), self.input);

        let mut out = String::new();
        let _ = write!(out, "<aside class=\"panel\">\n<form class=\"panel-form\" method=\"get\" action=\"{}\">\n", action);

        let mut section = "";
        for spec in t.inputs().iter().filter(|s| s.is_visible(self.input)) {
            if spec.section != section {
                if !section.is_empty() {
                    out.push_str("</fieldset>\n");
                }
                section = spec.section;
                let _ = write!(out, "<fieldset><legend>{}</legend>\n", escape(section));
            }
            out.push_str(&input_html(
                spec,
                self.input.text(spec.name),
                sequence.focus_next(spec.name),
                sequence.first() == Some(spec.name),
            ));
        }
        if !section.is_empty() {
            out.push_str("</fieldset>\n");
        }

        let _ = write!(
            out,
            "<label class=\"debug-toggle\"><input type=\"checkbox\" name=\"debug\" value=\"1\"{}> 좌표 디버그</label>\n\
             <div class=\"panel-actions\"><button type=\"submit\">미리보기</button>\
             <a class=\"button print\" href=\"{}/print?{}\" target=\"_blank\" rel=\"noopener\">인쇄</a></div>\n</form>\n",
            if self.debug { " checked" } else { "" },
            action,
            escape(&query_string(self.input, false))
        );

        let _ = write!(out, "<form class=\"complete-form\" method=\"post\" action=\"{}/complete\">", action);
        if let Some(index) = self.room_index {
            let _ = write!(out, "<input type=\"hidden\" name=\"roomIndex\" value=\"{}\">", index);
        }
        out.push_str("<button type=\"submit\">완료 · 새 신청서</button></form>\n</aside>\n");
        out
    }
}

/// One side-panel input, with the focus successor in `data-next`.
fn input_html(spec: &InputSpec, value: &str, next: Option<&str>, autofocus: bool) -> String {
    let name = escape(spec.name);
    let label = escape(spec.label);
    let mut out = format!("<div class=\"input\" data-input=\"{}\">", name);
    match spec.kind {
        InputKind::Radio { choices } => {
            let _ = write!(out, "<span class=\"input-label\">{}</span><div class=\"radio-group\">", label);
            for choice in choices {
                let _ = write!(
                    out,
                    "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>",
                    name,
                    escape(choice.value),
                    if choice.value == value { " checked" } else { "" },
                    escape(choice.label)
                );
            }
            out.push_str("</div>");
        }
        InputKind::Select { choices } => {
            let _ = write!(out, "<label for=\"in-{n}\">{}</label><select id=\"in-{n}\" name=\"{n}\">", label, n = name);
            out.push_str("<option value=\"\">선택</option>");
            for choice in choices {
                let _ = write!(
                    out,
                    "<option value=\"{}\"{}>{}</option>",
                    escape(choice.value),
                    if choice.value == value { " selected" } else { "" },
                    escape(choice.label)
                );
            }
            out.push_str("</select>");
        }
        kind => {
            let _ = write!(
                out,
                "<label for=\"in-{n}\">{}{}</label><input id=\"in-{n}\" type=\"text\" name=\"{n}\" value=\"{}\"",
                label,
                if spec.required { " <abbr title=\"필수\">*</abbr>" } else { "" },
                escape(value),
                n = name
            );
            let placeholder = spec.effective_placeholder();
            if !placeholder.is_empty() {
                let _ = write!(out, " placeholder=\"{}\"", escape(placeholder));
            }
            if let Some(max) = kind.max_len() {
                let _ = write!(out, " maxlength=\"{}\"", max);
            }
            if matches!(kind, InputKind::Date { .. } | InputKind::Phone) {
                out.push_str(" inputmode=\"numeric\"");
            }
            if spec.required {
                out.push_str(" required");
            }
            if let Some(next) = next {
                let _ = write!(out, " data-next=\"{}\"", escape(next));
            }
            if autofocus {
                out.push_str(" autofocus");
            }
            out.push('>');
        }
    }
    out.push_str("</div>\n");
    out
}
