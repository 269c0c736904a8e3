//! Cross-view layout tests: the preview, the picker, and the print document
//! must agree on where every field sits.

use pretty_assertions::assert_eq;

use overprint::{
    form::FormInput,
    html,
    overlay::{
        OverlayView,
        picker::{self, PickResult, PointerEvent},
    },
    print::{PrintComposer, position_mm},
    room::{MemoryRoomStore, RoomCounter},
    templates::{self, FormContext, LgStory, Template},
    units::px_to_mm,
};

const EPSILON: f64 = 1e-9;

fn ctx() -> FormContext {
    FormContext::new("2025.12.02", Some(101))
}

/// Every discriminator combination worth checking, per template.
fn states(template: &dyn Template) -> Vec<FormInput> {
    let base = template.defaults(&ctx());
    match template.id() {
        "lg-story-transfer" => ["SKT", "LG", "KT"]
            .iter()
            .map(|n| base.clone().with("networkType", *n))
            .collect(),
        "lg-hanpass" | "lg-ins" => vec![base.clone(), base.with("applicationType", "transfer")],
        "lg-ins-postpaid" => {
            let mut out = vec![base.clone()];
            for carrier in ["mvno", "skt", "kt", "lg"] {
                out.push(
                    base.clone()
                        .with("applicationType", "transfer")
                        .with("prevCarrier", carrier),
                );
            }
            out
        }
        _ => vec![base],
    }
}

#[test]
fn test_preview_and_print_agree() {
    for template in templates::all() {
        let scale = template.preview_scale();
        for input in states(*template) {
            let resolved = template.resolve(&input);
            let view = OverlayView::new(&resolved, scale);
            for (page, _) in template.page_images().pages() {
                let labels = view.labels(page);
                let fields: Vec<_> = resolved.fields.on_page(page).collect();
                assert_eq!(labels.len(), fields.len());
                for (label, field) in labels.iter().zip(fields) {
                    let mm = position_mm(field);
                    assert!((px_to_mm(label.top / scale) - mm.top).abs() < EPSILON, "{} {}", template.id(), field.id);
                    assert!((px_to_mm(label.left / scale) - mm.left).abs() < EPSILON, "{} {}", template.id(), field.id);
                    assert!((px_to_mm(label.font_size / scale) - mm.font_size).abs() < EPSILON);
                }
            }
        }
    }
}

#[test]
fn test_picker_recovers_field_corners() {
    for template in templates::all() {
        let scale = template.preview_scale();
        let input = template.defaults(&ctx());
        let resolved = template.resolve(&input);
        let view = OverlayView::new(&resolved, scale);
        for label in view.labels(1) {
            let field = resolved.fields.get(&label.id).unwrap();
            let picks = picker::replay(
                scale,
                [
                    PointerEvent::Down { page: 1, x: label.left, y: label.top },
                    PointerEvent::Up { page: 1, x: label.left, y: label.top },
                ],
            );
            assert_eq!(
                picks,
                vec![PickResult::Point {
                    page: 1,
                    top: field.top.round(),
                    left: field.left.round(),
                }],
                "{} {}",
                template.id(),
                field.id
            );
        }
    }
}

#[test]
fn test_print_places_fields_in_mm() {
    let template = templates::by_id("kt-asia").unwrap();
    let input = FormInput::new()
        .with("name", "홍길동")
        .normalize(template.inputs())
        .or_defaults(&template.defaults(&ctx()));
    let resolved = template.resolve(&input);
    let doc = PrintComposer::new(&resolved).compose(&["/pages/kt/asia_mobile.jpg".to_string()]);

    let name = resolved.fields.get("name").unwrap();
    assert!(doc.contains(&format!("top: {};", html::length(px_to_mm(name.top), "mm"))));
    assert!(doc.contains(&format!("left: {};", html::length(px_to_mm(name.left), "mm"))));
    assert!(doc.contains("width: 210mm;"));
    assert!(doc.contains(">홍길동</span>"));
    // A single page never forces a break
    assert!(!doc.contains("page-break-after: always"));
}

#[test]
fn test_room_rotation_feeds_story_address() {
    let store = MemoryRoomStore::new(179);
    assert_eq!(store.current_room().unwrap(), 920);
    store.advance(179).unwrap();
    assert_eq!(store.peek().unwrap(), 0);

    let ctx = FormContext::new("2025.12.02", Some(store.current_room().unwrap()));
    let resolved = LgStory.resolve(&LgStory.defaults(&ctx));
    assert_eq!(resolved.values.get("address"), ", 101");
}

#[test]
fn test_postpaid_carrier_switch_drops_detail() {
    let template = templates::by_id("lg-ins-postpaid").unwrap();
    let mvno = template
        .defaults(&ctx())
        .with("applicationType", "transfer")
        .with("prevCarrier", "mvno")
        .with("mvnoDetail", "헬로모바일")
        .with("phoneNumber", "010-1234-5678");
    let resolved = template.resolve(&mvno);
    assert_eq!(resolved.values.get("mvnoDetail"), "헬로모바일");

    let resolved = template.resolve(&mvno.with("prevCarrier", "kt"));
    assert!(!resolved.fields.contains("mvnoDetail"));
    assert_eq!(resolved.values.get("mvnoDetail"), "");
    assert!(resolved.fields.contains("carrierCheck"));
}

#[test]
fn test_values_are_escaped_in_both_views() {
    let template = templates::by_id("kt-asia").unwrap();
    let input = template.defaults(&ctx()).with("name", "<b>&</b>");
    let resolved = template.resolve(&input);
    let doc = PrintComposer::new(&resolved).compose(&["p.jpg".to_string()]);
    let page = OverlayView::new(&resolved, 1.0).render_page(1, 1, "p.jpg");
    for out in [doc, page] {
        assert!(out.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!out.contains("<b>&</b>"));
    }
}
