#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

use nebula_wasm::wasm::page::{scatter_nav_items, wire_menu, wire_sections};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn element(doc: &Document, tag: &str, class: &str) -> HtmlElement {
    let el = doc.create_element(tag).unwrap();
    el.set_class_name(class);
    el.dyn_into().unwrap()
}

fn has_active(el: &Element) -> bool {
    el.class_list().contains("active")
}

fn opacity(el: &HtmlElement) -> String {
    el.style().get_property_value("opacity").unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

fn press(doc: &Document, key: &str) {
    let init = web_sys::KeyboardEventInit::new();
    init.set_key(key);
    let event = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    doc.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
async fn menu_toggles_trigger_and_overlay() {
    let doc = document();
    let window = web_sys::window().unwrap();
    let body = doc.body().unwrap();

    let trigger = element(&doc, "button", "hamburger-btn");
    let overlay = element(&doc, "div", "menu-overlay");
    let items: Vec<HtmlElement> = (0..3).map(|_| element(&doc, "div", "menu-item")).collect();
    for item in &items {
        overlay.append_child(item).unwrap();
    }
    body.append_child(&trigger).unwrap();
    body.append_child(&overlay).unwrap();

    wire_menu(&window, &doc).unwrap();

    // Escape does nothing while closed
    press(&doc, "Escape");
    assert!(!has_active(&overlay));

    trigger.click();
    assert!(has_active(&trigger) && has_active(&overlay));

    // items appear one after another, 100ms apart
    sleep(50).await;
    assert_eq!(opacity(&items[0]), "1");
    assert_ne!(opacity(&items[2]), "1");
    sleep(250).await;
    for item in &items {
        assert_eq!(opacity(item), "1");
    }

    // a click inside the menu bubbles to the overlay but must not close it
    items[1].click();
    assert!(has_active(&overlay));

    // other keys are ignored, Escape closes
    press(&doc, "Enter");
    assert!(has_active(&overlay));
    press(&doc, "Escape");
    assert!(!has_active(&trigger) && !has_active(&overlay));
    for item in &items {
        assert_eq!(opacity(item), "0");
    }

    // reopen, let the stagger finish, then close from the backdrop
    trigger.click();
    sleep(300).await;
    overlay.click();
    assert!(!has_active(&trigger) && !has_active(&overlay));
    for item in &items {
        assert_eq!(opacity(item), "0");
    }

    body.remove_child(&trigger).unwrap();
    body.remove_child(&overlay).unwrap();
}

#[wasm_bindgen_test]
fn sections_follow_the_trigger_line() {
    let doc = document();
    let window = web_sys::window().unwrap();
    let body = doc.body().unwrap();

    let sections: Vec<HtmlElement> = (0..3)
        .map(|_| {
            let s = element(&doc, "section", "section");
            s.style().set_property("height", "600px").unwrap();
            body.append_child(&s).unwrap();
            s
        })
        .collect();

    wire_sections(&window, &doc).unwrap();
    assert!(has_active(&sections[0]));

    window
        .dispatch_event(&web_sys::Event::new("resize").unwrap())
        .unwrap();

    let trigger = window.inner_height().unwrap().as_f64().unwrap() * 0.5;
    for s in &sections {
        let r = s.get_bounding_client_rect();
        let expected = r.top() <= trigger && r.bottom() >= trigger;
        assert_eq!(has_active(s), expected);
    }

    for s in &sections {
        body.remove_child(s).unwrap();
    }
}

#[wasm_bindgen_test]
fn nav_items_get_rotated_transforms() {
    let doc = document();
    let body = doc.body().unwrap();

    let section = element(&doc, "section", "section");
    let nav = element(&doc, "div", "nav-item");
    nav.dataset().set("rotation", "5").unwrap();
    section.append_child(&nav).unwrap();
    body.append_child(&section).unwrap();

    scatter_nav_items(&doc).unwrap();
    let transform = nav.style().get_property_value("transform").unwrap();
    assert!(transform.starts_with("translate("), "{transform}");
    assert!(transform.contains("rotate(5deg)"), "{transform}");

    body.remove_child(&section).unwrap();
}
