//! DOM wiring for the menu overlay, scroll sections and nav items.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::error::Result;
use crate::page::{nav_transform, ItemTransition, MenuState, SectionRect, SectionTracker};

const ACTIVE: &str = "active";

/// Wire every piece of page chrome present in `document`.
///
/// Waits for `DOMContentLoaded` if the document is still parsing.
pub fn install(window: &Window, document: &Document) -> Result<()> {
    if document.ready_state() == "loading" {
        let w = window.clone();
        let d = document.clone();
        let on_ready = Closure::once(move || {
            if let Err(e) = install_now(&w, &d) {
                log::error!("page setup failed: {e}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        Ok(())
    } else {
        install_now(window, document)
    }
}

fn install_now(window: &Window, document: &Document) -> Result<()> {
    wire_menu(window, document)?;
    wire_sections(window, document)?;
    scatter_nav_items(document)?;
    Ok(())
}

fn select_all<T: JsCast>(root: &Document, selector: &str) -> Result<Vec<T>> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

pub fn wire_menu(window: &Window, document: &Document) -> Result<()> {
    let trigger = document.query_selector(".hamburger-btn")?;
    let overlay = document.query_selector(".menu-overlay")?;
    let (Some(trigger), Some(overlay)) = (trigger, overlay) else {
        log::debug!("menu markup absent, skipping");
        return Ok(());
    };
    let items: Rc<Vec<HtmlElement>> = Rc::new(select_all(document, ".menu-item")?);
    let state = Rc::new(RefCell::new(MenuState::default()));
    let key_state = state.clone();

    let toggle: Rc<dyn Fn()> = {
        let trigger = trigger.clone();
        let overlay = overlay.clone();
        let window = window.clone();
        Rc::new(move || {
            let transitions = state.borrow_mut().toggle(items.len());
            let _ = trigger.class_list().toggle(ACTIVE);
            let _ = overlay.class_list().toggle(ACTIVE);
            for t in transitions {
                if let Some(item) = items.get(t.index) {
                    apply_item(&window, item, t);
                }
            }
        })
    };

    let on_click = {
        let toggle = toggle.clone();
        Closure::wrap(Box::new(move |_: MouseEvent| toggle()) as Box<dyn FnMut(_)>)
    };
    trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    // Only clicks on the backdrop itself close the menu.
    let on_backdrop = {
        let toggle = toggle.clone();
        let overlay = overlay.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let hit_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el == overlay);
            if hit_backdrop {
                toggle();
            }
        }) as Box<dyn FnMut(_)>)
    };
    overlay.add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref())?;
    on_backdrop.forget();

    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let close = key_state.borrow().closes_on_key(&event.key());
        if close {
            toggle();
        }
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    log::debug!("menu wired");
    Ok(())
}

fn apply_item(window: &Window, item: &HtmlElement, t: ItemTransition) {
    let set = {
        let item = item.clone();
        move || {
            let style = item.style();
            let _ = style.set_property("opacity", t.style.opacity);
            let _ = style.set_property("transform", t.style.transform);
        }
    };
    match t.delay_ms {
        None => set(),
        Some(delay) => {
            let cb = Closure::once(set);
            let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay as i32,
            );
            if scheduled.is_ok() {
                cb.forget();
            }
        }
    }
}

pub fn wire_sections(window: &Window, document: &Document) -> Result<()> {
    let sections: Rc<Vec<Element>> = Rc::new(select_all(document, ".section")?);
    let Some(first) = sections.first() else {
        return Ok(());
    };
    let _ = first.class_list().add_1(ACTIVE);

    let tracker = Rc::new(RefCell::new(SectionTracker::default()));
    let check = {
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let height = window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            let rects: Vec<SectionRect> = sections
                .iter()
                .map(|s| {
                    let r = s.get_bounding_client_rect();
                    SectionRect {
                        top: r.top(),
                        bottom: r.bottom(),
                    }
                })
                .collect();
            let active = tracker.borrow_mut().update(&rects, height);
            for (section, on) in sections.iter().zip(active) {
                let classes = section.class_list();
                let _ = if on {
                    classes.add_1(ACTIVE)
                } else {
                    classes.remove_1(ACTIVE)
                };
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("scroll", check.as_ref().unchecked_ref())?;
    window.add_event_listener_with_callback("resize", check.as_ref().unchecked_ref())?;
    check.forget();
    Ok(())
}

pub fn scatter_nav_items(document: &Document) -> Result<()> {
    for section in select_all::<Element>(document, ".section")? {
        let Some(nav) = section
            .query_selector(".nav-item")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let rotation = nav.dataset().get("rotation");
        let transform = nav_transform(js_sys::Math::random(), js_sys::Math::random(), rotation.as_deref());
        nav.style().set_property("transform", &transform)?;
    }

    for item in select_all::<HtmlElement>(document, ".nav-item")? {
        let label = item.clone();
        let on_click = Closure::wrap(Box::new(move || {
            log::info!("Clicked: {}", label.text_content().unwrap_or_default());
        }) as Box<dyn FnMut()>);
        item.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
