use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement, MouseEvent, WebGl2RenderingContext as GL, Window};

use super::gl::NebulaMesh;
use crate::config::NebulaConfig;
use crate::error::{NebulaError, Result};
use crate::geometry::PlaneGeometry;
use crate::scene::SceneState;

/// Viewport size in CSS pixels.
fn viewport_size(window: &Window) -> Result<(u32, u32)> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w.max(0.0) as u32, h.max(0.0) as u32))
}

/// Build the scene on `canvas` and start the render loop.
pub fn start(canvas: HtmlCanvasElement, config: NebulaConfig) -> Result<()> {
    let window = window().ok_or(NebulaError::NoWindow)?;
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or(NebulaError::ContextUnavailable)?
        .dyn_into()
        .map_err(|_| NebulaError::ContextUnavailable)?;

    let geometry = PlaneGeometry::new(2.0, 2.0, config.segments, config.segments)?;
    let mesh = NebulaMesh::new(&gl, &geometry)?;
    log::info!(
        "nebula mesh ready: {} vertices, {} indices",
        geometry.vertex_count(),
        geometry.indices.len()
    );

    let (width, height) = viewport_size(&window)?;
    let scene = Rc::new(RefCell::new(SceneState::new(config, width, height)));
    resize_surface(&canvas, &gl, width, height);

    // Resize canvas and camera to fit window
    let resize_closure = {
        let canvas = canvas.clone();
        let gl = gl.clone();
        let scene = scene.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let (w, h) = match viewport_size(&window) {
                Ok(size) => size,
                Err(e) => {
                    log::warn!("resize: {e}");
                    return;
                }
            };
            if scene.borrow_mut().resize(w, h) {
                resize_surface(&canvas, &gl, w, h);
                log::debug!("resized to {w}x{h}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let pointer_closure = {
        let scene = scene.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let Ok((w, h)) = viewport_size(&window) else {
                return;
            };
            scene.borrow_mut().set_pointer_from_client(
                event.client_x() as f64,
                event.client_y() as f64,
                w as f64,
                h as f64,
            );
        }) as Box<dyn FnMut(_)>)
    };
    window.add_event_listener_with_callback("mousemove", pointer_closure.as_ref().unchecked_ref())?;
    pointer_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let uniforms = scene.borrow_mut().step();
        mesh.draw(&gl, &uniforms);

        // schedule next
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(e) = frame_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("request_animation_frame failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = g.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }

    Ok(())
}

fn resize_surface(canvas: &HtmlCanvasElement, gl: &GL, width: u32, height: u32) {
    canvas.set_width(width);
    canvas.set_height(height);
    gl.viewport(0, 0, width as i32, height as i32);
}
