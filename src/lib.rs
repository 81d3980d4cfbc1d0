#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod page;
pub mod scene;
pub mod shader;

pub use config::NebulaConfig;
pub use error::{ConfigError, NebulaError};
pub use scene::{Pointer, SceneState};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::NebulaConfig;
    use crate::error::NebulaError;

    mod gl;
    pub mod page;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        // Failures end up on the console rather than as a thrown start error,
        // so whatever did get wired keeps working.
        if let Err(e) = run() {
            log::error!("nebula failed to start: {e}");
        }
        Ok(())
    }

    fn run() -> Result<(), NebulaError> {
        let window = web_sys::window().ok_or(NebulaError::NoWindow)?;
        let document = window.document().ok_or(NebulaError::NoDocument)?;

        // Page chrome is independent of the visual; wire it first so the menu
        // still works on devices without WebGL2.
        page::install(&window, &document)?;

        let defaults = NebulaConfig::default();
        let container = document
            .get_element_by_id(&defaults.container_id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            .ok_or_else(|| NebulaError::MissingElement(defaults.container_id.clone()))?;
        let dataset = container.dataset();
        let config = NebulaConfig::from_attrs(|key| dataset.get(key))?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| NebulaError::Allocation("canvas"))?;
        container.append_child(&canvas)?;

        render::start(canvas, config)?;
        log::info!("nebula running");
        Ok(())
    }
}

