//! Frame-to-frame state of the nebula: camera, pointer, and shader clock.
//!
//! The render loop owns one [`SceneState`] behind an `Rc<RefCell<_>>` and the
//! DOM callbacks mutate it between frames.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::NebulaConfig;

/// Latest pointer sample, each axis in [-1, 1] with +y up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Normalize client (CSS pixel) coordinates against the viewport size.
    pub fn from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            x: (client_x / width * 2.0 - 1.0) as f32,
            y: (-(client_y / height) * 2.0 + 1.0) as f32,
        })
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Values uploaded to the program for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub projection: Mat4,
    pub model_view: Mat4,
}

#[derive(Debug, Clone)]
pub struct SceneState {
    config: NebulaConfig,
    camera: PerspectiveCamera,
    pointer: Pointer,
    time: f64,
    width: u32,
    height: u32,
}

impl SceneState {
    pub fn new(config: NebulaConfig, width: u32, height: u32) -> Self {
        let aspect = aspect_ratio(width, height).unwrap_or(1.0);
        let mut camera = PerspectiveCamera::new(config.fov_degrees, aspect, config.near, config.far);
        camera.position = Vec3::new(0.0, 0.0, config.camera_distance);
        camera.look_at(Vec3::ZERO);
        Self {
            config,
            camera,
            pointer: Pointer::default(),
            time: 0.0,
            width,
            height,
        }
    }

    pub fn config(&self) -> &NebulaConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// Returns false when the viewport is degenerate and the sample was dropped.
    pub fn set_pointer_from_client(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) -> bool {
        match Pointer::from_client(client_x, client_y, width, height) {
            Some(p) => {
                self.pointer = p;
                true
            }
            None => false,
        }
    }

    /// Where the camera is heading for the current pointer sample.
    pub fn camera_target(&self) -> Vec2 {
        self.pointer.as_vec2() * self.config.pointer_gain
    }

    /// Advance one animation frame.
    ///
    /// `time` moves by a fixed per-frame step, so faster displays animate
    /// faster. The camera closes `smoothing` of its distance to the pointer
    /// target and turns back toward the origin.
    pub fn step(&mut self) -> FrameUniforms {
        self.time += self.config.time_step;

        let target = self.camera_target();
        let k = self.config.smoothing;
        self.camera.position.x += (target.x - self.camera.position.x) * k;
        self.camera.position.y += (target.y - self.camera.position.y) * k;
        self.camera.look_at(Vec3::ZERO);

        self.uniforms()
    }

    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            time: self.time as f32,
            projection: self.camera.projection_matrix(),
            // the quad sits at the origin untransformed
            model_view: self.camera.view_matrix(),
        }
    }

    /// Returns false (and changes nothing) for a zero-sized viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Some(aspect) = aspect_ratio(width, height) else {
            return false;
        };
        self.camera.set_aspect(aspect);
        self.width = width;
        self.height = height;
        true
    }
}

fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    if width == 0 || height == 0 {
        None
    } else {
        Some(width as f32 / height as f32)
    }
}
