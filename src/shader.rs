//! GLSL sources for the nebula program and a CPU evaluation of the same
//! fragment recipe.
//!
//! The CPU path mirrors the fragment shader operation for operation so the
//! visual can be checked without a GPU. GPU `sin` precision differs between
//! vendors, so the lattice hash will not match bit for bit on every device;
//! everything downstream of it does.

use glam::Vec2;

pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 position;
in vec2 uv;

uniform mat4 projectionMatrix;
uniform mat4 modelViewMatrix;

out vec2 vUv;
out vec3 vPosition;

void main() {
    vUv = uv;
    vPosition = position;
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform float time;

in vec2 vUv;
in vec3 vPosition;

out vec4 fragColor;

float random(vec2 st) {
    return fract(sin(dot(st.xy, vec2(12.9898, 78.233))) * 43758.5453123);
}

float noise(vec2 st) {
    vec2 i = floor(st);
    vec2 f = fract(st);

    float a = random(i);
    float b = random(i + vec2(1.0, 0.0));
    float c = random(i + vec2(0.0, 1.0));
    float d = random(i + vec2(1.0, 1.0));

    vec2 u = f * f * (3.0 - 2.0 * f);
    return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

float fbm(vec2 st) {
    float value = 0.0;
    float amplitude = 0.5;
    float frequency = 1.0;
    for (int i = 0; i < 6; i++) {
        value += amplitude * noise(st * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    return value;
}

void main() {
    vec2 center = vUv * 2.0 - 1.0;
    float radius = length(center);
    float angle = atan(center.y, center.x) + time * 0.2;
    vec2 p = vec2(cos(angle), sin(angle)) * radius;

    float ring = smoothstep(0.3, 0.7, radius) * (1.0 - smoothstep(0.7, 0.9, radius));

    float n1 = fbm(p * 3.0 + time * 0.1);
    float n2 = fbm(p * 5.0 - time * 0.15);
    float n3 = fbm(p * 8.0 + time * 0.2);
    float combined = n1 * 0.5 + n2 * 0.3 + n3 * 0.2;

    float particles = 0.0;
    for (float i = 0.0; i < 3.0; i++) {
        vec2 q = p * (2.0 + i) + time * (0.1 + i * 0.05);
        particles += step(0.98, noise(q * 10.0)) * (1.0 - i * 0.2);
    }

    float shade = (ring * combined + particles) * (1.0 - radius * 0.5);
    shade = pow(shade, 0.8);

    fragColor = vec4(vec3(shade), 1.0);
}
"#;

pub const OCTAVES: usize = 6;

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// Lattice hash in [0, 1).
pub fn random(st: Vec2) -> f32 {
    fract((st.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.547)
}

/// Value noise with cubic Hermite interpolation between lattice corners.
pub fn noise(st: Vec2) -> f32 {
    let i = st.floor();
    let f = st - i;

    let a = random(i);
    let b = random(i + Vec2::X);
    let c = random(i + Vec2::Y);
    let d = random(i + Vec2::ONE);

    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

pub fn fbm(st: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..OCTAVES {
        value += amplitude * noise(st * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Soft annulus: fades in over 0.3..0.7 and out over 0.7..0.9.
pub fn ring_mask(radius: f32) -> f32 {
    smoothstep(0.3, 0.7, radius) * (1.0 - smoothstep(0.7, 0.9, radius))
}

/// Grey level the fragment shader writes at `uv` for the given `time`.
pub fn shade(uv: Vec2, time: f32) -> f32 {
    let center = uv * 2.0 - Vec2::ONE;
    let radius = center.length();
    let angle = center.y.atan2(center.x) + time * 0.2;
    let p = Vec2::new(angle.cos(), angle.sin()) * radius;

    let ring = ring_mask(radius);

    let n1 = fbm(p * 3.0 + Vec2::splat(time * 0.1));
    let n2 = fbm(p * 5.0 - Vec2::splat(time * 0.15));
    let n3 = fbm(p * 8.0 + Vec2::splat(time * 0.2));
    let combined = n1 * 0.5 + n2 * 0.3 + n3 * 0.2;

    let mut particles = 0.0;
    for i in 0..3 {
        let i = i as f32;
        let q = p * (2.0 + i) + Vec2::splat(time * (0.1 + i * 0.05));
        particles += step(0.98, noise(q * 10.0)) * (1.0 - i * 0.2);
    }

    let value = (ring * combined + particles) * (1.0 - radius * 0.5);
    value.max(0.0).powf(0.8)
}
