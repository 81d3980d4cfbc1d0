//! Tunables for the nebula visual.
//!
//! Every constant the render loop uses lives here so the page can override it
//! through `data-*` attributes on the container element.

use crate::error::ConfigError;
use crate::geometry::MAX_SEGMENTS;

/// Element id the canvas is attached to when nothing else is specified.
pub const DEFAULT_CONTAINER_ID: &str = "globe-container";

#[derive(Debug, Clone, PartialEq)]
pub struct NebulaConfig {
    pub container_id: String,
    /// Added to `time` once per animation frame.
    pub time_step: f64,
    /// Pointer sample to camera target scale.
    pub pointer_gain: f32,
    /// Fraction of the remaining distance the camera covers each frame.
    pub smoothing: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    pub segments: u32,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            time_step: 0.01,
            pointer_gain: 0.05,
            smoothing: 0.02,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 1.0,
            segments: 128,
        }
    }
}

impl NebulaConfig {
    /// Build a config from attribute lookups, falling back to defaults for
    /// anything absent. `lookup` receives the dataset key (`timeStep`, ...).
    pub fn from_attrs<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("timeStep") {
            cfg.time_step = parse_num("time-step", &v)?;
        }
        if let Some(v) = lookup("pointerGain") {
            cfg.pointer_gain = parse_num("pointer-gain", &v)?;
        }
        if let Some(v) = lookup("smoothing") {
            cfg.smoothing = parse_num("smoothing", &v)?;
        }
        if let Some(v) = lookup("fov") {
            cfg.fov_degrees = parse_num("fov", &v)?;
        }
        if let Some(v) = lookup("segments") {
            cfg.segments = parse_num("segments", &v)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step >= 0.0) {
            return Err(ConfigError::OutOfRange {
                key: "time-step",
                reason: "must be finite and >= 0",
            });
        }
        if !self.pointer_gain.is_finite() {
            return Err(ConfigError::OutOfRange {
                key: "pointer-gain",
                reason: "must be finite",
            });
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "smoothing",
                reason: "must lie in (0, 1]",
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::OutOfRange {
                key: "fov",
                reason: "must lie in (0, 180)",
            });
        }
        if self.segments == 0 || self.segments > MAX_SEGMENTS {
            return Err(ConfigError::OutOfRange {
                key: "segments",
                reason: "must lie in 1..=255",
            });
        }
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_attrs_yield_defaults() {
        let cfg = NebulaConfig::from_attrs(|_| None).unwrap();
        assert_eq!(cfg, NebulaConfig::default());
        assert_eq!(cfg.container_id, "globe-container");
    }

    #[test]
    fn overrides_are_parsed() {
        let map = attrs(&[("timeStep", "0.02"), ("segments", " 64 "), ("fov", "60")]);
        let cfg = NebulaConfig::from_attrs(|k| map.get(k).cloned()).unwrap();
        assert_eq!(cfg.time_step, 0.02);
        assert_eq!(cfg.segments, 64);
        assert_eq!(cfg.fov_degrees, 60.0);
        assert_eq!(cfg.smoothing, 0.02);
    }

    #[test]
    fn garbage_is_rejected() {
        let map = attrs(&[("pointerGain", "lots")]);
        let err = NebulaConfig::from_attrs(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "pointer-gain", .. }));
    }

    #[test]
    fn smoothing_must_stay_in_unit_interval() {
        for bad in ["0", "1.5", "-0.1", "NaN"] {
            let map = attrs(&[("smoothing", bad)]);
            assert!(NebulaConfig::from_attrs(|k| map.get(k).cloned()).is_err(), "{bad}");
        }
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        for key in ["timeStep", "pointerGain", "fov"] {
            for bad in ["NaN", "inf", "-inf"] {
                let map = attrs(&[(key, bad)]);
                let res = NebulaConfig::from_attrs(|k| map.get(k).cloned());
                assert!(
                    matches!(res, Err(ConfigError::OutOfRange { .. })),
                    "{key}={bad} -> {res:?}"
                );
            }
        }
    }

    #[test]
    fn negative_pointer_gain_is_allowed() {
        let map = attrs(&[("pointerGain", "-0.1")]);
        let cfg = NebulaConfig::from_attrs(|k| map.get(k).cloned()).unwrap();
        assert_eq!(cfg.pointer_gain, -0.1);
    }

    #[test]
    fn segments_are_bounded_by_index_range() {
        let map = attrs(&[("segments", "255")]);
        assert_eq!(NebulaConfig::from_attrs(|k| map.get(k).cloned()).unwrap().segments, 255);

        for bad in ["0", "256", "65535", "4294967295"] {
            let map = attrs(&[("segments", bad)]);
            let res = NebulaConfig::from_attrs(|k| map.get(k).cloned());
            assert!(
                matches!(res, Err(ConfigError::OutOfRange { key: "segments", .. })),
                "{bad} -> {res:?}"
            );
        }
    }
}
