use super::config_engine::{
    DEFAULT_MAX_DISTANCE, DEFAULT_MAX_STEPS, DEFAULT_SMOOTH_BLEND, DEFAULT_SURFACE_DISTANCE,
    MAX_DISTANCE_RANGE, MAX_STEPS_RANGE, SMOOTH_BLEND_RANGE, SURFACE_DISTANCE_RANGE,
};
use crate::config::ENV;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

/// Global raymarch settings shared by every shape. Fields can only be written through the
/// setters, which clamp to the valid domain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaymarchConfig {
    max_steps: u32,
    max_distance: f32,
    surface_distance: f32,
    smooth_blend: f32,
}

impl RaymarchConfig {
    /// Defaults overridden by any of the `ENV` raymarch variables that are set and parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(max_steps) = parse_env::<u32>(ENV::MAX_STEPS) {
            config.set_max_steps(max_steps);
        }
        if let Some(max_distance) = parse_env::<f32>(ENV::MAX_DISTANCE) {
            config.set_max_distance(max_distance);
        }
        if let Some(surface_distance) = parse_env::<f32>(ENV::SURFACE_DISTANCE) {
            config.set_surface_distance(surface_distance);
        }
        if let Some(smooth_blend) = parse_env::<f32>(ENV::SMOOTH_BLEND) {
            config.set_smooth_blend(smooth_blend);
        }
        config
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }
    pub fn surface_distance(&self) -> f32 {
        self.surface_distance
    }
    pub fn smooth_blend(&self) -> f32 {
        self.smooth_blend
    }

    /// Returns true if the stored value changed.
    pub fn set_max_steps(&mut self, max_steps: u32) -> bool {
        let clamped = max_steps.clamp(MAX_STEPS_RANGE.0, MAX_STEPS_RANGE.1);
        replace_if_changed(&mut self.max_steps, clamped)
    }

    /// Returns true if the stored value changed. Non-finite values are ignored.
    pub fn set_max_distance(&mut self, max_distance: f32) -> bool {
        set_clamped(
            &mut self.max_distance,
            max_distance,
            MAX_DISTANCE_RANGE,
            "max distance",
        )
    }

    /// Returns true if the stored value changed. Non-finite values are ignored.
    pub fn set_surface_distance(&mut self, surface_distance: f32) -> bool {
        set_clamped(
            &mut self.surface_distance,
            surface_distance,
            SURFACE_DISTANCE_RANGE,
            "surface distance",
        )
    }

    /// Clamped to [0, 1]. Returns true if the stored value changed. Non-finite values are ignored.
    pub fn set_smooth_blend(&mut self, smooth_blend: f32) -> bool {
        set_clamped(
            &mut self.smooth_blend,
            smooth_blend,
            SMOOTH_BLEND_RANGE,
            "smooth blend",
        )
    }

    /// Copies every field of `other` through the clamping setters. Returns true if anything
    /// changed.
    pub fn apply(&mut self, other: &RaymarchConfig) -> bool {
        // non-short-circuiting so every field is applied
        self.set_max_steps(other.max_steps)
            | self.set_max_distance(other.max_distance)
            | self.set_surface_distance(other.surface_distance)
            | self.set_smooth_blend(other.smooth_blend)
    }
}

impl Default for RaymarchConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_distance: DEFAULT_MAX_DISTANCE,
            surface_distance: DEFAULT_SURFACE_DISTANCE,
            smooth_blend: DEFAULT_SMOOTH_BLEND,
        }
    }
}

fn set_clamped(field: &mut f32, value: f32, (min, max): (f32, f32), name: &str) -> bool {
    if !value.is_finite() {
        warn!("ignoring non-finite {} value {}", name, value);
        return false;
    }
    replace_if_changed(field, value.clamp(min, max))
}

fn replace_if_changed<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

fn parse_env<T: FromStr>(var: &str) -> Option<T> {
    let value = env::var(var).ok()?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("could not parse {}={:?}, using default", var, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_blend_is_clamped() {
        let mut config = RaymarchConfig::default();
        config.set_smooth_blend(1.5);
        assert_eq!(config.smooth_blend(), 1.0);
        config.set_smooth_blend(-0.2);
        assert_eq!(config.smooth_blend(), 0.0);
    }

    #[test]
    fn setters_report_changes() {
        let mut config = RaymarchConfig::default();
        assert!(!config.set_max_steps(DEFAULT_MAX_STEPS));
        assert!(config.set_max_steps(200));
        assert!(!config.set_max_steps(200));
        assert!(config.set_max_distance(50.));
    }

    #[test]
    fn other_fields_stay_positive() {
        let mut config = RaymarchConfig::default();
        config.set_max_steps(0);
        config.set_max_distance(-1.);
        config.set_surface_distance(0.);
        assert_eq!(config.max_steps(), MAX_STEPS_RANGE.0);
        assert_eq!(config.max_distance(), MAX_DISTANCE_RANGE.0);
        assert_eq!(config.surface_distance(), SURFACE_DISTANCE_RANGE.0);
    }

    #[test]
    fn non_finite_writes_are_ignored() {
        let mut config = RaymarchConfig::default();
        assert!(!config.set_smooth_blend(f32::NAN));
        assert!(!config.set_max_distance(f32::INFINITY));
        assert_eq!(config, RaymarchConfig::default());
    }
}
