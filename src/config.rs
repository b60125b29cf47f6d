//! Runtime configuration and external puzzle context.

use std::f32::consts::FRAC_PI_2;

use crate::error::{HypercubeError, HypercubeResult};

/// Tunables for the rotation engine and the display projection.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleConfig {
    /// Baseline angular speed of a rotation in radians per second.
    /// Default: π/2, one quarter-turn per second.
    pub rotation_rate: f32,

    /// Alpha of any face colour with at least one lit channel.
    /// Default: 0.25.
    pub face_alpha: f32,

    /// Uniform scale applied to projected xyz coordinates.
    /// Default: 0.5.
    pub projection_scale: f32,

    /// Base of the w-dependent perspective factor `base^(w - 1)`.
    /// Default: 1.4.
    pub w_perspective_base: f32,

    /// Fixed step used by the headless driver when ticking the engine.
    /// Default: 1/60 s.
    pub frame_dt: f32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            rotation_rate: FRAC_PI_2,
            face_alpha: 0.25,
            projection_scale: 0.5,
            w_perspective_base: 1.4,
            frame_dt: 1.0 / 60.0,
        }
    }
}

impl PuzzleConfig {
    /// Validate that every field is usable.
    pub fn validate(&self) -> HypercubeResult<()> {
        if !self.rotation_rate.is_finite() || self.rotation_rate <= 0.0 {
            return Err(HypercubeError::Config(format!(
                "rotation_rate must be positive and finite, got {}",
                self.rotation_rate
            )));
        }
        if !(self.face_alpha > 0.0 && self.face_alpha <= 1.0) {
            return Err(HypercubeError::Config(format!(
                "face_alpha must be in (0, 1], got {}",
                self.face_alpha
            )));
        }
        if !self.projection_scale.is_finite() || self.projection_scale <= 0.0 {
            return Err(HypercubeError::Config(format!(
                "projection_scale must be positive, got {}",
                self.projection_scale
            )));
        }
        if !self.w_perspective_base.is_finite() || self.w_perspective_base <= 0.0 {
            return Err(HypercubeError::Config(format!(
                "w_perspective_base must be positive, got {}",
                self.w_perspective_base
            )));
        }
        if !self.frame_dt.is_finite() || self.frame_dt <= 0.0 {
            return Err(HypercubeError::Config(format!(
                "frame_dt must be positive, got {}",
                self.frame_dt
            )));
        }
        Ok(())
    }
}

/// Inputs the surrounding game hands to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PuzzleContext {
    /// Identifier whose letters select which bit positions get inverted.
    pub identifier: String,
    pub battery_count: u32,
    pub battery_holder_count: u32,
    pub port_count: u32,
}

impl PuzzleContext {
    pub fn new(
        identifier: impl Into<String>,
        battery_count: u32,
        battery_holder_count: u32,
        port_count: u32,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            battery_count,
            battery_holder_count,
            port_count,
        }
    }

    /// Whether the identifier contains the given letter, ignoring case.
    pub fn mentions(&self, letter: char) -> bool {
        self.identifier
            .chars()
            .any(|c| c.eq_ignore_ascii_case(&letter))
    }
}
