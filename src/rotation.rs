//! Planar rotations and the queue that plays them back one at a time.
//!
//! The engine is stepped explicitly with [`RotationEngine::advance`]. At most
//! one rotation is active; the rest wait in FIFO order. Vertex display
//! positions follow the active rotation continuously, while internal
//! positions and face labels only change when a quarter-turn completes.

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;
use std::fmt;

use log::debug;

use crate::cube::Hypercube;
use crate::direction::Axis;
use crate::error::{HypercubeError, HypercubeResult};
use crate::math::create_4d_rotation;

/// A directed quarter-turn carrying the `from` axis onto the `to` axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub from: Axis,
    pub to: Axis,
}

impl Rotation {
    pub fn new(from: Axis, to: Axis) -> HypercubeResult<Self> {
        if from == to {
            return Err(HypercubeError::InvalidRotationCommand(format!(
                "{from}{to} does not span a plane"
            )));
        }
        Ok(Self { from, to })
    }

    /// Builds a rotation from internal axis indices.
    pub fn from_indices(from: usize, to: usize) -> HypercubeResult<Self> {
        Self::new(Axis::from_index(from)?, Axis::from_index(to)?)
    }

    /// The rotation undoing this one.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Observable state of the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineState {
    Idle,
    Rotating { rotation: Rotation, angle: f32 },
}

#[derive(Clone, Copy, Debug)]
struct ActiveRotation {
    rotation: Rotation,
    angle: f32,
}

/// Plays queued rotations back onto a [`Hypercube`].
#[derive(Clone, Debug)]
pub struct RotationEngine {
    queue: VecDeque<Rotation>,
    active: Option<ActiveRotation>,
    base_rate: f32,
    rate: f32,
}

impl RotationEngine {
    /// Creates an idle engine turning at `base_rate` radians per second.
    pub fn new(base_rate: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            active: None,
            base_rate,
            rate: base_rate,
        }
    }

    pub fn enqueue(&mut self, rotation: Rotation) {
        debug!("Queued rotation {rotation} ({} pending)", self.queue.len() + 1);
        self.queue.push_back(rotation);
    }

    /// Queues a rotation given as raw axis indices.
    ///
    /// Out-of-range axes are rejected and leave the queue unchanged.
    pub fn enqueue_indices(&mut self, from: usize, to: usize) -> HypercubeResult<()> {
        let rotation = Rotation::from_indices(from, to)?;
        self.enqueue(rotation);
        Ok(())
    }

    /// True while a rotation is active or waiting.
    pub fn is_busy(&self) -> bool {
        self.active.is_some() || !self.queue.is_empty()
    }

    pub fn state(&self) -> EngineState {
        match self.active {
            Some(ActiveRotation { rotation, angle }) => EngineState::Rotating { rotation, angle },
            None => EngineState::Idle,
        }
    }

    /// Number of rotations waiting behind the active one.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drops every rotation that has not started yet. The active rotation
    /// still runs to completion. Returns how many were discarded.
    pub fn clear_queue(&mut self) -> usize {
        let discarded = self.queue.len();
        self.queue.clear();
        if discarded > 0 {
            debug!("Discarded {discarded} pending rotations");
        }
        discarded
    }

    /// Stops everything immediately without completing the active rotation.
    /// The caller is responsible for restoring the hypercube.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.active = None;
        self.rate = self.base_rate;
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn base_rate(&self) -> f32 {
        self.base_rate
    }

    /// Multiplies the current rate, e.g. to hurry a long queued sequence.
    /// The rate falls back to the baseline once the engine goes idle, and
    /// accelerating an idle engine does nothing.
    pub fn accelerate(&mut self, factor: f32) -> HypercubeResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(HypercubeError::Config(format!(
                "acceleration factor must be positive, got {factor}"
            )));
        }
        if !self.is_busy() {
            debug!("Ignoring acceleration while idle");
            return Ok(());
        }
        self.rate *= factor;
        Ok(())
    }

    /// Advances the active rotation by `dt` seconds.
    ///
    /// Returns the number of quarter-turns completed during this step. Angle
    /// overshoot carries into the next queued rotation so chained motion
    /// stays continuous.
    pub fn advance(&mut self, cube: &mut Hypercube, dt: f32) -> usize {
        if !(dt > 0.0) || !dt.is_finite() {
            return 0;
        }

        let mut active = match self.active.take() {
            Some(active) => active,
            None => match self.queue.pop_front() {
                Some(rotation) => ActiveRotation { rotation, angle: 0.0 },
                None => return 0,
            },
        };
        active.angle += self.rate * dt;

        let mut completed = 0;
        while active.angle >= FRAC_PI_2 {
            cube.complete_rotation(active.rotation);
            completed += 1;
            debug!("Completed rotation {}", active.rotation);

            let overshoot = active.angle - FRAC_PI_2;
            match self.queue.pop_front() {
                Some(rotation) => {
                    active = ActiveRotation {
                        rotation,
                        angle: overshoot,
                    };
                }
                None => {
                    self.rate = self.base_rate;
                    return completed;
                }
            }
        }

        cube.apply_partial(&create_4d_rotation(
            active.rotation.from.index(),
            active.rotation.to.index(),
            active.angle,
        ));
        self.active = Some(active);
        completed
    }
}
