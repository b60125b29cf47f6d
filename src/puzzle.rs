//! The puzzle as seen by the presentation layer.
//!
//! [`OrientationPuzzle`] ties together the hypercube, the rotation engine,
//! the perspective map and the generated target, and exposes the command
//! API an input handler drives: queue rotations, shift perspective, step
//! time forward and submit.

use log::{info, warn};
use nalgebra::{Vector3, Vector4};

use crate::config::{PuzzleConfig, PuzzleContext};
use crate::cube::{FACE_VERTEX_COUNT, Hypercube};
use crate::direction::{Axis, Direction};
use crate::error::{HypercubeError, HypercubeResult};
use crate::generator::{PuzzleTarget, RandomSource, generate};
use crate::math::project_4d_to_3d;
use crate::perspective::{AxisLabelMap, Button};
use crate::rotation::{EngineState, Rotation, RotationEngine};
use crate::verifier::verify;

/// Result of a submission once the hypercube has come to rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Solved,
    /// The rotations did not reproduce the target. The hypercube has been
    /// reset to its initial orientation.
    Strike,
}

/// Everything a renderer needs to draw one hyperface.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDisplayState {
    pub initial_direction: Direction,
    pub direction: Direction,
    /// RGBA, fully transparent when the face carries no colour cue.
    pub colour: Vector4<f32>,
    /// Display positions of the face's vertices by face-local slot.
    pub vertex_positions: [Vector4<f32>; FACE_VERTEX_COUNT],
    pub highlighted: bool,
}

/// A running puzzle instance.
#[derive(Clone, Debug)]
pub struct OrientationPuzzle {
    hypercube: Hypercube,
    engine: RotationEngine,
    axis_map: AxisLabelMap,
    target: PuzzleTarget,
    config: PuzzleConfig,
    preview_mode: bool,
    highlighted: Option<Direction>,
    strikes: u32,
    solved: bool,
}

impl OrientationPuzzle {
    /// Generates a fresh target from `context` and sets up the hypercube.
    pub fn new(
        context: &PuzzleContext,
        rng: &mut impl RandomSource,
        config: PuzzleConfig,
    ) -> HypercubeResult<Self> {
        config.validate()?;
        let target = generate(context, rng);
        Self::with_target(target, config)
    }

    /// Sets up the hypercube for an already generated target.
    pub fn with_target(target: PuzzleTarget, config: PuzzleConfig) -> HypercubeResult<Self> {
        config.validate()?;
        let mut puzzle = Self {
            hypercube: Hypercube::new()?,
            engine: RotationEngine::new(config.rotation_rate),
            axis_map: AxisLabelMap::default(),
            target,
            config,
            preview_mode: false,
            highlighted: None,
            strikes: 0,
            solved: false,
        };
        puzzle.refresh_colours();
        Ok(puzzle)
    }

    pub fn target(&self) -> &PuzzleTarget {
        &self.target
    }

    pub fn hypercube(&self) -> &Hypercube {
        &self.hypercube
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn axis_map(&self) -> &AxisLabelMap {
        &self.axis_map
    }

    pub fn engine_state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    /// True while any rotation is active or queued.
    pub fn is_busy(&self) -> bool {
        self.engine.is_busy()
    }

    fn ensure_unsolved(&self) -> HypercubeResult<()> {
        if self.solved {
            return Err(HypercubeError::AlreadySolved);
        }
        Ok(())
    }

    /// Queues a rotation by internal axis indices.
    pub fn enqueue_rotation(&mut self, from: usize, to: usize) -> HypercubeResult<()> {
        self.ensure_unsolved()?;
        self.engine.enqueue_indices(from, to)
    }

    /// Queues a rotation named by logical letters, as the player sees them.
    pub fn enqueue_letter_rotation(
        &mut self,
        from_letter: char,
        to_letter: char,
    ) -> HypercubeResult<Rotation> {
        self.ensure_unsolved()?;
        let invalid = || HypercubeError::InvalidRotationCommand(format!("{from_letter}{to_letter}"));
        let from = Axis::from_letter(from_letter).ok_or_else(invalid)?;
        let to = Axis::from_letter(to_letter).ok_or_else(invalid)?;
        let rotation = self.axis_map.translate(from, to)?;
        self.engine.enqueue(rotation);
        Ok(rotation)
    }

    /// Handles a press of one of the physical buttons.
    pub fn press(&mut self, button: Button) -> HypercubeResult<()> {
        self.ensure_unsolved()?;
        match button.letters() {
            Some((from, to)) => {
                let rotation = self.axis_map.translate(from, to)?;
                self.engine.enqueue(rotation);
            }
            None => {
                self.shift_perspective(true)?;
            }
        }
        Ok(())
    }

    /// Moves the observer around the object. Returns the new observer yaw.
    pub fn shift_perspective(&mut self, reverse: bool) -> HypercubeResult<i32> {
        self.ensure_unsolved()?;
        Ok(self.axis_map.shift(reverse))
    }

    /// Discards rotations that have not started yet.
    pub fn clear_queue(&mut self) -> HypercubeResult<usize> {
        self.ensure_unsolved()?;
        Ok(self.engine.clear_queue())
    }

    /// Speeds up the rotation in progress and everything queued behind it.
    /// Has no effect while idle.
    pub fn accelerate(&mut self, factor: f32) -> HypercubeResult<()> {
        self.ensure_unsolved()?;
        self.engine.accelerate(factor)
    }

    /// Steps the rotation engine by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.engine.advance(&mut self.hypercube, dt)
    }

    /// Display state of face `face_id` (construction order, see
    /// [`Direction::all`]).
    pub fn face_display_state(&self, face_id: usize) -> HypercubeResult<FaceDisplayState> {
        let face = self
            .hypercube
            .faces
            .get(face_id)
            .ok_or(HypercubeError::InvalidFace(face_id))?;
        Ok(FaceDisplayState {
            initial_direction: face.initial_direction,
            direction: face.current_direction,
            colour: face.colour,
            vertex_positions: face
                .vertices
                .map(|v| self.hypercube.vertices[v].display_position),
            highlighted: self.highlighted == Some(face.current_direction),
        })
    }

    /// Projected 3D position of vertex `index` for drawing.
    pub fn vertex_position_3d(&self, index: usize) -> Option<Vector3<f32>> {
        self.hypercube.vertices.get(index).map(|vertex| {
            project_4d_to_3d(
                &vertex.display_position,
                self.config.projection_scale,
                self.config.w_perspective_base,
            )
        })
    }

    /// Highlights the face currently labelled `direction`, or clears the
    /// highlight with `None`. Ignored while rotating or in preview mode.
    pub fn highlight_face(&mut self, direction: Option<Direction>) -> bool {
        if self.is_busy() || self.preview_mode {
            return false;
        }
        self.highlighted = direction;
        true
    }

    /// Switches between the normal and preview views. Returns the new mode.
    pub fn toggle_preview_mode(&mut self) -> HypercubeResult<bool> {
        self.ensure_unsolved()?;
        if self.is_busy() {
            return Err(HypercubeError::Busy);
        }
        self.preview_mode = !self.preview_mode;
        self.highlighted = None;
        info!(
            "Switched to {} mode",
            if self.preview_mode { "preview" } else { "normal" }
        );
        Ok(self.preview_mode)
    }

    /// Checks the current orientation against the target.
    ///
    /// Refused while the engine is busy. A wrong answer is a strike: the
    /// hypercube returns to its initial orientation with the same target.
    pub fn submit(&mut self) -> HypercubeResult<SubmissionOutcome> {
        self.ensure_unsolved()?;
        if self.is_busy() {
            return Err(HypercubeError::PrematureSubmission);
        }

        let submitted: Vec<String> = self
            .target
            .mappings
            .iter()
            .filter_map(|m| self.hypercube.face_by_initial(m.from))
            .map(|face| format!("{} is now {}", face.initial_direction, face.current_direction))
            .collect();
        info!("Submitted: {}.", submitted.join(", "));

        if verify(&self.hypercube, &self.target) {
            info!("✓ All three faces reached their destinations. Module solved.");
            self.solved = true;
            return Ok(SubmissionOutcome::Solved);
        }

        self.strikes += 1;
        warn!("✕ Incorrect orientation. Strike {}; resetting.", self.strikes);
        self.reset()?;
        Ok(SubmissionOutcome::Strike)
    }

    /// Returns the hypercube to its initial orientation, dropping any
    /// queued or active rotation, and re-applies the face colours.
    pub fn reset(&mut self) -> HypercubeResult<()> {
        self.engine.reset();
        self.hypercube = Hypercube::new()?;
        self.highlighted = None;
        self.refresh_colours();
        Ok(())
    }

    /// Recolours every face from the target by its current label.
    pub fn refresh_colours(&mut self) {
        let target = &self.target;
        let alpha = self.config.face_alpha;
        self.hypercube
            .apply_colours(|direction| target.colour_of(direction).rgba(alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::TRANSPARENT;
    use crate::generator::tests::{Scripted, WORKED_DRAWS};

    fn worked_puzzle() -> OrientationPuzzle {
        OrientationPuzzle::new(
            &PuzzleContext::new("X", 4, 1, 2),
            &mut Scripted::new(&WORKED_DRAWS),
            PuzzleConfig::default(),
        )
        .unwrap()
    }

    fn drain(puzzle: &mut OrientationPuzzle) {
        while puzzle.is_busy() {
            puzzle.advance(0.1);
        }
    }

    fn d(label: &str) -> Direction {
        label.parse().unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PuzzleConfig {
            face_alpha: 0.0,
            ..PuzzleConfig::default()
        };
        let result = OrientationPuzzle::new(
            &PuzzleContext::default(),
            &mut fastrand::Rng::with_seed(1),
            config,
        );
        assert!(matches!(result, Err(HypercubeError::Config(_))));
    }

    #[test]
    fn faces_start_coloured_by_label() {
        let puzzle = worked_puzzle();
        for face_id in 0..8 {
            let state = puzzle.face_display_state(face_id).unwrap();
            let expected = puzzle.target().colour_of(state.direction).rgba(0.25);
            assert_eq!(state.colour, expected);
        }
        // -X reads blue in the worked example.
        let minus_x = puzzle.face_display_state(0).unwrap();
        assert_eq!(minus_x.direction, d("-X"));
        assert_eq!(minus_x.colour, Vector4::new(0.0, 0.0, 1.0, 0.25));
        assert_eq!(puzzle.face_display_state(8), Err(HypercubeError::InvalidFace(8)));
    }

    #[test]
    fn colours_stay_with_faces_until_refreshed() {
        let mut puzzle = worked_puzzle();
        puzzle.enqueue_rotation(1, 0).unwrap();
        drain(&mut puzzle);
        let moved = puzzle.face_display_state(0).unwrap();
        assert_eq!(moved.direction, d("+Y"));
        assert_eq!(moved.colour, Vector4::new(0.0, 0.0, 1.0, 0.25));

        puzzle.refresh_colours();
        let recoloured = puzzle.face_display_state(0).unwrap();
        assert_eq!(recoloured.colour, Vector4::new(1.0, 1.0, 0.0, 0.25));
    }

    #[test]
    fn submission_waits_for_the_queue() {
        let mut puzzle = worked_puzzle();
        puzzle.enqueue_rotation(1, 0).unwrap();
        assert_eq!(puzzle.submit(), Err(HypercubeError::PrematureSubmission));
        puzzle.advance(0.5);
        assert_eq!(puzzle.submit(), Err(HypercubeError::PrematureSubmission));
        assert_eq!(puzzle.strikes(), 0);
        drain(&mut puzzle);
        assert_eq!(puzzle.submit(), Ok(SubmissionOutcome::Strike));
    }

    #[test]
    fn strike_resets_orientation_but_keeps_target() {
        let mut puzzle = worked_puzzle();
        let target = puzzle.target().clone();
        puzzle.enqueue_rotation(0, 2).unwrap();
        drain(&mut puzzle);
        puzzle.shift_perspective(false).unwrap();

        assert_eq!(puzzle.submit(), Ok(SubmissionOutcome::Strike));
        assert_eq!(puzzle.strikes(), 1);
        assert_eq!(puzzle.target(), &target);
        for face in &puzzle.hypercube().faces {
            assert_eq!(face.current_direction, face.initial_direction);
            assert_eq!(face.colour, target.colour_of(face.initial_direction).rgba(0.25));
        }
    }

    #[test]
    fn solving_locks_the_puzzle() {
        let mut puzzle = worked_puzzle();
        for (from, to) in [(0, 1), (2, 3), (1, 3), (1, 3)] {
            puzzle.enqueue_rotation(from, to).unwrap();
        }
        drain(&mut puzzle);
        assert_eq!(puzzle.submit(), Ok(SubmissionOutcome::Solved));
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.enqueue_rotation(0, 1), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.press(Button::Set), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.shift_perspective(true), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.toggle_preview_mode(), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.clear_queue(), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.accelerate(2.0), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.submit(), Err(HypercubeError::AlreadySolved));
        assert_eq!(puzzle.axis_map().observer_yaw(), 0);
        assert!(!puzzle.is_preview_mode());
    }

    #[test]
    fn accelerating_while_idle_keeps_the_base_rate() {
        let mut puzzle = worked_puzzle();
        puzzle.accelerate(8.0).unwrap();
        puzzle.enqueue_rotation(0, 1).unwrap();
        assert_eq!(puzzle.advance(0.25), 0);
        assert!(puzzle.is_busy());
        assert_eq!(puzzle.advance(0.8), 1);
        assert!(!puzzle.is_busy());
    }

    #[test]
    fn buttons_follow_the_perspective() {
        let mut puzzle = worked_puzzle();
        puzzle.press(Button::Left).unwrap();
        assert_eq!(puzzle.engine.pending(), 1);
        puzzle.press(Button::Set).unwrap();
        assert_eq!(puzzle.axis_map().observer_yaw(), 90);
        assert_eq!(puzzle.engine.pending(), 1);
        drain(&mut puzzle);

        // X is internal 0 and Y internal 2 with opposite signs, so Left
        // turned internal axis 2 onto axis 0.
        let minus_z = puzzle.hypercube().face_by_initial(d("-Z")).unwrap();
        assert_eq!(minus_z.current_direction, d("-X"));
    }

    #[test]
    fn letter_rotations_are_validated() {
        let mut puzzle = worked_puzzle();
        assert!(matches!(
            puzzle.enqueue_letter_rotation('X', 'Q'),
            Err(HypercubeError::InvalidRotationCommand(_))
        ));
        assert!(!puzzle.is_busy());
        assert_eq!(
            puzzle.enqueue_letter_rotation('x', 'w'),
            Rotation::from_indices(0, 3)
        );
        assert_eq!(puzzle.enqueue_rotation(4, 0), Err(HypercubeError::InvalidAxis(4)));
    }

    #[test]
    fn highlight_and_preview_respect_busy_state() {
        let mut puzzle = worked_puzzle();
        assert!(puzzle.highlight_face(Some(d("+W"))));
        assert!(puzzle.face_display_state(7).unwrap().highlighted);

        assert_eq!(puzzle.toggle_preview_mode(), Ok(true));
        assert!(!puzzle.face_display_state(7).unwrap().highlighted);
        assert!(!puzzle.highlight_face(Some(d("+W"))));
        assert_eq!(puzzle.toggle_preview_mode(), Ok(false));

        puzzle.enqueue_rotation(0, 1).unwrap();
        assert!(!puzzle.highlight_face(Some(d("+W"))));
        assert_eq!(puzzle.toggle_preview_mode(), Err(HypercubeError::Busy));
    }

    #[test]
    fn projected_positions_follow_display_positions() {
        let mut puzzle = worked_puzzle();
        let before = puzzle.vertex_position_3d(15).unwrap();
        assert!((before - Vector3::new(0.5, 0.5, 0.5)).norm() < 1e-6);
        assert!(puzzle.vertex_position_3d(16).is_none());

        puzzle.enqueue_rotation(0, 3).unwrap();
        puzzle.advance(0.5);
        let during = puzzle.vertex_position_3d(15).unwrap();
        assert!((during - before).norm() > 1e-3);
    }

    #[test]
    fn transparent_faces_report_zero_alpha() {
        let mut puzzle = worked_puzzle();
        puzzle.target.colours[0].1 = Default::default();
        puzzle.refresh_colours();
        assert_eq!(puzzle.face_display_state(0).unwrap().colour, TRANSPARENT);
    }
}
