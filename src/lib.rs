//! Orientation puzzle on a 4D hypercube.
//!
//! The player rotates a tesseract through quarter-turns in any of its six
//! coordinate planes and must carry three hidden source faces onto three
//! hidden destination faces. The destinations are encoded in the face
//! colours, scrambled by the puzzle context. Rendering is left to the
//! caller: this crate owns the 4D model, the rotation queue, the
//! perspective map, the generator and the verifier.

pub mod config;
pub mod cube;
pub mod direction;
pub mod error;
pub mod generator;
pub mod math;
pub mod perspective;
pub mod puzzle;
pub mod rotation;
pub mod verifier;

pub use config::{PuzzleConfig, PuzzleContext};
pub use cube::Hypercube;
pub use direction::{Axis, Direction, Sign};
pub use error::{HypercubeError, HypercubeResult};
pub use generator::{PuzzleTarget, RandomSource, generate};
pub use perspective::Button;
pub use puzzle::{FaceDisplayState, OrientationPuzzle, SubmissionOutcome};
pub use rotation::Rotation;
