//! 4D hypercube topology and state.
//!
//! This module defines the tesseract itself: its 16 vertices, the 32 edges
//! joining them, and the 8 cubic hyperfaces that the puzzle rotates and
//! colours. Rotations are applied here; scheduling them is the job of
//! [`crate::rotation::RotationEngine`].

use nalgebra::{Matrix4, Vector4};

use crate::direction::Direction;
use crate::error::{HypercubeError, HypercubeResult};
use crate::math::{create_4d_quarter_turn, snap_to_lattice, to_display};
use crate::rotation::Rotation;

pub const VERTEX_COUNT: usize = 16;
pub const EDGE_COUNT: usize = 32;
pub const FACE_COUNT: usize = 8;
pub const FACE_VERTEX_COUNT: usize = 8;

/// Colour of a hyperface with nothing assigned yet.
pub const TRANSPARENT: Vector4<f32> = Vector4::new(0.0, 0.0, 0.0, 0.0);

/// One corner of the tesseract.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub index: usize,
    /// Authoritative position, every component ±1. Only changes when a
    /// rotation completes.
    pub internal_position: Vector4<i32>,
    /// Continuous position used while a rotation is in flight.
    pub display_position: Vector4<f32>,
}

impl Vertex {
    fn new(index: usize) -> Self {
        let internal_position = Vector4::from_fn(|axis, _| 2 * ((index as i32 >> axis) & 1) - 1);
        Self {
            index,
            internal_position,
            display_position: to_display(&internal_position),
        }
    }

    /// Sets the display position to `matrix` applied to the internal position.
    pub fn rotate_display(&mut self, matrix: &Matrix4<f32>) {
        self.display_position = matrix * to_display(&self.internal_position);
    }

    /// Applies `matrix` to the internal position and snaps it to integers.
    pub fn rotate_internal(&mut self, matrix: &Matrix4<f32>) {
        self.internal_position = snap_to_lattice(&(matrix * to_display(&self.internal_position)));
        self.display_position = to_display(&self.internal_position);
    }
}

/// Unordered pair of vertices differing in exactly one coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

/// One of the eight 3D cells of the tesseract.
#[derive(Clone, Debug, PartialEq)]
pub struct Hyperface {
    /// Construction-time label, never changes.
    pub initial_direction: Direction,
    /// Label after every completed rotation so far.
    pub current_direction: Direction,
    /// Vertex indices by face-local slot. Slot bits come from the three
    /// free axes in increasing order, weights 1, 2, 4, bit set for +1.
    pub vertices: [usize; FACE_VERTEX_COUNT],
    /// RGBA colour, refreshed only through [`Hypercube::apply_colours`].
    pub colour: Vector4<f32>,
}

impl Hyperface {
    /// Collects the eight vertices lying on `direction` into their slots.
    fn new(direction: Direction, vertices: &[Vertex]) -> HypercubeResult<Self> {
        let fixed_dim = direction.axis.index();
        let mut slots = [None; FACE_VERTEX_COUNT];
        let mut found = 0;

        for vertex in vertices
            .iter()
            .filter(|v| v.internal_position[fixed_dim] == direction.sign.value())
        {
            let slot = face_slot(&vertex.internal_position, fixed_dim);
            if slots[slot].replace(vertex.index).is_some() {
                return Err(HypercubeError::ConstructionInvariant {
                    what: "distinct face slots",
                    expected: FACE_VERTEX_COUNT,
                    found,
                });
            }
            found += 1;
        }

        let mut filled = [0; FACE_VERTEX_COUNT];
        for (target, slot) in filled.iter_mut().zip(slots) {
            *target = slot.ok_or(HypercubeError::ConstructionInvariant {
                what: "face vertices",
                expected: FACE_VERTEX_COUNT,
                found,
            })?;
        }

        Ok(Self {
            initial_direction: direction,
            current_direction: direction,
            vertices: filled,
            colour: TRANSPARENT,
        })
    }
}

/// Slot of a vertex within the face perpendicular to `fixed_dim`.
pub fn face_slot(position: &Vector4<i32>, fixed_dim: usize) -> usize {
    (0..4)
        .filter(|&dim| dim != fixed_dim)
        .enumerate()
        .map(|(bit, dim)| usize::from(position[dim] > 0) << bit)
        .sum()
}

/// The complete tesseract.
#[derive(Clone, Debug, PartialEq)]
pub struct Hypercube {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Hyperface>,
}

impl Hypercube {
    /// Creates a hypercube in its initial orientation.
    pub fn new() -> HypercubeResult<Self> {
        let vertices: Vec<Vertex> = (0..VERTEX_COUNT).map(Vertex::new).collect();

        let mut edges = Vec::with_capacity(EDGE_COUNT);
        for a in 0..VERTEX_COUNT {
            for b in a + 1..VERTEX_COUNT {
                let differing = (vertices[a].internal_position - vertices[b].internal_position)
                    .iter()
                    .filter(|&&c| c != 0)
                    .count();
                if differing == 1 {
                    edges.push(Edge { a, b });
                }
            }
        }
        if edges.len() != EDGE_COUNT {
            return Err(HypercubeError::ConstructionInvariant {
                what: "edges",
                expected: EDGE_COUNT,
                found: edges.len(),
            });
        }

        let faces = Direction::all()
            .map(|direction| Hyperface::new(direction, &vertices))
            .collect::<HypercubeResult<Vec<_>>>()?;
        if faces.len() != FACE_COUNT {
            return Err(HypercubeError::ConstructionInvariant {
                what: "hyperfaces",
                expected: FACE_COUNT,
                found: faces.len(),
            });
        }

        Ok(Self {
            vertices,
            edges,
            faces,
        })
    }

    /// The face whose construction-time label is `direction`.
    pub fn face_by_initial(&self, direction: Direction) -> Option<&Hyperface> {
        self.faces.iter().find(|f| f.initial_direction == direction)
    }

    /// Shows a rotation partway through, leaving internal positions untouched.
    pub fn apply_partial(&mut self, matrix: &Matrix4<f32>) {
        for vertex in &mut self.vertices {
            vertex.rotate_display(matrix);
        }
    }

    /// Commits a full quarter-turn to vertices and face labels.
    pub fn complete_rotation(&mut self, rotation: Rotation) {
        let matrix = create_4d_quarter_turn(rotation.from.index(), rotation.to.index());
        for vertex in &mut self.vertices {
            vertex.rotate_internal(&matrix);
        }
        for face in &mut self.faces {
            face.current_direction = face.current_direction.rotated(rotation);
        }
    }

    /// Recolours every face by looking up its current label.
    pub fn apply_colours(&mut self, colour_of: impl Fn(Direction) -> Vector4<f32>) {
        for face in &mut self.faces {
            face.colour = colour_of(face.current_direction);
        }
    }

    /// Whether every vertex of `face` lies on the side its current label names.
    pub fn face_is_consistent(&self, face: &Hyperface) -> bool {
        let axis = face.current_direction.axis.index();
        face.vertices
            .iter()
            .all(|&v| self.vertices[v].internal_position[axis] == face.current_direction.sign.value())
    }
}
