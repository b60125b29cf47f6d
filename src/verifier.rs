//! Checks a finished rotation sequence against the puzzle target.

use log::debug;

use crate::cube::Hypercube;
use crate::generator::{FaceMapping, PuzzleTarget};

/// Whether the face that started on `mapping.from` now carries `mapping.to`.
pub fn mapping_satisfied(cube: &Hypercube, mapping: &FaceMapping) -> bool {
    cube.face_by_initial(mapping.from)
        .is_some_and(|face| face.current_direction == mapping.to)
}

/// True only if all three mappings hold; there is no partial credit.
pub fn verify(cube: &Hypercube, target: &PuzzleTarget) -> bool {
    target.mappings.iter().all(|mapping| {
        let satisfied = mapping_satisfied(cube, mapping);
        if !satisfied {
            let actual = cube
                .face_by_initial(mapping.from)
                .map(|face| face.current_direction.to_string())
                .unwrap_or_default();
            debug!("Expected {} to reach {}, found {actual}", mapping.from, mapping.to);
        }
        satisfied
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleContext;
    use crate::direction::Direction;
    use crate::generator::generate;
    use crate::generator::tests::{Scripted, WORKED_DRAWS};
    use crate::rotation::Rotation;

    fn d(label: &str) -> Direction {
        label.parse().unwrap()
    }

    fn worked_target() -> PuzzleTarget {
        generate(&PuzzleContext::new("X", 4, 1, 2), &mut Scripted::new(&WORKED_DRAWS))
    }

    #[test]
    fn untouched_cube_fails() {
        let cube = Hypercube::new().unwrap();
        assert!(!verify(&cube, &worked_target()));
    }

    #[test]
    fn single_pair_after_one_rotation() {
        let mut cube = Hypercube::new().unwrap();
        // Y onto X carries the -X face to +Y.
        cube.complete_rotation(Rotation::from_indices(1, 0).unwrap());
        let target = worked_target();
        assert!(mapping_satisfied(&cube, &target.mappings[0]));
        assert!(!verify(&cube, &target));
    }

    #[test]
    fn all_three_pairs_are_required() {
        // -X→+Y, +Z→-W, -Y→+X: XY, ZW, then a half-turn in YW.
        let mut cube = Hypercube::new().unwrap();
        for (from, to) in [(0, 1), (2, 3), (1, 3), (1, 3)] {
            cube.complete_rotation(Rotation::from_indices(from, to).unwrap());
        }
        let target = worked_target();
        for mapping in &target.mappings {
            assert!(mapping_satisfied(&cube, mapping), "{mapping} not satisfied");
        }
        assert!(verify(&cube, &target));

        cube.complete_rotation(Rotation::from_indices(0, 1).unwrap());
        assert!(!verify(&cube, &target));
        assert_eq!(cube.face_by_initial(d("-X")).unwrap().current_direction, d("-X"));
    }
}
