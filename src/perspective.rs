//! Mapping from the player's logical axis letters onto internal axes.
//!
//! The player issues rotations in terms of X, Y, Z and W as seen from where
//! they stand. Walking around the object relabels which internal axis each
//! letter refers to, and on which side it points, without touching the
//! hypercube itself.

use std::str::FromStr;

use log::debug;

use crate::direction::{Axis, Sign};
use crate::error::{HypercubeError, HypercubeResult};
use crate::rotation::Rotation;

/// Degrees the observer moves around the object per perspective shift.
pub const OBSERVER_STEP_DEGREES: i32 = 90;

/// Letters and orientation signs indexed by internal axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisLabelMap {
    letters: [Axis; 4],
    signs: [Sign; 4],
    observer_yaw: i32,
}

impl Default for AxisLabelMap {
    fn default() -> Self {
        Self {
            letters: [Axis::X, Axis::Z, Axis::Y, Axis::W],
            signs: [Sign::Positive, Sign::Positive, Sign::Negative, Sign::Positive],
            observer_yaw: 0,
        }
    }
}

impl AxisLabelMap {
    /// The internal axis index the logical `letter` currently refers to.
    pub fn internal_axis(&self, letter: Axis) -> usize {
        self.letters
            .iter()
            .position(|&l| l == letter)
            .unwrap_or(letter.index())
    }

    /// The logical letter shown for internal axis `index`.
    pub fn letter_at(&self, index: usize) -> HypercubeResult<Axis> {
        self.letters
            .get(index)
            .copied()
            .ok_or(HypercubeError::InvalidAxis(index))
    }

    pub fn sign_at(&self, index: usize) -> HypercubeResult<Sign> {
        self.signs
            .get(index)
            .copied()
            .ok_or(HypercubeError::InvalidAxis(index))
    }

    /// Letters in internal axis order, e.g. `"XZYW"`.
    pub fn permutation(&self) -> String {
        self.letters.iter().map(|a| a.letter()).collect()
    }

    /// Accumulated observer yaw in degrees.
    pub fn observer_yaw(&self) -> i32 {
        self.observer_yaw
    }

    /// Converts a logical letter pair into an internal rotation.
    ///
    /// When the two letters currently point in opposite senses the pair is
    /// reversed, so the on-screen handedness of a command never changes.
    pub fn translate(&self, from_letter: Axis, to_letter: Axis) -> HypercubeResult<Rotation> {
        let from = self.internal_axis(from_letter);
        let to = self.internal_axis(to_letter);
        if self.signs[from] != self.signs[to] {
            Rotation::from_indices(to, from)
        } else {
            Rotation::from_indices(from, to)
        }
    }

    /// Parses and translates a two-letter command such as `"XW"`.
    pub fn translate_letters(&self, pair: &str) -> HypercubeResult<Rotation> {
        let invalid = || HypercubeError::InvalidRotationCommand(pair.to_string());
        let mut chars = pair.trim().chars();
        let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let from = Axis::from_letter(a).ok_or_else(invalid)?;
        let to = Axis::from_letter(b).ok_or_else(invalid)?;
        self.translate(from, to)
    }

    /// Moves the observer a quarter-turn around the object by exchanging
    /// the X and Y slots. `reverse` selects the direction of travel; a
    /// shift followed by a reversed shift restores the original map.
    ///
    /// Returns the new observer yaw.
    pub fn shift(&mut self, reverse: bool) -> i32 {
        let x = self.internal_axis(Axis::X);
        let y = self.internal_axis(Axis::Y);
        let x_sign = self.signs[x];

        self.letters.swap(x, y);

        if reverse != (self.signs[y] == x_sign) {
            self.signs[x] = self.signs[y];
            self.signs[y] = x_sign.flipped();
        } else {
            self.signs[x] = self.signs[y].flipped();
            self.signs[y] = x_sign;
        }

        self.observer_yaw += if reverse {
            OBSERVER_STEP_DEGREES
        } else {
            -OBSERVER_STEP_DEGREES
        };
        debug!(
            "Perspective shifted to {} {:?}, observer at {}°",
            self.permutation(),
            self.signs.map(Sign::value),
            self.observer_yaw
        );
        self.observer_yaw
    }
}

/// The physical buttons on the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    In,
    Out,
    Clock,
    Counter,
    /// Shifts the perspective instead of rotating.
    Set,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Left,
        Button::Right,
        Button::In,
        Button::Out,
        Button::Clock,
        Button::Counter,
        Button::Set,
    ];

    /// Logical letter pair bound to a rotation button.
    pub fn letters(self) -> Option<(Axis, Axis)> {
        match self {
            Button::Left => Some((Axis::X, Axis::Y)),
            Button::Right => Some((Axis::Y, Axis::X)),
            Button::In => Some((Axis::W, Axis::Y)),
            Button::Out => Some((Axis::Y, Axis::W)),
            Button::Clock => Some((Axis::Z, Axis::X)),
            Button::Counter => Some((Axis::X, Axis::Z)),
            Button::Set => None,
        }
    }
}

impl FromStr for Button {
    type Err = HypercubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Button::Left),
            "right" => Ok(Button::Right),
            "in" => Ok(Button::In),
            "out" => Ok(Button::Out),
            "clock" => Ok(Button::Clock),
            "counter" => Ok(Button::Counter),
            "set" => Ok(Button::Set),
            _ => Err(HypercubeError::InvalidRotationCommand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_map_reverses_pairs_with_opposite_signs() {
        let map = AxisLabelMap::default();
        assert_eq!(map.permutation(), "XZYW");
        // X is internal 0 (+), Y is internal 2 (-).
        assert_eq!(map.translate(Axis::X, Axis::Y), Rotation::from_indices(2, 0));
        assert_eq!(map.translate(Axis::X, Axis::W), Rotation::from_indices(0, 3));
        assert_eq!(map.translate(Axis::Z, Axis::X), Rotation::from_indices(1, 0));
    }

    #[test]
    fn malformed_letter_pairs_are_rejected() {
        let map = AxisLabelMap::default();
        for bad in ["", "X", "XYZ", "XQ", "XX"] {
            assert!(
                matches!(
                    map.translate_letters(bad),
                    Err(HypercubeError::InvalidRotationCommand(_))
                ),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(map.translate_letters("wy"), Rotation::from_indices(2, 3));
    }

    #[test]
    fn shift_swaps_x_and_y() {
        let mut map = AxisLabelMap::default();
        assert_eq!(map.shift(false), -90);
        assert_eq!(map.permutation(), "YZXW");
        for index in 0..4 {
            assert_eq!(map.sign_at(index), Ok(Sign::Positive));
        }
        assert_eq!(map.letter_at(0), Ok(Axis::Y));
        assert!(map.letter_at(4).is_err());
    }

    #[test]
    fn reverse_shift_undoes_shift() {
        for first in [false, true] {
            let mut map = AxisLabelMap::default();
            let initial = map.clone();
            map.shift(first);
            map.shift(!first);
            assert_eq!(map, initial);
        }
    }

    #[test]
    fn four_shifts_come_full_circle() {
        for reverse in [false, true] {
            let mut map = AxisLabelMap::default();
            let initial = map.clone();
            for _ in 0..4 {
                map.shift(reverse);
            }
            assert_eq!(map.permutation(), initial.permutation());
            assert_eq!(map.signs, initial.signs);
            assert_eq!(map.observer_yaw().abs(), 360);
        }
    }

    #[test]
    fn opposite_buttons_translate_to_inverse_rotations() {
        let mut map = AxisLabelMap::default();
        for _ in 0..3 {
            for (a, b) in [
                (Button::Left, Button::Right),
                (Button::In, Button::Out),
                (Button::Clock, Button::Counter),
            ] {
                let (af, at) = a.letters().unwrap();
                let (bf, bt) = b.letters().unwrap();
                let forward = map.translate(af, at).unwrap();
                let backward = map.translate(bf, bt).unwrap();
                assert_eq!(forward.reversed(), backward);
            }
            map.shift(true);
        }
    }

    #[test]
    fn buttons_parse_by_name() {
        assert_eq!("Counter".parse::<Button>(), Ok(Button::Counter));
        assert_eq!(" set ".parse::<Button>(), Ok(Button::Set));
        assert!("Centre".parse::<Button>().is_err());
        assert_eq!(Button::Set.letters(), None);
        assert_eq!(Button::ALL.len(), 7);
    }
}
