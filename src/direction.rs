//! Axis, sign and direction labels for the eight hyperfaces.
//!
//! A [`Direction`] names one cell of the tesseract by the axis it is
//! perpendicular to and the side of that axis it sits on. Labels are
//! written the way the puzzle reads them aloud: `+X`, `-W`, ...

use std::fmt;
use std::str::FromStr;

use crate::error::{HypercubeError, HypercubeResult};
use crate::rotation::Rotation;

/// One of the four coordinate axes of the tesseract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
    W,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::W];

    /// Converts an internal axis index into an axis.
    pub fn from_index(index: usize) -> HypercubeResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(HypercubeError::InvalidAxis(index))
    }

    /// Parses a logical axis letter, case-insensitively.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            'W' => Some(Axis::W),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::W => 'W',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Which side of an axis a hyperface sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub const ALL: [Sign; 2] = [Sign::Negative, Sign::Positive];

    pub fn flipped(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }

    /// The coordinate value (-1 or +1) this sign stands for.
    pub fn value(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Positive => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Sign::Negative => '-',
            Sign::Positive => '+',
        }
    }
}

/// An axis and sign pair labelling one hyperface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction {
    pub axis: Axis,
    pub sign: Sign,
}

impl Direction {
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// All eight directions, ordered by axis and then negative before positive.
    pub fn all() -> impl Iterator<Item = Direction> {
        Axis::ALL
            .into_iter()
            .flat_map(|axis| Sign::ALL.into_iter().map(move |sign| Direction::new(axis, sign)))
    }

    /// The label this direction carries after a completed quarter-turn.
    ///
    /// The `from` side moves onto the `to` axis keeping its sign; the `to`
    /// side moves onto the `from` axis with its sign inverted. This is the
    /// same map the exact 90° matrix applies to vertex coordinates.
    pub fn rotated(self, rotation: Rotation) -> Direction {
        if self.axis == rotation.from {
            Direction::new(rotation.to, self.sign)
        } else if self.axis == rotation.to {
            Direction::new(rotation.from, self.sign.flipped())
        } else {
            self
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.symbol(), self.axis.letter())
    }
}

impl FromStr for Direction {
    type Err = HypercubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(sign), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(HypercubeError::InvalidDirection(s.to_string()));
        };
        let sign = match sign {
            '+' => Sign::Positive,
            '-' => Sign::Negative,
            _ => return Err(HypercubeError::InvalidDirection(s.to_string())),
        };
        let axis =
            Axis::from_letter(letter).ok_or_else(|| HypercubeError::InvalidDirection(s.to_string()))?;
        Ok(Direction::new(axis, sign))
    }
}
