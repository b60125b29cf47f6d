//! Procedural generation of the hidden puzzle target.
//!
//! Three face mappings are drawn at random and encoded into two 4-bit codes
//! per colour channel: a "negative" code describing the source face and a
//! "positive" code describing the destination face. The codes are then
//! scrambled by the puzzle context (identifier letters invert bit
//! positions, battery and port counts rotate the codes) and finally read
//! column by column to colour the eight faces.
//!
//! Every random draw goes through [`RandomSource`], so a seeded or scripted
//! source reproduces a target exactly.

use std::fmt;

use log::info;
use nalgebra::Vector4;

use crate::config::PuzzleContext;
use crate::cube::TRANSPARENT;
use crate::direction::{Axis, Direction, Sign};

/// Number of face mappings, one per colour channel.
pub const CHANNEL_COUNT: usize = 3;

/// Source of the generator's random draws.
pub trait RandomSource {
    /// Uniformly distributed integer in `0..bound`.
    fn below(&mut self, bound: usize) -> usize;

    fn bit(&mut self) -> bool {
        self.below(2) == 1
    }
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, bound: usize) -> usize {
        self.usize(..bound)
    }
}

/// The colour channels, in mapping order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }
}

/// One required movement: the face starting on `from` must end on `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceMapping {
    pub from: Direction,
    pub to: Direction,
}

impl fmt::Display for FaceMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// A 4-bit code. Position 0 is the leftmost character when printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCode([bool; 4]);

impl FaceCode {
    /// Encodes a face: two axis bits, a free bit, then a bit that repeats the
    /// free bit for positive faces and complements it for negative ones.
    pub fn encode(direction: Direction, free_bit: bool) -> Self {
        let axis = direction.axis.index();
        let sign_bit = match direction.sign {
            Sign::Positive => free_bit,
            Sign::Negative => !free_bit,
        };
        Self([axis & 0b10 != 0, axis & 0b01 != 0, free_bit, sign_bit])
    }

    /// Reverses [`FaceCode::encode`].
    pub fn decode(self) -> Direction {
        let [high, low, free_bit, sign_bit] = self.0;
        let axis = Axis::ALL[usize::from(high) << 1 | usize::from(low)];
        let sign = if free_bit == sign_bit {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Direction::new(axis, sign)
    }

    pub fn bit(self, position: usize) -> bool {
        self.0[position]
    }

    pub fn invert(&mut self, position: usize) {
        self.0[position] = !self.0[position];
    }

    /// Circular left shift by `amount` positions.
    pub fn rotate_left(&mut self, amount: usize) {
        self.0.rotate_left(amount % 4);
    }
}

impl fmt::Display for FaceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0 {
            write!(f, "{}", u8::from(bit))?;
        }
        Ok(())
    }
}

/// The six codes, one negative and one positive per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelCodes {
    pub negative: [FaceCode; CHANNEL_COUNT],
    pub positive: [FaceCode; CHANNEL_COUNT],
}

impl ChannelCodes {
    fn all_mut(&mut self) -> impl Iterator<Item = &mut FaceCode> {
        self.negative.iter_mut().chain(self.positive.iter_mut())
    }

    fn log(&self, heading: &str) {
        info!("{heading}");
        let [rn, gn, bn] = self.negative;
        let [rp, gp, bp] = self.positive;
        info!("R-:{rn} | G-:{gn} | B-:{bn}");
        info!("R+:{rp} | G+:{gp} | B+:{bp}");
    }
}

/// On/off state of each channel for one face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceColour {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl FaceColour {
    pub fn is_visible(self) -> bool {
        self.red || self.green || self.blue
    }

    /// RGBA for rendering: full-intensity channels at `alpha`, or fully
    /// transparent when no channel is lit.
    pub fn rgba(self, alpha: f32) -> Vector4<f32> {
        if !self.is_visible() {
            return TRANSPARENT;
        }
        let level = |on: bool| if on { 1.0 } else { 0.0 };
        Vector4::new(level(self.red), level(self.green), level(self.blue), alpha)
    }
}

/// The hidden solution: three mappings and the colour shown on each face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleTarget {
    pub mappings: [FaceMapping; CHANNEL_COUNT],
    /// Colours keyed by face label, in [`Direction::all`] order.
    pub colours: [(Direction, FaceColour); 8],
}

impl PuzzleTarget {
    pub fn colour_of(&self, direction: Direction) -> FaceColour {
        self.colours
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|&(_, colour)| colour)
            .unwrap_or_default()
    }
}

/// Intermediate codes from every generation stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationTrace {
    pub encoded: ChannelCodes,
    pub inverted_axes: Vec<Axis>,
    pub after_inversion: ChannelCodes,
    pub negative_shift: usize,
    pub positive_shift: usize,
    pub final_codes: ChannelCodes,
}

/// Left shift applied to the negative codes.
pub fn negative_shift(context: &PuzzleContext) -> usize {
    let spare = i64::from(context.battery_count) - i64::from(context.battery_holder_count);
    ((4 - spare.rem_euclid(4)) % 4) as usize
}

/// Left shift applied to the positive codes.
pub fn positive_shift(context: &PuzzleContext) -> usize {
    (context.port_count % 4) as usize
}

/// Generates a puzzle target from the context and random draws.
pub fn generate(context: &PuzzleContext, rng: &mut impl RandomSource) -> PuzzleTarget {
    generate_with_trace(context, rng).0
}

/// Like [`generate`], also returning the codes from each stage.
pub fn generate_with_trace(
    context: &PuzzleContext,
    rng: &mut impl RandomSource,
) -> (PuzzleTarget, GenerationTrace) {
    let mappings = draw_mappings(rng);
    info!("Final face mappings:");
    for (channel, mapping) in Channel::ALL.iter().zip(&mappings) {
        info!("{}: {mapping}.", channel.name());
    }

    let encoded = encode_mappings(&mappings, rng);
    encoded.log("Encoded binaries:");

    let mut codes = encoded;
    let inverted_axes = invert_mentioned_axes(&mut codes, context);
    if inverted_axes.is_empty() {
        info!("The identifier does not share any letters with \"XYZW\".");
    } else {
        let letters: String = inverted_axes.iter().map(|a| a.letter()).collect();
        info!("The identifier contains the axis letters {letters}.");
    }
    let after_inversion = codes;
    after_inversion.log("After inversion:");

    let n_shift = negative_shift(context);
    let p_shift = positive_shift(context);
    for code in &mut codes.negative {
        code.rotate_left(n_shift);
    }
    for code in &mut codes.positive {
        code.rotate_left(p_shift);
    }
    codes.log("The faces read:");

    let target = PuzzleTarget {
        mappings,
        colours: read_colours(&codes),
    };
    let trace = GenerationTrace {
        encoded,
        inverted_axes,
        after_inversion,
        negative_shift: n_shift,
        positive_shift: p_shift,
        final_codes: codes,
    };
    (target, trace)
}

fn draw_sign(rng: &mut impl RandomSource) -> Sign {
    if rng.below(2) == 0 {
        Sign::Negative
    } else {
        Sign::Positive
    }
}

/// Draws three mappings with distinct source axes and distinct destination
/// axes, never mapping a face onto itself.
fn draw_mappings(rng: &mut impl RandomSource) -> [FaceMapping; CHANNEL_COUNT] {
    let mut from_axes = Axis::ALL.to_vec();
    let mut to_axes = Axis::ALL.to_vec();

    std::array::from_fn(|_| {
        let from_sign = draw_sign(rng);
        let to_sign = draw_sign(rng);

        let from = Direction::new(from_axes.remove(rng.below(from_axes.len())), from_sign);
        // The destination pool always holds at least two axes, so this
        // rejection loop terminates.
        let to = loop {
            let index = rng.below(to_axes.len());
            let candidate = Direction::new(to_axes[index], to_sign);
            if candidate != from {
                to_axes.remove(index);
                break candidate;
            }
        };
        FaceMapping { from, to }
    })
}

fn encode_mappings(
    mappings: &[FaceMapping; CHANNEL_COUNT],
    rng: &mut impl RandomSource,
) -> ChannelCodes {
    let mut codes = ChannelCodes::default();
    for (i, mapping) in mappings.iter().enumerate() {
        codes.negative[i] = FaceCode::encode(mapping.from, rng.bit());
        codes.positive[i] = FaceCode::encode(mapping.to, rng.bit());
    }
    codes
}

fn invert_mentioned_axes(codes: &mut ChannelCodes, context: &PuzzleContext) -> Vec<Axis> {
    let mentioned: Vec<Axis> = Axis::ALL
        .into_iter()
        .filter(|axis| context.mentions(axis.letter()))
        .collect();
    for axis in &mentioned {
        for code in codes.all_mut() {
            code.invert(axis.index());
        }
    }
    mentioned
}

/// Reads column `axis` of the codes as the colour of the faces on that axis.
fn read_colours(codes: &ChannelCodes) -> [(Direction, FaceColour); 8] {
    let column = |side: &[FaceCode; CHANNEL_COUNT], position: usize| FaceColour {
        red: side[0].bit(position),
        green: side[1].bit(position),
        blue: side[2].bit(position),
    };
    let mut colours = [(Direction::new(Axis::X, Sign::Negative), FaceColour::default()); 8];
    for (slot, direction) in colours.iter_mut().zip(Direction::all()) {
        let side = match direction.sign {
            Sign::Negative => &codes.negative,
            Sign::Positive => &codes.positive,
        };
        *slot = (direction, column(side, direction.axis.index()));
    }
    colours
}
