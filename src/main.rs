//! Headless driver for the orientation hypercube.
//!
//! Generates a puzzle from command-line context and plays commands read from
//! stdin, one per line, ticking the rotation engine at a fixed frame step.
//!
//! Usage: `orientation-hypercube [seed] [identifier] [batteries] [holders] [ports]`

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::str::FromStr;

use log::{error, info, warn};

use orientation_hypercube::{
    Button, HypercubeError, HypercubeResult, OrientationPuzzle, PuzzleConfig, PuzzleContext,
    SubmissionOutcome,
};

/// Upper bound on frames ticked while waiting for the engine to settle.
const MAX_SETTLE_FRAMES: usize = 100_000;

/// Commands accepted on stdin.
#[derive(Debug, Clone, PartialEq)]
enum Message {
    Press(Button),
    Letters(char, char),
    Indices(usize, usize),
    Tick(Option<usize>),
    Clear,
    Faster,
    Preview,
    Faces,
    Submit,
    Quit,
}

impl FromStr for Message {
    type Err = HypercubeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let lower = command.to_ascii_lowercase();
        match lower.as_str() {
            "clear" => return Ok(Message::Clear),
            "faster" => return Ok(Message::Faster),
            "preview" => return Ok(Message::Preview),
            "faces" => return Ok(Message::Faces),
            "submit" => return Ok(Message::Submit),
            "quit" | "exit" => return Ok(Message::Quit),
            "tick" => {
                let frames = words
                    .next()
                    .map(|n| n.parse::<usize>())
                    .transpose()
                    .map_err(|_| HypercubeError::InvalidRotationCommand(line.to_string()))?;
                return Ok(Message::Tick(frames));
            }
            _ => {}
        }
        if let Ok(button) = command.parse::<Button>() {
            return Ok(Message::Press(button));
        }

        let chars: Vec<char> = command.chars().collect();
        match chars.as_slice() {
            [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => Ok(Message::Indices(
                a.to_digit(10).unwrap_or_default() as usize,
                b.to_digit(10).unwrap_or_default() as usize,
            )),
            [a, b] => Ok(Message::Letters(*a, *b)),
            _ => Err(HypercubeError::InvalidRotationCommand(line.to_string())),
        }
    }
}

/// Driver state: the puzzle plus the fixed frame step.
struct HypercubeApp {
    puzzle: OrientationPuzzle,
    frame_dt: f32,
}

impl HypercubeApp {
    fn new(context: &PuzzleContext, seed: u64) -> HypercubeResult<Self> {
        let config = PuzzleConfig::default();
        let frame_dt = config.frame_dt;
        let mut rng = fastrand::Rng::with_seed(seed);
        let puzzle = OrientationPuzzle::new(context, &mut rng, config)?;
        Ok(Self { puzzle, frame_dt })
    }

    /// Ticks frames until the engine is idle or `limit` frames have passed.
    fn tick(&mut self, limit: usize) -> usize {
        let mut completed = 0;
        for _ in 0..limit {
            if !self.puzzle.is_busy() {
                break;
            }
            completed += self.puzzle.advance(self.frame_dt);
        }
        completed
    }

    fn log_faces(&self) {
        for face_id in 0..8 {
            match self.puzzle.face_display_state(face_id) {
                Ok(state) => info!(
                    "Face {} is at {} colour ({:.0}, {:.0}, {:.0}, {:.2}){}",
                    state.initial_direction,
                    state.direction,
                    state.colour.x,
                    state.colour.y,
                    state.colour.z,
                    state.colour.w,
                    if state.highlighted { " [highlighted]" } else { "" }
                ),
                Err(err) => warn!("{err}"),
            }
        }
    }

    /// Applies one message. Returns `false` when the driver should stop.
    fn update(&mut self, message: Message) -> HypercubeResult<bool> {
        match message {
            Message::Press(button) => self.puzzle.press(button)?,
            Message::Letters(from, to) => {
                let rotation = self.puzzle.enqueue_letter_rotation(from, to)?;
                info!("{from}{to} queued as internal rotation {rotation}");
            }
            Message::Indices(from, to) => self.puzzle.enqueue_rotation(from, to)?,
            Message::Tick(frames) => {
                let completed = self.tick(frames.unwrap_or(MAX_SETTLE_FRAMES));
                info!("{completed} rotations completed");
            }
            Message::Clear => {
                let discarded = self.puzzle.clear_queue()?;
                info!("Discarded {discarded} queued rotations");
            }
            Message::Faster => self.puzzle.accelerate(2.0)?,
            Message::Preview => {
                self.puzzle.toggle_preview_mode()?;
            }
            Message::Faces => self.log_faces(),
            Message::Submit => {
                self.tick(MAX_SETTLE_FRAMES);
                match self.puzzle.submit()? {
                    SubmissionOutcome::Solved => return Ok(false),
                    SubmissionOutcome::Strike => {
                        info!("Strikes so far: {}", self.puzzle.strikes());
                    }
                }
            }
            Message::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_arg<T: FromStr>(args: &[String], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("argument {index} ({raw:?}) is not valid")),
        None => Ok(default),
    }
}

fn parse_args() -> Result<(u64, PuzzleContext), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = parse_arg(&args, 0, fastrand::u64(..))?;
    let identifier = args.get(1).cloned().unwrap_or_else(|| "AB1CD2".to_string());
    let batteries = parse_arg(&args, 2, 0)?;
    let holders = parse_arg(&args, 3, 0)?;
    let ports = parse_arg(&args, 4, 0)?;
    Ok((seed, PuzzleContext::new(identifier, batteries, holders, ports)))
}

/// Entry point for the headless hypercube driver
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(buf, "[Orientation Hypercube #0] {}", record.args())
        })
        .init();

    let (seed, context) = match parse_args() {
        Ok(parsed) => parsed,
        Err(message) => {
            error!("{message}");
            eprintln!("usage: orientation-hypercube [seed] [identifier] [batteries] [holders] [ports]");
            return ExitCode::FAILURE;
        }
    };
    info!("Seed {seed}, identifier {}", context.identifier);

    let mut app = match HypercubeApp::new(&context, seed) {
        Ok(app) => app,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("failed to read stdin: {err}");
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let keep_going = line
            .parse::<Message>()
            .and_then(|message| app.update(message));
        match keep_going {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => warn!("{err}"),
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("Left".parse::<Message>(), Ok(Message::Press(Button::Left)));
        assert_eq!("xw".parse::<Message>(), Ok(Message::Letters('x', 'w')));
        assert_eq!("03".parse::<Message>(), Ok(Message::Indices(0, 3)));
        assert_eq!("tick 5".parse::<Message>(), Ok(Message::Tick(Some(5))));
        assert_eq!("tick".parse::<Message>(), Ok(Message::Tick(None)));
        assert!("tick many".parse::<Message>().is_err());
        assert!("spin".parse::<Message>().is_err());
    }

    #[test]
    fn submit_settles_the_engine_first() {
        let mut app = HypercubeApp::new(&PuzzleContext::new("XY", 2, 1, 1), 7).unwrap();
        app.update(Message::Indices(0, 1)).unwrap();
        app.update(Message::Indices(2, 3)).unwrap();
        let result = app.update(Message::Submit);
        assert!(result.is_ok());
        assert!(!app.puzzle.is_busy());
    }
}
