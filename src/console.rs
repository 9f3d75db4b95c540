//! Interactive text session: read a grid size, then answer sample queries
//! until the input runs out.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{NoiseError, Result};
use crate::grid::{Dimensions, GradientGrid};

pub const SIZE_PROMPT: &str =
    "Enter two positive integers representing the width and height of the noise grid: ";
pub const POINT_PROMPT: &str = "Enter the target position within the bounds of the grid: ";
pub const DIMENSION_ERROR: &str = "Error: grid dimensions must be positive values.";
pub const RANGE_ERROR: &str = "Error: target position must be within the bounds of the grid.";

/// Whitespace separated tokens pulled lazily from a line reader.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    /// Next token parsed as `T`. End of input and parse failures both give
    /// `None`.
    pub fn next_value<T: FromStr>(&mut self) -> Result<Option<T>> {
        Ok(self.next_token()?.and_then(|token| token.parse().ok()))
    }

    /// Two values in a row, or `None` if either is missing or malformed.
    pub fn next_pair<T: FromStr>(&mut self) -> Result<Option<(T, T)>> {
        let Some(a) = self.next_value()? else {
            return Ok(None);
        };
        Ok(self.next_value()?.map(|b| (a, b)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub rejected: usize,
}

/// Reads dimension input and validates it. Missing or malformed numbers
/// count as invalid dimensions.
pub fn read_dimensions<R: BufRead>(tokens: &mut Tokens<R>) -> Result<Dimensions> {
    let (width, height) = tokens.next_pair::<i64>()?.unwrap_or((-1, -1));
    Dimensions::new(width, height)
}

/// Answers sample queries against an already built grid.
pub struct Session<'a, W, E> {
    grid: &'a GradientGrid,
    out: W,
    err: E,
    summary: SessionSummary,
}

impl<'a, W: Write, E: Write> Session<'a, W, E> {
    pub fn new(grid: &'a GradientGrid, out: W, err: E) -> Self {
        Self {
            grid,
            out,
            err,
            summary: SessionSummary::default(),
        }
    }

    /// Handles one query, printing either the noise value or the range error.
    pub fn answer(&mut self, x: f32, y: f32) -> Result<Option<f32>> {
        match self.grid.dimensions().check_point(x, y) {
            Ok(()) => {
                let noise = self.grid.sample(x, y);
                writeln!(self.out, "Noise: {noise}")?;
                self.summary.answered += 1;
                Ok(Some(noise))
            }
            Err(NoiseError::OutOfRange { .. }) => {
                writeln!(self.err, "{RANGE_ERROR}")?;
                self.summary.rejected += 1;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{POINT_PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Query loop; stops at end of input or at the first malformed pair.
    pub fn serve<R: BufRead>(mut self, tokens: &mut Tokens<R>) -> Result<SessionSummary> {
        self.prompt()?;
        while let Some((x, y)) = tokens.next_pair::<f32>()? {
            self.answer(x, y)?;
            self.prompt()?;
        }
        log::debug!(
            "session finished: {} answered, {} rejected",
            self.summary.answered,
            self.summary.rejected
        );
        Ok(self.summary)
    }
}

/// Runs a full session. The grid uses `seed` when given and the clock
/// otherwise. Invalid dimensions are reported on `err` and returned.
pub fn run<R: BufRead, W: Write, E: Write>(
    input: R,
    mut out: W,
    mut err: E,
    seed: Option<u64>,
) -> Result<SessionSummary> {
    let mut tokens = Tokens::new(input);
    write!(out, "{SIZE_PROMPT}")?;
    out.flush()?;

    let dims = match read_dimensions(&mut tokens) {
        Ok(dims) => dims,
        Err(e) => {
            writeln!(err, "{DIMENSION_ERROR}")?;
            return Err(e);
        }
    };
    let grid = match seed {
        Some(seed) => GradientGrid::with_seed(dims, seed),
        None => GradientGrid::build(dims),
    };
    writeln!(out)?;

    Session::new(&grid, out, err).serve(&mut tokens)
}
