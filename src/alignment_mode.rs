use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::traceback::TracebackDirection;
use crate::{AlignerError, Result, DNA_GAP_EXT, DNA_GAP_OPEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    #[default]
    Global, // Needleman-Wunsch
    Local,  // Smith-Waterman
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentMode::Global => write!(f, "global"),
            AlignmentMode::Local => write!(f, "local"),
        }
    }
}

impl FromStr for AlignmentMode {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "global" | "nw" | "needleman-wunsch" => Ok(AlignmentMode::Global),
            "local" | "sw" | "smith-waterman" => Ok(AlignmentMode::Local),
            other => Err(AlignerError::InvalidArgument(format!("unknown alignment mode {:?}", other))),
        }
    }
}

/// Gap penalties and mode of one alignment. Penalties are added to running
/// scores, so both must be `<= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentParams {
    pub mode: AlignmentMode,
    pub gap_open: f32,
    pub gap_extend: f32,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Global,
            gap_open: DNA_GAP_OPEN,
            gap_extend: DNA_GAP_EXT,
        }
    }
}

impl AlignmentParams {
    pub fn new(mode: AlignmentMode, gap_open: f32, gap_extend: f32) -> Self {
        Self {
            mode,
            gap_open,
            gap_extend,
        }
    }

    pub fn with_mode(mut self, mode: AlignmentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_gap_penalties(mut self, gap_open: f32, gap_extend: f32) -> Self {
        self.gap_open = gap_open;
        self.gap_extend = gap_extend;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("gap open", self.gap_open), ("gap extend", self.gap_extend)] {
            if !value.is_finite() {
                return Err(AlignerError::InvalidArgument(format!("{} penalty must be finite, got {}", name, value)));
            }
            if value > 0.0 {
                return Err(AlignerError::InvalidArgument(format!(
                    "{} penalty must be <= 0 (penalties are added), got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Cell at which traceback begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartPoint {
    pub row: usize,
    pub col: usize,
    pub score: f32,
}

/// Boundary conditions, tie-breaking and start-point selection of an
/// alignment flavour. The engine is generic over this trait so each
/// flavour gets its own monomorphized fill loop.
pub trait AlignmentSemantics {
    const MODE: AlignmentMode;

    /// Label of row 0 cells with column > 0.
    fn row_boundary(&self) -> TracebackDirection;

    /// Label of column 0 cells with row > 0.
    fn column_boundary(&self) -> TracebackDirection;

    /// Score of the boundary cell `k` positions away from the origin.
    fn initial_gap_cost(&self, k: usize, gap_open: f32, gap_extend: f32) -> f32;

    /// Picks the cell score and its label from the three candidates.
    fn resolve(&self, diagonal: f32, horizontal: f32, vertical: f32) -> (f32, TracebackDirection);

    /// Start point before any interior cell has been scored.
    fn initial_start_point(&self, rows: usize, cols: usize, gap_open: f32, gap_extend: f32) -> StartPoint;

    fn update_start_point(&self, current: &mut StartPoint, row: usize, col: usize, score: f32);
}

#[inline(always)]
fn best_of(diagonal: f32, horizontal: f32, vertical: f32) -> (f32, TracebackDirection) {
    // Diagonal > Horizontal > Vertical on ties
    let mut best = (diagonal, TracebackDirection::Diagonal);
    if horizontal > best.0 {
        best = (horizontal, TracebackDirection::Horizontal);
    }
    if vertical > best.0 {
        best = (vertical, TracebackDirection::Vertical);
    }
    best
}

/// Global alignment: both sequences are consumed end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedlemanWunsch;

impl AlignmentSemantics for NeedlemanWunsch {
    const MODE: AlignmentMode = AlignmentMode::Global;

    fn row_boundary(&self) -> TracebackDirection {
        TracebackDirection::Horizontal
    }

    fn column_boundary(&self) -> TracebackDirection {
        TracebackDirection::Vertical
    }

    fn initial_gap_cost(&self, k: usize, gap_open: f32, gap_extend: f32) -> f32 {
        match k {
            0 => 0.0,
            _ => gap_open + (k - 1) as f32 * gap_extend,
        }
    }

    #[inline(always)]
    fn resolve(&self, diagonal: f32, horizontal: f32, vertical: f32) -> (f32, TracebackDirection) {
        best_of(diagonal, horizontal, vertical)
    }

    fn initial_start_point(&self, rows: usize, cols: usize, gap_open: f32, gap_extend: f32) -> StartPoint {
        // Only survives when one of the sequences is empty; otherwise the
        // last interior cell overwrites it.
        let score = match (rows, cols) {
            (0, k) | (k, 0) => self.initial_gap_cost(k, gap_open, gap_extend),
            _ => f32::NEG_INFINITY,
        };
        StartPoint {
            row: rows,
            col: cols,
            score,
        }
    }

    #[inline(always)]
    fn update_start_point(&self, current: &mut StartPoint, row: usize, col: usize, score: f32) {
        // row-major scan: the last cell visited is the bottom-right corner
        *current = StartPoint { row, col, score };
    }
}

/// Local alignment: the best-scoring pair of substrings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmithWaterman;

impl AlignmentSemantics for SmithWaterman {
    const MODE: AlignmentMode = AlignmentMode::Local;

    fn row_boundary(&self) -> TracebackDirection {
        TracebackDirection::Terminal
    }

    fn column_boundary(&self) -> TracebackDirection {
        TracebackDirection::Terminal
    }

    fn initial_gap_cost(&self, _k: usize, _gap_open: f32, _gap_extend: f32) -> f32 {
        0.0
    }

    #[inline(always)]
    fn resolve(&self, diagonal: f32, horizontal: f32, vertical: f32) -> (f32, TracebackDirection) {
        let best = best_of(diagonal, horizontal, vertical);
        if best.0 > 0.0 {
            best
        } else {
            (0.0, TracebackDirection::Terminal)
        }
    }

    fn initial_start_point(&self, _rows: usize, _cols: usize, _gap_open: f32, _gap_extend: f32) -> StartPoint {
        StartPoint {
            row: 0,
            col: 0,
            score: 0.0,
        }
    }

    #[inline(always)]
    fn update_start_point(&self, current: &mut StartPoint, row: usize, col: usize, score: f32) {
        // strictly greater: the first cell seen with the best score wins
        if score > current.score {
            *current = StartPoint { row, col, score };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_tie_break_priority() {
        let nw = NeedlemanWunsch;
        assert_eq!(nw.resolve(1.0, 1.0, 1.0), (1.0, TracebackDirection::Diagonal));
        assert_eq!(nw.resolve(0.0, 2.0, 2.0), (2.0, TracebackDirection::Horizontal));
        assert_eq!(nw.resolve(0.0, 1.0, 2.0), (2.0, TracebackDirection::Vertical));
        assert_eq!(nw.resolve(-3.0, -5.0, -4.0), (-3.0, TracebackDirection::Diagonal));
    }

    #[test]
    fn test_local_score_floor() {
        let sw = SmithWaterman;
        assert_eq!(sw.resolve(-1.0, -2.0, f32::NEG_INFINITY), (0.0, TracebackDirection::Terminal));
        assert_eq!(sw.resolve(0.0, -1.0, -1.0), (0.0, TracebackDirection::Terminal));
        assert_eq!(sw.resolve(-1.0, 3.0, 3.0), (3.0, TracebackDirection::Horizontal));
    }

    #[test]
    fn test_global_boundary_costs() {
        let nw = NeedlemanWunsch;
        assert_eq!(nw.initial_gap_cost(0, -5.0, -2.0), 0.0);
        assert_eq!(nw.initial_gap_cost(1, -5.0, -2.0), -5.0);
        assert_eq!(nw.initial_gap_cost(4, -5.0, -2.0), -11.0);
        assert_eq!(SmithWaterman.initial_gap_cost(4, -5.0, -2.0), 0.0);
    }

    #[test]
    fn test_local_start_point_first_seen_wins() {
        let sw = SmithWaterman;
        let mut start = sw.initial_start_point(5, 5, -1.0, -1.0);
        sw.update_start_point(&mut start, 1, 1, 2.0);
        sw.update_start_point(&mut start, 2, 3, 2.0);
        assert_eq!((start.row, start.col), (1, 1));
        sw.update_start_point(&mut start, 4, 4, 3.0);
        assert_eq!((start.row, start.col, start.score), (4, 4, 3.0));
    }

    #[test]
    fn test_global_start_point_for_empty_dimension() {
        let nw = NeedlemanWunsch;
        let start = nw.initial_start_point(0, 3, -2.0, -1.0);
        assert_eq!((start.row, start.col, start.score), (0, 3, -4.0));
        let start = nw.initial_start_point(0, 0, -2.0, -1.0);
        assert_eq!(start.score, 0.0);
    }

    #[test]
    fn test_params_validation() {
        assert!(AlignmentParams::default().validate().is_ok());
        assert!(AlignmentParams::new(AlignmentMode::Local, 0.0, 0.0).validate().is_ok());
        assert!(AlignmentParams::default().with_gap_penalties(2.0, -1.0).validate().is_err());
        assert!(AlignmentParams::default().with_gap_penalties(-2.0, 0.5).validate().is_err());
        assert!(AlignmentParams::default().with_gap_penalties(f32::NAN, -1.0).validate().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Local".parse::<AlignmentMode>().unwrap(), AlignmentMode::Local);
        assert_eq!("nw".parse::<AlignmentMode>().unwrap(), AlignmentMode::Global);
        assert!("semi".parse::<AlignmentMode>().is_err());
        assert_eq!(AlignmentMode::Local.to_string(), "local");
    }
}
