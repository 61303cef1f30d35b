//! Gotoh dynamic-programming core shared by every alphabet and both
//! alignment flavours.
//!
//! The full traceback matrix is kept; scores and gap states only ever need
//! the previous and the current row, so those are two rolling rows that are
//! copied over (not reallocated) once a row is complete.

use bitvec::prelude::*;

use crate::alignment::Alignment;
use crate::alignment_mode::{AlignmentSemantics, StartPoint};
use crate::policy::ResidueAlignmentPolicy;
use crate::residue::Residue;
use crate::scoring::ScoringMatrix;
use crate::traceback::{TracebackDirection, TracebackMatrix};
use crate::{AlignerError, Result};

pub(crate) struct PairwiseAlignmentEngine {
    traceback: TracebackMatrix,
    previous_scores: Vec<f32>,
    current_scores: Vec<f32>,
    previous_vertical_gap: BitVec,
    current_vertical_gap: BitVec,
    // horizontal gaps only look left within the row being filled
    horizontal_gap: BitVec,
}

impl PairwiseAlignmentEngine {
    pub(crate) fn new(query_len: usize, subject_len: usize) -> Result<Self> {
        let rows = query_len + 1;
        let cols = subject_len + 1;
        if rows.checked_mul(cols).is_none() {
            return Err(AlignerError::InvalidArgument(format!(
                "traceback matrix of {} x {} cells does not fit in memory",
                rows, cols
            )));
        }
        Ok(Self {
            traceback: TracebackMatrix::new(rows, cols),
            previous_scores: vec![0.0; cols],
            current_scores: vec![0.0; cols],
            previous_vertical_gap: bitvec![0; cols],
            current_vertical_gap: bitvec![0; cols],
            horizontal_gap: bitvec![0; cols],
        })
    }

    /// Fills the traceback matrix and returns the start point chosen by
    /// `semantics`.
    pub(crate) fn fill<R: Residue, S: AlignmentSemantics>(
        &mut self,
        semantics: &S,
        query: &[R],
        subject: &[R],
        matrix: &ScoringMatrix<R>,
        gap_open: f32,
        gap_extend: f32,
    ) -> StartPoint {
        let Self {
            traceback,
            previous_scores: prev,
            current_scores: cur,
            previous_vertical_gap: prev_vertical,
            current_vertical_gap: cur_vertical,
            horizontal_gap,
        } = self;
        let rows = query.len();
        let cols = subject.len();

        for j in 0..=cols {
            prev[j] = semantics.initial_gap_cost(j, gap_open, gap_extend);
            if j > 0 {
                traceback.set(0, j, semantics.row_boundary());
            }
        }
        for i in 1..=rows {
            traceback.set(i, 0, semantics.column_boundary());
        }
        prev_vertical.fill(false);

        let mut start = semantics.initial_start_point(rows, cols, gap_open, gap_extend);

        for i in 1..=rows {
            let q = query[i - 1];
            cur[0] = semantics.initial_gap_cost(i, gap_open, gap_extend);
            cur_vertical.set(0, false);
            horizontal_gap.set(0, false);

            for j in 1..=cols {
                let diagonal = prev[j - 1] + matrix.score(q, subject[j - 1]);

                let vertical_extend = if prev_vertical[j] {
                    prev[j] + gap_extend
                } else {
                    f32::NEG_INFINITY
                };
                let vertical = vertical_extend.max(prev[j] + gap_open);

                let horizontal_extend = if horizontal_gap[j - 1] {
                    cur[j - 1] + gap_extend
                } else {
                    f32::NEG_INFINITY
                };
                let horizontal = horizontal_extend.max(cur[j - 1] + gap_open);

                let (score, direction) = semantics.resolve(diagonal, horizontal, vertical);
                cur[j] = score;
                traceback.set(i, j, direction);
                cur_vertical.set(j, direction == TracebackDirection::Vertical);
                horizontal_gap.set(j, direction == TracebackDirection::Horizontal);

                semantics.update_start_point(&mut start, i, j, score);
            }

            prev.copy_from_slice(&cur[..]);
            prev_vertical.copy_from_bitslice(cur_vertical.as_bitslice());
        }

        start
    }

    pub(crate) fn traceback(&self) -> &TracebackMatrix {
        &self.traceback
    }
}

/// Runs one complete alignment: fill, start-point selection, traceback.
pub(crate) fn align<P, S>(
    policy: &P,
    semantics: &S,
    query: &[P::Residue],
    subject: &[P::Residue],
    matrix: &ScoringMatrix<P::Residue>,
    gap_open: f32,
    gap_extend: f32,
) -> Result<Alignment<P::Residue>>
where
    P: ResidueAlignmentPolicy,
    S: AlignmentSemantics,
{
    log::debug!(
        "{} alignment of {} x {} {} residues",
        S::MODE,
        query.len(),
        subject.len(),
        <P::Residue as Residue>::ALPHABET
    );

    let mut engine = PairwiseAlignmentEngine::new(query.len(), subject.len())?;
    let start = engine.fill(semantics, query, subject, matrix, gap_open, gap_extend);
    log::debug!("Traceback starts at ({}, {}) with score {}", start.row, start.col, start.score);

    let mut builder = policy.create_builder(true);
    engine.traceback().walk(query, subject, start.row, start.col, &mut builder);
    builder.set_alignment_offsets(start.row, start.col).set_score(start.score);
    Ok(builder.build())
}
