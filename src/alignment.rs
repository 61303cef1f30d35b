//! Alignment results and the builder that assembles them from traceback
//! events.

use std::fmt;
use std::ops::Range;

use crate::residue::Residue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentOperation {
    Match,
    Mismatch,
    /// Query residue aligned against a gap in the subject.
    Insertion,
    /// Subject residue aligned against a gap in the query.
    Deletion,
}

impl AlignmentOperation {
    /// Extended CIGAR code.
    pub fn cigar_code(self) -> char {
        match self {
            AlignmentOperation::Match => '=',
            AlignmentOperation::Mismatch => 'X',
            AlignmentOperation::Insertion => 'I',
            AlignmentOperation::Deletion => 'D',
        }
    }

    pub fn is_gap(self) -> bool {
        matches!(self, AlignmentOperation::Insertion | AlignmentOperation::Deletion)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

/// A half-open residue interval in a sequence's own coordinates, together
/// with the strand it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectedRange {
    pub begin: usize,
    pub end: usize,
    pub direction: Direction,
}

impl DirectedRange {
    pub fn forward(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            direction: Direction::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// The same residues addressed from the other strand of a sequence of
    /// length `sequence_len`. `None` if the range does not fit.
    pub fn reversed_within(&self, sequence_len: usize) -> Option<Self> {
        Some(Self {
            begin: sequence_len.checked_sub(self.end)?,
            end: sequence_len.checked_sub(self.begin)?,
            direction: match self.direction {
                Direction::Forward => Direction::Reverse,
                Direction::Reverse => Direction::Forward,
            },
        })
    }
}

/// Accumulates alignment events and produces an immutable [`Alignment`].
///
/// When created for traceback order the events are expected right to left
/// and are reversed by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct AlignmentBuilder<R: Residue> {
    query: Vec<R>,
    subject: Vec<R>,
    operations: Vec<AlignmentOperation>,
    built_from_traceback: bool,
    end: Option<(usize, usize)>,
    score: f32,
}

impl<R: Residue> AlignmentBuilder<R> {
    pub fn new(built_from_traceback: bool) -> Self {
        Self {
            query: Vec::new(),
            subject: Vec::new(),
            operations: Vec::new(),
            built_from_traceback,
            end: None,
            score: 0.0,
        }
    }

    pub fn add_match(&mut self, residue: R) -> &mut Self {
        self.push(residue, residue, AlignmentOperation::Match)
    }

    pub fn add_mismatch(&mut self, query: R, subject: R) -> &mut Self {
        self.push(query, subject, AlignmentOperation::Mismatch)
    }

    /// One of the two residues must be the alphabet's gap symbol.
    pub fn add_gap(&mut self, query: R, subject: R) -> &mut Self {
        let op = if query.is_gap() {
            AlignmentOperation::Deletion
        } else {
            AlignmentOperation::Insertion
        };
        self.push(query, subject, op)
    }

    /// Records the exclusive end of the aligned region in query and subject
    /// coordinates. Defaults to the number of residues consumed, i.e. an
    /// alignment that starts at the beginning of both sequences.
    pub fn set_alignment_offsets(&mut self, end_x: usize, end_y: usize) -> &mut Self {
        self.end = Some((end_x, end_y));
        self
    }

    pub fn set_score(&mut self, score: f32) -> &mut Self {
        self.score = score;
        self
    }

    fn push(&mut self, query: R, subject: R, op: AlignmentOperation) -> &mut Self {
        self.query.push(query);
        self.subject.push(subject);
        self.operations.push(op);
        self
    }

    pub fn build(self) -> Alignment<R> {
        let AlignmentBuilder {
            mut query,
            mut subject,
            mut operations,
            built_from_traceback,
            end,
            score,
        } = self;
        if built_from_traceback {
            query.reverse();
            subject.reverse();
            operations.reverse();
        }

        let query_consumed = query.iter().filter(|r| !r.is_gap()).count();
        let subject_consumed = subject.iter().filter(|r| !r.is_gap()).count();
        let (end_x, end_y) = end.unwrap_or((query_consumed, subject_consumed));

        let mut matches = 0;
        let mut mismatches = 0;
        let mut gap_openings = 0;
        let mut previous = None;
        for &op in &operations {
            match op {
                AlignmentOperation::Match => matches += 1,
                AlignmentOperation::Mismatch => mismatches += 1,
                AlignmentOperation::Insertion | AlignmentOperation::Deletion => {
                    if previous != Some(op) {
                        gap_openings += 1;
                    }
                }
            }
            previous = Some(op);
        }

        Alignment {
            query,
            subject,
            operations,
            query_range: DirectedRange::forward(end_x.saturating_sub(query_consumed), end_x),
            subject_range: DirectedRange::forward(end_y.saturating_sub(subject_consumed), end_y),
            matches,
            mismatches,
            gap_openings,
            score,
        }
    }
}

/// An immutable pairwise alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<R: Residue> {
    query: Vec<R>,
    subject: Vec<R>,
    operations: Vec<AlignmentOperation>,
    query_range: DirectedRange,
    subject_range: DirectedRange,
    matches: usize,
    mismatches: usize,
    gap_openings: usize,
    score: f32,
}

impl<R: Residue> Alignment<R> {
    /// Gapped query, same length as [`subject_alignment`](Self::subject_alignment).
    pub fn query_alignment(&self) -> &[R] {
        &self.query
    }

    pub fn subject_alignment(&self) -> &[R] {
        &self.subject
    }

    pub fn gapped_query_string(&self) -> String {
        self.query.iter().map(|r| r.symbol()).collect()
    }

    pub fn gapped_subject_string(&self) -> String {
        self.subject.iter().map(|r| r.symbol()).collect()
    }

    pub fn operations(&self) -> &[AlignmentOperation] {
        &self.operations
    }

    pub fn query_range(&self) -> DirectedRange {
        self.query_range
    }

    pub fn subject_range(&self) -> DirectedRange {
        self.subject_range
    }

    /// Number of alignment columns: matches + mismatches + gap symbols.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    /// Number of contiguous gap runs. A run in the query directly followed
    /// by a run in the subject counts twice.
    pub fn gap_openings(&self) -> usize {
        self.gap_openings
    }

    /// Total number of gap symbols on both sides.
    pub fn gap_positions(&self) -> usize {
        self.len() - self.matches - self.mismatches
    }

    /// Matches as a percentage of the alignment length, 0 when empty.
    pub fn percent_identity(&self) -> f32 {
        if self.operations.is_empty() {
            return 0.0;
        }
        self.matches as f32 / self.operations.len() as f32 * 100.0
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Run-length encoded operations, e.g. `1=1I5=1D1=`.
    pub fn cigar(&self) -> String {
        let mut cigar = String::new();
        let mut ops = self.operations.iter().peekable();
        while let Some(&op) = ops.next() {
            let mut run = 1;
            while ops.peek() == Some(&&op) {
                ops.next();
                run += 1;
            }
            cigar.push_str(&run.to_string());
            cigar.push(op.cigar_code());
        }
        cigar
    }
}

impl<R: Residue> fmt::Display for Alignment<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markers: String = self
            .operations
            .iter()
            .map(|op| match op {
                AlignmentOperation::Match => '|',
                AlignmentOperation::Mismatch => '.',
                _ => ' ',
            })
            .collect();
        let width = self.query_range.end.max(self.subject_range.end).to_string().len();
        writeln!(
            f,
            "Query   {:>w$} {} {}",
            self.query_range.begin + 1,
            self.gapped_query_string(),
            self.query_range.end,
            w = width
        )?;
        writeln!(f, "        {:>w$} {}", "", markers, w = width)?;
        write!(
            f,
            "Subject {:>w$} {} {}",
            self.subject_range.begin + 1,
            self.gapped_subject_string(),
            self.subject_range.end,
            w = width
        )
    }
}
