use crate::alignment::AlignmentBuilder;
use crate::residue::Residue;

/// Which neighbour produced the optimal score of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TracebackDirection {
    #[default]
    Terminal,
    /// Consumes a subject residue against a gap in the query.
    Horizontal,
    /// Consumes a query residue against a gap in the subject.
    Vertical,
    Diagonal,
}

/// Full `(query + 1) x (subject + 1)` matrix of traceback labels.
///
/// This is the dominant memory cost of an alignment: one byte per cell,
/// kept until the path has been reconstructed.
#[derive(Debug, Clone)]
pub struct TracebackMatrix {
    data: Vec<TracebackDirection>,
    rows: usize,
    cols: usize,
}

impl TracebackMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![TracebackDirection::Terminal; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: TracebackDirection) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> TracebackDirection {
        self.data[row * self.cols + col]
    }

    /// Walks back from `(row, col)` until a terminal cell, feeding every
    /// step into `builder` in right-to-left order. Returns the cell the
    /// walk stopped at.
    pub(crate) fn walk<R: Residue>(
        &self,
        query: &[R],
        subject: &[R],
        row: usize,
        col: usize,
        builder: &mut AlignmentBuilder<R>,
    ) -> (usize, usize) {
        let (mut x, mut y) = (row, col);
        loop {
            match self.get(x, y) {
                TracebackDirection::Terminal => break,
                TracebackDirection::Diagonal => {
                    let (q, s) = (query[x - 1], subject[y - 1]);
                    if q == s {
                        builder.add_match(q);
                    } else {
                        builder.add_mismatch(q, s);
                    }
                    x -= 1;
                    y -= 1;
                }
                TracebackDirection::Horizontal => {
                    builder.add_gap(R::GAP, subject[y - 1]);
                    y -= 1;
                }
                TracebackDirection::Vertical => {
                    builder.add_gap(query[x - 1], R::GAP);
                    x -= 1;
                }
            }
        }
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::Nucleotide;
    use crate::sequence::Sequence;

    #[test]
    fn test_new_matrix_is_terminal() {
        let matrix = TracebackMatrix::new(3, 4);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 4);
        assert_eq!(matrix.get(0, 0), TracebackDirection::Terminal);
        assert_eq!(matrix.get(2, 3), TracebackDirection::Terminal);
    }

    #[test]
    fn test_walk_emits_events_right_to_left() {
        let query: Sequence<Nucleotide> = "AC".parse().unwrap();
        let subject: Sequence<Nucleotide> = "AGT".parse().unwrap();

        // A C -      path: (2,3) H -> (2,2) D -> (1,1) D -> (0,0)
        // A G T
        let mut matrix = TracebackMatrix::new(3, 4);
        matrix.set(2, 3, TracebackDirection::Horizontal);
        matrix.set(2, 2, TracebackDirection::Diagonal);
        matrix.set(1, 1, TracebackDirection::Diagonal);

        let mut builder = AlignmentBuilder::new(true);
        let stop = matrix.walk(&query, &subject, 2, 3, &mut builder);
        assert_eq!(stop, (0, 0));

        builder.set_alignment_offsets(2, 3);
        let alignment = builder.build();
        assert_eq!(alignment.gapped_query_string(), "AC-");
        assert_eq!(alignment.gapped_subject_string(), "AGT");
        assert_eq!(alignment.mismatches(), 1);
        assert_eq!(alignment.gap_openings(), 1);
    }
}
