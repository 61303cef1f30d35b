use crate::alignment::Alignment;
use crate::alignment_mode::{AlignmentMode, AlignmentParams, NeedlemanWunsch, SmithWaterman};
use crate::engine;
use crate::policy::{AminoAcidAlignmentPolicy, NucleotideAlignmentPolicy, ResidueAlignmentPolicy};
use crate::residue::Residue;
use crate::scoring::ScoringMatrix;
use crate::{AlignerError, Result};

/// A single-use aligner: the alignment is computed eagerly by
/// [`new`](Self::new) and never changes afterwards.
#[derive(Debug, Clone)]
pub struct PairwiseSequenceAligner<P: ResidueAlignmentPolicy> {
    params: AlignmentParams,
    alignment: Alignment<P::Residue>,
}

pub type NucleotidePairwiseAligner = PairwiseSequenceAligner<NucleotideAlignmentPolicy>;
pub type AminoAcidPairwiseAligner = PairwiseSequenceAligner<AminoAcidAlignmentPolicy>;

impl<P: ResidueAlignmentPolicy> PairwiseSequenceAligner<P> {
    pub fn new(
        policy: &P,
        query: &[P::Residue],
        subject: &[P::Residue],
        matrix: &ScoringMatrix<P::Residue>,
        params: AlignmentParams,
    ) -> Result<Self> {
        params.validate()?;
        reject_gaps("query", query)?;
        reject_gaps("subject", subject)?;
        let alignment = match params.mode {
            AlignmentMode::Global => {
                engine::align(policy, &NeedlemanWunsch, query, subject, matrix, params.gap_open, params.gap_extend)?
            }
            AlignmentMode::Local => {
                engine::align(policy, &SmithWaterman, query, subject, matrix, params.gap_open, params.gap_extend)?
            }
        };
        Ok(Self { params, alignment })
    }

    pub fn alignment(&self) -> &Alignment<P::Residue> {
        &self.alignment
    }

    pub fn into_alignment(self) -> Alignment<P::Residue> {
        self.alignment
    }

    pub fn score(&self) -> f32 {
        self.alignment.score()
    }

    pub fn percent_identity(&self) -> f32 {
        self.alignment.percent_identity()
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }
}

fn reject_gaps<R: Residue>(name: &str, residues: &[R]) -> Result<()> {
    match residues.iter().position(|r| r.is_gap()) {
        Some(position) => Err(AlignerError::InvalidArgument(format!(
            "{} contains a gap symbol at position {}",
            name, position
        ))),
        None => Ok(()),
    }
}

impl<P: ResidueAlignmentPolicy + Default> PairwiseSequenceAligner<P> {
    /// Needleman-Wunsch alignment of `query` against `subject`.
    pub fn global(
        query: &[P::Residue],
        subject: &[P::Residue],
        matrix: &ScoringMatrix<P::Residue>,
        gap_open: f32,
        gap_extend: f32,
    ) -> Result<Self> {
        let params = AlignmentParams::new(AlignmentMode::Global, gap_open, gap_extend);
        Self::new(&P::default(), query, subject, matrix, params)
    }

    /// Smith-Waterman alignment of `query` against `subject`.
    pub fn local(
        query: &[P::Residue],
        subject: &[P::Residue],
        matrix: &ScoringMatrix<P::Residue>,
        gap_open: f32,
        gap_extend: f32,
    ) -> Result<Self> {
        let params = AlignmentParams::new(AlignmentMode::Local, gap_open, gap_extend);
        Self::new(&P::default(), query, subject, matrix, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::NUCLEOTIDE_POLICY;
    use crate::residue::Nucleotide;
    use crate::sequence::Sequence;

    #[test]
    fn test_rejects_positive_penalties() {
        let q: Sequence<Nucleotide> = "ACGT".parse().unwrap();
        let matrix = ScoringMatrix::match_mismatch(1.0, -1.0);
        let err = NucleotidePairwiseAligner::global(&q, &q, &matrix, 2.0, -1.0).unwrap_err();
        assert!(matches!(err, AlignerError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_gapped_input() {
        let gapped: Sequence<Nucleotide> = "AC-GT".parse().unwrap();
        let plain: Sequence<Nucleotide> = "ACGT".parse().unwrap();
        let matrix = ScoringMatrix::match_mismatch(1.0, -1.0);

        let err = NucleotidePairwiseAligner::global(&gapped, &plain, &matrix, -2.0, -1.0).unwrap_err();
        assert!(matches!(err, AlignerError::InvalidArgument(ref m) if m.contains("query") && m.contains("position 2")));
        let err = NucleotidePairwiseAligner::local(&plain, &gapped, &matrix, -2.0, -1.0).unwrap_err();
        assert!(matches!(err, AlignerError::InvalidArgument(ref m) if m.contains("subject")));

        let aligner = NucleotidePairwiseAligner::global(&gapped.ungapped(), &plain, &matrix, -2.0, -1.0).unwrap();
        assert_eq!(aligner.alignment().query_range().range(), 0..4);
    }

    #[test]
    fn test_new_with_params() {
        let q: Sequence<Nucleotide> = "TTACGTT".parse().unwrap();
        let s: Sequence<Nucleotide> = "ACG".parse().unwrap();
        let matrix = ScoringMatrix::match_mismatch(2.0, -3.0);
        let params = AlignmentParams::default().with_mode(AlignmentMode::Local);
        let aligner = PairwiseSequenceAligner::new(&NUCLEOTIDE_POLICY, &q, &s, &matrix, params).unwrap();

        assert_eq!(aligner.params().mode, AlignmentMode::Local);
        assert_eq!(aligner.score(), 6.0);
        assert_eq!(aligner.percent_identity(), 100.0);
        assert_eq!(aligner.alignment().query_range().range(), 2..5);
        assert_eq!(aligner.into_alignment().gapped_query_string(), "ACG");
    }
}
