//! Pairwise sequence alignment with affine gap penalties.
//!
//! Global (Needleman-Wunsch) and local (Smith-Waterman) alignment share a
//! single dynamic-programming core. The residue alphabet and the alignment
//! semantics are both resolved through generics before the fill loop runs.
//!
//! ```
//! use affine_aligner::{NucleotidePairwiseAligner, NucleotideScoringMatrixBuilder, Sequence};
//!
//! let query: Sequence<_> = "ACGT".parse().unwrap();
//! let subject: Sequence<_> = "ACGT".parse().unwrap();
//! let matrix = NucleotideScoringMatrixBuilder::new(-1.0).set_match(1.0).build();
//!
//! let aligner = NucleotidePairwiseAligner::global(&query, &subject, &matrix, -2.0, -1.0).unwrap();
//! assert_eq!(aligner.score(), 4.0);
//! assert_eq!(aligner.alignment().gapped_query_string(), "ACGT");
//! ```

use thiserror::Error;

pub mod aligner;
pub mod alignment;
pub mod alignment_mode;
pub mod config;
mod engine;
pub mod policy;
pub mod residue;
pub mod scoring;
pub mod sequence;
pub mod traceback;

pub use crate::aligner::{AminoAcidPairwiseAligner, NucleotidePairwiseAligner, PairwiseSequenceAligner};
pub use crate::alignment::{Alignment, AlignmentBuilder, AlignmentOperation, Direction, DirectedRange};
pub use crate::alignment_mode::{
    AlignmentMode, AlignmentParams, AlignmentSemantics, NeedlemanWunsch, SmithWaterman, StartPoint,
};
pub use crate::config::AlignerConfig;
pub use crate::policy::{
    AminoAcidAlignmentPolicy, NucleotideAlignmentPolicy, ResidueAlignmentPolicy, AMINO_ACID_POLICY,
    NUCLEOTIDE_POLICY,
};
pub use crate::residue::{AminoAcid, Nucleotide, Residue};
pub use crate::scoring::{AminoAcidMatrixLoader, NucleotideScoringMatrixBuilder, ScoringMatrix};
pub use crate::sequence::Sequence;
pub use crate::traceback::{TracebackDirection, TracebackMatrix};

// DNA scoring defaults
pub const DNA_MATCH: f32 = 1.0;
pub const DNA_MISMATCH: f32 = -3.0;
pub const DNA_AMBIGUITY: f32 = 0.0;
pub const DNA_GAP_OPEN: f32 = -5.0;
pub const DNA_GAP_EXT: f32 = -2.0;

// Protein defaults, paired with BLOSUM62
pub const PROTEIN_GAP_OPEN: f32 = -11.0;
pub const PROTEIN_GAP_EXT: f32 = -1.0;

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid {alphabet} residue: {symbol:?}")]
    InvalidResidue { symbol: String, alphabet: &'static str },
    #[error("Scoring matrix parse error on line {line}: {message}")]
    MatrixParse { line: usize, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AlignerError>;
