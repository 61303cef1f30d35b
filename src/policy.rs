//! Per-alphabet alignment strategies.
//!
//! A policy is resolved once per alignment through generics; nothing in the
//! fill loop dispatches on it.

use crate::alignment::AlignmentBuilder;
use crate::residue::{AminoAcid, Nucleotide, Residue};
use crate::{AlignerError, Result};

pub trait ResidueAlignmentPolicy {
    type Residue: Residue;

    /// All residues of the alphabet; the index of each is its ordinal.
    fn residues(&self) -> &'static [Self::Residue] {
        <Self::Residue as Residue>::VALUES
    }

    fn gap(&self) -> Self::Residue {
        <Self::Residue as Residue>::GAP
    }

    /// Decodes raw ordinals back into residues.
    fn decode(&self, ordinals: &[u8]) -> Result<Vec<Self::Residue>> {
        let residues = self.residues();
        ordinals
            .iter()
            .map(|&ordinal| {
                residues.get(ordinal as usize).copied().ok_or_else(|| AlignerError::InvalidResidue {
                    symbol: format!("ordinal {}", ordinal),
                    alphabet: <Self::Residue as Residue>::ALPHABET,
                })
            })
            .collect()
    }

    /// `built_from_traceback` tells the builder that events will arrive
    /// right to left and must be reversed before finalizing.
    fn create_builder(&self, built_from_traceback: bool) -> AlignmentBuilder<Self::Residue> {
        AlignmentBuilder::new(built_from_traceback)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NucleotideAlignmentPolicy;

impl ResidueAlignmentPolicy for NucleotideAlignmentPolicy {
    type Residue = Nucleotide;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AminoAcidAlignmentPolicy;

impl ResidueAlignmentPolicy for AminoAcidAlignmentPolicy {
    type Residue = AminoAcid;
}

pub static NUCLEOTIDE_POLICY: NucleotideAlignmentPolicy = NucleotideAlignmentPolicy;
pub static AMINO_ACID_POLICY: AminoAcidAlignmentPolicy = AminoAcidAlignmentPolicy;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ordinals() {
        let decoded = NUCLEOTIDE_POLICY.decode(&[1, 2, 3, 4, 0, 15]).unwrap();
        assert_eq!(
            decoded,
            vec![Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T, Nucleotide::Gap, Nucleotide::Unknown]
        );
        assert!(NUCLEOTIDE_POLICY.decode(&[16]).is_err());
        assert_eq!(AMINO_ACID_POLICY.decode(&[18]).unwrap(), vec![AminoAcid::Tryptophan]);
    }

    #[test]
    fn test_gap_and_residues() {
        assert_eq!(NUCLEOTIDE_POLICY.gap(), Nucleotide::Gap);
        assert_eq!(AMINO_ACID_POLICY.gap(), AminoAcid::Gap);
        assert_eq!(NUCLEOTIDE_POLICY.residues().len(), 16);
        assert_eq!(AMINO_ACID_POLICY.residues()[AminoAcid::Stop.ordinal()], AminoAcid::Stop);
    }

    #[test]
    fn test_builder_factory_respects_order() {
        let mut builder = NUCLEOTIDE_POLICY.create_builder(true);
        builder.add_match(Nucleotide::A).add_mismatch(Nucleotide::C, Nucleotide::T);
        assert_eq!(builder.build().gapped_query_string(), "CA");

        let mut builder = NUCLEOTIDE_POLICY.create_builder(false);
        builder.add_match(Nucleotide::A).add_mismatch(Nucleotide::C, Nucleotide::T);
        assert_eq!(builder.build().gapped_query_string(), "AC");
    }
}
