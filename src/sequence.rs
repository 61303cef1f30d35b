use std::fmt;
use std::ops::{Deref, Index};
use std::str::FromStr;

use crate::residue::{Nucleotide, Residue};
use crate::{AlignerError, Result};

/// An immutable, indexable run of residues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence<R: Residue> {
    residues: Vec<R>,
}

impl<R: Residue> Sequence<R> {
    pub fn new(residues: Vec<R>) -> Self {
        Self { residues }
    }

    /// Parses a sequence from its one-letter symbols, skipping whitespace.
    pub fn parse(text: &str) -> Result<Self> {
        let residues = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                R::from_symbol(c).ok_or_else(|| AlignerError::InvalidResidue {
                    symbol: c.to_string(),
                    alphabet: R::ALPHABET,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { residues })
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.residues
    }

    /// The sequence with all gap symbols removed.
    pub fn ungapped(&self) -> Self {
        Self {
            residues: self.residues.iter().copied().filter(|r| !r.is_gap()).collect(),
        }
    }
}

impl Sequence<Nucleotide> {
    pub fn reverse_complement(&self) -> Self {
        Self {
            residues: self.residues.iter().rev().map(|n| n.complement()).collect(),
        }
    }
}

impl<R: Residue> FromStr for Sequence<R> {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<R: Residue> From<Vec<R>> for Sequence<R> {
    fn from(residues: Vec<R>) -> Self {
        Self::new(residues)
    }
}

impl<R: Residue> Deref for Sequence<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        &self.residues
    }
}

impl<R: Residue> Index<usize> for Sequence<R> {
    type Output = R;

    fn index(&self, index: usize) -> &R {
        &self.residues[index]
    }
}

impl<R: Residue> fmt::Display for Sequence<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for residue in &self.residues {
            write!(f, "{}", residue.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::AminoAcid;

    #[test]
    fn test_parse_and_display() {
        let seq: Sequence<Nucleotide> = "ac gt\nN".parse().unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq[4], Nucleotide::Unknown);
        assert_eq!(seq.to_string(), "ACGTN");
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let err = Sequence::<Nucleotide>::parse("ACGZ").unwrap_err();
        assert!(matches!(err, AlignerError::InvalidResidue { ref symbol, .. } if symbol == "Z"));
        assert!(Sequence::<AminoAcid>::parse("MKV*").is_ok());
    }

    #[test]
    fn test_reverse_complement() {
        let seq: Sequence<Nucleotide> = "AACGRT".parse().unwrap();
        assert_eq!(seq.reverse_complement().to_string(), "AYCGTT");
        assert_eq!(seq.reverse_complement().reverse_complement(), seq);
    }

    #[test]
    fn test_ungapped() {
        let seq: Sequence<Nucleotide> = "A-C--G".parse().unwrap();
        assert_eq!(seq.ungapped().to_string(), "ACG");
    }
}
