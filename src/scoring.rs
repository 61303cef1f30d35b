//! Substitution scoring.
//!
//! A [`ScoringMatrix`] is a square `f32` table indexed by residue ordinals.
//! Nucleotide matrices are usually built programmatically with
//! [`NucleotideScoringMatrixBuilder`]; amino-acid matrices are read from the
//! usual whitespace-delimited text tables with [`AminoAcidMatrixLoader`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

use crate::residue::{AminoAcid, Nucleotide, Residue};
use crate::{AlignerError, Result};

const BLOSUM62: &str = include_str!("blosum62.txt");

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringMatrix<R: Residue> {
    scores: Vec<f32>,
    dim: usize,
    _alphabet: PhantomData<R>,
}

impl<R: Residue> ScoringMatrix<R> {
    /// Every pair scores `score`.
    pub fn uniform(score: f32) -> Self {
        let dim = R::VALUES.len();
        Self {
            scores: vec![score; dim * dim],
            dim,
            _alphabet: PhantomData,
        }
    }

    /// `match_score` on the diagonal (gap excluded), `mismatch_score` elsewhere.
    pub fn match_mismatch(match_score: f32, mismatch_score: f32) -> Self {
        let mut matrix = Self::uniform(mismatch_score);
        for &residue in R::VALUES.iter().filter(|r| !r.is_gap()) {
            matrix.put(residue, residue, match_score);
        }
        matrix
    }

    #[inline]
    pub fn score(&self, a: R, b: R) -> f32 {
        self.scores[a.ordinal() * self.dim + b.ordinal()]
    }

    /// True when `score(a, b) == score(b, a)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| (0..i).all(|j| self.scores[i * self.dim + j] == self.scores[j * self.dim + i]))
    }

    fn put(&mut self, a: R, b: R, score: f32) {
        self.scores[a.ordinal() * self.dim + b.ordinal()] = score;
    }

    fn put_symmetric(&mut self, a: R, b: R, score: f32) {
        self.put(a, b, score);
        self.put(b, a, score);
    }
}

impl ScoringMatrix<Nucleotide> {
    /// True when complementing both residues never changes a score, which
    /// makes reverse-complemented alignments score identically.
    pub fn is_complement_symmetric(&self) -> bool {
        Nucleotide::VALUES.iter().all(|&a| {
            Nucleotide::VALUES
                .iter()
                .all(|&b| self.score(a, b) == self.score(a.complement(), b.complement()))
        })
    }
}

impl ScoringMatrix<AminoAcid> {
    pub fn blosum62() -> Self {
        AminoAcidMatrixLoader::parse(BLOSUM62).expect("embedded BLOSUM62 table is well formed")
    }
}

/// Builds nucleotide scoring matrices from a handful of scores.
///
/// Calls are applied in order, so a later call overrides entries written
/// by an earlier one.
#[derive(Debug, Clone)]
pub struct NucleotideScoringMatrixBuilder {
    matrix: ScoringMatrix<Nucleotide>,
}

impl NucleotideScoringMatrixBuilder {
    pub fn new(default_score: f32) -> Self {
        Self {
            matrix: ScoringMatrix::uniform(default_score),
        }
    }

    /// Sets the score of every non-gap residue against itself.
    pub fn set_match(mut self, score: f32) -> Self {
        for &n in Nucleotide::VALUES.iter().filter(|n| !n.is_gap()) {
            self.matrix.put(n, n, score);
        }
        self
    }

    /// Scores every ambiguity code against each base it can stand for.
    pub fn ambiguity_score(mut self, score: f32) -> Self {
        for &code in Nucleotide::VALUES.iter().filter(|n| n.is_ambiguity()) {
            for &base in code.constituents() {
                self.matrix.put_symmetric(code, base, score);
            }
        }
        self
    }

    pub fn set(mut self, a: Nucleotide, b: Nucleotide, score: f32) -> Self {
        self.matrix.put_symmetric(a, b, score);
        self
    }

    pub fn build(self) -> ScoringMatrix<Nucleotide> {
        self.matrix
    }
}

/// Reads amino-acid substitution matrices in the NCBI text layout:
///
/// ```text
/// # comment
///    A  R  N
/// A  4 -1 -2
/// R -1  5  0
/// N -2  0  6
/// ```
///
/// Tokens may be separated by whitespace or commas. Pairs the table does not
/// mention score 0.
pub struct AminoAcidMatrixLoader;

impl AminoAcidMatrixLoader {
    pub fn parse(text: &str) -> Result<ScoringMatrix<AminoAcid>> {
        parse_delimited(text.as_bytes())
    }

    pub fn read<B: BufRead>(reader: B) -> Result<ScoringMatrix<AminoAcid>> {
        parse_delimited(reader)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ScoringMatrix<AminoAcid>> {
        let file = File::open(path.as_ref())?;
        log::debug!("Loading substitution matrix from {}", path.as_ref().display());
        parse_delimited(BufReader::new(file))
    }
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty())
}

fn residue_label<R: Residue>(token: &str, line: usize) -> Result<R> {
    let mut chars = token.chars();
    let residue = match (chars.next(), chars.next()) {
        (Some(c), None) => R::from_symbol(c).filter(|r| !r.is_gap()),
        _ => None,
    };
    residue.ok_or_else(|| AlignerError::MatrixParse {
        line,
        message: format!("unrecognized {} residue label {:?}", R::ALPHABET, token),
    })
}

fn parse_delimited<R: Residue, B: BufRead>(reader: B) -> Result<ScoringMatrix<R>> {
    let mut matrix = ScoringMatrix::uniform(0.0);
    let mut columns: Option<Vec<R>> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if columns.is_none() {
            let header = tokens(trimmed)
                .map(|t| residue_label::<R>(t, line_no))
                .collect::<Result<Vec<_>>>()?;
            log::trace!("Matrix header with {} columns", header.len());
            columns = Some(header);
            continue;
        }
        let header: &[R] = columns.as_deref().unwrap_or_default();

        let mut fields = tokens(trimmed);
        let row = match fields.next() {
            Some(label) => residue_label::<R>(label, line_no)?,
            None => continue,
        };
        let scores = fields
            .map(|t| {
                t.parse::<f32>().map_err(|_| AlignerError::MatrixParse {
                    line: line_no,
                    message: format!("non-numeric score {:?}", t),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if scores.len() != header.len() {
            return Err(AlignerError::MatrixParse {
                line: line_no,
                message: format!("expected {} scores for row {}, found {}", header.len(), row, scores.len()),
            });
        }
        for (&column, score) in header.iter().zip(scores) {
            matrix.put(row, column, score);
        }
    }

    if columns.is_none() {
        return Err(AlignerError::MatrixParse {
            line: 0,
            message: "missing header line".to_string(),
        });
    }
    Ok(matrix)
}
