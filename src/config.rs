//! Aligner configuration.
//!
//! Loaded from a TOML file; every field has a default so a partial (or
//! empty) file is valid. Gap penalties left unset fall back to the defaults
//! of the alphabet being aligned (5/2 for nucleotides, 11/1 for proteins).
//!
//! ```toml
//! [alignment]
//! mode = "local"
//! gap_open = -5.0
//! gap_extend = -2.0
//!
//! [nucleotide]
//! match_score = 1.0
//! mismatch_score = -3.0
//! ambiguity_score = 0.0
//!
//! [protein]
//! matrix = "matrices/BLOSUM45"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::residue::{AminoAcid, Nucleotide};
use crate::scoring::{AminoAcidMatrixLoader, NucleotideScoringMatrixBuilder, ScoringMatrix};
use crate::{
    AlignerError, Result, DNA_AMBIGUITY, DNA_GAP_EXT, DNA_GAP_OPEN, DNA_MATCH, DNA_MISMATCH, PROTEIN_GAP_EXT,
    PROTEIN_GAP_OPEN,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlignerConfig {
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub nucleotide: NucleotideConfig,
    #[serde(default)]
    pub protein: ProteinConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlignmentConfig {
    #[serde(default)]
    pub mode: AlignmentMode,

    /// Added once when a gap is opened; must be <= 0
    #[serde(default)]
    pub gap_open: Option<f32>,

    /// Added for every further gap position; must be <= 0
    #[serde(default)]
    pub gap_extend: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NucleotideConfig {
    #[serde(default = "default_match")]
    pub match_score: f32,

    #[serde(default = "default_mismatch")]
    pub mismatch_score: f32,

    /// Score of an ambiguity code against one of the bases it stands for
    #[serde(default = "default_ambiguity")]
    pub ambiguity_score: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProteinConfig {
    /// Substitution matrix file; BLOSUM62 when unset
    #[serde(default)]
    pub matrix: Option<PathBuf>,
}

fn default_match() -> f32 {
    DNA_MATCH
}

fn default_mismatch() -> f32 {
    DNA_MISMATCH
}

fn default_ambiguity() -> f32 {
    DNA_AMBIGUITY
}

impl Default for NucleotideConfig {
    fn default() -> Self {
        Self {
            match_score: default_match(),
            mismatch_score: default_mismatch(),
            ambiguity_score: default_ambiguity(),
        }
    }
}

impl AlignerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AlignerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        for params in [self.alignment_params(), self.protein_alignment_params()] {
            params.validate().map_err(|e| AlignerError::Config(e.to_string()))?;
        }

        let nucleotide = &self.nucleotide;
        for (name, value) in [
            ("match_score", nucleotide.match_score),
            ("mismatch_score", nucleotide.mismatch_score),
            ("ambiguity_score", nucleotide.ambiguity_score),
        ] {
            if !value.is_finite() {
                return Err(AlignerError::Config(format!("nucleotide.{} must be finite", name)));
            }
        }
        if nucleotide.ambiguity_score > nucleotide.match_score {
            log::warn!(
                "ambiguity score {} exceeds match score {}; ambiguous bases will be preferred over exact matches",
                nucleotide.ambiguity_score,
                nucleotide.match_score
            );
        }
        Ok(())
    }

    /// Parameters for nucleotide alignment.
    pub fn alignment_params(&self) -> AlignmentParams {
        self.params_with_defaults(DNA_GAP_OPEN, DNA_GAP_EXT)
    }

    /// Parameters for protein alignment.
    pub fn protein_alignment_params(&self) -> AlignmentParams {
        self.params_with_defaults(PROTEIN_GAP_OPEN, PROTEIN_GAP_EXT)
    }

    fn params_with_defaults(&self, gap_open: f32, gap_extend: f32) -> AlignmentParams {
        AlignmentParams::new(
            self.alignment.mode,
            self.alignment.gap_open.unwrap_or(gap_open),
            self.alignment.gap_extend.unwrap_or(gap_extend),
        )
    }

    pub fn nucleotide_matrix(&self) -> ScoringMatrix<Nucleotide> {
        NucleotideScoringMatrixBuilder::new(self.nucleotide.mismatch_score)
            .ambiguity_score(self.nucleotide.ambiguity_score)
            .set_match(self.nucleotide.match_score)
            .build()
    }

    pub fn protein_matrix(&self) -> Result<ScoringMatrix<AminoAcid>> {
        match &self.protein.matrix {
            Some(path) => AminoAcidMatrixLoader::load(path),
            None => Ok(ScoringMatrix::blosum62()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AlignerConfig::from_toml_str("").unwrap();
        assert_eq!(config, AlignerConfig::default());
        assert_eq!(config.alignment_params(), AlignmentParams::default());
    }

    #[test]
    fn test_partial_config() {
        let config = AlignerConfig::from_toml_str(
            r#"
            [alignment]
            mode = "local"
            gap_open = -2.0

            [nucleotide]
            ambiguity_score = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.alignment.mode, AlignmentMode::Local);
        assert_eq!(config.alignment.gap_open, Some(-2.0));
        assert_eq!(config.alignment.gap_extend, None);
        assert_eq!(config.alignment_params().gap_extend, DNA_GAP_EXT);

        let matrix = config.nucleotide_matrix();
        assert_eq!(matrix.score(Nucleotide::Unknown, Nucleotide::A), 0.5);
        assert_eq!(matrix.score(Nucleotide::A, Nucleotide::A), DNA_MATCH);
        assert_eq!(matrix.score(Nucleotide::A, Nucleotide::C), DNA_MISMATCH);
    }

    #[test]
    fn test_unset_gap_penalties_follow_alphabet() {
        let config = AlignerConfig::from_toml_str("[alignment]\nmode = \"local\"\n").unwrap();
        let protein = config.protein_alignment_params();
        assert_eq!(protein.mode, AlignmentMode::Local);
        assert_eq!((protein.gap_open, protein.gap_extend), (PROTEIN_GAP_OPEN, PROTEIN_GAP_EXT));
        let nucleotide = config.alignment_params();
        assert_eq!((nucleotide.gap_open, nucleotide.gap_extend), (DNA_GAP_OPEN, DNA_GAP_EXT));

        let config = AlignerConfig::from_toml_str("[alignment]\ngap_open = -8.0\n").unwrap();
        let protein = config.protein_alignment_params();
        assert_eq!((protein.gap_open, protein.gap_extend), (-8.0, PROTEIN_GAP_EXT));
    }

    #[test]
    fn test_rejects_positive_gap_penalty() {
        let err = AlignerConfig::from_toml_str("[alignment]\ngap_extend = 1.0\n").unwrap_err();
        assert!(matches!(err, AlignerError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = AlignerConfig::from_toml_str("[alignment]\ngap_close = -1.0\n").unwrap_err();
        assert!(matches!(err, AlignerError::Toml(_)));
    }

    #[test]
    fn test_protein_matrix_from_file() {
        let mut matrix_file = NamedTempFile::new().expect("tmp matrix");
        writeln!(matrix_file, "  A  W").unwrap();
        writeln!(matrix_file, "A  7 -3").unwrap();
        writeln!(matrix_file, "W -3 15").unwrap();
        matrix_file.as_file().sync_all().unwrap();

        let mut config_file = NamedTempFile::new().expect("tmp config");
        writeln!(config_file, "[protein]").unwrap();
        writeln!(config_file, "matrix = {:?}", matrix_file.path().display().to_string()).unwrap();
        config_file.as_file().sync_all().unwrap();

        let config = AlignerConfig::from_path(config_file.path()).unwrap();
        let matrix = config.protein_matrix().unwrap();
        assert_eq!(matrix.score(AminoAcid::Tryptophan, AminoAcid::Tryptophan), 15.0);
    }

    #[test]
    fn test_default_protein_matrix_is_blosum62() {
        let matrix = AlignerConfig::default().protein_matrix().unwrap();
        assert_eq!(matrix, ScoringMatrix::blosum62());
    }
}
