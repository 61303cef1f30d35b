use std::fmt::Display;
use std::path::PathBuf;

use affine_aligner::{
    AlignerConfig, Alignment, AlignmentMode, AminoAcid, AminoAcidPairwiseAligner, Nucleotide, NucleotidePairwiseAligner,
    Residue, Sequence, AMINO_ACID_POLICY, NUCLEOTIDE_POLICY,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Alphabet {
    Nucleotide,
    Protein,
}

/// Align two sequences with affine gap penalties
#[derive(Debug, Parser)]
#[command(name = "affine-align", version)]
struct Cli {
    /// Query sequence, or @FILE to read it from a file
    query: String,

    /// Subject sequence, or @FILE to read it from a file
    subject: String,

    /// global (Needleman-Wunsch) or local (Smith-Waterman)
    #[arg(short, long)]
    mode: Option<AlignmentMode>,

    #[arg(short, long, value_enum, default_value_t = Alphabet::Nucleotide)]
    alphabet: Alphabet,

    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gap open penalty [default: -5 for nucleotides, -11 for proteins]
    #[arg(long, allow_hyphen_values = true)]
    gap_open: Option<f32>,

    /// Gap extend penalty [default: -2 for nucleotides, -1 for proteins]
    #[arg(long, allow_hyphen_values = true)]
    gap_extend: Option<f32>,

    /// Nucleotide match score
    #[arg(long = "match", allow_hyphen_values = true)]
    match_score: Option<f32>,

    /// Nucleotide mismatch score
    #[arg(long, allow_hyphen_values = true)]
    mismatch: Option<f32>,

    /// Score of an IUPAC ambiguity code against one of its bases
    #[arg(long, allow_hyphen_values = true)]
    ambiguity: Option<f32>,

    /// Amino-acid substitution matrix file (BLOSUM62 by default)
    #[arg(long)]
    matrix: Option<PathBuf>,
}

fn read_sequence_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading sequence file {}", path)),
        None => Ok(arg.to_string()),
    }
}

fn build_config(cli: &Cli) -> Result<AlignerConfig> {
    let mut config = match &cli.config {
        Some(path) => AlignerConfig::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => AlignerConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.alignment.mode = mode;
    }
    if let Some(gap_open) = cli.gap_open {
        config.alignment.gap_open = Some(gap_open);
    }
    if let Some(gap_extend) = cli.gap_extend {
        config.alignment.gap_extend = Some(gap_extend);
    }
    if let Some(score) = cli.match_score {
        config.nucleotide.match_score = score;
    }
    if let Some(score) = cli.mismatch {
        config.nucleotide.mismatch_score = score;
    }
    if let Some(score) = cli.ambiguity {
        config.nucleotide.ambiguity_score = score;
    }
    if let Some(matrix) = &cli.matrix {
        config.protein.matrix = Some(matrix.clone());
    }
    config.validate()?;
    Ok(config)
}

fn report<R: Residue>(mode: impl Display, alignment: &Alignment<R>) {
    println!("Mode:          {}", mode);
    println!("Score:         {}", alignment.score());
    println!("Length:        {}", alignment.len());
    println!("Identity:      {:.2}%", alignment.percent_identity());
    println!("Mismatches:    {}", alignment.mismatches());
    println!("Gap openings:  {}", alignment.gap_openings());
    println!(
        "Query range:   {}..{}",
        alignment.query_range().begin,
        alignment.query_range().end
    );
    println!(
        "Subject range: {}..{}",
        alignment.subject_range().begin,
        alignment.subject_range().end
    );
    println!("CIGAR:         {}", alignment.cigar());
    println!();
    println!("{}", alignment);
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let query_text = read_sequence_arg(&cli.query)?;
    let subject_text = read_sequence_arg(&cli.subject)?;

    match cli.alphabet {
        Alphabet::Nucleotide => {
            let query: Sequence<Nucleotide> = Sequence::parse(&query_text).context("parsing query")?;
            let subject: Sequence<Nucleotide> = Sequence::parse(&subject_text).context("parsing subject")?;
            log::info!("Aligning {} nt against {} nt", query.len(), subject.len());
            let params = config.alignment_params();
            let matrix = config.nucleotide_matrix();
            let aligner = NucleotidePairwiseAligner::new(&NUCLEOTIDE_POLICY, &query, &subject, &matrix, params)?;
            report(params.mode, aligner.alignment());
        }
        Alphabet::Protein => {
            let query: Sequence<AminoAcid> = Sequence::parse(&query_text).context("parsing query")?;
            let subject: Sequence<AminoAcid> = Sequence::parse(&subject_text).context("parsing subject")?;
            log::info!("Aligning {} aa against {} aa", query.len(), subject.len());
            let params = config.protein_alignment_params();
            let matrix = config.protein_matrix()?;
            let aligner = AminoAcidPairwiseAligner::new(&AMINO_ACID_POLICY, &query, &subject, &matrix, params)?;
            report(params.mode, aligner.alignment());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use affine_aligner::{DNA_GAP_EXT, DNA_GAP_OPEN, PROTEIN_GAP_EXT, PROTEIN_GAP_OPEN};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("affine-align").chain(args.iter().copied()))
    }

    #[test]
    fn test_protein_defaults_apply_with_config_file() {
        let mut file = NamedTempFile::new().expect("tmp config");
        writeln!(file, "[alignment]").unwrap();
        writeln!(file, "mode = \"local\"").unwrap();
        file.as_file().sync_all().unwrap();
        let path = file.path().display().to_string();

        let cli = parse(&["HEAG", "HEAG", "--alphabet", "protein", "--config", &path]);
        let params = build_config(&cli).unwrap().protein_alignment_params();
        assert_eq!(params.mode, AlignmentMode::Local);
        assert_eq!((params.gap_open, params.gap_extend), (PROTEIN_GAP_OPEN, PROTEIN_GAP_EXT));

        let cli = parse(&["ACGT", "ACGT", "--config", &path]);
        let params = build_config(&cli).unwrap().alignment_params();
        assert_eq!((params.gap_open, params.gap_extend), (DNA_GAP_OPEN, DNA_GAP_EXT));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().expect("tmp config");
        writeln!(file, "[alignment]").unwrap();
        writeln!(file, "gap_open = -8.0").unwrap();
        file.as_file().sync_all().unwrap();
        let path = file.path().display().to_string();

        let cli = parse(&["HEAG", "HEAG", "-a", "protein", "-c", &path, "--gap-extend", "-3"]);
        let params = build_config(&cli).unwrap().protein_alignment_params();
        assert_eq!((params.gap_open, params.gap_extend), (-8.0, -3.0));
    }
}
