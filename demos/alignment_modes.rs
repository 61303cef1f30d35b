use affine_aligner::{
    AlignmentMode, AlignmentParams, AminoAcid, AminoAcidPairwiseAligner, Nucleotide, NucleotidePairwiseAligner,
    NucleotideScoringMatrixBuilder, ScoringMatrix, Sequence, AMINO_ACID_POLICY, NUCLEOTIDE_POLICY,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let matrix = NucleotideScoringMatrixBuilder::new(-1.0).set_match(2.0).build();
    let seq1: Sequence<Nucleotide> = "ACACACTA".parse()?;
    let seq2: Sequence<Nucleotide> = "AGCACACA".parse()?;

    for mode in [AlignmentMode::Global, AlignmentMode::Local] {
        let params = AlignmentParams::new(mode, -1.0, -1.0);
        let aligner = NucleotidePairwiseAligner::new(&NUCLEOTIDE_POLICY, &seq1, &seq2, &matrix, params)?;
        let alignment = aligner.alignment();

        println!("{} alignment", mode);
        println!("Score: {}", alignment.score());
        println!("CIGAR: {}", alignment.cigar());
        println!("{}\n", alignment);
    }

    // Proteins with BLOSUM62 and the usual 11/1 gap costs
    let blosum62 = ScoringMatrix::blosum62();
    let protein1: Sequence<AminoAcid> = "HEAGAWGHEE".parse()?;
    let protein2: Sequence<AminoAcid> = "PAWHEAE".parse()?;
    let aligner = AminoAcidPairwiseAligner::new(
        &AMINO_ACID_POLICY,
        &protein1,
        &protein2,
        &blosum62,
        AlignmentParams::new(AlignmentMode::Local, -11.0, -1.0),
    )?;
    println!("Protein local alignment, score {}", aligner.score());
    println!("{}", aligner.alignment());

    Ok(())
}
