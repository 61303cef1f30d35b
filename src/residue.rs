//! Residue alphabets.
//!
//! Every alphabet assigns its symbols a dense, zero-based ordinal so that
//! scoring lookups are plain array indexing. Each alphabet also owns exactly
//! one gap symbol, which takes part in the ordinal space but is never scored.

use std::fmt;
use std::hash::Hash;

/// A symbol of a residue alphabet.
pub trait Residue: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// All residues in ordinal order: `VALUES[r.ordinal()] == r`.
    const VALUES: &'static [Self];
    /// The alphabet's gap symbol.
    const GAP: Self;
    /// Human readable alphabet name used in error messages.
    const ALPHABET: &'static str;

    fn ordinal(self) -> usize;

    fn symbol(self) -> char;

    /// Case-insensitive lookup of a residue by its one-letter symbol.
    fn from_symbol(symbol: char) -> Option<Self>;

    fn is_gap(self) -> bool {
        self == Self::GAP
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Nucleotide {
    Gap,
    A,
    C,
    G,
    T,
    /// A or G
    Purine,
    /// C or T
    Pyrimidine,
    /// G or T
    Keto,
    /// A or C
    Amino,
    /// C or G
    Strong,
    /// A or T
    Weak,
    /// C, G or T
    NotA,
    /// A, G or T
    NotC,
    /// A, C or T
    NotG,
    /// A, C or G
    NotT,
    /// Any base
    Unknown,
}

impl Nucleotide {
    pub const BASES: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    pub fn complement(self) -> Self {
        use Nucleotide::*;
        match self {
            Gap => Gap,
            A => T,
            C => G,
            G => C,
            T => A,
            Purine => Pyrimidine,
            Pyrimidine => Purine,
            Keto => Amino,
            Amino => Keto,
            Strong => Strong,
            Weak => Weak,
            NotA => NotT,
            NotC => NotG,
            NotG => NotC,
            NotT => NotA,
            Unknown => Unknown,
        }
    }

    pub fn is_ambiguity(self) -> bool {
        !matches!(self, Nucleotide::Gap | Nucleotide::A | Nucleotide::C | Nucleotide::G | Nucleotide::T)
    }

    /// Unambiguous bases an IUPAC code stands for. Empty for the gap.
    pub fn constituents(self) -> &'static [Nucleotide] {
        use Nucleotide::*;
        match self {
            Gap => &[],
            A => &[A],
            C => &[C],
            G => &[G],
            T => &[T],
            Purine => &[A, G],
            Pyrimidine => &[C, T],
            Keto => &[G, T],
            Amino => &[A, C],
            Strong => &[C, G],
            Weak => &[A, T],
            NotA => &[C, G, T],
            NotC => &[A, G, T],
            NotG => &[A, C, T],
            NotT => &[A, C, G],
            Unknown => &[A, C, G, T],
        }
    }
}

impl Residue for Nucleotide {
    const VALUES: &'static [Self] = &[
        Nucleotide::Gap,
        Nucleotide::A,
        Nucleotide::C,
        Nucleotide::G,
        Nucleotide::T,
        Nucleotide::Purine,
        Nucleotide::Pyrimidine,
        Nucleotide::Keto,
        Nucleotide::Amino,
        Nucleotide::Strong,
        Nucleotide::Weak,
        Nucleotide::NotA,
        Nucleotide::NotC,
        Nucleotide::NotG,
        Nucleotide::NotT,
        Nucleotide::Unknown,
    ];
    const GAP: Self = Nucleotide::Gap;
    const ALPHABET: &'static str = "nucleotide";

    fn ordinal(self) -> usize {
        self as usize
    }

    fn symbol(self) -> char {
        use Nucleotide::*;
        match self {
            Gap => '-',
            A => 'A',
            C => 'C',
            G => 'G',
            T => 'T',
            Purine => 'R',
            Pyrimidine => 'Y',
            Keto => 'K',
            Amino => 'M',
            Strong => 'S',
            Weak => 'W',
            NotA => 'B',
            NotC => 'D',
            NotG => 'H',
            NotT => 'V',
            Unknown => 'N',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        use Nucleotide::*;
        let residue = match symbol.to_ascii_uppercase() {
            '-' => Gap,
            'A' => A,
            'C' => C,
            'G' => G,
            'T' => T,
            'R' => Purine,
            'Y' => Pyrimidine,
            'K' => Keto,
            'M' => Amino,
            'S' => Strong,
            'W' => Weak,
            'B' => NotA,
            'D' => NotC,
            'H' => NotG,
            'V' => NotT,
            'N' | 'X' => Unknown,
            _ => return None,
        };
        Some(residue)
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AminoAcid {
    Gap,
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    Glutamine,
    GlutamicAcid,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
    /// B: asparagine or aspartic acid
    Asx,
    /// Z: glutamine or glutamic acid
    Glx,
    /// J: leucine or isoleucine
    Xle,
    Selenocysteine,
    Pyrrolysine,
    Unknown,
    Stop,
}

impl Residue for AminoAcid {
    const VALUES: &'static [Self] = &[
        AminoAcid::Gap,
        AminoAcid::Alanine,
        AminoAcid::Arginine,
        AminoAcid::Asparagine,
        AminoAcid::AsparticAcid,
        AminoAcid::Cysteine,
        AminoAcid::Glutamine,
        AminoAcid::GlutamicAcid,
        AminoAcid::Glycine,
        AminoAcid::Histidine,
        AminoAcid::Isoleucine,
        AminoAcid::Leucine,
        AminoAcid::Lysine,
        AminoAcid::Methionine,
        AminoAcid::Phenylalanine,
        AminoAcid::Proline,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
        AminoAcid::Valine,
        AminoAcid::Asx,
        AminoAcid::Glx,
        AminoAcid::Xle,
        AminoAcid::Selenocysteine,
        AminoAcid::Pyrrolysine,
        AminoAcid::Unknown,
        AminoAcid::Stop,
    ];
    const GAP: Self = AminoAcid::Gap;
    const ALPHABET: &'static str = "amino acid";

    fn ordinal(self) -> usize {
        self as usize
    }

    fn symbol(self) -> char {
        use AminoAcid::*;
        match self {
            Gap => '-',
            Alanine => 'A',
            Arginine => 'R',
            Asparagine => 'N',
            AsparticAcid => 'D',
            Cysteine => 'C',
            Glutamine => 'Q',
            GlutamicAcid => 'E',
            Glycine => 'G',
            Histidine => 'H',
            Isoleucine => 'I',
            Leucine => 'L',
            Lysine => 'K',
            Methionine => 'M',
            Phenylalanine => 'F',
            Proline => 'P',
            Serine => 'S',
            Threonine => 'T',
            Tryptophan => 'W',
            Tyrosine => 'Y',
            Valine => 'V',
            Asx => 'B',
            Glx => 'Z',
            Xle => 'J',
            Selenocysteine => 'U',
            Pyrrolysine => 'O',
            Unknown => 'X',
            Stop => '*',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        let symbol = symbol.to_ascii_uppercase();
        Self::VALUES.iter().copied().find(|aa| aa.symbol() == symbol)
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
