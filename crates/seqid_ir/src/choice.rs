//! Seq-id subtype discriminant.

use std::fmt;

/// Subtype of a sequence identifier.
///
/// The discriminant order is the toolkit's canonical order and is the first
/// key of the stable ordering (`SeqId::compare_ordered`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SeqIdChoice {
    Local = 1,
    Gibbsq,
    Gibbmt,
    Giim,
    Genbank,
    Embl,
    Pir,
    Swissprot,
    Patent,
    Other,
    General,
    Gi,
    Ddbj,
    Prf,
    Pdb,
    Tpg,
    Tpe,
    Tpd,
    Gpipe,
    NamedAnnotTrack,
}

impl SeqIdChoice {
    /// Number of subtypes.
    pub const COUNT: usize = 20;

    /// All subtypes in discriminant order.
    pub const ALL: [SeqIdChoice; Self::COUNT] = [
        SeqIdChoice::Local,
        SeqIdChoice::Gibbsq,
        SeqIdChoice::Gibbmt,
        SeqIdChoice::Giim,
        SeqIdChoice::Genbank,
        SeqIdChoice::Embl,
        SeqIdChoice::Pir,
        SeqIdChoice::Swissprot,
        SeqIdChoice::Patent,
        SeqIdChoice::Other,
        SeqIdChoice::General,
        SeqIdChoice::Gi,
        SeqIdChoice::Ddbj,
        SeqIdChoice::Prf,
        SeqIdChoice::Pdb,
        SeqIdChoice::Tpg,
        SeqIdChoice::Tpe,
        SeqIdChoice::Tpd,
        SeqIdChoice::Gpipe,
        SeqIdChoice::NamedAnnotTrack,
    ];

    /// Dense zero-based index, usable for dispatch tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Tag used in the FASTA-style text form (`gi`, `ref`, `lcl`, ...).
    pub const fn fasta_tag(self) -> &'static str {
        match self {
            SeqIdChoice::Local => "lcl",
            SeqIdChoice::Gibbsq => "bbs",
            SeqIdChoice::Gibbmt => "bbm",
            SeqIdChoice::Giim => "gim",
            SeqIdChoice::Genbank => "gb",
            SeqIdChoice::Embl => "emb",
            SeqIdChoice::Pir => "pir",
            SeqIdChoice::Swissprot => "sp",
            SeqIdChoice::Patent => "pat",
            SeqIdChoice::Other => "ref",
            SeqIdChoice::General => "gnl",
            SeqIdChoice::Gi => "gi",
            SeqIdChoice::Ddbj => "dbj",
            SeqIdChoice::Prf => "prf",
            SeqIdChoice::Pdb => "pdb",
            SeqIdChoice::Tpg => "tpg",
            SeqIdChoice::Tpe => "tpe",
            SeqIdChoice::Tpd => "tpd",
            SeqIdChoice::Gpipe => "gpp",
            SeqIdChoice::NamedAnnotTrack => "nat",
        }
    }

    /// Look up a subtype by its FASTA tag, ignoring ASCII case.
    pub fn from_fasta_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.fasta_tag().eq_ignore_ascii_case(tag))
    }

    /// Whether identifiers of this subtype carry a `TextseqId`
    /// (accession / name / version / release).
    pub const fn is_textseq(self) -> bool {
        matches!(
            self,
            SeqIdChoice::Genbank
                | SeqIdChoice::Embl
                | SeqIdChoice::Pir
                | SeqIdChoice::Swissprot
                | SeqIdChoice::Other
                | SeqIdChoice::Ddbj
                | SeqIdChoice::Prf
                | SeqIdChoice::Tpg
                | SeqIdChoice::Tpe
                | SeqIdChoice::Tpd
                | SeqIdChoice::Gpipe
                | SeqIdChoice::NamedAnnotTrack
        )
    }
}

impl fmt::Display for SeqIdChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fasta_tag())
    }
}
