//! SNP annotation scale limits.
//!
//! A scale limit caps the size of the RefSeq sequences SNP annotation may be
//! placed on. Only RefSeq (`ref|`) accessions carry a scale; the prefix
//! decides it.

use std::fmt;
use std::str::FromStr;

use crate::{SeqId, SeqIdError};

/// Largest sequence scale a query accepts, smallest first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnpScaleLimit {
    /// No limit.
    #[default]
    Default,
    Unit,
    Contig,
    Supercontig,
    Chromosome,
}

impl SnpScaleLimit {
    pub fn as_str(self) -> &'static str {
        match self {
            SnpScaleLimit::Default => "default",
            SnpScaleLimit::Unit => "unit",
            SnpScaleLimit::Contig => "contig",
            SnpScaleLimit::Supercontig => "supercontig",
            SnpScaleLimit::Chromosome => "chromosome",
        }
    }

    /// Scale of the sequence a RefSeq prefix names (`NC_`, `NW_`, ...).
    fn of_refseq_prefix(prefix: &str) -> Self {
        match prefix.to_ascii_uppercase().as_str() {
            "NC_" | "AC_" => SnpScaleLimit::Chromosome,
            "NT_" | "NW_" => SnpScaleLimit::Supercontig,
            "NG_" | "NZ_" => SnpScaleLimit::Contig,
            _ => SnpScaleLimit::Unit,
        }
    }
}

impl fmt::Display for SnpScaleLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnpScaleLimit {
    type Err = SeqIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(SnpScaleLimit::Default),
            "unit" => Ok(SnpScaleLimit::Unit),
            "contig" => Ok(SnpScaleLimit::Contig),
            "supercontig" => Ok(SnpScaleLimit::Supercontig),
            "chromosome" => Ok(SnpScaleLimit::Chromosome),
            _ => Err(SeqIdError::parse(
                s,
                "expected unit, contig, supercontig or chromosome",
            )),
        }
    }
}

impl SeqId {
    /// Whether SNP annotation under `limit` may be placed on this sequence.
    ///
    /// [`SnpScaleLimit::Default`] allows everything. Any other limit allows
    /// only RefSeq accessions whose scale does not exceed it.
    pub fn is_allowed_snp_scale_limit(&self, limit: SnpScaleLimit) -> bool {
        if limit == SnpScaleLimit::Default {
            return true;
        }
        let SeqId::Other(text) = self else {
            return false;
        };
        text.accession_parts()
            .filter(|parts| parts.is_underscored())
            .is_some_and(|parts| SnpScaleLimit::of_refseq_prefix(parts.prefix) <= limit)
    }
}
