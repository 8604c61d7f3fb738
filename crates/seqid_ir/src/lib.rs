//! Seq-id IR - Sequence Identifier Values
//!
//! This crate contains the identifier value consumed by the interning engine
//! in `seqid_map`:
//! - `SeqIdChoice`, the closed subtype discriminant
//! - `SeqId` and its payloads (`TextseqId`, `Dbtag`, `ObjectId`, ...)
//! - FASTA-style parsing and printing
//! - Stable ordering (`SeqId::compare_ordered`) and label text scores
//! - SNP scale limits (`SnpScaleLimit`)
//!
//! Values are immutable once built. Accessions and locus names compare
//! ignoring ASCII case; everything else compares exactly.

mod choice;
mod error;
mod parse;
mod seq_id;
mod snp;
mod textseq;

pub use choice::SeqIdChoice;
pub use error::SeqIdError;
pub use seq_id::{Dbtag, ObjectId, PatentId, PdbId, SeqId, LABEL_DB, MAX_SCORE};
pub use snp::SnpScaleLimit;
pub use textseq::{
    split_accession, AccessionParts, TextseqId, MAX_ACCESSION_DIGITS, MAX_ACCESSION_LETTERS,
};
