//! The sequence identifier value.
//!
//! A `SeqId` is immutable once built. Interned entries share it as
//! `Arc<SeqId>`; nothing mutates it after construction.

use std::cmp::Ordering;
use std::fmt;

use crate::textseq::cmp_ignore_ascii_case;
use crate::{SeqIdChoice, TextseqId};

/// Worst possible text score; anything scoring this is never chosen as a label.
pub const MAX_SCORE: i32 = i32::MAX;

/// Database name whose tags are used verbatim as labels.
pub const LABEL_DB: &str = "LABEL";

/// Integer or string object identifier (local ids, general tags).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectId {
    Id(i64),
    Str(String),
}

impl ObjectId {
    /// Integer ids sort before string ids; strings compare ignoring case.
    pub fn compare_ordered(&self, other: &ObjectId) -> Ordering {
        match (self, other) {
            (ObjectId::Id(a), ObjectId::Id(b)) => a.cmp(b),
            (ObjectId::Id(_), ObjectId::Str(_)) => Ordering::Less,
            (ObjectId::Str(_), ObjectId::Id(_)) => Ordering::Greater,
            (ObjectId::Str(a), ObjectId::Str(b)) => cmp_ignore_ascii_case(a, b),
        }
    }

    /// Parse digits as an integer id, anything else as a string id.
    ///
    /// Digits with a leading zero (`007`) stay a string so the text survives
    /// printing; `0` alone is an integer.
    pub fn from_text(text: &str) -> Self {
        let canonical = text == "0" || !text.starts_with('0');
        if canonical && !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = text.parse() {
                return ObjectId::Id(id);
            }
        }
        ObjectId::Str(text.to_owned())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Id(id) => write!(f, "{id}"),
            ObjectId::Str(s) => f.write_str(s),
        }
    }
}

/// General (database + tag) identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dbtag {
    pub db: String,
    pub tag: ObjectId,
}

impl Dbtag {
    pub fn new(db: impl Into<String>, tag: ObjectId) -> Self {
        Dbtag { db: db.into(), tag }
    }

    pub fn compare_ordered(&self, other: &Dbtag) -> Ordering {
        cmp_ignore_ascii_case(&self.db, &other.db).then_with(|| self.tag.compare_ordered(&other.tag))
    }
}

/// PDB structure identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdbId {
    pub mol: String,
    pub chain: String,
}

impl PdbId {
    pub fn compare_ordered(&self, other: &PdbId) -> Ordering {
        cmp_ignore_ascii_case(&self.mol, &other.mol).then_with(|| self.chain.cmp(&other.chain))
    }
}

/// Patent sequence identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatentId {
    pub country: String,
    pub number: String,
    pub seqid: i64,
}

impl PatentId {
    pub fn compare_ordered(&self, other: &PatentId) -> Ordering {
        cmp_ignore_ascii_case(&self.country, &other.country)
            .then_with(|| cmp_ignore_ascii_case(&self.number, &other.number))
            .then_with(|| self.seqid.cmp(&other.seqid))
    }
}

/// A parsed sequence identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeqId {
    Local(ObjectId),
    Gibbsq(i64),
    Gibbmt(i64),
    Giim(i64),
    Genbank(TextseqId),
    Embl(TextseqId),
    Pir(TextseqId),
    Swissprot(TextseqId),
    Patent(PatentId),
    Other(TextseqId),
    General(Dbtag),
    Gi(i64),
    Ddbj(TextseqId),
    Prf(TextseqId),
    Pdb(PdbId),
    Tpg(TextseqId),
    Tpe(TextseqId),
    Tpd(TextseqId),
    Gpipe(TextseqId),
    NamedAnnotTrack(TextseqId),
}

impl SeqId {
    /// Build a text id of the given subtype.
    ///
    /// Returns `None` if `choice` is not a text-id subtype.
    pub fn from_textseq(choice: SeqIdChoice, text: TextseqId) -> Option<SeqId> {
        let id = match choice {
            SeqIdChoice::Genbank => SeqId::Genbank(text),
            SeqIdChoice::Embl => SeqId::Embl(text),
            SeqIdChoice::Pir => SeqId::Pir(text),
            SeqIdChoice::Swissprot => SeqId::Swissprot(text),
            SeqIdChoice::Other => SeqId::Other(text),
            SeqIdChoice::Ddbj => SeqId::Ddbj(text),
            SeqIdChoice::Prf => SeqId::Prf(text),
            SeqIdChoice::Tpg => SeqId::Tpg(text),
            SeqIdChoice::Tpe => SeqId::Tpe(text),
            SeqIdChoice::Tpd => SeqId::Tpd(text),
            SeqIdChoice::Gpipe => SeqId::Gpipe(text),
            SeqIdChoice::NamedAnnotTrack => SeqId::NamedAnnotTrack(text),
            _ => return None,
        };
        Some(id)
    }

    /// Subtype discriminant.
    pub fn which(&self) -> SeqIdChoice {
        match self {
            SeqId::Local(_) => SeqIdChoice::Local,
            SeqId::Gibbsq(_) => SeqIdChoice::Gibbsq,
            SeqId::Gibbmt(_) => SeqIdChoice::Gibbmt,
            SeqId::Giim(_) => SeqIdChoice::Giim,
            SeqId::Genbank(_) => SeqIdChoice::Genbank,
            SeqId::Embl(_) => SeqIdChoice::Embl,
            SeqId::Pir(_) => SeqIdChoice::Pir,
            SeqId::Swissprot(_) => SeqIdChoice::Swissprot,
            SeqId::Patent(_) => SeqIdChoice::Patent,
            SeqId::Other(_) => SeqIdChoice::Other,
            SeqId::General(_) => SeqIdChoice::General,
            SeqId::Gi(_) => SeqIdChoice::Gi,
            SeqId::Ddbj(_) => SeqIdChoice::Ddbj,
            SeqId::Prf(_) => SeqIdChoice::Prf,
            SeqId::Pdb(_) => SeqIdChoice::Pdb,
            SeqId::Tpg(_) => SeqIdChoice::Tpg,
            SeqId::Tpe(_) => SeqIdChoice::Tpe,
            SeqId::Tpd(_) => SeqIdChoice::Tpd,
            SeqId::Gpipe(_) => SeqIdChoice::Gpipe,
            SeqId::NamedAnnotTrack(_) => SeqIdChoice::NamedAnnotTrack,
        }
    }

    /// The text-id payload, for text-id subtypes.
    pub fn textseq(&self) -> Option<&TextseqId> {
        match self {
            SeqId::Genbank(t)
            | SeqId::Embl(t)
            | SeqId::Pir(t)
            | SeqId::Swissprot(t)
            | SeqId::Other(t)
            | SeqId::Ddbj(t)
            | SeqId::Prf(t)
            | SeqId::Tpg(t)
            | SeqId::Tpe(t)
            | SeqId::Tpd(t)
            | SeqId::Gpipe(t)
            | SeqId::NamedAnnotTrack(t) => Some(t),
            _ => None,
        }
    }

    /// The GI number, for `gi|N` ids.
    pub fn gi(&self) -> Option<i64> {
        match self {
            SeqId::Gi(gi) => Some(*gi),
            _ => None,
        }
    }

    pub fn is_gi(&self) -> bool {
        matches!(self, SeqId::Gi(_))
    }

    /// Stable three-way comparison: subtype discriminant first, then the
    /// subtype's own content. Reproducible across runs.
    pub fn compare_ordered(&self, other: &SeqId) -> Ordering {
        self.which()
            .cmp(&other.which())
            .then_with(|| match (self, other) {
                (SeqId::Local(a), SeqId::Local(b)) => a.compare_ordered(b),
                (SeqId::Gibbsq(a), SeqId::Gibbsq(b))
                | (SeqId::Gibbmt(a), SeqId::Gibbmt(b))
                | (SeqId::Giim(a), SeqId::Giim(b))
                | (SeqId::Gi(a), SeqId::Gi(b)) => a.cmp(b),
                (SeqId::Patent(a), SeqId::Patent(b)) => a.compare_ordered(b),
                (SeqId::General(a), SeqId::General(b)) => a.compare_ordered(b),
                (SeqId::Pdb(a), SeqId::Pdb(b)) => a.compare_ordered(b),
                _ => match (self.textseq(), other.textseq()) {
                    (Some(a), Some(b)) => a.compare_ordered(b),
                    _ => Ordering::Equal,
                },
            })
    }

    /// FASTA-style text form, e.g. `ref|NM_000001.2|`.
    pub fn as_fasta_string(&self) -> String {
        self.to_string()
    }

    /// Preference score for choosing a display label: lower is better.
    pub fn text_score(&self) -> i32 {
        if let Some(text) = self.textseq() {
            return match (&text.accession, text.version) {
                (Some(_), Some(_)) if self.which() == SeqIdChoice::Other => 5,
                (Some(_), Some(_)) => 10,
                (Some(_), None) => 20,
                (None, _) => 30,
            };
        }
        match self {
            SeqId::General(dbtag) if dbtag.db == LABEL_DB => 15,
            SeqId::General(_) => 40,
            SeqId::Gi(_) => 50,
            SeqId::Local(_) => 60,
            _ => 70,
        }
    }
}

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.which().fasta_tag();
        match self {
            SeqId::Local(id) => write!(f, "{tag}|{id}"),
            SeqId::Gibbsq(n) | SeqId::Gibbmt(n) | SeqId::Giim(n) | SeqId::Gi(n) => {
                write!(f, "{tag}|{n}")
            }
            SeqId::Patent(pat) => write!(f, "{tag}|{}|{}|{}", pat.country, pat.number, pat.seqid),
            SeqId::General(dbtag) => write!(f, "{tag}|{}|{}", dbtag.db, dbtag.tag),
            SeqId::Pdb(pdb) => write!(f, "{tag}|{}|{}", pdb.mol, pdb.chain),
            _ => {
                let Some(text) = self.textseq() else {
                    return Ok(());
                };
                write!(f, "{tag}|")?;
                if let Some(acc) = &text.accession {
                    f.write_str(acc)?;
                    if let Some(version) = text.version {
                        write!(f, ".{version}")?;
                    }
                }
                f.write_str("|")?;
                if let Some(name) = &text.name {
                    f.write_str(name)?;
                }
                if let Some(release) = &text.release {
                    write!(f, "|{release}")?;
                }
                Ok(())
            }
        }
    }
}
