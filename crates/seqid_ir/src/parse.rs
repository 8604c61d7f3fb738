//! Text to `SeqId` conversion.
//!
//! Accepted forms:
//! - FASTA style `tag|field|...` for every subtype tag (`gi|123`,
//!   `ref|NM_000001.2|`, `gnl|DB|tag`, `lcl|name`, `pdb|1ABC|A`, ...)
//! - bare digits, read as a GI
//! - a bare accession with optional version (`ACC123`, `NM_000001.2`);
//!   an underscored prefix is read as RefSeq (`ref`), anything else as GenBank

use std::str::FromStr;

use crate::textseq::split_accession;
use crate::{Dbtag, ObjectId, PatentId, PdbId, SeqId, SeqIdChoice, SeqIdError, TextseqId};

impl SeqId {
    /// Parse an identifier from its text form.
    pub fn parse(input: &str) -> Result<SeqId, SeqIdError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(SeqIdError::parse(input, "empty identifier"));
        }
        if text.contains('|') {
            parse_fasta(input, text)
        } else if text.bytes().all(|b| b.is_ascii_digit()) {
            parse_number(input, text).map(SeqId::Gi)
        } else {
            parse_bare_accession(input, text)
        }
    }
}

impl FromStr for SeqId {
    type Err = SeqIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeqId::parse(s)
    }
}

fn parse_number(input: &str, text: &str) -> Result<i64, SeqIdError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SeqIdError::parse(input, "expected a non-negative integer"));
    }
    text.parse()
        .map_err(|_| SeqIdError::parse(input, "integer out of range"))
}

/// Split `ACC.ver` into accession and version.
fn split_version<'a>(input: &str, text: &'a str) -> Result<(&'a str, Option<i32>), SeqIdError> {
    match text.rsplit_once('.') {
        None => Ok((text, None)),
        Some((acc, ver)) => {
            if acc.is_empty() || ver.is_empty() || !ver.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SeqIdError::parse(input, "invalid accession version"));
            }
            let version = ver
                .parse()
                .map_err(|_| SeqIdError::parse(input, "accession version out of range"))?;
            Ok((acc, Some(version)))
        }
    }
}

fn parse_bare_accession(input: &str, text: &str) -> Result<SeqId, SeqIdError> {
    let (acc, version) = split_version(input, text)?;
    let Some(parts) = split_accession(acc) else {
        return Err(SeqIdError::parse(input, "unrecognized identifier syntax"));
    };
    let choice = if parts.is_underscored() {
        SeqIdChoice::Other
    } else {
        SeqIdChoice::Genbank
    };
    let text_id = TextseqId {
        accession: Some(acc.to_owned()),
        version,
        ..TextseqId::default()
    };
    SeqId::from_textseq(choice, text_id)
        .ok_or_else(|| SeqIdError::parse(input, "unrecognized identifier syntax"))
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|f| !f.is_empty())
}

fn parse_fasta(input: &str, text: &str) -> Result<SeqId, SeqIdError> {
    let fields: Vec<&str> = text.split('|').collect();
    let Some(choice) = SeqIdChoice::from_fasta_tag(fields[0]) else {
        return Err(SeqIdError::parse(input, "unknown identifier type tag"));
    };
    // One trailing empty field is tolerated (`ref|NM_000001.2|`).
    let fields = match fields.split_last() {
        Some((last, rest)) if last.is_empty() && rest.len() > 1 => rest,
        _ => &fields[..],
    };
    let field = |i: usize| fields.get(i).copied();
    let max_fields = match choice {
        SeqIdChoice::General | SeqIdChoice::Pdb => 3,
        SeqIdChoice::Patent => 4,
        c if c.is_textseq() => 4,
        _ => 2,
    };
    if fields.len() > max_fields {
        return Err(SeqIdError::parse(input, "too many fields"));
    }
    let Some(first) = non_empty(field(1)).or_else(|| {
        // Text ids may omit the accession when a name follows.
        if choice.is_textseq() {
            non_empty(field(2))
        } else {
            None
        }
    }) else {
        return Err(SeqIdError::parse(input, "missing identifier content"));
    };

    let id = match choice {
        SeqIdChoice::Local => SeqId::Local(ObjectId::from_text(first)),
        SeqIdChoice::Gi => SeqId::Gi(parse_number(input, first)?),
        SeqIdChoice::Gibbsq => SeqId::Gibbsq(parse_number(input, first)?),
        SeqIdChoice::Gibbmt => SeqId::Gibbmt(parse_number(input, first)?),
        SeqIdChoice::Giim => SeqId::Giim(parse_number(input, first)?),
        SeqIdChoice::General => {
            let Some(tag) = non_empty(field(2)) else {
                return Err(SeqIdError::parse(input, "general id requires db and tag"));
            };
            SeqId::General(Dbtag::new(first, ObjectId::from_text(tag)))
        }
        SeqIdChoice::Pdb => SeqId::Pdb(PdbId {
            mol: first.to_owned(),
            chain: field(2).unwrap_or_default().to_owned(),
        }),
        SeqIdChoice::Patent => {
            let (Some(number), Some(seq)) = (non_empty(field(2)), non_empty(field(3))) else {
                return Err(SeqIdError::parse(input, "patent id requires country, number and sequence"));
            };
            SeqId::Patent(PatentId {
                country: first.to_owned(),
                number: number.to_owned(),
                seqid: parse_number(input, seq)?,
            })
        }
        _ => {
            let (accession, version) = match non_empty(field(1)) {
                Some(acc_ver) => {
                    let (acc, version) = split_version(input, acc_ver)?;
                    (Some(acc.to_owned()), version)
                }
                None => (None, None),
            };
            let text_id = TextseqId {
                accession,
                name: non_empty(field(2)).map(str::to_owned),
                version,
                release: non_empty(field(3)).map(str::to_owned),
            };
            SeqId::from_textseq(choice, text_id)
                .ok_or_else(|| SeqIdError::parse(input, "unknown identifier type tag"))?
        }
    };
    Ok(id)
}
