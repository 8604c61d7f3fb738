//! Human-readable labels.
//!
//! A label is the accession with version when there is one (`NM_000001.2`),
//! a `LABEL` general tag verbatim, or the FASTA form otherwise. For a set of
//! identifiers of one sequence the one with the lowest text score wins.

use std::sync::Arc;

use seqid_ir::{ObjectId, SeqId, LABEL_DB, MAX_SCORE};

use crate::SeqIdHandle;

fn label_tag(id: &SeqId) -> Option<&str> {
    match id {
        SeqId::General(dbtag) if dbtag.db == LABEL_DB => match &dbtag.tag {
            ObjectId::Str(tag) => Some(tag),
            ObjectId::Id(_) => None,
        },
        _ => None,
    }
}

/// Label that needs no FASTA fallback: `ACC.VERSION` for versioned
/// accessions or a `LABEL` tag. Empty for anything else, including GIs.
pub fn direct_label(id: &SeqId) -> String {
    if let Some(tag) = label_tag(id) {
        return tag.to_owned();
    }
    match id.textseq() {
        Some(text) => match (&text.accession, text.version) {
            (Some(acc), Some(version)) => format!("{acc}.{version}"),
            _ => String::new(),
        },
        None => String::new(),
    }
}

/// [`direct_label`] of a handle. Empty for GI and empty handles.
pub fn direct_label_handle(handle: &SeqIdHandle) -> String {
    if handle.is_gi() {
        return String::new();
    }
    handle
        .value_logged()
        .map(|id| direct_label(&id))
        .unwrap_or_default()
}

/// Label of one identifier: upper-cased accession (or the locus name) with
/// `.version`, a `LABEL` tag, or the FASTA form.
pub fn label(id: &SeqId) -> String {
    let mut ret = String::new();
    if let Some(text) = id.textseq() {
        if let Some(acc) = &text.accession {
            ret = acc.to_ascii_uppercase();
        } else if let Some(name) = &text.name {
            ret.clone_from(name);
        }
        if let Some(version) = text.version {
            ret.push('.');
            ret.push_str(&version.to_string());
        }
    } else if let Some(tag) = label_tag(id) {
        ret = tag.to_owned();
    }
    if ret.is_empty() {
        ret = id.as_fasta_string();
    }
    ret
}

/// Label of a handle; GI handles print as `gi|N`. Empty for an empty handle.
pub fn label_handle(handle: &SeqIdHandle) -> String {
    if handle.is_gi() {
        return handle.as_string();
    }
    handle
        .value_logged()
        .map(|id| label(&id))
        .unwrap_or_default()
}

/// Label of the best-scoring handle. Empty if `handles` is empty or
/// nothing scores.
pub fn label_for_handles(handles: &[SeqIdHandle]) -> String {
    let mut best: Option<(&SeqIdHandle, Arc<SeqId>)> = None;
    let mut best_score = MAX_SCORE;
    let mut gi = 0;
    for handle in handles {
        let Some(id) = handle.value_logged() else {
            continue;
        };
        if handle.is_gi() {
            gi = handle.gi();
        }
        let score = id.text_score();
        if score < best_score {
            best_score = score;
            best = Some((handle, id));
        }
    }
    let Some((handle, id)) = best else {
        return String::new();
    };
    if gi != 0 && !handle.is_gi() {
        warn_versionless(&id, gi);
    }
    label_handle(handle)
}

/// Label of the best-scoring identifier. Empty if `ids` is empty or nothing
/// scores.
pub fn label_for_ids(ids: &[Arc<SeqId>]) -> String {
    let best = ids
        .iter()
        .map(|id| (id.text_score(), id))
        .filter(|(score, _)| *score < MAX_SCORE)
        .min_by_key(|(score, _)| *score)
        .map(|(_, id)| id);
    let Some(best) = best else {
        return String::new();
    };
    if let Some(gi) = ids.iter().rev().find_map(|id| id.gi()) {
        if gi != 0 && !best.is_gi() {
            warn_versionless(best, gi);
        }
    }
    label(best)
}

fn warn_versionless(best: &SeqId, gi: i64) {
    if !cfg!(debug_assertions) {
        return;
    }
    if let Some(text) = best.textseq() {
        if let (Some(acc), None) = (&text.accession, text.version) {
            tracing::warn!(accession = %acc, gi, "using version-less accession instead of GI");
        }
    }
}

#[cfg(test)]
mod tests;
