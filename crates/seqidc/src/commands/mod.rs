//! Command implementations.
//!
//! Every command takes the mapper to intern into and returns the lines to
//! print, so the output can be checked without a process.

use std::io::BufRead;

use seqid_ir::SeqIdError;
use seqid_map::{label_for_handles, label_handle, SeqIdHandle, SeqIdMapper, SeqIdMatches, WeakMatch};

/// Command failure.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    SeqId(#[from] SeqIdError),
    #[error("cannot read identifiers: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(&'static str),
}

/// Expand `-` into the non-empty lines of `input`; other arguments are
/// taken verbatim.
pub fn collect_ids(args: &[String], input: impl BufRead) -> Result<Vec<String>, CommandError> {
    let mut ids = Vec::with_capacity(args.len());
    let mut input = Some(input);
    for arg in args {
        if arg != "-" {
            ids.push(arg.clone());
            continue;
        }
        // stdin can be consumed once
        let Some(reader) = input.take() else {
            continue;
        };
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() && !line.starts_with('#') {
                ids.push(line.to_owned());
            }
        }
    }
    Ok(ids)
}

fn intern_all(mapper: &SeqIdMapper, ids: &[String]) -> Result<Vec<SeqIdHandle>, CommandError> {
    ids.iter()
        .map(|text| mapper.parse_handle(text).map_err(CommandError::from))
        .collect()
}

fn describe(handle: &SeqIdHandle) -> String {
    let mut line = format!("{handle}\t{}", handle.which());
    if handle.is_packed() {
        line.push_str(&format!("\tpacked={}", handle.packed()));
        if handle.is_set_variant() {
            line.push_str(&format!("\tvariant={:#x}", handle.variant()));
        }
    }
    line
}

/// One line per identifier: the handle, its subtype tag and packing.
#[tracing::instrument(level = "debug", skip_all, fields(count = ids.len()))]
pub fn intern(mapper: &SeqIdMapper, ids: &[String]) -> Result<Vec<String>, CommandError> {
    let handles = intern_all(mapper, ids)?;
    Ok(handles.iter().map(describe).collect())
}

/// Identifiers in stable order, duplicates removed.
pub fn sort(mapper: &SeqIdMapper, ids: &[String]) -> Result<Vec<String>, CommandError> {
    let unique: SeqIdMatches = intern_all(mapper, ids)?.into_iter().collect();
    let mut handles: Vec<SeqIdHandle> = unique.into_iter().collect();
    handles.sort_by(SeqIdHandle::compare_ordered);
    Ok(handles.iter().map(SeqIdHandle::to_string).collect())
}

/// Handles among `ids[1..]` that `ids[0]` matches to, in stable order.
///
/// Every identifier is interned first, so the query sees all of them.
pub fn matching(mapper: &SeqIdMapper, ids: &[String], weak: WeakMatch) -> Result<Vec<String>, CommandError> {
    let handles = intern_all(mapper, ids)?;
    let Some((query, _)) = handles.split_first() else {
        return Err(CommandError::Usage("match needs a query identifier"));
    };
    let mut matches = SeqIdMatches::new();
    mapper.matching_handles(query, &mut matches, weak);
    let mut found: Vec<SeqIdHandle> = matches.into_iter().collect();
    found.sort_by(SeqIdHandle::compare_ordered);
    Ok(found.iter().map(SeqIdHandle::to_string).collect())
}

/// The best label for the whole set, followed by each identifier's own
/// label.
pub fn label(mapper: &SeqIdMapper, ids: &[String]) -> Result<Vec<String>, CommandError> {
    let handles = intern_all(mapper, ids)?;
    if handles.is_empty() {
        return Err(CommandError::Usage("label needs at least one identifier"));
    }
    let mut lines = vec![label_for_handles(&handles)];
    lines.extend(
        handles
            .iter()
            .map(|handle| format!("{handle}\t{}", label_handle(handle))),
    );
    Ok(lines)
}

#[cfg(test)]
mod tests;
