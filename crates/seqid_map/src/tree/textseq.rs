//! Text-id tree (`gb`, `emb`, `ref`, ...), one instance per subtype.
//!
//! Plain accessions (`NM_000001.2`, `ACC123`) without name or release are
//! packed: all accession numbers of one prefix, digit count and version share
//! one entry, and the handle carries the number and the letter case. Each
//! packed entry also records the numbers looked up through it, so matching
//! only reports accessions that were actually interned. Every other text id
//! gets its own entry, indexed by upper-cased accession and by upper-cased
//! name.

use std::num::NonZeroI64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use seqid_ir::{split_accession, SeqId, SeqIdChoice, TextseqId};
use smallvec::SmallVec;

use super::{is_same, SeqIdTree};
use crate::info::{
    accession_payload, case_variant, AccessionFamily, InfoKind, PackedAccessionKey, SeqIdInfo,
    Variant,
};
use crate::{SeqIdHandle, SeqIdMapper};

type Bucket = SmallVec<[Arc<SeqIdInfo>; 2]>;

/// A text id reduced to its packed form.
struct PackedAccession {
    family: AccessionFamily,
    version: Option<i32>,
    packed: NonZeroI64,
    variant: Variant,
}

impl PackedAccession {
    fn from_text(text: &TextseqId) -> Option<Self> {
        if text.name.is_some() || text.release.is_some() {
            return None;
        }
        let parts = text.accession_parts()?;
        Some(PackedAccession {
            family: AccessionFamily::from_parts(&parts)?,
            version: text.version,
            packed: accession_payload(&parts)?,
            variant: case_variant(parts.prefix),
        })
    }
}

/// One packed entry and the accession numbers interned through it.
struct PackedVersion {
    info: Arc<SeqIdInfo>,
    numbers: FxHashSet<NonZeroI64>,
}

#[derive(Default)]
struct TextseqState {
    packed: FxHashMap<AccessionFamily, FxHashMap<Option<i32>, PackedVersion>>,
    by_accession: FxHashMap<String, Bucket>,
    by_name: FxHashMap<String, Bucket>,
}

fn plain_text(info: &SeqIdInfo) -> Option<&TextseqId> {
    info.plain_value().and_then(|id| id.textseq())
}

fn remove_from(index: &mut FxHashMap<String, Bucket>, key: &str, info: &SeqIdInfo) -> bool {
    let Some(bucket) = index.get_mut(key) else {
        return false;
    };
    let before = bucket.len();
    bucket.retain(|stored| !is_same(stored, info));
    let removed = bucket.len() != before;
    if bucket.is_empty() {
        index.remove(key);
    }
    removed
}

impl TextseqState {
    fn find_plain(&self, text: &TextseqId) -> Option<&Arc<SeqIdInfo>> {
        let bucket = match (&text.accession, &text.name) {
            (Some(acc), _) => self.by_accession.get(&acc.to_ascii_uppercase()),
            (None, Some(name)) => self.by_name.get(&name.to_ascii_uppercase()),
            (None, None) => None,
        }?;
        bucket
            .iter()
            .find(|info| plain_text(info).is_some_and(|stored| stored.equals_ignore_case(text)))
    }

    fn index_plain(&mut self, info: &Arc<SeqIdInfo>, text: &TextseqId) {
        if let Some(acc) = &text.accession {
            self.by_accession
                .entry(acc.to_ascii_uppercase())
                .or_default()
                .push(Arc::clone(info));
        }
        if let Some(name) = &text.name {
            self.by_name
                .entry(name.to_ascii_uppercase())
                .or_default()
                .push(Arc::clone(info));
        }
    }

    fn remove_plain(&mut self, text: &TextseqId, info: &SeqIdInfo) -> bool {
        let mut removed = false;
        if let Some(acc) = &text.accession {
            removed |= remove_from(&mut self.by_accession, &acc.to_ascii_uppercase(), info);
        }
        if let Some(name) = &text.name {
            removed |= remove_from(&mut self.by_name, &name.to_ascii_uppercase(), info);
        }
        removed
    }

    fn remove_packed(&mut self, key: &PackedAccessionKey, info: &SeqIdInfo) -> bool {
        let Some(versions) = self.packed.get_mut(&key.family) else {
            return false;
        };
        if !versions
            .get(&key.version)
            .is_some_and(|stored| is_same(&stored.info, info))
        {
            return false;
        }
        versions.remove(&key.version);
        if versions.is_empty() {
            self.packed.remove(&key.family);
        }
        true
    }

    /// Append handles related to `text`: with `reverse == false` those that
    /// `text` matches to, otherwise those that match to `text`.
    fn collect(&self, text: &TextseqId, reverse: bool, out: &mut Vec<SeqIdHandle>) {
        let accepts = |candidate: &TextseqId| {
            if reverse {
                candidate.matches_to(text)
            } else {
                text.matches_to(candidate)
            }
        };

        let buckets = [
            text.accession
                .as_ref()
                .and_then(|acc| self.by_accession.get(&acc.to_ascii_uppercase())),
            text.name
                .as_ref()
                .and_then(|name| self.by_name.get(&name.to_ascii_uppercase())),
        ];
        for info in buckets.into_iter().flatten().flatten() {
            if plain_text(info).is_some_and(accepts) {
                out.push(SeqIdHandle::bound(info));
            }
        }

        let Some(acc) = &text.accession else {
            return;
        };
        let Some(parts) = split_accession(acc) else {
            return;
        };
        let (Some(family), Some(packed)) = (AccessionFamily::from_parts(&parts), accession_payload(&parts))
        else {
            return;
        };
        let Some(versions) = self.packed.get(&family) else {
            return;
        };
        let variant = case_variant(parts.prefix);
        for (version, slot) in versions {
            if !slot.numbers.contains(&packed) {
                continue;
            }
            let candidate = TextseqId {
                accession: Some(acc.clone()),
                version: *version,
                ..TextseqId::default()
            };
            if accepts(&candidate) {
                out.push(SeqIdHandle::packed_with(&slot.info, packed, variant));
            }
        }
    }
}

pub(crate) struct TextseqTree {
    choice: SeqIdChoice,
    mapper: Weak<SeqIdMapper>,
    pack: bool,
    state: RwLock<TextseqState>,
    dropped: AtomicU64,
}

impl TextseqTree {
    pub(crate) fn new(choice: SeqIdChoice, mapper: Weak<SeqIdMapper>, pack: bool) -> Self {
        debug_assert!(choice.is_textseq());
        TextseqTree {
            choice,
            mapper,
            pack,
            state: RwLock::new(TextseqState::default()),
            dropped: AtomicU64::new(0),
        }
    }

    fn packed_handle(&self, acc: PackedAccession) -> SeqIdHandle {
        {
            let state = self.state.read();
            let found = state
                .packed
                .get(&acc.family)
                .and_then(|versions| versions.get(&acc.version))
                .filter(|slot| slot.numbers.contains(&acc.packed));
            if let Some(slot) = found {
                return SeqIdHandle::packed_with(&slot.info, acc.packed, acc.variant);
            }
        }

        let mut state = self.state.write();
        let versions = state.packed.entry(acc.family.clone()).or_default();
        let slot = versions.entry(acc.version).or_insert_with(|| {
            tracing::trace!(
                choice = %self.choice,
                prefix = acc.family.prefix(),
                digits = acc.family.digits(),
                version = ?acc.version,
                "creating packed accession entry"
            );
            let key = PackedAccessionKey {
                family: acc.family.clone(),
                version: acc.version,
            };
            PackedVersion {
                info: Arc::new(SeqIdInfo::packed_accession(self.choice, key, self.mapper.clone())),
                numbers: FxHashSet::default(),
            }
        });
        slot.numbers.insert(acc.packed);
        SeqIdHandle::packed_with(&slot.info, acc.packed, acc.variant)
    }

    fn plain_handle(&self, id: &SeqId, text: &TextseqId) -> SeqIdHandle {
        {
            let state = self.state.read();
            if let Some(info) = state.find_plain(text) {
                return SeqIdHandle::bound(info);
            }
        }

        let mut state = self.state.write();
        if let Some(info) = state.find_plain(text) {
            return SeqIdHandle::bound(info);
        }
        let info = Arc::new(SeqIdInfo::plain(Arc::new(id.clone()), self.mapper.clone()));
        state.index_plain(&info, text);
        tracing::trace!(%id, "created seq-id entry");
        SeqIdHandle::bound(&info)
    }

    fn text_of(handle: &SeqIdHandle) -> Option<Arc<SeqId>> {
        handle.value_logged().filter(|id| id.textseq().is_some())
    }
}

impl SeqIdTree for TextseqTree {
    fn find_or_create(&self, id: &SeqId) -> SeqIdHandle {
        let Some(text) = id.textseq().filter(|_| id.which() == self.choice) else {
            panic!("{} tree asked to intern {id}", self.choice);
        };
        if self.pack {
            if let Some(acc) = PackedAccession::from_text(text) {
                return self.packed_handle(acc);
            }
        }
        self.plain_handle(id, text)
    }

    fn drop_info(&self, info: &SeqIdInfo) {
        let mut state = self.state.write();
        if info.is_locked() {
            return;
        }
        let removed = match info.kind() {
            InfoKind::PackedAccession(key) => state.remove_packed(key, info),
            InfoKind::Plain(id) => id
                .textseq()
                .is_some_and(|text| state.remove_plain(text, info)),
            InfoKind::GiFamily => false,
        };
        if removed {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(?info, "dropped text-id entry");
        }
    }

    fn have_matching_handles(&self) -> bool {
        true
    }

    fn have_reverse_match(&self) -> bool {
        true
    }

    fn find_matches(&self, handle: &SeqIdHandle, out: &mut Vec<SeqIdHandle>) {
        out.push(handle.clone());
        if let Some(id) = Self::text_of(handle) {
            if let Some(text) = id.textseq() {
                self.state.read().collect(text, false, out);
            }
        }
    }

    fn find_reverse_matches(&self, handle: &SeqIdHandle, out: &mut Vec<SeqIdHandle>) {
        out.push(handle.clone());
        if let Some(id) = Self::text_of(handle) {
            if let Some(text) = id.textseq() {
                self.state.read().collect(text, true, out);
            }
        }
    }

    fn matches(&self, h1: &SeqIdHandle, h2: &SeqIdHandle) -> bool {
        if h1 == h2 {
            return true;
        }
        let (Some(a), Some(b)) = (Self::text_of(h1), Self::text_of(h2)) else {
            return false;
        };
        match (a.textseq(), b.textseq()) {
            (Some(a), Some(b)) => a.matches_to(b),
            _ => false,
        }
    }

    fn is_better_version(&self, h1: &SeqIdHandle, h2: &SeqIdHandle) -> bool {
        let (Some(a), Some(b)) = (Self::text_of(h1), Self::text_of(h2)) else {
            return false;
        };
        match (a.textseq(), b.textseq()) {
            (Some(a), Some(b)) => a.same_accession(b) && a.version > b.version,
            _ => false,
        }
    }

    fn collect_text_matches(&self, text: &TextseqId, reverse: bool, out: &mut Vec<SeqIdHandle>) {
        self.state.read().collect(text, reverse, out);
    }

    fn live_entries(&self) -> usize {
        let state = self.state.read();
        let packed: usize = state.packed.values().map(|versions| versions.len()).sum();
        let with_accession: usize = state.by_accession.values().map(|bucket| bucket.len()).sum();
        let name_only: usize = state
            .by_name
            .values()
            .flatten()
            .filter(|info| plain_text(info).is_some_and(|text| text.accession.is_none()))
            .count();
        packed + with_accession + name_only
    }

    fn dropped_entries(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
