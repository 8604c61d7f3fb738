//! Interned seq-id entries.
//!
//! A `SeqIdInfo` is the shared record behind every bound `SeqIdHandle`.
//! Handles keep it alive through an `Arc` and additionally hold one *lock*
//! each on its atomic lock counter. When the last lock is released the entry
//! asks its classification tree to drop it from the tree's index; the tree
//! re-checks the counter under its own write lock, so an entry that was
//! found again concurrently is never removed.

use std::cmp::Ordering;
use std::num::NonZeroI64;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

use seqid_ir::{AccessionParts, SeqId, SeqIdChoice, SeqIdError, TextseqId};

use crate::{SeqIdHandle, SeqIdMapper};

/// Packed numeric payload carried by a handle.
pub type Packed = i64;

/// Packed variant tag carried by a handle (accession letter case).
pub type Variant = u64;

/// Accessions sharing a prefix and a digit count, e.g. `NM_` + 6 digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessionFamily {
    /// Upper-cased prefix, including a trailing `_` if present.
    prefix: Box<str>,
    digits: u8,
}

impl AccessionFamily {
    pub fn from_parts(parts: &AccessionParts<'_>) -> Option<Self> {
        let digits = u8::try_from(parts.digits.len()).ok()?;
        Some(AccessionFamily {
            prefix: parts.prefix.to_ascii_uppercase().into_boxed_str(),
            digits,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn digits(&self) -> usize {
        usize::from(self.digits)
    }
}

/// Key of one packed accession entry: a family plus a version.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackedAccessionKey {
    pub family: AccessionFamily,
    pub version: Option<i32>,
}

impl PackedAccessionKey {
    /// Rebuild the text id for a packed handle of this family.
    ///
    /// `packed` is the accession number plus one; bit `i` of `variant` marks
    /// prefix letter `i` as lower case.
    pub fn text_id(&self, packed: Packed, variant: Variant) -> TextseqId {
        let mut accession = String::with_capacity(self.family.prefix.len() + self.family.digits());
        for (i, c) in self.family.prefix.chars().enumerate() {
            if i < 64 && variant & (1 << i) != 0 {
                accession.push(c.to_ascii_lowercase());
            } else {
                accession.push(c);
            }
        }
        let number = packed - 1;
        accession.push_str(&format!("{number:0width$}", width = self.family.digits()));
        TextseqId {
            accession: Some(accession),
            version: self.version,
            ..TextseqId::default()
        }
    }
}

/// Per-family behavior of an entry.
#[derive(Debug)]
pub enum InfoKind {
    /// One canonical value.
    Plain(Arc<SeqId>),
    /// Shared by every non-zero GI; the handle's packed payload is the GI.
    GiFamily,
    /// Shared by every accession number of one family and version.
    PackedAccession(PackedAccessionKey),
}

/// Interned entry.
pub struct SeqIdInfo {
    which: SeqIdChoice,
    kind: InfoKind,
    lock_counter: AtomicI64,
    mapper: Weak<SeqIdMapper>,
}

impl SeqIdInfo {
    pub(crate) fn plain(seq_id: Arc<SeqId>, mapper: Weak<SeqIdMapper>) -> Self {
        SeqIdInfo {
            which: seq_id.which(),
            kind: InfoKind::Plain(seq_id),
            lock_counter: AtomicI64::new(0),
            mapper,
        }
    }

    pub(crate) fn gi_family(mapper: Weak<SeqIdMapper>) -> Self {
        SeqIdInfo {
            which: SeqIdChoice::Gi,
            kind: InfoKind::GiFamily,
            lock_counter: AtomicI64::new(0),
            mapper,
        }
    }

    pub(crate) fn packed_accession(
        which: SeqIdChoice,
        key: PackedAccessionKey,
        mapper: Weak<SeqIdMapper>,
    ) -> Self {
        debug_assert!(which.is_textseq());
        SeqIdInfo {
            which,
            kind: InfoKind::PackedAccession(key),
            lock_counter: AtomicI64::new(0),
            mapper,
        }
    }

    #[inline]
    pub fn which(&self) -> SeqIdChoice {
        self.which
    }

    #[inline]
    pub fn kind(&self) -> &InfoKind {
        &self.kind
    }

    /// The stored value of a plain entry.
    pub(crate) fn plain_value(&self) -> Option<&Arc<SeqId>> {
        match &self.kind {
            InfoKind::Plain(seq_id) => Some(seq_id),
            _ => None,
        }
    }

    /// The registry that minted this entry, if it is still alive.
    pub fn mapper(&self) -> Option<Arc<SeqIdMapper>> {
        self.mapper.upgrade()
    }

    #[inline]
    pub fn add_lock(&self) {
        self.lock_counter.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Release one lock. The release that takes the counter to zero routes
    /// the entry to its tree's `drop_info`.
    #[inline]
    pub fn remove_lock(&self) {
        let previous = self.lock_counter.fetch_sub(1, AtomicOrdering::AcqRel);
        debug_assert!(previous > 0, "seq-id info lock counter went negative");
        if previous <= 1 {
            self.remove_last_lock();
        }
    }

    #[cold]
    fn remove_last_lock(&self) {
        if let Some(mapper) = self.mapper.upgrade() {
            mapper.tree(self.which).drop_info(self);
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.lock_counter.load(AtomicOrdering::Acquire) != 0
    }

    /// Number of live locks (handles) on this entry.
    pub fn lock_count(&self) -> i64 {
        self.lock_counter.load(AtomicOrdering::Acquire)
    }

    /// The canonical value of a plain entry.
    pub fn seq_id(&self) -> Result<Arc<SeqId>, SeqIdError> {
        match &self.kind {
            InfoKind::Plain(seq_id) => Ok(Arc::clone(seq_id)),
            InfoKind::GiFamily | InfoKind::PackedAccession(_) => Err(SeqIdError::TypeError(
                "seq-id info is a packed family and has no single value",
            )),
        }
    }

    /// Synthesize the value of a packed handle. A fresh value is built on
    /// every call.
    pub fn packed_seq_id(&self, packed: Packed, variant: Variant) -> Result<Arc<SeqId>, SeqIdError> {
        match &self.kind {
            InfoKind::Plain(_) => Err(SeqIdError::TypeError("seq-id handle is not packed")),
            InfoKind::GiFamily => Ok(Arc::new(SeqId::Gi(packed))),
            InfoKind::PackedAccession(key) => {
                SeqId::from_textseq(self.which, key.text_id(packed, variant))
                    .map(Arc::new)
                    .ok_or(SeqIdError::TypeError("packed accession entry has a non-text subtype"))
            }
        }
    }

    /// Stable comparison of two handles whose entries are `self` and `other`.
    ///
    /// Handles of one packed accession family compare numerically without
    /// rebuilding their values.
    pub fn compare_ordered(
        &self,
        other: &SeqIdInfo,
        h_this: &SeqIdHandle,
        h_other: &SeqIdHandle,
    ) -> Result<Ordering, SeqIdError> {
        if let (InfoKind::PackedAccession(a), InfoKind::PackedAccession(b)) = (&self.kind, &other.kind) {
            if self.which == other.which && a.family == b.family {
                return Ok(h_this
                    .packed()
                    .cmp(&h_other.packed())
                    .then_with(|| a.version.cmp(&b.version)));
            }
        }
        let a = h_this.require_seq_id()?;
        let b = h_other.require_seq_id()?;
        Ok(a.compare_ordered(&b))
    }
}

impl Drop for SeqIdInfo {
    fn drop(&mut self) {
        debug_assert_eq!(
            *self.lock_counter.get_mut(),
            0,
            "seq-id info destroyed while locked"
        );
    }
}

impl std::fmt::Debug for SeqIdInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeqIdInfo")
            .field("which", &self.which)
            .field("kind", &self.kind)
            .field("locks", &self.lock_count())
            .finish_non_exhaustive()
    }
}

/// One lock on an entry: keeps the entry alive and counted.
pub(crate) struct InfoRef(Arc<SeqIdInfo>);

impl InfoRef {
    pub(crate) fn new(info: &Arc<SeqIdInfo>) -> Self {
        info.add_lock();
        InfoRef(Arc::clone(info))
    }

    #[inline]
    pub(crate) fn get(&self) -> &Arc<SeqIdInfo> {
        &self.0
    }
}

impl Clone for InfoRef {
    fn clone(&self) -> Self {
        InfoRef::new(&self.0)
    }
}

impl Drop for InfoRef {
    fn drop(&mut self) {
        self.0.remove_lock();
    }
}

/// Packed payload of an accession number: the number plus one, so that
/// accession `0` still packs to a non-zero value.
pub(crate) fn accession_payload(parts: &AccessionParts<'_>) -> Option<NonZeroI64> {
    NonZeroI64::new(parts.number().checked_add(1)?)
}

/// Case variant of an accession prefix: bit `i` set when letter `i` is
/// lower case.
pub(crate) fn case_variant(prefix: &str) -> Variant {
    prefix
        .bytes()
        .enumerate()
        .filter(|(i, b)| *i < 64 && b.is_ascii_lowercase())
        .fold(0, |variant, (i, _)| variant | (1 << i))
}
