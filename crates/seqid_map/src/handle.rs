//! Seq-id handles.
//!
//! `SeqIdHandle` is used instead of `SeqId` wherever identifiers are
//! indexed, compared or stored: it is one enum tag, one pointer and (for
//! packed handles) two integers.
//!
//! # Two orders
//!
//! `==`, `Hash` and `Ord` are *fast* relations based on entry identity and
//! the packed payload. They are consistent within one run, which is all a
//! map or set key needs, but they are not stable between runs or even
//! between two runs that intern identifiers in a different order. Never use
//! them for output ordering.
//!
//! [`SeqIdHandle::compare_ordered`] (and [`OrderedHandle`]) is the stable,
//! content-based order. Use it whenever output must be deterministic.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroI64;
use std::str::FromStr;
use std::sync::Arc;

use seqid_ir::{SeqId, SeqIdChoice, SeqIdError, SnpScaleLimit};

use crate::info::{InfoRef, Packed, SeqIdInfo, Variant};
use crate::SeqIdMapper;

/// Set of handles returned by the matching queries.
pub type SeqIdMatches = BTreeSet<SeqIdHandle>;

/// Whether matching queries may cross text-id subtypes
/// (e.g. `gb|ACC1` and `emb|ACC1`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeakMatch {
    #[default]
    No,
    Allow,
}

#[derive(Clone, Default)]
enum Repr {
    #[default]
    Empty,
    Bound(InfoRef),
    Packed {
        info: InfoRef,
        packed: NonZeroI64,
        variant: Variant,
    },
}

/// Handle to an interned sequence identifier.
///
/// Cloning adds a lock on the entry, dropping removes it. An empty handle
/// holds nothing and locks nothing.
#[derive(Clone, Default)]
pub struct SeqIdHandle {
    repr: Repr,
}

impl SeqIdHandle {
    /// The empty handle.
    pub const EMPTY: SeqIdHandle = SeqIdHandle::empty();

    /// The empty handle. No lookup, no side effects.
    pub const fn empty() -> Self {
        SeqIdHandle { repr: Repr::Empty }
    }

    pub(crate) fn bound(info: &Arc<SeqIdInfo>) -> Self {
        SeqIdHandle {
            repr: Repr::Bound(InfoRef::new(info)),
        }
    }

    pub(crate) fn packed_with(info: &Arc<SeqIdInfo>, packed: NonZeroI64, variant: Variant) -> Self {
        SeqIdHandle {
            repr: Repr::Packed {
                info: InfoRef::new(info),
                packed,
                variant,
            },
        }
    }

    /// Handle for any identifier, through the process-wide mapper.
    pub fn get_handle(id: &SeqId) -> Self {
        SeqIdMapper::instance().get_handle(id)
    }

    /// Handle for a GI, through the process-wide mapper, without building a
    /// `SeqId`.
    pub fn get_gi_handle(gi: Packed) -> Self {
        SeqIdMapper::instance().get_gi_handle(gi)
    }

    /// Parse `text` and return the handle for it.
    pub fn parse(text: &str) -> Result<Self, SeqIdError> {
        SeqIdMapper::instance().parse_handle(text)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }

    /// The interned entry, if any.
    #[inline]
    pub fn info(&self) -> Option<&Arc<SeqIdInfo>> {
        match &self.repr {
            Repr::Empty => None,
            Repr::Bound(info) | Repr::Packed { info, .. } => Some(info.get()),
        }
    }

    /// Release the entry and clear packed fields. Idempotent.
    pub fn reset(&mut self) {
        self.repr = Repr::Empty;
    }

    /// Exchange two handles without touching lock counts.
    pub fn swap(&mut self, other: &mut SeqIdHandle) {
        std::mem::swap(&mut self.repr, &mut other.repr);
    }

    /// Subtype of the identifier.
    ///
    /// # Panics
    /// Panics on an empty handle; check [`is_empty`](Self::is_empty) or use
    /// [`try_which`](Self::try_which).
    pub fn which(&self) -> SeqIdChoice {
        self.try_which()
            .unwrap_or_else(|| panic!("which() called on an empty seq-id handle"))
    }

    pub fn try_which(&self) -> Option<SeqIdChoice> {
        self.info().map(|info| info.which())
    }

    #[inline]
    pub fn is_packed(&self) -> bool {
        matches!(self.repr, Repr::Packed { .. })
    }

    /// Packed payload, or 0 for unpacked handles.
    #[inline]
    pub fn packed(&self) -> Packed {
        match &self.repr {
            Repr::Packed { packed, .. } => packed.get(),
            _ => 0,
        }
    }

    #[inline]
    pub fn is_set_variant(&self) -> bool {
        self.variant() != 0
    }

    /// Packed variant tag, or 0 when none is set.
    #[inline]
    pub fn variant(&self) -> Variant {
        match &self.repr {
            Repr::Packed { variant, .. } => *variant,
            _ => 0,
        }
    }

    /// True for packed GI handles. `gi|0` is stored unpacked and is not
    /// reported here.
    pub fn is_gi(&self) -> bool {
        self.is_packed() && self.try_which() == Some(SeqIdChoice::Gi)
    }

    /// The GI of a packed GI handle, or 0.
    pub fn gi(&self) -> Packed {
        if self.is_gi() {
            self.packed()
        } else {
            0
        }
    }

    /// True if the identifier is a text id with both accession and version.
    pub fn is_acc_ver(&self) -> bool {
        if self.is_gi() {
            return false;
        }
        self.value_logged()
            .is_some_and(|id| id.textseq().is_some_and(seqid_ir::TextseqId::is_acc_ver))
    }

    /// Whether SNP annotation under `limit` may be placed on this sequence.
    /// An empty handle allows nothing.
    pub fn is_allowed_snp_scale_limit(&self, limit: SnpScaleLimit) -> bool {
        self.value_logged()
            .is_some_and(|id| id.is_allowed_snp_scale_limit(limit))
    }

    /// The identifier value, or `None` for an empty handle.
    ///
    /// Packed handles rebuild a fresh value on every call.
    pub fn seq_id(&self) -> Result<Option<Arc<SeqId>>, SeqIdError> {
        match &self.repr {
            Repr::Empty => Ok(None),
            Repr::Bound(info) => info.get().seq_id().map(Some),
            Repr::Packed {
                info,
                packed,
                variant,
            } => info.get().packed_seq_id(packed.get(), *variant).map(Some),
        }
    }

    /// The identifier value; an empty handle is an error.
    pub fn require_seq_id(&self) -> Result<Arc<SeqId>, SeqIdError> {
        self.seq_id()?.ok_or(SeqIdError::EmptyHandle)
    }

    /// Value for internal queries that must not fail; errors are logged.
    pub(crate) fn value_logged(&self) -> Option<Arc<SeqId>> {
        match self.seq_id() {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(%err, "cannot dereference seq-id handle");
                None
            }
        }
    }

    /// The registry that owns this handle's entry.
    pub fn mapper(&self) -> Option<Arc<SeqIdMapper>> {
        self.info().and_then(|info| info.mapper())
    }

    fn info_addr(&self) -> usize {
        self.info().map_or(0, |info| Arc::as_ptr(info) as usize)
    }

    /// Hash for same-run hash containers. Packed handles hash their payload,
    /// unpacked handles the entry address; not stable across runs.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "hash value intentionally keeps the low 32 bits"
    )]
    pub fn hash_value(&self) -> u32 {
        let hash = self.packed() as u32;
        if hash != 0 {
            hash
        } else {
            (self.info_addr() >> 3) as u32
        }
    }

    /// Fast order key: empty first, then packed by payload, then unpacked;
    /// ties broken by entry address.
    #[expect(clippy::cast_sign_loss, reason = "payload reinterpretation for ordering")]
    fn fast_key(&self) -> (bool, u64, usize) {
        (
            !self.is_empty(),
            (self.packed() as u64).wrapping_sub(1),
            self.info_addr(),
        )
    }

    /// True if `self` is the same as, or a more generic version of, `other`
    /// (an accession without version matches it with any version).
    pub fn matches_to(&self, other: &SeqIdHandle) -> bool {
        self.mapper()
            .is_some_and(|mapper| mapper.matches(self, other))
    }

    /// True if `self` is a better (more current) identifier than `other`.
    pub fn is_better(&self, other: &SeqIdHandle) -> bool {
        self.mapper()
            .is_some_and(|mapper| mapper.is_better(self, other))
    }

    pub fn have_matching_handles(&self) -> bool {
        self.have_matching_handles_with(WeakMatch::No)
    }

    pub fn have_matching_handles_with(&self, weak: WeakMatch) -> bool {
        self.mapper()
            .is_some_and(|mapper| mapper.have_matching_handles(self, weak))
    }

    pub fn have_reverse_match(&self) -> bool {
        self.have_reverse_match_with(WeakMatch::No)
    }

    pub fn have_reverse_match_with(&self, weak: WeakMatch) -> bool {
        self.mapper()
            .is_some_and(|mapper| mapper.have_reverse_match(self, weak))
    }

    /// Add `self` and every interned handle `self` matches to.
    pub fn matching_handles(&self, matches: &mut SeqIdMatches) {
        self.matching_handles_with(matches, WeakMatch::No);
    }

    pub fn matching_handles_with(&self, matches: &mut SeqIdMatches, weak: WeakMatch) {
        if let Some(mapper) = self.mapper() {
            mapper.matching_handles(self, matches, weak);
        }
    }

    /// Add `self` and every interned handle that matches to `self`.
    pub fn reverse_matching_handles(&self, matches: &mut SeqIdMatches) {
        self.reverse_matching_handles_with(matches, WeakMatch::No);
    }

    pub fn reverse_matching_handles_with(&self, matches: &mut SeqIdMatches, weak: WeakMatch) {
        if let Some(mapper) = self.mapper() {
            mapper.reverse_matching_handles(self, matches, weak);
        }
    }

    /// Stable comparison; empty handles sort first.
    pub fn try_compare_ordered(&self, other: &SeqIdHandle) -> Result<Ordering, SeqIdError> {
        let (Some(a), Some(b)) = (self.info(), other.info()) else {
            return Ok(self.is_empty().cmp(&other.is_empty()).reverse());
        };
        let by_type = a.which().cmp(&b.which());
        if by_type != Ordering::Equal {
            return Ok(by_type);
        }
        if self.is_gi() && other.is_gi() {
            return Ok(self.gi().cmp(&other.gi()));
        }
        if self == other && self.variant() == other.variant() {
            return Ok(Ordering::Equal);
        }
        a.compare_ordered(b, self, other)
    }

    /// Stable comparison, reproducible across runs.
    ///
    /// # Panics
    /// Panics if a handle cannot be dereferenced, which only happens for a
    /// handle built inconsistently with its entry.
    pub fn compare_ordered(&self, other: &SeqIdHandle) -> Ordering {
        self.try_compare_ordered(other)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// True if this handle denotes `id`.
    pub fn is_same_as(&self, id: &SeqId) -> bool {
        if self.is_gi() {
            return id.gi() == Some(self.gi());
        }
        self.mapper()
            .is_some_and(|mapper| *self == mapper.get_handle(id))
    }

    /// FASTA-style text, `gi|N` for GIs, `unknown` for an empty handle.
    pub fn as_string(&self) -> String {
        if self.is_empty() {
            "unknown".to_owned()
        } else {
            self.to_string()
        }
    }
}

impl FromStr for SeqIdHandle {
    type Err = SeqIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeqIdHandle::parse(s)
    }
}

impl PartialEq for SeqIdHandle {
    fn eq(&self, other: &Self) -> bool {
        self.packed() == other.packed() && self.info_addr() == other.info_addr()
    }
}

impl Eq for SeqIdHandle {}

impl Hash for SeqIdHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed().hash(state);
        self.info_addr().hash(state);
    }
}

impl PartialOrd for SeqIdHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fast, run-unstable order. See the module docs.
impl Ord for SeqIdHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fast_key().cmp(&other.fast_key())
    }
}

impl fmt::Display for SeqIdHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_gi() {
            return write!(f, "gi|{}", self.packed());
        }
        match self.seq_id() {
            Ok(Some(id)) => write!(f, "{id}"),
            Ok(None) => f.write_str("null"),
            Err(err) => write!(f, "<{err}>"),
        }
    }
}

impl fmt::Debug for SeqIdHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Empty => f.write_str("SeqIdHandle(null)"),
            Repr::Bound(_) => write!(f, "SeqIdHandle({self})"),
            Repr::Packed {
                packed, variant, ..
            } => write!(f, "SeqIdHandle({self}, packed={packed}, variant={variant:#x})"),
        }
    }
}

/// Handle wrapper ordered by the stable order, for ordered collections
/// whose iteration order is observable.
#[derive(Clone, Debug)]
pub struct OrderedHandle(pub SeqIdHandle);

impl PartialEq for OrderedHandle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedHandle {}

impl PartialOrd for OrderedHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare_ordered(&other.0)
    }
}
