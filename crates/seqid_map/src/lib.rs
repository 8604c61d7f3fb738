//! Seq-id Map - Interned Sequence Identifier Handles
//!
//! Sequence identifiers (`gi|12345`, `ref|NM_000001.2|`, `lcl|contig7`) are
//! interned once per process and used everywhere as small, cheap
//! `SeqIdHandle`s:
//! - [`SeqIdMapper`] is the registry; one classification tree per subtype
//! - [`SeqIdInfo`] is the shared entry behind a handle, lock-counted
//! - [`SeqIdHandle`] is the key type for maps and sets of identifiers
//!
//! Numeric-heavy families are *packed*: every non-zero GI shares one entry,
//! and so does every accession number of one prefix, digit count and
//! version. The number itself travels in the handle.
//!
//! # Thread Safety
//!
//! Handles are `Send + Sync` and may be created, cloned, compared and
//! dropped from any thread. An entry is removed from its tree when its last
//! handle is dropped, exactly once, even if another thread is looking the
//! same identifier up at that moment.
//!
//! # Example
//!
//! ```
//! use seqid_map::{SeqIdHandle, SeqIdMatches};
//!
//! let exact = SeqIdHandle::parse("gb|ACC123.1|").unwrap_or_default();
//! let any_version = SeqIdHandle::parse("gb|ACC123|").unwrap_or_default();
//! assert!(any_version.matches_to(&exact));
//!
//! let mut matches = SeqIdMatches::new();
//! any_version.matching_handles(&mut matches);
//! assert!(matches.contains(&exact));
//! ```

mod config;
mod handle;
mod info;
mod label;
mod mapper;
mod tree;

pub use config::{MapperConfig, PACK_GI_ENV, PACK_TEXTID_ENV};
pub use handle::{OrderedHandle, SeqIdHandle, SeqIdMatches, WeakMatch};
pub use info::{AccessionFamily, InfoKind, Packed, PackedAccessionKey, SeqIdInfo, Variant};
pub use label::{
    direct_label, direct_label_handle, label, label_for_handles, label_for_ids, label_handle,
};
pub use mapper::SeqIdMapper;
pub use tree::SeqIdTree;

pub use seqid_ir::{SeqId, SeqIdChoice, SeqIdError, SnpScaleLimit, TextseqId};
