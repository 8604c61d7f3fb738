//! Tree for subtypes without matching rules: local, general, PDB, patent,
//! and the small integer subtypes. Entries are keyed by the value itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use seqid_ir::{SeqId, SeqIdChoice};

use super::{is_same, SeqIdTree};
use crate::info::SeqIdInfo;
use crate::{SeqIdHandle, SeqIdMapper};

pub(crate) struct PlainTree {
    choice: SeqIdChoice,
    mapper: Weak<SeqIdMapper>,
    entries: RwLock<FxHashMap<Arc<SeqId>, Arc<SeqIdInfo>>>,
    dropped: AtomicU64,
}

impl PlainTree {
    pub(crate) fn new(choice: SeqIdChoice, mapper: Weak<SeqIdMapper>) -> Self {
        PlainTree {
            choice,
            mapper,
            entries: RwLock::new(FxHashMap::default()),
            dropped: AtomicU64::new(0),
        }
    }
}

impl SeqIdTree for PlainTree {
    fn find_or_create(&self, id: &SeqId) -> SeqIdHandle {
        assert_eq!(id.which(), self.choice, "{} tree asked to intern {id}", self.choice);
        {
            let entries = self.entries.read();
            if let Some(info) = entries.get(id) {
                return SeqIdHandle::bound(info);
            }
        }

        let mut entries = self.entries.write();
        if let Some(info) = entries.get(id) {
            return SeqIdHandle::bound(info);
        }
        let value = Arc::new(id.clone());
        let info = Arc::new(SeqIdInfo::plain(Arc::clone(&value), self.mapper.clone()));
        entries.insert(value, Arc::clone(&info));
        tracing::trace!(%id, "created seq-id entry");
        SeqIdHandle::bound(&info)
    }

    fn drop_info(&self, info: &SeqIdInfo) {
        let Some(id) = info.plain_value() else {
            return;
        };
        let mut entries = self.entries.write();
        if info.is_locked() {
            return;
        }
        if entries.get(&**id).is_some_and(|stored| is_same(stored, info)) {
            entries.remove(&**id);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(%id, "dropped seq-id entry");
        }
    }

    fn live_entries(&self) -> usize {
        self.entries.read().len()
    }

    fn dropped_entries(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
