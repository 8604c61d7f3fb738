//! Multi-threaded interning and release.
//!
//! Entries must be shared by every thread that looks the same value up, and
//! must leave their tree exactly once after the last handle anywhere is
//! dropped.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::{Arc, Barrier};
use std::thread;

use rayon::prelude::*;
use seqid_map::{MapperConfig, SeqIdHandle, SeqIdMapper, SeqIdMatches, WeakMatch};

const THREADS: usize = 8;
const ROUNDS: usize = 500;

const IDS: [&str; 8] = [
    "gi|12345",
    "gi|0",
    "lcl|contig7",
    "gnl|DB|tag",
    "gb|ACC123|",
    "gb|ACC123.1|",
    "gb|ACC123.1|LOCUS",
    "ref|NM_000001.2|",
];

fn check_drained(mapper: &SeqIdMapper) {
    assert_eq!(mapper.live_entries(), 0, "{mapper:?}");
}

#[test]
fn concurrent_lookups_share_entries() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let barrier = Barrier::new(THREADS);
    let per_thread: Vec<Vec<SeqIdHandle>> = thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    IDS.iter()
                        .map(|text| mapper.parse_handle(text).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for handles in &per_thread[1..] {
        assert_eq!(handles, &per_thread[0]);
    }
    let info = per_thread[0][2].info().unwrap();
    assert_eq!(info.lock_count(), i64::try_from(THREADS).unwrap());

    drop(per_thread);
    check_drained(&mapper);
}

#[test]
fn create_and_release_race() {
    for config in [MapperConfig::default(), MapperConfig::unpacked()] {
        let mapper = SeqIdMapper::new(config);
        let barrier = Barrier::new(THREADS);
        thread::scope(|s| {
            for t in 0..THREADS {
                let mapper = &mapper;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for round in 0..ROUNDS {
                        let text = IDS[(t + round) % IDS.len()];
                        let handle = mapper.parse_handle(text).unwrap();
                        let copy = handle.clone();
                        drop(handle);
                        assert_eq!(copy.to_string(), mapper.parse_handle(text).unwrap().to_string());
                    }
                });
            }
        });
        check_drained(&mapper);
        assert!(mapper.dropped_entries() >= 1);
    }
}

#[test]
fn held_handle_survives_concurrent_churn() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let held = mapper.parse_handle("lcl|contig7").unwrap();
    let entry = Arc::clone(held.info().unwrap());

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    let handle = mapper.parse_handle("lcl|contig7").unwrap();
                    assert!(Arc::ptr_eq(handle.info().unwrap(), &entry));
                }
            });
        }
    });

    assert_eq!(mapper.dropped_entries(), 0);
    assert_eq!(entry.lock_count(), 1);
    drop(held);
    check_drained(&mapper);
    assert_eq!(mapper.dropped_entries(), 1);
}

#[test]
fn parallel_matching_queries() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let versions: Vec<SeqIdHandle> = (1..=20)
        .map(|v| mapper.parse_handle(&format!("gb|ACC123.{v}|")).unwrap())
        .collect();
    let generic = mapper.parse_handle("gb|ACC123|").unwrap();

    let sizes: Vec<usize> = (0..64)
        .into_par_iter()
        .map(|i| {
            let mut matches = SeqIdMatches::new();
            if i % 2 == 0 {
                generic.matching_handles_with(&mut matches, WeakMatch::Allow);
            } else {
                let scratch = mapper.parse_handle(&format!("emb|ACC123.{i}|")).unwrap();
                scratch.reverse_matching_handles(&mut matches);
            }
            matches.len()
        })
        .collect();

    for (i, size) in sizes.iter().enumerate() {
        if i % 2 == 0 {
            assert!(*size >= versions.len() + 1, "{i}: {size}");
        } else {
            assert_eq!(*size, 1, "{i}");
        }
    }
    drop(versions);
    drop(generic);
    check_drained(&mapper);
}

#[test]
fn parallel_interning_matches_sequential() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let texts: Vec<String> = (0..1000).map(|i| format!("ref|NM_{:06}.{}|", i % 97, i % 3 + 1)).collect();
    let parallel: Vec<SeqIdHandle> = texts
        .par_iter()
        .map(|text| mapper.parse_handle(text).unwrap())
        .collect();
    for (text, handle) in texts.iter().zip(&parallel) {
        assert_eq!(*handle, mapper.parse_handle(text).unwrap());
        assert_eq!(handle.to_string(), *text);
    }
    assert_eq!(mapper.live_entries(), 3);
    drop(parallel);
    check_drained(&mapper);
}
