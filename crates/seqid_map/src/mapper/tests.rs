use std::sync::Arc;

use pretty_assertions::assert_eq;
use seqid_ir::{SeqId, SeqIdChoice};

use super::*;

#[test]
fn one_tree_per_subtype() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    for choice in SeqIdChoice::ALL {
        assert_eq!(mapper.tree(choice).live_entries(), 0, "{choice}");
        assert_eq!(
            mapper.tree(choice).have_matching_handles(),
            choice.is_textseq(),
            "{choice}"
        );
    }
}

#[test]
fn interning_is_idempotent() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let texts = ["lcl|x", "gnl|DB|7", "pdb|1ABC|A", "pat|US|123|4", "gb|ACC1.1|LOC", "ref|NM_1.1|"];
    for text in texts {
        let first = mapper.parse_handle(text).unwrap();
        let second = mapper.get_handle(&SeqId::parse(text).unwrap());
        assert_eq!(first, second, "{text}");
        assert_eq!(first.which(), second.which());
    }
    assert_eq!(mapper.live_entries(), 0);
}

#[test]
fn entries_belong_to_their_mapper() {
    let a = SeqIdMapper::new(MapperConfig::default());
    let b = SeqIdMapper::new(MapperConfig::default());
    let ha = a.parse_handle("lcl|x").unwrap();
    let hb = b.parse_handle("lcl|x").unwrap();
    assert_ne!(ha, hb);
    assert!(Arc::ptr_eq(&ha.mapper().unwrap(), &a));
    assert!(Arc::ptr_eq(&hb.mapper().unwrap(), &b));
    assert_eq!(ha.compare_ordered(&hb), std::cmp::Ordering::Equal);
}

#[test]
fn config_is_kept() {
    let mapper = SeqIdMapper::new(MapperConfig::unpacked());
    assert_eq!(*mapper.config(), MapperConfig::unpacked());
    assert!(!mapper.get_gi_handle(5).is_packed());
    assert!(!mapper.parse_handle("gb|ACC1.1|").unwrap().is_packed());
}

#[test]
fn handles_outlive_mapper() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let handle = mapper.parse_handle("lcl|x").unwrap();
    drop(mapper);
    assert!(handle.mapper().is_none());
    assert_eq!(handle.to_string(), "lcl|x");
    assert!(!handle.have_matching_handles());
}

#[test]
fn matches_requires_same_subtype() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let gb = mapper.parse_handle("gb|ACC1|").unwrap();
    let emb = mapper.parse_handle("emb|ACC1.1|").unwrap();
    assert!(!mapper.matches(&gb, &emb));
    assert!(!mapper.is_better(&emb, &gb));
}

#[test]
fn reverse_match_capability() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let text = mapper.parse_handle("gb|ACC1.1|").unwrap();
    let local = mapper.parse_handle("lcl|x").unwrap();
    assert!(mapper.have_reverse_match(&text, WeakMatch::No));
    assert!(!mapper.have_reverse_match(&local, WeakMatch::Allow));
    assert!(!mapper.have_reverse_match(&SeqIdHandle::empty(), WeakMatch::Allow));
}

#[test]
fn debug_reports_entries() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let _handle = mapper.get_gi_handle(1);
    let text = format!("{mapper:?}");
    assert!(text.contains("live_entries: 1"), "{text}");
}
