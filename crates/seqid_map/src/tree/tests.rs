use std::sync::Arc;

use pretty_assertions::assert_eq;
use seqid_ir::{SeqId, SeqIdChoice, TextseqId};

use crate::{MapperConfig, SeqIdMapper, SeqIdMatches, WeakMatch};

fn mapper() -> Arc<SeqIdMapper> {
    SeqIdMapper::new(MapperConfig::default())
}

// GI tree

#[test]
fn gis_share_one_entry() {
    let mapper = mapper();
    let a = mapper.get_gi_handle(12345);
    let b = mapper.get_gi_handle(67890);
    assert!(a.is_packed());
    assert!(a.is_gi());
    assert_eq!(a.packed(), 12345);
    assert_eq!(a.gi(), 12345);
    assert!(Arc::ptr_eq(a.info().unwrap(), b.info().unwrap()));
    assert_ne!(a, b);
    assert_eq!(mapper.tree(SeqIdChoice::Gi).live_entries(), 1);
}

#[test]
fn gi_zero_is_unpacked() {
    let mapper = mapper();
    let zero = mapper.get_gi_handle(0);
    assert!(!zero.is_packed());
    assert!(!zero.is_gi());
    assert_eq!(zero.which(), SeqIdChoice::Gi);
    assert_eq!(*zero.require_seq_id().unwrap(), SeqId::Gi(0));
    assert_eq!(zero, mapper.get_handle(&SeqId::Gi(0)));
}

#[test]
fn unpacked_gis_get_own_entries() {
    let mapper = SeqIdMapper::new(MapperConfig::unpacked());
    let a = mapper.get_gi_handle(12345);
    let b = mapper.get_gi_handle(67890);
    assert!(!a.is_packed());
    assert!(!Arc::ptr_eq(a.info().unwrap(), b.info().unwrap()));
    assert_eq!(a, mapper.get_gi_handle(12345));
    assert_eq!(mapper.tree(SeqIdChoice::Gi).live_entries(), 2);
}

#[test]
fn shared_gi_entry_dropped_with_last_handle() {
    let mapper = mapper();
    let a = mapper.get_gi_handle(1);
    let b = mapper.get_gi_handle(2);
    drop(a);
    assert_eq!(mapper.live_entries(), 1);
    drop(b);
    assert_eq!(mapper.live_entries(), 0);
    assert_eq!(mapper.dropped_entries(), 1);
}

#[test]
#[should_panic(expected = "gi tree")]
fn gi_tree_rejects_other_subtypes() {
    let mapper = mapper();
    let _ = mapper
        .tree(SeqIdChoice::Gi)
        .find_or_create(&SeqId::Gibbsq(5));
}

// Text-id tree

#[test]
fn plain_accessions_are_packed() {
    let mapper = mapper();
    let a = mapper.parse_handle("ref|NM_000001.2|").unwrap();
    let b = mapper.parse_handle("ref|NM_999999.2|").unwrap();
    let other_version = mapper.parse_handle("ref|NM_000001.3|").unwrap();
    assert!(a.is_packed());
    assert!(Arc::ptr_eq(a.info().unwrap(), b.info().unwrap()));
    assert!(!Arc::ptr_eq(a.info().unwrap(), other_version.info().unwrap()));
    assert_eq!(a.to_string(), "ref|NM_000001.2|");
    assert_eq!(b.to_string(), "ref|NM_999999.2|");
    assert_eq!(mapper.tree(SeqIdChoice::Other).live_entries(), 2);
}

#[test]
fn accession_case_is_a_variant() {
    let mapper = mapper();
    let upper = mapper.parse_handle("gb|ACC123.1|").unwrap();
    let lower = mapper.parse_handle("gb|acc123.1|").unwrap();
    assert_eq!(upper, lower);
    assert!(!upper.is_set_variant());
    assert!(lower.is_set_variant());
    assert_eq!(lower.to_string(), "gb|acc123.1|");
}

#[test]
fn named_ids_are_not_packed() {
    let mapper = mapper();
    let named = mapper.parse_handle("gb|ACC123.1|LOCUS").unwrap();
    assert!(!named.is_packed());
    let same = mapper.parse_handle("gb|acc123.1|locus").unwrap();
    assert_eq!(named, same);
    assert_eq!(same.to_string(), "gb|ACC123.1|LOCUS");

    let name_only = mapper.parse_handle("emb||LOCUS").unwrap();
    assert!(!name_only.is_packed());
    assert_eq!(mapper.live_entries(), 2);
}

#[test]
fn unpacked_accessions_still_match() {
    let mapper = SeqIdMapper::new(MapperConfig::unpacked());
    let generic = mapper.parse_handle("gb|ACC123|").unwrap();
    let v1 = mapper.parse_handle("gb|ACC123.1|").unwrap();
    assert!(!generic.is_packed());
    assert!(mapper.matches(&generic, &v1));

    let mut matches = SeqIdMatches::new();
    mapper.matching_handles(&generic, &mut matches, WeakMatch::No);
    assert_eq!(matches.len(), 2);
    assert!(matches.contains(&v1));
}

#[test]
fn matching_lists_only_interned_accessions() {
    for config in [MapperConfig::default(), MapperConfig::unpacked()] {
        let mapper = SeqIdMapper::new(config);
        let neighbour = mapper.parse_handle("gb|ACC999.1|").unwrap();
        let generic = mapper.parse_handle("gb|ACC123|").unwrap();

        let mut matches = SeqIdMatches::new();
        mapper.matching_handles(&generic, &mut matches, WeakMatch::No);
        assert_eq!(matches, [generic.clone()].into_iter().collect(), "{config:?}");

        let v1 = mapper.parse_handle("gb|ACC123.1|").unwrap();
        let mut matches = SeqIdMatches::new();
        mapper.matching_handles(&generic, &mut matches, WeakMatch::No);
        assert_eq!(matches, [generic.clone(), v1].into_iter().collect(), "{config:?}");

        let mut reverse = SeqIdMatches::new();
        mapper.reverse_matching_handles(&neighbour, &mut reverse, WeakMatch::No);
        assert_eq!(reverse, [neighbour.clone()].into_iter().collect(), "{config:?}");
    }
}

#[test]
fn text_tree_removes_both_indexes() {
    let mapper = SeqIdMapper::new(MapperConfig::unpacked());
    let handle = mapper.parse_handle("gb|ACC1.1|LOCUS").unwrap();
    assert_eq!(mapper.tree(SeqIdChoice::Genbank).live_entries(), 1);
    drop(handle);
    assert_eq!(mapper.tree(SeqIdChoice::Genbank).live_entries(), 0);
    assert_eq!(mapper.tree(SeqIdChoice::Genbank).dropped_entries(), 1);
}

#[test]
fn better_version() {
    let mapper = mapper();
    let v1 = mapper.parse_handle("gb|ACC123.1|").unwrap();
    let v2 = mapper.parse_handle("gb|ACC123.2|").unwrap();
    let other = mapper.parse_handle("gb|ACC124.3|").unwrap();
    assert!(mapper.is_better(&v2, &v1));
    assert!(!mapper.is_better(&v1, &v2));
    assert!(!mapper.is_better(&other, &v1));
}

#[test]
#[should_panic(expected = "tree asked to intern")]
fn text_tree_rejects_other_subtypes() {
    let mapper = mapper();
    let id = SeqId::Embl(TextseqId::with_accession("ACC1"));
    let _ = mapper.tree(SeqIdChoice::Genbank).find_or_create(&id);
}

// Plain tree

#[test]
fn plain_values_interned_once() {
    let mapper = mapper();
    let a = mapper.parse_handle("gnl|DB|tag1").unwrap();
    let b = mapper.parse_handle("gnl|DB|tag1").unwrap();
    let c = mapper.parse_handle("gnl|DB|tag2").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(!a.is_packed());
    assert_eq!(mapper.tree(SeqIdChoice::General).live_entries(), 2);
    assert!(!mapper.tree(SeqIdChoice::General).have_matching_handles());
}

#[test]
fn drop_info_ignores_locked_entries() {
    let mapper = mapper();
    let handle = mapper.parse_handle("lcl|contig7").unwrap();
    let tree = mapper.tree(SeqIdChoice::Local);
    tree.drop_info(handle.info().unwrap());
    assert_eq!(tree.live_entries(), 1);
    assert_eq!(tree.dropped_entries(), 0);
}

#[test]
fn plain_matching_is_identity() {
    let mapper = mapper();
    let handle = mapper.parse_handle("lcl|contig7").unwrap();
    let mut matches = SeqIdMatches::new();
    mapper.matching_handles(&handle, &mut matches, WeakMatch::Allow);
    assert_eq!(matches.len(), 1);
    assert!(matches.contains(&handle));
}
