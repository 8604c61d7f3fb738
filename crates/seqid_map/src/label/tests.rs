use std::sync::Arc;

use pretty_assertions::assert_eq;
use seqid_ir::{Dbtag, ObjectId, SeqId, TextseqId};

use super::*;
use crate::{MapperConfig, SeqIdMapper};

fn id(text: &str) -> SeqId {
    SeqId::parse(text).unwrap()
}

#[test]
fn direct_labels() {
    assert_eq!(direct_label(&id("ref|NM_000001.2|")), "NM_000001.2");
    assert_eq!(direct_label(&id("gb|acc1.3|")), "acc1.3");
    assert_eq!(direct_label(&id("gnl|LABEL|my_seq")), "my_seq");
    assert_eq!(direct_label(&id("gb|ACC1|")), "");
    assert_eq!(direct_label(&id("gi|5")), "");
    assert_eq!(direct_label(&id("gnl|LABEL|42")), "");
}

#[test]
fn labels_of_values() {
    assert_eq!(label(&id("gb|acc1.3|")), "ACC1.3");
    assert_eq!(label(&id("gb|acc1|")), "ACC1");
    assert_eq!(label(&id("emb||locus")), "locus");
    assert_eq!(label(&id("gnl|LABEL|my_seq")), "my_seq");
    assert_eq!(label(&id("gnl|DB|tag")), "gnl|DB|tag");
    assert_eq!(label(&id("lcl|contig7")), "lcl|contig7");
    assert_eq!(label(&id("gi|5")), "gi|5");
}

#[test]
fn labels_of_handles() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    assert_eq!(label_handle(&mapper.get_gi_handle(12345)), "gi|12345");
    assert_eq!(label_handle(&mapper.parse_handle("ref|nm_000001.2|").unwrap()), "NM_000001.2");
    assert_eq!(label_handle(&SeqIdHandle::empty()), "");
    assert_eq!(direct_label_handle(&mapper.get_gi_handle(12345)), "");
    assert_eq!(
        direct_label_handle(&mapper.parse_handle("ref|NM_000001.2|").unwrap()),
        "NM_000001.2"
    );
}

#[test]
fn best_handle_wins() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let handles: Vec<_> = ["gi|12345", "lcl|contig7", "gb|ACC1.1|", "ref|NM_000001.2|"]
        .iter()
        .map(|text| mapper.parse_handle(text).unwrap())
        .collect();
    assert_eq!(label_for_handles(&handles), "NM_000001.2");
    assert_eq!(label_for_handles(&handles[..2]), "gi|12345");
    assert_eq!(label_for_handles(&handles[1..2]), "lcl|contig7");
    assert_eq!(label_for_handles(&[]), "");
    assert_eq!(label_for_handles(&[SeqIdHandle::empty()]), "");
}

#[test]
fn first_of_equal_scores_wins() {
    let mapper = SeqIdMapper::new(MapperConfig::default());
    let handles = [
        mapper.parse_handle("gb|B1.1|").unwrap(),
        mapper.parse_handle("gb|A1.1|").unwrap(),
    ];
    assert_eq!(label_for_handles(&handles), "B1.1");
}

#[test]
fn best_id_wins() {
    let ids = vec![
        Arc::new(SeqId::Gi(5)),
        Arc::new(SeqId::General(Dbtag::new("LABEL", ObjectId::Str("chr1".into())))),
        Arc::new(SeqId::Genbank(TextseqId::with_accession("ACC1"))),
    ];
    assert_eq!(label_for_ids(&ids), "chr1");
    assert_eq!(label_for_ids(&ids[..1]), "gi|5");
    assert_eq!(label_for_ids(&[]), "");
}

#[test]
fn versionless_accession_beats_gi() {
    let ids = vec![
        Arc::new(SeqId::Gi(5)),
        Arc::new(SeqId::Genbank(TextseqId::with_accession("acc1"))),
    ];
    assert_eq!(label_for_ids(&ids), "ACC1");
}
