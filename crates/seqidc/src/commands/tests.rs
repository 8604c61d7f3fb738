use std::io::Cursor;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use seqid_map::MapperConfig;

use super::*;

fn mapper() -> Arc<SeqIdMapper> {
    SeqIdMapper::new(MapperConfig::default())
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn stdin_expands_dash() {
    let input = Cursor::new("gi|1\n\n# comment\n  lcl|x  \n");
    let ids = collect_ids(&args(&["gi|5", "-", "-"]), input).unwrap();
    assert_eq!(ids, args(&["gi|5", "gi|1", "lcl|x"]));
}

#[test]
fn intern_describes_packing() {
    let lines = intern(&mapper(), &args(&["gi|12345", "lcl|x", "gb|acc1.1|"])).unwrap();
    assert_eq!(
        lines,
        args(&[
            "gi|12345\tgi\tpacked=12345",
            "lcl|x\tlcl",
            "gb|acc1.1|\tgb\tpacked=2\tvariant=0x7",
        ])
    );
}

#[test]
fn intern_reports_parse_errors() {
    let err = intern(&mapper(), &args(&["gi|1", "bogus|1"])).unwrap_err();
    assert!(matches!(err, CommandError::SeqId(ref e) if e.is_parse()));
}

#[test]
fn sort_is_stable_and_deduplicated() {
    let lines = sort(&mapper(), &args(&["gi|30", "lcl|b", "gi|4", "lcl|a", "gi|30"])).unwrap();
    assert_eq!(lines, args(&["lcl|a", "lcl|b", "gi|4", "gi|30"]));
}

#[test]
fn sort_drops_duplicates_that_are_not_adjacent() {
    let lines = sort(&mapper(), &args(&["gb|A1|N|rel", "gb|A1|N|REL", "gb|A1|N|rel"])).unwrap();
    assert_eq!(lines, args(&["gb|A1|N|REL", "gb|A1|N|rel"]));
}

#[test]
fn match_lists_versions() {
    let ids = args(&["ACC123", "ACC123.2", "ACC123.1", "emb|ACC123.3|"]);
    let strict = matching(&mapper(), &ids, WeakMatch::No).unwrap();
    assert_eq!(strict, args(&["gb|ACC123|", "gb|ACC123.1|", "gb|ACC123.2|"]));

    let weak = matching(&mapper(), &ids, WeakMatch::Allow).unwrap();
    assert_eq!(
        weak,
        args(&["gb|ACC123|", "gb|ACC123.1|", "gb|ACC123.2|", "emb|ACC123.3|"])
    );
}

#[test]
fn match_without_query_is_usage_error() {
    let err = matching(&mapper(), &[], WeakMatch::No).unwrap_err();
    assert!(matches!(err, CommandError::Usage(_)));
}

#[test]
fn label_picks_best() {
    let lines = label(&mapper(), &args(&["gi|5", "ref|nm_000001.2|"])).unwrap();
    assert_eq!(
        lines,
        args(&["NM_000001.2", "gi|5\tgi|5", "ref|nm_000001.2|\tNM_000001.2"])
    );
}
