//! seqidc CLI
//!
//! Intern sequence identifiers and inspect their handles.

use std::io;

use seqid_map::{SeqIdMapper, WeakMatch};
use seqidc::commands::{self, CommandError};

fn print_usage() {
    eprintln!("Usage: seqidc <command> [options] <id>...");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  intern <id>...          Print each handle with its subtype and packing");
    eprintln!("  sort <id>...            Print identifiers in stable order");
    eprintln!("  match [--weak] <q> <id>...");
    eprintln!("                          Print interned identifiers that <q> matches to");
    eprintln!("  label <id>...           Print the best label, then each identifier's label");
    eprintln!();
    eprintln!("An argument of '-' reads identifiers from stdin, one per line.");
    eprintln!("SEQID_PACK_TEXTID=0 / SEQID_PACK_GI=0 disable packing.");
}

fn main() {
    seqidc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "-h" || args[1] == "--help" {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let mut weak = WeakMatch::No;
    let mut rest = Vec::with_capacity(args.len() - 2);
    for arg in &args[2..] {
        if command == "match" && (arg == "--weak" || arg == "-w") {
            weak = WeakMatch::Allow;
        } else {
            rest.push(arg.clone());
        }
    }

    let result = commands::collect_ids(&rest, io::stdin().lock()).and_then(|ids| {
        let mapper = SeqIdMapper::instance();
        match command {
            "intern" => commands::intern(mapper, &ids),
            "sort" => commands::sort(mapper, &ids),
            "match" => commands::matching(mapper, &ids, weak),
            "label" => commands::label(mapper, &ids),
            _ => Err(CommandError::Usage("unknown command")),
        }
    });

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(CommandError::Usage(msg)) => {
            eprintln!("error: {msg}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
