// Eikosany Scala exporter — CLI entry point.
//
// Builds a CPS lattice (or a full Euler genus) from generator ratios and
// writes the selected node's scale to a Scala .scl file.
//
// Usage:
//   cargo run -p eikosany_scala -- [output.scl] [--gens 3,5,7,11] [--k N]
//     [--npo N] [--no-reduce] [--json]
//
// Generators are comma-separated ratios ("3" or "3/2"), 1 to 6 of them.
// Without --k, the genus's musically significant default row is exported
// (the hexany at four generators, the eikosany row at six). --json prints
// the snapshot as JSON to stdout instead of a summary.

use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use eikosany_lattice::{EulerGenus, GeneratorSet, NodeConfig};
use eikosany_scala::write_scl;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("output.scl");
    let gens_arg: String = parse_flag(&args, "--gens").unwrap_or_else(|| "3,5,7,11".to_string());
    let k: Option<usize> = parse_flag(&args, "--k");
    let npo: Option<usize> = parse_flag(&args, "--npo");
    let no_reduce = args.iter().any(|a| a == "--no-reduce");
    let as_json = args.iter().any(|a| a == "--json");

    let pairs = match parse_ratios(&gens_arg) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("bad --gens value {gens_arg:?}: {e}");
            exit(1);
        }
    };
    let generators = match GeneratorSet::from_ratios(&pairs) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("bad generator set: {e}");
            exit(1);
        }
    };

    let mut genus = match EulerGenus::new(generators) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("failed to build genus: {e}");
            exit(1);
        }
    };
    let row_k = k.unwrap_or_else(|| genus.default_row_k());

    let node = match genus.row_mut(row_k) {
        Ok(node) => node,
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };
    let mut config = NodeConfig {
        octave_reduce: !no_reduce,
        ..*node.config()
    };
    config.npo_override = npo;
    node.set_config(config);

    let snapshot = node.snapshot();

    if as_json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to serialize snapshot: {e}");
                exit(1);
            }
        }
    } else {
        println!("=== Eikosany Scala Exporter ===");
        println!("Genus:  {}", genus.description());
        println!("Node:   {}", snapshot.comment);
        println!("Key:    {}", snapshot.name);
        println!("Notes:  {}", snapshot.pitches.len());
        println!("Output: {output_path}");
    }

    if let Err(e) = write_scl(&snapshot, Path::new(output_path)) {
        eprintln!("failed to write {output_path}: {e}");
        exit(1);
    }
}

/// Parse `--flag value` from the argument list.
fn parse_flag<T: FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

/// Parse comma-separated ratios: `3,5/4,7` -> [(3,1), (5,4), (7,1)].
fn parse_ratios(text: &str) -> Result<Vec<(i64, i64)>, String> {
    text.split(',')
        .map(|token| {
            let token = token.trim();
            match token.split_once('/') {
                Some((num, den)) => {
                    let num = num.parse().map_err(|_| format!("bad numerator in {token:?}"))?;
                    let den = den.parse().map_err(|_| format!("bad denominator in {token:?}"))?;
                    Ok((num, den))
                }
                None => {
                    let num = token.parse().map_err(|_| format!("bad ratio {token:?}"))?;
                    Ok((num, 1))
                }
            }
        })
        .collect()
}
