// Scala .scl output from tuning snapshots.
//
// Converts a `TuningSnapshot` (the lattice core's export hook) into Scala
// scale file text per <http://www.huygens-fokker.org/scala/scl_format.html>:
// comment lines start with `!`, then a description line, a note count, and
// one pitch per line — ratios written as `n/d`, non-rational values in
// cents (a value containing `.` is cents by definition of the format).
//
// `format_scl` / `parse_scl` are pure text conversions; `write_scl` is the
// thin file wrapper the CLI uses. The lattice core itself never touches a
// file.

use std::io;
use std::path::Path;

use eikosany_lattice::{SnapshotPitch, TuningSnapshot};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalaError {
    #[error("missing description line")]
    MissingDescription,

    #[error("missing or malformed note count: {line:?}")]
    BadCount { line: String },

    #[error("malformed pitch line {number}: {line:?}")]
    BadPitch { number: usize, line: String },

    #[error("expected {expected} pitches, found {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Render a snapshot as `.scl` file text.
pub fn format_scl(snapshot: &TuningSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("! {}.scl\n", snapshot.name));
    out.push_str("!\n");
    out.push_str(&format!("{}\n", snapshot.comment));
    out.push_str(&format!(" {}\n", snapshot.pitches.len()));
    out.push_str("!\n");
    for pitch in &snapshot.pitches {
        match *pitch {
            SnapshotPitch::Ratio { num, den } => out.push_str(&format!(" {num}/{den}\n")),
            // The format keys on the decimal point: always emit one.
            SnapshotPitch::Cents(c) => out.push_str(&format!(" {c:.5}\n")),
        }
    }
    out
}

/// Parse `.scl` text back into a snapshot. The name is recovered from the
/// leading `! name.scl` comment when present.
pub fn parse_scl(text: &str) -> Result<TuningSnapshot, ScalaError> {
    let name = text
        .lines()
        .next()
        .and_then(|l| l.strip_prefix("! "))
        .and_then(|l| l.strip_suffix(".scl"))
        .unwrap_or("")
        .to_string();

    let mut lines = text.lines().filter(|l| !l.trim_start().starts_with('!'));

    let comment = lines
        .next()
        .ok_or(ScalaError::MissingDescription)?
        .trim()
        .to_string();

    let count_line = lines.next().unwrap_or("").trim().to_string();
    let expected: usize = count_line
        .parse()
        .map_err(|_| ScalaError::BadCount { line: count_line })?;

    let mut pitches = Vec::with_capacity(expected);
    for (number, line) in lines.enumerate() {
        let token = line.split_whitespace().next().unwrap_or("");
        if token.is_empty() {
            continue;
        }
        pitches.push(parse_pitch(token).ok_or_else(|| ScalaError::BadPitch {
            number: number + 1,
            line: line.to_string(),
        })?);
    }

    if pitches.len() != expected {
        return Err(ScalaError::CountMismatch {
            expected,
            actual: pitches.len(),
        });
    }

    Ok(TuningSnapshot {
        name,
        comment,
        pitches,
    })
}

/// One pitch token: a value containing `.` is cents, otherwise `n/d` or a
/// bare integer ratio.
fn parse_pitch(token: &str) -> Option<SnapshotPitch> {
    if token.contains('.') {
        return token.parse().ok().map(SnapshotPitch::Cents);
    }
    match token.split_once('/') {
        Some((num, den)) => {
            let num = num.parse().ok()?;
            let den = den.parse().ok()?;
            if den == 0 {
                return None;
            }
            Some(SnapshotPitch::Ratio { num, den })
        }
        None => {
            let num = token.parse().ok()?;
            Some(SnapshotPitch::Ratio { num, den: 1 })
        }
    }
}

/// Write a snapshot to a `.scl` file.
pub fn write_scl(snapshot: &TuningSnapshot, path: &Path) -> io::Result<()> {
    std::fs::write(path, format_scl(snapshot))
}
