//! Labeled grid dumps.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use settle::grid::Grid;

/// Write the before/after report: an `Input:` section and a
/// `Solution:` section, one grid row per line, fixed-width
/// space-separated values.
///
/// On a transport failure the caller passes the last merged grid as
/// the solution, so the file still shows the furthest state reached.
pub fn write_report(path: &Path, input: &Grid, solution: &Grid) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_section(&mut w, "Input:", input)?;
    write_section(&mut w, "Solution:", solution)?;
    w.flush()
}

fn write_section<W: Write>(w: &mut W, label: &str, grid: &Grid) -> io::Result<()> {
    writeln!(w, "{label}")?;
    for r in 0..grid.rows() {
        for (c, value) in grid.row(r).iter().enumerate() {
            if c > 0 {
                write!(w, " ")?;
            }
            write!(w, "{value:>10.6}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}
