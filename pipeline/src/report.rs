use std::io::{self, Write};

use crate::index::OrderedIndex;
use crate::table::Aggregate;

fn write_stats<W: Write>(out: &mut W, agg: &Aggregate) -> io::Result<()> {
    write!(
        out,
        "{:.1}/{:.1}/{:.1}",
        agg.min as f64 / 10.0,
        agg.mean_tenths() as f64 / 10.0,
        agg.max as f64 / 10.0
    )
}

/// One `NAME=MIN/MEAN/MAX` line per entity, in index order. Names pass
/// through as raw bytes.
pub fn write_lines<W: Write>(out: &mut W, index: &OrderedIndex<'_>) -> io::Result<()> {
    for (name, agg) in index.iter() {
        out.write_all(name)?;
        out.write_all(b"=")?;
        write_stats(out, agg)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// The same report on a single `{..., ...}` line.
pub fn write_compact<W: Write>(out: &mut W, index: &OrderedIndex<'_>) -> io::Result<()> {
    out.write_all(b"{")?;
    let mut first = true;
    for (name, agg) in index.iter() {
        if first {
            first = false;
        } else {
            out.write_all(b", ")?;
        }
        out.write_all(name)?;
        out.write_all(b"=")?;
        write_stats(out, agg)?;
    }
    out.write_all(b"}\n")?;
    Ok(())
}
