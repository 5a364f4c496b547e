//! Single-pass aggregation of `name;value` rows: the input file is memory
//! mapped, split into row-aligned partitions scanned by one thread each,
//! and the per-partition tables are reduced into an ordered index of
//! min/mean/max per name.

pub mod index;
pub mod record;
pub mod report;
pub mod table;

pub use index::OrderedIndex;
pub use record::{ParseError, decode_tenths, split};
pub use report::{write_compact, write_lines};
pub use table::{Aggregate, EXPECTED_ENTITIES, PartitionTable};

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::ops::Range;
use std::path::Path;
use std::thread;

use memmap2::MmapOptions;

/// Cores withheld from the scan pool for the OS and the reducer.
pub const RESERVED_CORES: usize = 2;

const SNIPPET_LIMIT: usize = 60;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    NoWorkers,
    /// A row that failed to parse, with its absolute byte offset. Any such
    /// row aborts the whole run.
    Malformed {
        offset: usize,
        line: Vec<u8>,
        reason: ParseError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "input error: {err}"),
            Error::NoWorkers => write!(f, "worker count must be at least 1"),
            Error::Malformed { offset, line, reason } => {
                write!(f, "malformed row at byte {offset}: {reason}: {}", snippet(line))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Malformed { reason, .. } => Some(reason),
            Error::NoWorkers => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

fn snippet(line: &[u8]) -> String {
    let cut = line.len().min(SNIPPET_LIMIT);
    let mut text = String::from_utf8_lossy(&line[..cut]).into_owned();
    if line.len() > SNIPPET_LIMIT {
        text.push_str("...");
    }
    text
}

/// Scan threads to use on this host, never less than one.
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(RESERVED_CORES)
        .max(1)
}

/// Splits `data` into at most `workers` contiguous ranges that cover it
/// exactly. Every range but the last ends just past a newline, so no row
/// straddles two ranges. Small inputs produce fewer ranges than workers.
pub fn partition_ranges(data: &[u8], workers: usize) -> Result<Vec<Range<usize>>, Error> {
    if workers == 0 {
        return Err(Error::NoWorkers);
    }
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let stride = (data.len() / workers).max(1);
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for _ in 1..workers {
        let end = start + stride;
        if end >= data.len() {
            break;
        }
        match data[end..].iter().position(|&b| b == record::NEWLINE) {
            Some(at) => {
                let end = end + at + 1;
                ranges.push(start..end);
                start = end;
            }
            None => break,
        }
    }
    if start < data.len() {
        ranges.push(start..data.len());
    }
    Ok(ranges)
}

/// Accumulates every row in `range` into a fresh table. Offsets in errors
/// are absolute within `data`. A last row without a terminator still counts.
pub fn scan_range(data: &[u8], range: Range<usize>) -> Result<PartitionTable<'_>, Error> {
    let mut table = PartitionTable::new();
    let mut at = range.start;
    while at < range.end {
        let line = match data[at..range.end].iter().position(|&b| b == record::NEWLINE) {
            Some(rel) => &data[at..at + rel],
            None => &data[at..range.end],
        };
        let (name, tenths) = record::split(line).map_err(|reason| Error::Malformed {
            offset: at,
            line: line.to_vec(),
            reason,
        })?;
        table.update(name, tenths);
        at += line.len() + 1;
    }
    Ok(table)
}

/// Scans each range on its own thread and joins them all before returning.
/// The first scan error wins; remaining workers still run to completion.
pub fn run_partitions<'a>(
    data: &'a [u8],
    ranges: Vec<Range<usize>>,
) -> Result<Vec<PartitionTable<'a>>, Error> {
    thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| scope.spawn(move || scan_range(data, range)))
            .collect();
        let mut tables = Vec::with_capacity(handles.len());
        for handle in handles {
            tables.push(handle.join().unwrap()?);
        }
        Ok(tables)
    })
}

/// Folds the per-worker tables into one ordered index, single threaded.
pub fn reduce<'a>(tables: Vec<PartitionTable<'a>>) -> OrderedIndex<'a> {
    let mut index = OrderedIndex::new();
    for table in tables {
        for (name, agg) in table {
            index.upsert(name, &agg);
        }
    }
    index
}

/// Full in-memory pass over `data`: partition, scan in parallel, reduce.
pub fn aggregate(data: &[u8], workers: usize) -> Result<OrderedIndex<'_>, Error> {
    let ranges = partition_ranges(data, workers)?;
    let tables = run_partitions(data, ranges)?;
    Ok(reduce(tables))
}

/// Aggregates the file at `path` and writes the line report to `out`.
/// Empty files skip the mapping, since a zero length map is an OS error.
pub fn run<W: Write>(path: &Path, workers: usize, out: &mut W) -> Result<(), Error> {
    let file = File::open(path)?;
    let mapped = if file.metadata()?.len() == 0 {
        None
    } else {
        Some(unsafe { MmapOptions::new().map(&file)? })
    };
    let data = mapped.as_deref().unwrap_or_default();
    let index = aggregate(data, workers)?;
    report::write_lines(out, &index)?;
    Ok(())
}
