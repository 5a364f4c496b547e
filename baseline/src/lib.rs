//! Slow, obviously correct reference summarizer used to cross-check the
//! parallel pipeline in tests. One thread, string splits, a BTreeMap.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Write;

struct Stats {
    min: i64,
    max: i64,
    sum: i64,
    count: u64,
}

impl Stats {
    fn one(tenths: i64) -> Self {
        Stats { min: tenths, max: tenths, sum: tenths, count: 1 }
    }

    fn add(&mut self, tenths: i64) {
        self.min = self.min.min(tenths);
        self.max = self.max.max(tenths);
        self.sum += tenths;
        self.count += 1;
    }
}

/// Produces the `NAME=MIN/MEAN/MAX` line report for a UTF-8 input, names
/// sorted ascending.
pub fn summarize(input: &[u8]) -> Result<String, Box<dyn Error>> {
    let text = std::str::from_utf8(input)?;
    let mut stats: BTreeMap<&str, Stats> = BTreeMap::new();
    for line in text.split('\n').filter(|line| !line.is_empty()) {
        let (name, value) = line.split_once(';').ok_or("row without separator")?;
        let tenths: i64 = value.replacen('.', "", 1).parse()?;
        stats
            .entry(name)
            .and_modify(|s| s.add(tenths))
            .or_insert_with(|| Stats::one(tenths));
    }

    let mut out = String::new();
    for (name, s) in &stats {
        let mean = (s.sum as f64 / s.count as f64).round() as i64;
        writeln!(
            out,
            "{name}={:.1}/{:.1}/{:.1}",
            s.min as f64 / 10.0,
            mean as f64 / 10.0,
            s.max as f64 / 10.0
        )?;
    }
    Ok(out)
}
