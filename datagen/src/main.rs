//! Writes a synthetic `name;value` input file for manual runs and
//! benchmarks: `datagen <rows> <output-file> [seed]`. Each station draws
//! from a normal distribution around its usual temperature.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result, bail};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const STATIONS: &[(&str, f64)] = &[
    ("Abha", 18.0),
    ("Accra", 26.4),
    ("Adelaide", 17.3),
    ("Amsterdam", 10.2),
    ("Athens", 19.2),
    ("Baghdad", 22.8),
    ("Bangkok", 28.6),
    ("Berlin", 10.3),
    ("Bogotá", 14.0),
    ("Brussels", 10.5),
    ("Bucharest", 10.8),
    ("Cairo", 21.4),
    ("Cape Town", 16.2),
    ("Chicago", 9.8),
    ("Copenhagen", 9.1),
    ("Dakar", 24.0),
    ("Dublin", 9.8),
    ("Hamburg", 9.7),
    ("Helsinki", 5.9),
    ("Istanbul", 13.9),
    ("Jakarta", 26.7),
    ("Lagos", 26.8),
    ("Lisbon", 17.5),
    ("London", 11.3),
    ("Madrid", 15.0),
    ("Mexico City", 17.5),
    ("Moscow", 5.8),
    ("Mumbai", 27.1),
    ("Nairobi", 17.8),
    ("Oslo", 5.7),
    ("Ōsaka", 16.9),
    ("Paris", 12.3),
    ("Quito", 13.9),
    ("Reykjavík", 4.3),
    ("São Paulo", 19.2),
    ("Singapore", 27.0),
    ("Stockholm", 6.6),
    ("Sydney", 17.7),
    ("Tokyo", 15.4),
    ("Toronto", 9.4),
    ("Vienna", 10.4),
    ("Warsaw", 8.5),
    ("Zürich", 9.3),
];

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (rows, path, seed): (u64, &str, Option<u64>) = match args.as_slice() {
        [rows, path] => (rows.parse()?, path.as_str(), None),
        [rows, path, seed] => (rows.parse()?, path.as_str(), Some(seed.parse()?)),
        _ => bail!("usage: datagen <rows> <output-file> [seed]"),
    };

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let file = File::create(path).with_context(|| format!("create {path}"))?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, &mut rng, rows)?;
    out.flush()?;
    Ok(())
}

fn write_rows<W: Write>(out: &mut W, rng: &mut SmallRng, rows: u64) -> Result<()> {
    let models = STATIONS
        .iter()
        .map(|&(name, mean)| Normal::new(mean, 10.0).map(|normal| (name, normal)))
        .collect::<Result<Vec<_>, _>>()?;

    for _ in 0..rows {
        let (name, normal) = models[rng.random_range(0..models.len())];
        let value = normal.sample(rng).clamp(-99.9, 99.9);
        writeln!(out, "{name};{value:.1}")?;
    }
    Ok(())
}
