//! Locates `<stem>.txt` input / `<stem>.out` expected-report pairs for the
//! fixture driven tests.

use std::path::{Path, PathBuf};
use std::{fs, io};

pub struct Case {
    pub name: String,
    pub input: Vec<u8>,
    pub expected: Vec<u8>,
}

/// Collects the fixture pairs under `dir`, recursively, sorted by stem.
/// Inputs without a matching `.out` are skipped.
pub fn cases(dir: &Path) -> Vec<Case> {
    let bases = find(dir, "txt")
        .unwrap_or_else(|e| panic!("failed to walk {}: {e}", dir.display()));

    let mut found = Vec::new();
    for base in bases {
        let expected = base.with_extension("out");
        if !expected.exists() {
            continue;
        }
        let name = base
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        found.push(Case {
            name,
            input: read(base.with_extension("txt")),
            expected: read(&expected),
        });
    }
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found
}

pub fn read<P: AsRef<Path>>(path: P) -> Vec<u8> {
    fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.as_ref().display()))
}

fn find(root: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut res = Vec::new();

    fn walk(dir: &Path, ext: &str, out: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(&path, ext, out)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some(ext) {
                let mut base = path.clone();
                base.set_extension("");
                out.push(base);
            }
        }
        Ok(())
    }

    walk(root, ext.trim_start_matches('.'), &mut res)?;
    Ok(res)
}
