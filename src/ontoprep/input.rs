use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::constants::GZIP_EXTENSION;

pub fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == GZIP_EXTENSION)
}

// Open an input file for reading, decompressing it on the fly if the
// name ends in ".gz"
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}


#[test]
fn test_is_gzipped() {
    assert!(is_gzipped(Path::new("Data/global_average.filtered.dat.gz")));
    assert!(!is_gzipped(Path::new("Data/global_average.filtered.dat")));
    assert!(!is_gzipped(Path::new("Data/gz")));
}
