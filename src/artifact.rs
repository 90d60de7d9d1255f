use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::matrix::CsrMatrix;

/// Writes the title list, then the feature matrix, as two consecutive
/// bincode values.
pub fn save(path: &Path, titles: &[String], matrix: &CsrMatrix) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, titles).context("Failed to write titles")?;
    bincode::serialize_into(&mut writer, matrix).context("Failed to write matrix")?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {:?}", path))?;
    Ok(())
}

#[allow(dead_code)]
pub fn load(path: &Path) -> Result<(Vec<String>, CsrMatrix)> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut reader = BufReader::new(file);
    let titles: Vec<String> =
        bincode::deserialize_from(&mut reader).context("Failed to read titles")?;
    let matrix: CsrMatrix =
        bincode::deserialize_from(&mut reader).context("Failed to read matrix")?;
    Ok((titles, matrix))
}
