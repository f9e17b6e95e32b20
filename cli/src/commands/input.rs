use std::fs;

use anyhow::{Context, Result};
use fgbscan_core::record::has_magic;
use thiserror::Error;
use tracing::debug;
use yansi::{Condition, Paint, Painted};

/// An error that happened while opening an input file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("`{0}' is not a FlatGeobuf file (magic bytes missing or unsupported version)")]
    NotFlatGeobuf(String),
}

/// Reads the whole file at `path` into memory and checks that it is a
/// FlatGeobuf file
pub fn read_input(path: &str) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Unable to read file `{path}'"))?;
    debug!(path, len = data.len(), "Read input file");

    if !has_magic(&data) {
        return Err(InputError::NotFlatGeobuf(path.to_string()).into());
    }

    Ok(data)
}

/// Highlights a label if stdout is a terminal that supports colors
pub fn label(s: &str) -> Painted<&str> {
    s.cyan().whenever(Condition::from(|| {
        Condition::stdout_is_tty() && Condition::clicolor() && Condition::no_color()
    }))
}
