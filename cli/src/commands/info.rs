use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use fgbscan_core::{
    index::packed_rtree_size,
    record::{size_prefixed_record, Header, MAGIC_BYTES},
};

use super::input::{label, read_input};

/// Print the header of a FlatGeobuf file
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// The file to inspect
    pub file: String,
}

/// Run the `info` command
pub fn run_info(args: InfoArgs) -> Result<()> {
    let data = read_input(&args.file)?;
    let header = Header::read(size_prefixed_record(&data, MAGIC_BYTES.len())?)?;

    let index_size = match packed_rtree_size(header.features_count, header.index_node_size) {
        Ok(size) => format!("{size} bytes"),
        Err(err) => format!("invalid ({err})"),
    };

    let mut out = io::stdout().lock();
    let or_none = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".to_string());

    writeln!(out, "{} {}", label("Name:"), or_none(&header.name))?;
    writeln!(out, "{} {}", label("Title:"), or_none(&header.title))?;
    writeln!(out, "{} {}", label("Description:"), or_none(&header.description))?;
    writeln!(out, "{} {:?}", label("Geometry type:"), header.geometry_type)?;
    writeln!(out, "{} {}", label("Features:"), header.features_count)?;
    writeln!(out, "{} {}", label("Index node size:"), header.index_node_size)?;
    writeln!(out, "{} {}", label("Index size:"), index_size)?;

    match header.envelope {
        Some(e) => writeln!(
            out,
            "{} ({}, {}) - ({}, {})",
            label("Envelope:"),
            e.min().x,
            e.min().y,
            e.max().x,
            e.max().y
        )?,
        None => writeln!(out, "{} -", label("Envelope:"))?,
    }

    writeln!(out, "{} {}", label("Columns:"), header.columns.len())?;
    for (i, c) in header.columns.iter().enumerate() {
        writeln!(out, "  {i:>3} {} ({:?})", c.name, c.column_type)?;
    }

    Ok(())
}
