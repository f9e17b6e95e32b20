use std::{
    io::{self, BufWriter, Write},
    path::Path,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Args;
use fgbscan_core::{
    decoder::{decode_stream, DecodedFeature, FeatureSink, Layer},
    geometry::WebMercator,
};
use humantime::format_duration;

use super::input::{label, read_input};

/// Decode all features of a FlatGeobuf file and print them
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// The file to decode
    pub file: String,

    /// The ID of the layer the features belong to
    #[arg(long, default_value_t = 0)]
    pub layer_id: usize,

    /// The name of the layer [default: the file name without extension]
    #[arg(long)]
    pub layer_name: Option<String>,

    /// The sequence number of the first feature
    #[arg(long, default_value_t = 0)]
    pub first_seq: u64,
}

/// Writes one line per feature
struct PrintSink<W> {
    writer: W,
}

impl<W: Write> FeatureSink for PrintSink<W> {
    fn accept(&mut self, feature: DecodedFeature) -> Result<()> {
        write!(
            self.writer,
            "#{} {}/{} {} commands",
            feature.seq,
            feature.layer_id,
            feature.layer_name,
            feature.geometry.len()
        )?;

        if let Some(first) = feature.geometry.first() {
            let c = first.coord();
            write!(self.writer, " from ({}, {})", c.x, c.y)?;
        }

        for (key, value) in &feature.attributes {
            write!(self.writer, " {}={}", label(key), value)?;
        }

        writeln!(self.writer)?;
        Ok(())
    }
}

/// Run the `dump` command
pub fn run_dump(args: DumpArgs) -> Result<()> {
    let data = read_input(&args.file)?;

    let layer_name = args.layer_name.unwrap_or_else(|| {
        Path::new(&args.file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let stdout = io::stdout().lock();
    let mut sink = PrintSink {
        writer: BufWriter::new(stdout),
    };

    let start = Instant::now();
    let mut seq = args.first_seq;
    let count = decode_stream(
        &data,
        Layer::new(args.layer_id, layer_name),
        &mut seq,
        WebMercator,
        &mut sink,
    )?;
    sink.writer.flush()?;

    eprintln!(
        "Decoded {} features in {}",
        count,
        format_duration(Duration::from_millis(start.elapsed().as_millis() as u64))
    );

    Ok(())
}
