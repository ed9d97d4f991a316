//! Command-line interface for the `blockfile` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`args`]      | clap definition of the options, preference and log-level mapping. |
//! | [`arg_utils`] | Size-suffix parsing and default output names. |
//!
//! [`run`] performs one compress or decompress operation from `INPUT` to the
//! derived or explicit output, or to standard output with `-c`.

pub mod arg_utils;
pub mod args;

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use log::{info, warn};

use crate::cli::arg_utils::default_output_name;
use crate::cli::args::Args;
use crate::driver::Compressor;
use crate::file::BlockFile;
use crate::prefs::Preferences;

/// Compress everything readable from `src` into `dst`.
fn compress_stream(src: &mut impl Read, dst: &mut impl Write, prefs: &Preferences) -> anyhow::Result<(u64, u64)> {
    let mut comp = Compressor::with_codec(prefs.codec().build(), prefs.block_size())?;
    let mut buf = vec![0u8; prefs.block_size()];
    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read error"),
        };
        let out = comp.compress(&buf[..n])?;
        dst.write_all(&out).context("write error")?;
    }
    let tail = comp.flush()?;
    dst.write_all(&tail).context("write error")?;
    dst.flush()?;
    Ok((comp.total_in(), comp.total_out()))
}

fn decompress_file<F: Read + Write>(src: &mut BlockFile<F>, dst: &mut impl Write) -> anyhow::Result<u64> {
    let n = io::copy(src, dst).context("decoding failed")?;
    src.close()?;
    dst.flush()?;
    Ok(n)
}

enum Source {
    Plain(fs::File),
    Packed(BlockFile),
}

fn open_source(args: &Args, prefs: &Preferences) -> anyhow::Result<Source> {
    let input = &args.input;
    let source = if args.decompress {
        Source::Packed(
            BlockFile::open_with(input, "rb", prefs)
                .with_context(|| format!("cannot open {}", input.display()))?,
        )
    } else {
        Source::Plain(fs::File::open(input).with_context(|| format!("cannot open {}", input.display()))?)
    };
    Ok(source)
}

/// `true` when `out` already exists and names the same file as `input`.
fn same_file(input: &Path, out: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(out)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn create_sink(out: Option<&Path>, force: bool) -> anyhow::Result<Box<dyn Write>> {
    let Some(out) = out else {
        return Ok(Box::new(io::stdout().lock()));
    };
    let mut opts = OpenOptions::new();
    opts.write(true);
    if force {
        opts.create(true).truncate(true);
    } else {
        opts.create_new(true);
    }
    let file = opts
        .open(out)
        .with_context(|| format!("{}: cannot create output", out.display()))?;
    Ok(Box::new(io::BufWriter::new(file)))
}

fn transfer(args: &Args, source: Source, sink: &mut Box<dyn Write>, prefs: &Preferences) -> anyhow::Result<()> {
    match source {
        Source::Packed(mut src) => {
            let n = decompress_file(&mut src, sink)
                .with_context(|| format!("{}", args.input.display()))?;
            info!("{}: decoded {} bytes", args.input.display(), n);
        }
        Source::Plain(mut src) => {
            let (read, written) = compress_stream(&mut src, sink, prefs)?;
            let ratio = if read == 0 { 0.0 } else { written as f64 * 100.0 / read as f64 };
            info!(
                "{}: {} -> {} bytes ({:.2}%)",
                args.input.display(),
                read,
                written,
                ratio
            );
        }
    }
    Ok(())
}

fn resolve_output(args: &Args) -> anyhow::Result<Option<PathBuf>> {
    if args.to_stdout {
        return Ok(None);
    }
    if let Some(out) = &args.output {
        return Ok(Some(out.clone()));
    }
    match default_output_name(&args.input, args.decompress) {
        Some(out) => Ok(Some(out)),
        None => bail!(
            "{}: unknown suffix -- cannot derive an output name",
            args.input.display()
        ),
    }
}

/// Execute the operation described by `args`.
///
/// The input is opened before the output is created, and an output file
/// created by a failed run is removed.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let prefs = args.preferences()?;
    let output = resolve_output(args)?;

    if let Some(out) = &output {
        if out == &args.input || same_file(&args.input, out) {
            bail!("{}: input and output are the same file", out.display());
        }
    }

    let source = open_source(args, &prefs)?;
    let mut sink = create_sink(output.as_deref(), args.force)?;
    let result = transfer(args, source, &mut sink, &prefs);
    drop(sink);

    if let Err(e) = result {
        if let Some(out) = &output {
            if let Err(rm) = fs::remove_file(out) {
                warn!("{}: cannot remove partial output: {}", out.display(), rm);
            }
        }
        return Err(e);
    }

    if args.rm && output.is_some() {
        fs::remove_file(&args.input)
            .with_context(|| format!("{}: cannot remove input", args.input.display()))?;
    }
    Ok(())
}
