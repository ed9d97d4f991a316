// args.rs — command-line definition for the `blockfile` binary.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::cli::arg_utils::parse_size;
use crate::codec::CodecKind;
use crate::error::Result;
use crate::prefs::Preferences;

fn parse_codec(s: &str) -> std::result::Result<CodecKind, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Block-chunked file compressor.
#[derive(Debug, Parser)]
#[command(name = "blockfile", version, about)]
pub struct Args {
    /// Decompress INPUT.
    #[arg(short = 'd', long, conflicts_with = "compress")]
    pub decompress: bool,

    /// Compress INPUT (default).
    #[arg(short = 'z', long)]
    pub compress: bool,

    /// Write to standard output.
    #[arg(short = 'c', long = "stdout", conflicts_with = "output")]
    pub to_stdout: bool,

    /// Overwrite an existing output file.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Keep the input file (default).
    #[arg(short = 'k', long, conflicts_with = "rm")]
    pub keep: bool,

    /// Remove the input file after success.
    #[arg(long)]
    pub rm: bool,

    /// Compressor block size, e.g. 128K or 1M [default: 128K].
    #[arg(short = 'B', long, value_parser = parse_size)]
    pub block_size: Option<usize>,

    /// Decompressor memory limit, e.g. 256K [default: 256K].
    #[arg(short = 'M', long, value_parser = parse_size)]
    pub mem_limit: Option<usize>,

    /// Block codec: lz4 or stored [default: lz4].
    #[arg(long, value_parser = parse_codec)]
    pub codec: Option<CodecKind>,

    /// More output (repeatable).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable).
    #[arg(short = 'q', long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Input file.
    pub input: PathBuf,

    /// Output file (derived from INPUT when omitted).
    pub output: Option<PathBuf>,
}

impl Args {
    /// Preferences from the environment, overridden by explicit options.
    pub fn preferences(&self) -> Result<Preferences> {
        let mut prefs = Preferences::from_env();
        if let Some(n) = self.block_size {
            prefs.set_block_size(n)?;
        }
        if let Some(n) = self.mem_limit {
            prefs.set_mem_limit(n)?;
        }
        if let Some(kind) = self.codec {
            prefs.set_codec(kind);
        }
        Ok(prefs)
    }

    /// Log level on the 0–4 ladder: 0 silent, 1 errors, 2 warnings
    /// (default), 3 info, 4 debug, anything above trace.
    pub fn log_level(&self) -> LevelFilter {
        let level = (2i32 + self.verbose as i32 - self.quiet as i32).max(0);
        match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BLOCK_SIZE, DEFAULT_MEM_LIMIT};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let a = parse(&["blockfile", "in.txt"]);
        assert!(!a.decompress);
        assert_eq!(a.block_size, None);
        assert_eq!(a.codec, None);
        let prefs = Preferences::default();
        assert_eq!(prefs.block_size(), DEFAULT_BLOCK_SIZE);
        assert_eq!(prefs.mem_limit(), DEFAULT_MEM_LIMIT);
        assert_eq!(a.log_level(), LevelFilter::Warn);
        assert!(a.output.is_none());
    }

    #[test]
    fn sizes_codec_and_verbosity() {
        let a = parse(&["blockfile", "-B", "64K", "-M1M", "--codec", "stored", "-vv", "in", "out"]);
        assert_eq!(a.block_size, Some(64 << 10));
        assert_eq!(a.mem_limit, Some(1 << 20));
        assert_eq!(a.codec, Some(CodecKind::Stored));
        assert_eq!(a.log_level(), LevelFilter::Debug);
        assert_eq!(a.output, Some(PathBuf::from("out")));
        let prefs = a.preferences().unwrap();
        assert_eq!(prefs.block_size(), 64 << 10);
        assert_eq!(prefs.codec(), CodecKind::Stored);
    }

    #[test]
    fn invalid_usage_rejected() {
        assert!(Args::try_parse_from(["blockfile", "-d", "-z", "in"]).is_err());
        assert!(Args::try_parse_from(["blockfile", "-B", "12Q", "in"]).is_err());
        assert!(Args::try_parse_from(["blockfile", "--codec", "zstd", "in"]).is_err());
        assert!(Args::try_parse_from(["blockfile"]).is_err());
    }

    #[test]
    fn zero_block_size_fails_validation() {
        let a = parse(&["blockfile", "-B", "0", "in"]);
        assert!(a.preferences().is_err());
    }

    #[test]
    fn quiet_silences() {
        assert_eq!(parse(&["blockfile", "-qq", "in"]).log_level(), LevelFilter::Off);
    }
}
