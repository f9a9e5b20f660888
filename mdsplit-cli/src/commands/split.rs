//! Split command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_inputs, Source};
use crate::output::{create_formatter, OutputFormat, Sink};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mdsplit_api::{MarkdownSplitter, Output};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob; `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum chunk length in characters [default: 4000]
    #[arg(short, long, value_name = "CHARS", env = "MDSPLIT_MAX_LENGTH")]
    pub max_length: Option<usize>,

    /// What to do when no balanced boundary fits [default: hard-cut]
    #[arg(long, value_enum, value_name = "POLICY")]
    pub overflow: Option<OverflowArg>,

    /// Extra characters the lookahead policy may use; implies `--overflow lookahead`
    #[arg(long, value_name = "CHARS")]
    pub lookahead: Option<usize>,

    /// Treat `$` as plain text instead of a math delimiter
    #[arg(long)]
    pub no_math: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Overflow policies selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverflowArg {
    /// Cut at the limit even inside a span
    HardCut,
    /// Let the chunk grow to the next balanced boundary
    Lookahead,
    /// Close open spans and re-open them in the next chunk
    Reopen,
}

impl OverflowArg {
    /// Policy name as understood by the configuration file
    pub fn name(self) -> &'static str {
        match self {
            OverflowArg::HardCut => "hard-cut",
            OverflowArg::Lookahead => "lookahead",
            OverflowArg::Reopen => "reopen",
        }
    }
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting split");
        log::debug!("Arguments: {:?}", self);

        let config = self.resolve_config()?;
        let format = self.resolve_format(&config)?;
        let splitter = MarkdownSplitter::with_config(config.to_api_config()?)?;
        log::info!(
            "Splitting at {} characters with the {} policy",
            splitter.config().max_length(),
            splitter.config().overflow().name()
        );

        let sources = resolve_inputs(&self.input)?;
        let mut progress = ProgressReporter::new(self.quiet);
        if sources.len() > 1 {
            progress.init_files(sources.len() as u64);
        }

        let results = sources
            .par_iter()
            .map(|source| split_source(&splitter, source, &progress))
            .collect::<Result<Vec<_>>>()?;
        progress.finish();

        let mut formatter = create_formatter(format, self.open_output()?, &config.output.separator);
        let mut total_chunks = 0;
        let mut hard_cuts = 0;
        for (name, output) in &results {
            for chunk in &output.chunks {
                formatter.format_chunk(name, chunk)?;
            }
            total_chunks += output.len();
            hard_cuts += output.metadata.hard_cuts;
        }
        formatter.finish()?;

        log::info!(
            "Wrote {} chunks from {} inputs ({} hard cuts)",
            total_chunks,
            results.len(),
            hard_cuts
        );
        Ok(())
    }

    /// Configuration file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let splitting = &mut config.splitting;
        if let Some(max_length) = self.max_length {
            splitting.max_length = max_length;
        }
        if let Some(lookahead) = self.lookahead {
            splitting.lookahead = lookahead;
            if self.overflow.is_none() {
                splitting.overflow = OverflowArg::Lookahead.name().to_string();
            }
        }
        if let Some(overflow) = self.overflow {
            splitting.overflow = overflow.name().to_string();
        }
        if self.no_math {
            splitting.math = false;
        }

        Ok(config)
    }

    fn resolve_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_str(&config.output.format, true).map_err(|_| {
                CliError::ConfigError(format!(
                    "unknown output format '{}', expected text, json or markdown",
                    config.output.format
                ))
                .into()
            }),
        }
    }

    fn open_output(&self) -> Result<Sink> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .context("Failed to initialize logging")?;
        }
        Ok(())
    }
}

fn split_source(
    splitter: &MarkdownSplitter,
    source: &Source,
    progress: &ProgressReporter,
) -> Result<(String, Output)> {
    let name = source.name();
    let text = source.read()?;
    let output = splitter
        .split_text(&text)
        .map_err(|e| CliError::SplitError(format!("{name}: {e}")))?;
    log::debug!(
        "{}: {} chunks, {} hard cuts",
        name,
        output.len(),
        output.metadata.hard_cuts
    );
    progress.file_completed(&name, output.len());
    Ok((name, output))
}
