use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use cnf_normalize::{
    stream::{self, STDIO},
    Config, NormalizeError, Normalizer, OutputMode,
};
use cnf_stream::DeferredWriter;
use thiserror::Error;
use tracing::Level;

/// Normalize CNFs in DIMACS format by removing all comments and white-space, checking for syntax
/// issues on the way.
///
/// The file arguments can be '-' to denote '<stdin>' respectively '<stdout>', which are also the
/// default files if not specified. Files ending in '.xz' are transparently decompressed or
/// compressed.
#[derive(Parser, Debug)]
#[command(name = "normalize", version, about, long_about)]
struct Args {
    /// Input file in DIMACS format, followed by the output file
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
    /// Write all clauses on a single line without header (GBD format)
    #[arg(short, long)]
    gbd: bool,
    /// Reject blank lines before the header and a final comment without newline
    #[arg(long)]
    strict: bool,
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn input(&self) -> &Path {
        self.files.first().map_or(Path::new(STDIO), PathBuf::as_path)
    }

    fn output(&self) -> &Path {
        self.files.get(1).map_or(Path::new(STDIO), PathBuf::as_path)
    }
}

#[derive(Error, Debug)]
enum Error {
    #[error("too many files")]
    TooManyFiles,
    #[error("can not read input file '{}': {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can not write output file '{}': {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(args.verbose);

    let input = args.input();
    match run(&args, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_message(input, &err));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Formats the single line reported for a fatal error.
fn error_message(input: &Path, err: &Error) -> String {
    format!(
        "normalize: error in '{}': {}",
        stream::input_name(input),
        err
    )
}

fn run(args: &Args, input: &Path) -> Result<(), Error> {
    if args.files.len() > 2 {
        return Err(Error::TooManyFiles);
    }
    let output = args.output();

    let mode = if args.gbd {
        OutputMode::Gbd
    } else {
        OutputMode::Standard
    };
    let config = if args.strict {
        Config::strict()
    } else {
        Config::default()
    };

    tracing::debug!(
        input = %stream::input_name(input),
        output = %stream::output_name(output),
        ?mode,
        ?config,
        "normalizing"
    );

    let read = stream::open_input(input).map_err(|source| Error::ReadInput {
        path: input.to_owned(),
        source,
    })?;

    // The output is only created once the header was found to be valid.
    let normalizer = Normalizer::from_boxed_dyn_read(read, config)?;

    let mut write = stream::open_output(output).map_err(|source| Error::WriteOutput {
        path: output.to_owned(),
        source,
    })?;

    {
        let mut writer = DeferredWriter::from_write(&mut write);
        normalizer.write(&mut writer, mode)?;
    }

    write.finish().map_err(NormalizeError::from)?;

    Ok(())
}
