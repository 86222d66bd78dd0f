use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fortran_lines::{InputStream, LogicalLine, ReaderError, ReaderOptions};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fortran-lines")]
#[command(version, about = "Print the logical lines of a Fortran source file", long_about = None)]
struct Cli {
    /// Fortran source file (`-` or omitted reads stdin)
    path: Option<PathBuf>,

    /// Name to report in diagnostics instead of the path
    #[arg(long)]
    filename: Option<String>,

    /// Spaces substituted for each tab
    #[arg(long)]
    tab_width: Option<usize>,

    /// JSON file with reader options
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Line range, code, then each non-empty comment
    Text,
    /// One JSON object per logical line
    Json,
}

fn load_options(cli: &Cli) -> Result<ReaderOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<ReaderOptions>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ReaderOptions::default(),
    };
    if let Some(tab_width) = cli.tab_width {
        options.tab_width = tab_width;
    }
    Ok(options)
}

fn write_line(out: &mut impl Write, line: &LogicalLine, format: Format) -> Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string(line)?)?,
        Format::Text => {
            let prefix = line
                .sentinel
                .as_ref()
                .map(|s| format!("{} ", s.marker))
                .unwrap_or_default();
            writeln!(
                out,
                "{}-{}\t{}{}",
                line.first_line, line.last_line, prefix, line.code
            )?;
            for comment in line.comments.iter().filter(|c| !c.is_empty()) {
                writeln!(out, "\t{}", comment)?;
            }
        }
    }
    Ok(())
}

fn dump<R: BufRead>(stream: InputStream<R>, format: Format) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stream {
        write_line(&mut out, &line?, format)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let options = load_options(&cli)?;

    match cli.path.as_deref().filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let mut stream = InputStream::open(path)?.with_options(options);
            if let Some(name) = cli.filename {
                stream = stream.with_filename(name);
            }
            dump(stream, cli.format)
        }
        None => {
            let stream = InputStream::new(BufReader::new(io::stdin()))
                .with_options(options)
                .with_filename(cli.filename.unwrap_or_else(|| "<stdin>".to_string()));
            dump(stream, cli.format)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fortran_lines=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ReaderError>() {
                Some(reader_err) if !reader_err.is_user_error() => {
                    eprintln!("{reader_err}");
                    eprintln!("this looks like a limitation of fortran-lines, please report it");
                }
                Some(reader_err) => eprintln!("{reader_err}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
