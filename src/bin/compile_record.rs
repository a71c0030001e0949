use clap::Parser;
use endian_stream::yaml::parser::RecordYamlParser;
use endian_stream::{RecordError, RecordWriter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Compile a binary record from its textual YAML representation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML file describing the record
    yaml_file: PathBuf,
    /// where to write the binary record. stdout if omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// treat the stream as big-endian regardless of the byte_order in the document
    #[arg(long, action, conflicts_with = "little_endian")]
    big_endian: bool,
    /// treat the stream as little-endian regardless of the byte_order in the document
    #[arg(long, action)]
    little_endian: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), RecordError> {
    let contents = fs::read_to_string(&args.yaml_file)?;
    let mut record = RecordYamlParser::parse_from_str(&contents)?;
    if args.big_endian {
        record.byte_order.treat_as_big_endian = true;
    } else if args.little_endian {
        record.byte_order.treat_as_big_endian = false;
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            RecordWriter::write(&mut writer, &record)?;
            writer.flush()?;
            info!(
                "wrote {} bytes ({} fields) to {}",
                record.byte_len(),
                record.fields().len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            RecordWriter::write(stdout.lock(), &record)?;
        }
    }
    Ok(())
}
