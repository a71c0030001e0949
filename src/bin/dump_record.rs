use clap::Parser;
use endian_stream::yaml::dumper::RecordYamlDumper;
use endian_stream::yaml::parser::RecordYamlParser;
use endian_stream::{RecordError, RecordReader};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Dump a binary record to a human readable yaml representation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// binary file to decode
    file: PathBuf,
    /// YAML document describing the record (as accepted by `compile_record`). only the field
    /// types and string lengths are used, the values are ignored
    #[arg(short = 'l', long)]
    layout: PathBuf,
    /// print integers as hex bit patterns
    #[arg(short = 'x', long, action)]
    hex: bool,
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
    let (byte_order, layout) =
        RecordYamlParser::layout_from_str(&fs::read_to_string(&args.layout)?)?;
    let expected_len: usize = layout.iter().map(|field| field.byte_len()).sum();
    let file_len = fs::metadata(&args.file)?.len();
    if file_len > expected_len as u64 {
        warn!(
            "{} is {file_len} bytes long but the layout only covers {expected_len} bytes",
            args.file.display()
        );
    }

    let reader = BufReader::new(File::open(&args.file)?);
    let record = RecordReader::read(reader, byte_order, &layout)?;
    info!("decoded {} fields", record.fields().len());

    let dumper = RecordYamlDumper {
        dump_integers_as_hex: args.hex,
    };
    print!("{}", dumper.dump_record(&record));
    Ok(())
}
