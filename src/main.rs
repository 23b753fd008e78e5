//! phylipio - PHYLIP alignment toolkit
//!
//! ## Usage
//!
//! ```bash
//! phylipio sniff <file>                       # Print the detected format
//! phylipio read <file> --seq 2 --ids relaxed  # Dump records as >id / residues
//! phylipio reformat <file> -o out.phy         # Rewrite as strict PHYLIP
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `-v`) to see skipped rows.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use phylipio::formats::phylip::{self, relaxed_ids, strict_ids, IdParser, ReadOptions};
use phylipio::formats::{open_nonempty, FormatRegistry};
use phylipio::model::{Sequence, SequenceType};

/// Identifier layout of the input rows
#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdsArg {
    /// First 10 characters are the identifier
    Strict,
    /// Identifier ends at the first whitespace
    Relaxed,
}

impl IdsArg {
    fn parser(self) -> IdParser {
        match self {
            IdsArg::Strict => strict_ids,
            IdsArg::Relaxed => relaxed_ids,
        }
    }
}

/// Residue alphabet to tag sequences with
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Generic,
    Dna,
    Rna,
    Protein,
}

impl From<TypeArg> for SequenceType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Generic => SequenceType::Generic,
            TypeArg::Dna => SequenceType::Dna,
            TypeArg::Rna => SequenceType::Rna,
            TypeArg::Protein => SequenceType::Protein,
        }
    }
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Input PHYLIP file
    file: PathBuf,

    /// Identifier layout
    #[arg(long, value_enum, default_value = "strict")]
    ids: IdsArg,

    /// Fail on rows whose length or count disagrees with the header
    #[arg(long)]
    strict: bool,

    /// Output file. Use "-" (the default) for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,
}

impl DecodeArgs {
    fn read_options(&self) -> ReadOptions {
        ReadOptions::default()
            .id_parser(self.ids.parser())
            .strict(self.strict)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the detected format of a file, or "unknown"
    Sniff {
        /// File to inspect
        file: PathBuf,
    },

    /// Decode a PHYLIP file and print its records as >id / residues
    Read {
        #[command(flatten)]
        decode: DecodeArgs,

        /// Only print the Nth sequence (1-based)
        #[arg(long = "seq")]
        seq_num: Option<usize>,

        /// Alphabet of the residues
        #[arg(short = 't', long = "type", value_enum, default_value = "generic")]
        sequence_type: TypeArg,
    },

    /// Decode a PHYLIP file and write it back as strict, sequential PHYLIP
    Reformat {
        #[command(flatten)]
        decode: DecodeArgs,
    },
}

/// phylipio - read, write and sniff PHYLIP alignments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Returns a buffered writer on a file, or on stdout for "-".
fn get_writer(output: &str) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        Box::new(BufWriter::new(File::create(Path::new(output))?))
    };
    Ok(writer)
}

fn write_record(writer: &mut dyn Write, seq: &Sequence) -> io::Result<()> {
    writeln!(writer, ">{}", seq.id)?;
    writeln!(writer, "{}", seq.as_str())
}

fn run_read(decode: &DecodeArgs, seq_num: Option<usize>, sequence_type: SequenceType) -> Result<()> {
    let reader = open_nonempty(&decode.file)?;
    let options = decode.read_options();
    let mut writer = get_writer(&decode.output)?;

    if let Some(n) = seq_num {
        let seq = phylip::read_nth_sequence(reader, options, n, sequence_type)?;
        write_record(&mut writer, &seq)?;
    } else {
        let mut count = 0;
        for seq in phylip::read_sequences(reader, options, sequence_type) {
            write_record(&mut writer, &seq?)?;
            count += 1;
        }
        info!("Read {count} {sequence_type} sequences");
    }
    writer.flush()?;
    Ok(())
}

fn run_reformat(registry: &FormatRegistry, decode: &DecodeArgs) -> Result<()> {
    let alignment =
        registry.parse_file_with_options(&decode.file, Some("phylip"), &decode.read_options())?;
    let mut writer = get_writer(&decode.output)?;
    registry.write("phylip", &alignment, &mut writer)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();

    let registry = FormatRegistry::with_defaults();

    match &cli.command {
        Command::Sniff { file } => match registry.detect_format_from_content(file)? {
            Some(entry) => println!("{}", entry.name),
            None => println!("unknown"),
        },
        Command::Read {
            decode,
            seq_num,
            sequence_type,
        } => run_read(decode, *seq_num, (*sequence_type).into())?,
        Command::Reformat { decode } => run_reformat(&registry, decode)?,
    }

    Ok(())
}
