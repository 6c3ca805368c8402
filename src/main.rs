use std::fs;
use std::path::PathBuf;

use structopt::StructOpt;
use strum::IntoEnumIterator;

use la_sysex::hexdump::{HexDump, HexDumpConfig};
use la_sysex::schema::{ManufacturerNames, NameTable, MANUFACTURERS};
use la_sysex::sysex::{self, Message};
use la_sysex::{Manufacturer, ManufacturerGroup};

mod logging;

pub type Result<T> = ::std::result::Result<T, Box<dyn ::std::error::Error>>;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "la_sysex",
    about = "Inspect MIDI System Exclusive messages"
)]
struct LaSysex {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Manufacturer names YAML to use instead of the built-in table
    #[structopt(long = "names", parse(from_os_str))]
    names: Option<PathBuf>,

    #[structopt(subcommand)]
    subcmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    #[structopt(name = "dump")]
    /// Describe every message in a .syx file and dump its payload
    Dump {
        #[structopt(parse(from_os_str))]
        file: PathBuf,
        /// Hex dump layout YAML
        #[structopt(long = "config", parse(from_os_str))]
        config: Option<PathBuf>,
        /// Bytes per dump line, 0 for a single line
        #[structopt(long = "width")]
        width: Option<usize>,
        #[structopt(long = "lowercase")]
        lowercase: bool,
    },
    #[structopt(name = "parse")]
    /// Describe one message given as hex, e.g. "F0 7E 7F 06 01 F7"
    Parse { hex: Vec<String> },
    #[structopt(name = "manufacturer")]
    /// Describe a one or three byte manufacturer identifier
    Manufacturer { hex: Vec<String> },
    #[structopt(name = "list")]
    /// List known manufacturers
    List {
        /// north-american, japanese, european or development
        #[structopt(long = "group")]
        group: Option<ManufacturerGroup>,
    },
}

fn main() -> Result<()> {
    let app = LaSysex::from_args();
    logging::init_logging(app.verbose);

    let custom = match &app.names {
        Some(path) => Some(ManufacturerNames::from_yaml(&fs::read_to_string(path)?)?),
        None => None,
    };
    let names: &ManufacturerNames = custom.as_ref().unwrap_or(&*MANUFACTURERS);
    tracing::debug!(entries = names.len(), "manufacturer table");

    match app.subcmd {
        Command::Dump {
            file,
            config,
            width,
            lowercase,
        } => {
            let mut layout = match config {
                Some(path) => HexDumpConfig::from_yaml(&fs::read_to_string(path)?)?,
                None => HexDumpConfig::default(),
            };
            if let Some(width) = width {
                layout.bytes_per_line = width;
            }
            if lowercase {
                layout.uppercase = false;
            }
            let data = fs::read(&file)?;
            tracing::info!(file = %file.display(), bytes = data.len(), "dump");
            for (idx, frame) in sysex::split(&data).enumerate() {
                println!("Message {} ({} bytes)", idx + 1, frame.len());
                match Message::parse(frame) {
                    Ok(message) => {
                        print!("{}", describe(&message, names));
                        print!(
                            "{}",
                            HexDump::new(message.payload()).with_config(layout.clone())
                        );
                    }
                    Err(err) => eprintln!("Message {}: {}", idx + 1, err),
                }
                println!();
            }
        }
        Command::Parse { hex } => {
            let message = Message::parse(&decode_hex(&hex)?)?;
            print!("{}", describe(&message, names));
            print!("{}", HexDump::new(message.payload()));
        }
        Command::Manufacturer { hex } => {
            let manufacturer = Manufacturer::new(&decode_hex(&hex)?)?;
            println!("{}", manufacturer.describe(names));
        }
        Command::List { group } => {
            let mut known = vec![];
            for (id, _) in names.iter() {
                match Manufacturer::new(&id) {
                    Ok(manufacturer) => known.push(manufacturer),
                    Err(err) => tracing::warn!("skipping table entry: {}", err),
                }
            }
            for g in ManufacturerGroup::iter().filter(|g| group.map_or(true, |want| want == *g)) {
                println!("== {}", g);
                known
                    .iter()
                    .filter(|manufacturer| manufacturer.group() == g)
                    .for_each(|manufacturer| println!("{}", manufacturer.describe(names)));
            }
        }
    }

    Ok(())
}

fn describe(message: &Message, names: &dyn NameTable) -> String {
    match message {
        Message::ManufacturerSpecific(msg) => format!(
            "Manufacturer: {}\nPayload: {} bytes\n",
            msg.manufacturer.describe(names),
            msg.payload.len()
        ),
        Message::Universal(_) => message.to_string(),
    }
}

/// Accepts "F0 41 F7", "f041f7" or any mix of separated chunks.
fn decode_hex(parts: &[String]) -> Result<Vec<u8>> {
    let text: String = parts
        .iter()
        .flat_map(|part| part.chars())
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    Ok(hex::decode(text)?)
}
