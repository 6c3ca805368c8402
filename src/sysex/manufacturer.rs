use std::fmt;

use snafu::ensure;

use crate::schema::{NameTable, MANUFACTURERS};
use crate::sysex::{InvalidIdentifier, Result, SystemExclusiveData, DEVELOPMENT, EXTENDED};

pub const DEVELOPMENT_NAME: &str = "Development / Non-commercial";
pub const UNKNOWN_NAME: &str = "(unknown)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ManufacturerKind {
    Development,
    Standard,
    Extended,
}

/// Administrative region the identifier was allocated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
pub enum ManufacturerGroup {
    #[strum(serialize = "north-american", serialize = "na")]
    NorthAmerican,
    #[strum(serialize = "japanese", serialize = "jp")]
    Japanese,
    #[strum(serialize = "european", serialize = "eu")]
    EuropeanAndOther,
    #[strum(serialize = "development", serialize = "dev")]
    Development,
}

impl fmt::Display for ManufacturerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ManufacturerGroup::NorthAmerican => "North American",
            ManufacturerGroup::Japanese => "Japanese",
            ManufacturerGroup::EuropeanAndOther => "European & other",
            ManufacturerGroup::Development => "Development",
        })
    }
}

/// Manufacturer identifier, one byte or three bytes starting with `00H`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Manufacturer {
    kind: ManufacturerKind,
    identifier: Vec<u8>,
}

impl Manufacturer {
    pub fn new(identifier: &[u8]) -> Result<Self> {
        let kind = match identifier {
            [DEVELOPMENT] => ManufacturerKind::Development,
            [_] => ManufacturerKind::Standard,
            [first, _, _] => {
                ensure!(
                    *first == EXTENDED,
                    InvalidIdentifier {
                        identifier: identifier.to_vec()
                    }
                );
                ManufacturerKind::Extended
            }
            _ => {
                return InvalidIdentifier {
                    identifier: identifier.to_vec(),
                }
                .fail()
            }
        };
        Ok(Manufacturer {
            kind,
            identifier: identifier.to_vec(),
        })
    }

    pub fn development() -> Self {
        Manufacturer {
            kind: ManufacturerKind::Development,
            identifier: vec![DEVELOPMENT],
        }
    }

    pub fn kind(&self) -> ManufacturerKind {
        self.kind
    }

    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    pub fn group(&self) -> ManufacturerGroup {
        match self.kind {
            ManufacturerKind::Development => ManufacturerGroup::Development,
            ManufacturerKind::Standard => match self.identifier[0] {
                0x01..=0x3F => ManufacturerGroup::NorthAmerican,
                0x40..=0x5F => ManufacturerGroup::Japanese,
                _ => ManufacturerGroup::EuropeanAndOther,
            },
            ManufacturerKind::Extended => {
                let b = self.identifier[1];
                if b & 0x40 != 0 {
                    ManufacturerGroup::Japanese
                } else if b & 0x20 != 0 {
                    ManufacturerGroup::EuropeanAndOther
                } else {
                    ManufacturerGroup::NorthAmerican
                }
            }
        }
    }

    /// Name table key, e.g. `"40"` or `"00000E"`.
    pub fn key(&self) -> String {
        hex::encode_upper(&self.identifier)
    }

    /// Name from the built-in table.
    pub fn name(&self) -> &'static str {
        self.name_in(&*MANUFACTURERS)
    }

    pub fn name_in<'t>(&self, table: &'t dyn NameTable) -> &'t str {
        match self.kind {
            ManufacturerKind::Development => DEVELOPMENT_NAME,
            _ => table.lookup(&self.key()).unwrap_or(UNKNOWN_NAME),
        }
    }

    /// One line summary like `Yamaha (id=43H, Japanese)`, named from `table`.
    pub fn describe(&self, table: &dyn NameTable) -> String {
        let id: String = self
            .identifier
            .iter()
            .map(|b| format!("{:02X}H", b))
            .collect();
        format!("{} (id={}, {})", self.name_in(table), id, self.group())
    }
}

impl SystemExclusiveData for Manufacturer {
    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.identifier);
    }

    fn encoded_len(&self) -> usize {
        self.identifier.len()
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&*MANUFACTURERS))
    }
}
