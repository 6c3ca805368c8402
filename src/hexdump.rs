use std::fmt;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Layout of a hex dump, deserializable from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexDumpConfig {
    /// Zero puts everything on one line.
    pub bytes_per_line: usize,
    pub uppercase: bool,
    pub offset: bool,
    pub printable: bool,
    pub middle_gap: bool,
}

impl Default for HexDumpConfig {
    fn default() -> Self {
        HexDumpConfig {
            bytes_per_line: 16,
            uppercase: true,
            offset: true,
            printable: true,
            middle_gap: false,
        }
    }
}

impl HexDumpConfig {
    pub fn from_yaml(body: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(body)
    }
}

pub struct HexDump<'a> {
    data: &'a [u8],
    config: HexDumpConfig,
}

impl<'a> HexDump<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        HexDump {
            data,
            config: HexDumpConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HexDumpConfig) -> Self {
        self.config = config;
        self
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, chunk: &[u8], offset: usize) -> fmt::Result {
        let cfg = &self.config;
        let width = if cfg.bytes_per_line == 0 {
            chunk.len()
        } else {
            cfg.bytes_per_line
        };
        let mut chars = String::with_capacity(width);

        if cfg.offset {
            if cfg.uppercase {
                write!(f, "{:08X}: ", offset)?;
            } else {
                write!(f, "{:08x}: ", offset)?;
            }
        }
        for slot in 0..width {
            match chunk.get(slot) {
                Some(b) if cfg.uppercase => write!(f, "{:02X} ", b)?,
                Some(b) => write!(f, "{:02x} ", b)?,
                None => f.write_str("   ")?,
            }
            if cfg.middle_gap && slot + 1 == width / 2 {
                f.write_char(' ')?;
            }
            chars.push(match chunk.get(slot) {
                Some(b) if b.is_ascii_graphic() || *b == b' ' => *b as char,
                Some(_) => '.',
                None => ' ',
            });
        }
        if cfg.printable {
            write!(f, " {}", chars)?;
        }
        f.write_char('\n')
    }
}

impl<'a> fmt::Display for HexDump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return Ok(());
        }
        if self.config.bytes_per_line == 0 {
            return self.line(f, self.data, 0);
        }
        for (idx, chunk) in self.data.chunks(self.config.bytes_per_line).enumerate() {
            self.line(f, chunk, idx * self.config.bytes_per_line)?;
        }
        Ok(())
    }
}
