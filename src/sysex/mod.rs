use std::fmt;

use snafu::{ensure, Snafu};

use crate::sysex::manufacturer::Manufacturer;
use crate::sysex::universal::{UniversalHeader, UniversalMessage};
use crate::sysex::vendor::ManufacturerSpecificMessage;

pub mod manufacturer;
pub mod universal;
pub mod vendor;

pub const INITIATOR: u8 = 0xF0;
pub const TERMINATOR: u8 = 0xF7;

/// Reserved identifier for development / non-commercial use.
pub const DEVELOPMENT: u8 = 0x7D;
pub const UNIVERSAL_NON_REALTIME: u8 = 0x7E;
pub const UNIVERSAL_REALTIME: u8 = 0x7F;

/// First byte of a three-byte manufacturer identifier.
pub const EXTENDED: u8 = 0x00;

pub const MIN_LENGTH: usize = 5;
pub const MIN_UNIVERSAL_LENGTH: usize = 6;

pub type Result<T> = ::std::result::Result<T, SysexError>;

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum SysexError {
    #[snafu(display(
        "identifier must be one byte, or three bytes starting with 00H (got [{}])",
        hex::encode_upper(identifier)
    ))]
    InvalidIdentifier { identifier: Vec<u8> },

    #[snafu(display("message too short ({} < {})", length, minimum))]
    TooShort { length: usize, minimum: usize },

    #[snafu(display("message must start with F0H (found {:02X}H)", found))]
    MissingInitiator { found: u8 },

    #[snafu(display("message must end with F7H (found {:02X}H)", found))]
    MissingTerminator { found: u8 },
}

/// Anything with a System Exclusive wire form.
pub trait SystemExclusiveData {
    /// Append the wire bytes to `out`.
    fn write_to(&self, out: &mut Vec<u8>);

    /// Number of bytes `write_to` appends.
    fn encoded_len(&self) -> usize;

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MessageKind {
    UniversalNonRealTime,
    UniversalRealTime,
    ManufacturerSpecific,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Universal(UniversalMessage),
    ManufacturerSpecific(ManufacturerSpecificMessage),
}

impl Message {
    /// Parse one complete message, `F0` and `F7` included.
    ///
    /// The byte after `F0` decides how long the identifier is:
    /// `7E`/`7F` are followed by a three byte universal header, `00` by two more
    /// manufacturer bytes, anything else is a single byte manufacturer.
    /// The payload is whatever sits between the identifier and the final `F7`.
    pub fn parse(data: &[u8]) -> Result<Message> {
        let length = data.len();
        ensure!(
            length >= MIN_LENGTH,
            TooShort {
                length,
                minimum: MIN_LENGTH
            }
        );
        ensure!(data[0] == INITIATOR, MissingInitiator { found: data[0] });
        let last = data[length - 1];
        ensure!(last == TERMINATOR, MissingTerminator { found: last });

        let payload = |start: usize| data[start..length - 1].to_vec();

        let message = match data[1] {
            DEVELOPMENT => {
                tracing::debug!(length, "development message");
                Message::ManufacturerSpecific(ManufacturerSpecificMessage::new(
                    Manufacturer::development(),
                    payload(2),
                ))
            }
            tag @ UNIVERSAL_NON_REALTIME | tag @ UNIVERSAL_REALTIME => {
                ensure!(
                    length >= MIN_UNIVERSAL_LENGTH,
                    TooShort {
                        length,
                        minimum: MIN_UNIVERSAL_LENGTH
                    }
                );
                let realtime = tag == UNIVERSAL_REALTIME;
                tracing::debug!(length, realtime, "universal message");
                let header = UniversalHeader {
                    device_channel: data[2],
                    sub_id1: data[3],
                    sub_id2: data[4],
                };
                Message::Universal(UniversalMessage::new(realtime, header, payload(5)))
            }
            EXTENDED => {
                let manufacturer = Manufacturer::new(&data[1..4])?;
                tracing::debug!(length, id = %manufacturer.key(), "extended manufacturer message");
                Message::ManufacturerSpecific(ManufacturerSpecificMessage::new(
                    manufacturer,
                    payload(4),
                ))
            }
            _ => {
                let manufacturer = Manufacturer::new(&data[1..2])?;
                tracing::debug!(length, id = %manufacturer.key(), "standard manufacturer message");
                Message::ManufacturerSpecific(ManufacturerSpecificMessage::new(
                    manufacturer,
                    payload(2),
                ))
            }
        };
        Ok(message)
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Universal(msg) if msg.realtime => MessageKind::UniversalRealTime,
            Message::Universal(_) => MessageKind::UniversalNonRealTime,
            Message::ManufacturerSpecific(_) => MessageKind::ManufacturerSpecific,
        }
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            Message::Universal(msg) => &msg.payload,
            Message::ManufacturerSpecific(msg) => &msg.payload,
        }
    }
}

impl SystemExclusiveData for Message {
    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Message::Universal(msg) => msg.write_to(out),
            Message::ManufacturerSpecific(msg) => msg.write_to(out),
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            Message::Universal(msg) => msg.encoded_len(),
            Message::ManufacturerSpecific(msg) => msg.encoded_len(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Universal(msg) => fmt::Display::fmt(msg, f),
            Message::ManufacturerSpecific(msg) => fmt::Display::fmt(msg, f),
        }
    }
}

/// Iterate over the `F0 .. F7` frames of a byte stream.
pub fn split(stream: &[u8]) -> Split<'_> {
    Split { rest: stream }
}

/// Frames found by [`split`].
///
/// Bytes before an `F0` are skipped. A frame missing its `F7` runs to the end of
/// the stream, so parsing it reports the missing terminator.
pub struct Split<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let start = self.rest.iter().position(|b| *b == INITIATOR)?;
        if start > 0 {
            tracing::warn!(skipped = start, "bytes outside of a sysex frame");
        }
        let frame = &self.rest[start..];
        // a second F0 before any F7 starts a new frame
        let end = frame[1..]
            .iter()
            .position(|b| *b == TERMINATOR || *b == INITIATOR)
            .map(|idx| idx + 1);
        let (frame, rest) = match end {
            Some(idx) if frame[idx] == TERMINATOR => frame.split_at(idx + 1),
            Some(idx) => frame.split_at(idx),
            None => (frame, &frame[frame.len()..]),
        };
        self.rest = rest;
        Some(frame)
    }
}
