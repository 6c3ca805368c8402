use std::fmt;

use crate::sysex::manufacturer::Manufacturer;
use crate::sysex::{SystemExclusiveData, INITIATOR, TERMINATOR};

/// Message whose payload format belongs to a manufacturer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerSpecificMessage {
    pub manufacturer: Manufacturer,
    pub payload: Vec<u8>,
}

impl ManufacturerSpecificMessage {
    pub fn new(manufacturer: Manufacturer, payload: Vec<u8>) -> Self {
        ManufacturerSpecificMessage {
            manufacturer,
            payload,
        }
    }
}

impl SystemExclusiveData for ManufacturerSpecificMessage {
    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(INITIATOR);
        self.manufacturer.write_to(out);
        out.extend_from_slice(&self.payload);
        out.push(TERMINATOR);
    }

    fn encoded_len(&self) -> usize {
        1 + self.manufacturer.encoded_len() + self.payload.len() + 1
    }
}

impl fmt::Display for ManufacturerSpecificMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Manufacturer: {}", self.manufacturer)?;
        writeln!(f, "Payload: {} bytes", self.payload.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_arturia() {
        // MicroBrute parameter query
        let msg = ManufacturerSpecificMessage::new(
            Manufacturer::new(&[0x00, 0x20, 0x6B]).unwrap(),
            vec![0x05, 0x01, 0x00, 0x00, 0x3A],
        );
        assert_eq!(
            msg.to_bytes(),
            vec![0xF0, 0x00, 0x20, 0x6B, 0x05, 0x01, 0x00, 0x00, 0x3A, 0xF7]
        );
        assert_eq!(msg.encoded_len(), 10);
    }

    #[test]
    fn encode_standard_empty() {
        let msg = ManufacturerSpecificMessage::new(Manufacturer::new(&[0x41]).unwrap(), vec![]);
        assert_eq!(msg.to_bytes(), vec![0xF0, 0x41, 0xF7]);
        assert_eq!(msg.encoded_len(), 3);
    }

    #[test]
    fn display() {
        let msg = ManufacturerSpecificMessage::new(
            Manufacturer::new(&[0x42]).unwrap(),
            vec![0x30, 0x00],
        );
        assert_eq!(
            msg.to_string(),
            "Manufacturer: Korg Inc. (id=42H, Japanese)\nPayload: 2 bytes\n"
        );
    }
}
