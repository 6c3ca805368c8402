//! MIDI System Exclusive framing and manufacturer identification.
//!
//! Raw bytes go through [`sysex::Message::parse`], which checks the `F0 .. F7` framing,
//! splits off the 1-, 3- or 4-byte identifier and keeps the rest as an opaque payload.
//! Every parsed message encodes back to the exact bytes it came from.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate strum_macros;

pub mod hexdump;
pub mod schema;
pub mod sysex;

pub use crate::sysex::manufacturer::{Manufacturer, ManufacturerGroup, ManufacturerKind};
pub use crate::sysex::universal::{UniversalHeader, UniversalMessage};
pub use crate::sysex::vendor::ManufacturerSpecificMessage;
pub use crate::sysex::{Message, MessageKind, SysexError, SystemExclusiveData};
