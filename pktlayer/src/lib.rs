#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! Owned protocol layers that chain, clone and serialize like network packets.
//!
//! A packet is modelled as a chain of [`Pdu`]s, each layer exclusively owning
//! the next one. Building, deep-copying, comparing, serializing and dropping a
//! chain all work the same regardless of which concrete layers it holds.
//!
//! ```
//! use pktlayer::arp::{Arp, Operation};
//! use pktlayer::{EtherAddr, Ipv4Address, Pdu, RawPdu};
//!
//! let sender_hw: EtherAddr = "7a:1f:f4:39:ab:0d".parse().unwrap();
//! let mut arp = Arp::request(
//!     Ipv4Address::new(10, 0, 0, 138),
//!     Ipv4Address::new(10, 0, 0, 1),
//!     sender_hw,
//! );
//! arp.set_inner(Box::new(RawPdu::from_slice(&[0; 18])));
//!
//! let bytes = arp.serialize();
//! assert_eq!(bytes.len(), 28 + 18);
//!
//! let decoded = Arp::decode(&bytes).unwrap();
//! assert_eq!(decoded.operation(), Operation::REQUEST);
//! assert_eq!(decoded.sender_hw_addr(), sender_hw);
//! ```

#[macro_use]
mod macros;

mod endian;

mod error;
pub use error::{Error, FormatError, MalformedPacket};

mod addr;
pub use addr::{EtherAddr, HwAddress, Ipv4Address};

pub mod pdu;
pub use pdu::{InnerPdu, Layers, Pdu, PduBase, PduKind, RawPdu};

pub mod arp;
pub use bytes::{Bytes, BytesMut};
