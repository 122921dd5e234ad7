//! Address value types used as header fields.
//!
//! Both types are plain `Copy` values: equality is bitwise, there is no
//! identity beyond the stored bytes, and nothing about them can change once
//! constructed.

mod hw;
pub use hw::{EtherAddr, HwAddress};

mod ipv4;
pub use ipv4::Ipv4Address;
