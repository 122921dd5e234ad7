//! Arp protocol.
//!
//! The header is laid out as follows, with `N` and `M` taken from the two
//! length fields. For Ethernet/IPv4 they are 6 and 4, giving 28 bytes.
//!
//! ```text
//! offset   size  field
//! 0        2     hardware type
//! 2        2     protocol type
//! 4        1     hardware address length (N)
//! 5        1     protocol address length (M)
//! 6        2     operation
//! 8        N     sender hardware address
//! 8+N      M     sender protocol address
//! 8+N+M    N     target hardware address
//! 8+2N+M   M     target protocol address
//! ```

enum_sim! {
    /// Hardware type of the arp protocol.
    pub struct Hardware (u16) {
        /// The contained hardware address is Ethernet address.
        ETHERNET = 1,
        /// IEEE 802 networks.
        IEEE802 = 6,
    }
}

enum_sim! {
    /// Protocol type of the arp protocol, drawn from the Ethertype registry.
    pub struct ProtocolType (u16) {
        /// The contained protocol address is an Ipv4 address.
        IPV4 = 0x0800,
        /// Arp itself.
        ARP = 0x0806,
        /// The contained protocol address is an Ipv6 address.
        IPV6 = 0x86DD,
    }
}

enum_sim! {
    /// Operation type of the arp protocol.
    pub struct Operation (u16) {
        /// Arp request.
        REQUEST = 1,
        /// Arp response.
        REPLY = 2,
        /// Reverse arp request.
        REVERSE_REQUEST = 3,
        /// Reverse arp response.
        REVERSE_REPLY = 4,
        /// Inverse arp request.
        INVERSE_REQUEST = 8,
        /// Inverse arp response.
        INVERSE_REPLY = 9,
    }
}

mod packet;
pub use packet::{Arp, ARP_FIXED_HEADER_LEN, ARP_HEADER_LEN, ARP_HEADER_TEMPLATE};
