use core::fmt;
use core::str::FromStr;
use std::net::Ipv4Addr;

use crate::FormatError;

/// A 32-bit network-layer address.
///
/// The value is held in host order, so comparisons and ordering are plain
/// integer comparisons; it is converted to network byte order only when a
/// header is written to the wire.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Ipv4Address(u32);

impl Ipv4Address {
    /// The unspecified address, `0.0.0.0`.
    pub const UNSPECIFIED: Ipv4Address = Ipv4Address(0);

    /// The limited broadcast address, `255.255.255.255`.
    pub const BROADCAST: Ipv4Address = Ipv4Address(u32::MAX);

    /// Construct an address from its four octets, most significant first.
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Ipv4Address {
        Ipv4Address(u32::from_be_bytes([a, b, c, d]))
    }

    /// Return the four octets, most significant first.
    pub const fn octets(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Return the host-order integer value.
    pub const fn to_bits(&self) -> u32 {
        self.0
    }

    /// Query whether the address is `0.0.0.0`.
    pub const fn is_unspecified(&self) -> bool {
        self.0 == 0
    }

    /// Query whether the address is in `127.0.0.0/8`.
    pub const fn is_loopback(&self) -> bool {
        self.octets()[0] == 127
    }

    /// Query whether the address is in one of the RFC 1918 private ranges.
    pub const fn is_private(&self) -> bool {
        match self.octets() {
            [10, ..] => true,
            [172, b, ..] => b >= 16 && b <= 31,
            [192, 168, ..] => true,
            _ => false,
        }
    }

    /// Query whether the address is in `224.0.0.0/4`.
    pub const fn is_multicast(&self) -> bool {
        self.octets()[0] & 0xf0 == 0xe0
    }

    /// Query whether the address is `255.255.255.255`.
    pub const fn is_broadcast(&self) -> bool {
        self.0 == u32::MAX
    }

    /// Query whether the address is neither multicast, broadcast nor unspecified.
    pub const fn is_unicast(&self) -> bool {
        !(self.is_multicast() || self.is_broadcast() || self.is_unspecified())
    }
}

impl From<u32> for Ipv4Address {
    #[inline]
    fn from(value: u32) -> Self {
        Ipv4Address(value)
    }
}

impl From<Ipv4Address> for u32 {
    #[inline]
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

impl From<[u8; 4]> for Ipv4Address {
    #[inline]
    fn from(octets: [u8; 4]) -> Self {
        Ipv4Address(u32::from_be_bytes(octets))
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    #[inline]
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Address(u32::from(addr))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    #[inline]
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl PartialEq<u32> for Ipv4Address {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

/// Parse a dotted-decimal string such as `192.168.45.231`.
///
/// Exactly four components are required and each must be a decimal number in
/// `0..=255`.
impl FromStr for Ipv4Address {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.split('.').count();
        if found != 4 {
            return Err(FormatError::InvalidComponentCount { expected: 4, found });
        }

        let mut octets = [0u8; 4];
        for (octet, part) in octets.iter_mut().zip(s.split('.')) {
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormatError::InvalidComponent(part.to_owned()));
            }
            *octet = part
                .parse()
                .map_err(|_| FormatError::InvalidComponent(part.to_owned()))?;
        }
        Ok(Ipv4Address::from(octets))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[cfg(feature = "smoltcp")]
impl From<smoltcp::wire::Ipv4Address> for Ipv4Address {
    fn from(addr: smoltcp::wire::Ipv4Address) -> Self {
        Ipv4Address::from(addr.0)
    }
}

#[cfg(feature = "smoltcp")]
impl From<Ipv4Address> for smoltcp::wire::Ipv4Address {
    fn from(addr: Ipv4Address) -> Self {
        smoltcp::wire::Ipv4Address(addr.octets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dotted_decimal() {
        assert_eq!(
            "192.168.45.231".parse::<Ipv4Address>(),
            Ok(Ipv4Address::new(192, 168, 45, 231))
        );
        assert_eq!("0.0.0.0".parse::<Ipv4Address>(), Ok(Ipv4Address::UNSPECIFIED));
        assert_eq!(
            "255.255.255.255".parse::<Ipv4Address>(),
            Ok(Ipv4Address::BROADCAST)
        );
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(
            "10.0.0".parse::<Ipv4Address>(),
            Err(FormatError::InvalidComponentCount {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            "10.0.0.1.5".parse::<Ipv4Address>(),
            Err(FormatError::InvalidComponentCount {
                expected: 4,
                found: 5
            })
        );
        assert_eq!(
            "10.0.0.256".parse::<Ipv4Address>(),
            Err(FormatError::InvalidComponent("256".to_owned()))
        );
        assert_eq!(
            "10..0.1".parse::<Ipv4Address>(),
            Err(FormatError::InvalidComponent("".to_owned()))
        );
        assert_eq!(
            "10.0.0.+1".parse::<Ipv4Address>(),
            Err(FormatError::InvalidComponent("+1".to_owned()))
        );
        assert_eq!(
            "10.a.0.1".parse::<Ipv4Address>(),
            Err(FormatError::InvalidComponent("a".to_owned()))
        );
    }

    #[test]
    fn host_order_value() {
        let addr = Ipv4Address::new(192, 168, 0, 1);
        assert_eq!(addr, 0xc0a8_0001u32);
        assert_eq!(u32::from(addr), 0xc0a8_0001);
        assert_eq!(addr.octets(), [192, 168, 0, 1]);
        assert_eq!(addr.to_string(), "192.168.0.1");
        assert!(Ipv4Address::from(0x1234u32) < Ipv4Address::from(0xa3f1u32));
    }

    #[test]
    fn std_conversion() {
        let std_addr = Ipv4Addr::new(10, 0, 0, 138);
        let addr = Ipv4Address::from(std_addr);
        assert_eq!(addr, Ipv4Address::new(10, 0, 0, 138));
        assert_eq!(Ipv4Addr::from(addr), std_addr);
    }

    #[test]
    fn address_classes() {
        assert!(Ipv4Address::new(127, 0, 0, 1).is_loopback());
        assert!(Ipv4Address::new(10, 1, 2, 3).is_private());
        assert!(Ipv4Address::new(172, 20, 0, 1).is_private());
        assert!(!Ipv4Address::new(172, 32, 0, 1).is_private());
        assert!(Ipv4Address::new(192, 168, 1, 1).is_private());
        assert!(Ipv4Address::new(224, 0, 0, 251).is_multicast());
        assert!(Ipv4Address::BROADCAST.is_broadcast());
        assert!(!Ipv4Address::UNSPECIFIED.is_unicast());
        assert!(Ipv4Address::new(8, 8, 8, 8).is_unicast());
    }
}
