use core::fmt;
use core::str::FromStr;

use crate::FormatError;

/// A fixed-length hardware (link-layer) address.
///
/// The length is part of the type, so two addresses of different lengths can
/// never be confused. The canonical six-octet form is [`EtherAddr`].
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct HwAddress<const N: usize = 6>(pub [u8; N]);

/// A six-octet Ethernet II address.
pub type EtherAddr = HwAddress<6>;

impl<const N: usize> HwAddress<N> {
    /// The broadcast address, all bits set.
    pub const BROADCAST: Self = HwAddress([0xff; N]);

    /// The all-zero address.
    pub const ZERO: Self = HwAddress([0; N]);

    /// Byte length of the address.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the address type has no bytes at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Construct an address from a slice of exactly `N` octets.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        let bytes: [u8; N] = data.try_into().map_err(|_| FormatError::InvalidLength {
            expected: N,
            found: data.len(),
        })?;
        Ok(HwAddress(bytes))
    }

    /// Return the address as a sequence of octets, in transmission order.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return a copy of the octets.
    #[inline]
    pub const fn octets(&self) -> [u8; N] {
        self.0
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the 'multicast' bit in the first octet is set.
    pub fn is_multicast(&self) -> bool {
        self.0.first().map_or(false, |b| b & 0x01 != 0)
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !(self.is_broadcast() || self.is_multicast())
    }

    /// Query whether the 'locally administered' bit in the first octet is set.
    pub fn is_local(&self) -> bool {
        self.0.first().map_or(false, |b| b & 0x02 != 0)
    }
}

impl<const N: usize> Default for HwAddress<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[u8; N]> for HwAddress<N> {
    #[inline]
    fn from(bytes: [u8; N]) -> Self {
        HwAddress(bytes)
    }
}

impl<const N: usize> From<HwAddress<N>> for [u8; N] {
    #[inline]
    fn from(addr: HwAddress<N>) -> Self {
        addr.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for HwAddress<N> {
    type Error = FormatError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl<const N: usize> AsRef<[u8]> for HwAddress<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Parse a string with the form 'Aa:0b:Cc:11:02:33'.
///
/// Every component must be exactly two hex digits, and there must be exactly
/// `N` components.
impl<const N: usize> FromStr for HwAddress<N> {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.split(':').count();
        if found != N {
            return Err(FormatError::InvalidComponentCount { expected: N, found });
        }

        let mut result = [0; N];
        for (octet, part) in result.iter_mut().zip(s.split(':')) {
            if part.chars().count() != 2 {
                return Err(FormatError::InvalidComponent(part.to_owned()));
            }
            for c in part.chars() {
                let nibble = c.to_digit(16).ok_or(FormatError::InvalidHexDigit(c))?;
                *octet = (*octet << 4) | nibble as u8;
            }
        }
        Ok(HwAddress(result))
    }
}

impl<const N: usize> fmt::Display for HwAddress<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

#[cfg(feature = "smoltcp")]
impl From<smoltcp::wire::EthernetAddress> for EtherAddr {
    fn from(addr: smoltcp::wire::EthernetAddress) -> Self {
        HwAddress(addr.0)
    }
}

#[cfg(feature = "smoltcp")]
impl From<EtherAddr> for smoltcp::wire::EthernetAddress {
    fn from(addr: EtherAddr) -> Self {
        smoltcp::wire::EthernetAddress(addr.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etheraddr_parse_from() {
        let s = "Aa:Bb:Cc:11:22:33";
        assert_eq!(
            s.parse::<EtherAddr>(),
            Ok(HwAddress([0xAa, 0xBb, 0xCc, 0x11, 0x22, 0x33]))
        );
        assert_eq!(
            "Aa:Bb:Cc:11:22".parse::<EtherAddr>(),
            Err(FormatError::InvalidComponentCount {
                expected: 6,
                found: 5
            })
        );
        assert_eq!(
            "Aaa:Bb:Cc:11:22:33".parse::<EtherAddr>(),
            Err(FormatError::InvalidComponent("Aaa".to_owned()))
        );
        assert_eq!(
            "Za:Bb:Cc:11:22:33".parse::<EtherAddr>(),
            Err(FormatError::InvalidHexDigit('Z'))
        );
        assert_eq!(
            "a:Bb:Cc:11:22:33".parse::<EtherAddr>(),
            Err(FormatError::InvalidComponent("a".to_owned()))
        );
        assert!("".parse::<EtherAddr>().is_err());
        assert!("aa:bb:cc:11:22:33:".parse::<EtherAddr>().is_err());
    }

    #[test]
    fn display_round_trip() {
        let addr: EtherAddr = "13:DA:de:f1:01:85".parse().unwrap();
        assert_eq!(addr.to_string(), "13:da:de:f1:01:85");
        assert_eq!(addr.to_string().parse::<EtherAddr>(), Ok(addr));
    }

    #[test]
    fn other_lengths() {
        let addr: HwAddress<8> = "01:02:03:04:05:06:07:08".parse().unwrap();
        assert_eq!(addr.len(), 8);
        assert_eq!(addr.octets(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert!("01:02:03:04:05:06".parse::<HwAddress<8>>().is_err());
    }

    #[test]
    fn from_raw_bytes() {
        let bytes = [0x7a, 0x1f, 0xf4, 0x39, 0xab, 0x0d];
        assert_eq!(EtherAddr::from_bytes(&bytes[..]), Ok(HwAddress(bytes)));
        assert_eq!(
            EtherAddr::try_from(&bytes[..4]),
            Err(FormatError::InvalidLength {
                expected: 6,
                found: 4
            })
        );
    }

    #[test]
    fn default_is_zero() {
        let addr = EtherAddr::default();
        assert_eq!(addr.as_bytes(), &[0; 6]);
        assert_eq!(addr, EtherAddr::ZERO);
        assert_eq!(HwAddress::<16>::default().as_bytes(), &[0; 16][..]);
    }

    #[test]
    fn address_classes() {
        assert!(EtherAddr::BROADCAST.is_broadcast());
        assert!(!EtherAddr::BROADCAST.is_unicast());
        assert!(HwAddress([0x01, 0x00, 0x5e, 0, 0, 1]).is_multicast());
        assert!(HwAddress([0x02, 0, 0, 0, 0, 1]).is_local());
        assert!(HwAddress([0x00, 0x1b, 0x21, 0, 0, 1]).is_unicast());
    }
}
