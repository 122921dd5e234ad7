use byteorder::{ByteOrder, NetworkEndian};
use bytes::{Bytes, BytesMut};

use crate::addr::{EtherAddr, HwAddress, Ipv4Address};
use crate::endian::{read_uint_from_be_bytes, write_uint_as_be_bytes};
use crate::pdu::{chain_eq, clone_chain, unlink_chain, InnerPdu, Pdu, PduKind, RawPdu};
use crate::MalformedPacket;

use super::{Hardware, Operation, ProtocolType};

/// Byte length of the part of the header preceding the addresses.
pub const ARP_FIXED_HEADER_LEN: usize = 8;
/// Byte length of an Ethernet/Ipv4 Arp header.
pub const ARP_HEADER_LEN: usize = 28;
/// The wire format of a default constructed [`Arp`].
pub const ARP_HEADER_TEMPLATE: [u8; 28] = [
    0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

const ETHER_ADDR_LEN: u8 = 6;
const IPV4_ADDR_LEN: u8 = 4;

/// An Arp header.
///
/// Fields are kept in host form and converted to network byte order by
/// [`Pdu::serialize`]. The two length fields are plain header metadata: the
/// setters change what is advertised on the wire, never the size of the
/// stored addresses. Addresses are written into fields of the advertised
/// length, truncated or zero-padded as needed.
#[derive(Debug)]
pub struct Arp {
    hardware_type: Hardware,
    protocol_type: ProtocolType,
    hardware_addr_len: u8,
    protocol_addr_len: u8,
    operation: Operation,
    sender_hw_addr: EtherAddr,
    sender_ip_addr: Ipv4Address,
    target_hw_addr: EtherAddr,
    target_ip_addr: Ipv4Address,
    inner: InnerPdu,
}

impl Default for Arp {
    fn default() -> Self {
        Arp {
            hardware_type: Hardware::ETHERNET,
            protocol_type: ProtocolType::IPV4,
            hardware_addr_len: ETHER_ADDR_LEN,
            protocol_addr_len: IPV4_ADDR_LEN,
            operation: Operation::from(0u16),
            sender_hw_addr: EtherAddr::default(),
            sender_ip_addr: Ipv4Address::default(),
            target_hw_addr: EtherAddr::default(),
            target_ip_addr: Ipv4Address::default(),
            inner: None,
        }
    }
}

impl Arp {
    /// Create an Ethernet/Ipv4 Arp header with the four addresses set.
    ///
    /// Note the argument order: target before sender, protocol addresses
    /// before hardware addresses. The operation is left at zero.
    pub fn new(
        target_ip: Ipv4Address,
        sender_ip: Ipv4Address,
        target_hw: EtherAddr,
        sender_hw: EtherAddr,
    ) -> Self {
        let mut arp = Arp::default();
        arp.sender_hw_addr = sender_hw;
        arp.sender_ip_addr = sender_ip;
        arp.target_hw_addr = target_hw;
        arp.target_ip_addr = target_ip;
        arp
    }

    /// Create a request asking who owns `target_ip`.
    pub fn request(target_ip: Ipv4Address, sender_ip: Ipv4Address, sender_hw: EtherAddr) -> Self {
        let mut arp = Arp::new(target_ip, sender_ip, EtherAddr::ZERO, sender_hw);
        arp.operation = Operation::REQUEST;
        arp
    }

    /// Create a reply telling `target_hw` that `sender_ip` is at `sender_hw`.
    pub fn reply(
        target_ip: Ipv4Address,
        sender_ip: Ipv4Address,
        target_hw: EtherAddr,
        sender_hw: EtherAddr,
    ) -> Self {
        let mut arp = Arp::new(target_ip, sender_ip, target_hw, sender_hw);
        arp.operation = Operation::REPLY;
        arp
    }

    /// Decode an Arp header from the front of `buf`.
    ///
    /// Bytes following the header are ignored and no inner layer is attached.
    pub fn decode(buf: &[u8]) -> Result<Self, MalformedPacket> {
        Self::decode_prefix(buf).map(|(arp, _)| arp)
    }

    /// Decode an Arp header from the front of `buf`, also returning the bytes
    /// that follow it.
    pub fn decode_prefix(buf: &[u8]) -> Result<(Self, &[u8]), MalformedPacket> {
        if buf.len() < ARP_FIXED_HEADER_LEN {
            return Err(truncated(ARP_FIXED_HEADER_LEN, buf.len()));
        }

        let hardware_addr_len = buf[4];
        let protocol_addr_len = buf[5];
        let hlen = usize::from(hardware_addr_len);
        let plen = usize::from(protocol_addr_len);
        let header_len = ARP_FIXED_HEADER_LEN + 2 * hlen + 2 * plen;
        if buf.len() < header_len {
            return Err(truncated(header_len, buf.len()));
        }

        let (header, rest) = buf.split_at(header_len);
        let (sha, addrs) = header[ARP_FIXED_HEADER_LEN..].split_at(hlen);
        let (spa, addrs) = addrs.split_at(plen);
        let (tha, tpa) = addrs.split_at(hlen);

        let arp = Arp {
            hardware_type: Hardware::from(NetworkEndian::read_u16(&header[0..2])),
            protocol_type: ProtocolType::from(NetworkEndian::read_u16(&header[2..4])),
            hardware_addr_len,
            protocol_addr_len,
            operation: Operation::from(NetworkEndian::read_u16(&header[6..8])),
            sender_hw_addr: read_hw_addr(sha),
            sender_ip_addr: read_protocol_addr(spa),
            target_hw_addr: read_hw_addr(tha),
            target_ip_addr: read_protocol_addr(tpa),
            inner: None,
        };
        Ok((arp, rest))
    }

    /// Decode an Arp header from the front of `buf` and attach any bytes that
    /// follow it as a [`RawPdu`] inner layer.
    ///
    /// The trailing bytes are shared with `buf`, not copied.
    pub fn decode_chain(buf: &Bytes) -> Result<Self, MalformedPacket> {
        let (mut arp, rest) = Self::decode_prefix(buf)?;
        if !rest.is_empty() {
            let payload = buf.slice(buf.len() - rest.len()..);
            arp.set_inner(Box::new(RawPdu::new(payload)));
        }
        Ok(arp)
    }

    /// Whether `buf` holds an Arp reply answering this header: its sender
    /// protocol address is our target, and its target protocol address is our
    /// sender.
    pub fn matches_response(&self, buf: &[u8]) -> bool {
        match Arp::decode(buf) {
            Ok(resp) => {
                resp.operation == Operation::REPLY
                    && resp.sender_ip_addr == self.target_ip_addr
                    && resp.target_ip_addr == self.sender_ip_addr
            }
            Err(_) => false,
        }
    }
}

#[allow(missing_docs)]
impl Arp {
    #[inline]
    pub fn hardware_type(&self) -> Hardware {
        self.hardware_type
    }
    #[inline]
    pub fn protocol_type(&self) -> ProtocolType {
        self.protocol_type
    }
    #[inline]
    pub fn hardware_addr_len(&self) -> u8 {
        self.hardware_addr_len
    }
    #[inline]
    pub fn protocol_addr_len(&self) -> u8 {
        self.protocol_addr_len
    }
    #[inline]
    pub fn operation(&self) -> Operation {
        self.operation
    }
    #[inline]
    pub fn sender_hw_addr(&self) -> EtherAddr {
        self.sender_hw_addr
    }
    #[inline]
    pub fn sender_ip_addr(&self) -> Ipv4Address {
        self.sender_ip_addr
    }
    #[inline]
    pub fn target_hw_addr(&self) -> EtherAddr {
        self.target_hw_addr
    }
    #[inline]
    pub fn target_ip_addr(&self) -> Ipv4Address {
        self.target_ip_addr
    }

    #[inline]
    pub fn set_hardware_type(&mut self, value: Hardware) {
        self.hardware_type = value;
    }
    #[inline]
    pub fn set_protocol_type(&mut self, value: ProtocolType) {
        self.protocol_type = value;
    }
    /// Set the advertised hardware address length. The stored addresses keep
    /// their size; only the wire layout changes.
    #[inline]
    pub fn set_hardware_addr_len(&mut self, value: u8) {
        self.hardware_addr_len = value;
    }
    /// Set the advertised protocol address length. The stored addresses keep
    /// their size; only the wire layout changes.
    #[inline]
    pub fn set_protocol_addr_len(&mut self, value: u8) {
        self.protocol_addr_len = value;
    }
    #[inline]
    pub fn set_operation(&mut self, value: Operation) {
        self.operation = value;
    }
    #[inline]
    pub fn set_sender_hw_addr(&mut self, value: EtherAddr) {
        self.sender_hw_addr = value;
    }
    #[inline]
    pub fn set_sender_ip_addr(&mut self, value: Ipv4Address) {
        self.sender_ip_addr = value;
    }
    #[inline]
    pub fn set_target_hw_addr(&mut self, value: EtherAddr) {
        self.target_hw_addr = value;
    }
    #[inline]
    pub fn set_target_ip_addr(&mut self, value: Ipv4Address) {
        self.target_ip_addr = value;
    }
}

impl TryFrom<&[u8]> for Arp {
    type Error = MalformedPacket;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        Arp::decode(buf)
    }
}

impl Clone for Arp {
    fn clone(&self) -> Self {
        let mut copy = self.detached();
        copy.inner = clone_chain(self.inner());
        copy
    }
}

impl PartialEq for Arp {
    fn eq(&self, other: &Self) -> bool {
        self.header_eq(other) && chain_eq(self.inner(), other.inner())
    }
}

impl Drop for Arp {
    fn drop(&mut self) {
        unlink_chain(&mut self.inner);
    }
}

impl Pdu for Arp {
    fn kind(&self) -> PduKind {
        PduKind::Arp
    }

    fn header_size(&self) -> usize {
        ARP_FIXED_HEADER_LEN
            + 2 * usize::from(self.hardware_addr_len)
            + 2 * usize::from(self.protocol_addr_len)
    }

    fn write_header(&self, buf: &mut BytesMut) {
        let hlen = usize::from(self.hardware_addr_len);
        let plen = usize::from(self.protocol_addr_len);

        let start = buf.len();
        buf.resize(start + self.header_size(), 0);
        let data = &mut buf[start..];

        NetworkEndian::write_u16(&mut data[0..2], self.hardware_type.raw());
        NetworkEndian::write_u16(&mut data[2..4], self.protocol_type.raw());
        data[4] = self.hardware_addr_len;
        data[5] = self.protocol_addr_len;
        NetworkEndian::write_u16(&mut data[6..8], self.operation.raw());

        let (sha, addrs) = data[ARP_FIXED_HEADER_LEN..].split_at_mut(hlen);
        let (spa, addrs) = addrs.split_at_mut(plen);
        let (tha, tpa) = addrs.split_at_mut(hlen);
        write_hw_addr(sha, &self.sender_hw_addr);
        write_uint_as_be_bytes(spa, u32::from(self.sender_ip_addr).into());
        write_hw_addr(tha, &self.target_hw_addr);
        write_uint_as_be_bytes(tpa, u32::from(self.target_ip_addr).into());
    }

    fn inner_slot(&self) -> &InnerPdu {
        &self.inner
    }

    fn inner_slot_mut(&mut self) -> &mut InnerPdu {
        &mut self.inner
    }

    fn detached(&self) -> Self {
        Arp {
            hardware_type: self.hardware_type,
            protocol_type: self.protocol_type,
            hardware_addr_len: self.hardware_addr_len,
            protocol_addr_len: self.protocol_addr_len,
            operation: self.operation,
            sender_hw_addr: self.sender_hw_addr,
            sender_ip_addr: self.sender_ip_addr,
            target_hw_addr: self.target_hw_addr,
            target_ip_addr: self.target_ip_addr,
            inner: None,
        }
    }

    fn header_eq(&self, other: &Self) -> bool {
        self.hardware_type == other.hardware_type
            && self.protocol_type == other.protocol_type
            && self.hardware_addr_len == other.hardware_addr_len
            && self.protocol_addr_len == other.protocol_addr_len
            && self.operation == other.operation
            && self.sender_hw_addr == other.sender_hw_addr
            && self.sender_ip_addr == other.sender_ip_addr
            && self.target_hw_addr == other.target_hw_addr
            && self.target_ip_addr == other.target_ip_addr
    }
}

fn truncated(required: usize, available: usize) -> MalformedPacket {
    tracing::debug!(required, available, "arp header truncated");
    MalformedPacket {
        layer: PduKind::Arp,
        required,
        available,
    }
}

// The field is zero-filled already.
fn write_hw_addr(field: &mut [u8], addr: &EtherAddr) {
    let n = field.len().min(addr.len());
    field[..n].copy_from_slice(&addr.as_bytes()[..n]);
}

fn read_hw_addr(field: &[u8]) -> EtherAddr {
    let mut bytes = [0; ETHER_ADDR_LEN as usize];
    let n = field.len().min(bytes.len());
    bytes[..n].copy_from_slice(&field[..n]);
    HwAddress(bytes)
}

fn read_protocol_addr(field: &[u8]) -> Ipv4Address {
    // Keeps the low-order 32 bits of wider fields.
    Ipv4Address::from(read_uint_from_be_bytes(field) as u32)
}
