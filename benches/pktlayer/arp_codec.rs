use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pktlayer::arp::Arp;
use pktlayer::{BytesMut, Ipv4Address, Pdu};
use smoltcp::wire;

static ARP_BYTES: [u8; 28] = [
    0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x02, 0x03, 0xde, 0xf5, 0x12, 0x09, 0xfa, 0xc0, 0xa8,
    0x2d, 0xe7, 0xf5, 0x12, 0xda, 0x67, 0xbd, 0x0d, 0x20, 0x9b, 0x51, 0xfe,
];

fn arp_decode(buf: &[u8]) {
    let arp = Arp::decode(buf).unwrap();
    assert!(arp.sender_ip_addr() == Ipv4Address::new(192, 168, 45, 231));
}

fn smol_decode(buf: &[u8]) {
    let pkt = wire::ArpPacket::new_checked(buf).unwrap();
    let repr = wire::ArpRepr::parse(&pkt).unwrap();
    match repr {
        wire::ArpRepr::EthernetIpv4 {
            source_protocol_addr,
            ..
        } => assert!(source_protocol_addr == wire::Ipv4Address([192, 168, 45, 231])),
        _ => unreachable!(),
    }
}

pub fn decode(c: &mut Criterion) {
    c.bench_function("arp_decode", |b| {
        b.iter(|| arp_decode(black_box(&ARP_BYTES[..])))
    });
    c.bench_function("smol_arp_decode", |b| {
        b.iter(|| smol_decode(black_box(&ARP_BYTES[..])))
    });
}

pub fn encode(c: &mut Criterion) {
    let arp = Arp::decode(&ARP_BYTES[..]).unwrap();
    c.bench_function("arp_serialize", |b| b.iter(|| black_box(&arp).serialize()));

    let mut buf = BytesMut::with_capacity(64);
    c.bench_function("arp_serialize_into", |b| {
        b.iter(|| {
            buf.clear();
            black_box(&arp).serialize_into(&mut buf);
        })
    });
}

criterion_group!(benches, decode, encode);
criterion_main!(benches);
