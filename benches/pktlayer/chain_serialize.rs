use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pktlayer::arp::Arp;
use pktlayer::{Ipv4Address, Pdu, RawPdu};

fn build_chain(depth: usize) -> Box<dyn Pdu> {
    let mut chain: Box<dyn Pdu> = Box::new(RawPdu::from_slice(&[0; 18]));
    for i in 0..depth {
        let mut arp = Arp::request(
            Ipv4Address::new(10, 0, 0, i as u8),
            Ipv4Address::new(10, 0, 0, 1),
            "6c:f0:49:b2:de:6e".parse().unwrap(),
        );
        arp.set_inner(chain);
        chain = Box::new(arp);
    }
    chain
}

pub fn b(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    for depth in [1usize, 4, 16] {
        let chain = build_chain(depth);
        group.bench_with_input(BenchmarkId::new("serialize", depth), &chain, |b, chain| {
            b.iter(|| black_box(chain).serialize())
        });
        group.bench_with_input(BenchmarkId::new("clone", depth), &chain, |b, chain| {
            b.iter(|| black_box(chain).clone())
        });
    }
    group.finish();
}

criterion_group!(benches, b);
criterion_main!(benches);
