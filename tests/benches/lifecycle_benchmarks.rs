//! # House-Ledger Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Engine | create (atomic house + registry batch) |
//! | Engine | full custody chain |
//! | Query | listing by role over a populated registry |
//! | Dispatch | command parsing |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hl_lifecycle::{
    Affiliation, Caller, Command, HouseLedger, HouseLifecycleApi, InMemoryLedger, Invocation,
    Party, TransferKind,
};
use std::sync::Arc;

fn house_id(n: usize) -> String {
    format!("HB{n:07}")
}

fn populated(count: usize) -> HouseLedger<InMemoryLedger> {
    let ledger = HouseLedger::new(Arc::new(InMemoryLedger::new()));
    let reg = Caller::new("reg", Affiliation::Regulator);
    let alice = Party::new("alice", Affiliation::HouseOwner);
    for n in 0..count {
        let house = ledger.create(&reg, &house_id(n), "addr").unwrap();
        if n % 4 == 0 {
            ledger
                .transfer(TransferKind::AuthorityToOwner, house, &reg, &alice, None)
                .unwrap();
        }
    }
    ledger
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine-create");
    let reg = Caller::new("reg", Affiliation::Regulator);

    for existing in [0usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("create_house", existing), &existing, |b, &existing| {
            b.iter_batched(
                || populated(existing),
                |ledger| black_box(ledger.create(&reg, "ZZ9999999", "addr").unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_custody_chain(c: &mut Criterion) {
    let reg = Caller::new("reg", Affiliation::Regulator);
    let alice = Party::new("alice", Affiliation::HouseOwner);
    let bob = Party::new("bob", Affiliation::AgentCompany);
    let carol = Party::new("carol", Affiliation::Leasee);

    c.bench_function("engine-custody-chain", |b| {
        b.iter_batched(
            || HouseLedger::new(Arc::new(InMemoryLedger::new())),
            |ledger| {
                let house = ledger.create(&reg, "AB1234567", "addr").unwrap();
                let house = ledger
                    .transfer(TransferKind::AuthorityToOwner, house, &reg, &alice, None)
                    .unwrap();
                let house = ledger
                    .transfer(TransferKind::OwnerToAgent, house, &alice, &bob, Some("500".into()))
                    .unwrap();
                black_box(
                    ledger
                        .transfer(TransferKind::AgentToLeasee, house, &bob, &carol, Some("450".into()))
                        .unwrap(),
                )
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("query-listing");
    let reg = Caller::new("reg", Affiliation::Regulator);
    let alice = Caller::new("alice", Affiliation::HouseOwner);

    for size in [10usize, 100, 1000] {
        let ledger = populated(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("regulator", size), &size, |b, _| {
            b.iter(|| black_box(ledger.list_visible(&reg).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("owner", size), &size, |b, _| {
            b.iter(|| black_box(ledger.list_visible(&alice).unwrap()))
        });
    }
    group.finish();
}

fn bench_command_parse(c: &mut Criterion) {
    let invocation = Invocation::new("agent_to_leasee", ["AB1234567", "carol", "450"]);
    c.bench_function("dispatch-parse", |b| {
        b.iter(|| black_box(Command::parse(black_box(&invocation)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_create,
    bench_custody_chain,
    bench_listing,
    bench_command_parse
);
criterion_main!(benches);
