use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use regid::{
    ClaimedSet, CodeAssigner, OverrideTable, RegionSummary, assign_regions, compare_vietnamese,
    normalize_words,
};

const PROVINCES: &[&str] = &[
    "Hà Nội", "Huế", "Lai Châu", "Điện Biên", "Sơn La", "Lạng Sơn", "Quảng Ninh", "Thanh Hóa",
    "Nghệ An", "Hà Tĩnh", "Cao Bằng", "Tuyên Quang", "Lào Cai", "Thái Nguyên", "Phú Thọ",
    "Bắc Ninh", "Hưng Yên", "Hải Phòng", "Ninh Bình", "Quảng Trị", "Đà Nẵng", "Quảng Ngãi",
    "Gia Lai", "Khánh Hòa", "Lâm Đồng", "Đắk Lắk", "Hồ Chí Minh", "Đồng Nai", "Tây Ninh",
    "Cần Thơ", "Vĩnh Long", "Đồng Tháp", "Cà Mau", "An Giang",
];

// Number of identical names in the worst-case collision benchmark.
const COLLIDING: usize = 256;

fn bench_assign_provinces(c: &mut Criterion) {
    let assigner = CodeAssigner::new(OverrideTable::builtin());
    let regions: Vec<_> = PROVINCES
        .iter()
        .enumerate()
        .map(|(i, name)| RegionSummary::new(i.to_string(), *name))
        .collect();

    let mut group = c.benchmark_group("assign/provinces");
    group.throughput(Throughput::Elements(regions.len() as u64));
    group.bench_function(format!("elems/{}", regions.len()), |b| {
        b.iter(|| black_box(assign_regions(&assigner, black_box(&regions)).unwrap()));
    });
    group.finish();
}

fn bench_assign_colliding(c: &mut Criterion) {
    let assigner = CodeAssigner::new(OverrideTable::empty());

    let mut group = c.benchmark_group("assign/colliding");
    group.throughput(Throughput::Elements(COLLIDING as u64));
    group.bench_function(format!("elems/{COLLIDING}"), |b| {
        b.iter(|| {
            let mut claimed = ClaimedSet::with_capacity(COLLIDING);
            for _ in 0..COLLIDING {
                let code = assigner.assign(black_box("Tân Phú"), &claimed);
                claimed.insert(code);
            }
            black_box(claimed)
        });
    });
    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    group.bench_function("normalize_words", |b| {
        b.iter(|| {
            for name in PROVINCES {
                black_box(normalize_words(black_box(name)));
            }
        });
    });
    group.bench_function("compare_vietnamese", |b| {
        b.iter(|| {
            for pair in PROVINCES.windows(2) {
                black_box(compare_vietnamese(black_box(pair[0]), black_box(pair[1])));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_assign_provinces,
    bench_assign_colliding,
    bench_text
);
criterion_main!(benches);
