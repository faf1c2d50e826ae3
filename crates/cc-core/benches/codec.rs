use cc_core::{ColorTable, Mode, decode, encode};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 % 256) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let table = ColorTable::default();
    let data = payload(256 * 1024);
    for mode in Mode::ALL {
        c.bench_function(&format!("encode_256k_{mode}"), |b| {
            b.iter(|| encode(black_box(&data), mode, &table));
        });
    }
}

fn bench_decode(c: &mut Criterion) {
    let table = ColorTable::default();
    let data = payload(256 * 1024);
    for mode in Mode::ALL {
        let Ok(grid) = encode(&data, mode, &table) else {
            return;
        };
        c.bench_function(&format!("decode_256k_{mode}"), |b| {
            b.iter(|| decode(black_box(&grid), &table));
        });
    }
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
