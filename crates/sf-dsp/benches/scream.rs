//! Scream filter benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sf_core::ProcessSpec;
use sf_dsp::{MonoProcessor, ScreamFilter, SingleChannelScreamFilter};

fn bench_single_channel(c: &mut Criterion) {
    let mut filter = SingleChannelScreamFilter::new();
    filter.prepare(&ProcessSpec::new(48000.0, 1024, 1));
    filter.set_parameters(2000.0, 200.0, 4.0);

    let mut buffer: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.01).sin()).collect();

    c.bench_function("scream_single_channel_1024", |b| {
        b.iter(|| {
            filter.process_block(black_box(&mut buffer));
        })
    });
}

fn bench_stereo_bank(c: &mut Criterion) {
    let mut bank = ScreamFilter::new();
    bank.prepare(&ProcessSpec::new(48000.0, 512, 2));

    let mut channels: Vec<Vec<f32>> = (0..2)
        .map(|ch| (0..512).map(|i| ((i + ch * 7) as f32 * 0.02).sin()).collect())
        .collect();

    c.bench_function("scream_stereo_bank_512", |b| {
        b.iter(|| {
            bank.set_parameters(2000.0, 200.0, 4.0);
            bank.process(black_box(&mut channels), 512);
        })
    });
}

criterion_group!(benches, bench_single_channel, bench_stereo_bank);
criterion_main!(benches);
