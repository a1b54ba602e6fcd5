//! Performance benchmarks for the beat analysis pipeline

use beatmap_dsp::{analyze_waveform, AnalysisConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 30 seconds of synthetic 120 BPM clicks at 44.1 kHz
fn click_track() -> Vec<f32> {
    let sample_rate = 44100usize;
    let mut samples = vec![0.0f32; sample_rate * 30];
    let period = sample_rate / 2; // 120 BPM
    let mut pos = 0;
    while pos < samples.len() {
        for i in 0..(sample_rate / 100).min(samples.len() - pos) {
            let t = i as f32 / sample_rate as f32;
            samples[pos + i] +=
                0.8 * (-t * 200.0).exp() * (2.0 * std::f32::consts::PI * 1000.0 * t).sin();
        }
        pos += period;
    }
    samples
}

fn bench_analyze_waveform(c: &mut Criterion) {
    let samples = click_track();
    let config = AnalysisConfig::default();

    c.bench_function("analyze_waveform_30s", |b| {
        b.iter(|| {
            let _ = analyze_waveform(
                black_box(&samples),
                black_box(44100),
                black_box(config.clone()),
            );
        });
    });
}

criterion_group!(benches, bench_analyze_waveform);
criterion_main!(benches);
