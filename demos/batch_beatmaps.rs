//! Batch beat map generation
//!
//! Walks a directory of WAV files, analyzes each track on a rayon worker
//! pool, and writes one JSON sidecar per song next to the originals. A
//! track that fails to analyze is logged and skipped; it never aborts the
//! batch.
//!
//! Usage: `cargo run --example batch_beatmaps -- <songs_dir> [out_dir]`

use beatmap_dsp::{analyze_waveform, AnalysisConfig};
use rayon::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

fn load_wav(path: &Path) -> Result<(Vec<f32>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    // Mix down to mono
    let channels = spec.channels as usize;
    let mono: Vec<f32> = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}

fn process_file(path: &Path, out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("invalid file name")?
        .to_string();

    let (samples, sample_rate) = load_wav(path)?;
    let result = analyze_waveform(&samples, sample_rate, AnalysisConfig::default())?;

    let sidecar = result.to_sidecar(&filename);
    let out_path = out_dir.join(Path::new(&filename).with_extension("json"));
    let file = File::create(&out_path)?;
    serde_json::to_writer_pretty(file, &sidecar)?;

    println!(
        "{}: {:.1} BPM, {} beats (confidence {:.2}) -> {}",
        filename,
        result.bpm,
        result.beats.len(),
        result.confidence,
        out_path.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let songs_dir = PathBuf::from(args.next().unwrap_or_else(|| {
        eprintln!("Usage: batch_beatmaps <songs_dir> [out_dir]");
        std::process::exit(1);
    }));
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| songs_dir.clone());

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("Cannot create output directory {}: {}", out_dir.display(), e);
        std::process::exit(1);
    }

    let files: Vec<PathBuf> = match std::fs::read_dir(&songs_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("wav"))
                    .unwrap_or(false)
            })
            .collect(),
        Err(e) => {
            eprintln!("Cannot read {}: {}", songs_dir.display(), e);
            std::process::exit(1);
        }
    };

    println!("Processing {} tracks...", files.len());

    // Tracks are independent; one pipeline invocation per worker, failures
    // isolated per track.
    files.par_iter().for_each(|path| {
        if let Err(e) = process_file(path, &out_dir) {
            eprintln!("Error processing {}: {}", path.display(), e);
        }
    });
}
