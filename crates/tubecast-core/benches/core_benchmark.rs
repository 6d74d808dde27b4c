//! Benchmark tests for tubecast-core operations
//!
//! Run with: cargo bench -p tubecast-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tubecast_core::extractor::parse_record;
use tubecast_core::{
    classify, postprocess_with_rng, FlatPlaylistExtractor, MemorySource, PlaylistResolver,
    PostProcessConfig, ResolveOptions, VideoEntry,
};

// ============================================================================
// Helpers
// ============================================================================

fn create_entries(count: usize) -> Vec<VideoEntry> {
    (0..count)
        .map(|i| VideoEntry::new(format!("vid{:06}", i), format!("Video {}", i)))
        .collect()
}

fn create_source(playlists: usize, per_playlist: usize) -> MemorySource {
    let mut source = MemorySource::new();
    for p in 0..playlists {
        let ids: Vec<(String, String)> = (0..per_playlist)
            // Each playlist overlaps its predecessor by half
            .map(|i| {
                let n = p * per_playlist / 2 + i;
                (format!("vid{:06}", n), format!("Video {}", n))
            })
            .collect();
        let refs: Vec<(&str, &str)> = ids.iter().map(|(i, t)| (i.as_str(), t.as_str())).collect();
        source = source.with_entries(&format!("https://www.youtube.com/watch?list=PL{:04}", p), &refs);
    }
    source
}

// ============================================================================
// Classifier Benchmarks
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let tokens = [
        ("watch_url", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        ("channel_url", "https://www.youtube.com/channel/UCabcdef"),
        ("playlist_id", "PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf"),
        ("video_id", "dQw4w9WgXcQ"),
        ("invalid", "not a valid!!"),
    ];

    for (name, token) in tokens {
        group.bench_with_input(BenchmarkId::new("token", name), &token, |b, token| {
            b.iter(|| classify(black_box(token)))
        });
    }

    group.finish();
}

// ============================================================================
// Record Parsing Benchmarks
// ============================================================================

fn bench_parse_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_record");
    let url = "https://www.youtube.com/watch?list=PLbench";

    let video = r#"{"_type":"video","ie_key":"Youtube","id":"dQw4w9WgXcQ","title":"Never Gonna Give You Up","duration":212.0,"view_count":1000000}"#;
    let nested = r#"{"_type":"url","url":"https://www.youtube.com/watch?list=PLnested","id":"PLnested"}"#;
    let full = r#"{"id":"dQw4w9WgXcQ","title":"short","fulltitle":"Never Gonna Give You Up (Official Video)","ext":"mp4"}"#;

    group.bench_function("flat_entry", |b| b.iter(|| parse_record(url, black_box(video))));
    group.bench_function("nested", |b| b.iter(|| parse_record(url, black_box(nested))));
    group.bench_function("full_entry", |b| b.iter(|| parse_record(url, black_box(full))));

    group.finish();
}

// ============================================================================
// Post-processing Benchmarks
// ============================================================================

fn bench_postprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("postprocess");

    for size in [100, 1_000, 10_000] {
        let entries = create_entries(size);

        group.bench_with_input(BenchmarkId::new("shuffle", size), &entries, |b, entries| {
            let mut rng = StdRng::seed_from_u64(7);
            let config = PostProcessConfig::new(-1, true);
            b.iter(|| postprocess_with_rng(black_box(entries.clone()), &config, &mut rng))
        });

        group.bench_with_input(BenchmarkId::new("shuffle_limit_10", size), &entries, |b, entries| {
            let mut rng = StdRng::seed_from_u64(7);
            let config = PostProcessConfig::new(10, true);
            b.iter(|| postprocess_with_rng(black_box(entries.clone()), &config, &mut rng))
        });
    }

    group.finish();
}

// ============================================================================
// Resolver Benchmarks
// ============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => panic!("failed to build runtime: {}", e),
    };

    for playlists in [1, 10, 50] {
        let resolver = PlaylistResolver::new(FlatPlaylistExtractor::new(create_source(playlists, 200), 50));
        let tokens: Vec<String> = (0..playlists).map(|p| format!("PL{:04}", p)).collect();

        group.bench_with_input(BenchmarkId::new("playlists", playlists), &tokens, |b, tokens| {
            b.iter(|| runtime.block_on(resolver.resolve(black_box(tokens.as_slice()), &ResolveOptions::default())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_parse_record,
    bench_postprocess,
    bench_resolve,
);
criterion_main!(benches);
