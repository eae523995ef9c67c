//! Criterion benchmarks for document generation
//!
//! - Config: parsing the built-in default and a TOML config
//! - Agents: preset generation with keyword matching and slugging
//! - Generator: full default run, lowered to JSON

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use skyfall::agents::{Agent, ForceFieldAgent, ForcefieldRequest, PresetAgent, PresetRequest};
use skyfall::config::loader::{default_config, load_config_str, ConfigFormat};
use skyfall::generate::Generator;
use skyfall::schema::ForceEventSpec;

// =============================================================================
// Test Data Generators
// =============================================================================

/// A forcefield request with `n` alternating wind and gust events
fn make_forcefield_request(n: usize) -> ForcefieldRequest {
    let events = (0..n)
        .map(|i| ForceEventSpec {
            dir_deg: Some((i * 37 % 360) as f64),
            speed: Some((i * 13 % 600) as f64),
            dur: if i % 2 == 0 { None } else { Some(2.0) },
            ..ForceEventSpec::new(i as f64, if i % 2 == 0 { "wind" } else { "gust" })
        })
        .collect();
    ForcefieldRequest { prompt: "bench".to_string(), events, use_prebaked_texture: false }
}

const TOML_CONFIG: &str = r##"
[preset]
prompt = "Strong storm over the harbour"
palette = ["#dbeafe", "#bfdbfe", "#93c5fd"]

[forcefield]
events = [
  { t = 0, type = "wind", dir_deg = 200, speed = 300 },
  { t = 12, type = "tornado", center = [0.4, 0.6], radius = 0.2, vortex = 350 },
]

[assets]
required_assets = ["res://runtime/a.png", "res://runtime/b.png", "res://runtime/a.png"]
available_assets = ["res://runtime/a.png"]
"##;

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_config(c: &mut Criterion) {
    let mut group = c.benchmark_group("config");
    group.bench_function("default_config", |b| b.iter(|| black_box(default_config())));
    group.bench_function("parse_toml", |b| {
        b.iter(|| load_config_str(black_box(TOML_CONFIG), ConfigFormat::Toml))
    });
    group.finish();
}

fn bench_agents(c: &mut Criterion) {
    let mut group = c.benchmark_group("agents");

    let preset_agent = PresetAgent::default();
    group.bench_function("preset", |b| {
        b.iter(|| preset_agent.generate(black_box(PresetRequest::new("Calm snow over the pines"))))
    });

    let forcefield_agent = ForceFieldAgent::default();
    for size in [10usize, 100, 1000] {
        let request = make_forcefield_request(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("forcefield", size), &request, |b, request| {
            b.iter(|| forcefield_agent.generate(black_box(request.clone())))
        });
    }

    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let config = default_config();
    let generator = Generator::from_config(&config);
    c.bench_function("generate_default", |b| b.iter(|| generator.generate(black_box(&config))));
}

criterion_group!(benches, bench_config, bench_agents, bench_generator);
criterion_main!(benches);
