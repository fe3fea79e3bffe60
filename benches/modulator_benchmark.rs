use criterion::{criterion_group, criterion_main, Criterion};
use num_complex::Complex32;
use sarsat_t018_core::{
    modulate_frame, BeaconConfig, BeaconType, CoreState, FrameBuilder, Position, TestMode,
    VesselId,
};

fn sample_config() -> BeaconConfig {
    BeaconConfig {
        beacon_type: BeaconType::Epirb,
        country_code: 227,
        tac_number: 1234,
        serial_number: 13398,
        test_mode: TestMode::Test,
        position: Position {
            latitude_deg: 43.2,
            longitude_deg: 5.4,
            altitude_m: 1500.0,
            valid: true,
        },
        vessel_id: VesselId::Mmsi {
            mmsi: 227_000_111,
            ais_identity: 0,
        },
        rotating_field_kind: None,
        utc_clock: None,
        rls_provider_id: 0,
        rls_payload: 0,
        cancel_method: 0,
    }
}

/// Times one full burst end to end — frame assembly plus modulation at
/// the typical `sps = 16` — against `spec.md` §5's "tens of milliseconds
/// of CPU on a modern desktop" expectation.
pub fn criterion_benchmark(c: &mut Criterion) {
    let config = sample_config();
    let state = CoreState::default();

    c.bench_function("build_frame", |b| {
        b.iter(|| FrameBuilder::build_frame(&config, &state).unwrap());
    });

    let frame = FrameBuilder::build_frame(&config, &state).unwrap();
    let mut buf = vec![Complex32::new(0.0, 0.0); 38_400 * 16];
    c.bench_function("modulate_frame_sps16", |b| {
        b.iter(|| modulate_frame(&frame, 16, &mut buf).unwrap());
    });

    let mut buf32 = vec![Complex32::new(0.0, 0.0); 38_400 * 32];
    c.bench_function("modulate_frame_sps32", |b| {
        b.iter(|| modulate_frame(&frame, 32, &mut buf32).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
