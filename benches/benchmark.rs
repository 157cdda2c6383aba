//! Benchmarks for the rotor machine.
//!
//! Measures configuration parsing and machine construction, message
//! conversion throughput, and how throughput scales with the number of
//! mounted rotors.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma::{Machine, MachineConfig, Session};

/// The full naval configuration used across all benchmarks.
const NAVY_CONF: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
 I MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 V MZ (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
 VI MZM (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
 VII MZM (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
 VIII MZM (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
 Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 Gamma N (AFNIRLBSQWVXGUZDKMTPCOYJHE)
 B R (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
 C R (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)
";

/// 115-symbol plaintext, five times round the reference trip line.
const MESSAGE: &str = "FROMHISSHOULDERHIAWATHAFROMHISSHOULDERHIAWATHAFROMHISSHOULDERHIAWATHA\
FROMHISSHOULDERHIAWATHAFROMHISSHOULDERHIAWATHA";

/// Builds the standard five-slot machine at AXLE with the trip plugboard.
fn trip_machine() -> Machine {
    let mut machine = MachineConfig::parse(NAVY_CONF)
        .and_then(|config| config.build())
        .expect("benchmark configuration must build");
    machine
        .insert_rotors(&["B", "Beta", "III", "IV", "I"])
        .expect("benchmark rotors must mount");
    machine.set_rotors("AXLE").expect("benchmark setting must apply");
    machine
}

/// Benchmarks configuration parsing and machine construction.
///
/// `parse` covers the text format alone; `parse_build` adds alphabet,
/// wiring and catalog construction.
fn bench_config(c: &mut Criterion) {
    let mut group = c.benchmark_group("configuration");

    group.bench_function("parse", |b| {
        b.iter(|| MachineConfig::parse(black_box(NAVY_CONF)).unwrap());
    });
    group.bench_function("parse_build", |b| {
        b.iter(|| {
            MachineConfig::parse(black_box(NAVY_CONF))
                .unwrap()
                .build()
                .unwrap()
        });
    });

    group.finish();
}

/// Benchmarks message conversion throughput on the five-slot machine.
///
/// The machine is built once and its rotors keep stepping between
/// iterations, reflecting how a session enciphers a long script.
fn bench_convert(c: &mut Criterion) {
    let mut machine = trip_machine();

    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Elements(MESSAGE.len() as u64));

    group.bench_function("5_slots", |b| {
        b.iter(|| machine.convert(black_box(MESSAGE)).unwrap());
    });

    group.finish();
}

/// Benchmarks conversion throughput across machine sizes.
///
/// Compares three, five and nine mounted rotors to show the per-symbol
/// cost of a longer signal path.
fn bench_convert_slot_scaling(c: &mut Criterion) {
    let arrangements: &[&[&str]] = &[
        &["B", "I", "II"],
        &["B", "Beta", "I", "II", "III"],
        &["B", "Beta", "Gamma", "I", "II", "III", "IV", "V", "VI"],
    ];

    let mut group = c.benchmark_group("convert_slot_scaling");
    group.throughput(Throughput::Elements(MESSAGE.len() as u64));

    for &names in arrangements {
        let mut config =
            MachineConfig::parse(NAVY_CONF).expect("benchmark configuration must parse");
        config.num_rotors = names.len();
        config.num_pawls = names.len() - 1;
        let mut machine = config.build().expect("benchmark configuration must build");
        machine.insert_rotors(names).expect("benchmark rotors must mount");
        machine
            .set_rotors(&"A".repeat(names.len() - 1))
            .expect("benchmark setting must apply");

        group.bench_with_input(
            BenchmarkId::from_parameter(names.len()),
            &names.len(),
            |b, _| {
                b.iter(|| machine.convert(black_box(MESSAGE)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmarks a whole scripted session, setting line included.
fn bench_session_script(c: &mut Criterion) {
    let script = format!(
        "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\n{MESSAGE}\n"
    );

    c.bench_function("session_script", |b| {
        b.iter(|| {
            let config = MachineConfig::parse(NAVY_CONF).unwrap();
            let mut session = Session::new(config.build().unwrap());
            session.process(black_box(&script)).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_config,
    bench_convert,
    bench_convert_slot_scaling,
    bench_session_script,
);
criterion_main!(benches);
