use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cyanea_assembly::{
    correct_errors, find_overlaps, normalize_reads, AssemblyParameters, Assembler, DeBruijnGraph,
    RunControl,
};

fn random_dna(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn tiled_reads(genome: &[u8], read_len: usize, step: usize) -> Vec<Vec<u8>> {
    (0..=genome.len() - read_len)
        .step_by(step)
        .map(|s| genome[s..s + read_len].to_vec())
        .collect()
}

fn bench_overlaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_overlaps");
    let control = RunControl::new();

    for &n_reads in &[50usize, 200] {
        let genome = random_dna(n_reads * 25 + 75);
        let reads = normalize_reads(&tiled_reads(&genome, 100, 25)).unwrap();
        group.bench_with_input(BenchmarkId::new("reads", n_reads), &reads, |b, reads| {
            b.iter(|| find_overlaps(black_box(reads), 20, 0.9, &control).unwrap())
        });
    }
    group.finish();
}

fn bench_debruijn(c: &mut Criterion) {
    let mut group = c.benchmark_group("debruijn");

    // 50kb genome, 100bp reads every 10bp
    let genome = random_dna(50_000);
    let raw = tiled_reads(&genome, 100, 10);
    let reads = normalize_reads(&raw).unwrap();
    group.bench_function("build_k31", |b| {
        b.iter(|| DeBruijnGraph::build(black_box(&reads), 31).unwrap())
    });

    let assembler = Assembler::new(AssemblyParameters::default()).unwrap();
    group.bench_function("assemble_k31", |b| {
        b.iter(|| assembler.assemble_debruijn(black_box(&raw)).unwrap())
    });
    group.finish();
}

fn bench_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("correct_errors");

    let genome = random_dna(10_000);
    let mut raw = tiled_reads(&genome, 100, 10);
    for (i, read) in raw.iter_mut().enumerate().step_by(7) {
        let pos = (i * 13) % read.len();
        read[pos] = if read[pos] == b'A' { b'C' } else { b'A' };
    }
    let reads = normalize_reads(&raw).unwrap();
    group.bench_function("10kb_k21", |b| {
        b.iter(|| correct_errors(black_box(&reads), 21, 3).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_overlaps, bench_debruijn, bench_correction);
criterion_main!(benches);
