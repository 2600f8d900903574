use criterion::{criterion_group, criterion_main, Criterion};
use gradeforge::config::Config;
use gradeforge::plagiarism::detect_plagiarism;
use gradeforge::weights::FlagCombination;
use gradeforge::GradingService;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "energy", "fusion", "the", "sun", "produces", "light", "heat", "core", "nuclear", "hydrogen",
    "helium", "atoms", "combine", "under", "pressure", "temperature", "star", "mass", "converts",
    "into", "radiation", "because", "of", "gravity", "and", "releases", "photons", "slowly",
];

fn random_essay(rng: &mut fastrand::Rng, words: usize) -> String {
    let mut essay = String::new();
    for i in 0..words {
        if i > 0 {
            essay.push(if i % 12 == 0 { '.' } else { ' ' });
            if i % 12 == 0 {
                essay.push(' ');
            }
        }
        essay.push_str(WORDS[rng.usize(..WORDS.len())]);
    }
    essay
}

fn criterion_benchmark(c: &mut Criterion) {
    let service = GradingService::new(&Config::default()).expect("Failed to load models");
    let mut rng = fastrand::Rng::with_seed(42);

    let key = random_essay(&mut rng, 200);
    let student = random_essay(&mut rng, 200);
    let flags = FlagCombination::new(true, true, true);

    c.bench_function("grade_submission (200 words)", |b| {
        b.iter(|| {
            service
                .grade_submission(black_box(&student), black_box(&key), 100, flags)
                .unwrap()
        })
    });

    let batch: Vec<String> = (0..32).map(|_| random_essay(&mut rng, 150)).collect();
    c.bench_function("grade_batch (32 x 150 words)", |b| {
        b.iter(|| service.grade_batch(black_box(&batch), &key, 100, flags))
    });

    let docs: Vec<String> = (0..100).map(|_| random_essay(&mut rng, 120)).collect();
    c.bench_function("detect_plagiarism (100 docs)", |b| {
        b.iter(|| detect_plagiarism(black_box(&docs)).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
