use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{distributions::Alphanumeric, Rng};

use speakmatch::{normalize, Matcher};

fn generate(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// random text with punctuation and uneven spacing between words
fn generate_sentence(words: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..words)
        .map(|_| {
            let word = generate(rng.gen_range(2..10));
            match rng.gen_range(0..4) {
                0 => format!("{word},  "),
                1 => format!("{word}! "),
                _ => format!("{word} "),
            }
        })
        .collect()
}

fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalize");
    for words in [1, 4, 16] {
        let text = generate_sentence(words);
        group.bench_with_input(BenchmarkId::new("speakmatch", words), &text, |b, val| {
            b.iter(|| {
                black_box(normalize(val));
            })
        });
    }
    group.finish();

    let matcher = Matcher::default();
    group = c.benchmark_group("Matcher");
    for words in [1, 4, 16] {
        let spoken = generate_sentence(words);
        let expected = generate_sentence(words);
        group.bench_with_input(
            BenchmarkId::new("speakmatch", words),
            &(&spoken, &expected),
            |b, val| {
                b.iter(|| {
                    black_box(matcher.grade(val.0, val.1));
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
