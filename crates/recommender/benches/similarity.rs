//! Benchmarks for model training
//!
//! Run with: cargo bench --package recommender
//!
//! Uses a synthetic corpus sized like the filtered TMDB export.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::GenreDocument;
use recommender::{linear_kernel, train, TfidfVectorizer};

const GENRES: [&str; 19] = [
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Documentary", "Drama", "Family",
    "Fantasy", "History", "Horror", "Music", "Mystery", "Romance", "Science Fiction",
    "TV Movie", "Thriller", "War", "Western",
];

fn synthetic_documents(count: usize) -> Vec<GenreDocument> {
    (0..count)
        .map(|i| {
            let genres: Vec<&str> = (0..(i % 4) + 1)
                .map(|k| GENRES[(i * 7 + k * 5) % GENRES.len()])
                .collect();
            GenreDocument {
                movie_id: i as i64,
                title: format!("Movie {}", i),
                genres: genres.join(" "),
            }
        })
        .collect()
}

fn bench_linear_kernel(c: &mut Criterion) {
    let documents = synthetic_documents(1500);
    let corpus: Vec<&str> = documents.iter().map(|d| d.genres.as_str()).collect();
    let features = TfidfVectorizer::new()
        .fit_transform(&corpus)
        .expect("Failed to fit vectorizer");

    c.bench_function("linear_kernel_1500", |b| {
        b.iter(|| black_box(linear_kernel(black_box(&features))))
    });
}

fn bench_train(c: &mut Criterion) {
    let documents = synthetic_documents(1500);

    c.bench_function("train_1500", |b| {
        b.iter(|| {
            let trained = train(black_box(documents.clone())).unwrap();
            black_box(trained)
        })
    });
}

criterion_group!(benches, bench_linear_kernel, bench_train);
criterion_main!(benches);
