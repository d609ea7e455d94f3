use criterion::{black_box, criterion_group, criterion_main, Criterion};

use canvass_core::model::{Question, ResponseRecord};
use canvass_core::tabulate::tabulate;

fn make_questions() -> Vec<Question> {
    vec![
        Question::true_false("Q1"),
        Question::multiple_choice(
            "Q2",
            vec!["Red".into(), "Green".into(), "Blue".into()],
            1,
        )
        .unwrap(),
        Question::short_answer("Q3", 1).unwrap(),
        Question::matching(
            "Q4",
            vec!["France".into(), "Peru".into(), "Japan".into()],
            vec!["Lima".into(), "Tokyo".into(), "Paris".into()],
        )
        .unwrap(),
    ]
}

fn make_population(size: usize) -> Vec<ResponseRecord> {
    let tf = ["t", "f"];
    let mc = ["A", "B", "C"];
    let words = ["alpha", "beta", "gamma", "delta"];
    let matches = [
        ["A-1", "B-2", "C-3"],
        ["A-3", "B-1", "C-2"],
        ["A-2", "B-3", "C-1"],
    ];
    (0..size)
        .map(|i| {
            ResponseRecord::new(
                "bench",
                vec![
                    vec![tf[i % tf.len()].to_string()],
                    vec![mc[i % mc.len()].to_string()],
                    vec![words[i % words.len()].to_string()],
                    matches[i % matches.len()]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                ],
            )
        })
        .collect()
}

fn bench_tabulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabulate");
    let questions = make_questions();

    for size in [100usize, 1000] {
        let records = make_population(size);
        group.bench_function(format!("respondents={size}"), |b| {
            b.iter(|| tabulate(black_box("bench"), black_box(&questions), black_box(&records)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tabulate);
criterion_main!(benches);
