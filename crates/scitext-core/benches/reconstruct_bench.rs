use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scitext_core::conllu::reconstruct_sentences;

fn synthetic_document(sentences: usize) -> String {
    let mut doc = String::from("# newdoc id = rstl_1665_0001\n");
    for s in 0..sentences {
        doc.push_str(&format!("# sent_id = {s}\n"));
        for (i, word) in ["Some", "observations", "of", "a", "spot", "in", "Jupiter", "."]
            .iter()
            .enumerate()
        {
            doc.push_str(&format!("{}\t{}\t{}\tNOUN\tNN\t_\t0\troot\t_\t_\n", i + 1, word, word));
        }
        doc.push('\n');
    }
    doc
}

fn bench_reconstruct(c: &mut Criterion) {
    let small = synthetic_document(10);
    let large = synthetic_document(2_000);

    c.bench_function("reconstruct_10_sentences", |b| {
        b.iter(|| reconstruct_sentences(black_box(&small)));
    });

    c.bench_function("reconstruct_2000_sentences", |b| {
        b.iter(|| reconstruct_sentences(black_box(&large)));
    });
}

criterion_group!(benches, bench_reconstruct);
criterion_main!(benches);
