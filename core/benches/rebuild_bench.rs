use acervo_core::tokenizer::{PortugueseProcessor, TermProcessor};
use acervo_core::{Collection, SourceRecord};
use criterion::{criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &[
    "liberdade", "vento", "sol", "mar", "cidade", "tempo", "palavra", "noite",
    "caminho", "montanha", "rio", "chuva", "fogo", "terra", "sonho", "pedra",
];

fn corpus(docs: usize, words_per_doc: usize) -> Vec<SourceRecord> {
    (0..docs)
        .map(|d| {
            let text: Vec<&str> = (0..words_per_doc)
                .map(|w| WORDS[(d * 7 + w * 3) % WORDS.len()])
                .collect();
            SourceRecord { id: format!("D{d}"), text: text.join(" ") }
        })
        .collect()
}

fn bench_batch_rebuild(c: &mut Criterion) {
    let records = corpus(200, 50);
    c.bench_function("insert_batch_200_docs", |b| {
        b.iter(|| {
            let mut collection = Collection::new();
            collection.insert_batch(&records);
            collection
        })
    });
}

fn bench_tokenize(c: &mut Criterion) {
    let processor = PortugueseProcessor::new();
    let text = corpus(1, 500).remove(0).text;
    c.bench_function("tokenize_500_words", |b| b.iter(|| processor.process(&text)));
}

criterion_group!(benches, bench_batch_rebuild, bench_tokenize);
criterion_main!(benches);
