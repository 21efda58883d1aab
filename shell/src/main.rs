use acervo_core::{load_corpus, BooleanOp, Collection, Error, SourceRecord};
use anyhow::Result;
use clap::Parser;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "acervo")]
#[command(about = "Interactive TF-IDF document collection", long_about = None)]
struct Args {
    /// JSON corpus file: a list of records or a name/content map
    #[arg(long)]
    corpus: Option<String>,
}

struct App {
    collection: Collection,
    /// Records not yet added one-by-one; drained by option 1.
    queue: VecDeque<SourceRecord>,
    /// Full corpus as loaded; option 2 walks it and skips documents
    /// already present.
    backup: Vec<SourceRecord>,
}

impl App {
    fn new() -> Self {
        Self { collection: Collection::new(), queue: VecDeque::new(), backup: Vec::new() }
    }

    fn load(&mut self, path: &str) {
        match load_corpus(path) {
            Ok(records) => {
                tracing::info!(count = records.len(), path, "corpus loaded");
                self.queue = records.iter().cloned().collect();
                self.backup = records;
            }
            Err(err) => println!("could not load corpus `{path}`: {err}"),
        }
    }

    fn add_next(&mut self) {
        let Some(record) = self.queue.pop_front() else {
            println!("queue is empty");
            return;
        };
        match self.collection.insert(&record.id, &record.text) {
            Ok(()) => println!("document {} added", record.id),
            Err(err) => println!("{err}"),
        }
    }

    fn add_all(&mut self) {
        if self.backup.is_empty() {
            println!("load a corpus first");
            return;
        }
        let added = self.collection.insert_batch(&self.backup);
        self.queue.clear();
        if added > 0 {
            println!("{added} documents added");
        } else {
            println!("every document was already present");
        }
    }

    fn remove(&mut self, id: &str) {
        match self.collection.remove(id) {
            Ok(()) => println!("document {id} removed"),
            Err(err) => println!("{err}"),
        }
    }
}

fn show_vocabulary(collection: &Collection) {
    let vocabulary = collection.vocabulary();
    if vocabulary.is_empty() {
        println!("vocabulary is empty; add documents first");
        return;
    }
    println!("{} terms: {}", vocabulary.len(), vocabulary.join(", "));
}

/// TF-IDF matrix rounded to 4 decimals. Display only; internal values keep
/// full precision.
fn render_matrix(collection: &Collection) -> String {
    let weights = collection.weights();
    if weights.is_empty() {
        return "matrix is empty; add documents first".to_string();
    }
    let mut out = format!("{:<20}", "term");
    for id in weights.document_ids() {
        out.push_str(&format!("{id:>12}"));
    }
    out.push('\n');
    for term in weights.vocabulary() {
        out.push_str(&format!("{term:<20}"));
        for id in weights.document_ids() {
            out.push_str(&format!("{:>12.4}", weights.tf_idf(term, id)));
        }
        out.push('\n');
    }
    out
}

/// Positional index, capped at the first 50 terms.
fn render_index(collection: &Collection) -> String {
    let index = collection.index();
    if index.is_empty() {
        return "index is empty; add documents first".to_string();
    }
    let mut out = String::new();
    for (shown, (term, docs)) in index.terms().enumerate() {
        if shown >= 50 {
            out.push_str("... (showing the first 50 terms)\n");
            break;
        }
        let postings: Vec<String> = docs
            .iter()
            .map(|(doc_id, positions)| format!("{doc_id}: {positions:?}"))
            .collect();
        out.push_str(&format!("{term:<20} -> {}\n", postings.join(" | ")));
    }
    out.push_str(&format!("{} distinct terms indexed", index.len()));
    out
}

fn run_boolean(collection: &Collection, text: &str, op_text: &str) {
    let op: BooleanOp = match op_text.parse() {
        Ok(op) => op,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    match collection.boolean_query(text, op) {
        Ok(matches) if matches.is_empty() => println!("no documents match"),
        Ok(matches) => {
            let ids: Vec<&str> = matches.iter().map(String::as_str).collect();
            println!("{} documents: {}", ids.len(), ids.join(", "));
        }
        Err(Error::NoUsableTerms) => println!("query has no terms in the vocabulary"),
        Err(err) => println!("{err}"),
    }
}

fn run_similarity(collection: &Collection, text: &str) {
    match collection.similarity_query(text) {
        Ok(ranked) if ranked.is_empty() => println!("no documents to rank"),
        Ok(ranked) => {
            for (doc_id, score) in ranked {
                println!("{doc_id:<20} {score:.4}");
            }
        }
        Err(Error::NoUsableTerms) => println!("query has no terms in the vocabulary"),
        Err(err) => println!("{err}"),
    }
}

fn run_phrase(collection: &Collection, text: &str) {
    let matches = collection.phrase_query(text);
    if matches.is_empty() {
        println!("no documents contain the phrase");
    } else {
        let ids: Vec<&str> = matches.iter().map(String::as_str).collect();
        println!("{} documents: {}", ids.len(), ids.join(", "));
    }
}

fn print_menu() {
    println!();
    println!("=== MENU ===");
    println!("1) add the next queued document");
    println!("2) add all remaining documents");
    println!("3) remove a document by id");
    println!("4) show the vocabulary");
    println!("5) show the TF-IDF matrix");
    println!("6) show the positional inverted index");
    println!("7) boolean query");
    println!("8) similarity query");
    println!("9) phrase query");
    println!("0) quit");
}

fn prompt(stdin: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut app = App::new();
    if let Some(path) = &args.corpus {
        app.load(path);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print_menu();
        let choice = prompt(&mut input, "option")?;
        match choice.as_str() {
            "1" => app.add_next(),
            "2" => app.add_all(),
            "3" => {
                let id = prompt(&mut input, "document id")?;
                app.remove(&id);
            }
            "4" => show_vocabulary(&app.collection),
            "5" => println!("{}", render_matrix(&app.collection)),
            "6" => println!("{}", render_index(&app.collection)),
            "7" => {
                let text = prompt(&mut input, "query")?;
                let op = prompt(&mut input, "operator (AND/OR/NOT)")?;
                run_boolean(&app.collection, &text, &op);
            }
            "8" => {
                let text = prompt(&mut input, "query")?;
                run_similarity(&app.collection, &text);
            }
            "9" => {
                let text = prompt(&mut input, "phrase")?;
                run_phrase(&app.collection, &text);
            }
            "0" => break,
            _ => println!("invalid option"),
        }
    }
    Ok(())
}
