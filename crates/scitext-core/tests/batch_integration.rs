use std::fs;
use std::path::Path;
use std::sync::Mutex;

use scitext_core::progress::Progress;
use scitext_core::{BatchConfig, DocumentOutcome, RunReport, run_batch, run_batch_with_progress};
use tempfile::TempDir;

fn corpus(root: &Path) -> BatchConfig {
    let input = root.join("parsed");
    let raw = root.join("raw_ocr_texts");
    fs::create_dir_all(&input).unwrap();
    fs::create_dir_all(&raw).unwrap();

    fs::write(
        input.join("docA.conllu"),
        "# comment\n1\tHello\tNNP\n2\tworld\tNN\n\n3\tBye\tNNP\n\n",
    )
    .unwrap();
    fs::write(input.join("docB.conllu"), "front matter\nno tokens at all").unwrap();
    fs::write(input.join("docC.conllu"), "").unwrap();
    fs::write(input.join("docD.conllu"), "1\tNo\tX\n2\ttrailing\tX\n3\tblank\tX").unwrap();
    fs::write(input.join("docE.conllu"), "orphan\n\n\n1\tKept\tX\n").unwrap();
    fs::write(raw.join("prefix_docB.txt"), "Raw text here").unwrap();
    fs::write(input.join("README.md"), "not an annotation file").unwrap();

    BatchConfig::new(input, raw, root.join("article_texts")).with_fallback_prefix("prefix_")
}

fn read_output(config: &BatchConfig, name: &str) -> Option<String> {
    fs::read_to_string(config.output_dir.join(name)).ok()
}

#[test]
fn sequential_batch_end_to_end() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path());

    let report = run_batch(&config).unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.reconstructed, 3);
    assert_eq!(report.fallback, 1);
    assert_eq!(report.unrecoverable, vec!["docC.conllu"]);
    assert!(report.failed.is_empty());

    assert_eq!(
        read_output(&config, "docA.txt").as_deref(),
        Some("Hello world\nBye\n")
    );
    assert_eq!(read_output(&config, "docB.txt").as_deref(), Some("Raw text here"));
    assert_eq!(read_output(&config, "docC.txt"), None);
    assert_eq!(
        read_output(&config, "docD.txt").as_deref(),
        Some("No trailing blank\n")
    );
    assert_eq!(read_output(&config, "docE.txt").as_deref(), Some("Kept\n"));
    assert_eq!(read_output(&config, "README.txt"), None);
}

#[test]
fn parallel_batch_matches_sequential() {
    let seq_root = TempDir::new().unwrap();
    let par_root = TempDir::new().unwrap();
    let sequential = corpus(seq_root.path());
    let parallel = corpus(par_root.path()).with_workers(4);

    let seq_report = run_batch(&sequential).unwrap();
    let par_report = run_batch(&parallel).unwrap();
    assert_eq!(seq_report, par_report);

    for name in ["docA.txt", "docB.txt", "docC.txt", "docD.txt", "docE.txt"] {
        assert_eq!(read_output(&sequential, name), read_output(&parallel, name));
    }
}

#[test]
fn rerun_overwrites_previous_output() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path());
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("docA.txt"), "stale").unwrap();

    run_batch(&config).unwrap();
    assert_eq!(
        read_output(&config, "docA.txt").as_deref(),
        Some("Hello world\nBye\n")
    );
}

#[test]
fn no_partial_files_remain() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path());
    run_batch(&config).unwrap();

    let leftovers: Vec<_> = fs::read_dir(&config.output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn missing_raw_dir_marks_documents_unrecoverable() {
    let root = TempDir::new().unwrap();
    let mut config = corpus(root.path());
    config.raw_dir = root.path().join("does-not-exist");

    let report = run_batch(&config).unwrap();
    assert_eq!(report.fallback, 0);
    assert_eq!(report.unrecoverable, vec!["docB.conllu", "docC.conllu"]);
}

#[test]
fn report_serializes_to_json() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path());
    let report = run_batch(&config).unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"unrecoverable\""));
    assert!(json.contains("docC.conllu"));

    let back: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn single_document_outcome() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path());
    fs::create_dir_all(&config.output_dir).unwrap();

    let report = scitext_core::process_document(&config.input_dir.join("docA.conllu"), &config);
    assert_eq!(report.outcome, DocumentOutcome::Sentences { count: 2 });
    assert_eq!(report.document.id, "docA");
}

#[test]
fn rerun_removes_output_of_newly_unrecoverable_document() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path());
    let raw_c = config.raw_dir.join("prefix_docC.txt");
    fs::write(&raw_c, "old raw").unwrap();

    let first = run_batch(&config).unwrap();
    assert!(first.unrecoverable.is_empty());
    assert_eq!(read_output(&config, "docC.txt").as_deref(), Some("old raw"));

    fs::remove_file(&raw_c).unwrap();
    let second = run_batch(&config).unwrap();
    assert_eq!(second.unrecoverable, vec!["docC.conllu"]);
    assert_eq!(read_output(&config, "docC.txt"), None);
    assert_eq!(read_output(&config, "docA.txt").as_deref(), Some("Hello world\nBye\n"));
}

#[derive(Default)]
struct RecordingProgress {
    total: Mutex<Option<usize>>,
    items: Mutex<Vec<String>>,
    finished: Mutex<bool>,
}

impl Progress for RecordingProgress {
    fn start(&self, total: usize) {
        *self.total.lock().unwrap() = Some(total);
    }

    fn advance(&self, item: &str) {
        self.items.lock().unwrap().push(item.to_string());
    }

    fn finish(&self) {
        *self.finished.lock().unwrap() = true;
    }
}

#[test]
fn progress_sees_every_document() {
    let root = TempDir::new().unwrap();
    let config = corpus(root.path()).with_workers(3);
    let progress = RecordingProgress::default();

    let report = run_batch_with_progress(&config, &progress).unwrap();

    assert_eq!(*progress.total.lock().unwrap(), Some(report.total));
    let mut items = progress.items.lock().unwrap().clone();
    items.sort();
    assert_eq!(
        items,
        vec!["docA.conllu", "docB.conllu", "docC.conllu", "docD.conllu", "docE.conllu"]
    );
    assert!(*progress.finished.lock().unwrap());
}
