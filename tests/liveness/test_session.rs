// Session and watch-loop behavior across several documents.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use vardec_core::config::VardecConfig;
use vardec_core::types::{Decoration, DocumentSnapshot, LanguageId};
use vardec_engine::session::{DecorationSession, DocumentEvent, PassOutcome, Renderer};
use vardec_server::WatchLoop;

use super::common::write_project;

#[derive(Default)]
struct Canvas {
    drawn: Vec<(PathBuf, Vec<String>)>,
    notices: usize,
}

impl Renderer for Canvas {
    fn apply(&mut self, path: &Path, decorations: Vec<Decoration>) {
        let texts = decorations.into_iter().map(|d| d.text).collect();
        self.drawn.push((path.to_path_buf(), texts));
    }

    fn notify_failure(&mut self, _path: &Path, _message: &str) {
        self.notices += 1;
    }
}

const TS_LIVE: &str = "const total = 1;\n\nconsole.log(total);\n";
const TS_BROKEN: &str = "const total = ;\n\nconsole.log(total);\n";
const GO_LIVE: &str = "package main\n\nfunc main() {\n\tn := 1\n\n\tprintln(n)\n}\n";

fn settle(config: &VardecConfig) -> Duration {
    Duration::from_millis(config.settle_ms)
}

#[test]
fn test_documents_settle_independently() {
    let config = VardecConfig::default();
    let period = settle(&config);
    let mut session = DecorationSession::new(config, Canvas::default());
    let start = Instant::now();

    session.on_document_event(
        DocumentEvent::Opened,
        DocumentSnapshot::new("a.ts", TS_LIVE, LanguageId::TypeScript),
        start,
    );
    session.on_document_event(
        DocumentEvent::Opened,
        DocumentSnapshot::new("b.go", GO_LIVE, LanguageId::Go),
        start + period / 2,
    );

    let first = session.poll(start + period);
    assert_eq!(first, vec![(PathBuf::from("a.ts"), PassOutcome::Applied(1))]);
    assert_eq!(session.pending_count(), 1);

    let second = session.poll(start + period + period / 2);
    assert_eq!(second, vec![(PathBuf::from("b.go"), PassOutcome::Applied(1))]);
    assert_eq!(session.decorations(Path::new("b.go")).unwrap()[0].text, "↳ n");
    assert_eq!(session.decorations(Path::new("b.go")).unwrap()[0].indent_units, 4);
}

#[test]
fn test_broken_edit_clears_previous_hints_quietly() {
    let mut session = DecorationSession::new(VardecConfig::default(), Canvas::default());
    let path = PathBuf::from("a.ts");

    let outcome = session.run_now(DocumentSnapshot::new(&path, TS_LIVE, LanguageId::TypeScript));
    assert_eq!(outcome, PassOutcome::Applied(1));

    let outcome = session.run_now(DocumentSnapshot::new(&path, TS_BROKEN, LanguageId::TypeScript));
    assert_eq!(outcome, PassOutcome::Unparsable);
    assert_eq!(session.decorations(&path), Some(&[][..]));

    let canvas = session.renderer();
    assert_eq!(canvas.notices, 0);
    assert_eq!(canvas.drawn.last(), Some(&(path.clone(), Vec::new())));

    // Fixing the file brings the hint back.
    let outcome = session.run_now(DocumentSnapshot::new(&path, TS_LIVE, LanguageId::TypeScript));
    assert_eq!(outcome, PassOutcome::Applied(1));
}

#[test]
fn test_use_counts_and_custom_prefix() {
    let config = VardecConfig {
        show_use_counts: true,
        hint_prefix: "// ".to_string(),
        ..VardecConfig::default()
    };
    let mut session = DecorationSession::new(config, Canvas::default());
    let text = "let a = 1;\n\nf(a);\ng(a);\n";
    session.run_now(DocumentSnapshot::new("c.ts", text, LanguageId::TypeScript));
    assert_eq!(session.renderer().drawn[0].1, vec!["// a×2".to_string()]);
}

#[test]
fn test_disabled_language_is_never_scheduled() {
    let config = VardecConfig {
        languages: vec!["go".to_string()],
        ..VardecConfig::default()
    };
    let period = settle(&config);
    let mut session = DecorationSession::new(config, Canvas::default());
    let start = Instant::now();

    assert!(!session.on_document_event(
        DocumentEvent::Edited,
        DocumentSnapshot::new("a.ts", TS_LIVE, LanguageId::TypeScript),
        start,
    ));
    assert!(session.on_document_event(
        DocumentEvent::Edited,
        DocumentSnapshot::new("b.go", GO_LIVE, LanguageId::Go),
        start,
    ));
    let outcomes = session.poll(start + period);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, PathBuf::from("b.go"));
}

#[test]
fn test_shutdown_clears_everything_drawn() {
    let mut session = DecorationSession::new(VardecConfig::default(), Canvas::default());
    session.run_now(DocumentSnapshot::new("a.ts", TS_LIVE, LanguageId::TypeScript));
    session.run_now(DocumentSnapshot::new("b.go", GO_LIVE, LanguageId::Go));

    let canvas = session.into_renderer();
    let cleared: Vec<&PathBuf> = canvas
        .drawn
        .iter()
        .filter(|(_, texts)| texts.is_empty())
        .map(|(p, _)| p)
        .collect();
    assert_eq!(cleared, vec![&PathBuf::from("a.ts"), &PathBuf::from("b.go")]);
}

#[test]
fn test_watch_loop_annotates_project_and_tracks_edits() {
    let dir = write_project(&[
        ("src/app.ts", TS_LIVE),
        ("cmd/main.go", GO_LIVE),
        ("README.md", "# not code\n"),
        ("node_modules/dep/index.js", "let x = 1;\n\nuse(x);\n"),
        (".vardecignore", "node_modules/\n"),
    ]);
    let root = dir.path();
    let session = DecorationSession::new(VardecConfig::default(), Canvas::default());
    let mut watch = WatchLoop::new(root, session);

    assert_eq!(watch.prime(Instant::now()), 2);
    let outcomes = watch.flush();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|(_, o)| *o == PassOutcome::Applied(1)));

    // Re-reporting the same content schedules nothing.
    let app = root.join("src/app.ts");
    assert_eq!(watch.ingest(vec![app.clone()], Instant::now()), 0);

    std::fs::write(&app, TS_BROKEN).unwrap();
    assert_eq!(watch.ingest(vec![app.clone()], Instant::now()), 1);
    let outcomes = watch.flush();
    assert_eq!(outcomes, vec![(app.clone(), PassOutcome::Unparsable)]);

    std::fs::remove_file(root.join("cmd/main.go")).unwrap();
    assert_eq!(watch.ingest(vec![root.join("cmd/main.go")], Instant::now()), 0);
    assert!(watch.session().decorations(&root.join("cmd/main.go")).is_none());
}
