use std::path::{Path, PathBuf};
use std::time::Instant;

use vardec_core::config::{VardecConfig, CONFIG_DIR};
use vardec_core::types::Decoration;
use vardec_engine::session::{DecorationSession, Renderer};
use vardec_server::watcher::BATCH_WINDOW;
use vardec_server::{start_watching, WatchLoop};

/// Prints each applied decoration set to stdout.
struct TerminalRenderer {
    root: PathBuf,
    passes: usize,
}

impl TerminalRenderer {
    fn display<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }
}

impl Renderer for TerminalRenderer {
    fn apply(&mut self, path: &Path, decorations: Vec<Decoration>) {
        self.passes += 1;
        if decorations.is_empty() {
            println!("{}: no hints", self.display(path));
            return;
        }
        println!("{}:", self.display(path));
        for d in &decorations {
            println!("  {:>4} | {}{}", d.line + 1, " ".repeat(d.indent_units as usize), d.text);
        }
    }

    fn notify_failure(&mut self, path: &Path, message: &str) {
        eprintln!("[vardec watch] {}: {}", self.display(path), message);
    }
}

/// Run `vardec watch` -- annotate every file under the root, then re-annotate
/// on change once edits settle.
pub fn run(path: Option<PathBuf>) -> i32 {
    let root = match path {
        Some(p) => p,
        None => match std::env::current_dir() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("[vardec watch] failed to get current directory: {}", e);
                return 2;
            }
        },
    };
    if !root.is_dir() {
        eprintln!("[vardec watch] not a directory: {}", root.display());
        return 2;
    }
    // Change events carry absolute paths; match them against the same root.
    let root = root.canonicalize().unwrap_or(root);

    let config = VardecConfig::load(&root.join(CONFIG_DIR));
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[vardec watch] failed to start runtime: {}", e);
            return 2;
        }
    };

    runtime.block_on(async move {
        let (_watcher, changes) = match start_watching(&root, BATCH_WINDOW) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("[vardec watch] failed to watch directory: {}", e);
                return 2;
            }
        };

        let renderer = TerminalRenderer {
            root: root.clone(),
            passes: 0,
        };
        let mut watch_loop = WatchLoop::new(&root, DecorationSession::new(config, renderer));
        let queued = watch_loop.prime(Instant::now());
        eprintln!(
            "[vardec watch] Watching {} files for changes... (Ctrl+C to stop)",
            queued
        );

        tokio::select! {
            renderer = watch_loop.run(changes) => {
                eprintln!("[vardec watch] Stopped. Total passes: {}", renderer.passes);
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("[vardec watch] Stopped.");
            }
        }
        0
    })
}
