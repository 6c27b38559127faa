use std::env;
use std::path::PathBuf;

use canon_builder::Store;
use canon_builder::canon::format;
use canon_builder::canon::merge;
use canon_builder::canon::migrate::{self, MigrationMode};
use canon_builder::canon::sources;
use canon_builder::canon::types::books::{BOOKS, BookConfig};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "populate" => populate(&args),
        "migrate" => migrate_cmd(&args),
        other => {
            eprintln!("ERROR: Unknown command: {}", other);
            usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {} populate <BOOK> [--sources <DIR>] [--store <DIR>]", program);
    eprintln!("       {} migrate [--dry-run] [--store <DIR>]", program);
}

/// Reads the value following a flag, e.g. `--store data/chapters`.
fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(PathBuf::from)
}

fn populate(args: &[String]) {
    let Some(book_code) = args.get(2).filter(|a| !a.starts_with("--")) else {
        eprintln!("ERROR: populate requires a book code.");
        std::process::exit(1);
    };
    let Some(book) = BookConfig::find(book_code) else {
        eprintln!("ERROR: Unknown book: {}", book_code);
        let known: Vec<&str> = BOOKS.iter().map(|b| b.code).collect();
        eprintln!("Known books: {}", known.join(", "));
        std::process::exit(1);
    };

    let sources_root = flag_value(args, "--sources").unwrap_or_else(|| PathBuf::from("sources"));
    let store_root =
        flag_value(args, "--store").unwrap_or_else(|| PathBuf::from("data/chapters"));

    let store = match Store::open(&store_root) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Populating {} ({} chapters)", book.code, book.chapters);
    println!("{}", "=".repeat(60));

    let mut parsed = Vec::new();
    for resolved in sources::resolve(&sources_root, book) {
        let output = format::extract(resolved.kind, &resolved.input, book);
        println!("  {}: {} verses", resolved.translation, format::verse_count(&output));
        parsed.push((resolved.translation, output));
    }

    match merge::merge_book(&store, book, 1..=book.extended_chapters, &parsed) {
        Ok(report) => {
            println!("{}", "=".repeat(60));
            println!(
                "Done: {} entries changed across {} chapters",
                report.total_updated(),
                report.chapters_written
            );
            for (translation, count) in &report.updated {
                println!("  {}: {} updated", translation, count);
            }
            if let Some(backup) = &report.backup {
                println!("Backup: {}", backup.display());
            }
            if !report.missing.is_empty() {
                println!("Missing chapter records: {:?}", report.missing);
            }
            for (sequence, reason) in &report.failed {
                println!("  chapter {:03} failed: {}", sequence, reason);
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Merge failed");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}

fn migrate_cmd(args: &[String]) {
    let mode = if args.iter().any(|arg| arg == "--dry-run") {
        println!("DRY RUN MODE - No files will be modified");
        MigrationMode::DryRun
    } else {
        MigrationMode::Live
    };
    let store_root =
        flag_value(args, "--store").unwrap_or_else(|| PathBuf::from("data/chapters"));

    let store = match Store::open(&store_root) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    match migrate::migrate_store(&store, mode) {
        Ok(report) => {
            println!("Migration complete!");
            println!("  Chapters migrated: {}", report.chapters_migrated);
            println!("  Verses migrated: {}", report.verses_migrated);
            println!("  Already versioned: {}", report.chapters_skipped);
            if let Some(backup) = &report.backup {
                println!("  Backup: {}", backup.display());
            }
            if !report.errors.is_empty() {
                println!("\nErrors ({}):", report.errors.len());
                for (path, reason) in report.errors.iter().take(10) {
                    println!("  {}: {}", path.display(), reason);
                }
                if report.errors.len() > 10 {
                    println!("  ... and {} more", report.errors.len() - 10);
                }
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Migration failed");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
