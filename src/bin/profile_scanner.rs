//! Profiling binary for the external scanner
//!
//! Build with: cargo build --release --features dev-tools --bin profile_scanner
//! Profile with perf: perf record --call-graph=dwarf ./target/release/profile_scanner
//!                    perf report
//! Or with flamegraph: cargo flamegraph --features dev-tools --bin profile_scanner

use tszscan::{Cursor, GapOutcome, SourceCursor, TokenSet, scan, scan_whitespace_and_comments};

/// Synthetic source exercising every recognizer
fn generate_source(size: usize) -> String {
    let patterns = [
        // Comment-heavy gap material
        r#"
// leading line comment
/* block without newline */ /* another */
/* block
   with newline */
"#,
        // Ternary / optional-chaining soup
        r#"
cond ? a : b
maybe ?. prop
deep ?. chain ?. tail
flag ? x ?. y : z
"#,
        // Legacy comment markers
        "
<!-- opener running to end of line
--> closer with trailing text
",
    ];

    let mut source = String::with_capacity(size);
    let mut i = 0;
    while source.len() < size {
        if let Some(pattern) = patterns.get(i % patterns.len()) {
            source.push_str(pattern);
            source.push('\n');
        }
        i += 1;
    }
    source
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Default to 1MB, can be overridden with command line arg
    let size: usize = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000_000);

    let iterations: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);

    eprintln!("Generating {}KB source...", size / 1024);
    let source = generate_source(size);
    eprintln!("Source size: {} bytes", source.len());

    eprintln!("Running {} iterations of scanner...", iterations);

    let start = std::time::Instant::now();
    let mut tokens = 0usize;
    let mut comments = 0usize;
    let mut rejects = 0usize;

    for _ in 0..iterations {
        let mut cursor = SourceCursor::new(&source);
        loop {
            let gap = scan_whitespace_and_comments(&mut cursor, true);
            if gap.saw_comment {
                comments += 1;
            }
            if gap.outcome == GapOutcome::Reject {
                rejects += 1;
            }
            // Try the grammar alternatives the way a host parser would.
            if scan(&mut cursor, TokenSet::TERNARY_QUESTION)
                || scan(&mut cursor, TokenSet::HTML_COMMENT)
            {
                tokens += 1;
            } else if cursor.lookahead().is_some() {
                cursor.advance();
            } else {
                break;
            }
        }
    }

    let elapsed = start.elapsed();
    let bytes_per_sec = (source.len() * iterations) as f64 / elapsed.as_secs_f64();

    eprintln!("Done in {:?}", elapsed);
    eprintln!("Throughput: {:.2} MB/s", bytes_per_sec / 1_000_000.0);

    let summary = serde_json::json!({
        "source_bytes": source.len(),
        "iterations": iterations,
        "tokens": tokens,
        "comment_gaps": comments,
        "rejects": rejects,
        "elapsed_ms": elapsed.as_millis(),
        "mb_per_sec": bytes_per_sec / 1_000_000.0,
    });
    println!("{summary}");
}
