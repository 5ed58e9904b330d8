//! Scanner benchmarks
//!
//! Run with: cargo bench --bench scanner
//! Profile with: cargo flamegraph --bench scanner -- --bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tszscan::{Cursor, SourceCursor, TokenSet, scan, scan_whitespace_and_comments};

/// Template body with interpolations and escapes
const TEMPLATE_BODY: &str = r#"Hello ${user.name}, you have ${count} new messages.
Totals: $12.50 + $3.99 = ${total}\n across ${days} days."#;

/// Comment-heavy inter-token gap material
const COMMENT_GAPS: &str = r#"
// first line comment
/* inline block */ /* second block */
/* multi
   line
   block */
// trailing
"#;

/// Operator soup around `?`
const TERNARY_SOUP: &str = "cond ? a : b ?. c ? x ?. y : z ? p : q ?. tail";

/// Legacy comment markers
const HTML_COMMENTS: &str = "<!-- generated header\n--> generated footer\n<!-- x -->\n";

fn repeat_to_size(pattern: &str, size: usize) -> String {
    let mut source = String::with_capacity(size + pattern.len());
    while source.len() < size {
        source.push_str(pattern);
        source.push('\n');
    }
    source
}

/// Drive the dispatcher across a whole source, advancing over declines.
fn drive(source: &str, valid: TokenSet) -> usize {
    let mut cursor = SourceCursor::new(source);
    let mut recognized = 0usize;
    loop {
        if scan(&mut cursor, valid) {
            recognized += 1;
        } else if cursor.lookahead().is_some() {
            cursor.advance();
        } else {
            break;
        }
    }
    recognized
}

fn bench_recognizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/recognizers");

    let cases = [
        ("template_body", TEMPLATE_BODY, TokenSet::TEMPLATE_CONTENT),
        ("ternary_soup", TERNARY_SOUP, TokenSet::TERNARY_QUESTION),
        ("html_comments", HTML_COMMENTS, TokenSet::HTML_COMMENT),
    ];

    for (name, source, valid) in cases {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("bytes", name), source, |b, s| {
            b.iter(|| drive(black_box(s), valid));
        });
    }

    group.finish();
}

fn bench_gap_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/gap");

    for consume in [true, false] {
        group.throughput(Throughput::Bytes(COMMENT_GAPS.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("comment_gaps", consume),
            COMMENT_GAPS,
            |b, s| {
                b.iter(|| {
                    let mut cursor = SourceCursor::new(black_box(s));
                    let mut outcomes = 0usize;
                    loop {
                        let gap = scan_whitespace_and_comments(&mut cursor, consume);
                        outcomes += gap.saw_comment as usize;
                        if cursor.lookahead().is_some() {
                            cursor.advance();
                        } else {
                            break;
                        }
                    }
                    outcomes
                });
            },
        );
    }

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/throughput");

    for size in [16 * 1024, 256 * 1024] {
        let source = repeat_to_size(COMMENT_GAPS, size);
        let actual_size = source.len();

        group.throughput(Throughput::Bytes(actual_size as u64));
        group.bench_with_input(
            BenchmarkId::new("large_gap", format!("{}KB", actual_size / 1024)),
            &source,
            |b, s| {
                b.iter(|| {
                    let mut cursor = SourceCursor::new(black_box(s));
                    scan_whitespace_and_comments(&mut cursor, true)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_recognizers, bench_gap_scanner, bench_throughput);
criterion_main!(benches);
