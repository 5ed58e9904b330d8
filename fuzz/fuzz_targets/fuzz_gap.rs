#![no_main]

use libfuzzer_sys::fuzz_target;
use tszscan::{GapOutcome, SourceCursor, scan_whitespace_and_comments};

fuzz_target!(|data: &[u8]| {
    let Some((&mode, rest)) = data.split_first() else {
        return;
    };
    let Ok(source) = std::str::from_utf8(rest) else {
        return;
    };

    if source.len() > 100_000 {
        return;
    }

    let consume = mode & 1 == 1;
    let mut cursor = SourceCursor::new(source);
    let gap = scan_whitespace_and_comments(&mut cursor, consume);

    // The classification-only stop exists solely for complete block
    // comments, which always record a comment.
    if gap.outcome == GapOutcome::NoNewline {
        assert!(!consume);
        assert!(gap.saw_comment);
    }

    // Consumption never overruns the source.
    assert!(cursor.offset() <= source.len());
});
