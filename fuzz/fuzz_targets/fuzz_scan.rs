#![no_main]

use libfuzzer_sys::fuzz_target;
use tszscan::{Cursor, SourceCursor, TokenSet, scan};

fuzz_target!(|data: &[u8]| {
    // First byte selects the admissibility set; the rest is source text.
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(source) = std::str::from_utf8(rest) else {
        return;
    };

    // Limit input size to avoid timeout
    if source.len() > 100_000 {
        return;
    }

    let valid = TokenSet::from_bits_truncate(selector);

    let mut cursor = SourceCursor::new(source);
    let matched = scan(&mut cursor, valid);

    if matched {
        // Success must come with a committed, in-bounds span and a kind the
        // set admits.
        let kind = cursor.token_kind().expect("matched scan sets a kind");
        assert!(valid.admits(kind));
        let span = cursor.token_span().expect("matched scan commits a span");
        assert!(span.start <= span.end);
        assert!(span.end <= source.len());
        assert!(source.is_char_boundary(span.start));
        assert!(source.is_char_boundary(span.end));
    }

    // The cursor must stay usable after either outcome.
    while cursor.lookahead().is_some() {
        cursor.advance();
    }
});
