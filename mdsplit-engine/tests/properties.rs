//! Property tests for the chunking invariants

use mdsplit_core::is_balanced;
use mdsplit_engine::{Chunk, Chunker, ChunkerConfig, CutKind, OverflowPolicy};
use proptest::prelude::*;

fn piece() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Zа-я]{1,12}",
        1 => "[a-z]{1,8}".prop_map(|s| format!("**{s}**")),
        1 => "[a-z]{1,8}( [a-z]{1,8}){0,3}".prop_map(|s| format!("~~{s}~~")),
        1 => "[a-z]{1,8}( [a-z]{1,8}){0,3}".prop_map(|s| format!("||{s}||")),
        1 => "[a-z]{1,6}( [a-z]{1,6}){0,2}".prop_map(|s| format!("`{s}`")),
        1 => "[a-z]{1,10}(\n[a-z ]{1,10}){0,4}".prop_map(|s| format!("\n```text\n{s}\n```\n")),
        // Markers that may never be closed
        1 => (prop::sample::select(vec!["**", "*", "`", "$$"]), "[a-z]{1,8}")
            .prop_map(|(marker, s)| format!("{marker}{s}")),
        2 => Just(" ".to_string()),
        1 => Just("\n".to_string()),
        1 => Just("\n\n".to_string()),
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(piece(), 0..60).prop_map(|parts| parts.join(" "))
}

fn chunker(max_length: usize, overflow: OverflowPolicy) -> Chunker {
    Chunker::new(ChunkerConfig {
        max_length,
        overflow,
        ..ChunkerConfig::default()
    })
    .unwrap()
}

fn rebuild(text: &str, chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| &text[c.start..c.end + c.separator_len])
        .collect()
}

proptest! {
    #[test]
    fn prop_length_bound(doc in document(), max in 1usize..80) {
        for chunk in chunker(max, OverflowPolicy::HardCut).split(&doc) {
            prop_assert!(chunk.char_len <= max, "{:?}", chunk);
            prop_assert!(!chunk.text.is_empty());
        }
    }

    #[test]
    fn prop_lossless_and_verbatim(doc in document(), max in 1usize..80) {
        let chunks = chunker(max, OverflowPolicy::HardCut).split(&doc);
        prop_assert_eq!(rebuild(&doc, &chunks), doc.clone());
        for chunk in &chunks {
            prop_assert_eq!(chunk.text.as_str(), &doc[chunk.start..chunk.end]);
        }
    }

    #[test]
    fn prop_progress_is_monotonic(doc in document(), max in 1usize..80) {
        let chunks = chunker(max, OverflowPolicy::HardCut).split(&doc);
        for pair in chunks.windows(2) {
            prop_assert!(pair[0].end + pair[0].separator_len == pair[1].start);
            prop_assert!(pair[1].start > pair[0].start);
        }
    }

    #[test]
    fn prop_deterministic(doc in document(), max in 1usize..80) {
        let chunker = chunker(max, OverflowPolicy::HardCut);
        prop_assert_eq!(chunker.split(&doc), chunker.split(&doc));
    }

    #[test]
    fn prop_short_input_unchanged(doc in document()) {
        let max = doc.chars().count().max(1);
        let chunks = chunker(max, OverflowPolicy::HardCut).split(&doc);
        if doc.is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            prop_assert_eq!(chunks.len(), 1);
            prop_assert_eq!(&chunks[0].text, &doc);
        }
    }

    #[test]
    fn prop_non_hard_chunks_are_balanced(doc in document(), max in 20usize..80) {
        let chunks = chunker(max, OverflowPolicy::HardCut).split(&doc);
        // A chunk is balanced unless a hard cut happened at or before it.
        // The tail is emitted as is, so an unclosed marker may remain there.
        for chunk in chunks.iter().take_while(|c| c.cut != CutKind::Hard) {
            if chunk.cut != CutKind::Final {
                prop_assert!(is_balanced(&chunk.text), "{:?}", chunk.text);
            }
        }
    }

    #[test]
    fn prop_reopen_lossless_and_bounded(doc in document(), max in 16usize..80) {
        let chunks = chunker(max, OverflowPolicy::Reopen).split(&doc);
        prop_assert_eq!(rebuild(&doc, &chunks), doc.clone());
        for chunk in &chunks {
            prop_assert!(chunk.char_len <= max, "{:?}", chunk);
        }
    }

    #[test]
    fn prop_reopen_chunks_are_balanced(doc in document(), max in 16usize..80) {
        let chunks = chunker(max, OverflowPolicy::Reopen).split(&doc);
        for (i, chunk) in chunks.iter().enumerate() {
            let reopened = chunks.get(i + 1).is_some_and(|next| next.continued);
            // A hard cut followed by no re-opened markup may be the plain
            // fallback, which leaves its spans open from here on.
            if chunk.cut == CutKind::Hard && !reopened {
                break;
            }
            prop_assert!(is_balanced(&chunk.text), "{:?}", chunk.text);
        }
    }

    #[test]
    fn prop_lookahead_only_oversized_when_flagged(doc in document(), max in 1usize..40) {
        let chunks = chunker(max, OverflowPolicy::Lookahead { max_extra: 30 }).split(&doc);
        prop_assert_eq!(rebuild(&doc, &chunks), doc.clone());
        for chunk in &chunks {
            if chunk.oversized {
                prop_assert!(chunk.char_len <= max + 30);
            } else {
                prop_assert!(chunk.char_len <= max);
            }
        }
    }
}
