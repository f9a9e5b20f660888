//! Basic tests for mdsplit-engine

use mdsplit_engine::*;

fn split(text: &str, max_length: usize) -> Vec<String> {
    Chunker::new(ChunkerConfig::with_max_length(max_length))
        .unwrap()
        .split(text)
        .into_iter()
        .map(|chunk| chunk.text)
        .collect()
}

#[test]
fn test_chunker_config_creation() {
    let config = ChunkerConfig::default();
    assert_eq!(config.max_length, DEFAULT_MAX_LENGTH);
    assert_eq!(config.overflow, OverflowPolicy::HardCut);

    let discord = ChunkerConfig::discord();
    assert_eq!(discord.max_length, 2000);
}

#[test]
fn test_zero_max_length_is_error() {
    let err = Chunker::new(ChunkerConfig::with_max_length(0)).unwrap_err();
    assert!(err.to_string().contains("max_length"));

    let err = Chunker::builder().max_length(0).build().unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument { .. }));
}

#[test]
fn test_words_split_at_space() {
    assert_eq!(split("Hello world", 5), vec!["Hello", "world"]);
}

#[test]
fn test_paragraphs_split_at_blank_line() {
    assert_eq!(
        split("para one\n\npara two", 10),
        vec!["para one", "para two"]
    );
}

#[test]
fn test_hard_cut_inside_span() {
    assert_eq!(
        split("**bold text that is long**", 10),
        vec!["**bold tex", "t that is ", "long**"]
    );
}

#[test]
fn test_empty_input_gives_no_chunks() {
    assert!(split("", 100).is_empty());
}

#[test]
fn test_long_token_is_hard_cut() {
    let token = "a".repeat(50);
    let chunks = split(&token, 10);
    assert_eq!(chunks.len(), 5);
    for chunk in chunks {
        assert_eq!(chunk.chars().count(), 10);
    }
}

#[test]
fn test_paragraph_preferred_over_line_and_word() {
    let text = "First paragraph here.\n\nSecond one\nwith two lines and words";
    let chunks = split(text, 40);
    assert_eq!(chunks[0], "First paragraph here.");
}

#[test]
fn test_bold_not_split_when_boundary_exists() {
    let text = "Intro text **bold words here** and the tail continues";
    let chunks = split(text, 32);
    assert_eq!(chunks[0], "Intro text **bold words here**");
    for chunk in &chunks {
        assert!(mdsplit_core::is_balanced(chunk), "unbalanced: {chunk:?}");
    }
}

#[test]
fn test_code_block_kept_whole() {
    let text = "Some intro\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\nAfter";
    let chunks = split(text, 50);
    assert_eq!(chunks[0], "Some intro");
    assert!(chunks[1].starts_with("```rust"));
    assert!(chunks[1].ends_with("```"));
    assert_eq!(chunks[2], "After");
}

#[test]
fn test_hard_cut_in_code_does_not_flip_later_fences() {
    // The first fence is longer than the limit. After the hard cuts the
    // closing fence must still be read as a closer.
    let code = "x".repeat(30);
    let text = format!("```\n{code}\n```\n\n**tail** text");
    let chunker = Chunker::new(ChunkerConfig::with_max_length(20)).unwrap();
    let chunks = chunker.split(&text);
    let last = chunks.last().unwrap();
    assert_eq!(last.text, "**tail** text");
    assert_eq!(last.cut, CutKind::Final);
}

#[test]
fn test_chunks_reconstruct_document() {
    let text = "alpha beta\n\ngamma **delta epsilon** zeta\neta theta iota kappa";
    let chunks = Chunker::new(ChunkerConfig::with_max_length(12))
        .unwrap()
        .split(text);

    let mut rebuilt = String::new();
    let mut expected_start = 0;
    for chunk in &chunks {
        assert_eq!(chunk.start, expected_start);
        rebuilt.push_str(&text[chunk.source_range()]);
        rebuilt.push_str(&text[chunk.end..chunk.end + chunk.separator_len]);
        expected_start = chunk.end + chunk.separator_len;
    }
    assert_eq!(rebuilt, text);
}

#[test]
fn test_reopen_policy_marks_continuations() {
    let chunker = Chunker::builder()
        .max_length(12)
        .overflow(OverflowPolicy::Reopen)
        .build()
        .unwrap();
    let chunks = chunker.split("~~a long strikethrough run~~");
    assert!(chunks.len() > 1);
    assert!(!chunks[0].continued);
    assert!(chunks[1..].iter().all(|c| c.continued));
    for chunk in &chunks {
        assert!(chunk.char_len <= 12);
        assert!(chunk.text.starts_with("~~"));
        assert!(chunk.text.ends_with("~~"));
    }
}

#[test]
fn test_lookahead_falls_back_to_hard_cut() {
    let chunker = Chunker::builder().max_length(10).lookahead(3).build().unwrap();
    let chunks = chunker.split("**bold text that is long**");
    assert_eq!(chunks[0].text, "**bold tex");
    assert!(!chunks[0].oversized);
}

#[test]
fn test_math_disabled_splits_inside_dollars() {
    let text = "cost $a b c d e f$ end";
    let with_math = split(text, 12);
    assert_eq!(with_math[0], "cost");

    let chunker = Chunker::builder().max_length(12).math(false).build().unwrap();
    let chunks = chunker.split(text);
    assert_eq!(chunks[0].text, "cost $a b c");
}

#[test]
fn test_crlf_paragraphs() {
    let chunks = split("one two\r\n\r\nthree four", 10);
    assert_eq!(chunks, vec!["one two", "three four"]);
}
