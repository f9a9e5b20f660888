//! Basic tests for mdsplit-api

use mdsplit_api::*;
use std::io::Write;

#[test]
fn test_input_text_processing() {
    let input = Input::Text("Hello world.".to_string());
    let text = input.read_text().unwrap();
    assert_eq!(text, "Hello world.");
}

#[test]
fn test_input_bytes_processing() {
    let input = Input::from_bytes(b"Hello world.".to_vec());
    assert_eq!(input.read_text().unwrap(), "Hello world.");
}

#[test]
fn test_input_invalid_utf8() {
    let input = Input::from_bytes(vec![0xff, 0xfe]);
    assert!(matches!(input.read_text(), Err(ApiError::Utf8(_))));
}

#[test]
fn test_input_reader() {
    let input = Input::from_reader(std::io::Cursor::new("from a reader"));
    assert_eq!(input.read_text().unwrap(), "from a reader");
}

#[test]
fn test_input_debug_hides_content() {
    let debug = format!("{:?}", Input::from_bytes(vec![1, 2, 3]));
    assert_eq!(debug, "Bytes(3)");
}

#[test]
fn test_split_markdown_scenarios() {
    assert_eq!(split_markdown("Hello world", 5).unwrap(), vec!["Hello", "world"]);
    assert_eq!(
        split_markdown("para one\n\npara two", 10).unwrap(),
        vec!["para one", "para two"]
    );
    assert_eq!(
        split_markdown("**bold text that is long**", 10).unwrap(),
        vec!["**bold tex", "t that is ", "long**"]
    );
    assert!(split_markdown("", 100).unwrap().is_empty());
    assert_eq!(split_markdown(&"z".repeat(50), 10).unwrap().len(), 5);
}

#[test]
fn test_split_markdown_zero_length_fails() {
    let err = split_markdown("anything", 0).unwrap_err();
    assert!(matches!(err, ApiError::Engine(_)));
}

#[test]
fn test_split_markdown_default_keeps_short_text() {
    let text = "A short message with **bold** text.";
    assert_eq!(split_markdown_default(text), vec![text.to_string()]);
    assert!(split_markdown_default("").is_empty());
}

#[test]
fn test_default_limit_applies() {
    let text = "word ".repeat(2000);
    let chunks = split_markdown_default(&text);
    assert!(chunks.len() >= 3);
    assert!(chunks.iter().all(|c| c.chars().count() <= DEFAULT_MAX_LENGTH));
}

#[test]
fn test_splitter_metadata() {
    let splitter = MarkdownSplitter::with_max_length(10).unwrap();
    let output = splitter.split_text("**bold text that is long**").unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(output.metadata.chunk_count, 3);
    assert_eq!(output.metadata.hard_cuts, 2);
    assert_eq!(output.metadata.total_bytes, 26);
    assert_eq!(output.metadata.max_length, 10);
    assert_eq!(output.metadata.overflow, "hard-cut");
    assert_eq!(output.chunks[2].cut, "final");
    assert_eq!(output.chunks[1].index, 1);
}

#[test]
fn test_reopen_through_builder() {
    let splitter = Config::builder()
        .max_length(10)
        .reopen()
        .build_splitter()
        .unwrap();
    let output = splitter.split_text("**bold text that is long**").unwrap();
    for chunk in &output.chunks {
        assert!(chunk.char_len <= 10);
        assert!(is_balanced(&chunk.text), "unbalanced: {:?}", chunk.text);
    }
}

#[test]
fn test_lookahead_through_builder() {
    let splitter = Config::builder()
        .max_length(10)
        .lookahead(100)
        .build_splitter()
        .unwrap();
    let output = splitter.split_text("**bold text that is long**").unwrap();
    assert_eq!(output.texts(), vec!["**bold text that is long**"]);
    assert!(output.chunks[0].oversized);
    assert_eq!(output.metadata.oversized_chunks, 1);
}

#[test]
fn test_split_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "first paragraph\n\nsecond paragraph").unwrap();

    let output = split_file(file.path()).unwrap();
    assert_eq!(output.texts(), vec!["first paragraph\n\nsecond paragraph"]);

    let splitter = MarkdownSplitter::with_max_length(20).unwrap();
    let output = splitter.split(Input::from_file(file.path())).unwrap();
    assert_eq!(output.texts(), vec!["first paragraph", "second paragraph"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = split_file("/definitely/not/here.md").unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
}

#[test]
fn test_splitter_is_shareable() {
    let splitter = MarkdownSplitter::with_max_length(5).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let splitter = splitter.clone();
            std::thread::spawn(move || splitter.split_text("Hello world").unwrap().into_texts())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["Hello", "world"]);
    }
}

#[test]
#[cfg(feature = "serde")]
fn test_output_serialization() {
    let output = MarkdownSplitter::with_max_length(5)
        .unwrap()
        .split_text("Hello world")
        .unwrap();
    let json = output.to_json().unwrap();
    assert!(json.contains("\"chunk_count\": 2"));

    let parsed: Output = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.texts(), vec!["Hello", "world"]);
    assert_eq!(parsed.chunks[0].cut, "word");
}
