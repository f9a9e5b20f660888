//! Basic usage of the splitting API

use mdsplit_api::{split_markdown, Config, MarkdownSplitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: One call with a length limit
    println!("=== Method 1: Convenience Function ===");
    let chunks = split_markdown("First paragraph.\n\nSecond paragraph.", 20)?;
    for (i, chunk) in chunks.iter().enumerate() {
        println!("  Chunk {}: {:?}", i + 1, chunk);
    }

    // Method 2: Platform presets
    println!("\n=== Method 2: Configuration Presets ===");
    let splitter = MarkdownSplitter::with_config(Config::discord())?;
    let long_text = "Some **bold** words and plain ones. ".repeat(100);
    let output = splitter.split_text(&long_text)?;
    println!(
        "Discord preset produced {} chunks from {} characters",
        output.len(),
        output.metadata.total_chars
    );

    // Method 3: Re-open spans that do not fit
    println!("\n=== Method 3: Reopen Policy ===");
    let splitter = Config::builder().max_length(40).reopen().build_splitter()?;
    let code = "```rust\nfn one() {}\nfn two() {}\nfn three() {}\nfn four() {}\n```";
    let output = splitter.split_text(code)?;
    for chunk in &output.chunks {
        println!("--- chunk {} ({} chars) ---", chunk.index + 1, chunk.char_len);
        println!("{}", chunk.text);
    }

    Ok(())
}
