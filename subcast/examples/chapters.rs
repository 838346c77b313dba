//! Pick chapter markers from a transcript with the built-in summarizer.
//!
//! Usage: cargo run --example chapters -- path/to/transcript.txt

use subcast::{CondenseOptions, ExtractiveSummarizer};

#[tokio::main]
async fn main() -> subcast::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: chapters <transcript-file>");

    let raw = std::fs::read_to_string(&path)?;
    let segments = subcast::extract_segments(&raw)?;

    let options = CondenseOptions::new().window_size(40).overlap(0.25);
    let summarizer = ExtractiveSummarizer::new().keep_ratio(0.3);

    let chapters = subcast::chapter_candidates(&segments, &options, &summarizer, 10).await?;

    for marker in &chapters {
        println!("{}  {}", marker.timestamp, marker.text);
    }

    Ok(())
}
