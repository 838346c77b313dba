//! Output a transcript as SRT, WebVTT, and JSON.
//!
//! Usage: cargo run --example formats -- path/to/transcript.txt

fn main() -> subcast::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: formats <transcript-file>");

    let raw = std::fs::read_to_string(&path)?;
    let doc = subcast::parse_transcript(&raw)?;

    println!("=== SRT ===\n{}", doc.to_srt());
    println!("=== WebVTT ===\n{}", doc.to_vtt());
    println!("=== JSON ===\n{}", doc.to_json_pretty()?);

    Ok(())
}
