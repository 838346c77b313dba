//! Convert a raw transcript file to SRT and print it.
//!
//! Usage: cargo run --example convert -- path/to/transcript.txt

fn main() -> subcast::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: convert <transcript-file>");

    let srt = subcast::convert_file(&path)?;

    print!("{srt}");

    Ok(())
}
