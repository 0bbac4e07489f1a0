//! Example: search the Radio Browser directory for jazz stations
//!
//! Run with: cargo run --example search_jazz

use futures::StreamExt;
use radiobrowser_skill::{MediaType, RadioSkill, SkillConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let data_root = std::env::temp_dir().join("radiobrowser-skill-demo");
    let skill = RadioSkill::new(SkillConfig::default(), &data_root).await?;

    println!("Searching for 'radio jazz'...\n");

    let mut candidates = std::pin::pin!(skill.search_radio("radio jazz", MediaType::Radio));
    let mut count = 0;
    while let Some(candidate) = candidates.next().await {
        count += 1;
        println!(
            "{:>4}  {}  {}",
            candidate.match_confidence, candidate.title, candidate.uri
        );
        if count >= 20 {
            println!("... (truncated)");
            break;
        }
    }

    println!("\n{} candidates shown (cache at {})", count, data_root.display());

    Ok(())
}
