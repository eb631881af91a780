use anyhow::Result;
use posterous::{Args, Client};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Example program that calls the library API.
    // Configure credentials via POSTEROUS_* env vars or a `.posterousrc` file.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?.with_timeout(20);

    let tags = client.list_tags()?;
    println!("tags: {}", serde_json::to_string_pretty(&tags)?);

    let tag = std::env::args().nth(1).unwrap_or_else(|| "news".to_string());
    let posts = client.list_posts_by_tag(&Args::new().with("tag", tag).with("page", 1))?;
    println!("posts: {}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}
