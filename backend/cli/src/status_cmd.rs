//! CLI Status Command
//!
//! Queries a locally running server's `/api/health`.

use anyhow::Result;

pub async fn run(port: u16) -> Result<()> {
    println!("docsift status: checking...");
    let url = format!("http://localhost:{port}/api/health");

    match reqwest::get(&url).await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("docsift is not running on port {port}");
        }
    }

    Ok(())
}
