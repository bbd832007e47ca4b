use clap::Parser;
use reqwest::blocking::Client;
use std::time::Duration;

const DEMO_PAGE_ID: &str = "471958375999732";

/// Smoke-test a running fbpages-server
#[derive(Debug, Parser)]
#[command(name = "fbpages-probe", version, about)]
struct Args {
    /// Server base URL
    #[arg(default_value = "http://localhost:8080")]
    base_url: String,

    /// Page to query
    #[arg(long, default_value = DEMO_PAGE_ID)]
    page_id: String,
}

fn probe(client: &Client, url: &str) {
    println!("  GET {}", url);

    let response = match client.get(url).send() {
        Ok(response) => response,
        Err(e) => {
            println!("  Error: {}", e);
            return;
        }
    };
    let status = response.status();
    let body = match response.text() {
        Ok(body) => body,
        Err(e) => {
            println!("  Error reading response: {}", e);
            return;
        }
    };

    println!("  Status: {}", status.as_u16());
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => {
            let pretty = serde_json::to_string_pretty(&json).unwrap_or(body);
            println!("  Response:\n{}", indent(&pretty));
        }
        Err(_) => println!("  Response: {}", body),
    }
}

fn indent(text: &str) -> String {
    text.lines().map(|l| format!("    {}", l)).collect::<Vec<_>>().join("\n")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let base = args.base_url.trim_end_matches('/');
    let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

    println!("Facebook Pages API probe");
    println!("Testing server at: {}", base);

    println!("\nHealth check");
    probe(&client, &format!("{}/health", base));

    println!("\nPage info for {}", args.page_id);
    probe(
        &client,
        &format!("{}/api/pages/{}?fields=id,name,category,fan_count", base, args.page_id),
    );

    println!("\nPosts for {}", args.page_id);
    probe(
        &client,
        &format!("{}/api/pages/{}/posts?limit=2&fields=id,message,created_time", base, args.page_id),
    );

    println!("\nManaged pages");
    probe(&client, &format!("{}/api/pages", base));

    println!("\nProbe completed. Managed pages fail with a page token; use a user token for that endpoint.");
    Ok(())
}
