use clap::Parser;
use fbpages::{
    CommentOptions, CommentOrder, Config, Fields, GraphClient, InsightsOptions, ListOptions, Period,
    DEFAULT_API_VERSION,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage options:
  1. Command line: fbpages-demo <PAGE_ACCESS_TOKEN> <PAGE_ID> [API_VERSION]
  2. Environment variables:
     export PAGE_ACCESS_TOKEN='your_token_here'
     export PAGE_ID='your_page_id_here'
     export API_VERSION='v23.0'  # optional
     fbpages-demo";

/// Walk through the main Graph API calls for one page
#[derive(Debug, Parser)]
#[command(name = "fbpages-demo", version, about, after_help = USAGE)]
struct Args {
    token: Option<String>,
    page_id: Option<String>,
    api_version: Option<String>,
}

struct Input {
    token: String,
    page_id: String,
    api_version: Option<String>,
}

/// Positional arguments when both token and page are given, else the environment
fn resolve_input(args: Args) -> Result<Input, &'static str> {
    let (token, page_id, api_version) = match (args.token, args.page_id) {
        (Some(token), Some(page_id)) => {
            println!("Using parameters from command line arguments");
            (token, page_id, args.api_version)
        }
        _ => {
            println!("Using parameters from environment variables");
            let var = |k: &str| std::env::var(k).ok().filter(|v| !v.is_empty());
            (
                var("PAGE_ACCESS_TOKEN").unwrap_or_default(),
                var("PAGE_ID").unwrap_or_default(),
                var("API_VERSION"),
            )
        }
    };

    if token.is_empty() {
        return Err("PAGE_ACCESS_TOKEN not provided.");
    }
    if page_id.is_empty() {
        return Err("PAGE_ID not provided.");
    }
    Ok(Input {
        token,
        page_id,
        api_version: api_version.filter(|v| !v.is_empty()),
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn mask(token: &str) -> String {
    if token.len() <= 20 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}...{}", &token[..10], &token[token.len() - 10..])
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let input = match resolve_input(Args::parse()) {
        Ok(input) => input,
        Err(missing) => {
            println!("{}\n\n{}", missing, USAGE);
            return;
        }
    };

    let config = Config::default()
        .with_api_version(input.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION));
    let client = match GraphClient::with_config(&input.token, config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("creating client: {}", e);
            return;
        }
    };

    println!("Facebook Pages API demo");
    println!("=======================");
    println!("API version: {}", client.api_version());
    println!("Page ID: {}", input.page_id);
    println!("Token: {}", mask(&input.token));

    run(&client, &input.page_id);

    println!("\nDemo completed.");
}

fn run(client: &GraphClient, page_id: &str) {
    println!("\nValidating access token...");
    match client.validate_access_token() {
        Ok(()) => println!("Access token is valid"),
        Err(e) => tracing::error!("{}", e),
    }

    println!("\nToken owner:");
    match client.get_user_info() {
        Ok(user) => println!("  {} ({})", user.name, user.id),
        Err(e) => tracing::error!("Error getting user info: {}", e),
    }

    println!("\nPage information:");
    match client.get_page(page_id, &Fields::default()) {
        Ok(page) => {
            println!("  Name: {}", page.name);
            println!("  ID: {}", page.id);
            println!("  Category: {}", page.category);
            println!("  Fans: {}", page.fan_count);
            println!("  Verified: {}", page.is_verified);
            if let Some(website) = page.website.as_deref().filter(|w| !w.is_empty()) {
                println!("  Website: {}", website);
            }
        }
        Err(e) => tracing::error!("Error getting page: {}", e),
    }

    println!("\nRecent posts:");
    match client.get_posts(page_id, &ListOptions::default().with_limit(3)) {
        Ok(posts) => {
            println!("  Found {} recent posts", posts.data.len());
            for (i, post) in posts.data.iter().enumerate() {
                println!("  {}. {}", i + 1, post.id);
                if let Some(message) = post.message.as_deref().filter(|m| !m.is_empty()) {
                    println!("     Message: {}", truncate(message, 100));
                }
                println!("     Created: {}", post.created_time);
                show_comments(client, &post.id);
            }
        }
        Err(e) => tracing::error!("Error getting posts: {}", e),
    }

    println!("\nPhotos:");
    match client.list_photos(page_id, Some(5)) {
        Ok(photos) => {
            for photo in &photos {
                println!("  {} {}", photo.id, photo.name.as_deref().unwrap_or(""));
            }
            if photos.is_empty() {
                println!("  No photos found");
            }
        }
        Err(e) => tracing::error!("Error getting photos: {}", e),
    }

    println!("\nInsights (last 7 days):");
    let until = chrono::Utc::now().date_naive();
    let since = until - chrono::Duration::days(7);
    let options = InsightsOptions::default()
        .with_period(Period::Day)
        .with_range(Some(since), Some(until));
    match client.get_page_insights(page_id, &options) {
        Ok(insights) => {
            for insight in &insights.data {
                println!("  {} ({} values)", insight.name, insight.values.len());
            }
        }
        Err(e) => tracing::error!("Error getting insights: {}", e),
    }
}

fn show_comments(client: &GraphClient, post_id: &str) {
    let options = CommentOptions::default()
        .with_limit(3)
        .with_order(CommentOrder::Chronological);
    match client.get_post_comments(post_id, &options) {
        Ok(comments) if comments.total_count() > 0 => {
            println!("     Total comments: {}", comments.total_count());
            for (i, comment) in comments.data.iter().enumerate() {
                let author = comment.from.as_ref().map(|a| a.name.as_str()).unwrap_or("unknown");
                println!("     Comment {}: {} - {}", i + 1, author, truncate(comment.message.as_deref().unwrap_or(""), 50));
            }
        }
        Ok(_) => println!("     No comments found"),
        Err(e) => tracing::error!("Error getting comments: {}", e),
    }
}
