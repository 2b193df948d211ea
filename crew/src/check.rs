//! Connectivity check for the search backend and the LLM configuration.

use crate::config::Config;
use agent::Result;
use agent::search::{
    FALLBACK_BLOCK, LinkupClient, SearchBackend, SearchRequest, TrendingSearch, extract_answer,
};
use std::sync::Arc;
use tracing::warn;

const DIRECT_QUERY: &str = "Find current professional and business trends about: \
latest professional trends. Focus on recent developments.";
const AGGREGATE_TOPIC: &str = "AI trends in business";

/// Shows the first eight and last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

async fn check_linkup(config: &Config) -> bool {
    println!("Testing Linkup API connection...");

    let client = match LinkupClient::new(&config.linkup) {
        Ok(client) => client,
        Err(e) => {
            println!("{e}");
            return false;
        }
    };
    if let Some(key) = &config.linkup.api_key {
        println!("API key found: {}", mask_key(key));
    }

    match client.search(&SearchRequest::sourced_answer(DIRECT_QUERY)).await {
        Ok(response) => {
            println!("Direct search succeeded");
            println!("Answer preview: {}", preview(&extract_answer(response), 200));
        }
        Err(e) => {
            warn!(error = ?e, "direct search failed");
            println!("Direct search failed: {e}");
            return false;
        }
    }

    println!("Testing trending search for: '{AGGREGATE_TOPIC}'");
    let search = TrendingSearch::new(Arc::new(client), config.aggregator.clone());
    let report = search.search(Some(AGGREGATE_TOPIC)).await;
    println!("{}", preview(&report, 500));

    if report == FALLBACK_BLOCK {
        println!("Trending search returned only fallback topics");
        false
    } else {
        println!("Trending search succeeded");
        true
    }
}

fn check_openai(config: &Config) -> bool {
    println!("\nTesting OpenAI configuration...");

    let Some(key) = &config.openai_api_key else {
        println!("OPENAI_API_KEY not found in environment variables");
        return false;
    };
    println!("OpenAI API key found: {}", mask_key(key));
    println!("Model configured: {}", config.model);

    if config.model.contains("gpt-4") {
        true
    } else {
        println!("Warning: not using a GPT-4 family model");
        false
    }
}

/// Returns whether everything needed to run the crew works.
pub async fn run(config: &Config) -> Result<bool> {
    let linkup_ok = check_linkup(config).await;
    let openai_ok = check_openai(config);

    println!("\nLinkup API: {}", if linkup_ok { "WORKING" } else { "FAILED" });
    println!(
        "OpenAI config: {}",
        if openai_ok { "CONFIGURED" } else { "NEEDS SETUP" }
    );

    if !linkup_ok {
        println!("\nLinkup API issues:");
        println!("- Check your LINKUP_API_KEY in the .env file");
        println!("- Verify your Linkup account has API access");
        println!("- Check your internet connection");
    }
    if !openai_ok {
        println!("\nOpenAI configuration:");
        println!("- Set OPENAI_API_KEY in the .env file");
        println!("- Set OPENAI_MODEL_NAME to a GPT-4 family model");
    }

    Ok(linkup_ok && openai_ok)
}
