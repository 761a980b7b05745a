use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::MinerConfig;
use crate::parser::sections::{clean_text, isolate_section, ArticleSection};
use crate::store::{self, RawData};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no extract for page '{0}'")]
    NoExtract(String),
    #[error("no cuisine section found in '{0}'")]
    MissingSection(String),
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Query,
}

#[derive(Debug, Deserialize)]
struct Query {
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: Option<String>,
    extract: Option<String>,
}

/// Fetch the configured article and return its cleaned cuisine section.
///
/// Any failure is logged and reported as `None`; the raw-data artifact is
/// written before returning on success.
pub async fn fetch(client: &reqwest::Client, config: &MinerConfig) -> Option<ArticleSection> {
    match fetch_section(client, config).await {
        Ok(section) => Some(section),
        Err(e) => {
            warn!("Fetch failed: {:#}", e);
            None
        }
    }
}

pub fn build_client(config: &MinerConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()?)
}

async fn fetch_section(client: &reqwest::Client, config: &MinerConfig) -> Result<ArticleSection> {
    let article = fetch_article(client, config).await?;

    let section = isolate_section(&article, &config.section_headings[..])
        .ok_or_else(|| FetchError::MissingSection(config.page_title.clone()))?;
    info!("Found content in section: {}", section.heading);

    let content = clean_text(&section.content);
    let path = store::save_raw(&config.raw_data_dir, &RawData::local_cuisine(content.as_str()))?;
    info!(
        "Extracted {} characters of cuisine content (raw data: {})",
        content.chars().count(),
        path.display()
    );

    Ok(ArticleSection {
        heading: section.heading,
        content,
    })
}

async fn fetch_article(
    client: &reqwest::Client,
    config: &MinerConfig,
) -> Result<String, FetchError> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(format!("Fetching '{}'...", config.page_title));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = request_extract(client, config).await;
    pb.finish_and_clear();

    let article = result?;
    info!("Fetched {} characters of content", article.chars().count());
    Ok(article)
}

async fn request_extract(
    client: &reqwest::Client,
    config: &MinerConfig,
) -> Result<String, FetchError> {
    let body = client
        .get(&config.api_url)
        .query(&[
            ("action", "query"),
            ("format", "json"),
            ("titles", config.page_title.as_str()),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("exsectionformat", "wiki"),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_extract(&body, &config.page_title)
}

/// Pull the article text out of a query-API JSON envelope.
pub fn parse_extract(body: &str, title: &str) -> Result<String, FetchError> {
    let response: QueryResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let page = response
        .query
        .pages
        .into_values()
        .next()
        .ok_or_else(|| FetchError::Malformed("no pages in response".to_string()))?;

    page.extract
        .ok_or_else(|| FetchError::NoExtract(page.title.unwrap_or_else(|| title.to_string())))
}

// ── Tests ──
