mod block;
pub mod client;
mod config;
mod error;
pub mod notion;
mod parser;
pub mod report;

use std::fs;
use std::path::Path;

pub use block::{Block, DEFAULT_CODE_LANGUAGE};
pub use client::{MAX_CHILDREN_PER_REQUEST, NotionClient};
pub use config::{ApiConfig, Config, Credentials, EnvFile, PageConfig, SearchConfig};
pub use error::{NotionError, Result};
pub use notion::{CreatedPage, PageSummary};

/// Read a markdown file, turning CRLF line endings into LF.
pub fn read_markdown(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|source| NotionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.replace("\r\n", "\n"))
}

/// Convert markdown text into a vector of blocks.
pub fn convert(markdown: &str) -> Vec<Block> {
    parser::convert(markdown)
}

/// Convert markdown to the JSON `children` array a page-create request
/// would carry, truncated to the per-request limit.
pub fn markdown_to_notion_json(markdown: &str) -> Result<String> {
    let blocks = convert(markdown);
    let children: Vec<_> = client::truncate_children(&blocks)
        .iter()
        .map(notion::BlockObject)
        .collect();
    Ok(serde_json::to_string_pretty(&children)?)
}
