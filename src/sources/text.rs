use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use super::traits::ListingSource;
use super::types::BLOCK_DELIMITER;

/// Plain-text dump with one listing per block, blocks separated by `---` lines
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Split a dump into raw blocks. Text between delimiters is kept byte for byte.
pub fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if line.trim_end_matches('\r') == BLOCK_DELIMITER {
            push_block(&mut blocks, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, &current);

    blocks
}

fn push_block(blocks: &mut Vec<String>, lines: &[&str]) {
    let block = lines.join("\n");
    if !block.trim().is_empty() {
        blocks.push(block);
    }
}

#[async_trait]
impl ListingSource for TextFileSource {
    async fn fetch_blocks(&self) -> Result<Vec<String>> {
        debug!("Reading listing dump {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let blocks = split_blocks(&content);
        info!("Read {} listing blocks from {}", blocks.len(), self.path.display());
        Ok(blocks)
    }

    fn source_name(&self) -> &'static str {
        "text file"
    }
}
