//! Registry of uploader title parsers.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::error::ParserError;
use crate::liver::LiverDirectory;
use crate::parser::{LongheiParser, TitleParser, ZixingcheParser};
use crate::record::{ParsedRecord, UnparsedItem};

/// Ordered collection of title parsers, looked up by uploader id.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn TitleParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Create a registry with the built-in parsers over the built-in liver
    /// directory.
    pub fn with_defaults() -> Self {
        Self::with_directory(Arc::new(LiverDirectory::default()))
    }

    /// Create a registry with the built-in parsers sharing `directory`.
    pub fn with_directory(directory: Arc<LiverDirectory>) -> Self {
        let mut registry = Self::new();
        registry.parsers.push(Arc::new(LongheiParser::new(directory.clone())));
        registry.parsers.push(Arc::new(ZixingcheParser::new(directory)));
        registry
    }

    /// Register a parser. Uploader ids must be unique.
    pub fn register(&mut self, parser: Arc<dyn TitleParser>) -> Result<(), ParserError> {
        let id = parser.uploader_id();
        if self.parsers.iter().any(|p| p.uploader_id() == id) {
            return Err(ParserError::DuplicateUploader(id));
        }
        self.parsers.push(parser);
        Ok(())
    }

    /// Get the parser for the given uploader.
    pub fn get(&self, uploader_id: u64) -> Result<Arc<dyn TitleParser>, ParserError> {
        self.parsers
            .iter()
            .find(|p| p.uploader_id() == uploader_id)
            .cloned()
            .ok_or(ParserError::UnknownUploader(uploader_id))
    }

    /// List registered uploaders as `(id, display name)`, in registration order.
    pub fn uploaders(&self) -> Vec<(u64, &str)> {
        self.parsers
            .iter()
            .map(|p| (p.uploader_id(), p.display_name()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Classify a single item with the uploader's parser.
    pub async fn classify(
        &self,
        uploader_id: u64,
        item: &UnparsedItem,
    ) -> Result<Option<ParsedRecord>, ParserError> {
        let parser = self.get(uploader_id)?;
        Ok(parser.classify(item).await)
    }

    /// Classify a batch of items belonging to one uploader.
    ///
    /// At most `max_concurrent` classifications are in flight at once.
    /// Rejected items are dropped; accepted records keep input order.
    pub async fn classify_batch(
        &self,
        uploader_id: u64,
        items: &[UnparsedItem],
        max_concurrent: usize,
    ) -> Result<Vec<ParsedRecord>, ParserError> {
        let parser = self.get(uploader_id)?;

        let records: Vec<ParsedRecord> = stream::iter(items)
            .map(|item| parser.classify(item))
            .buffered(max_concurrent.max(1))
            .filter_map(|record| async move { record })
            .collect()
            .await;

        info!(
            uploader = uploader_id,
            parser = parser.display_name(),
            total = items.len(),
            accepted = records.len(),
            "classified batch"
        );
        Ok(records)
    }
}
