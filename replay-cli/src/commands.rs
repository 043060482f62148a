use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use replay_parser::{ParsedRecord, ParserRegistry, PlayGameRecord, UnparsedItem, date::format_date};
use tracing::{debug, info};

use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{AppError, Result},
    output::{OutputManager, write_output},
};

pub struct CommandExecutor {
    config: AppConfig,
    registry: ParserRegistry,
    output_manager: OutputManager,
}

impl CommandExecutor {
    pub fn new(config: AppConfig, colored: bool) -> Self {
        let registry = ParserRegistry::with_directory(Arc::new(config.liver_directory()));
        Self {
            config,
            registry,
            output_manager: OutputManager::new(colored),
        }
    }

    pub fn output_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.config.output)
    }

    pub async fn parse_items(
        &self,
        uploader: u64,
        input: Option<&Path>,
        output: Option<OutputFormat>,
        output_file: Option<&Path>,
        per_game: bool,
        max_concurrent: Option<usize>,
    ) -> Result<()> {
        let items = read_items(input)?;
        debug!(count = items.len(), "read unparsed items");

        let records = self
            .registry
            .classify_batch(
                uploader,
                &items,
                max_concurrent.unwrap_or(self.config.max_concurrent),
            )
            .await?;
        info!(
            total = items.len(),
            accepted = records.len(),
            rejected = items.len() - records.len(),
            "classification finished"
        );

        let format = self.output_format(output);
        let content = if per_game {
            let rows: Vec<PlayGameRecord> = records.iter().flat_map(ParsedRecord::per_game).collect();
            self.output_manager.format_per_game(&rows, &format)?
        } else {
            self.output_manager.format_records(&records, &format)?
        };
        write_output(&content, output_file)
    }

    pub async fn classify_title(
        &self,
        uploader: u64,
        title: &str,
        publish_time: i64,
        output: Option<OutputFormat>,
    ) -> Result<()> {
        let item = UnparsedItem::new(0, "", publish_time, title);
        let record = self.registry.classify(uploader, &item).await?;

        let records: Vec<ParsedRecord> = record.into_iter().collect();
        if records.is_empty() {
            info!(uploader, "title rejected");
        }
        let content = self
            .output_manager
            .format_records(&records, &self.output_format(output))?;
        write_output(&content, None)
    }

    pub fn list_uploaders(&self) -> Result<()> {
        let content = self.output_manager.format_uploaders(&self.registry.uploaders());
        write_output(&content, None)
    }

    pub fn format_date(&self, timestamp: f64) -> Result<()> {
        write_output(&format!("{}\n", format_date(timestamp)), None)
    }

    pub fn show_config(&self) -> Result<()> {
        write_output(&self.config.show()?, None)
    }
}

fn read_items(input: Option<&Path>) -> Result<Vec<UnparsedItem>> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    parse_items_json(&content)
}

/// Accepts either a bare JSON array of items or an object with a
/// `records` array.
fn parse_items_json(content: &str) -> Result<Vec<UnparsedItem>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(mut map) => match map.remove("records") {
            Some(records) => Ok(serde_json::from_value(records)?),
            None => Err(AppError::InvalidInput(
                "expected a JSON array or an object with a `records` array".to_string(),
            )),
        },
        _ => Err(AppError::InvalidInput("expected a JSON array".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &str = r#"[
        {"aid":1,"bvId":"BV1a","publishTime":0,"liveDuration":1,"title":"【肯尼录播】 24-3-5 A+B"},
        {"aid":2,"bvId":"BV1b","publishTime":0,"liveDuration":1,"title":"杂谈"}
    ]"#;

    #[test]
    fn test_parse_items_json() {
        let items = parse_items_json(ITEMS).unwrap();
        assert_eq!(items.len(), 2);

        let wrapped = format!(r#"{{"records":{ITEMS}}}"#);
        assert_eq!(parse_items_json(&wrapped).unwrap(), items);

        assert!(matches!(
            parse_items_json(r#"{"items":[]}"#),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(parse_items_json("42"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_items_json("not json"), Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_parse_items_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("items.json");
        let output = dir.path().join("records.json");
        std::fs::write(&input, ITEMS).unwrap();

        let executor = CommandExecutor::new(AppConfig::default(), false);
        executor
            .parse_items(
                1400350754,
                Some(&input),
                Some(OutputFormat::JsonCompact),
                Some(&output),
                true,
                None,
            )
            .await
            .unwrap();

        let rows: Vec<PlayGameRecord> =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].play_game, "A");
        assert_eq!(rows[1].play_game, "B");
        assert_eq!(rows[0].liver, "机智的肯尼");
    }

    #[tokio::test]
    async fn test_unknown_uploader() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("items.json");
        std::fs::write(&input, ITEMS).unwrap();

        let executor = CommandExecutor::new(AppConfig::default(), false);
        let err = executor
            .parse_items(1, Some(&input), None, None, false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parser(_)));
    }

    #[test]
    fn test_output_format_falls_back_to_config() {
        let config = AppConfig {
            output: OutputFormat::Json,
            ..AppConfig::default()
        };
        let executor = CommandExecutor::new(config, false);
        assert_eq!(executor.output_format(None), OutputFormat::Json);
        assert_eq!(
            executor.output_format(Some(OutputFormat::Pretty)),
            OutputFormat::Pretty
        );
    }
}
