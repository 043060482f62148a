use crate::{cli::OutputFormat, error::Result};
#[cfg(feature = "colored-output")]
use colored::*;
use replay_parser::{ParsedRecord, PlayGameRecord, date::format_date};
use std::io::Write;

pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_records(&self, records: &[ParsedRecord], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.format_pretty(records)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)? + "\n"),
            OutputFormat::JsonCompact => Ok(serde_json::to_string(records)? + "\n"),
        }
    }

    pub fn format_per_game(&self, rows: &[PlayGameRecord], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => {
                let mut output = String::new();
                for row in rows {
                    output.push_str(&format!(
                        "{}  {}  {}  {}\n",
                        self.colorize(&format_date(row.live_time as f64), &Color::Cyan, false),
                        self.colorize(&row.liver, &Color::Green, false),
                        row.play_game,
                        self.colorize(&row.item.bv_id, &Color::Blue, false),
                    ));
                }
                Ok(output)
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
            OutputFormat::JsonCompact => Ok(serde_json::to_string(rows)? + "\n"),
        }
    }

    pub fn format_uploaders(&self, uploaders: &[(u64, &str)]) -> String {
        let mut output = String::new();
        output.push_str(&self.colorize("Configured uploaders:", &Color::Green, true));
        output.push('\n');
        for (id, name) in uploaders {
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize(&id.to_string(), &Color::Yellow, false),
                self.colorize(name, &Color::Cyan, false)
            ));
        }
        output
    }

    fn format_pretty(&self, records: &[ParsedRecord]) -> String {
        let mut output = String::new();
        output.push_str(&self.colorize(
            &format!("{} record(s)", records.len()),
            &Color::Green,
            true,
        ));
        output.push('\n');

        for record in records {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                self.colorize(&record.item.bv_id, &Color::Blue, true),
                record.item.title
            ));
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize("Liver", &Color::Yellow, false),
                self.colorize(&record.liver, &Color::Cyan, false)
            ));
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize("Live date", &Color::Yellow, false),
                self.colorize(&format_date(record.live_time as f64), &Color::Cyan, false)
            ));
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize("Published", &Color::Yellow, false),
                self.colorize(&format_date(record.item.publish_time as f64), &Color::Cyan, false)
            ));
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize("Games", &Color::Yellow, false),
                self.colorize(&record.play_game.join(" / "), &Color::Cyan, false)
            ));
        }
        output
    }

    fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Blue => text.blue(),
                    Color::Cyan => text.cyan(),
                };
                if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                }
            } else {
                text.to_string()
            }
        }

        #[cfg(not(feature = "colored-output"))]
        {
            let _ = (self.colored, color, bold);
            text.to_string()
        }
    }
}

enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
}

pub fn write_output(content: &str, output_file: Option<&std::path::Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            print!("{content}");
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}
