//! Per-uploader title parsers.
//!
//! Every uploader names replays differently, so each one gets its own
//! [`TitleParser`] holding its own rules. The rules themselves live in a
//! plain `parse_title` function per module; the trait impl only wraps that
//! function into the accept/reject contract and logs why a title was
//! rejected.

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::date::{checked_timestamp, local_midnight_millis};
use crate::record::{ParsedRecord, UnparsedItem};

pub mod longhei;
pub mod zixingche;

pub use longhei::LongheiParser;
pub use zixingche::ZixingcheParser;

/// Trait for uploader-specific title parsers.
#[async_trait]
pub trait TitleParser: Send + Sync {
    /// The uploader whose titles this parser understands. Registry key.
    fn uploader_id(&self) -> u64;

    /// Human readable uploader name.
    fn display_name(&self) -> &str;

    /// Classify one item. Returns `None` when the title is rejected.
    ///
    /// Never fails on malformed text, and has no side effects besides
    /// logging: calling it twice on the same item yields the same result.
    async fn classify(&self, item: &UnparsedItem) -> Option<ParsedRecord>;
}

/// Why a title was rejected. Only ever logged, callers just see `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("no liver marker in title")]
    UnknownLiver,
    #[error("no date in title and publish time out of range")]
    InvalidPublishTime,
    #[error("no games in title")]
    NoGames,
    #[error("first game is empty after cleanup")]
    EmptyFirstGame,
}

/// Everything a parser pulls out of a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFields {
    pub liver: String,
    pub live_time: i64,
    pub play_game: Vec<String>,
}

impl TitleFields {
    pub fn into_record(self, item: UnparsedItem) -> ParsedRecord {
        ParsedRecord::new(item, self.live_time, self.play_game, self.liver)
    }
}

/// Turns the outcome of a `parse_title` into the public contract.
pub(crate) fn finish(
    parser: &dyn TitleParser,
    item: &UnparsedItem,
    parsed: Result<TitleFields, Rejection>,
) -> Option<ParsedRecord> {
    match parsed {
        Ok(fields) => {
            trace!(
                uploader = parser.uploader_id(),
                aid = item.aid,
                liver = %fields.liver,
                games = fields.play_game.len(),
                "title accepted"
            );
            Some(fields.into_record(item.clone()))
        }
        Err(rejection) => {
            debug!(
                uploader = parser.uploader_id(),
                aid = item.aid,
                title = %item.title,
                reason = %rejection,
                "title rejected"
            );
            None
        }
    }
}

/// Year, month and day from the first three capture groups of `re`.
pub(crate) fn capture_ymd(re: &Regex, title: &str) -> Option<(i32, u32, u32)> {
    let caps = re.captures(title)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    Some((year, month, day))
}

/// Midnight of the title date when there is one, the publish time otherwise.
pub(crate) fn live_time(ymd: Option<(i32, u32, u32)>, publish_time: i64) -> Result<i64, Rejection> {
    ymd.and_then(|(y, m, d)| local_midnight_millis(y, m, d))
        .or_else(|| checked_timestamp(publish_time))
        .ok_or(Rejection::InvalidPublishTime)
}
