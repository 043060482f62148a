use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use super::{Rejection, TitleFields, TitleParser, finish, live_time};
use crate::liver::{LiverDirectory, MatchMode};
use crate::record::{ParsedRecord, UnparsedItem};

pub const UPLOADER_ID: u64 = 1400350754;
pub const DISPLAY_NAME: &str = "自行车二层";

// 2024-3-5 or 24-3-5
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2,4})-([0-9]{1,2})-([0-9]{1,2})").unwrap());

// 【xx录播】 24-3-5 游戏A+游戏B
static GAMES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【.*?录播】 ?[0-9]{2,4}-[0-9]{1,2}-[0-9]{1,2} (.*)").unwrap()
});

static FULLWIDTH_NOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"（[^）]*）").unwrap());
static HALFWIDTH_NOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static BROKEN_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[—-]+(?:残缺|已爆炸)$").unwrap());
static BROKEN_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^残缺[—-]+").unwrap());

/// A two digit year means 20xx, anything longer is taken as written.
fn title_date(title: &str) -> Option<(i32, u32, u32)> {
    let caps = DATE_REGEX.captures(title)?;
    let year = caps.get(1)?.as_str();
    let year: i32 = if year.len() == 2 {
        2000 + year.parse::<i32>().ok()?
    } else {
        year.parse().ok()?
    };
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    Some((year, month, day))
}

/// Strips replay annotations from one game name: `（...）` and `(...)`
/// notes, a `-残缺`/`-已爆炸` suffix, a `残缺-` prefix and surrounding
/// whitespace. Other punctuation variants are left alone.
pub fn clean_game(raw: &str) -> String {
    let s = FULLWIDTH_NOTE_REGEX.replace_all(raw, "");
    let s = HALFWIDTH_NOTE_REGEX.replace_all(&s, "");
    let s = BROKEN_SUFFIX_REGEX.replace(&s, "");
    let s = BROKEN_PREFIX_REGEX.replace(&s, "");
    s.trim().to_string()
}

/// Titles shaped like `【肯尼录播】 24-3-5 游戏C（测试）+游戏D-残缺`.
///
/// Markers match case-insensitively, two digit years mean 20xx, and the
/// text after the date is a `+` separated game list.
pub fn parse_title(
    title: &str,
    publish_time: i64,
    directory: &LiverDirectory,
) -> Result<TitleFields, Rejection> {
    let liver = directory
        .resolve(title, MatchMode::CaseInsensitive)
        .ok_or(Rejection::UnknownLiver)?;

    let live_time = live_time(title_date(title), publish_time)?;

    let games = GAMES_REGEX
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(Rejection::NoGames)?;

    let play_game: Vec<String> = games.split('+').map(clean_game).collect();
    if play_game.first().is_none_or(|g| g.is_empty()) {
        return Err(Rejection::EmptyFirstGame);
    }

    Ok(TitleFields {
        liver: liver.to_string(),
        live_time,
        play_game,
    })
}

pub struct ZixingcheParser {
    directory: Arc<LiverDirectory>,
}

impl ZixingcheParser {
    pub fn new(directory: Arc<LiverDirectory>) -> Self {
        Self { directory }
    }
}

impl Default for ZixingcheParser {
    fn default() -> Self {
        Self::new(Arc::new(LiverDirectory::default()))
    }
}

#[async_trait]
impl TitleParser for ZixingcheParser {
    fn uploader_id(&self) -> u64 {
        UPLOADER_ID
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    async fn classify(&self, item: &UnparsedItem) -> Option<ParsedRecord> {
        let parsed = parse_title(&item.title, item.publish_time, &self.directory);
        finish(self, item, parsed)
    }
}
