use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use super::{Rejection, TitleFields, TitleParser, capture_ymd, finish, live_time};
use crate::liver::{LiverDirectory, MatchMode};
use crate::record::{ParsedRecord, UnparsedItem};

pub const UPLOADER_ID: u64 = 245335;
pub const DISPLAY_NAME: &str = "胧黑";

// 2024年1月1日
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2,4})年([0-9]{1,2})月([0-9]{1,2})日").unwrap());

// 《游戏名》
static GAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"《([^》]+)》").unwrap());

/// Titles shaped like `【机皇录播】2024年1月1日《游戏A》《游戏B》`.
///
/// Markers match case-sensitively, the year is used as written, and every
/// `《...》` span is one game.
pub fn parse_title(
    title: &str,
    publish_time: i64,
    directory: &LiverDirectory,
) -> Result<TitleFields, Rejection> {
    let liver = directory
        .resolve(title, MatchMode::CaseSensitive)
        .ok_or(Rejection::UnknownLiver)?;

    let live_time = live_time(capture_ymd(&DATE_REGEX, title), publish_time)?;

    let play_game: Vec<String> = GAME_REGEX
        .captures_iter(title)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    if play_game.is_empty() {
        return Err(Rejection::NoGames);
    }

    Ok(TitleFields {
        liver: liver.to_string(),
        live_time,
        play_game,
    })
}

pub struct LongheiParser {
    directory: Arc<LiverDirectory>,
}

impl LongheiParser {
    pub fn new(directory: Arc<LiverDirectory>) -> Self {
        Self { directory }
    }
}

impl Default for LongheiParser {
    fn default() -> Self {
        Self::new(Arc::new(LiverDirectory::default()))
    }
}

#[async_trait]
impl TitleParser for LongheiParser {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::local_midnight_millis;
    use crate::liver::{JIHUANG, KENNY, MR_QUIN};

    const PUBLISHED: i64 = 1_704_200_000_000;

    fn parse(title: &str) -> Result<TitleFields, Rejection> {
        parse_title(title, PUBLISHED, &LiverDirectory::default())
    }

    #[test]
    fn test_parse_full_title() {
        let fields = parse("【机皇录播】2024年1月1日《游戏A》《游戏B》").unwrap();

        assert_eq!(fields.liver, JIHUANG);
        assert_eq!(fields.live_time, local_midnight_millis(2024, 1, 1).unwrap());
        assert_eq!(fields.play_game, vec!["游戏A", "游戏B"]);
    }

    #[test]
    fn test_missing_date_uses_publish_time() {
        let fields = parse("【肯尼录播】《Minecraft》").unwrap();
        assert_eq!(fields.liver, KENNY);
        assert_eq!(fields.live_time, PUBLISHED);
    }

    #[test]
    fn test_year_is_literal() {
        let fields = parse("【Mr.Quin】24年3月5日《A》").unwrap();
        assert_eq!(fields.liver, MR_QUIN);
        assert_eq!(fields.live_time, local_midnight_millis(24, 3, 5).unwrap());
    }

    #[test]
    fn test_games_keep_content() {
        let fields = parse("【机皇录播】《 Elden Ring（DLC） 》 and 《baba is you》").unwrap();
        assert_eq!(fields.play_game, vec![" Elden Ring（DLC） ", "baba is you"]);
    }

    #[test]
    fn test_unknown_liver_rejected() {
        assert_eq!(parse("【路人录播】2024年1月1日《A》"), Err(Rejection::UnknownLiver));
        // markers are case-sensitive for this uploader
        assert_eq!(parse("【mr.quin】《A》"), Err(Rejection::UnknownLiver));
    }

    #[test]
    fn test_no_games_rejected() {
        assert_eq!(parse("【机皇录播】2024年1月1日"), Err(Rejection::NoGames));
        assert_eq!(parse("【机皇录播】2024年1月1日《》"), Err(Rejection::NoGames));
        assert_eq!(parse("【机皇录播】《unterminated"), Err(Rejection::NoGames));
    }

    #[test]
    fn test_invalid_publish_time_rejected() {
        let directory = LiverDirectory::default();
        assert_eq!(
            parse_title("【机皇录播】《A》", i64::MAX, &directory),
            Err(Rejection::InvalidPublishTime)
        );
        // a title date makes the publish time irrelevant
        assert!(parse_title("【机皇录播】2024年1月1日《A》", i64::MAX, &directory).is_ok());
    }

    #[tokio::test]
    async fn test_classify() {
        let parser = LongheiParser::default();
        let item = UnparsedItem::new(1, "BV1", PUBLISHED, "【Quin？机皇！】《A》《B》").with_live_duration(3600);

        let record = parser.classify(&item).await.unwrap();
        assert_eq!(record.item, item);
        assert_eq!(record.liver, JIHUANG);
        assert_eq!(record.live_time, PUBLISHED);
        assert_eq!(record.play_game, vec!["A", "B"]);

        assert_eq!(parser.classify(&item).await, Some(record));
        assert_eq!(parser.uploader_id(), UPLOADER_ID);
        assert_eq!(parser.display_name(), DISPLAY_NAME);
    }

    #[tokio::test]
    async fn test_classify_rejects() {
        let parser = LongheiParser::default();
        let item = UnparsedItem::new(1, "BV1", PUBLISHED, "普通视频《A》");
        assert_eq!(parser.classify(&item).await, None);

        let item = UnparsedItem::new(1, "BV1", i64::MIN, "【机皇录播】《A》");
        assert_eq!(parser.classify(&item).await, None);
    }
}
