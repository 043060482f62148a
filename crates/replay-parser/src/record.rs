use serde::{Deserialize, Serialize};

/// A video as listed by an uploader, before its title has been classified.
///
/// Field names follow the camelCase layout of the record files this crate
/// reads and writes (`bvId`, `publishTime`, ...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnparsedItem {
    pub aid: i64,
    pub bv_id: String,
    /// Upload time, in epoch milliseconds.
    pub publish_time: i64,
    /// Replay length, in seconds.
    pub live_duration: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<bool>,
}

impl UnparsedItem {
    pub fn new(aid: i64, bv_id: impl Into<String>, publish_time: i64, title: impl Into<String>) -> Self {
        Self {
            aid,
            bv_id: bv_id.into(),
            publish_time,
            live_duration: 0,
            title: title.into(),
            update_time: None,
        }
    }

    pub fn with_live_duration(mut self, seconds: i64) -> Self {
        self.live_duration = seconds;
        self
    }
}

/// A classified live replay.
///
/// Carries every field of the source [`UnparsedItem`] unchanged, plus the
/// broadcast date, the games played and the broadcaster.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecord {
    #[serde(flatten)]
    pub item: UnparsedItem,
    /// Broadcast date in epoch milliseconds. Distinct from `publish_time`.
    pub live_time: i64,
    /// Never empty.
    pub play_game: Vec<String>,
    pub liver: String,
}

impl ParsedRecord {
    pub fn new(item: UnparsedItem, live_time: i64, play_game: Vec<String>, liver: impl Into<String>) -> Self {
        Self {
            item,
            live_time,
            play_game,
            liver: liver.into(),
        }
    }

    /// Expands the record into one row per played game, in `play_game` order.
    pub fn per_game(&self) -> impl Iterator<Item = PlayGameRecord> + '_ {
        self.play_game.iter().map(move |game| PlayGameRecord {
            item: self.item.clone(),
            live_time: self.live_time,
            play_game: game.clone(),
            liver: self.liver.clone(),
        })
    }

    /// Serialize the record to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a record from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A [`ParsedRecord`] narrowed to a single game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayGameRecord {
    #[serde(flatten)]
    pub item: UnparsedItem,
    pub live_time: i64,
    pub play_game: String,
    pub liver: String,
}
