//! Extracts live replay records from uploader video titles.
//!
//! Replay uploaders each follow their own naming convention, so every
//! uploader gets a [`TitleParser`] with its own rules. A parser either turns
//! an [`UnparsedItem`] into a [`ParsedRecord`] (broadcaster, broadcast date,
//! games played) or rejects it. The [`ParserRegistry`] dispatches by
//! uploader id.
//!
//! ```rust
//! use replay_parser::{ParserRegistry, UnparsedItem};
//!
//! let registry = ParserRegistry::with_defaults();
//! let item = UnparsedItem::new(1, "BV1", 1_704_153_600_000, "【机皇录播】2024年1月1日《游戏A》《游戏B》");
//!
//! let record = futures::executor::block_on(registry.classify(245335, &item))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(record.liver, "机皇");
//! assert_eq!(record.play_game, vec!["游戏A", "游戏B"]);
//! ```

pub mod date;
pub mod error;
pub mod liver;
pub mod parser;
pub mod record;
pub mod registry;

pub use error::ParserError;
pub use liver::{LiverDirectory, LiverEntry, MatchMode};
pub use parser::{LongheiParser, Rejection, TitleParser, ZixingcheParser};
pub use record::{ParsedRecord, PlayGameRecord, UnparsedItem};
pub use registry::ParserRegistry;
