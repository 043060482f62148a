//! Broadcaster lookup by title marker.
//!
//! A [`LiverDirectory`] is an ordered table of `(marker, canonical name)`
//! pairs. Resolution walks the table front to back and returns the first
//! marker contained in the title, so a more specific marker must be listed
//! before a more general one that could match the same title.

use std::borrow::Cow;

pub const MR_QUIN: &str = "Mr.Quin";
pub const KENNY: &str = "机智的肯尼";
pub const LEFTOVERS: &str = "北极熊剩饭";
pub const JIHUANG: &str = "机皇";

/// Built-in markers, in match order.
pub static DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("【机皇录播】", JIHUANG),
    ("【Quin？机皇！】", JIHUANG),
    ("【肯尼录播】", KENNY),
    ("【剩饭录播】", LEFTOVERS),
    ("【quin录播】", MR_QUIN),
    ("【Mr.Quin】", MR_QUIN),
];

/// How markers are compared against a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    CaseSensitive,
    /// Both sides are lowercased before the containment check.
    CaseInsensitive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiverEntry {
    pub marker: Cow<'static, str>,
    pub name: Cow<'static, str>,
}

impl LiverEntry {
    pub fn new(marker: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            marker: marker.into(),
            name: name.into(),
        }
    }
}

/// Ordered, read-only marker table shared by every parser entry.
#[derive(Debug, Clone)]
pub struct LiverDirectory {
    entries: Vec<LiverEntry>,
    /// Lowercased markers, index-aligned with `entries`.
    folded: Vec<String>,
}

impl Default for LiverDirectory {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTRIES
                .iter()
                .map(|&(marker, name)| LiverEntry::new(marker, name))
                .collect(),
        )
    }
}

impl LiverDirectory {
    pub fn new(entries: Vec<LiverEntry>) -> Self {
        let folded = entries.iter().map(|e| e.marker.to_lowercase()).collect();
        Self { entries, folded }
    }

    /// The built-in table followed by `extra`. Appended entries are only
    /// consulted when no built-in marker matches.
    pub fn with_extra(extra: impl IntoIterator<Item = LiverEntry>) -> Self {
        let mut entries = Self::default().entries;
        entries.extend(extra);
        Self::new(entries)
    }

    pub fn entries(&self) -> &[LiverEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the canonical name of the first marker found in `title`.
    pub fn resolve(&self, title: &str, mode: MatchMode) -> Option<&str> {
        match mode {
            MatchMode::CaseSensitive => self
                .entries
                .iter()
                .find(|e| title.contains(&*e.marker))
                .map(|e| &*e.name),
            MatchMode::CaseInsensitive => {
                let title = title.to_lowercase();
                self.folded
                    .iter()
                    .position(|marker| title.contains(marker.as_str()))
                    .map(|i| &*self.entries[i].name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_case_sensitive() {
        let directory = LiverDirectory::default();

        assert_eq!(
            directory.resolve("【机皇录播】2024年1月1日《A》", MatchMode::CaseSensitive),
            Some(JIHUANG)
        );
        assert_eq!(
            directory.resolve("【剩饭录播】 24-1-1 A", MatchMode::CaseSensitive),
            Some(LEFTOVERS)
        );
        assert_eq!(directory.resolve("【mr.quin】", MatchMode::CaseSensitive), None);
        assert_eq!(directory.resolve("随便一个标题", MatchMode::CaseSensitive), None);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let directory = LiverDirectory::default();

        assert_eq!(
            directory.resolve("【mr.quin】 24-1-1 A", MatchMode::CaseInsensitive),
            Some(MR_QUIN)
        );
        assert_eq!(
            directory.resolve("【QUIN录播】 24-1-1 A", MatchMode::CaseInsensitive),
            Some(MR_QUIN)
        );
    }

    #[test]
    fn test_case_insensitive_extra_marker() {
        let directory = LiverDirectory::with_extra([LiverEntry::new("【NewGuy录播】", "new guy")]);
        assert_eq!(
            directory.resolve("【newguy录播】 24-1-1 A", MatchMode::CaseInsensitive),
            Some("new guy")
        );
        assert_eq!(
            directory.resolve("【newguy录播】 24-1-1 A", MatchMode::CaseSensitive),
            None
        );
    }

    #[test]
    fn test_first_match_wins() {
        let directory = LiverDirectory::new(vec![
            LiverEntry::new("【Quin？机皇！】", "first"),
            LiverEntry::new("机皇", "second"),
        ]);
        assert_eq!(
            directory.resolve("【Quin？机皇！】 《A》", MatchMode::CaseSensitive),
            Some("first")
        );
        assert_eq!(
            directory.resolve("机皇的直播", MatchMode::CaseSensitive),
            Some("second")
        );
    }

    #[test]
    fn test_extra_entries_come_last() {
        let directory = LiverDirectory::with_extra([
            LiverEntry::new("【机皇录播】", "shadowed"),
            LiverEntry::new("【新人录播】", "新人"),
        ]);

        assert_eq!(directory.len(), DEFAULT_ENTRIES.len() + 2);
        assert_eq!(
            directory.resolve("【机皇录播】《A》", MatchMode::CaseSensitive),
            Some(JIHUANG)
        );
        assert_eq!(
            directory.resolve("【新人录播】《A》", MatchMode::CaseSensitive),
            Some("新人")
        );
    }

    #[test]
    fn test_empty_directory() {
        let directory = LiverDirectory::new(Vec::new());
        assert!(directory.is_empty());
        assert_eq!(directory.resolve("【机皇录播】", MatchMode::CaseInsensitive), None);
    }
}
