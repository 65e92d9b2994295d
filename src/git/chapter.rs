//! Chapter branches: remote-tracking branches named `<number>-<slug>`.

use std::fmt;

use regex::Regex;
use serde::Serialize;

/// A remote-tracking branch whose short name starts with a chapter number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterBranch {
    /// Leading digits of `name`
    pub chapter: u32,
    /// Short branch name without the remote prefix, e.g. `4-functions`
    pub name: String,
}

impl fmt::Display for ChapterBranch {
    /// `NN name`, chapter zero-padded to two digits (wider numbers are not truncated)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {}", self.chapter, self.name)
    }
}

/// Matches `git branch -a` lines for one remote's chapter branches.
#[derive(Debug, Clone)]
pub struct ChapterPattern {
    re: Regex,
}

impl ChapterPattern {
    pub fn new(remote: &str) -> Result<Self, regex::Error> {
        let pattern = format!(r"^  remotes/{}/(([0-9]+)-.+)$", regex::escape(remote));
        Ok(Self {
            re: Regex::new(&pattern)?,
        })
    }

    /// Parse one line of `git branch -a` output.
    ///
    /// Local branches, the `* current` marker, other remotes and the
    /// `HEAD -> ...` symref line all return `None`.
    pub fn parse_line(&self, line: &str) -> Option<ChapterBranch> {
        let caps = self.re.captures(line)?;
        let name = &caps[1];
        let chapter = match caps[2].parse() {
            Ok(chapter) => chapter,
            Err(e) => {
                log::debug!("Skipping {name}: chapter number out of range ({e})");
                return None;
            }
        };
        Some(ChapterBranch {
            chapter,
            name: name.to_string(),
        })
    }

    /// Chapter branches in `listing` numbered strictly above `after`.
    ///
    /// Order follows `listing`; nothing is re-sorted.
    pub fn chapters_after(&self, listing: &str, after: u32) -> Vec<ChapterBranch> {
        listing
            .lines()
            .filter_map(|line| self.parse_line(line))
            .filter(|branch| branch.chapter > after)
            .collect()
    }
}
