//! Sort direction and sort state.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "descending")]
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// The active sort: one field plus a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortState {
    /// Creates a new ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortState {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortState {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new sort with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortState {
            field: field.into(),
            dir,
        }
    }
}

/// Parses `field`, `field:asc` or `field:desc`.
///
/// ```
/// use roster_engine::{Dir, SortState};
///
/// let sort: SortState = "name:desc".parse().unwrap();
/// assert_eq!(sort, SortState::new("name", Dir::Desc));
/// assert_eq!("joined".parse::<SortState>().unwrap().dir, Dir::Asc);
/// ```
impl FromStr for SortState {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.split_once(':') {
            Some((field, dir)) => (field.trim(), dir.trim().parse()?),
            None => (s.trim(), Dir::Asc),
        };
        if field.is_empty() {
            return Err(EngineError::InvalidSort(s.to_string()));
        }
        Ok(SortState::new(field, dir))
    }
}

impl std::fmt::Display for SortState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Greater), Ordering::Greater);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);

        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display_and_parse() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
        assert_eq!("DESC".parse::<Dir>(), Ok(Dir::Desc));
        assert_eq!("ascending".parse::<Dir>(), Ok(Dir::Asc));
        assert_eq!(
            "sideways".parse::<Dir>(),
            Err(EngineError::InvalidDirection("sideways".into()))
        );
    }

    #[test]
    fn sort_constructors() {
        let asc = SortState::asc("name");
        assert_eq!(asc.field, "name");
        assert_eq!(asc.dir, Dir::Asc);

        let desc = SortState::desc("joined");
        assert_eq!(desc.dir, Dir::Desc);
        assert_eq!(desc.to_string(), "joined:desc");
    }

    #[test]
    fn sort_parse_errors() {
        assert!(matches!(
            ":desc".parse::<SortState>(),
            Err(EngineError::InvalidSort(_))
        ));
        assert!(matches!(
            "name:up".parse::<SortState>(),
            Err(EngineError::InvalidDirection(_))
        ));
    }
}
