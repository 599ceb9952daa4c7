//! Sort and filter settings for the note list

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field notes are ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CreatedAt,
    #[default]
    UpdatedAt,
    Title,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "createdat" | "created" => Ok(Self::CreatedAt),
            "updatedat" | "updated" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Sort settings. Defaults to most recently updated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SortSpec {
    pub by: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub const fn new(by: SortKey, order: SortOrder) -> Self {
        Self { by, order }
    }

    /// Override the fields present in `patch`
    pub fn merge(&mut self, patch: SortPatch) {
        if let Some(by) = patch.by {
            self.by = by;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.by.as_str(), self.order.as_str())
    }
}

/// Parses `by:order` (e.g. `title:asc`). A bare field uses descending order.
impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (by, order) = s.split_once(':').unwrap_or((s, "desc"));
        Ok(Self::new(by.parse()?, order.parse()?))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortPatch {
    pub by: Option<SortKey>,
    pub order: Option<SortOrder>,
}

/// List filter flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Only archived notes are listed
    #[serde(default)]
    pub show_archived: bool,
    /// Only pinned notes are listed
    #[serde(default)]
    pub show_pinned_only: bool,
}

impl FilterSpec {
    /// Override the fields present in `patch`
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(show_archived) = patch.show_archived {
            self.show_archived = show_archived;
        }
        if let Some(show_pinned_only) = patch.show_pinned_only {
            self.show_pinned_only = show_pinned_only;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterPatch {
    pub show_archived: Option<bool>,
    pub show_pinned_only: Option<bool>,
}

/// The three list views offered by the sidebar chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterView {
    #[default]
    All,
    Pinned,
    Archived,
}

impl FilterView {
    /// Which chip is active for a filter; pinned wins when both flags are set
    #[must_use]
    pub const fn from_filter(filter: FilterSpec) -> Self {
        if filter.show_pinned_only {
            Self::Pinned
        } else if filter.show_archived {
            Self::Archived
        } else {
            Self::All
        }
    }

    /// Patch that selects this view exclusively
    #[must_use]
    pub const fn to_patch(self) -> FilterPatch {
        FilterPatch {
            show_archived: Some(matches!(self, Self::Archived)),
            show_pinned_only: Some(matches!(self, Self::Pinned)),
        }
    }
}
