use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable project identifier, unique for the lifetime of a workspace
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accent colour of a project. Presentation hint only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    #[default]
    Purple,
    Blue,
    Green,
    Orange,
    Red,
    Pink,
}

impl ColorTag {
    pub const PALETTE: [ColorTag; 6] = [
        ColorTag::Purple,
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Orange,
        ColorTag::Red,
        ColorTag::Pink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorTag::Purple => "purple",
            ColorTag::Blue => "blue",
            ColorTag::Green => "green",
            ColorTag::Orange => "orange",
            ColorTag::Red => "red",
            ColorTag::Pink => "pink",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorTag::PALETTE
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown color: {}", s))
    }
}

/// Role of a member within a project. The first member administers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

/// A project grouping tasks.
///
/// Task counts are not stored here: they are derived from the task
/// collection on demand (see `ops::index::project_aggregates`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub color: ColorTag,
    /// Display names in order. Duplicates are the caller's business.
    pub members: Vec<String>,
}

impl Project {
    pub fn member_role(&self, index: usize) -> Option<MemberRole> {
        if index >= self.members.len() {
            None
        } else if index == 0 {
            Some(MemberRole::Admin)
        } else {
            Some(MemberRole::Member)
        }
    }

    /// Members paired with their roles, in order
    pub fn members_with_roles(&self) -> Vec<(&str, MemberRole)> {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(i, name)| self.member_role(i).map(|role| (name.as_str(), role)))
            .collect()
    }
}

/// Fields for creating a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Falls back to the configured default colour
    #[serde(default)]
    pub color: Option<ColorTag>,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Partial update of a project's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<ColorTag>,
}
