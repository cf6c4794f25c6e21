//! crates/sr_view/src/state.rs
//! View states, transition outcomes and errors.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use sr_core::ClusterId;
use sr_report::UiLabel;

/// What a full-screen map shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapTarget {
    /// Every cluster; spelled `main` on the command line and in markup.
    All,
    Cluster(ClusterId),
}

impl MapTarget {
    pub const MAIN: &'static str = "main";

    /// Ids are matched verbatim; surrounding whitespace is part of the id.
    pub fn parse(s: &str) -> Result<Self, ViewError> {
        if s == Self::MAIN {
            return Ok(MapTarget::All);
        }
        s.parse::<ClusterId>()
            .map(MapTarget::Cluster)
            .map_err(|_| ViewError::InvalidTarget(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            MapTarget::All => Self::MAIN,
            MapTarget::Cluster(id) => id.as_str(),
        }
    }

    pub fn cluster(&self) -> Option<&ClusterId> {
        match self {
            MapTarget::All => None,
            MapTarget::Cluster(id) => Some(id),
        }
    }
}

impl fmt::Display for MapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Overview,
    FullScreenMap { target: MapTarget },
}

impl ViewState {
    pub fn is_overview(&self) -> bool {
        matches!(self, ViewState::Overview)
    }

    pub fn target(&self) -> Option<&MapTarget> {
        match self {
            ViewState::Overview => None,
            ViewState::FullScreenMap { target } => Some(target),
        }
    }
}

/// Dismissable, user-facing message; `text` is already localized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    #[serde(skip)]
    pub label: UiLabel,
    pub text: String,
}

/// Outcome of an accepted request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Entered(MapTarget),
    Returned,
    /// Request declined without a state change.
    Refused(Notice),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("no full-screen map is open")]
    NotInFullScreen,
    #[error("full-screen map already open for {0}; go back first")]
    AlreadyFullScreen(MapTarget),
    #[error("unknown cluster id: {0}")]
    UnknownCluster(ClusterId),
    #[error("invalid map target: {0:?}")]
    InvalidTarget(String),
}
