use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use crate::model::workspace::Workspace;

/// Which screen is currently displayed, with its focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "screen", content = "id", rename_all = "kebab-case")]
pub enum Screen {
    /// Project overview (initial screen)
    #[default]
    Overview,
    /// Status board
    Board,
    /// One task in detail
    ItemDetail(TaskId),
    /// Settings of one project
    ProjectConfig(ProjectId),
}

/// Where a `navigate` intent wants to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", rename_all = "kebab-case")]
pub enum NavTarget {
    Overview,
    Board,
    Task { id: TaskId },
    ProjectConfig { id: ProjectId },
}

/// Error type for navigation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
}

/// Tracks the active screen and validates moves between screens.
///
/// Every transition either succeeds or leaves the screen untouched, so the
/// controller is never in a state that names a missing entity, provided
/// `reconcile` runs after deletions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    screen: Screen,
}

impl Controller {
    pub fn new() -> Self {
        Controller::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focused_task(&self) -> Option<TaskId> {
        match self.screen {
            Screen::ItemDetail(id) => Some(id),
            _ => None,
        }
    }

    pub fn focused_project(&self) -> Option<ProjectId> {
        match self.screen {
            Screen::ProjectConfig(id) => Some(id),
            _ => None,
        }
    }

    pub fn go_overview(&mut self) {
        self.switch(Screen::Overview);
    }

    pub fn go_board(&mut self) {
        self.switch(Screen::Board);
    }

    pub fn open_task(&mut self, ws: &Workspace, id: TaskId) -> Result<(), NavError> {
        if !ws.has_task(id) {
            return Err(NavError::TaskNotFound(id));
        }
        self.switch(Screen::ItemDetail(id));
        Ok(())
    }

    pub fn open_project_config(&mut self, ws: &Workspace, id: ProjectId) -> Result<(), NavError> {
        if !ws.has_project(id) {
            return Err(NavError::ProjectNotFound(id));
        }
        self.switch(Screen::ProjectConfig(id));
        Ok(())
    }

    pub fn navigate(&mut self, ws: &Workspace, target: NavTarget) -> Result<(), NavError> {
        match target {
            NavTarget::Overview => self.go_overview(),
            NavTarget::Board => self.go_board(),
            NavTarget::Task { id } => self.open_task(ws, id)?,
            NavTarget::ProjectConfig { id } => self.open_project_config(ws, id)?,
        }
        Ok(())
    }

    /// Leave a detail screen for the screen it was opened from.
    /// On Overview or Board there is nowhere to go back to.
    pub fn back(&mut self) {
        match self.screen {
            Screen::ItemDetail(_) => self.switch(Screen::Board),
            Screen::ProjectConfig(_) => self.switch(Screen::Overview),
            Screen::Overview | Screen::Board => {}
        }
    }

    /// Drop a focus whose entity no longer exists. Returns true if the
    /// screen changed.
    pub fn reconcile(&mut self, ws: &Workspace) -> bool {
        match self.screen {
            Screen::ItemDetail(id) if !ws.has_task(id) => {
                self.switch(Screen::Board);
                true
            }
            Screen::ProjectConfig(id) if !ws.has_project(id) => {
                self.switch(Screen::Overview);
                true
            }
            _ => false,
        }
    }

    fn switch(&mut self, to: Screen) {
        if self.screen != to {
            debug!(from = ?self.screen, to = ?to, "screen change");
            self.screen = to;
        }
    }
}
