use std::fmt;

use serde::Serialize;
use tracing::{debug, error, warn};

use super::intent::{Intent, Outcome};
use super::snapshot::Snapshot;
use super::view::{Controller, NavError, NavTarget, Screen};
use crate::model::config::TrackerConfig;
use crate::model::project::ColorTag;
use crate::model::workspace::Workspace;
use crate::ops::project_ops::{self, ProjectError};
use crate::ops::task_ops::{self, TaskError};

/// Broad classification of a rejected intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The target id does not exist; the session is unchanged
    NotFound,
    /// A new or moved task names a missing project
    InvalidReference,
    /// Aggregates came out inconsistent; the mutation was rolled back
    InvariantViolation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::InvalidReference => "invalid-reference",
            ErrorKind::InvariantViolation => "invariant-violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for intents applied to a session
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error(transparent)]
    Nav(#[from] NavError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Project(#[from] ProjectError),
}

impl IntentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntentError::Nav(_) => ErrorKind::NotFound,
            IntentError::Task(TaskError::NotFound(_)) => ErrorKind::NotFound,
            IntentError::Task(TaskError::InvalidReference(_)) => ErrorKind::InvalidReference,
            IntentError::Task(TaskError::InvariantViolation(_)) => ErrorKind::InvariantViolation,
            IntentError::Project(_) => ErrorKind::NotFound,
        }
    }
}

/// One user session: the workspace, the screen controller and the board
/// search term.
///
/// All mutation goes through [`Session::apply`], which reconciles the
/// controller right after every deletion, so a snapshot never shows a
/// detail view of a deleted entity.
#[derive(Debug, Default)]
pub struct Session {
    workspace: Workspace,
    controller: Controller,
    search: String,
    default_color: ColorTag,
}

impl Session {
    pub fn new(workspace: Workspace) -> Self {
        Session {
            workspace,
            ..Session::default()
        }
    }

    /// A session over `workspace` using the configured board search and
    /// project colour defaults
    pub fn with_config(workspace: Workspace, config: &TrackerConfig) -> Self {
        Session {
            workspace,
            controller: Controller::new(),
            search: config.board.search.clone(),
            default_color: config.projects.default_color,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Current screen with resolved payloads
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::build(&self.workspace, self.controller.screen(), &self.search)
    }

    /// Apply one intent. A rejected intent leaves the session exactly as it was.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome, IntentError> {
        let result = self.dispatch(intent);
        match &result {
            Ok(outcome) => debug!(%outcome, "intent applied"),
            Err(e) => match e.kind() {
                ErrorKind::InvariantViolation => error!(error = %e, "intent aborted"),
                _ => warn!(error = %e, "intent rejected"),
            },
        }
        result
    }

    fn dispatch(&mut self, intent: Intent) -> Result<Outcome, IntentError> {
        let ws = &mut self.workspace;
        let outcome = match intent {
            Intent::Navigate { target } => {
                self.controller.navigate(ws, target)?;
                self.navigated()
            }
            Intent::Back => {
                self.controller.back();
                self.navigated()
            }
            Intent::SelectTask { id } => {
                self.controller.navigate(ws, NavTarget::Task { id })?;
                self.navigated()
            }
            Intent::SelectProject { id } => {
                self.controller
                    .navigate(ws, NavTarget::ProjectConfig { id })?;
                self.navigated()
            }
            Intent::Search { term } => {
                self.search = term.clone();
                Outcome::SearchChanged { term }
            }
            Intent::SetStatus { task, status } => {
                task_ops::set_status(ws, task, status)?;
                Outcome::TaskUpdated { id: task }
            }
            Intent::AddComment {
                task,
                author,
                content,
            } => {
                let comment = task_ops::add_comment(ws, task, &author, &content)?;
                Outcome::CommentAdded { task, comment }
            }
            Intent::CreateTask(fields) => {
                let id = task_ops::create_task(ws, fields)?;
                Outcome::TaskCreated { id }
            }
            Intent::CreateProject(fields) => {
                let id = project_ops::create_project(ws, fields, self.default_color);
                Outcome::ProjectCreated { id }
            }
            Intent::EditTask { task, patch } => {
                task_ops::edit_task(ws, task, patch)?;
                Outcome::TaskUpdated { id: task }
            }
            Intent::AddTag { task, tag } => {
                task_ops::add_tag(ws, task, &tag)?;
                Outcome::TaskUpdated { id: task }
            }
            Intent::RemoveTag { task, tag } => {
                task_ops::remove_tag(ws, task, &tag)?;
                Outcome::TaskUpdated { id: task }
            }
            Intent::MoveTask { task, project } => {
                task_ops::move_task(ws, task, project)?;
                Outcome::TaskUpdated { id: task }
            }
            Intent::EditProject { project, patch } => {
                project_ops::edit_project(ws, project, patch)?;
                Outcome::ProjectUpdated { id: project }
            }
            Intent::AddMember { project, member } => {
                project_ops::add_member(ws, project, &member)?;
                Outcome::ProjectUpdated { id: project }
            }
            Intent::RemoveMember { project, member } => {
                project_ops::remove_member(ws, project, &member)?;
                Outcome::ProjectUpdated { id: project }
            }
            Intent::DeleteTask { id } => {
                task_ops::delete_task(ws, id)?;
                self.controller.reconcile(ws);
                Outcome::TaskDeleted { id }
            }
            Intent::DeleteProject { id } => {
                let deleted = project_ops::delete_project(ws, id)?;
                self.controller.reconcile(ws);
                Outcome::ProjectDeleted {
                    id,
                    tasks: deleted.tasks,
                }
            }
        };
        Ok(outcome)
    }

    fn navigated(&self) -> Outcome {
        Outcome::Navigated {
            to: self.controller.screen(),
        }
    }
}
