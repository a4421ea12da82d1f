use std::fmt;

use serde::{Deserialize, Serialize};

use super::view::{NavTarget, Screen};
use crate::model::project::{NewProject, ProjectId, ProjectPatch};
use crate::model::task::{CommentId, NewTask, Status, TaskId, TaskPatch};

/// A user intent emitted by a presentation surface.
///
/// Serialized with an `intent` tag, e.g.
/// `{"intent": "set-status", "task": 1, "status": "done"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    Navigate { target: NavTarget },
    Back,
    /// Same as navigating to the task
    SelectTask { id: TaskId },
    /// Same as navigating to the project's settings
    SelectProject { id: ProjectId },
    /// Replace the board search term
    Search { term: String },
    SetStatus { task: TaskId, status: Status },
    AddComment { task: TaskId, author: String, content: String },
    CreateTask(NewTask),
    CreateProject(NewProject),
    EditTask { task: TaskId, patch: TaskPatch },
    AddTag { task: TaskId, tag: String },
    RemoveTag { task: TaskId, tag: String },
    MoveTask { task: TaskId, project: ProjectId },
    EditProject { project: ProjectId, patch: ProjectPatch },
    AddMember { project: ProjectId, member: String },
    RemoveMember { project: ProjectId, member: String },
    DeleteTask { id: TaskId },
    DeleteProject { id: ProjectId },
}

/// What an accepted intent did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    Navigated { to: Screen },
    SearchChanged { term: String },
    TaskCreated { id: TaskId },
    ProjectCreated { id: ProjectId },
    CommentAdded { task: TaskId, comment: CommentId },
    TaskUpdated { id: TaskId },
    ProjectUpdated { id: ProjectId },
    TaskDeleted { id: TaskId },
    /// The project and every task it owned
    ProjectDeleted { id: ProjectId, tasks: Vec<TaskId> },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Navigated { to } => match to {
                Screen::Overview => write!(f, "-> overview"),
                Screen::Board => write!(f, "-> board"),
                Screen::ItemDetail(id) => write!(f, "-> task {}", id),
                Screen::ProjectConfig(id) => write!(f, "-> project {} settings", id),
            },
            Outcome::SearchChanged { term } if term.is_empty() => write!(f, "search cleared"),
            Outcome::SearchChanged { term } => write!(f, "search: {}", term),
            Outcome::TaskCreated { id } => write!(f, "created task {}", id),
            Outcome::ProjectCreated { id } => write!(f, "created project {}", id),
            Outcome::CommentAdded { task, comment } => {
                write!(f, "comment {} on task {}", comment, task)
            }
            Outcome::TaskUpdated { id } => write!(f, "updated task {}", id),
            Outcome::ProjectUpdated { id } => write!(f, "updated project {}", id),
            Outcome::TaskDeleted { id } => write!(f, "deleted task {}", id),
            Outcome::ProjectDeleted { id, tasks } => {
                write!(f, "deleted project {} ({} tasks)", id, tasks.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_set_status() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"set-status","task":1,"status":"in-progress"}"#)
                .unwrap();
        assert_eq!(
            intent,
            Intent::SetStatus {
                task: TaskId(1),
                status: Status::InProgress
            }
        );
    }

    #[test]
    fn parses_navigate_target() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"navigate","target":{"to":"project-config","id":2}}"#)
                .unwrap();
        assert_eq!(
            intent,
            Intent::Navigate {
                target: NavTarget::ProjectConfig { id: ProjectId(2) }
            }
        );
    }

    #[test]
    fn parses_create_task_with_defaults() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"create-task","title":"Write docs","project":3}"#)
                .unwrap();
        let Intent::CreateTask(fields) = intent else {
            panic!("expected create-task");
        };
        assert_eq!(fields.title, "Write docs");
        assert_eq!(fields.project, ProjectId(3));
        assert_eq!(fields.status, Status::Todo);
        assert!(fields.tags.is_empty());
    }

    #[test]
    fn parses_back() {
        let intent: Intent = serde_json::from_str(r#"{"intent":"back"}"#).unwrap();
        assert_eq!(intent, Intent::Back);
    }

    #[test]
    fn outcome_display() {
        let outcome = Outcome::ProjectDeleted {
            id: ProjectId(1),
            tasks: vec![TaskId(1), TaskId(2)],
        };
        assert_eq!(outcome.to_string(), "deleted project 1 (2 tasks)");
        let outcome = Outcome::Navigated {
            to: Screen::ItemDetail(TaskId(4)),
        };
        assert_eq!(outcome.to_string(), "-> task 4");
    }
}
