use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::model::project::ProjectId;
use crate::model::task::{Comment, CommentId, NewTask, Status, Task, TaskId, TaskPatch};
use crate::model::workspace::Workspace;
use crate::ops::index::{self, AggregateError};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("no such project: {0}")]
    InvalidReference(ProjectId),
    #[error("inconsistent aggregates: {0}")]
    InvariantViolation(#[from] AggregateError),
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

/// Create a task in an existing project. Returns the assigned ID.
pub fn create_task(ws: &mut Workspace, fields: NewTask) -> Result<TaskId, TaskError> {
    if !ws.has_project(fields.project) {
        return Err(TaskError::InvalidReference(fields.project));
    }

    let now = ws.now();
    let id = ws.allocate_task_id();
    let mut task = Task {
        id,
        title: fields.title,
        description: fields.description,
        status: fields.status,
        priority: fields.priority,
        assignee: fields.assignee,
        project: fields.project,
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
        comments: Vec::new(),
    };
    for tag in &fields.tags {
        task.push_tag(tag);
    }

    ws.tasks.push(task);
    if let Err(e) = check_projects(ws, &[fields.project]) {
        ws.tasks.pop();
        error!(task = %id, "rolled back task creation: {}", e);
        return Err(e.into());
    }

    debug!(task = %id, project = %fields.project, "created task");
    Ok(id)
}

/// Remove a task. Returns the removed record.
pub fn delete_task(ws: &mut Workspace, id: TaskId) -> Result<Task, TaskError> {
    let idx = ws.task_index(id).ok_or(TaskError::NotFound(id))?;
    let task = ws.tasks.remove(idx);
    if let Err(e) = check_projects(ws, &[task.project]) {
        ws.tasks.insert(idx, task);
        error!(task = %id, "rolled back task deletion: {}", e);
        return Err(e.into());
    }
    debug!(task = %id, project = %task.project, "deleted task");
    Ok(task)
}

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

/// Change a task's status. Setting the current status again is a no-op.
pub fn set_status(ws: &mut Workspace, id: TaskId, status: Status) -> Result<(), TaskError> {
    update_task(ws, id, |task, _| {
        if task.status == status {
            return false;
        }
        debug!(task = %task.id, from = %task.status, to = %status, "status change");
        task.status = status;
        true
    })
}

/// Append a comment. Returns the comment's ID within the task.
pub fn add_comment(
    ws: &mut Workspace,
    id: TaskId,
    author: &str,
    content: &str,
) -> Result<CommentId, TaskError> {
    let mut comment_id = CommentId(0);
    update_task(ws, id, |task, now| {
        comment_id = task.next_comment_id();
        task.comments.push(Comment {
            id: comment_id,
            author: author.to_string(),
            content: content.to_string(),
            created_at: now,
        });
        true
    })?;
    Ok(comment_id)
}

/// Apply a partial edit. An empty patch changes nothing.
pub fn edit_task(ws: &mut Workspace, id: TaskId, patch: TaskPatch) -> Result<(), TaskError> {
    if patch.is_empty() {
        return if ws.has_task(id) {
            Ok(())
        } else {
            Err(TaskError::NotFound(id))
        };
    }
    update_task(ws, id, |task, _| {
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            task.assignee = assignee;
        }
        if let Some(tags) = patch.tags {
            task.tags.clear();
            for tag in &tags {
                task.push_tag(tag);
            }
        }
        true
    })
}

pub fn add_tag(ws: &mut Workspace, id: TaskId, tag: &str) -> Result<(), TaskError> {
    update_task(ws, id, |task, _| task.push_tag(tag))
}

pub fn remove_tag(ws: &mut Workspace, id: TaskId, tag: &str) -> Result<(), TaskError> {
    update_task(ws, id, |task, _| {
        let before_len = task.tags.len();
        task.tags.retain(|t| t != tag.trim());
        task.tags.len() != before_len
    })
}

/// Re-home a task under another project
pub fn move_task(ws: &mut Workspace, id: TaskId, project: ProjectId) -> Result<(), TaskError> {
    if !ws.has_project(project) {
        return Err(TaskError::InvalidReference(project));
    }
    update_task(ws, id, |task, _| {
        if task.project == project {
            return false;
        }
        debug!(task = %task.id, from = %task.project, to = %project, "moved task");
        task.project = project;
        true
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `apply` against a task. When it reports a change, refresh
/// `updated_at` and re-verify the aggregates of every project involved;
/// on failure the task is restored and nothing is committed.
fn update_task<F>(ws: &mut Workspace, id: TaskId, apply: F) -> Result<(), TaskError>
where
    F: FnOnce(&mut Task, DateTime<Utc>) -> bool,
{
    let now = ws.now();
    let idx = ws.task_index(id).ok_or(TaskError::NotFound(id))?;
    let before = ws.tasks[idx].clone();

    let task = &mut ws.tasks[idx];
    if !apply(task, now) {
        return Ok(());
    }
    task.touch(now);
    let after_project = task.project;

    if let Err(e) = check_projects(ws, &[before.project, after_project]) {
        ws.tasks[idx] = before;
        error!(task = %id, "rolled back task update: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn check_projects(ws: &Workspace, projects: &[ProjectId]) -> Result<(), AggregateError> {
    for &project in projects {
        index::verify_aggregates(ws.tasks(), project)?;
    }
    Ok(())
}
