use tracing::debug;

use crate::model::project::{ColorTag, NewProject, Project, ProjectId, ProjectPatch};
use crate::model::task::TaskId;
use crate::model::workspace::Workspace;

/// Error type for project operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    #[error("{member} is not a member of project {project}")]
    MemberNotFound { project: ProjectId, member: String },
}

/// What a project deletion removed
#[derive(Debug, Clone)]
pub struct DeletedProject {
    pub project: Project,
    /// Tasks removed along with the project, in their former order
    pub tasks: Vec<TaskId>,
}

/// Create a project. `default_color` applies when the fields name none.
pub fn create_project(ws: &mut Workspace, fields: NewProject, default_color: ColorTag) -> ProjectId {
    let id = ws.allocate_project_id();
    ws.projects.push(Project {
        id,
        name: fields.name,
        description: fields.description,
        color: fields.color.unwrap_or(default_color),
        members: fields.members,
    });
    debug!(project = %id, "created project");
    id
}

/// Update name, description or colour
pub fn edit_project(ws: &mut Workspace, id: ProjectId, patch: ProjectPatch) -> Result<(), ProjectError> {
    let project = project_mut(ws, id)?;
    if let Some(name) = patch.name {
        project.name = name;
    }
    if let Some(description) = patch.description {
        project.description = description;
    }
    if let Some(color) = patch.color {
        project.color = color;
    }
    debug!(project = %id, "edited project");
    Ok(())
}

/// Append a member. Duplicates are accepted as given.
pub fn add_member(ws: &mut Workspace, id: ProjectId, member: &str) -> Result<(), ProjectError> {
    let project = project_mut(ws, id)?;
    project.members.push(member.to_string());
    Ok(())
}

/// Remove the first member with this name
pub fn remove_member(ws: &mut Workspace, id: ProjectId, member: &str) -> Result<(), ProjectError> {
    let project = project_mut(ws, id)?;
    let pos = project
        .members
        .iter()
        .position(|m| m == member)
        .ok_or_else(|| ProjectError::MemberNotFound {
            project: id,
            member: member.to_string(),
        })?;
    project.members.remove(pos);
    Ok(())
}

/// Delete a project together with all of its tasks.
///
/// The cascade is a single step: either the project and every task that
/// references it are gone, or (on `NotFound`) nothing changed.
pub fn delete_project(ws: &mut Workspace, id: ProjectId) -> Result<DeletedProject, ProjectError> {
    let idx = ws.project_index(id).ok_or(ProjectError::NotFound(id))?;
    let project = ws.projects.remove(idx);

    let tasks: Vec<TaskId> = ws
        .tasks
        .iter()
        .filter(|t| t.project == id)
        .map(|t| t.id)
        .collect();
    ws.tasks.retain(|t| t.project != id);

    debug!(project = %id, cascaded = tasks.len(), "deleted project");
    Ok(DeletedProject { project, tasks })
}

fn project_mut(ws: &mut Workspace, id: ProjectId) -> Result<&mut Project, ProjectError> {
    let idx = ws.project_index(id).ok_or(ProjectError::NotFound(id))?;
    Ok(&mut ws.projects[idx])
}
