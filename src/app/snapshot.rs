//! Outbound state read by presentation surfaces.
//!
//! A snapshot borrows from the session and carries resolved entities, not
//! bare ids, so a surface never needs its own copy of task or project state.

use serde::Serialize;

use super::view::Screen;
use crate::model::project::{MemberRole, Project};
use crate::model::task::Task;
use crate::model::workspace::Workspace;
use crate::ops::index::{self, BoardColumns, DashboardStats, ProjectStats};

/// A project together with its derived figures
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub stats: ProjectStats,
    pub progress: u8,
}

impl<'a> ProjectCard<'a> {
    pub fn new(ws: &Workspace, project: &'a Project) -> Self {
        let stats = index::project_aggregates(ws, project.id);
        ProjectCard {
            project,
            stats,
            progress: stats.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberView<'a> {
    pub name: &'a str,
    pub role: MemberRole,
}

/// The current screen with everything needed to render it
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum Snapshot<'a> {
    Overview {
        stats: DashboardStats,
        projects: Vec<ProjectCard<'a>>,
    },
    Board {
        search: &'a str,
        columns: BoardColumns<'a>,
    },
    ItemDetail {
        task: &'a Task,
        project: &'a Project,
    },
    ProjectConfig {
        card: ProjectCard<'a>,
        members: Vec<MemberView<'a>>,
    },
}

impl<'a> Snapshot<'a> {
    /// Resolve `screen` against the workspace.
    ///
    /// A focus that no longer resolves falls back to the screen it would
    /// reconcile to, so a detail view of a missing entity is never built.
    pub fn build(ws: &'a Workspace, screen: Screen, search: &'a str) -> Self {
        match screen {
            Screen::Overview => overview(ws),
            Screen::Board => board(ws, search),
            Screen::ItemDetail(id) => {
                let resolved = ws
                    .task(id)
                    .and_then(|task| ws.project(task.project).map(|project| (task, project)));
                match resolved {
                    Some((task, project)) => Snapshot::ItemDetail { task, project },
                    None => board(ws, search),
                }
            }
            Screen::ProjectConfig(id) => match ws.project(id) {
                Some(project) => Snapshot::ProjectConfig {
                    card: ProjectCard::new(ws, project),
                    members: project
                        .members_with_roles()
                        .into_iter()
                        .map(|(name, role)| MemberView { name, role })
                        .collect(),
                },
                None => overview(ws),
            },
        }
    }

    /// The screen this snapshot shows
    pub fn screen(&self) -> Screen {
        match self {
            Snapshot::Overview { .. } => Screen::Overview,
            Snapshot::Board { .. } => Screen::Board,
            Snapshot::ItemDetail { task, .. } => Screen::ItemDetail(task.id),
            Snapshot::ProjectConfig { card, .. } => Screen::ProjectConfig(card.project.id),
        }
    }
}

fn overview(ws: &Workspace) -> Snapshot<'_> {
    Snapshot::Overview {
        stats: index::dashboard_stats(ws),
        projects: ws
            .projects()
            .iter()
            .map(|p| ProjectCard::new(ws, p))
            .collect(),
    }
}

fn board<'a>(ws: &'a Workspace, search: &'a str) -> Snapshot<'a> {
    Snapshot::Board {
        search,
        columns: index::grouped_by_status(ws, search),
    }
}
