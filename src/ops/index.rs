//! Read-only queries over a workspace's tasks.
//!
//! Every query is a full scan in insertion order; nothing is cached, so a
//! query always reflects the latest committed mutation.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::model::project::ProjectId;
use crate::model::task::{Status, Task};
use crate::model::workspace::Workspace;

/// Board columns keyed by status, always holding all four statuses in
/// column order, empty columns included
pub type BoardColumns<'a> = IndexMap<Status, Vec<&'a Task>>;

/// Aggregates derived from the tasks of one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectStats {
    pub task_count: usize,
    pub completed_tasks: usize,
}

/// Raised when aggregates come out inconsistent. Indicates a logic fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("project {project}: {completed} completed tasks exceeds {total} total")]
pub struct AggregateError {
    pub project: ProjectId,
    pub total: usize,
    pub completed: usize,
}

impl ProjectStats {
    /// Build stats, rejecting `completed > total`
    pub fn checked(
        project: ProjectId,
        total: usize,
        completed: usize,
    ) -> Result<Self, AggregateError> {
        if completed > total {
            return Err(AggregateError {
                project,
                total,
                completed,
            });
        }
        Ok(ProjectStats {
            task_count: total,
            completed_tasks: completed,
        })
    }

    /// Tasks not yet done
    pub fn open_tasks(&self) -> usize {
        self.task_count - self.completed_tasks
    }

    /// Rounded completion percentage; 0 for a project without tasks
    pub fn progress_percent(&self) -> u8 {
        if self.task_count == 0 {
            return 0;
        }
        let pct = (self.completed_tasks as f64 / self.task_count as f64 * 100.0).round();
        pct as u8
    }
}

/// Header figures of the overview screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    /// Tasks not yet done, across all projects
    pub active_tasks: usize,
    pub completed_tasks: usize,
    /// Distinct member names across all projects
    pub team_members: usize,
}

/// A compiled search term.
///
/// Matches a case-insensitive literal substring of the title or the
/// description. The empty term matches everything.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    re: Option<Regex>,
    lowered: String,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        let re = if term.is_empty() {
            None
        } else {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
                .ok()
        };
        SearchQuery {
            re,
            lowered: term.to_lowercase(),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        match &self.re {
            Some(re) => re.is_match(&task.title) || re.is_match(&task.description),
            // Oversized terms fail to compile; fall back to a plain scan
            None => {
                task.title.to_lowercase().contains(&self.lowered)
                    || task.description.to_lowercase().contains(&self.lowered)
            }
        }
    }
}

/// All tasks with the given status, in insertion order
pub fn by_status(ws: &Workspace, status: Status) -> Vec<&Task> {
    ws.tasks().iter().filter(|t| t.status == status).collect()
}

/// Tasks whose title or description contains `term`, ignoring case
pub fn search<'a>(ws: &'a Workspace, term: &str) -> Vec<&'a Task> {
    let query = SearchQuery::new(term);
    ws.tasks().iter().filter(|t| query.matches(t)).collect()
}

/// Search results split into the four board columns
pub fn grouped_by_status<'a>(ws: &'a Workspace, term: &str) -> BoardColumns<'a> {
    let mut columns: BoardColumns<'a> = Status::ALL
        .into_iter()
        .map(|status| (status, Vec::new()))
        .collect();
    for task in search(ws, term) {
        columns.entry(task.status).or_default().push(task);
    }
    columns
}

/// Tasks belonging to one project, in insertion order
pub fn tasks_for_project(ws: &Workspace, project: ProjectId) -> Vec<&Task> {
    ws.tasks().iter().filter(|t| t.project == project).collect()
}

/// Task totals for a project, recomputed from the task collection.
/// An unknown project has no tasks.
pub fn project_aggregates(ws: &Workspace, project: ProjectId) -> ProjectStats {
    let (total, completed) = count_tasks(ws.tasks(), project);
    ProjectStats {
        task_count: total,
        completed_tasks: completed,
    }
}

/// Recompute a project's aggregates over `tasks`, failing if they are inconsistent
pub fn verify_aggregates(tasks: &[Task], project: ProjectId) -> Result<ProjectStats, AggregateError> {
    let (total, completed) = count_tasks(tasks, project);
    ProjectStats::checked(project, total, completed)
}

fn count_tasks(tasks: &[Task], project: ProjectId) -> (usize, usize) {
    tasks
        .iter()
        .filter(|t| t.project == project)
        .fold((0, 0), |(total, done), t| {
            (total + 1, done + usize::from(t.status.is_done()))
        })
}

/// Overview header figures
pub fn dashboard_stats(ws: &Workspace) -> DashboardStats {
    let completed = ws.tasks().iter().filter(|t| t.status.is_done()).count();
    let members: HashSet<&str> = ws
        .projects()
        .iter()
        .flat_map(|p| p.members.iter().map(|m| m.as_str()))
        .collect();
    DashboardStats {
        total_projects: ws.projects().len(),
        active_tasks: ws.tasks().len() - completed,
        completed_tasks: completed,
        team_members: members.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::NewProject;
    use crate::model::task::{NewTask, TaskId};
    use crate::ops::{project_ops, task_ops};
    use pretty_assertions::assert_eq;

    fn sample_workspace() -> Workspace {
        let mut ws = Workspace::new();
        let web = project_ops::create_project(
            &mut ws,
            NewProject {
                name: "Website Redesign".into(),
                members: vec!["Alice".into(), "Bob".into()],
                ..Default::default()
            },
            Default::default(),
        );
        let mobile = project_ops::create_project(
            &mut ws,
            NewProject {
                name: "Mobile App".into(),
                members: vec!["Bob".into(), "Eve".into()],
                ..Default::default()
            },
            Default::default(),
        );
        let specs = [
            ("Design homepage", "Wireframes and mockups", Status::InProgress, web),
            ("User authentication", "Login and registration", Status::Todo, web),
            ("Mobile wireframes", "Design for iOS", Status::Review, mobile),
            ("CI/CD pipeline", "Automated testing", Status::Done, mobile),
            ("Landing copy", "Hero text", Status::Todo, web),
        ];
        for (title, description, status, project) in specs {
            task_ops::create_task(
                &mut ws,
                NewTask {
                    title: title.into(),
                    description: description.into(),
                    status,
                    project,
                    ..Default::default()
                },
            )
            .unwrap();
        }
        ws
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn by_status_keeps_insertion_order() {
        let ws = sample_workspace();
        let todo = by_status(&ws, Status::Todo);
        assert_eq!(ids(&todo), vec![2, 5]);
        // Stable across calls
        assert_eq!(ids(&by_status(&ws, Status::Todo)), ids(&todo));
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let ws = sample_workspace();
        assert_eq!(ids(&search(&ws, "DESIGN")), vec![1, 3]);
        assert_eq!(ids(&search(&ws, "automated")), vec![4]);
    }

    #[test]
    fn search_empty_term_matches_all() {
        let ws = sample_workspace();
        assert_eq!(search(&ws, "").len(), ws.tasks().len());
    }

    #[test]
    fn search_no_match_is_empty() {
        let ws = sample_workspace();
        assert!(search(&ws, "zzzznotfound").is_empty());
    }

    #[test]
    fn search_treats_regex_metacharacters_literally() {
        let ws = sample_workspace();
        assert_eq!(ids(&search(&ws, "ci/cd")), vec![4]);
        assert!(search(&ws, ".*").is_empty());
    }

    #[test]
    fn grouped_has_every_column_even_when_empty() {
        let ws = sample_workspace();
        let columns = grouped_by_status(&ws, "wireframes");
        let keys: Vec<Status> = columns.keys().copied().collect();
        assert_eq!(keys, Status::ALL.to_vec());
        assert!(columns[&Status::Todo].is_empty());
        assert_eq!(ids(&columns[&Status::Review]), vec![3]);
        assert_eq!(ids(&columns[&Status::InProgress]), vec![1]);
    }

    #[test]
    fn grouped_on_empty_workspace_has_four_empty_columns() {
        let ws = Workspace::new();
        let columns = grouped_by_status(&ws, "");
        assert_eq!(columns.len(), 4);
        assert!(columns.values().all(|c| c.is_empty()));
    }

    #[test]
    fn aggregates_follow_status_changes() {
        let mut ws = sample_workspace();
        let web = ProjectId(1);
        assert_eq!(
            project_aggregates(&ws, web),
            ProjectStats {
                task_count: 3,
                completed_tasks: 0
            }
        );
        task_ops::set_status(&mut ws, TaskId(2), Status::Done).unwrap();
        assert_eq!(project_aggregates(&ws, web).completed_tasks, 1);
        task_ops::set_status(&mut ws, TaskId(2), Status::Review).unwrap();
        assert_eq!(project_aggregates(&ws, web).completed_tasks, 0);
    }

    #[test]
    fn aggregates_for_unknown_project_are_zero() {
        let ws = sample_workspace();
        assert_eq!(project_aggregates(&ws, ProjectId(99)), ProjectStats::default());
    }

    #[test]
    fn checked_stats_reject_more_completed_than_total() {
        let err = ProjectStats::checked(ProjectId(1), 2, 3).unwrap_err();
        assert_eq!(err.completed, 3);
        assert!(ProjectStats::checked(ProjectId(1), 3, 3).is_ok());
    }

    #[test]
    fn progress_percent_rounds_and_handles_zero() {
        let stats = ProjectStats {
            task_count: 3,
            completed_tasks: 2,
        };
        assert_eq!(stats.progress_percent(), 67);
        assert_eq!(stats.open_tasks(), 1);
        assert_eq!(ProjectStats::default().progress_percent(), 0);
    }

    #[test]
    fn dashboard_counts_distinct_members() {
        let ws = sample_workspace();
        let stats = dashboard_stats(&ws);
        assert_eq!(
            stats,
            DashboardStats {
                total_projects: 2,
                active_tasks: 4,
                completed_tasks: 1,
                team_members: 3,
            }
        );
    }

    #[test]
    fn tasks_for_project_filters_by_owner() {
        let ws = sample_workspace();
        assert_eq!(ids(&tasks_for_project(&ws, ProjectId(2))), vec![3, 4]);
    }
}
