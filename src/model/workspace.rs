use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

use super::project::{Project, ProjectId};
use super::task::{Task, TaskId};

/// Source of "now" for timestamps
#[derive(Debug, Clone, Default)]
pub enum Clock {
    #[default]
    System,
    /// Pinned time, moved only by `set`/`advance`
    Manual(Cell<DateTime<Utc>>),
}

impl Clock {
    pub fn manual(at: DateTime<Utc>) -> Self {
        Clock::Manual(Cell::new(at))
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Manual(at) => at.get(),
        }
    }

    /// Move a manual clock to `at`. No effect on the system clock.
    pub fn set(&self, at: DateTime<Utc>) {
        if let Clock::Manual(cell) = self {
            cell.set(at);
        }
    }

    /// Move a manual clock forward. No effect on the system clock.
    pub fn advance(&self, by: Duration) {
        if let Clock::Manual(cell) = self {
            cell.set(cell.get() + by);
        }
    }
}

/// The in-memory collection of projects and tasks for one session.
///
/// Reads are public. Mutation goes through `ops::*`, which keep the
/// cross-entity invariants (project references, aggregates, id uniqueness).
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub(crate) projects: Vec<Project>,
    pub(crate) tasks: Vec<Task>,
    next_project_id: u64,
    next_task_id: u64,
    clock: Clock,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Workspace {
            clock,
            ..Workspace::default()
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Projects in creation order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Tasks in insertion order. Board columns follow this order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn has_project(&self, id: ProjectId) -> bool {
        self.project(id).is_some()
    }

    pub fn has_task(&self, id: TaskId) -> bool {
        self.task(id).is_some()
    }

    /// Look up a project by exact display name
    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub(crate) fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub(crate) fn project_index(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// Ids are never reused, even after the entity is deleted
    pub(crate) fn allocate_task_id(&mut self) -> TaskId {
        self.next_task_id += 1;
        TaskId(self.next_task_id)
    }

    pub(crate) fn allocate_project_id(&mut self) -> ProjectId {
        self.next_project_id += 1;
        ProjectId(self.next_project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_are_monotonic() {
        let mut ws = Workspace::new();
        assert_eq!(ws.allocate_task_id(), TaskId(1));
        assert_eq!(ws.allocate_task_id(), TaskId(2));
        assert_eq!(ws.allocate_project_id(), ProjectId(1));
    }

    #[test]
    fn manual_clock_moves_only_when_told() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let ws = Workspace::with_clock(Clock::manual(start));
        assert_eq!(ws.now(), start);
        ws.clock().advance(Duration::hours(1));
        assert_eq!(ws.now(), start + Duration::hours(1));
        ws.clock().set(start);
        assert_eq!(ws.now(), start);
    }

    #[test]
    fn empty_workspace_has_nothing() {
        let ws = Workspace::new();
        assert!(ws.projects().is_empty());
        assert!(ws.tasks().is_empty());
        assert!(!ws.has_task(TaskId(1)));
        assert!(!ws.has_project(ProjectId(1)));
    }
}
