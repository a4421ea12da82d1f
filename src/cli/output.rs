use serde::Serialize;

use crate::app::session::{ErrorKind, IntentError};
use crate::app::snapshot::{MemberView, ProjectCard, Snapshot};
use crate::model::project::{MemberRole, Project};
use crate::model::task::Task;
use crate::ops::index::{BoardColumns, DashboardStats, ProjectStats};
use crate::util::unicode::fit_to_width;

/// Board title column width in terminal cells
const TITLE_WIDTH: usize = 30;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// A replay line whose intent was rejected
#[derive(Serialize)]
pub struct RejectionJson {
    pub line: usize,
    pub rejected: ErrorKind,
    pub error: String,
}

impl RejectionJson {
    pub fn new(line: usize, err: &IntentError) -> Self {
        RejectionJson {
            line,
            rejected: err.kind(),
            error: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

pub fn format_snapshot(snapshot: &Snapshot<'_>) -> Vec<String> {
    match snapshot {
        Snapshot::Overview { stats, projects } => format_overview(stats, projects),
        Snapshot::Board { search, columns } => format_board(search, columns),
        Snapshot::ItemDetail { task, project } => format_task_detail(task, project),
        Snapshot::ProjectConfig { card, members } => format_project_config(card, members),
    }
}

pub fn format_rejection(line: usize, err: &IntentError) -> String {
    format!("line {}: rejected ({}): {}", line, err.kind(), err)
}

fn format_overview(stats: &DashboardStats, projects: &[ProjectCard<'_>]) -> Vec<String> {
    let mut lines = vec![
        "== Overview ==".to_string(),
        format!(
            "projects: {}  active: {}  completed: {}  members: {}",
            stats.total_projects, stats.active_tasks, stats.completed_tasks, stats.team_members
        ),
    ];
    for card in projects {
        let project = card.project;
        lines.push(String::new());
        lines.push(format!("[{}] {} ({})", project.color, project.name, project.id));
        if !project.description.is_empty() {
            lines.push(format!("  {}", project.description));
        }
        lines.push(format!("  {}", format_progress(&card.stats, card.progress)));
        if !project.members.is_empty() {
            lines.push(format!("  members: {}", project.members.join(", ")));
        }
    }
    lines
}

fn format_progress(stats: &ProjectStats, progress: u8) -> String {
    format!(
        "{} tasks  {} done  {}%",
        stats.task_count, stats.completed_tasks, progress
    )
}

fn format_board(search: &str, columns: &BoardColumns<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if search.is_empty() {
        lines.push("== Board ==".to_string());
    } else {
        lines.push(format!("== Board (search: {}) ==", search));
    }
    for (status, tasks) in columns {
        lines.push(String::new());
        lines.push(format!("{} ({})", status.title(), tasks.len()));
        if tasks.is_empty() {
            lines.push("  (none)".to_string());
        }
        for task in tasks {
            lines.push(format_board_row(task));
        }
    }
    lines
}

/// One board row: id, fitted title, priority, assignee, tags
pub fn format_board_row(task: &Task) -> String {
    let row = format!(
        "  {:>4}  {}  {:<6}  {}{}",
        format!("#{}", task.id),
        fit_to_width(&task.title, TITLE_WIDTH),
        task.priority.as_str(),
        task.assignee,
        format_tags(&task.tags, " "),
    );
    row.trim_end().to_string()
}

fn format_tags(tags: &[String], prefix: &str) -> String {
    if tags.is_empty() {
        return String::new();
    }
    format!(
        "{}{}",
        prefix,
        tags.iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ")
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &Task, project: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("#{} {}", task.id, task.title),
        format!("project: {} ({})", project.name, project.id),
        format!("status: {}", task.status.title()),
        format!("priority: {}", task.priority),
    ];
    if !task.assignee.is_empty() {
        lines.push(format!("assignee: {}", task.assignee));
    }
    if !task.tags.is_empty() {
        lines.push(format_tags(&task.tags, "tags: "));
    }
    lines.push(format!("created: {}", task.created_at.format(TIME_FORMAT)));
    lines.push(format!("updated: {}", task.updated_at.format(TIME_FORMAT)));

    if !task.description.is_empty() {
        lines.push(String::new());
        for line in task.description.lines() {
            lines.push(line.to_string());
        }
    }

    if !task.comments.is_empty() {
        lines.push(String::new());
        lines.push("comments:".to_string());
        for comment in &task.comments {
            lines.push(format!(
                "  [{}] {}, {}",
                comment.id,
                comment.author,
                comment.created_at.format(TIME_FORMAT)
            ));
            for line in comment.content.lines() {
                lines.push(format!("    {}", line));
            }
        }
    }
    lines
}

fn format_project_config(card: &ProjectCard<'_>, members: &[MemberView<'_>]) -> Vec<String> {
    let project = card.project;
    let mut lines = vec![format!(
        "== {} settings ({}) ==",
        project.name, project.id
    )];
    if !project.description.is_empty() {
        lines.push(format!("description: {}", project.description));
    }
    lines.push(format!("color: {}", project.color));
    lines.push(format!("progress: {}", format_progress(&card.stats, card.progress)));
    lines.push("members:".to_string());
    if members.is_empty() {
        lines.push("  (none)".to_string());
    }
    for member in members {
        match member.role {
            MemberRole::Admin => lines.push(format!("  {} (admin)", member.name)),
            MemberRole::Member => lines.push(format!("  {}", member.name)),
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::Screen;
    use crate::model::project::{NewProject, ProjectId};
    use crate::model::task::{NewTask, Priority, Status, TaskId};
    use crate::model::workspace::{Clock, Workspace};
    use crate::ops::{project_ops, task_ops};
    use chrono::{Duration, TimeZone, Utc};
    use insta::assert_snapshot;

    fn workspace() -> Workspace {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let mut ws = Workspace::with_clock(Clock::manual(start));
        let project = project_ops::create_project(
            &mut ws,
            NewProject {
                name: "Website Redesign".into(),
                description: "Complete overhaul".into(),
                members: vec!["Alice".into(), "Bob".into()],
                ..Default::default()
            },
            Default::default(),
        );
        task_ops::create_task(
            &mut ws,
            NewTask {
                title: "Design homepage".into(),
                description: "Wireframes first".into(),
                status: Status::InProgress,
                priority: Priority::High,
                assignee: "Alice".into(),
                project,
                tags: vec!["design".into(), "frontend".into()],
            },
        )
        .unwrap();
        task_ops::create_task(
            &mut ws,
            NewTask {
                title: "Implement user authentication flow end to end".into(),
                priority: Priority::Urgent,
                project,
                ..Default::default()
            },
        )
        .unwrap();
        ws.clock().advance(Duration::days(3));
        task_ops::add_comment(&mut ws, TaskId(1), "Bob", "Looking great!").unwrap();
        ws
    }

    fn render(ws: &Workspace, screen: Screen, search: &str) -> String {
        format_snapshot(&Snapshot::build(ws, screen, search)).join("\n")
    }

    #[test]
    fn overview_text() {
        let ws = workspace();
        assert_snapshot!(render(&ws, Screen::Overview, ""), @r"
        == Overview ==
        projects: 1  active: 2  completed: 0  members: 2

        [purple] Website Redesign (1)
          Complete overhaul
          2 tasks  0 done  0%
          members: Alice, Bob
        ");
    }

    #[test]
    fn board_text() {
        let ws = workspace();
        assert_snapshot!(render(&ws, Screen::Board, ""), @r"
        == Board ==

        To Do (1)
            #2  Implement user authentication…  urgent

        In Progress (1)
            #1  Design homepage                 high    Alice #design #frontend

        Review (0)
          (none)

        Done (0)
          (none)
        ");
    }

    #[test]
    fn board_text_with_search() {
        let ws = workspace();
        let text = render(&ws, Screen::Board, "AUTH");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Board (search: AUTH) ==");
        assert_eq!(lines[3], "    #2  Implement user authentication…  urgent");
        assert_eq!(lines[5], "In Progress (0)");
    }

    #[test]
    fn task_detail_text() {
        let ws = workspace();
        assert_snapshot!(render(&ws, Screen::ItemDetail(TaskId(1)), ""), @r"
        #1 Design homepage
        project: Website Redesign (1)
        status: In Progress
        priority: high
        assignee: Alice
        tags: #design #frontend
        created: 2024-01-15 09:00
        updated: 2024-01-18 09:00

        Wireframes first

        comments:
          [1] Bob, 2024-01-18 09:00
            Looking great!
        ");
    }

    #[test]
    fn project_config_text() {
        let ws = workspace();
        assert_snapshot!(render(&ws, Screen::ProjectConfig(ProjectId(1)), ""), @r"
        == Website Redesign settings (1) ==
        description: Complete overhaul
        color: purple
        progress: 2 tasks  0 done  0%
        members:
          Alice (admin)
          Bob
        ");
    }

    #[test]
    fn rejection_line() {
        let err = IntentError::Nav(crate::app::view::NavError::TaskNotFound(TaskId(9)));
        assert_eq!(
            format_rejection(4, &err),
            "line 4: rejected (not-found): task not found: 9"
        );
        let json = serde_json::to_string(&RejectionJson::new(4, &err)).unwrap();
        assert_eq!(
            json,
            r#"{"line":4,"rejected":"not-found","error":"task not found: 9"}"#
        );
    }
}
