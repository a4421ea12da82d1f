//! The demo workspace a session starts with unless configured empty.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::config::SeedKind;
use crate::model::project::{ColorTag, NewProject, ProjectId};
use crate::model::task::{NewTask, Priority, Status, TaskId};
use crate::model::workspace::{Clock, Workspace};
use crate::ops::project_ops;
use crate::ops::task_ops::{self, TaskError};

/// Build the workspace for a seed kind. The returned workspace runs on the
/// system clock.
pub fn seed_workspace(kind: SeedKind) -> Result<Workspace, TaskError> {
    match kind {
        SeedKind::Empty => Ok(Workspace::new()),
        SeedKind::Sample => sample_workspace(),
    }
}

/// Three projects and four tasks, timestamped January 2024
pub fn sample_workspace() -> Result<Workspace, TaskError> {
    let mut ws = Workspace::with_clock(Clock::manual(day(10)));

    let web = project(
        &mut ws,
        "Website Redesign",
        "Complete overhaul of company website",
        ColorTag::Purple,
        &["Alice", "Bob", "Charlie"],
    );
    let mobile = project(
        &mut ws,
        "Mobile App",
        "iOS and Android app development",
        ColorTag::Blue,
        &["David", "Eve", "Frank"],
    );
    project(
        &mut ws,
        "Marketing Campaign",
        "Q1 marketing initiatives",
        ColorTag::Orange,
        &["Grace", "Henry"],
    );

    let homepage = task(
        &mut ws,
        15,
        NewTask {
            title: "Design new homepage layout".into(),
            description: "Create wireframes and mockups for the new homepage design".into(),
            status: Status::InProgress,
            priority: Priority::High,
            assignee: "Alice".into(),
            project: web,
            tags: vec!["design".into(), "frontend".into()],
        },
    )?;
    task(
        &mut ws,
        16,
        NewTask {
            title: "Implement user authentication".into(),
            description: "Set up login and registration functionality".into(),
            status: Status::Todo,
            priority: Priority::Urgent,
            assignee: "Charlie".into(),
            project: web,
            tags: vec!["backend".into(), "security".into()],
        },
    )?;
    let wireframes = task(
        &mut ws,
        14,
        NewTask {
            title: "Create mobile wireframes".into(),
            description: "Design wireframes for iOS and Android apps".into(),
            status: Status::Todo,
            priority: Priority::Medium,
            assignee: "David".into(),
            project: mobile,
            tags: vec!["design".into(), "mobile".into()],
        },
    )?;
    let pipeline = task(
        &mut ws,
        10,
        NewTask {
            title: "Setup CI/CD pipeline".into(),
            description: "Configure automated testing and deployment".into(),
            status: Status::InProgress,
            priority: Priority::Medium,
            assignee: "Eve".into(),
            project: mobile,
            tags: vec!["devops".into(), "automation".into()],
        },
    )?;

    // Later activity, replayed in date order
    ws.clock().set(day(17));
    task_ops::set_status(&mut ws, pipeline, Status::Done)?;
    ws.clock().set(day(18));
    task_ops::add_comment(
        &mut ws,
        homepage,
        "Bob",
        "Looking great! Can we add more whitespace?",
    )?;
    ws.clock().set(day(19));
    task_ops::set_status(&mut ws, wireframes, Status::Review)?;
    ws.clock().set(day(20));
    task_ops::add_tag(&mut ws, homepage, "ux")?;
    task_ops::remove_tag(&mut ws, homepage, "ux")?;

    ws.set_clock(Clock::System);
    Ok(ws)
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn project(
    ws: &mut Workspace,
    name: &str,
    description: &str,
    color: ColorTag,
    members: &[&str],
) -> ProjectId {
    project_ops::create_project(
        ws,
        NewProject {
            name: name.into(),
            description: description.into(),
            color: Some(color),
            members: members.iter().map(|m| m.to_string()).collect(),
        },
        color,
    )
}

fn task(ws: &mut Workspace, created_on: u32, fields: NewTask) -> Result<TaskId, TaskError> {
    ws.clock().set(day(created_on));
    task_ops::create_task(ws, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::index;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_has_three_projects_and_four_tasks() {
        let ws = sample_workspace().unwrap();
        assert_eq!(ws.projects().len(), 3);
        assert_eq!(ws.tasks().len(), 4);
        let names: Vec<&str> = ws.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Website Redesign", "Mobile App", "Marketing Campaign"]
        );
    }

    #[test]
    fn sample_statuses_and_aggregates() {
        let ws = sample_workspace().unwrap();
        let statuses: Vec<Status> = ws.tasks().iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![Status::InProgress, Status::Todo, Status::Review, Status::Done]
        );
        let mobile = index::project_aggregates(&ws, ProjectId(2));
        assert_eq!(mobile.task_count, 2);
        assert_eq!(mobile.completed_tasks, 1);
        assert_eq!(index::project_aggregates(&ws, ProjectId(3)).task_count, 0);
    }

    #[test]
    fn sample_timestamps_follow_activity() {
        let ws = sample_workspace().unwrap();
        let homepage = ws.task(TaskId(1)).unwrap();
        assert_eq!(homepage.created_at, day(15));
        assert_eq!(homepage.updated_at, day(20));
        assert_eq!(homepage.comments.len(), 1);
        assert_eq!(homepage.comments[0].created_at, day(18));
        assert_eq!(homepage.tags, vec!["design", "frontend"]);

        let auth = ws.task(TaskId(2)).unwrap();
        assert_eq!(auth.updated_at, auth.created_at);
        assert!(ws.tasks().iter().all(|t| t.updated_at >= t.created_at));
    }

    #[test]
    fn empty_seed_is_empty() {
        let ws = seed_workspace(SeedKind::Empty).unwrap();
        assert!(ws.projects().is_empty());
        assert!(ws.tasks().is_empty());
    }
}
