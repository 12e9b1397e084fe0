//! Terminal output formatting.

use std::time::Duration;

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use unicode_width::UnicodeWidthStr;

use taskdeck_core::board::{Board, BoardColumn};
use taskdeck_core::dashboard::DashboardSnapshot;
use taskdeck_core::error::CoreError;
use taskdeck_core::notifier::{Notification, NotificationKind};
use taskdeck_core::project::model::{Project, ProjectStatus};
use taskdeck_core::task::model::{Subtask, Task, TaskPriority, TaskStatus};
use taskdeck_core::team::model::{MemberStatus, TeamMember};
use taskdeck_core::ProjectTaskStore;

/// Spinner shown while a submission is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print a command failure. Validation failures are listed field by field.
pub fn print_error(err: &anyhow::Error) {
    let core = err.chain().find_map(|cause| cause.downcast_ref::<CoreError>());
    if let Some(CoreError::Validation(errors)) = core {
        eprintln!("{} Please fix the following:", "✗".red().bold());
        for field in &errors.fields {
            eprintln!("  {} {}: {}", "•".red(), field.field.bold(), field.message);
        }
        return;
    }

    eprintln!("{} {}", "✗".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }
}

/// Echo a notification the way the dashboard shows a toast.
pub fn print_toast(notification: &Notification) {
    let marker = match notification.kind {
        NotificationKind::Success => "✓".green().bold(),
        NotificationKind::Info => "ℹ".blue().bold(),
        NotificationKind::Error => "✗".red().bold(),
    };
    println!(
        "{} {} {}",
        marker,
        notification.title.bold(),
        notification.description.dimmed()
    );
}

/// Print the notification inbox, newest first.
pub fn print_notifications<'a>(notifications: impl Iterator<Item = &'a Notification>, unread: usize) {
    let notifications: Vec<&Notification> = notifications.collect();
    if notifications.is_empty() {
        println!("{}", "No notifications.".dimmed());
        return;
    }

    println!("{} {}", "Notifications".bold(), format!("({} unread)", unread).dimmed());
    println!();
    for n in notifications {
        let dot = if n.read { " ".normal() } else { "●".cyan() };
        println!(
            "  {} {} {} {}",
            dot,
            n.created_at.format("%H:%M:%S").to_string().dimmed(),
            n.title.bold(),
            n.description
        );
    }
}

fn status_colored(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Todo => status.as_str().normal(),
        TaskStatus::InProgress => status.as_str().yellow(),
        TaskStatus::Completed => status.as_str().green(),
    }
}

fn project_status_colored(status: ProjectStatus) -> ColoredString {
    match status {
        ProjectStatus::Planning => status.as_str().cyan(),
        ProjectStatus::Active => status.as_str().yellow(),
        ProjectStatus::Completed => status.as_str().green(),
        ProjectStatus::OnHold => status.as_str().dimmed(),
    }
}

fn date(d: DateTime<Utc>) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// Width of an id column wide enough to show every id in full, so any
/// listed id can be pasted back into another command.
fn id_width<'a>(ids: impl Iterator<Item = &'a str>) -> usize {
    ids.map(UnicodeWidthStr::width).max().unwrap_or(0).max(2)
}

/// Ten-cell bar for a percentage.
fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) / 10) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Print projects as a table.
pub fn print_projects_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("{}", "No projects found.".dimmed());
        return;
    }

    let w = id_width(projects.iter().map(|p| p.id.as_str()));
    println!(
        "{:<w$} {:<28} {:<11} {:<8} {:<16} {:<8}",
        "ID", "Name", "Status", "Priority", "Progress", "Tasks"
    );
    println!("{}", "─".repeat(w + 76));

    for project in projects {
        println!(
            "{:<w$} {:<28} {:<11} {:<8} {} {:>3}% {:<8}",
            project.id,
            pad_right(&truncate_visual(&project.name, 28), 28),
            project_status_colored(project.status),
            project.priority.as_str(),
            progress_bar(project.progress as u32).cyan(),
            project.progress,
            format!("{}/{}", project.completed_tasks(), project.tasks.len())
        );
    }

    println!();
    println!("{} project(s) total", projects.len());
}

/// Print a single project with its team and tasks.
pub fn print_project(project: &Project, store: &ProjectTaskStore) {
    println!("{} {}", project.name.cyan().bold(), format!("({})", project.id).dimmed());
    println!();
    println!("{}", project.description);
    println!();

    println!("{}: {}", "Status".bold(), project_status_colored(project.status));
    println!("{}: {}", "Priority".bold(), project.priority);
    println!(
        "{}: {} {}%",
        "Progress".bold(),
        progress_bar(project.progress as u32).cyan(),
        project.progress
    );
    if let Some(start) = project.start_date {
        println!("{}: {}", "Start".bold(), date(start));
    }
    println!("{}: {}", "Due".bold(), date(project.due_date));

    if !project.team_member_ids.is_empty() {
        let names: Vec<&str> = project
            .team_member_ids
            .iter()
            .map(|id| store.member_name(id))
            .collect();
        println!("{}: {}", "Team".bold(), names.join(", "));
    }

    println!();
    print_tasks_table(&project.tasks, store);
}

/// Print tasks as a table.
pub fn print_tasks_table(tasks: &[Task], store: &ProjectTaskStore) {
    if tasks.is_empty() {
        println!("{}", "No tasks found.".dimmed());
        return;
    }

    let now = store.now();
    let w = id_width(tasks.iter().map(|t| t.id.as_str()));
    println!(
        "{:<w$} {:<30} {:<12} {:<9} {:<16} {:<14}",
        "ID", "Title", "Status", "Priority", "Assignee", "Due"
    );
    println!("{}", "─".repeat(w + 84));

    for task in tasks {
        let due = if task.is_overdue(now) {
            date(task.due_date).red()
        } else {
            date(task.due_date).normal()
        };
        println!(
            "{:<w$} {:<30} {:<12} {:<9} {:<16} {:<14}",
            task.id,
            pad_right(&truncate_visual(&task.title, 30), 30),
            status_colored(task.status),
            task.priority.as_str(),
            pad_right(&truncate_visual(store.member_name(&task.assignee), 16), 16),
            due
        );
    }

    println!();
    println!("{} task(s) total", tasks.len());
}

/// Print the task detail page.
pub fn print_task(task: &Task, project: &Project, subtasks: &[Subtask], store: &ProjectTaskStore) {
    println!("{} {}", task.title.cyan().bold(), format!("({})", task.id).dimmed());
    println!("{}", format!("in {}", project.name).dimmed());
    println!();
    println!("{}", task.description);
    println!();

    println!("{}: {}", "Status".bold(), status_colored(task.status));
    println!("{}: {} {}", "Priority".bold(), priority_indicator(task.priority), task.priority);
    println!("{}: {}", "Assignee".bold(), store.member_name(&task.assignee));
    let overdue = if task.is_overdue(store.now()) {
        " overdue".red().bold()
    } else {
        "".normal()
    };
    println!("{}: {}{}", "Due".bold(), date(task.due_date), overdue);
    println!("{}: {}", "Created".bold(), date(task.created_at));

    println!();
    print_subtasks(subtasks);
}

/// Print a subtask checklist.
pub fn print_subtasks(subtasks: &[Subtask]) {
    let done = subtasks.iter().filter(|s| s.completed).count();
    println!(
        "{} {}",
        "Subtasks".bold(),
        format!("{}/{}", done, subtasks.len()).dimmed()
    );
    for subtask in subtasks {
        if subtask.completed {
            println!(
                "  {} {} {}",
                "[x]".green(),
                subtask.title.dimmed().strikethrough(),
                subtask.id.dimmed()
            );
        } else {
            println!("  [ ] {} {}", subtask.title, subtask.id.dimmed());
        }
    }
}

/// Print the dashboard overview tab.
pub fn print_dashboard(snapshot: &DashboardSnapshot, store: &ProjectTaskStore) {
    let stats = &snapshot.stats;

    println!("{}", " DASHBOARD ".on_blue().white().bold());
    println!();
    println!(
        "  {:<12} {} total {} {} active {} {} completed",
        "Projects".bold(),
        stats.total_projects.to_string().bold(),
        "·".dimmed(),
        stats.active_projects.to_string().yellow(),
        "·".dimmed(),
        stats.completed_projects.to_string().green()
    );
    println!(
        "  {:<12} {} total {} {} completed {} {} overdue",
        "Tasks".bold(),
        stats.total_tasks.to_string().bold(),
        "·".dimmed(),
        stats.completed_tasks.to_string().green(),
        "·".dimmed(),
        if stats.overdue_tasks > 0 {
            stats.overdue_tasks.to_string().red().bold()
        } else {
            stats.overdue_tasks.to_string().normal()
        }
    );
    println!(
        "  {:<12} {} {}%",
        "Completion".bold(),
        progress_bar(snapshot.completion_percent).green(),
        snapshot.completion_percent
    );

    println!();
    println!("{}", "Projects".bold());
    for project in &snapshot.projects {
        println!(
            "  {} {} {} {}%",
            "●".cyan(),
            pad_right(&truncate_visual(&project.name, 28), 28),
            project_status_colored(project.status),
            project.progress
        );
    }

    println!();
    println!("{}", "Recent Tasks".bold());
    if snapshot.recent_tasks.is_empty() {
        println!("  {}", "No tasks yet.".dimmed());
    }
    for task in &snapshot.recent_tasks {
        println!(
            "  {} {} {} {} {}",
            priority_indicator(task.priority),
            pad_right(&truncate_visual(&task.title, 30), 30),
            status_colored(task.status),
            "·".dimmed(),
            store.member_name(&task.assignee).dimmed()
        );
    }
}

/// Print team members as a table.
pub fn print_members_table(members: &[&TeamMember]) {
    if members.is_empty() {
        println!("{}", "No team members found.".dimmed());
        return;
    }

    let w = id_width(members.iter().map(|m| m.id.as_str()));
    println!(
        "{:<w$} {:<4} {:<20} {:<28} {:<18} {:<9} {:<8}",
        "ID", "", "Name", "Email", "Role", "Status", "Projects"
    );
    println!("{}", "─".repeat(w + 92));

    for member in members {
        let status = match member.status {
            MemberStatus::Active => member.status.as_str().green(),
            MemberStatus::Inactive => member.status.as_str().dimmed(),
        };
        println!(
            "{:<w$} {:<4} {:<20} {:<28} {:<18} {:<9} {:<8}",
            member.id,
            member.initials().cyan(),
            pad_right(&truncate_visual(&member.name, 20), 20),
            pad_right(&truncate_visual(&member.email, 28), 28),
            pad_right(&truncate_visual(&member.role, 18), 18),
            status,
            member.assigned_projects()
        );
    }

    println!();
    println!("{} member(s)", members.len());
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Column header text (plain, for width calculation).
fn column_header_plain(col: &BoardColumn, max_width: usize) -> String {
    let full = format!("{} {}", col.title.to_uppercase(), col.tasks.len());
    if UnicodeWidthStr::width(full.as_str()) > max_width {
        truncate_visual(&full, max_width)
    } else {
        full
    }
}

fn column_header_colored(col: &BoardColumn, max_width: usize) -> ColoredString {
    let label = column_header_plain(col, max_width);
    match col.status {
        TaskStatus::Todo => label.blue().bold(),
        TaskStatus::InProgress => label.yellow().bold(),
        TaskStatus::Completed => label.green().bold(),
    }
}

fn priority_indicator(priority: TaskPriority) -> ColoredString {
    match priority {
        TaskPriority::Critical => "!!".red().bold(),
        TaskPriority::High => "! ".yellow(),
        TaskPriority::Medium => "· ".dimmed(),
        TaskPriority::Low => "  ".dimmed(),
    }
}

/// One card cell, padded to the column width.
fn format_task_card(task: &Task, status: TaskStatus, width: usize) -> String {
    // 2 chars for indicator + 1 space + title
    let title_w = if width > 4 { width - 3 } else { 1 };
    let title = pad_right(&truncate_visual(&task.title, title_w), title_w);
    match status {
        TaskStatus::Todo => format!("{} {}", priority_indicator(task.priority), title),
        TaskStatus::InProgress => format!("{} {}", priority_indicator(task.priority), title.yellow()),
        TaskStatus::Completed => format!("{} {}", "✓ ".green(), title.green().dimmed()),
    }
}

/// Print the Kanban board.
pub fn print_board(board: &Board) {
    println!("{} {}", board.project_name.cyan().bold(), format!("({})", board.project_id).dimmed());

    if board.total_tasks() == 0 {
        println!(
            "{}",
            "No tasks yet. Create one with 'taskdeck task new'.".dimmed()
        );
        return;
    }

    let width = term_width();
    if width < 60 {
        print_board_compact(board);
    } else {
        print_board_wide(board, width);
    }
}

/// Columns side by side.
fn print_board_wide(board: &Board, term_w: usize) {
    let columns = &board.columns;
    let num_cols = columns.len();
    let available = if term_w > num_cols + 1 { term_w - num_cols - 1 } else { num_cols * 10 };
    let col_width = (available / num_cols).clamp(12, 35);

    let rule = |left: &str, mid: &str, right: &str| {
        let mut line = left.to_string();
        for i in 0..num_cols {
            line.push_str(&"─".repeat(col_width));
            if i < num_cols - 1 {
                line.push_str(mid);
            }
        }
        line.push_str(right);
        println!("{}", line.dimmed());
    };

    // ── Header ──
    rule("┌", "┬", "┐");
    print!("{}", "│".dimmed());
    for (i, col) in columns.iter().enumerate() {
        let header = column_header_colored(col, col_width);
        let header_width = UnicodeWidthStr::width(column_header_plain(col, col_width).as_str());
        let padding = col_width.saturating_sub(header_width);
        let left_pad = padding / 2;
        print!("{}{}{}", " ".repeat(left_pad), header, " ".repeat(padding - left_pad));
        if i < num_cols - 1 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());
    rule("├", "┼", "┤");

    // ── Task rows ──
    let max_tasks = columns.iter().map(|c| c.tasks.len()).max().unwrap_or(0);
    for i in 0..max_tasks {
        print!("{}", "│".dimmed());
        for (ci, col) in columns.iter().enumerate() {
            match col.tasks.get(i) {
                Some(task) => print!("{}", format_task_card(task, col.status, col_width)),
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < num_cols - 1 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }

    // ── Footer ──
    rule("└", "┴", "┘");

    let done = board.column(TaskStatus::Completed).map_or(0, |c| c.tasks.len());
    println!(
        " {} {} tasks {} {} done ({}%)",
        "■".cyan(),
        board.total_tasks().to_string().bold(),
        "·".dimmed(),
        done.to_string().green(),
        board.done_percent()
    );
}

/// Compact vertical board layout for narrow terminals.
fn print_board_compact(board: &Board) {
    println!("{}", " KANBAN BOARD ".on_blue().white().bold());
    println!();

    for col in &board.columns {
        println!(" {} {}", "▸".dimmed(), column_header_colored(col, 30));
        if col.tasks.is_empty() {
            println!("   {}", "Drop tasks here".dimmed());
        }
        for task in &col.tasks {
            let title: ColoredString = match col.status {
                TaskStatus::InProgress => task.title.as_str().yellow(),
                TaskStatus::Completed => task.title.as_str().green().dimmed(),
                TaskStatus::Todo => task.title.as_str().normal(),
            };
            println!(
                "   {} {} {}",
                priority_indicator(task.priority),
                title,
                task.id.dimmed()
            );
        }
        println!();
    }
}
