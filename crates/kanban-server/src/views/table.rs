use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use kanban_core::models::{Task, TaskPriority, TaskStatus};

const SHORT_ID_LEN: usize = 8;

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "Type", "Priority"]);

    for task in tasks {
        let mut row = Row::new();
        let short_id = task.id.get(..SHORT_ID_LEN).unwrap_or(&task.id);
        row.add_cell(Cell::new(short_id));

        let mut title_cell = Cell::new(&task.title);
        title_cell = match task.status {
            TaskStatus::Done => title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey),
            TaskStatus::Ongoing => title_cell.add_attribute(Attribute::Bold),
            TaskStatus::Backlog => title_cell,
        };
        row.add_cell(title_cell);

        let status_cell = Cell::new(task.status.to_string());
        row.add_cell(match task.status {
            TaskStatus::Done => status_cell.fg(Color::Green),
            TaskStatus::Ongoing => status_cell.fg(Color::Cyan),
            TaskStatus::Backlog => status_cell,
        });

        row.add_cell(Cell::new(&task.task_type));

        let priority_cell = Cell::new(task.priority.to_string());
        row.add_cell(match task.priority {
            TaskPriority::High => priority_cell.fg(Color::Red).add_attribute(Attribute::Bold),
            TaskPriority::Medium => priority_cell.fg(Color::Yellow),
            TaskPriority::Low => priority_cell.fg(Color::Green),
        });

        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_dates(dates: &[NaiveDate]) {
    if dates.is_empty() {
        println!("No snapshots found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Weekday"]);
    for date in dates {
        table.add_row(vec![date.to_string(), date.format("%A").to_string()]);
    }

    println!("{table}");
}
