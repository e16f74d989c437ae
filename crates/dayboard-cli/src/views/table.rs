use comfy_table::{Attribute, Cell, Color, Row, Table};
use dayboard_core::models::{ColumnView, DayView, TaskView};
use owo_colors::OwoColorize;

fn task_table(tasks: &[TaskView]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "#", "Task", "Repeats", "Occurrence"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(Cell::new(task.order).fg(Color::DarkGrey));

        let mut display_body = String::new();
        if task.recurring_kind.is_recurring() {
            display_body.push('↻');
            display_body.push(' ');
        }
        display_body.push_str(&task.body);

        let mut body_cell = Cell::new(display_body);
        if task.done {
            body_cell = body_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        }
        row.add_cell(body_cell);

        row.add_cell(if task.recurring_kind.is_recurring() {
            Cell::new(task.recurring_kind).fg(Color::Cyan)
        } else {
            Cell::new("")
        });
        row.add_cell(Cell::new(
            task.occurrence_id.map(|id| id.to_string()).unwrap_or_default(),
        ));
        table.add_row(row);
    }

    table
}

pub fn display_window(days: &[DayView]) {
    for day in days {
        println!("{} {}", day.weekday.to_string().bold(), day.date);
        if day.tasks.is_empty() {
            println!("  {}", "Nothing planned.".bright_black());
        } else {
            println!("{}", task_table(&day.tasks));
        }
        println!();
    }
}

pub fn display_columns(columns: &[ColumnView]) {
    if columns.is_empty() {
        println!("No columns found.");
        return;
    }
    for column in columns {
        display_column(column);
        println!();
    }
}

pub fn display_column(column: &ColumnView) {
    println!("{} {}", column.name.bold(), column.uuid.to_string().bright_black());
    if column.tasks.is_empty() {
        println!("  {}", "Empty.".bright_black());
    } else {
        println!("{}", task_table(&column.tasks));
    }
}

pub fn display_task(task: &TaskView) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Task"), Cell::new(&task.body)]);
    table.add_row(vec![Cell::new("Done"), Cell::new(if task.done { "yes" } else { "no" })]);
    table.add_row(vec![Cell::new("Order"), Cell::new(task.order)]);
    table.add_row(vec![Cell::new("Repeats"), Cell::new(task.recurring_kind)]);
    if let Some(date) = task.date {
        table.add_row(vec![Cell::new("Date"), Cell::new(date)]);
    }
    if let Some(uuid) = task.column_uuid {
        table.add_row(vec![Cell::new("Column"), Cell::new(uuid)]);
    }
    if let Some(id) = task.occurrence_id {
        table.add_row(vec![Cell::new("Occurrence"), Cell::new(id)]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayboard_core::models::RecurrenceKind;

    fn view(id: i64, body: &str, kind: RecurrenceKind) -> TaskView {
        TaskView {
            id,
            body: body.to_string(),
            done: false,
            order: id,
            recurring_kind: kind,
            date: None,
            column_uuid: None,
            occurrence_id: kind.is_recurring().then_some(40 + id),
        }
    }

    #[test]
    fn test_task_table_marks_recurring_rows() {
        let rendered = task_table(&[
            view(1, "Buy milk", RecurrenceKind::Week),
            view(2, "Call mom", RecurrenceKind::None),
        ])
        .to_string();

        assert!(rendered.contains("↻ Buy milk"));
        assert!(rendered.contains("week"));
        assert!(rendered.contains("41"));
        assert!(rendered.contains("Call mom"));
        assert!(!rendered.contains("↻ Call mom"));
    }
}
