use clap::{Args, Parser, Subcommand};

/// Dayboard: kanban columns, daily lists and tasks that recur on their own
#[derive(Parser, Debug)]
#[command(name = "dayboard", author, version, about, long_about = None)]
pub struct Cli {
    /// The user whose board is used
    #[arg(short, long, global = true, default_value_t = 1)]
    pub user: u32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a task to a day or a column
    Add(AddCommand),
    /// Show the tasks of a range of days
    Window(WindowCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task, or one day of a recurring task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Move tasks onto a day or into a column, in the given order
    Move(MoveCommand),
    /// Manage columns
    Column(ColumnCommand),
    /// Seed the board with sample columns and tasks
    Preset,
    /// Move unfinished tasks from past days onto today
    Sweep(SweepCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// Task text. End it with "every day|week|month|year" to make it recur
    pub text: String,
    /// Day to put the task on (YYYY-MM-DD, default today)
    #[arg(short, long, conflicts_with = "column")]
    pub date: Option<String>,
    /// Column UUID to put the task in
    #[arg(short, long)]
    pub column: Option<String>,
    /// Create the task already done
    #[arg(long)]
    pub done: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct WindowCommand {
    /// First day (YYYY-MM-DD, default today)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day (YYYY-MM-DD)
    #[arg(long, conflicts_with = "days")]
    pub to: Option<String>,
    /// Number of days to show when --to is not given
    #[arg(long, default_value_t = 7)]
    pub days: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,
    /// New task text
    #[arg(long)]
    pub text: Option<String>,
    /// Mark the task done
    #[arg(long, conflicts_with = "undone")]
    pub done: bool,
    /// Mark the task not done
    #[arg(long)]
    pub undone: bool,
    /// New position inside its day or column
    #[arg(long)]
    pub order: Option<i64>,
    /// Occurrence ID (shown in the window) to edit one day of a recurring task
    #[arg(long)]
    pub occurrence: Option<i64>,
}

impl EditCommand {
    pub fn done_flag(&self) -> Option<bool> {
        match (self.done, self.undone) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCommand {
    /// Task IDs, in their new order
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<i64>,
    #[command(flatten)]
    pub target: MoveTarget,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MoveTarget {
    /// Target day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// Target column UUID
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub command: ColumnSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ColumnSubcommand {
    /// Add a new column
    Add(AddColumnCommand),
    /// List columns with their tasks
    List,
    /// Show one column
    Show(ColumnRef),
    /// Rename a column
    Rename(RenameColumnCommand),
    /// Delete a column and every task in it
    Delete(DeleteColumnCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddColumnCommand {
    /// The name of the column
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ColumnRef {
    /// The UUID of the column
    pub uuid: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RenameColumnCommand {
    /// The UUID of the column
    pub uuid: String,
    /// The new name
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteColumnCommand {
    /// The UUID of the column
    pub uuid: String,
    /// Force deletion without confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SweepCommand {
    /// Day to move tasks onto (YYYY-MM-DD, default today)
    #[arg(long, conflicts_with = "slot")]
    pub date: Option<String>,
    /// Use the date of the users entering local midnight right now
    #[arg(long)]
    pub slot: bool,
}
