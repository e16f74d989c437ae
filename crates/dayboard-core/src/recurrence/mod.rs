//! Text-detected recurrence: the classifier that pulls a recurrence kind out
//! of task text, and the matcher that decides which calendar days a
//! recurring task occurs on. Both are pure and never fail.

mod classifier;
mod matcher;

pub use classifier::{classify, KEYWORD};
pub use matcher::{matches, occurrences_between};
