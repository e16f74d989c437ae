use crate::models::RecurrenceKind;

/// Marker that introduces a recurrence suffix in task text.
pub const KEYWORD: &str = "every";

/// Split raw task text into the task body and its recurrence kind.
///
/// Only the text after the *last* `every` decides the kind; it must be
/// exactly one of `day`, `week`, `month`, `year` once trimmed. The body is
/// everything before that last `every`, trimmed, and may itself still contain
/// the keyword. When nothing matches, or the body would be empty, the text is
/// returned untouched with [`RecurrenceKind::None`].
///
/// Matching is case-sensitive.
///
/// ```
/// use dayboard_core::models::RecurrenceKind;
/// use dayboard_core::recurrence::classify;
///
/// assert_eq!(classify("Buy milk every week"), ("Buy milk", RecurrenceKind::Week));
/// assert_eq!(classify("every day"), ("every day", RecurrenceKind::None));
/// ```
pub fn classify(text: &str) -> (&str, RecurrenceKind) {
    let Some(at) = text.rfind(KEYWORD) else {
        return (text, RecurrenceKind::None);
    };

    let body = text[..at].trim();
    if body.is_empty() {
        return (text, RecurrenceKind::None);
    }

    let suffix = text[at + KEYWORD.len()..].trim();
    match RecurrenceKind::REPEATING
        .into_iter()
        .find(|kind| kind.as_str() == suffix)
    {
        Some(kind) => (body, kind),
        None => (text, RecurrenceKind::None),
    }
}
