use super::SchedulingEngine;
use crate::dates::format_date;
use crate::error::CoreError;
use crate::models::{NewTaskData, UserId};
use crate::repository::Repository;
use chrono::Duration;
use tracing::info;

const PRESET_COLUMNS: [&str; 5] = ["Notes", "Groceries", "Practice", "Books", "*Edit*"];

const PRESET_TODAY: [&str; 7] = [
    "You can write **`markdown`** here",
    "What is markdown? [Check it out](https://www.markdownguide.org/)",
    "You can always double tap to edit :pen:",
    "Wanna remove an item?",
    "Just double tap and erase it.. easy!! :wastebasket:",
    "Why don't you also try the drag and drop?",
    "Make plans for tomorrow before going to bed :bed:",
];

const PRESET_YESTERDAY_DONE: [&str; 1] = ["This is how achievement looks like"];

const PRESET_TOMORROW: [&str; 3] = [
    "Let's plan for the entire week",
    "Start a simple yet productive journey",
    "All the best!",
];

impl<R: Repository> SchedulingEngine<R> {
    /// Seed a fresh account with sample columns and a few tasks around today.
    pub async fn create_preset_for_new_user(&self, user_id: UserId) -> Result<(), CoreError> {
        for name in PRESET_COLUMNS {
            self.create_column(user_id, name).await?;
        }

        let today = self.today();
        let days = [
            (today, &PRESET_TODAY[..], false),
            (today - Duration::days(1), &PRESET_YESTERDAY_DONE[..], true),
            (today + Duration::days(1), &PRESET_TOMORROW[..], false),
        ];
        for (date, bodies, done) in days {
            for body in bodies {
                let data = NewTaskData {
                    body: body.to_string(),
                    done,
                    column_uuid: None,
                    date: Some(format_date(date)),
                };
                self.create_task(user_id, data).await?;
            }
        }

        info!(user_id, "preset created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::classify;

    #[test]
    fn test_preset_texts_are_not_recurring() {
        let all = PRESET_TODAY
            .iter()
            .chain(PRESET_YESTERDAY_DONE.iter())
            .chain(PRESET_TOMORROW.iter());
        for body in all {
            assert!(!classify(body).1.is_recurring(), "{}", body);
        }
    }
}
