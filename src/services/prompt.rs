//! Prompt construction for numerology predictions.

use chrono::NaiveDate;

/// Fixed instructional template with two substitution points: the user's
/// name and the `year-month-day` rendering of their date of birth.
pub fn numerology_prompt(name: &str, dob: NaiveDate) -> String {
    format!(
        "Act as a numerologist. The user's name is {}, and date of birth is {}. \
         Give a generic numerology prediction. Please format the response in a \
         friendly and engaging manner. Alignments and line spacings for each calculations.",
        name,
        dob.format("%Y-%m-%d")
    )
}
