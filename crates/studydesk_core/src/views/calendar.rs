//! Weekday mapping, today's classes and the daily motivation line.

use crate::model::timetable::{ClassSession, Weekday};
use chrono::{Datelike, NaiveDate};

/// Fixed motivation lines, cycled by day of year.
pub const DAILY_MOTIVATIONS: [&str; 5] = [
    "Discipline today creates an empire tomorrow. Every focused minute is an investment in your greatness.",
    "Your potential is infinite. Push past yesterday's limits and claim victory today with elite focus.",
    "Small daily wins lead to massive breakthroughs. Stay consistent, stay focused, stay elite.",
    "Excellence is a habit. Habit is your foundation. Build it strong with today's study goals.",
    "Rise above distractions. Your future self is counting on the work you do in this very moment.",
];

/// Maps a Sunday-based day index (`0 = Sunday`) onto the Monday-first week.
///
/// Index 0 becomes `Sunday` (7th name); indices 1..=6 become `Monday..Saturday`.
pub fn weekday_from_sunday_index(day_index: u32) -> Weekday {
    match day_index % 7 {
        0 => Weekday::Sunday,
        other => Weekday::from_index(other as usize - 1),
    }
}

/// Weekday of a calendar date.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    weekday_from_sunday_index(date.weekday().num_days_from_sunday())
}

/// Classes on `day`, ordered by `start_time` (lexicographic, stable).
pub fn classes_for_day(classes: &[ClassSession], day: Weekday) -> Vec<&ClassSession> {
    let mut selected: Vec<&ClassSession> =
        classes.iter().filter(|class| class.day == day).collect();
    selected.sort_by(|left, right| left.start_time.cmp(&right.start_time));
    selected
}

/// Classes scheduled on the weekday of `date`.
pub fn todays_classes(classes: &[ClassSession], date: NaiveDate) -> Vec<&ClassSession> {
    classes_for_day(classes, weekday_of(date))
}

/// Day of the year with January 1st as day 1.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Motivation line for `date`; stable for the whole local day.
pub fn daily_motivation(date: NaiveDate) -> &'static str {
    DAILY_MOTIVATIONS[day_of_year(date) as usize % DAILY_MOTIVATIONS.len()]
}
