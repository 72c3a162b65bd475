//! Greeting, quote and journal prompt for the dashboard.
//!
//! Quote and prompt rotate by day of year so they stay fixed for a day.

use chrono::{Datelike, NaiveDate};

const QUOTES: [&str; 10] = [
    "The secret of getting ahead is getting started.",
    "Your limitation—it's only your imagination.",
    "The best way to get started is to quit talking and begin doing.",
    "It's not whether you get knocked down, it's whether you get up.",
    "The only person you are destined to become is the person you decide to be.",
    "Believe you can and you're halfway there.",
    "You are never too old to set another goal or to dream a new dream.",
    "Act as if what you do makes a difference. It does.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "The journey of a thousand miles begins with a single step.",
];

const PROMPTS: [&str; 8] = [
    "What is one thing you're proud of today?",
    "Describe a moment that made you smile recently.",
    "What's one challenge you overcame this week?",
    "If you could give your past self one piece of advice, what would it be?",
    "What is something you are looking forward to?",
    "Write about a person you are grateful for and why.",
    "What does 'peace' feel like to you right now?",
    "Describe one thing you can do today to take care of yourself.",
];

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    }
}

pub fn quote_of_the_day(date: NaiveDate) -> &'static str {
    QUOTES[date.ordinal() as usize % QUOTES.len()]
}

pub fn journal_prompt(date: NaiveDate) -> &'static str {
    PROMPTS[date.ordinal() as usize % PROMPTS.len()]
}
