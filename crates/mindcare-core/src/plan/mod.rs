//! Weekly wellness plan and per-day task completion.
//!
//! The [`WeeklyPlan`] is fixed at compile time. What changes is the
//! [`CompletionStatus`]: one boolean per task per day, reset whenever the
//! calendar day rolls over.

mod status;

pub use status::{
    CompletionStatus, DailyPlan, DayPreview, DayView, Progress, Reconciliation, TaskUpdate,
    TaskView,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Plan day. Ordered Sunday first, matching the week layout of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Sunday => "sunday",
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }

    /// Three-letter label for day selectors ("Mon").
    pub fn short_label(&self) -> &'static str {
        match self {
            Day::Sunday => "Sun",
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
            Day::Saturday => "Sat",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Day::Sunday,
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
        }
    }
}

/// One activity in a day's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Task {
    pub icon: &'static str,
    pub text: &'static str,
    /// Free-form, e.g. "10 min" or "Varies".
    pub duration: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub title: &'static str,
    pub tasks: &'static [Task],
}

/// The seven-day schedule, indexed by [`Day`].
#[derive(Debug, PartialEq, Eq)]
pub struct WeeklyPlan {
    days: [DayPlan; 7],
}

impl WeeklyPlan {
    pub const fn new(days: [DayPlan; 7]) -> Self {
        Self { days }
    }

    /// The built-in MindCare week.
    pub fn standard() -> &'static WeeklyPlan {
        &STANDARD_PLAN
    }

    pub fn day(&self, day: Day) -> &DayPlan {
        &self.days[day.index()]
    }

    pub fn task_count(&self, day: Day) -> usize {
        self.day(day).tasks.len()
    }
}

macro_rules! task {
    ($icon:literal, $text:literal, $duration:literal) => {
        Task {
            icon: $icon,
            text: $text,
            duration: $duration,
        }
    };
}

static STANDARD_PLAN: WeeklyPlan = WeeklyPlan {
    days: [
        DayPlan {
            title: "Restful Sunday",
            tasks: &[
                task!("🛌", "Sleep in or take a nap", "Varies"),
                task!("🗓", "Plan for the week ahead", "15 min"),
                task!("🛁", "Take a relaxing bath", "20 min"),
                task!("😌", "Mindful listening practice", "10 min"),
            ],
        },
        DayPlan {
            title: "Fresh Start Monday",
            tasks: &[
                task!("🧘", "Morning meditation", "10 min"),
                task!("✍", "Gratitude journaling", "5 min"),
                task!("🤸", "Light yoga or stretching", "15 min"),
                task!("🫁", "Evening breathing exercises", "5 min"),
            ],
        },
        DayPlan {
            title: "Mindful Movement Tuesday",
            tasks: &[
                task!("🚶", "20-minute walk in nature", "20 min"),
                task!("🧘", "Body scan meditation", "15 min"),
                task!("🎨", "Creative expression (art/music)", "20 min"),
                task!("🤔", "Evening reflection", "5 min"),
            ],
        },
        DayPlan {
            title: "Connection Wednesday",
            tasks: &[
                task!("📞", "Call a friend or family member", "15 min"),
                task!("❤", "Loving-kindness meditation", "10 min"),
                task!("🤝", "Social activity or hobby", "30 min"),
                task!("🙏", "Gratitude practice", "5 min"),
            ],
        },
        DayPlan {
            title: "Active Wellness Thursday",
            tasks: &[
                task!("💃", "Cardio exercise (dancing, cycling)", "30 min"),
                task!("💪", "Progressive muscle relaxation", "15 min"),
                task!("🥗", "Healthy meal prep", "20 min"),
                task!("😴", "Sleep hygiene routine", "10 min"),
            ],
        },
        DayPlan {
            title: "Reflective Friday",
            tasks: &[
                task!("✨", "Morning affirmations", "5 min"),
                task!("📖", "Weekly journal reflection", "20 min"),
                task!("☯", "Gentle yoga or tai chi", "20 min"),
                task!("🎵", "Music therapy session", "15 min"),
            ],
        },
        DayPlan {
            title: "Joyful Saturday",
            tasks: &[
                task!("🌳", "Spend time outdoors", "30 min"),
                task!("😂", "Watch a funny movie or show", "Varies"),
                task!("🕹", "Engage in a favorite hobby", "45 min"),
                task!("📵", "Digital detox for 1 hour", "60 min"),
            ],
        },
    ],
};
