//! Mood check-in and the response shown for each mood.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Great,
    Good,
    Okay,
    #[serde(rename = "Not Good")]
    NotGood,
    Terrible,
}

/// Title and follow-up text for a logged mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodResponse {
    pub title: &'static str,
    pub text: &'static str,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Okay, Mood::NotGood, Mood::Terrible];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::NotGood => "Not Good",
            Mood::Terrible => "Terrible",
        }
    }

    pub fn response(&self) -> MoodResponse {
        let (title, text) = match self {
            Mood::Great => (
                "That's wonderful to hear! 😄",
                "Keep embracing that positive energy! What's one thing that made you feel great today?",
            ),
            Mood::Good => (
                "Glad you're feeling good! 😊",
                "It's great to have positive days. Remember this feeling and maybe try a gratitude exercise to enhance it.",
            ),
            Mood::Okay => (
                "Feeling okay is perfectly fine. 😐",
                "Sometimes a neutral day is a good day. If you want to boost your mood, a short walk or some music might help.",
            ),
            Mood::NotGood => (
                "I'm sorry you're feeling down. 😔",
                "Remember that feelings are temporary. Would you like to talk about it or try a relaxation exercise?",
            ),
            Mood::Terrible => (
                "I'm here for you. 😢",
                "It sounds like you're having a very tough time. Please be gentle with yourself. If you are in crisis, reach out to emergency services.",
            ),
        };
        MoodResponse { title, text }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Accepts labels case-insensitively, with or without the space or
    /// an underscore/hyphen ("not good", "not-good", "NotGood").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label().replace(' ', "").to_ascii_lowercase() == normalized)
            .ok_or_else(|| ValidationError::UnknownMood(s.to_string()))
    }
}
