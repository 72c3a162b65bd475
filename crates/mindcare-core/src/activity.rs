//! Guided activities that live outside the app (playlists, guides).
//!
//! Launching one counts as a session; opening the link is up to the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Progressive muscle relaxation playlist.
    Pmr,
    Music,
    Meditation,
    /// 5-4-3-2-1 grounding guide.
    Grounding,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Pmr,
        Activity::Music,
        Activity::Meditation,
        Activity::Grounding,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Activity::Pmr => "pmr",
            Activity::Music => "music",
            Activity::Meditation => "meditation",
            Activity::Grounding => "grounding",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Activity::Pmr => "Progressive Muscle Relaxation",
            Activity::Music => "Music Therapy",
            Activity::Meditation => "Guided Meditation",
            Activity::Grounding => "5-4-3-2-1 Grounding",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Activity::Pmr => {
                "https://youtube.com/playlist?list=PLZoDGrriQgsLb5sfR2lldfGcKoQdU_t5S"
            }
            Activity::Music => {
                "https://www.youtube.com/watch?v=F_Yv28s651k&list=PLrYj8L2vj0V9q4d6x-q4V4F_548M0z9Sg"
            }
            Activity::Meditation => {
                "https://www.youtube.com/playlist?list=PLe8n4G3cYFzAzIvEN5vGG_DmNX4OIhRuN"
            }
            Activity::Grounding => {
                "https://mentalhealthcenterkids.com/blogs/articles/54321-grounding-technique"
            }
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Activity::ALL
            .into_iter()
            .find(|activity| activity.name() == wanted)
            .ok_or_else(|| ValidationError::UnknownActivity(s.to_string()))
    }
}
