//! Persisted key space. These names are shared with existing stored data.

pub const LAST_COMPLETION_DATE: &str = "streak_lastCompletionDate";
pub const STREAK_COUNT: &str = "streak_count";
pub const SESSIONS_TOTAL: &str = "sessions_total";

pub const PLAN_LAST_UPDATE_DATE: &str = "plan_lastUpdateDate";
pub const PLAN_STATUS: &str = "wellnessPlanStatus";

pub const GRATITUDE_HISTORY: &str = "gratitudeHistory";
pub const GOALS: &str = "userProfile_goals";

pub const PROFILE_AVATAR: &str = "userProfile_avatar";
pub const PROFILE_NAME: &str = "userProfile_name";
pub const PROFILE_STATUS: &str = "userProfile_status";

pub const THEME: &str = "theme";
pub const CURRENT_MOOD: &str = "mood_current";
