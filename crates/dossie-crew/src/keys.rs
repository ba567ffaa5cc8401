//! Well-known memory keys.

/// Raw audience description as typed or loaded
pub const AUDIENCE_RAW: &str = "audience_raw";
/// Pretty JSON of the extracted signals
pub const AUDIENCE_SIGNALS: &str = "audience_signals";
/// Pretty JSON of the inferred decisions
pub const DECISIONS: &str = "decisions";
pub const SHOW_WINDOW: &str = "show_window";
pub const THEME: &str = "theme";
pub const MISSION: &str = "mission";

pub const PROGRAM: &str = "program";
pub const PRESS_RELEASE: &str = "press_release";
pub const TECHNICAL_SCHEDULE: &str = "technical_schedule";
pub const DATA_TO_DECISIONS: &str = "data_to_decisions";

/// Keys that must exist before a generation run
pub const GENERATION_PREREQUISITES: [&str; 3] = [AUDIENCE_SIGNALS, DECISIONS, SHOW_WINDOW];
