//! Centralized defaults for the user simulator
//!
//! Single source of truth for the dialogue constants the settings fall back
//! to when no config file or environment override is present.

/// Dialogue run limits
pub mod run {
    /// Round at which the user gives up and the episode fails
    pub const MAX_ROUND_NUM: u32 = 20;
}

/// Slot names with special meaning to the simulated user
pub mod slots {
    /// Primary-key slot identifying the proposed record
    pub const PRIMARY_KEY: &str = "ticket";

    /// Slots the user always opens with when its goal has them
    pub const REQUIRED_INIT_INFORMS: &[&str] = &["moviename"];

    /// Slots that are never checked against the proposed record
    pub const NO_QUERY: &[&str] = &["numberofpeople", PRIMARY_KEY];

    /// Slots the user never relaxes after a failed match
    pub const MATCH_RELAX_EXCLUDED: &[&str] = &["activity"];
}

/// Reward shaping defaults
pub mod reward {
    /// Paid on every turn
    pub const TURN_PENALTY: f64 = -1.0;

    /// Success pays `SUCCESS_MULTIPLIER * max_round`
    pub const SUCCESS_MULTIPLIER: f64 = 2.0;

    /// Failure costs `FAIL_MULTIPLIER * max_round`
    pub const FAIL_MULTIPLIER: f64 = 1.0;

    pub const UNSUITABLE_PENALTY: f64 = -1.0;

    pub const NO_VALUE_PENALTY: f64 = -0.5;

    pub const GOOD_INFORM_BONUS: f64 = 0.5;
}

/// Default data file locations
pub mod paths {
    pub const GOALS: &str = "data/user_goals.json";

    pub const DATABASE: &str = "data/database.json";
}
