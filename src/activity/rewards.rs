use crate::config::RewardsConfig;
use std::collections::HashMap;

/// XP awarded for any activity missing from the table.
pub const DEFAULT_POINTS: u32 = 2;

const BUILTIN_POINTS: &[(&str, u32)] = &[
    // Friend
    ("city_shuffle", 3),
    ("nickname_game", 3),
    ("text_truth_or_dare", 3),
    ("dream_room_builder", 5),
    ("friendship_scrapbook", 5),
    ("scenario_shuffle", 5),
    ("letter_from_the_future", 8),
    ("undo_button", 8),
    ("friendship_farewell", 8),
    // Romantic
    ("date_duel", 3),
    ("flirt_or_fail", 3),
    ("whats_in_my_pocket", 3),
    ("love_in_another_life", 5),
    ("daily_debrief", 5),
    ("mood_meal", 5),
    ("unsent_messages", 8),
    ("i_would_never", 8),
    ("breakup_simulation", 8),
    // Mentor
    ("one_minute_advice_column", 3),
    ("word_of_the_day", 3),
    ("compliment_mirror", 3),
    ("if_i_were_you", 5),
    ("burning_questions_jar", 5),
    ("skill_swap_simulation", 5),
    ("buried_memory_excavation", 8),
    ("failure_autopsy", 8),
    ("letters_you_never_got", 8),
    // Spiritual
    ("symbol_speak", 3),
    ("spiritual_whisper", 3),
    ("story_fragment", 3),
    ("desire_detachment_game", 5),
    ("god_in_the_crowd", 5),
    ("past_life_memory", 5),
    ("karma_knot", 8),
    ("mini_moksha_simulation", 8),
    ("divine_mirror", 8),
];

/// Read-only activity → XP table, built once at startup.
#[derive(Debug, Clone)]
pub struct RewardCatalog {
    points: HashMap<String, u32>,
    default_points: u32,
}

impl RewardCatalog {
    pub fn builtin() -> Self {
        Self {
            points: BUILTIN_POINTS
                .iter()
                .map(|(id, points)| ((*id).to_string(), *points))
                .collect(),
            default_points: DEFAULT_POINTS,
        }
    }

    /// Built-in table with configured overrides and default layered on top.
    pub fn from_config(config: &RewardsConfig) -> Self {
        let mut catalog = Self::builtin();
        catalog.default_points = config.default_points;
        for (id, points) in &config.overrides {
            catalog.points.insert(id.clone(), *points);
        }
        catalog
    }

    /// Unknown identifiers are valid input and map to the default.
    pub fn lookup(&self, activity_id: &str) -> u32 {
        self.points
            .get(activity_id)
            .copied()
            .unwrap_or(self.default_points)
    }

    pub fn default_points(&self) -> u32 {
        self.default_points
    }

    /// All entries, sorted by activity id.
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .points
            .iter()
            .map(|(id, points)| (id.as_str(), *points))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Default for RewardCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
