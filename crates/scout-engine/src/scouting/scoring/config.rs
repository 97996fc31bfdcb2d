use serde::{Deserialize, Serialize};

/// Flat point values for checkbox-style answers. Tier questions carry their own points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub auto_functional: i32,
    pub auto_leave_start_zone: i32,
    pub auto_scores_in_hub: i32,
    pub auto_climb: i32,
    pub auto_ranking_point_bonus: i32,
    pub positioning_both_bonus: i32,
    pub movement_bonus: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            auto_functional: 5,
            auto_leave_start_zone: 3,
            auto_scores_in_hub: 5,
            auto_climb: 15,
            auto_ranking_point_bonus: 6,
            positioning_both_bonus: 5,
            movement_bonus: 3,
        }
    }
}
