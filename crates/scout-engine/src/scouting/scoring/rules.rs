use super::super::answers::{
    tier_points, AnswerSet, AutonomousAnswers, ConsiderationAnswers, EndgameAnswers, Positioning,
    TeleopAnswers, Tier,
};
use super::super::form::QuestionKey;
use super::config::ScoringRules;
use super::{ScoreComponent, ScoreSection};

/// Accumulates contributions for one section. Unselected tiers and unchecked flags are
/// not recorded at all, so the component list only shows what actually scored. Sums
/// saturate at the `i32` bounds since tier codes come straight from the client.
struct SectionTally<'a> {
    section: ScoreSection,
    components: &'a mut Vec<ScoreComponent>,
    points: i32,
}

impl<'a> SectionTally<'a> {
    fn new(section: ScoreSection, components: &'a mut Vec<ScoreComponent>) -> Self {
        Self {
            section,
            components,
            points: 0,
        }
    }

    fn add(&mut self, question: QuestionKey, points: i32) {
        self.components.push(ScoreComponent {
            section: self.section,
            question,
            points,
        });
        self.points = self.points.saturating_add(points);
    }

    fn flag(&mut self, question: QuestionKey, checked: bool, points: i32) {
        if checked {
            self.add(question, points);
        }
    }

    fn tier(&mut self, question: QuestionKey, tier: Tier) {
        if tier.is_some() {
            self.add(question, tier_points(tier));
        }
    }

    fn finish(self) -> i32 {
        self.points
    }
}

pub(crate) struct SectionTotals {
    pub autonomous: i32,
    pub teleop: i32,
    pub endgame: i32,
    pub considerations: i32,
}

pub(crate) fn score_answers(
    answers: &AnswerSet,
    rules: &ScoringRules,
) -> (Vec<ScoreComponent>, SectionTotals) {
    let mut components = Vec::new();

    let totals = SectionTotals {
        autonomous: score_autonomous(&answers.autonomous, rules, &mut components),
        teleop: score_teleop(&answers.teleop, rules, &mut components),
        endgame: score_endgame(&answers.endgame, &mut components),
        considerations: score_considerations(&answers.considerations, &mut components),
    };

    (components, totals)
}

fn score_autonomous(
    auto: &AutonomousAnswers,
    rules: &ScoringRules,
    components: &mut Vec<ScoreComponent>,
) -> i32 {
    let mut tally = SectionTally::new(ScoreSection::Autonomous, components);

    tally.flag(QuestionKey::AutoFunctional, auto.functional, rules.auto_functional);
    tally.flag(
        QuestionKey::AutoLeaveZone,
        auto.leave_start_zone,
        rules.auto_leave_start_zone,
    );
    tally.flag(
        QuestionKey::AutoScoresHub,
        auto.scores_in_hub,
        rules.auto_scores_in_hub,
    );

    // Fuel and accuracy are only meaningful once the robot scored in the hub.
    if auto.scores_in_hub {
        tally.tier(QuestionKey::AutoFuelAmount, auto.fuel_amount);
        tally.tier(QuestionKey::AutoAccuracy, auto.accuracy);
    }

    tally.flag(QuestionKey::AutoClimb, auto.climb, rules.auto_climb);

    for _ in &auto.ranking_points {
        tally.add(
            QuestionKey::AutoRankingPoints,
            rules.auto_ranking_point_bonus,
        );
    }

    tally.finish()
}

fn score_teleop(
    teleop: &TeleopAnswers,
    rules: &ScoringRules,
    components: &mut Vec<ScoreComponent>,
) -> i32 {
    let mut tally = SectionTally::new(ScoreSection::Teleop, components);

    match teleop {
        TeleopAnswers::Defensive {
            defense_type,
            defense_efficiency,
        } => {
            tally.tier(QuestionKey::DefenseType, *defense_type);
            tally.tier(QuestionKey::DefenseEfficiency, *defense_efficiency);
        }
        TeleopAnswers::Offensive {
            fuel_capacity,
            cycle_speed,
            score_efficiency,
            positioning,
            inactive_hub,
            movement,
        } => {
            tally.tier(QuestionKey::FuelCapacity, *fuel_capacity);
            tally.tier(QuestionKey::CycleSpeed, *cycle_speed);
            tally.tier(QuestionKey::ScoreEfficiency, *score_efficiency);
            tally.flag(
                QuestionKey::Positioning,
                positioning.contains(&Positioning::Both),
                rules.positioning_both_bonus,
            );
            tally.tier(QuestionKey::InactiveHub, *inactive_hub);
            for _ in movement {
                tally.add(QuestionKey::Movement, rules.movement_bonus);
            }
        }
    }

    tally.finish()
}

fn score_endgame(endgame: &EndgameAnswers, components: &mut Vec<ScoreComponent>) -> i32 {
    let mut tally = SectionTally::new(ScoreSection::Endgame, components);

    if endgame.climb_attempted {
        tally.tier(QuestionKey::ClimbLevel, endgame.climb_level);
        tally.tier(QuestionKey::ClimbSpeed, endgame.climb_speed);
    }
    tally.tier(QuestionKey::EndgameRankingPoint, endgame.ranking_point);

    tally.finish()
}

fn score_considerations(
    considerations: &ConsiderationAnswers,
    components: &mut Vec<ScoreComponent>,
) -> i32 {
    let mut tally = SectionTally::new(ScoreSection::Considerations, components);

    tally.tier(QuestionKey::Penalties, considerations.penalties);
    tally.tier(QuestionKey::Teamwork, considerations.teamwork);
    tally.tier(QuestionKey::Consistency, considerations.consistency);
    tally.tier(QuestionKey::Reliability, considerations.reliability);

    tally.finish()
}
