//! Quick-start sample prompts for a fresh chat view.
//!
//! The chat page offers a few one-click starter messages before the first
//! turn. The daily-plan prompt is personalized from the saved profile when
//! one exists; the rest are fixed samples.

use wellspring_types::profile::{ActivityLevel, Goal, Profile};

/// Build the personalized daily-plan starter prompt.
///
/// Falls back to a representative example when no profile is saved, so the
/// button always shows a concrete, sendable message.
pub fn plan_prompt(profile: Option<&Profile>) -> String {
    let Some(profile) = profile.filter(|p| !p.is_empty()) else {
        return "Make my plan for today. I am 22, 175 cm, 78 kg, male, \
                moderate, goal lose weight, vegetarian, budget on."
            .to_string();
    };

    let age = profile.age.unwrap_or(22);
    let height = profile.height_cm.unwrap_or(175.0) as i64;
    let weight = profile.weight_kg.unwrap_or(78.0) as i64;
    let sex = profile.sex.as_deref().unwrap_or("male");
    let activity = profile.activity.unwrap_or(ActivityLevel::Moderate);

    let goal_phrase = match profile.goal.unwrap_or(Goal::Lose) {
        Goal::Lose => "goal lose weight",
        Goal::Maintain => "goal maintain weight",
        Goal::Gain => "goal gain weight",
    };

    format!(
        "Make my plan for today. I am {age}, {height} cm, {weight} kg, {sex}, \
         {activity}, {goal_phrase}, vegetarian, budget on."
    )
}

/// The quick-start samples shown on a fresh chat page, plan prompt first.
pub fn sample_prompts(profile: Option<&Profile>) -> Vec<String> {
    vec![
        plan_prompt(profile),
        "Make lunch vegetarian under 8 dollars and keep totals within ten percent.".to_string(),
        "End of day recap. I ate breakfast as planned, swapped lunch to tofu stir fry, \
         skipped the snack."
            .to_string(),
        "Show my mini grocery list from the plan.".to_string(),
    ]
}
