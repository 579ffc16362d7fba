//! The brand discovery questionnaire

use super::field::FormField;
use super::form_state::Step;

/// Steps of the brand discovery wizard, in order
pub fn discovery_steps() -> Vec<Step> {
    vec![
        Step::new(
            1,
            "Core Basics",
            "Tell us what you are building.",
            vec![
                FormField::text("platform_name", "Platform Name", false).required(),
                FormField::text("platform_description", "What does it do?", true).required(),
                FormField::choice(
                    "stage",
                    "Current Stage",
                    &["Just an idea", "Building the MVP", "Launched", "Scaling"],
                )
                .required(),
            ],
        ),
        Step::new(
            2,
            "Target Audience",
            "Who is it for?",
            vec![
                FormField::multi_select(
                    "usage_group",
                    "User Groups",
                    &[
                        "Students",
                        "Working professionals",
                        "Creators",
                        "Small businesses",
                        "Enterprises",
                        "Families",
                    ],
                )
                .required(),
                FormField::choice(
                    "age_group",
                    "Primary Age Group",
                    &["Under 18", "18-24", "25-34", "35-50", "50+"],
                )
                .required(),
            ],
        ),
        Step::new(
            3,
            "Brand Personality",
            "If the brand were a person...",
            vec![
                FormField::multi_select(
                    "personality",
                    "Personality Traits",
                    &[
                        "Friendly",
                        "Bold",
                        "Trustworthy",
                        "Innovative",
                        "Playful",
                        "Premium",
                        "Calm",
                    ],
                )
                .required(),
                FormField::scale("casual_vs_pro", "Friendly (1) vs Professional (5)"),
                FormField::scale("playful_vs_serious", "Fun (1) vs Serious (5)"),
                FormField::scale("bold_vs_calm", "Bold (1) vs Calm (5)"),
                FormField::scale("minimal_vs_detailed", "Minimal (1) vs Detailed (5)"),
                FormField::scale("young_vs_mature", "Young (1) vs Mature (5)"),
            ],
        ),
        Step::new(
            4,
            "Brand Voice & Tone",
            "How should it sound?",
            vec![FormField::text("avoid_tone", "Any tone we should avoid?", true)],
        ),
        Step::new(
            5,
            "Look & Feel",
            "How should it look?",
            vec![
                FormField::multi_select(
                    "mood",
                    "Visual Mood",
                    &[
                        "Minimal",
                        "Bold",
                        "Playful",
                        "Elegant",
                        "Warm",
                        "Futuristic",
                    ],
                )
                .required(),
                FormField::text("color_preferences", "Color Preferences", false),
                FormField::text("brand_inspiration", "Brands you admire", true),
            ],
        ),
        Step::new(
            6,
            "User Experience",
            "How should people feel?",
            vec![FormField::multi_select(
                "feelings",
                "Desired User Feelings",
                &[
                    "Confident",
                    "Inspired",
                    "Safe",
                    "Excited",
                    "Relaxed",
                    "Empowered",
                ],
            )
            .required()],
        ),
        Step::new(
            7,
            "Brand Essence",
            "Sum it up.",
            vec![
                FormField::text("brand_essence", "We are X for Y", false).required(),
                FormField::text("additional_info", "Anything else?", true),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ordinals_are_sequential() {
        let steps = discovery_steps();
        for (idx, step) in steps.iter().enumerate() {
            assert_eq!(step.ordinal, idx + 1);
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        let steps = discovery_steps();
        let mut seen = HashSet::new();
        for field in steps.iter().flat_map(|s| s.fields.iter()) {
            assert!(seen.insert(field.name.clone()), "duplicate {}", field.name);
        }
    }

    #[test]
    fn test_every_step_has_fields() {
        assert!(discovery_steps().iter().all(|s| !s.fields.is_empty()));
    }

    #[test]
    fn test_personality_step_has_five_scales() {
        let steps = discovery_steps();
        assert_eq!(steps[2].fields.iter().filter(|f| f.is_scale()).count(), 5);
    }
}
