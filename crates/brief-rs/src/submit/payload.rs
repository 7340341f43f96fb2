//! Wire payload sent to the submission endpoint.

use serde::Serialize;

use crate::form::{AnswerSet, ChoiceField, ScalarField};

/// Separator used when flattening the distribution set.
pub const DISTRIBUTION_SEPARATOR: &str = ", ";

/// The answer set flattened for transport.
///
/// Every field is a string: scalars pass through, choices become their wire
/// id (empty when unset), and the distribution set is joined with
/// [`DISTRIBUTION_SEPARATOR`] for readability at the receiving end. The
/// transform is one-way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub email: String,
    pub social_handle: String,
    pub niche: String,
    pub video_purpose: String,
    pub video_purpose_other: String,
    pub target_audience: String,
    pub call_to_action: String,
    pub editing_style: String,
    pub reference_videos: String,
    pub brand_guidelines: String,
    pub final_video_duration: String,
    pub distribution: String,
    pub budget_type: String,
    pub budget: String,
}

impl SubmissionPayload {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let scalar = |f: ScalarField| answers.scalar(f).to_string();
        let choice = |f: ChoiceField| {
            answers
                .choice(f)
                .map(|c| c.id().to_string())
                .unwrap_or_default()
        };
        let distribution = answers
            .distribution()
            .iter()
            .map(|p| p.id())
            .collect::<Vec<_>>()
            .join(DISTRIBUTION_SEPARATOR);

        Self {
            full_name: scalar(ScalarField::FullName),
            email: scalar(ScalarField::Email),
            social_handle: scalar(ScalarField::SocialHandle),
            niche: scalar(ScalarField::Niche),
            video_purpose: choice(ChoiceField::Purpose),
            video_purpose_other: scalar(ScalarField::PurposeOther),
            target_audience: scalar(ScalarField::TargetAudience),
            call_to_action: scalar(ScalarField::CallToAction),
            editing_style: choice(ChoiceField::EditingStyle),
            reference_videos: scalar(ScalarField::ReferenceVideos),
            brand_guidelines: scalar(ScalarField::BrandGuidelines),
            final_video_duration: choice(ChoiceField::Duration),
            distribution,
            budget_type: choice(ChoiceField::BudgetType),
            budget: choice(ChoiceField::BudgetTier),
        }
    }
}
