//! The answer set and its pure derivations.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::fields::{Choice, ChoiceField, RequiredField, ScalarField};
use super::options::{BudgetTier, BudgetType, EditingStyle, Platform, VideoDuration, VideoPurpose};

/// Every answer the client has given so far.
///
/// Fields are private: writes go through [`set_scalar`](Self::set_scalar),
/// [`set_choice`](Self::set_choice) and
/// [`toggle_distribution`](Self::toggle_distribution) so the budget
/// invariants hold. Conditional visibility is never stored; it is derived
/// from the current values on every call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnswerSet {
    full_name: String,
    email: String,
    social_handle: String,
    niche: String,
    video_purpose: Option<VideoPurpose>,
    video_purpose_other: String,
    target_audience: String,
    call_to_action: String,
    editing_style: Option<EditingStyle>,
    reference_videos: String,
    brand_guidelines: String,
    final_video_duration: Option<VideoDuration>,
    distribution: BTreeSet<Platform>,
    budget_type: Option<BudgetType>,
    budget: Option<BudgetTier>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Writes ──

    /// Overwrite a free-text field. No validation happens here; required
    /// fields are checked when the form is submitted.
    pub fn set_scalar(&mut self, field: ScalarField, value: impl Into<String>) {
        *self.scalar_mut(field) = value.into();
    }

    /// Overwrite a single-choice field.
    ///
    /// Choosing a budget type always clears the budget tier, because the
    /// tier lists differ between budget types. A tier not offered under the
    /// current budget type is ignored and `false` is returned.
    pub fn set_choice(&mut self, choice: Choice) -> bool {
        match choice {
            Choice::Purpose(v) => self.video_purpose = Some(v),
            Choice::EditingStyle(v) => self.editing_style = Some(v),
            Choice::Duration(v) => self.final_video_duration = Some(v),
            Choice::BudgetType(v) => {
                self.budget_type = Some(v);
                self.budget = None;
            }
            Choice::BudgetTier(tier) => {
                let offered = self.budget_type.is_some_and(|bt| tier.offered_for(bt));
                if !offered {
                    warn!(
                        "Ignoring budget tier {tier} not offered under budget type {:?}",
                        self.budget_type.map(BudgetType::id)
                    );
                    return false;
                }
                self.budget = Some(tier);
            }
        }
        debug!("{} = {}", choice.field().key(), choice.id());
        true
    }

    /// Reset a single-choice field to unset. Clearing the budget type also
    /// clears the tier.
    pub fn clear_choice(&mut self, field: ChoiceField) {
        match field {
            ChoiceField::Purpose => self.video_purpose = None,
            ChoiceField::EditingStyle => self.editing_style = None,
            ChoiceField::Duration => self.final_video_duration = None,
            ChoiceField::BudgetType => {
                self.budget_type = None;
                self.budget = None;
            }
            ChoiceField::BudgetTier => self.budget = None,
        }
    }

    /// Add `platform` if absent, remove it if present. Returns whether the
    /// platform is selected afterwards.
    pub fn toggle_distribution(&mut self, platform: Platform) -> bool {
        if self.distribution.remove(&platform) {
            false
        } else {
            self.distribution.insert(platform);
            true
        }
    }

    /// Set membership explicitly, the checkbox-callback form of
    /// [`toggle_distribution`](Self::toggle_distribution).
    pub fn set_distribution(&mut self, platform: Platform, checked: bool) {
        if checked {
            self.distribution.insert(platform);
        } else {
            self.distribution.remove(&platform);
        }
    }

    // ── Reads ──

    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::FullName => &self.full_name,
            ScalarField::Email => &self.email,
            ScalarField::SocialHandle => &self.social_handle,
            ScalarField::Niche => &self.niche,
            ScalarField::PurposeOther => &self.video_purpose_other,
            ScalarField::TargetAudience => &self.target_audience,
            ScalarField::CallToAction => &self.call_to_action,
            ScalarField::ReferenceVideos => &self.reference_videos,
            ScalarField::BrandGuidelines => &self.brand_guidelines,
        }
    }

    fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::FullName => &mut self.full_name,
            ScalarField::Email => &mut self.email,
            ScalarField::SocialHandle => &mut self.social_handle,
            ScalarField::Niche => &mut self.niche,
            ScalarField::PurposeOther => &mut self.video_purpose_other,
            ScalarField::TargetAudience => &mut self.target_audience,
            ScalarField::CallToAction => &mut self.call_to_action,
            ScalarField::ReferenceVideos => &mut self.reference_videos,
            ScalarField::BrandGuidelines => &mut self.brand_guidelines,
        }
    }

    /// Current value of a single-choice field, `None` when unset.
    pub fn choice(&self, field: ChoiceField) -> Option<Choice> {
        match field {
            ChoiceField::Purpose => self.video_purpose.map(Choice::Purpose),
            ChoiceField::EditingStyle => self.editing_style.map(Choice::EditingStyle),
            ChoiceField::Duration => self.final_video_duration.map(Choice::Duration),
            ChoiceField::BudgetType => self.budget_type.map(Choice::BudgetType),
            ChoiceField::BudgetTier => self.budget.map(Choice::BudgetTier),
        }
    }

    pub fn video_purpose(&self) -> Option<VideoPurpose> {
        self.video_purpose
    }

    pub fn editing_style(&self) -> Option<EditingStyle> {
        self.editing_style
    }

    pub fn final_video_duration(&self) -> Option<VideoDuration> {
        self.final_video_duration
    }

    pub fn budget_type(&self) -> Option<BudgetType> {
        self.budget_type
    }

    pub fn budget(&self) -> Option<BudgetTier> {
        self.budget
    }

    pub fn distribution(&self) -> &BTreeSet<Platform> {
        &self.distribution
    }

    pub fn is_distributed_on(&self, platform: Platform) -> bool {
        self.distribution.contains(&platform)
    }

    // ── Derivations ──

    /// The reference-video and brand-guideline questions are shown only for
    /// the custom editing style. Hiding them keeps whatever was typed.
    pub fn is_custom_style_section_visible(&self) -> bool {
        self.editing_style == Some(EditingStyle::Custom)
    }

    /// Which tier list to render under the budget question, `None` while no
    /// budget type is chosen.
    pub fn budget_subsection(&self) -> Option<BudgetType> {
        self.budget_type
    }

    pub fn is_other_purpose_visible(&self) -> bool {
        self.video_purpose == Some(VideoPurpose::Other)
    }

    /// Required fields that are still empty, in form order.
    ///
    /// Text counts as given as soon as it is non-empty, whitespace included.
    /// The email is the exception: surrounding whitespace is ignored and
    /// a non-empty value must also pass [`is_email_address`], otherwise
    /// [`RequiredField::EmailFormat`] is reported in its place.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        let scalar_missing = |f: ScalarField| f.required() && self.scalar(f).is_empty();

        if scalar_missing(ScalarField::FullName) {
            missing.push(RequiredField::Scalar(ScalarField::FullName));
        }
        let email = self.email.trim();
        if email.is_empty() {
            missing.push(RequiredField::Scalar(ScalarField::Email));
        } else if !is_email_address(email) {
            missing.push(RequiredField::EmailFormat);
        }
        if self.video_purpose.is_none() {
            missing.push(RequiredField::Choice(ChoiceField::Purpose));
        }
        for f in [ScalarField::TargetAudience, ScalarField::CallToAction] {
            if scalar_missing(f) {
                missing.push(RequiredField::Scalar(f));
            }
        }
        if self.editing_style.is_none() {
            missing.push(RequiredField::Choice(ChoiceField::EditingStyle));
        }
        if self.final_video_duration.is_none() {
            missing.push(RequiredField::Choice(ChoiceField::Duration));
        }
        if self.distribution.is_empty() {
            missing.push(RequiredField::Distribution);
        }
        if self.budget_type.is_none() {
            missing.push(RequiredField::Choice(ChoiceField::BudgetType));
        }
        if self.budget.is_none() {
            missing.push(RequiredField::Choice(ChoiceField::BudgetTier));
        }
        missing
    }

    /// Drop a budget tier that is not offered under the current budget type.
    ///
    /// Answer sets built through the setters never need this; it guards
    /// values that arrive through deserialization.
    pub fn normalize(&mut self) {
        if let Some(tier) = self.budget
            && !self.budget_type.is_some_and(|bt| tier.offered_for(bt))
        {
            warn!("Dropping budget tier {tier}: not offered under the chosen budget type");
            self.budget = None;
        }
    }
}

/// Loose address check: a non-empty local part, a single `@`, a non-empty
/// domain of dot-separated labels, and no whitespace anywhere.
pub fn is_email_address(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AnswerSet {
        let mut a = AnswerSet::new();
        a.set_scalar(ScalarField::FullName, "A");
        a.set_scalar(ScalarField::Email, "a@b.com");
        a.set_scalar(ScalarField::TargetAudience, "x");
        a.set_scalar(ScalarField::CallToAction, "y");
        a.set_choice(Choice::Purpose(VideoPurpose::GrowAudience));
        a.set_choice(Choice::EditingStyle(EditingStyle::Portfolio));
        a.set_choice(Choice::Duration(VideoDuration::Short));
        a.toggle_distribution(Platform::TikTok);
        a.set_choice(Choice::BudgetType(BudgetType::PerVideo));
        a.set_choice(Choice::BudgetTier(BudgetTier::Under100));
        a
    }

    #[test]
    fn defaults_are_empty_and_unset() {
        let a = AnswerSet::new();
        for f in ScalarField::ALL {
            assert_eq!(a.scalar(*f), "");
        }
        for f in ChoiceField::ALL {
            assert!(a.choice(*f).is_none());
        }
        assert!(a.distribution().is_empty());
    }

    #[test]
    fn toggle_parity_decides_membership() {
        let sequence = [
            Platform::TikTok,
            Platform::InstagramReels,
            Platform::TikTok,
            Platform::YoutubeShorts,
            Platform::TikTok,
            Platform::InstagramReels,
        ];
        let mut a = AnswerSet::new();
        for p in sequence {
            a.toggle_distribution(p);
        }
        for p in Platform::ALL {
            let toggles = sequence.iter().filter(|s| *s == p).count();
            assert_eq!(a.is_distributed_on(*p), toggles % 2 == 1, "{p}");
        }
    }

    #[test]
    fn double_toggle_is_noop() {
        let mut a = minimal();
        let before = a.clone();
        a.toggle_distribution(Platform::YoutubeShorts);
        a.toggle_distribution(Platform::YoutubeShorts);
        assert_eq!(a, before);
    }

    #[test]
    fn set_distribution_is_idempotent() {
        let mut a = AnswerSet::new();
        a.set_distribution(Platform::TikTok, true);
        a.set_distribution(Platform::TikTok, true);
        assert_eq!(a.distribution().len(), 1);
        a.set_distribution(Platform::TikTok, false);
        assert!(a.distribution().is_empty());
    }

    #[test]
    fn budget_type_clears_tier() {
        let mut a = minimal();
        assert_eq!(a.budget(), Some(BudgetTier::Under100));

        a.set_choice(Choice::BudgetType(BudgetType::MonthlyPackage));
        assert_eq!(a.budget(), None);

        a.set_choice(Choice::BudgetTier(BudgetTier::Unsure));
        a.set_choice(Choice::BudgetType(BudgetType::MonthlyPackage));
        assert_eq!(a.budget(), None, "reselecting the same type also clears");
    }

    #[test]
    fn tier_from_other_budget_type_is_rejected() {
        let mut a = AnswerSet::new();
        assert!(!a.set_choice(Choice::BudgetTier(BudgetTier::Under100)));
        a.set_choice(Choice::BudgetType(BudgetType::MonthlyPackage));
        assert!(!a.set_choice(Choice::BudgetTier(BudgetTier::Under100)));
        assert_eq!(a.budget(), None);
        assert!(a.set_choice(Choice::BudgetTier(BudgetTier::From800To1500)));
        assert_eq!(a.budget(), Some(BudgetTier::From800To1500));
    }

    #[test]
    fn custom_style_visibility_tracks_style() {
        let mut a = AnswerSet::new();
        assert!(!a.is_custom_style_section_visible());
        a.set_choice(Choice::EditingStyle(EditingStyle::Portfolio));
        assert!(!a.is_custom_style_section_visible());
        a.set_choice(Choice::EditingStyle(EditingStyle::Custom));
        assert!(a.is_custom_style_section_visible());
    }

    #[test]
    fn hiding_custom_section_keeps_its_text() {
        let mut a = AnswerSet::new();
        a.set_choice(Choice::EditingStyle(EditingStyle::Custom));
        a.set_scalar(ScalarField::ReferenceVideos, "https://example.com/reel");
        a.set_choice(Choice::EditingStyle(EditingStyle::Portfolio));
        assert!(!a.is_custom_style_section_visible());
        assert_eq!(
            a.scalar(ScalarField::ReferenceVideos),
            "https://example.com/reel"
        );
    }

    #[test]
    fn other_purpose_and_budget_subsection() {
        let mut a = AnswerSet::new();
        assert!(!a.is_other_purpose_visible());
        assert_eq!(a.budget_subsection(), None);
        a.set_choice(Choice::Purpose(VideoPurpose::Other));
        a.set_choice(Choice::BudgetType(BudgetType::PerVideo));
        assert!(a.is_other_purpose_visible());
        assert_eq!(a.budget_subsection(), Some(BudgetType::PerVideo));
    }

    #[test]
    fn missing_required_lists_everything_on_empty_form() {
        let keys: Vec<_> = AnswerSet::new()
            .missing_required()
            .iter()
            .map(|f| f.key())
            .collect();
        assert_eq!(
            keys,
            vec![
                "fullName",
                "email",
                "videoPurpose",
                "targetAudience",
                "callToAction",
                "editingStyle",
                "finalVideoDuration",
                "distribution",
                "budgetType",
                "budget",
            ]
        );
    }

    #[test]
    fn minimal_answers_are_complete() {
        assert!(minimal().missing_required().is_empty());
    }

    #[test]
    fn whitespace_text_counts_as_given() {
        let mut a = minimal();
        a.set_scalar(ScalarField::TargetAudience, "   ");
        a.set_scalar(ScalarField::FullName, " ");
        assert!(a.missing_required().is_empty());
    }

    #[test]
    fn blank_email_is_missing() {
        let mut a = minimal();
        a.set_scalar(ScalarField::Email, "   ");
        assert_eq!(
            a.missing_required(),
            vec![RequiredField::Scalar(ScalarField::Email)]
        );
    }

    #[test]
    fn malformed_email_is_reported_separately() {
        let mut a = minimal();
        for bad in ["ana", "ana@", "@b.com", "a b@c.com", "a@b@c", "a@b..com"] {
            a.set_scalar(ScalarField::Email, bad);
            assert_eq!(
                a.missing_required(),
                vec![RequiredField::EmailFormat],
                "{bad}"
            );
        }
        a.set_scalar(ScalarField::Email, "  ana@b.com ");
        assert!(a.missing_required().is_empty());
    }

    #[test]
    fn email_address_check() {
        assert!(is_email_address("a@b.com"));
        assert!(is_email_address("a@localhost"));
        assert!(is_email_address("first.last+tag@mail.example.org"));
        assert!(!is_email_address("a@.com"));
        assert!(!is_email_address("a@b."));
        assert!(!is_email_address(""));
    }

    #[test]
    fn clear_budget_type_clears_tier() {
        let mut a = minimal();
        a.clear_choice(ChoiceField::BudgetType);
        assert_eq!(a.budget_type(), None);
        assert_eq!(a.budget(), None);
    }

    #[test]
    fn normalize_drops_mismatched_tier() {
        let mut a: AnswerSet = serde_json::from_value(serde_json::json!({
            "budgetType": "monthly-package",
            "budget": "<100",
        }))
        .unwrap();
        a.normalize();
        assert_eq!(a.budget(), None);
        assert_eq!(a.budget_type(), Some(BudgetType::MonthlyPackage));
    }
}
