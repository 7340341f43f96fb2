//! Field and choice primitives, and the fixed section layout.
//!
//! Frontends render the form from [`SECTIONS`]. Every helper here is a pure
//! function of the [`AnswerSet`] (plus transient focus for
//! [`label_floats`]), so the TUI and the web API agree on what is visible
//! and what is selected.

use serde::Serialize;

use super::answers::AnswerSet;
use super::fields::{Choice, ChoiceField, ScalarField};
use super::options::Platform;

pub const FORM_TITLE: &str = "Edición de Video para Marcas Personales";

pub const FORM_INTRO: &str = "¡Hola, creador! Este formulario está diseñado para entender tus \
metas y crear contenido vertical que impulse tu marca personal. Complétalo para que podamos \
empezar a crear videos que capturen la atención.";

pub const CONFIRMATION_TITLE: &str = "¡Gracias!";

pub const CONFIRMATION_BODY: &str = "He recibido tu solicitud. Revisaré los detalles y te \
contactaré en las próximas 24 horas para dar los siguientes pasos.";

/// Hint under the purpose question.
pub const PURPOSE_HINT: &str = "Esto nos ayuda a enfocar la edición para obtener resultados.";

pub const DISTRIBUTION_PROMPT: &str = "¿Para qué plataformas es el video?";

/// One control on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum Widget {
    /// Single- or multi-line text input, depending on [`ScalarField::rows`].
    Text(ScalarField),
    /// Exclusive choice, bound to [`AnswerSet::set_choice`].
    Radio(ChoiceField),
    /// Independent platform checkboxes, bound to
    /// [`AnswerSet::toggle_distribution`].
    Distribution,
}

/// A titled group of widgets.
#[derive(Debug, Serialize)]
pub struct Section {
    pub title: &'static str,
    /// Whether the section header carries the "Requerido" badge.
    pub required_badge: bool,
    pub widgets: &'static [Widget],
}

pub const SECTIONS: &[Section] = &[
    Section {
        title: "Parte A: ¿Quién eres?",
        required_badge: true,
        widgets: &[
            Widget::Text(ScalarField::FullName),
            Widget::Text(ScalarField::Email),
            Widget::Text(ScalarField::SocialHandle),
            Widget::Text(ScalarField::Niche),
        ],
    },
    Section {
        title: "Parte B: ¿Qué quieres lograr?",
        required_badge: false,
        widgets: &[
            Widget::Radio(ChoiceField::Purpose),
            Widget::Text(ScalarField::PurposeOther),
            Widget::Text(ScalarField::TargetAudience),
            Widget::Text(ScalarField::CallToAction),
        ],
    },
    Section {
        title: "Parte C: ¿Cómo quieres que se vean tus videos?",
        required_badge: false,
        widgets: &[
            Widget::Radio(ChoiceField::EditingStyle),
            Widget::Text(ScalarField::ReferenceVideos),
            Widget::Text(ScalarField::BrandGuidelines),
        ],
    },
    Section {
        title: "Parte D: Detalles del Video",
        required_badge: false,
        widgets: &[Widget::Radio(ChoiceField::Duration), Widget::Distribution],
    },
    Section {
        title: "Parte E: Inversión",
        required_badge: false,
        widgets: &[
            Widget::Radio(ChoiceField::BudgetType),
            Widget::Radio(ChoiceField::BudgetTier),
        ],
    },
];

impl Section {
    /// Widgets of this section that the current answers make visible.
    pub fn visible_widgets(&self, answers: &AnswerSet) -> Vec<Widget> {
        self.widgets
            .iter()
            .copied()
            .filter(|w| is_widget_visible(*w, answers))
            .collect()
    }
}

/// Conditional visibility rules. Hidden widgets keep their values.
pub fn is_widget_visible(widget: Widget, answers: &AnswerSet) -> bool {
    match widget {
        Widget::Text(ScalarField::PurposeOther) => answers.is_other_purpose_visible(),
        Widget::Text(ScalarField::ReferenceVideos | ScalarField::BrandGuidelines) => {
            answers.is_custom_style_section_visible()
        }
        Widget::Radio(ChoiceField::BudgetTier) => answers.budget_subsection().is_some(),
        Widget::Text(_) | Widget::Radio(_) | Widget::Distribution => true,
    }
}

/// Options a radio group offers right now. The budget tier group depends on
/// the chosen budget type and is empty while none is chosen.
pub fn radio_options(field: ChoiceField, answers: &AnswerSet) -> Vec<Choice> {
    match field {
        ChoiceField::BudgetTier => answers
            .budget_subsection()
            .map(|bt| bt.tiers().iter().map(|t| Choice::BudgetTier(*t)).collect())
            .unwrap_or_default(),
        other => other.options(),
    }
}

/// Heading of a radio group.
pub fn radio_prompt(field: ChoiceField, answers: &AnswerSet) -> &'static str {
    match (field, answers.budget_subsection()) {
        (ChoiceField::BudgetTier, Some(bt)) => bt.tier_prompt(),
        _ => field.prompt(),
    }
}

/// Whether a radio group heading carries the "Requerido" badge. The tier
/// sub-question has none.
pub fn radio_required(field: ChoiceField) -> bool {
    field != ChoiceField::BudgetTier
}

/// Radio selected state: the bound value equals the current answer.
pub fn is_selected(answers: &AnswerSet, choice: Choice) -> bool {
    answers.choice(choice.field()) == Some(choice)
}

/// Checkbox selected state: the platform is a member of the distribution set.
pub fn is_checked(answers: &AnswerSet, platform: Platform) -> bool {
    answers.is_distributed_on(platform)
}

/// Floating-label treatment: the label moves up while the input is focused
/// or holds a value.
pub fn label_floats(focused: bool, value: &str) -> bool {
    focused || !value.is_empty()
}

/// Label with the required marker appended.
pub fn field_label(field: ScalarField) -> String {
    if field.required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::options::{BudgetTier, BudgetType, EditingStyle, VideoPurpose};

    fn all_widgets() -> Vec<Widget> {
        SECTIONS.iter().flat_map(|s| s.widgets.iter().copied()).collect()
    }

    #[test]
    fn layout_covers_every_field_once() {
        let widgets = all_widgets();
        for f in ScalarField::ALL {
            assert_eq!(
                widgets.iter().filter(|w| **w == Widget::Text(*f)).count(),
                1,
                "{f:?}"
            );
        }
        for f in ChoiceField::ALL {
            assert_eq!(
                widgets.iter().filter(|w| **w == Widget::Radio(*f)).count(),
                1,
                "{f:?}"
            );
        }
        assert!(widgets.contains(&Widget::Distribution));
    }

    #[test]
    fn conditional_widgets_hidden_on_empty_form() {
        let answers = AnswerSet::new();
        let hidden: Vec<_> = all_widgets()
            .into_iter()
            .filter(|w| !is_widget_visible(*w, &answers))
            .collect();
        assert_eq!(
            hidden,
            vec![
                Widget::Text(ScalarField::PurposeOther),
                Widget::Text(ScalarField::ReferenceVideos),
                Widget::Text(ScalarField::BrandGuidelines),
                Widget::Radio(ChoiceField::BudgetTier),
            ]
        );
    }

    #[test]
    fn section_c_grows_with_custom_style() {
        let mut answers = AnswerSet::new();
        assert_eq!(SECTIONS[2].visible_widgets(&answers).len(), 1);
        answers.set_choice(Choice::EditingStyle(EditingStyle::Custom));
        assert_eq!(SECTIONS[2].visible_widgets(&answers).len(), 3);
        answers.set_choice(Choice::EditingStyle(EditingStyle::Portfolio));
        assert_eq!(SECTIONS[2].visible_widgets(&answers).len(), 1);
    }

    #[test]
    fn tier_options_follow_budget_type() {
        let mut answers = AnswerSet::new();
        assert!(radio_options(ChoiceField::BudgetTier, &answers).is_empty());

        answers.set_choice(Choice::BudgetType(BudgetType::MonthlyPackage));
        let opts = radio_options(ChoiceField::BudgetTier, &answers);
        assert_eq!(opts.first(), Some(&Choice::BudgetTier(BudgetTier::From400To800)));
        assert_eq!(opts.len(), 4);
        assert_eq!(
            radio_prompt(ChoiceField::BudgetTier, &answers),
            "¿Cuál es tu presupuesto mensual?"
        );
    }

    #[test]
    fn selection_is_pure_function_of_answers() {
        let mut answers = AnswerSet::new();
        let other = Choice::Purpose(VideoPurpose::Other);
        assert!(!is_selected(&answers, other));
        answers.set_choice(other);
        assert!(is_selected(&answers, other));
        assert!(!is_selected(&answers, Choice::Purpose(VideoPurpose::GrowAudience)));

        assert!(!is_checked(&answers, Platform::TikTok));
        answers.toggle_distribution(Platform::TikTok);
        assert!(is_checked(&answers, Platform::TikTok));
    }

    #[test]
    fn label_floating() {
        assert!(!label_floats(false, ""));
        assert!(label_floats(true, ""));
        assert!(label_floats(false, "x"));
    }

    #[test]
    fn required_label_marker() {
        assert_eq!(field_label(ScalarField::FullName), "Tu Nombre *");
        assert_eq!(field_label(ScalarField::Niche), "¿Cuál es tu nicho?");
    }
}
