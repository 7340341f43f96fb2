//! Serializable projection of [`UiState`] for the REST API.
//!
//! Besides the raw answers the snapshot carries everything a browser needs
//! to draw the form without re-implementing the visibility rules: the
//! visible widgets per section, the options each radio group offers, the
//! lifecycle with its notice, and the submit label.

use brief_rs::controller::Lifecycle;
use brief_rs::form::layout::{self, SECTIONS, Widget};
use brief_rs::form::{AnswerSet, BudgetType, Platform, RequiredField};
use brief_rs::ui::UiState;
use serde::Serialize;

/// Serializable view of the form sent by `GET /api/state`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub answers: AnswerSet,
    pub visibility: Visibility,
    pub sections: Vec<SectionSnapshot>,
    pub lifecycle: Lifecycle,
    pub notice: Option<String>,
    pub submit_label: &'static str,
    pub interactive: bool,
    pub missing_required: Vec<RequiredField>,
}

/// Derived visibility flags.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub custom_style_section: bool,
    pub other_purpose: bool,
    /// Which tier list is shown, if any.
    pub budget_subsection: Option<BudgetType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    pub title: &'static str,
    pub required_badge: bool,
    pub widgets: Vec<WidgetSnapshot>,
}

/// A visible widget. Radio groups list their current options.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    #[serde(flatten)]
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct OptionSnapshot {
    pub id: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn widget_snapshot(widget: Widget, answers: &AnswerSet) -> WidgetSnapshot {
    let (prompt, options) = match widget {
        Widget::Text(_) => (None, Vec::new()),
        Widget::Radio(field) => (
            Some(layout::radio_prompt(field, answers)),
            layout::radio_options(field, answers)
                .into_iter()
                .map(|c| OptionSnapshot {
                    id: c.id(),
                    label: c.label(),
                    selected: layout::is_selected(answers, c),
                })
                .collect(),
        ),
        Widget::Distribution => (
            Some(layout::DISTRIBUTION_PROMPT),
            Platform::ALL
                .iter()
                .map(|p| OptionSnapshot {
                    id: p.id(),
                    label: p.label(),
                    selected: layout::is_checked(answers, *p),
                })
                .collect(),
        ),
    };
    WidgetSnapshot {
        widget,
        prompt,
        options,
    }
}

impl FormSnapshot {
    /// Build a snapshot. Call while holding the `UiState` lock.
    pub fn from_ui_state(state: &UiState) -> Self {
        let form = &state.form;
        let answers = form.answers();

        let sections = SECTIONS
            .iter()
            .map(|section| SectionSnapshot {
                title: section.title,
                required_badge: section.required_badge,
                widgets: section
                    .visible_widgets(answers)
                    .into_iter()
                    .map(|w| widget_snapshot(w, answers))
                    .collect(),
            })
            .collect();

        Self {
            answers: answers.clone(),
            visibility: Visibility {
                custom_style_section: answers.is_custom_style_section_visible(),
                other_purpose: answers.is_other_purpose_visible(),
                budget_subsection: answers.budget_subsection(),
            },
            sections,
            lifecycle: form.lifecycle().clone(),
            notice: form.notice().map(str::to_string),
            submit_label: form.submit_label(),
            interactive: form.is_interactive(),
            missing_required: answers.missing_required(),
        }
    }
}
