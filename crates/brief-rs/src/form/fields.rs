//! Field identifiers for the answer set.
//!
//! Fields are enums rather than strings so an unknown field name cannot reach
//! the controller. The string forms (`key()`) are the wire keys used by the
//! submission payload, answers files, and the web API.

use serde::{Deserialize, Serialize};

use super::options::{BudgetTier, BudgetType, EditingStyle, VideoDuration, VideoPurpose};

/// A free-text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FullName,
    Email,
    SocialHandle,
    Niche,
    #[serde(rename = "videoPurposeOther")]
    PurposeOther,
    TargetAudience,
    CallToAction,
    ReferenceVideos,
    BrandGuidelines,
}

impl ScalarField {
    pub const ALL: &'static [ScalarField] = &[
        Self::FullName,
        Self::Email,
        Self::SocialHandle,
        Self::Niche,
        Self::PurposeOther,
        Self::TargetAudience,
        Self::CallToAction,
        Self::ReferenceVideos,
        Self::BrandGuidelines,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::SocialHandle => "socialHandle",
            Self::Niche => "niche",
            Self::PurposeOther => "videoPurposeOther",
            Self::TargetAudience => "targetAudience",
            Self::CallToAction => "callToAction",
            Self::ReferenceVideos => "referenceVideos",
            Self::BrandGuidelines => "brandGuidelines",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Tu Nombre",
            Self::Email => "Tu Correo Electrónico",
            Self::SocialHandle => "Tu @usuario principal (Instagram/TikTok)",
            Self::Niche => "¿Cuál es tu nicho?",
            Self::PurposeOther => "Especifica tu objetivo",
            Self::TargetAudience => {
                "¿A quién le hablas en tus videos? (Describe a tu seguidor ideal)"
            }
            Self::CallToAction => "¿Qué quieres que la gente haga después de ver tus videos?",
            Self::ReferenceVideos => {
                "¿Hay creadores cuyo estilo de edición te encante? \
                 (Pega los enlaces a 1-3 videos de referencia)"
            }
            Self::BrandGuidelines => {
                "¿Tienes colores, fuentes o logos específicos para tu marca personal?"
            }
        }
    }

    /// Placeholder hint, empty when the field has none.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::SocialHandle => "@tunombredeusuario",
            Self::Niche => "Ej: Fitness, Finanzas, Marketing, etc.",
            Self::PurposeOther => "Tu respuesta",
            Self::CallToAction => "Ej: Sígueme, comenta 'X', ve al link en mi bio...",
            Self::ReferenceVideos => "Enlaces a Reels, TikToks, Shorts...",
            Self::BrandGuidelines => "Descríbelos o indica dónde puedo verlos...",
            Self::FullName | Self::Email | Self::TargetAudience => "",
        }
    }

    pub fn required(self) -> bool {
        matches!(
            self,
            Self::FullName | Self::Email | Self::TargetAudience | Self::CallToAction
        )
    }

    /// Row count for multi-line fields, `None` for single-line ones.
    pub fn rows(self) -> Option<u16> {
        match self {
            Self::TargetAudience | Self::ReferenceVideos => Some(3),
            Self::BrandGuidelines => Some(2),
            _ => None,
        }
    }
}

/// A single-choice field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceField {
    #[serde(rename = "videoPurpose")]
    Purpose,
    #[serde(rename = "editingStyle")]
    EditingStyle,
    #[serde(rename = "finalVideoDuration")]
    Duration,
    #[serde(rename = "budgetType")]
    BudgetType,
    #[serde(rename = "budget")]
    BudgetTier,
}

impl ChoiceField {
    pub const ALL: &'static [ChoiceField] = &[
        Self::Purpose,
        Self::EditingStyle,
        Self::Duration,
        Self::BudgetType,
        Self::BudgetTier,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Purpose => "videoPurpose",
            Self::EditingStyle => "editingStyle",
            Self::Duration => "finalVideoDuration",
            Self::BudgetType => "budgetType",
            Self::BudgetTier => "budget",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Question heading. The budget tier heading depends on the budget type,
    /// see [`BudgetType::tier_prompt`].
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Purpose => "¿Cuál es el objetivo principal de tus videos?",
            Self::EditingStyle => "¿Qué estilo de edición estás buscando?",
            Self::Duration => "¿Duración final del video?",
            Self::BudgetType => "¿Cómo prefieres enfocar la inversión?",
            Self::BudgetTier => "¿Cuál es tu presupuesto?",
        }
    }

    /// Parse a wire option id into a typed choice for this field.
    pub fn parse_option(self, id: &str) -> Option<Choice> {
        match self {
            Self::Purpose => VideoPurpose::from_id(id).map(Choice::Purpose),
            Self::EditingStyle => EditingStyle::from_id(id).map(Choice::EditingStyle),
            Self::Duration => VideoDuration::from_id(id).map(Choice::Duration),
            Self::BudgetType => BudgetType::from_id(id).map(Choice::BudgetType),
            Self::BudgetTier => BudgetTier::from_id(id).map(Choice::BudgetTier),
        }
    }

    /// Every option of this field, in display order.
    pub fn options(self) -> Vec<Choice> {
        match self {
            Self::Purpose => VideoPurpose::ALL.iter().map(|o| Choice::Purpose(*o)).collect(),
            Self::EditingStyle => EditingStyle::ALL
                .iter()
                .map(|o| Choice::EditingStyle(*o))
                .collect(),
            Self::Duration => VideoDuration::ALL.iter().map(|o| Choice::Duration(*o)).collect(),
            Self::BudgetType => BudgetType::ALL.iter().map(|o| Choice::BudgetType(*o)).collect(),
            Self::BudgetTier => BudgetTier::ALL.iter().map(|o| Choice::BudgetTier(*o)).collect(),
        }
    }
}

/// A value for one single-choice field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    Purpose(VideoPurpose),
    EditingStyle(EditingStyle),
    Duration(VideoDuration),
    BudgetType(BudgetType),
    BudgetTier(BudgetTier),
}

impl Choice {
    pub fn field(self) -> ChoiceField {
        match self {
            Self::Purpose(_) => ChoiceField::Purpose,
            Self::EditingStyle(_) => ChoiceField::EditingStyle,
            Self::Duration(_) => ChoiceField::Duration,
            Self::BudgetType(_) => ChoiceField::BudgetType,
            Self::BudgetTier(_) => ChoiceField::BudgetTier,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Purpose(o) => o.id(),
            Self::EditingStyle(o) => o.id(),
            Self::Duration(o) => o.id(),
            Self::BudgetType(o) => o.id(),
            Self::BudgetTier(o) => o.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Purpose(o) => o.label(),
            Self::EditingStyle(o) => o.label(),
            Self::Duration(o) => o.label(),
            Self::BudgetType(o) => o.label(),
            Self::BudgetTier(o) => o.label(),
        }
    }
}

/// A field that must be answered before the form can be submitted.
///
/// Serializes as its wire key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Scalar(ScalarField),
    Choice(ChoiceField),
    /// At least one distribution platform.
    Distribution,
    /// The email is filled in but is not an address.
    EmailFormat,
}

impl RequiredField {
    pub fn key(self) -> &'static str {
        match self {
            Self::Scalar(f) => f.key(),
            Self::Choice(f) => f.key(),
            Self::Distribution => "distribution",
            Self::EmailFormat => "emailFormat",
        }
    }
}

impl Serialize for RequiredField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
