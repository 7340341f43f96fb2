//! Closed option catalogues for every single- and multi-choice question.
//!
//! Each option carries two strings: the wire identifier sent to the
//! submission endpoint (and accepted in answers files), and the label shown
//! to the user. Option sets are fixed at compile time, so an answer can
//! never hold a value outside its catalogue.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declare an option enum with its wire ids and display labels.
macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $id:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $id)] $variant, )+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Identifier used on the wire and in answers files.
            pub fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }

            /// Text shown next to the option.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Look up an option by its wire identifier.
            pub fn from_id(id: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|o| o.id() == id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

option_set! {
    /// Main goal of the videos.
    VideoPurpose {
        GrowAudience => "Aumentar seguidores y alcance", "Aumentar seguidores y alcance";
        BuildAuthority => "Construir autoridad en mi nicho", "Construir autoridad en mi nicho";
        PromoteOffer => "Promocionar un producto/servicio",
            "Promocionar un producto/servicio (curso, coaching, etc.)";
        DriveEngagement => "Generar engagement", "Generar 'engagement' (comentarios/guardados)";
        /// Reveals the free-text "other purpose" field.
        Other => "Otro", "Otro (por favor especifica)";
    }
}

option_set! {
    /// Look and feel of the edit.
    EditingStyle {
        Portfolio => "portfolio", "El estilo que vi en tus redes";
        /// Reveals the reference-video and brand-guideline questions.
        Custom => "personalizado", "Un estilo diferente / personalizado para mi marca";
    }
}

option_set! {
    /// Length of the delivered video.
    VideoDuration {
        Short => "15-30s", "15-30 segundos";
        Medium => "30-60s", "30-60 segundos";
    }
}

option_set! {
    /// How the client wants to approach the investment.
    BudgetType {
        PerVideo => "per-video", "Presupuesto por video";
        MonthlyPackage => "monthly-package", "Paquete mensual (varios videos)";
    }
}

option_set! {
    /// Budget bracket. Which brackets are offered depends on [`BudgetType`].
    BudgetTier {
        Under100 => "<100", "Menos de $100 USD";
        From100To200 => "100-200", "$100 - $200 USD";
        Over200 => "200+", "$200+ USD";
        From400To800 => "400-800", "$400 - $800 USD";
        From800To1500 => "800-1500", "$800 - $1,500 USD";
        Over1500 => "1500+", "$1,500+ USD";
        Unsure => "unsure", "Aún no lo sé, me gustaría conocer tus opciones/tarifas";
    }
}

option_set! {
    /// Distribution platform. Several may be selected at once.
    Platform {
        InstagramReels => "Instagram Reels", "Instagram Reels";
        TikTok => "TikTok", "TikTok";
        YoutubeShorts => "YouTube Shorts", "YouTube Shorts";
    }
}

const PER_VIDEO_TIERS: &[BudgetTier] = &[
    BudgetTier::Under100,
    BudgetTier::From100To200,
    BudgetTier::Over200,
    BudgetTier::Unsure,
];

const MONTHLY_TIERS: &[BudgetTier] = &[
    BudgetTier::From400To800,
    BudgetTier::From800To1500,
    BudgetTier::Over1500,
    BudgetTier::Unsure,
];

impl BudgetType {
    /// Budget brackets offered under this budget type, in display order.
    pub fn tiers(self) -> &'static [BudgetTier] {
        match self {
            Self::PerVideo => PER_VIDEO_TIERS,
            Self::MonthlyPackage => MONTHLY_TIERS,
        }
    }

    /// Heading of the bracket sub-section for this budget type.
    pub fn tier_prompt(self) -> &'static str {
        match self {
            Self::PerVideo => "¿Cuál es tu presupuesto por video?",
            Self::MonthlyPackage => "¿Cuál es tu presupuesto mensual?",
        }
    }
}

impl BudgetTier {
    /// Whether this bracket is offered under `budget_type`.
    pub fn offered_for(self, budget_type: BudgetType) -> bool {
        budget_type.tiers().contains(&self)
    }
}
