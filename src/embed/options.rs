use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of embed render formats. Names are matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedFormat {
    Compact,
    #[default]
    Card,
    Detailed,
    Badge,
    Progress,
    Developer,
    Executive,
}

impl EmbedFormat {
    pub const ALL: [EmbedFormat; 7] = [
        EmbedFormat::Compact,
        EmbedFormat::Card,
        EmbedFormat::Detailed,
        EmbedFormat::Badge,
        EmbedFormat::Progress,
        EmbedFormat::Developer,
        EmbedFormat::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedFormat::Compact => "compact",
            EmbedFormat::Card => "card",
            EmbedFormat::Detailed => "detailed",
            EmbedFormat::Badge => "badge",
            EmbedFormat::Progress => "progress",
            EmbedFormat::Developer => "developer",
            EmbedFormat::Executive => "executive",
        }
    }
}

impl fmt::Display for EmbedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown embed format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for EmbedFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmbedFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

pub const DEFAULT_MAX_DESCRIPTION_LENGTH: usize = 150;

/// Declares the boolean toggles once and derives the complete record, the
/// partial record and the key lookup from the same list.
macro_rules! embed_options {
    ($( $field:ident => $key:literal = $default:literal ),* $(,)?) => {
        /// Complete, merged embed options.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct EmbedOptions {
            pub format: EmbedFormat,
            #[serde(rename = "maxDescriptionLength")]
            pub max_description_length: usize,
            $(
                #[serde(rename = $key)]
                pub $field: bool,
            )*
        }

        impl Default for EmbedOptions {
            fn default() -> Self {
                EmbedOptions {
                    format: EmbedFormat::Card,
                    max_description_length: DEFAULT_MAX_DESCRIPTION_LENGTH,
                    $( $field: $default, )*
                }
            }
        }

        /// Options as written in an embed block; unset fields take the defaults.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
        pub struct EmbedOverrides {
            #[serde(skip_serializing_if = "Option::is_none")]
            pub format: Option<EmbedFormat>,
            #[serde(rename = "maxDescriptionLength", skip_serializing_if = "Option::is_none")]
            pub max_description_length: Option<usize>,
            $(
                #[serde(rename = $key, skip_serializing_if = "Option::is_none")]
                pub $field: Option<bool>,
            )*
        }

        impl EmbedOverrides {
            /// Every recognized boolean option key.
            pub const FLAG_KEYS: &'static [&'static str] = &[$( $key ),*];

            /// Overlay `other` onto `self`; fields set in `other` win.
            pub fn merge(&mut self, other: EmbedOverrides) {
                if other.format.is_some() {
                    self.format = other.format;
                }
                if other.max_description_length.is_some() {
                    self.max_description_length = other.max_description_length;
                }
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            }

            /// The boolean slot for an option key, if the key is a toggle.
            pub fn flag_mut(&mut self, key: &str) -> Option<&mut Option<bool>> {
                match key {
                    $( $key => Some(&mut self.$field), )*
                    _ => None,
                }
            }

            pub fn is_empty(&self) -> bool {
                *self == EmbedOverrides::default()
            }
        }

        impl EmbedOptions {
            /// Merge a partial record over these options.
            pub fn apply(&self, overrides: &EmbedOverrides) -> EmbedOptions {
                EmbedOptions {
                    format: overrides.format.unwrap_or(self.format),
                    max_description_length: overrides
                        .max_description_length
                        .unwrap_or(self.max_description_length),
                    $( $field: overrides.$field.unwrap_or(self.$field), )*
                }
            }
        }
    };
}

embed_options! {
    show_description => "showDescription" = true,
    show_assignee => "showAssignee" = true,
    show_priority => "showPriority" = true,
    show_team => "showTeam" = true,
    show_dates => "showDates" = false,
    interactive => "interactive" = true,
    show_creator => "showCreator" = false,
    show_project => "showProject" = false,
    show_cycle => "showCycle" = false,
    show_estimate => "showEstimate" = false,
    show_labels => "showLabels" = false,
    show_due_date => "showDueDate" = false,
    show_comment_count => "showCommentCount" = false,
    show_attachment_count => "showAttachmentCount" = false,
    show_url => "showUrl" = false,
    show_progress => "showProgress" = false,
    show_relations => "showRelations" = false,
    show_sla => "showSLA" = false,
    show_branch => "showBranch" = false,
}

impl EmbedOptions {
    /// Options as written, merged over the documented defaults.
    pub fn from_overrides(overrides: &EmbedOverrides) -> EmbedOptions {
        EmbedOptions::default().apply(overrides)
    }

    /// The options a render mode actually uses. Developer and executive
    /// modes force some toggles; `self` is left untouched.
    pub fn effective(&self) -> EmbedOptions {
        let mut options = self.clone();
        match self.format {
            EmbedFormat::Developer => {
                options.show_assignee = true;
                options.show_labels = true;
                options.show_branch = true;
                options.show_comment_count = true;
                options.show_attachment_count = true;
                options.show_estimate = true;
                options.show_project = true;
                options.show_dates = true;
            }
            EmbedFormat::Executive => {
                options.show_project = true;
                options.show_progress = true;
                options.show_due_date = true;
                options.show_team = true;
                options.show_assignee = true;
                options.show_priority = true;
                options.show_description = false;
                options.max_description_length = 80;
            }
            _ => {}
        }
        options
    }
}
