//! Field type registry
//!
//! Closed enumeration of supported field kinds plus a table-driven spec for
//! each: whether it is a display element, whether it accepts options or a
//! placeholder, and the defaults applied to a freshly created field of that
//! type. Pure lookup, no side effects.

use serde::{Deserialize, Serialize};

/// Supported field kinds.
///
/// Header, description and divider are display elements: they render content
/// but collect no answer, are never required, never validated and never
/// mapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Number,
    Select,
    Checkbox,
    Radio,
    Date,
    MonthYear,
    Header,
    Description,
    Divider,
}

/// Structural constraints and creation defaults for a field type.
#[derive(Clone, Copy, Debug)]
pub struct FieldTypeSpec {
    pub display_element: bool,
    pub supports_options: bool,
    pub supports_placeholder: bool,
    pub default_label: &'static str,
    pub seed_options: &'static [&'static str],
}

const INPUT_SPEC: FieldTypeSpec = FieldTypeSpec {
    display_element: false,
    supports_options: false,
    supports_placeholder: true,
    default_label: "Untitled Question",
    seed_options: &[],
};

const CHOICE_SPEC: FieldTypeSpec = FieldTypeSpec {
    display_element: false,
    supports_options: true,
    supports_placeholder: false,
    default_label: "Untitled Question",
    seed_options: &["Option 1"],
};

const SELECT_SPEC: FieldTypeSpec = FieldTypeSpec {
    // Select keeps its placeholder as the "choose one" prompt row.
    supports_placeholder: true,
    ..CHOICE_SPEC
};

const HEADER_SPEC: FieldTypeSpec = FieldTypeSpec {
    display_element: true,
    supports_options: false,
    supports_placeholder: false,
    default_label: "Section Header",
    seed_options: &[],
};

const DESCRIPTION_SPEC: FieldTypeSpec = FieldTypeSpec {
    default_label: "Description",
    ..HEADER_SPEC
};

const DIVIDER_SPEC: FieldTypeSpec = FieldTypeSpec {
    default_label: "",
    ..HEADER_SPEC
};

impl FieldType {
    /// Registry lookup for this type.
    pub fn spec(&self) -> &'static FieldTypeSpec {
        match self {
            Self::Text | Self::Textarea | Self::Email | Self::Number | Self::Date | Self::MonthYear => {
                &INPUT_SPEC
            }
            Self::Checkbox | Self::Radio => &CHOICE_SPEC,
            Self::Select => &SELECT_SPEC,
            Self::Header => &HEADER_SPEC,
            Self::Description => &DESCRIPTION_SPEC,
            Self::Divider => &DIVIDER_SPEC,
        }
    }

    pub fn is_display_element(&self) -> bool {
        self.spec().display_element
    }

    pub fn supports_options(&self) -> bool {
        self.spec().supports_options
    }

    pub fn supports_placeholder(&self) -> bool {
        self.spec().supports_placeholder
    }

    pub fn all() -> &'static [FieldType] {
        &[
            Self::Text,
            Self::Textarea,
            Self::Email,
            Self::Number,
            Self::Select,
            Self::Checkbox,
            Self::Radio,
            Self::Date,
            Self::MonthYear,
            Self::Header,
            Self::Description,
            Self::Divider,
        ]
    }
}
