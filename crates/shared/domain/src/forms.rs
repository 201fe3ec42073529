use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-field validation traits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FieldFlags: u8 {
        /// Must be present and non-blank.
        const REQUIRED = 1 << 0;
        /// Never echoed back to the client.
        const SECRET = 1 << 1;
        /// Must equal the field it confirms.
        const CONFIRMATION = 1 << 2;
    }
}

/// Input widget / value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Password,
}

/// One input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub max_length: Option<usize>,
    pub flags: FieldFlags,
}

impl FieldSpec {
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }
}

/// Describes the input-validation schema a registration backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormDescriptor {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.is_required())
    }
}
