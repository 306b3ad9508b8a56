use serde::Deserialize;

/// Which column feeds a channel, and how it is displayed.
///
/// Deserializes from either a shorthand string (`"day:T"`,
/// `"sales:quantitative"`, `"sales"`) or a table with `field`, `type`,
/// `title`, `time_unit` and `format` keys. The type is validated when the
/// chart is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "FieldDefRepr")]
pub struct FieldDef {
    pub field: String,
    pub ty: Option<String>,
    pub title: Option<String>,
    pub time_unit: Option<String>,
    pub format: Option<String>,
}

impl FieldDef {
    /// Creates a field definition from shorthand.
    pub fn new(shorthand: &str) -> Self {
        let (field, ty) = split_shorthand(shorthand);
        Self {
            field,
            ty,
            ..Self::default()
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn time_unit(mut self, time_unit: impl Into<String>) -> Self {
        self.time_unit = Some(time_unit.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl From<&str> for FieldDef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldDefRepr {
    Shorthand(String),
    Full(Full),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Full {
    field: String,
    #[serde(default, rename = "type")]
    ty: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "timeUnit")]
    time_unit: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

impl From<FieldDefRepr> for FieldDef {
    fn from(value: FieldDefRepr) -> Self {
        match value {
            FieldDefRepr::Shorthand(shorthand) => FieldDef::new(&shorthand),
            FieldDefRepr::Full(full) => {
                let (field, shorthand_ty) = match full.ty {
                    Some(_) => (full.field, None),
                    None => split_shorthand(&full.field),
                };

                FieldDef {
                    field,
                    ty: full.ty.or(shorthand_ty),
                    title: full.title,
                    time_unit: full.time_unit,
                    format: full.format,
                }
            }
        }
    }
}

/// Splits `field:type` at the last colon. A field without a colon has no
/// declared type.
fn split_shorthand(shorthand: &str) -> (String, Option<String>) {
    match shorthand.rsplit_once(':') {
        Some((field, ty)) if !field.is_empty() && !ty.is_empty() => {
            (field.to_string(), Some(ty.to_string()))
        }
        _ => (shorthand.to_string(), None),
    }
}
