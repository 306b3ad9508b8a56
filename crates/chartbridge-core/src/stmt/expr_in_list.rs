use super::{Expr, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub field: String,
    pub list: Vec<Value>,
}

impl Expr {
    /// Matches rows whose `field` equals one of `list`. An empty list
    /// matches nothing.
    pub fn in_list<T: Into<Value>>(
        field: impl Into<String>,
        list: impl IntoIterator<Item = T>,
    ) -> Self {
        ExprInList {
            field: field.into(),
            list: list.into_iter().map(Into::into).collect(),
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
