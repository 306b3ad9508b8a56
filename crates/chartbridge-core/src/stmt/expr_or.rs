use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprOr {
    pub operands: Vec<Expr>,
}

impl Expr {
    /// Combines two predicates, flattening nested `Or` operands.
    pub fn or(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        let lhs = lhs.into();
        let rhs = rhs.into();

        let mut operands = vec![];
        for operand in [lhs, rhs] {
            match operand {
                Self::Or(or) => operands.extend(or.operands),
                operand => operands.push(operand),
            }
        }

        ExprOr { operands }.into()
    }
}

impl From<ExprOr> for Expr {
    fn from(value: ExprOr) -> Self {
        Self::Or(value)
    }
}
