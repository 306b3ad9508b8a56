use super::Expr;

use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

impl Expr {
    /// Combines two predicates, flattening nested `And` operands.
    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        match (lhs.into(), rhs.into()) {
            (Self::And(mut lhs), Self::And(rhs)) => {
                lhs.operands.extend(rhs.operands);
                lhs.into()
            }
            (Self::And(mut lhs), rhs) => {
                lhs.operands.push(rhs);
                lhs.into()
            }
            (lhs, Self::And(mut rhs)) => {
                rhs.operands.insert(0, lhs);
                rhs.into()
            }
            (lhs, rhs) => ExprAnd {
                operands: vec![lhs, rhs],
            }
            .into(),
        }
    }

    pub fn and_from_vec(mut operands: Vec<Self>) -> Self {
        if operands.len() == 1 {
            if let Some(expr) = operands.pop() {
                return expr;
            }
        }

        ExprAnd { operands }.into()
    }
}

impl ops::Deref for ExprAnd {
    type Target = [Expr];

    fn deref(&self) -> &Self::Target {
        self.operands.deref()
    }
}

impl From<ExprAnd> for Expr {
    fn from(value: ExprAnd) -> Self {
        Self::And(value)
    }
}
