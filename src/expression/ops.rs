// expression/ops.rs
// Arithmetic on expressions with structural simplification

use super::{merge_domains, BinaryOp, Domains, Expr, ExprKind, Function};
use crate::error::Result;

impl Expr {
    fn binary(op: BinaryOp, left: &Expr, right: &Expr, domains: Domains) -> Expr {
        Expr::with_domains(
            ExprKind::Binary {
                op,
                left: left.clone(),
                right: right.clone(),
            },
            domains,
        )
    }

    fn fold(op: BinaryOp, left: &Expr, right: &Expr) -> Option<Expr> {
        match (left.as_scalar(), right.as_scalar()) {
            (Some(l), Some(r)) => Some(Expr::scalar(op.apply(l, r))),
            _ => None,
        }
    }

    pub fn try_add(&self, other: &Expr) -> Result<Expr> {
        let domains = merge_domains(self, other)?;
        if let Some(folded) = Expr::fold(BinaryOp::Add, self, other) {
            return Ok(folded);
        }
        // Dropping a zero must not change the domains of the result
        if self.is_structural_zero() && other.domains() == &domains[..] {
            return Ok(other.clone());
        }
        if other.is_structural_zero() && self.domains() == &domains[..] {
            return Ok(self.clone());
        }
        Ok(Expr::binary(BinaryOp::Add, self, other, domains))
    }

    pub fn try_sub(&self, other: &Expr) -> Result<Expr> {
        let domains = merge_domains(self, other)?;
        if let Some(folded) = Expr::fold(BinaryOp::Subtract, self, other) {
            return Ok(folded);
        }
        if other.is_structural_zero() && self.domains() == &domains[..] {
            return Ok(self.clone());
        }
        if self.is_structural_zero() && other.domains() == &domains[..] {
            return Ok(-other);
        }
        Ok(Expr::binary(BinaryOp::Subtract, self, other, domains))
    }

    pub fn try_mul(&self, other: &Expr) -> Result<Expr> {
        let domains = merge_domains(self, other)?;
        if let Some(folded) = Expr::fold(BinaryOp::Multiply, self, other) {
            return Ok(folded);
        }
        if self.as_scalar() == Some(1.0) {
            return Ok(other.clone());
        }
        if other.as_scalar() == Some(1.0) {
            return Ok(self.clone());
        }
        if domains.is_empty() && (self.is_structural_zero() || other.is_structural_zero()) {
            return Ok(Expr::zero());
        }
        Ok(Expr::binary(BinaryOp::Multiply, self, other, domains))
    }

    pub fn try_div(&self, other: &Expr) -> Result<Expr> {
        let domains = merge_domains(self, other)?;
        if let Some(folded) = Expr::fold(BinaryOp::Divide, self, other) {
            return Ok(folded);
        }
        if other.as_scalar() == Some(1.0) {
            return Ok(self.clone());
        }
        Ok(Expr::binary(BinaryOp::Divide, self, other, domains))
    }

    pub fn try_pow(&self, exponent: &Expr) -> Result<Expr> {
        let domains = merge_domains(self, exponent)?;
        if let Some(folded) = Expr::fold(BinaryOp::Power, self, exponent) {
            return Ok(folded);
        }
        if exponent.as_scalar() == Some(1.0) {
            return Ok(self.clone());
        }
        Ok(Expr::binary(BinaryOp::Power, self, exponent, domains))
    }

    /// Integer-style power with a constant exponent. Never fails since the
    /// exponent is domain-free.
    pub fn powf(&self, exponent: f64) -> Expr {
        let exponent = Expr::scalar(exponent);
        match Expr::fold(BinaryOp::Power, self, &exponent) {
            Some(folded) => folded,
            None if exponent.as_scalar() == Some(1.0) => self.clone(),
            None => Expr::binary(BinaryOp::Power, self, &exponent, self.0.domains.clone()),
        }
    }

    fn apply_function(&self, func: Function) -> Expr {
        match self.as_scalar() {
            Some(value) => Expr::scalar(func.apply(value)),
            None => Expr::with_domains(
                ExprKind::Function {
                    func,
                    arg: self.clone(),
                },
                self.0.domains.clone(),
            ),
        }
    }

    pub fn exp(&self) -> Expr {
        self.apply_function(Function::Exp)
    }

    pub fn tanh(&self) -> Expr {
        self.apply_function(Function::Tanh)
    }

    /// Average over the through-cell coordinate. The result is domain-free.
    pub fn x_average(&self) -> Expr {
        if self.is_domain_free() {
            return self.clone();
        }
        if self.is_structural_zero() {
            return Expr::zero();
        }
        if let ExprKind::Broadcast { child, .. } = self.kind() {
            return child.clone();
        }
        Expr::with_domains(ExprKind::XAverage(self.clone()), Domains::new())
    }
}

impl std::ops::Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self.as_scalar() {
            Some(value) => Expr::scalar(-value),
            None => Expr::with_domains(ExprKind::Negate(self.clone()), self.0.domains.clone()),
        }
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        -&self
    }
}

fn expect_domains(result: Result<Expr>) -> Expr {
    match result {
        Ok(expr) => expr,
        Err(err) => panic!("{err}"),
    }
}

// Operators panic on a domain mismatch; use the `try_` methods to recover.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl std::ops::$trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                expect_domains(self.$checked(rhs))
            }
        }

        impl std::ops::$trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                expect_domains(self.$checked(&rhs))
            }
        }

        impl std::ops::$trait<&Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                expect_domains(self.$checked(rhs))
            }
        }

        impl std::ops::$trait<Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                expect_domains(self.$checked(&rhs))
            }
        }

        impl std::ops::$trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                expect_domains(self.$checked(&Expr::scalar(rhs)))
            }
        }

        impl std::ops::$trait<f64> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                expect_domains(self.$checked(&Expr::scalar(rhs)))
            }
        }

        impl std::ops::$trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                expect_domains(Expr::scalar(self).$checked(&rhs))
            }
        }

        impl std::ops::$trait<&Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                expect_domains(Expr::scalar(self).$checked(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, try_add);
impl_binary_op!(Sub, sub, try_sub);
impl_binary_op!(Mul, mul, try_mul);
impl_binary_op!(Div, div, try_div);
