// expression/display.rs
// Human-readable rendering of expression trees

use super::{BinaryOp, Expr, ExprKind};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.print_name() {
            return f.write_str(name);
        }
        match self.kind() {
            ExprKind::Scalar(value) => write!(f, "{value}"),
            ExprKind::Variable { name, .. } => f.write_str(name),
            ExprKind::Broadcast { child, domain } => write!(f, "broadcast({child}, {domain})"),
            ExprKind::Concatenation(children) => {
                f.write_str("concatenation(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            ExprKind::XAverage(child) => write!(f, "x-average({child})"),
            ExprKind::Negate(child) => write!(f, "-{child}"),
            ExprKind::Binary {
                op: BinaryOp::Power,
                left,
                right,
            } => write!(f, "{left}**{right}"),
            ExprKind::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            ExprKind::Function { func, arg } => write!(f, "{}({arg})", func.name()),
        }
    }
}
