// expression/mod.rs
// Symbolic field expressions tagged with spatial domains and a structural identity
//
// This module handles:
// - The expression tree and its node kinds
// - Structural identity (`ExprId`) used for equality and zero checks
// - Domain bookkeeping for every node
// - Construction-time simplification (see ops.rs)

pub mod display;
pub mod evaluate;
pub mod ops;


use crate::domain::{concatenate::spanned_domains, CellTopology, Domain};
use crate::error::{KineticsError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Domains an expression lives on, in spatial order. Empty means domain-free.
pub type Domains = SmallVec<[Domain; 3]>;

/// Structural identity of an expression. Structurally equal trees share an
/// id; numerically equal but differently built trees get different ids.
/// `Expr` hashes by id alone and confirms equal ids structurally in `eq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "**",
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => left / right,
            BinaryOp::Power => left.powf(right),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Exp,
    Tanh,
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::Exp => "exp",
            Function::Tanh => "tanh",
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Function::Exp => value.exp(),
            Function::Tanh => value.tanh(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprKind {
    /// Non-finite values serialise as "inf", "-inf" or "nan"
    Scalar(#[serde(with = "scalar_repr")] f64),
    /// Named symbol produced elsewhere in the model (a field when `domain` is set)
    Variable {
        name: String,
        domain: Option<Domain>,
    },
    /// Domain-free value held uniform over one domain
    Broadcast { child: Expr, domain: Domain },
    /// Fields on adjacent domains joined in spatial order
    Concatenation(Vec<Expr>),
    /// Average over the through-cell coordinate
    XAverage(Expr),
    Negate(Expr),
    Binary {
        op: BinaryOp,
        left: Expr,
        right: Expr,
    },
    Function { func: Function, arg: Expr },
}

#[derive(Debug)]
struct Node {
    kind: ExprKind,
    domains: Domains,
    id: ExprId,
    print_name: Option<String>,
}

/// Shared, immutable expression handle. Cloning is cheap.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "ExprKind", into = "ExprKind")]
pub struct Expr(Arc<Node>);

static ZERO: Lazy<Expr> = Lazy::new(|| Expr::with_domains(ExprKind::Scalar(0.0), Domains::new()));

impl Expr {
    /// Build a node, validating its domains against its children.
    pub fn from_kind(kind: ExprKind) -> Result<Self> {
        let domains = match &kind {
            ExprKind::Scalar(_) | ExprKind::XAverage(_) => Domains::new(),
            ExprKind::Variable { domain, .. } => domain.iter().copied().collect(),
            ExprKind::Broadcast { child, domain } => {
                if !child.is_domain_free() {
                    return Err(KineticsError::NotDomainIndependent {
                        domains: child.domains().to_vec(),
                    });
                }
                smallvec![*domain]
            }
            ExprKind::Concatenation(children) => {
                let found = spanned_domains(children)?;
                let tiles = [CellTopology::TwoElectrode, CellTopology::HalfCell]
                    .iter()
                    .any(|topology| topology.domains() == &found[..]);
                if !tiles || children.iter().any(Expr::is_domain_free) {
                    return Err(KineticsError::DomainGap {
                        expected: CellTopology::TwoElectrode.domains().to_vec(),
                        found: found.to_vec(),
                    });
                }
                found
            }
            ExprKind::Negate(child) | ExprKind::Function { arg: child, .. } => {
                child.0.domains.clone()
            }
            ExprKind::Binary { left, right, .. } => merge_domains(left, right)?,
        };
        Ok(Self::with_domains(kind, domains))
    }

    /// Build a node whose domains the caller has already worked out.
    pub(crate) fn with_domains(kind: ExprKind, domains: Domains) -> Self {
        let id = structural_id(&kind, &domains);
        Expr(Arc::new(Node {
            kind,
            domains,
            id,
            print_name: None,
        }))
    }

    pub fn scalar(value: f64) -> Self {
        // -0.0 and 0.0 must share an identity
        if value == 0.0 {
            return Self::zero();
        }
        Self::with_domains(ExprKind::Scalar(value), Domains::new())
    }

    /// Canonical additive identity. Every structural zero check compares
    /// against this node's id.
    pub fn zero() -> Self {
        ZERO.clone()
    }

    pub fn one() -> Self {
        Self::scalar(1.0)
    }

    /// Field symbol living on `domain`
    pub fn variable(name: impl Into<String>, domain: Domain) -> Self {
        Self::with_domains(
            ExprKind::Variable {
                name: name.into(),
                domain: Some(domain),
            },
            smallvec![domain],
        )
    }

    /// Domain-free symbol
    pub fn scalar_variable(name: impl Into<String>) -> Self {
        Self::with_domains(
            ExprKind::Variable {
                name: name.into(),
                domain: None,
            },
            Domains::new(),
        )
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    pub fn domains(&self) -> &[Domain] {
        &self.0.domains
    }

    pub fn id(&self) -> ExprId {
        self.0.id
    }

    pub fn is_domain_free(&self) -> bool {
        self.0.domains.is_empty()
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self.kind() {
            ExprKind::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// True when the expression is zero by construction, whatever its
    /// inputs evaluate to. Never looks at numeric values of symbols.
    pub fn is_structural_zero(&self) -> bool {
        match self.kind() {
            ExprKind::Scalar(value) => *value == 0.0,
            ExprKind::Broadcast { child, .. } => child.is_structural_zero(),
            ExprKind::Concatenation(children) => children.iter().all(Expr::is_structural_zero),
            ExprKind::Negate(child) => child.is_structural_zero(),
            ExprKind::Binary {
                op: BinaryOp::Multiply,
                left,
                right,
            } => left.is_structural_zero() || right.is_structural_zero(),
            _ => false,
        }
    }

    /// Same expression under a display name. Identity is unchanged.
    pub fn with_print_name(&self, name: impl Into<String>) -> Self {
        Expr(Arc::new(Node {
            kind: self.0.kind.clone(),
            domains: self.0.domains.clone(),
            id: self.0.id,
            print_name: Some(name.into()),
        }))
    }

    pub fn print_name(&self) -> Option<&str> {
        self.0.print_name.as_deref()
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.id() == other.id()
                && self.0.domains == other.0.domains
                && same_kind(&self.0.kind, &other.0.kind))
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::scalar(value)
    }
}

impl TryFrom<ExprKind> for Expr {
    type Error = KineticsError;

    fn try_from(kind: ExprKind) -> Result<Self> {
        Expr::from_kind(kind)
    }
}

impl From<Expr> for ExprKind {
    fn from(expr: Expr) -> Self {
        expr.0.kind.clone()
    }
}

/// Domains of a binary node: a domain-free side adopts the other side's.
pub(crate) fn merge_domains(left: &Expr, right: &Expr) -> Result<Domains> {
    if left.is_domain_free() {
        Ok(right.0.domains.clone())
    } else if right.is_domain_free() || left.domains() == right.domains() {
        Ok(left.0.domains.clone())
    } else {
        Err(KineticsError::DomainMismatch {
            left: left.domains().to_vec(),
            right: right.domains().to_vec(),
        })
    }
}

/// Node-level structural comparison; children recurse through `Expr::eq`.
fn same_kind(lhs: &ExprKind, rhs: &ExprKind) -> bool {
    match (lhs, rhs) {
        (ExprKind::Scalar(a), ExprKind::Scalar(b)) => (a + 0.0).to_bits() == (b + 0.0).to_bits(),
        (
            ExprKind::Variable { name, domain },
            ExprKind::Variable {
                name: other_name,
                domain: other_domain,
            },
        ) => name == other_name && domain == other_domain,
        (
            ExprKind::Broadcast { child, domain },
            ExprKind::Broadcast {
                child: other_child,
                domain: other_domain,
            },
        ) => domain == other_domain && child == other_child,
        (ExprKind::Concatenation(a), ExprKind::Concatenation(b)) => a == b,
        (ExprKind::XAverage(a), ExprKind::XAverage(b))
        | (ExprKind::Negate(a), ExprKind::Negate(b)) => a == b,
        (
            ExprKind::Binary { op, left, right },
            ExprKind::Binary {
                op: other_op,
                left: other_left,
                right: other_right,
            },
        ) => op == other_op && left == other_left && right == other_right,
        (
            ExprKind::Function { func, arg },
            ExprKind::Function {
                func: other_func,
                arg: other_arg,
            },
        ) => func == other_func && arg == other_arg,
        _ => false,
    }
}

fn structural_id(kind: &ExprKind, domains: &Domains) -> ExprId {
    let mut hasher = DefaultHasher::new();
    std::mem::discriminant(kind).hash(&mut hasher);
    match kind {
        // -0.0 hashes as 0.0
        ExprKind::Scalar(value) => (value + 0.0).to_bits().hash(&mut hasher),
        ExprKind::Variable { name, domain } => {
            name.hash(&mut hasher);
            domain.hash(&mut hasher);
        }
        ExprKind::Broadcast { child, domain } => {
            child.id().hash(&mut hasher);
            domain.hash(&mut hasher);
        }
        ExprKind::Concatenation(children) => {
            for child in children {
                child.id().hash(&mut hasher);
            }
        }
        ExprKind::XAverage(child) | ExprKind::Negate(child) => child.id().hash(&mut hasher),
        ExprKind::Binary { op, left, right } => {
            op.hash(&mut hasher);
            left.id().hash(&mut hasher);
            right.id().hash(&mut hasher);
        }
        ExprKind::Function { func, arg } => {
            func.hash(&mut hasher);
            arg.id().hash(&mut hasher);
        }
    }
    domains.hash(&mut hasher);
    ExprId(hasher.finish())
}

mod scalar_repr {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"nan\"",
                )),
            },
        }
    }
}
