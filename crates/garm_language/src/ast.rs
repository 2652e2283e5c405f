//! Abstract syntax tree for rate formulas.

use std::collections::BTreeSet;
use std::fmt;
use std::ops;

use garm_foundation::{Error, ErrorKind, Name, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

impl BinaryOp {
    /// Binding strength, higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    /// Returns the operator symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        Ok(match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(Error::new(ErrorKind::DivisionByZero));
                }
                lhs / rhs
            }
            Self::Pow => lhs.powf(rhs),
        })
    }
}

/// A rate formula over numeric literals and named quantities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Formula {
    /// Numeric literal.
    Number(f64),
    /// Reference to a parameter or expression.
    Reference(Name),
    /// Unary negation.
    Neg(Box<Formula>),
    /// Binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Formula>,
        /// Right operand.
        rhs: Box<Formula>,
    },
}

/// Precedence of unary minus: binds looser than `^`, tighter than `*`.
const NEG_PRECEDENCE: u8 = 3;

impl Formula {
    /// Parses formula text.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the text is not a well-formed formula.
    pub fn parse(source: &str) -> Result<Self> {
        crate::parser::parse(source)
    }

    /// Creates a numeric literal.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a reference to a named quantity.
    #[must_use]
    pub fn reference(name: Name) -> Self {
        Self::Reference(name)
    }

    /// Creates a reference from text.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid identifier.
    pub fn named(name: &str) -> Result<Self> {
        Ok(Self::Reference(Name::new(name)?))
    }

    /// Raises this formula to a power.
    #[must_use]
    pub fn pow(self, exponent: Formula) -> Self {
        Self::binary(BinaryOp::Pow, self, exponent)
    }

    /// Creates a binary operation.
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Formula, rhs: Formula) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Returns the distinct names this formula references, sorted.
    #[must_use]
    pub fn references(&self) -> BTreeSet<&Name> {
        let mut names = BTreeSet::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut BTreeSet<&'a Name>) {
        match self {
            Self::Number(_) => {}
            Self::Reference(name) => {
                names.insert(name);
            }
            Self::Neg(inner) => inner.collect_references(names),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_references(names);
                rhs.collect_references(names);
            }
        }
    }

    /// Returns the first literal that is NaN or infinite, if any.
    #[must_use]
    pub fn non_finite_literal(&self) -> Option<f64> {
        match self {
            Self::Number(n) if !n.is_finite() => Some(*n),
            Self::Number(_) | Self::Reference(_) => None,
            Self::Neg(inner) => inner.non_finite_literal(),
            Self::Binary { lhs, rhs, .. } => {
                lhs.non_finite_literal().or_else(|| rhs.non_finite_literal())
            }
        }
    }

    /// Returns true if the formula references `name`.
    #[must_use]
    pub fn references_name(&self, name: &str) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Reference(n) => n.as_str() == name,
            Self::Neg(inner) => inner.references_name(name),
            Self::Binary { lhs, rhs, .. } => lhs.references_name(name) || rhs.references_name(name),
        }
    }

    /// Evaluates the formula, resolving references through `lookup`.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures and reports division by zero.
    pub fn evaluate<F>(&self, lookup: &mut F) -> Result<f64>
    where
        F: FnMut(&Name) -> Result<f64>,
    {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Reference(name) => lookup(name),
            Self::Neg(inner) => Ok(-inner.evaluate(lookup)?),
            Self::Binary { op, lhs, rhs } => {
                let l = lhs.evaluate(lookup)?;
                let r = rhs.evaluate(lookup)?;
                op.apply(l, r)
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Number(n) if *n < 0.0 => NEG_PRECEDENCE,
            Self::Number(_) | Self::Reference(_) => u8::MAX,
            Self::Neg(_) => NEG_PRECEDENCE,
            Self::Binary { op, .. } => op.precedence(),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Reference(name) => write!(f, "{name}"),
            Self::Neg(inner) => {
                f.write_str("-")?;
                inner.fmt_operand(f, inner.precedence() <= NEG_PRECEDENCE)
            }
            Self::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                // `^` is right associative; everything else is left associative.
                let (lhs_parens, rhs_parens) = if *op == BinaryOp::Pow {
                    (lhs.precedence() <= prec, rhs.precedence() < prec)
                } else {
                    (lhs.precedence() < prec, rhs.precedence() <= prec)
                };
                lhs.fmt_operand(f, lhs_parens)?;
                write!(f, " {} ", op.symbol())?;
                rhs.fmt_operand(f, rhs_parens)
            }
        }
    }
}

impl From<f64> for Formula {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Name> for Formula {
    fn from(name: Name) -> Self {
        Self::Reference(name)
    }
}

macro_rules! formula_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl ops::$trait for Formula {
            type Output = Formula;

            fn $method(self, rhs: Formula) -> Formula {
                Formula::binary($op, self, rhs)
            }
        }

        impl ops::$trait<f64> for Formula {
            type Output = Formula;

            fn $method(self, rhs: f64) -> Formula {
                Formula::binary($op, self, Formula::Number(rhs))
            }
        }
    };
}

formula_binary_op!(Add, add, BinaryOp::Add);
formula_binary_op!(Sub, sub, BinaryOp::Sub);
formula_binary_op!(Mul, mul, BinaryOp::Mul);
formula_binary_op!(Div, div, BinaryOp::Div);

impl ops::Neg for Formula {
    type Output = Formula;

    fn neg(self) -> Formula {
        Formula::Neg(Box::new(self))
    }
}
