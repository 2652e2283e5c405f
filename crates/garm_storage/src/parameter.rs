//! Parameter and expression store.
//!
//! Parameters are named numeric constants. Expressions are named formulas
//! over previously declared parameters and expressions, used for derived
//! rates such as `kr = Kd * kf`. References are checked and cycles rejected
//! when an expression is declared, so [`ParameterStore::resolve`] only ever
//! walks an acyclic graph.

use std::collections::HashMap;

use garm_foundation::{DeclMap, Error, ErrorKind, Name, NameKind, Result};
use garm_language::Formula;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named numeric constant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// Parameter name.
    pub name: Name,
    /// Numeric value.
    pub value: f64,
}

/// A named derived quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expression {
    /// Expression name.
    pub name: Name,
    /// Formula over other parameters and expressions.
    pub formula: Formula,
}

/// Either kind of numeric quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quantity {
    /// A constant.
    Parameter(Parameter),
    /// A derived value.
    Expression(Expression),
}

impl Quantity {
    /// Returns the quantity's name.
    #[must_use]
    pub fn name(&self) -> &Name {
        match self {
            Self::Parameter(p) => &p.name,
            Self::Expression(e) => &e.name,
        }
    }

    /// Returns which namespace kind this quantity occupies.
    #[must_use]
    pub fn kind(&self) -> NameKind {
        match self {
            Self::Parameter(_) => NameKind::Parameter,
            Self::Expression(_) => NameKind::Expression,
        }
    }
}

/// Registry of parameters and expressions, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterStore {
    quantities: DeclMap<Quantity>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl ParameterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new store with the parameter added.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateName`] if the name is taken
    /// - [`ErrorKind::NonFiniteValue`] if the value is NaN or infinite
    pub fn declare_parameter(&self, name: &str, value: f64) -> Result<Self> {
        let name = Name::new(name)?;
        if !value.is_finite() {
            return Err(Error::new(ErrorKind::NonFiniteValue {
                name: name.to_string(),
                value,
            }));
        }
        let quantity = Quantity::Parameter(Parameter {
            name: name.clone(),
            value,
        });
        let quantities = self
            .quantities
            .try_insert(name.clone(), quantity)
            .ok_or_else(|| self.duplicate(&name))?;
        Ok(Self { quantities })
    }

    /// Returns a new store with the expression added.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateName`] if the name is taken
    /// - [`ErrorKind::UnknownReference`] if the formula names an undeclared quantity
    /// - [`ErrorKind::CyclicReference`] if the formula references the expression itself
    pub fn declare_expression(&self, name: &str, formula: Formula) -> Result<Self> {
        self.declare_expressions(vec![(name, formula)])
    }

    /// Returns a new store with a group of expressions added.
    ///
    /// Members may reference declared quantities and each other. They are
    /// committed in dependency order, all or none.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateName`] if a name is taken or repeated in the batch
    /// - [`ErrorKind::UnknownReference`] for a reference outside the store and the batch
    /// - [`ErrorKind::CyclicReference`] if the members depend on each other in a cycle
    /// - [`ErrorKind::NonFiniteValue`] if a formula holds a NaN or infinite literal
    pub fn declare_expressions(&self, batch: Vec<(&str, Formula)>) -> Result<Self> {
        let mut members = Vec::with_capacity(batch.len());
        let mut position = HashMap::with_capacity(batch.len());
        for (i, (name, formula)) in batch.into_iter().enumerate() {
            let name = Name::new(name)?;
            if self.quantities.contains(name.as_str()) || position.contains_key(&name) {
                return Err(self.duplicate(&name));
            }
            if let Some(value) = formula.non_finite_literal() {
                return Err(Error::new(ErrorKind::NonFiniteValue {
                    name: name.to_string(),
                    value,
                }));
            }
            position.insert(name.clone(), i);
            members.push(Expression { name, formula });
        }

        let mut edges = Vec::with_capacity(members.len());
        for member in &members {
            let mut deps = Vec::new();
            for reference in member.formula.references() {
                if let Some(&i) = position.get(reference) {
                    deps.push(i);
                } else if !self.quantities.contains(reference.as_str()) {
                    return Err(Error::unknown_reference(reference.as_str()));
                }
            }
            edges.push(deps);
        }

        let mut marks = vec![Mark::Unvisited; members.len()];
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(members.len());
        for start in 0..members.len() {
            Self::visit(start, &edges, &members, &mut marks, &mut path, &mut order)?;
        }

        let mut slots: Vec<Option<Expression>> = members.into_iter().map(Some).collect();
        let mut quantities = self.quantities.clone();
        for i in order {
            let Some(expression) = slots[i].take() else {
                continue;
            };
            let name = expression.name.clone();
            quantities = quantities
                .try_insert(name.clone(), Quantity::Expression(expression))
                .ok_or_else(|| self.duplicate(&name))?;
        }
        Ok(Self { quantities })
    }

    /// Depth-first post-order walk that reports the first cycle it meets.
    fn visit(
        node: usize,
        edges: &[Vec<usize>],
        members: &[Expression],
        marks: &mut [Mark],
        path: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<()> {
        match marks[node] {
            Mark::Done => return Ok(()),
            Mark::OnPath => {
                let begin = path.iter().position(|&n| n == node).unwrap_or(0);
                let mut cycle: Vec<String> = path[begin..]
                    .iter()
                    .map(|&n| members[n].name.to_string())
                    .collect();
                cycle.push(members[node].name.to_string());
                return Err(Error::new(ErrorKind::CyclicReference { cycle }));
            }
            Mark::Unvisited => {}
        }

        marks[node] = Mark::OnPath;
        path.push(node);
        for &dep in &edges[node] {
            Self::visit(dep, edges, members, marks, path, order)?;
        }
        path.pop();
        marks[node] = Mark::Done;
        order.push(node);
        Ok(())
    }

    fn duplicate(&self, name: &Name) -> Error {
        let kind = self
            .quantities
            .get(name.as_str())
            .map_or(NameKind::Expression, Quantity::kind);
        Error::duplicate_name(kind, name.as_str())
    }

    /// Resolves a quantity to its numeric value.
    ///
    /// Expressions are evaluated recursively; the result depends only on the
    /// declared values, so repeated calls agree.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownReference`] if `name` is not declared, or
    /// [`ErrorKind::DivisionByZero`] if an expression divides by zero.
    pub fn resolve(&self, name: &str) -> Result<f64> {
        match self.quantities.get(name) {
            Some(Quantity::Parameter(p)) => Ok(p.value),
            Some(Quantity::Expression(e)) => e
                .formula
                .evaluate(&mut |reference: &Name| self.resolve(reference.as_str())),
            None => Err(Error::unknown_reference(name)),
        }
    }

    /// Gets a quantity by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.quantities.get(name)
    }

    /// Gets a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        match self.quantities.get(name) {
            Some(Quantity::Parameter(p)) => Some(p),
            _ => None,
        }
    }

    /// Gets an expression by name.
    #[must_use]
    pub fn expression(&self, name: &str) -> Option<&Expression> {
        match self.quantities.get(name) {
            Some(Quantity::Expression(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns true if a parameter or expression has this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.quantities.contains(name)
    }

    /// Iterates all quantities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Quantity> {
        self.quantities.values()
    }

    /// Iterates parameters in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.iter().filter_map(|q| match q {
            Quantity::Parameter(p) => Some(p),
            Quantity::Expression(_) => None,
        })
    }

    /// Iterates expressions in declaration order.
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.iter().filter_map(|q| match q {
            Quantity::Expression(e) => Some(e),
            Quantity::Parameter(_) => None,
        })
    }

    /// Returns the number of parameters and expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
