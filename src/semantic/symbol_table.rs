use std::collections::{hash_map::Entry, HashMap};

use log::trace;

use super::error::*;
use crate::ast::{Declaration, Ident, Scalar};

/// Maps every declared identifier to its scalar type.
///
/// Built once from the declaration list and only read afterwards.
#[derive(Debug, Default)]
pub struct SymbolTable {
    types: HashMap<String, Scalar>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a program's declarations. Redeclared identifiers keep
    /// their first type and are reported.
    pub fn from_declarations(declarations: &[Declaration]) -> (Self, Vec<SemanticError>) {
        let mut table = Self::new();
        let mut errors = vec![];

        for decl in declarations {
            for id in &decl.ids {
                if let Err(e) = table.declare(id, decl.scalar) {
                    errors.push(e);
                }
            }
        }

        trace!("declared {} identifier(s)", table.len());
        (table, errors)
    }

    pub fn declare(&mut self, id: &Ident, scalar: Scalar) -> Result<(), SemanticError> {
        match self.types.entry(id.name.clone()) {
            Entry::Occupied(_) => Err(SemanticError::new(
                SemanticErrorKind::DuplicateDeclaration(id.name.clone()),
                id.span,
            )),
            Entry::Vacant(slot) => {
                slot.insert(scalar);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Scalar, SemanticErrorKind> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| SemanticErrorKind::UndeclaredIdentifier(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
