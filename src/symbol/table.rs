use crate::lexer::VarType;
use std::collections::HashMap;
use thiserror::Error;

/// A declared variable. The type is `None` between the moment the name is
/// read in a declaration list and the moment its type is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub var_type: Option<VarType>,
    pub line: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("variable '{name}' already declared on line {}", .previous_line + 1)]
pub struct AlreadyDeclared {
    pub name: String,
    pub previous_line: usize,
}

/// Program-wide variable table. The language has a single scope, so
/// entries are never removed; membership means "declared".
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, usize>,
    /// Declaration order
    entries: Vec<Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable with a known type
    /// # Errors
    /// If the name is already declared; the existing entry is kept
    pub fn declare(&mut self, name: &str, var_type: VarType, line: usize) -> Result<(), AlreadyDeclared> {
        self.reserve(name, line)?;
        self.set_type(name, var_type);
        Ok(())
    }

    /// Mark a name as declared before its type is known
    /// # Errors
    /// If the name is already declared; the existing entry is kept
    pub fn reserve(&mut self, name: &str, line: usize) -> Result<(), AlreadyDeclared> {
        if let Some(symbol) = self.get(name) {
            return Err(AlreadyDeclared {
                name: name.to_string(),
                previous_line: symbol.line,
            });
        }

        self.symbols.insert(name.to_string(), self.entries.len());
        self.entries.push(Symbol {
            name: name.to_string(),
            var_type: None,
            line,
        });
        Ok(())
    }

    /// Record the type of a reserved name. Unknown names are ignored.
    pub fn set_type(&mut self, name: &str, var_type: VarType) {
        if let Some(&index) = self.symbols.get(name) {
            self.entries[index].var_type = Some(var_type);
        }
    }

    /// Declared type of a variable, if it was declared with one
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<VarType> {
        self.get(name).and_then(|symbol| symbol.var_type)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name).map(|&index| &self.entries[index])
    }

    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Integer, 1).unwrap();
        table.declare("name", VarType::String, 2).unwrap();

        assert_eq!(table.lookup("x"), Some(VarType::Integer));
        assert_eq!(table.lookup("name"), Some(VarType::String));
        assert_eq!(table.lookup("y"), None);
        assert!(!table.is_declared("y"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_redeclaration_keeps_first_entry() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Integer, 1).unwrap();
        let err = table.declare("x", VarType::Real, 4).unwrap_err();

        assert_eq!(err.name, "x");
        assert_eq!(err.previous_line, 1);
        assert_eq!(err.to_string(), "variable 'x' already declared on line 2");
        assert_eq!(table.lookup("x"), Some(VarType::Integer));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_reserve_then_set_type() {
        let mut table = SymbolTable::new();
        table.reserve("a", 0).unwrap();
        assert!(table.is_declared("a"));
        assert_eq!(table.lookup("a"), None);
        assert!(table.reserve("a", 0).is_err());

        table.set_type("a", VarType::Real);
        assert_eq!(table.lookup("a"), Some(VarType::Real));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = SymbolTable::new();
        table.declare("Total", VarType::Real, 0).unwrap();
        assert!(table.declare("total", VarType::Real, 0).is_ok());
        assert!(table.is_declared("Total"));
    }

    #[test]
    fn test_iteration_order() {
        let mut table = SymbolTable::new();
        for name in ["c", "a", "b"] {
            table.declare(name, VarType::Boolean, 0).unwrap();
        }
        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
