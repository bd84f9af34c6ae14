//! The table of declared equation identifiers.

use std::collections::HashMap;

/// Identifier → sequence number, filled in declaration order.
///
/// Every declaration takes the next number, even when its identifier was
/// already declared; lookups then see the later declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierTable {
    declared: Vec<String>,
    numbers: HashMap<String, usize>,
}

impl IdentifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration and return its 1-based sequence number.
    pub fn declare(&mut self, label: &str) -> usize {
        self.declared.push(label.to_string());
        let number = self.declared.len();

        if let Some(previous) = self.numbers.insert(label.to_string(), number) {
            log::warn!(
                "label {} declared again: references now resolve to ({}) instead of ({})",
                label,
                number,
                previous
            );
        }

        number
    }

    /// Sequence number a reference to `label` resolves to.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.numbers.get(label).copied()
    }

    /// Number of declarations seen, duplicates included.
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Declarations in document order with the number each one received.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.declared
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i + 1))
    }
}
