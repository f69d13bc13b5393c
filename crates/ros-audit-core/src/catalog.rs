//! Ordered rule catalog.

use crate::rule::{Rule, RuleBox};

/// Errors raised while assembling a catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two rules share the same id.
    #[error("duplicate rule id `{0}` in catalog")]
    DuplicateRule(String),
}

/// Ordered sequence of rules with unique ids.
///
/// Catalog order is both evaluation order and report order.
#[derive(Default)]
pub struct RuleCatalog {
    rules: Vec<RuleBox>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from boxed rules, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateRule`] if two rules share an id.
    pub fn from_rules(rules: impl IntoIterator<Item = RuleBox>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for rule in rules {
            catalog.push_box(rule)?;
        }
        Ok(catalog)
    }

    /// Appends a rule.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateRule`] if the id is already present.
    pub fn push<R: Rule + 'static>(&mut self, rule: R) -> Result<(), CatalogError> {
        self.push_box(Box::new(rule))
    }

    /// Appends a boxed rule.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateRule`] if the id is already present.
    pub fn push_box(&mut self, rule: RuleBox) -> Result<(), CatalogError> {
        if self.rules.iter().any(|r| r.id() == rule.id()) {
            return Err(CatalogError::DuplicateRule(rule.id().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Keeps only rules answering to one of `names` (ids or codes).
    #[must_use]
    pub fn only(mut self, names: &[&str]) -> Self {
        self.rules.retain(|rule| names.iter().any(|name| rule.answers_to(name)));
        self
    }

    /// Looks up a rule by id or code.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.answers_to(name))
            .map(|rule| -> &dyn Rule { &**rule })
    }

    /// Rules in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| -> &dyn Rule { &**rule })
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(Rule::id)).finish()
    }
}
