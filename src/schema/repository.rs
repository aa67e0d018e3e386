//! Backing store for the logical schema.

use std::collections::HashMap;

use super::model::Domain;

/// Read access to loaded schema domains.
///
/// Implementations are external to this crate (the real repository lives in
/// the host server); the in-memory implementation below is for embedding and
/// tests. Authorization is the repository's concern: a domain the caller may
/// not see is simply not returned.
pub trait SchemaRepository {
    /// Look up a domain by id. `None` means absent (or not visible).
    fn domain(&self, domain_id: &str) -> Option<&Domain>;

    /// Ids of all visible domains, in a stable order.
    fn domain_ids(&self) -> Vec<String>;
}

/// Simple in-memory repository over pre-built domains.
#[derive(Debug, Default)]
pub struct InMemorySchemaRepository {
    domains: HashMap<String, Domain>,
    order: Vec<String>,
}

impl InMemorySchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_domain(&mut self, domain: Domain) {
        if !self.domains.contains_key(&domain.id) {
            self.order.push(domain.id.clone());
        }
        self.domains.insert(domain.id.clone(), domain);
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.add_domain(domain);
        self
    }
}

impl SchemaRepository for InMemorySchemaRepository {
    fn domain(&self, domain_id: &str) -> Option<&Domain> {
        self.domains.get(domain_id)
    }

    fn domain_ids(&self) -> Vec<String> {
        self.order.clone()
    }
}
