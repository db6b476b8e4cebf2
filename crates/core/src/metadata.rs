//! Load-time index over state-machine metadata
//!
//! The host runtime records, for every async or iterator method, which
//! compiler-generated type implements its resumable body. This module holds
//! that relation as an index built once when metadata is loaded, so frame
//! normalization can resolve a generated type back to the user method that
//! declared it in O(1) instead of scanning members per frame.

use std::collections::HashMap;

use crate::types::{MethodDescriptor, TypeDescriptor};

/// Index from generated state-machine types to their declaring user methods
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    /// Keyed by the generated type's full name
    state_machines: HashMap<String, MethodDescriptor>,
}

impl MetadataIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `method` as the user method whose state machine is `generated`
    ///
    /// The first registration for a generated type wins and later ones are
    /// ignored. One state machine per method makes collisions unexpected;
    /// keeping the first registration mirrors declaration order and is a
    /// deterministic but otherwise arbitrary choice.
    pub fn register_state_machine(&mut self, generated: &TypeDescriptor, method: MethodDescriptor) {
        self.register_state_machine_key(generated.full_name(), method);
    }

    /// Record a state-machine relation under an explicit identity key
    pub fn register_state_machine_key(&mut self, key: impl Into<String>, method: MethodDescriptor) {
        self.state_machines.entry(key.into()).or_insert(method);
    }

    /// Look up the user method implemented by the generated type, if known
    pub fn resolve_state_machine(&self, generated: &TypeDescriptor) -> Option<&MethodDescriptor> {
        self.state_machines.get(&generated.full_name())
    }

    /// Number of state-machine relations in the index
    pub fn len(&self) -> usize {
        self.state_machines.len()
    }

    /// Whether the index holds no relations
    pub fn is_empty(&self) -> bool {
        self.state_machines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated_type(name: &str) -> TypeDescriptor {
        let owner = TypeDescriptor::new("MyApp", "Worker");
        TypeDescriptor::nested(owner, name).generated()
    }

    #[test]
    fn test_register_and_resolve() {
        let generated = generated_type("<Bar>d__3");
        let owner = TypeDescriptor::new("MyApp", "Worker");
        let method = MethodDescriptor::new(Some(owner), "Bar");

        let mut index = MetadataIndex::new();
        index.register_state_machine(&generated, method.clone());

        assert_eq!(index.resolve_state_machine(&generated), Some(&method));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_unknown_type_resolves_to_none() {
        let index = MetadataIndex::new();
        assert!(index.resolve_state_machine(&generated_type("<Bar>d__3")).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_first_registration_wins() {
        let generated = generated_type("<Bar>d__3");
        let owner = TypeDescriptor::new("MyApp", "Worker");
        let first = MethodDescriptor::new(Some(owner.clone()), "Bar");
        let second = MethodDescriptor::new(Some(owner), "BarOverload");

        let mut index = MetadataIndex::new();
        index.register_state_machine(&generated, first.clone());
        index.register_state_machine(&generated, second);

        assert_eq!(index.resolve_state_machine(&generated), Some(&first));
        assert_eq!(index.len(), 1);
    }
}
