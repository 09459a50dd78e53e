//! Ordered selection list

use crate::scene::ComponentId;

/// Selected components in insertion order, unique by identity.
///
/// Gizmo placement depends on the first or last entry, so this is a list
/// rather than a set. Lookup is linear; selections are small.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<ComponentId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, component: ComponentId) -> bool {
        self.items.contains(&component)
    }

    pub fn index_of(&self, component: ComponentId) -> Option<usize> {
        self.items.iter().position(|c| *c == component)
    }

    /// Append `component`; returns false if it was already selected
    pub fn push(&mut self, component: ComponentId) -> bool {
        if self.contains(component) {
            return false;
        }
        self.items.push(component);
        true
    }

    /// Remove `component`, keeping the order of the rest
    pub fn remove(&mut self, component: ComponentId) -> bool {
        match self.index_of(component) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empty the selection, returning what was selected
    pub fn clear(&mut self) -> Vec<ComponentId> {
        std::mem::take(&mut self.items)
    }

    /// Keep only the components `keep` accepts; returns how many were dropped
    pub fn retain(&mut self, mut keep: impl FnMut(ComponentId) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|c| keep(*c));
        before - self.items.len()
    }

    pub fn first(&self) -> Option<ComponentId> {
        self.items.first().copied()
    }

    pub fn last(&self) -> Option<ComponentId> {
        self.items.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[ComponentId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
