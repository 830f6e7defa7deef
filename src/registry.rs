use crate::error::{Error, Result};
use crate::types::{Entity, ROOT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Hierarchy store for roles or resources.
///
/// Two flat tables keyed by entity id: `records` holds the original payloads
/// and `register` holds the single-parent links. [`ROOT`] is referenced as a
/// parent but never stored as a node. Child enumeration is a linear scan over
/// the parent table, which is O(n); expected hierarchies are shallow enough
/// that no child index is kept.
///
/// A registry is a single-writer structure. Sharing one across threads
/// without external synchronization is the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    records: BTreeMap<String, Entity>,
    register: BTreeMap<String, String>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, optionally under a parent.
    ///
    /// Without a parent the entity is placed directly under [`ROOT`]. Fails
    /// with [`Error::Duplicate`] when the id is already present and with
    /// [`Error::NotFound`] when the parent id is absent.
    pub fn add(&mut self, entity: &Entity, parent: Option<&Entity>) -> Result<()> {
        let id = entity.id()?;
        if self.register.contains_key(&id) {
            return Err(Error::Duplicate(id));
        }
        let parent_id = match parent {
            Some(parent) => {
                let parent_id = parent.id()?;
                if !self.register.contains_key(&parent_id) {
                    return Err(Error::NotFound(format!(
                        "entity \"{parent_id}\" not in registry"
                    )));
                }
                parent_id
            }
            None => ROOT.to_string(),
        };
        self.register.insert(id.clone(), parent_id);
        self.records.insert(id, entity.clone());
        Ok(())
    }

    /// Removes an entity, returning the removed payloads in deletion order.
    ///
    /// With `cascade` every transitive descendant is removed first, children
    /// preceding their parents in the returned list. Without `cascade` each
    /// direct child is reparented to the removed entity's own parent and only
    /// the target is deleted.
    pub fn remove(&mut self, entity: &Entity, cascade: bool) -> Result<Vec<Entity>> {
        let id = entity.id()?;
        self.remove_id(&id, cascade)
    }

    fn remove_id(&mut self, id: &str, cascade: bool) -> Result<Vec<Entity>> {
        let Some(parent_id) = self.register.get(id).cloned() else {
            return Err(Error::NotFound(format!("entity \"{id}\" not in registry")));
        };
        let mut removed = Vec::new();
        let children = self.child_ids(id);
        if !children.is_empty() {
            if cascade {
                for child in children {
                    removed.extend(self.remove_id(&child, true)?);
                }
            } else {
                for child in children {
                    self.register.insert(child, parent_id.clone());
                }
            }
        }
        self.register.remove(id);
        if let Some(record) = self.records.remove(id) {
            removed.push(record);
        }
        Ok(removed)
    }

    /// Checks whether an id is registered. Unknown ids are simply absent.
    pub fn has(&self, id: &str) -> bool {
        self.register.contains_key(id)
    }

    /// Checks whether any registered entity has the given id as its parent.
    pub fn has_child(&self, id: &str) -> bool {
        self.register.values().any(|parent| parent == id)
    }

    /// Ids whose stored parent equals `parent`; [`ROOT`] is a valid argument.
    pub fn child_ids(&self, parent: &str) -> Vec<String> {
        self.register
            .iter()
            .filter(|(_, parent_id)| parent_id.as_str() == parent)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns the stored payload for an id.
    pub fn record(&self, id: &str) -> Option<&Entity> {
        self.records.get(id)
    }

    /// Ordered path from an id up to [`ROOT`].
    ///
    /// Parent links are followed while the current id is registered, and
    /// [`ROOT`] terminates the path unconditionally. An id that was never
    /// added yields `[id, ROOT]`; `traverse_to_root(ROOT)` yields `[ROOT]`.
    pub fn traverse_to_root(&self, id: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = id.to_string();
        while let Some(parent) = self.register.get(&current) {
            path.push(current);
            current = parent.clone();
        }
        if path.is_empty() && current != ROOT {
            path.push(current);
        }
        path.push(ROOT.to_string());
        path
    }

    /// Number of registered entities.
    pub fn size(&self) -> usize {
        self.register.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.register.is_empty()
    }

    /// Drops every entity from both tables.
    pub fn clear(&mut self) {
        self.records.clear();
        self.register.clear();
    }

    /// Indented tree dump starting at `from`; [`ROOT`] prints the forest.
    pub fn print(&self, from: &str) -> String {
        self.print_indented(from, "")
    }

    fn print_indented(&self, from: &str, lead: &str) -> String {
        let mut output = format!("{lead}- {from}\n");
        let child_lead = format!("{lead}  ");
        for child in self.child_ids(from) {
            output.push_str(&self.print_indented(&child, &child_lead));
        }
        output
    }

    /// Flat `id | parent` listing with ids right-aligned to the longest id.
    pub fn print_all(&self) -> String {
        let max_len = self
            .register
            .keys()
            .map(|id| id.len())
            .max()
            .unwrap_or(0);
        let mut output = String::new();
        for (id, parent) in &self.register {
            let pad = max_len - id.len() + 1;
            output.push_str(&" ".repeat(pad));
            output.push_str(id);
            output.push_str(" | ");
            output.push_str(parent);
            output.push('\n');
        }
        output
    }

    /// Rebuilds a registry from a decoded JSON value.
    ///
    /// Fails with [`Error::InvalidType`] when `records` or `register` is
    /// missing or not an object, when an entry has an unexpected shape, or
    /// when the imported parent links contain a cycle. The cycle check keeps
    /// [`Registry::traverse_to_root`] finite for every id: entities added
    /// through [`Registry::add`] cannot form cycles (the parent must
    /// pre-exist), so the import path is the only way to smuggle one in.
    pub fn recreate(from: &Value) -> Result<Self> {
        let Some(records) = from.get("records").filter(|v| v.is_object()) else {
            return Err(Error::InvalidType(
                "import object does not contain `records` as an object".into(),
            ));
        };
        let Some(register) = from.get("register").filter(|v| v.is_object()) else {
            return Err(Error::InvalidType(
                "import object does not contain `register` as an object".into(),
            ));
        };
        let records: BTreeMap<String, Entity> = serde_json::from_value(records.clone())
            .map_err(|err| Error::InvalidType(format!("malformed `records` table: {err}")))?;
        let register: BTreeMap<String, String> = serde_json::from_value(register.clone())
            .map_err(|err| Error::InvalidType(format!("malformed `register` table: {err}")))?;
        for start in register.keys() {
            let mut current = start.as_str();
            let mut steps = 0;
            while let Some(parent) = register.get(current) {
                steps += 1;
                if steps > register.len() {
                    return Err(Error::InvalidType(format!(
                        "`register` table contains a parent cycle reachable from \"{start}\""
                    )));
                }
                current = parent.as_str();
            }
        }
        Ok(Self { records, register })
    }

    /// Encodes both tables as `{"records": {...}, "register": {...}}`.
    pub fn save_to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|err| Error::InvalidType(format!("registry encoding failed: {err}")))
    }

    /// Exact inverse of [`Registry::save_to_json`].
    pub fn load_from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| Error::InvalidType(format!("registry decoding failed: {err}")))?;
        Self::recreate(&value)
    }
}
