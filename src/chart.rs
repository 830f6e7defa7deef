use crate::access::{Access, ActionSelector};
use crate::error::{Error, Result};
use crate::trace::TraceLevel;
use crate::types::ROOT;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One exact-pair permission statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartEntry {
    /// Role id.
    pub role: String,
    /// Resource id.
    pub resource: String,
    /// CRUD flags for the pair.
    pub access: Access,
}

/// Exact-(role, resource)-pair CRUD access table.
///
/// The chart has no hierarchy awareness; lookups answer for the exact pair
/// only and return `None` when no entry exists. Inheritance is layered on
/// top by the [`Resolver`](crate::Resolver).
///
/// A chart is a single-writer structure; concurrent mutation without
/// external synchronization is the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    entries: BTreeMap<(String, String), ChartEntry>,
    trace: TraceLevel,
}

fn pair_key(role: &str, resource: &str) -> String {
    format!("{role}--{resource}")
}

fn selector_list(selectors: &[ActionSelector]) -> String {
    selectors
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Chart {
    /// Creates an empty chart with diagnostics off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostic verbosity, builder style.
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.trace = trace;
        self
    }

    /// Installs or replaces the `(ROOT, ROOT)` catch-all with all access
    /// granted. Every traversal path ends at the root pair, so this entry
    /// answers any query that nothing more specific matched.
    pub fn make_default_access(&mut self) {
        self.assign(ROOT, ROOT, Access::allow_all());
    }

    /// Installs or replaces the `(ROOT, ROOT)` catch-all with all access
    /// denied.
    pub fn make_default_deny(&mut self) {
        self.assign(ROOT, ROOT, Access::deny_all());
    }

    /// Assigns access for the exact pair, fully replacing any previous entry.
    pub fn assign(&mut self, role: &str, resource: &str, access: Access) -> &ChartEntry {
        let key = (role.to_string(), resource.to_string());
        if let Some(entry) = self.entries.get_mut(&key) {
            if self.trace.level4() {
                debug!(
                    "Changing \"{}\" to \"{access}\" for role \"{role}\" and resource \"{resource}\".",
                    entry.access
                );
            }
            entry.access = access;
        } else {
            if self.trace.level4() {
                debug!("Adding \"{access}\" for role \"{role}\" and resource \"{resource}\".");
            }
            self.entries.insert(
                key.clone(),
                ChartEntry {
                    role: role.to_string(),
                    resource: resource.to_string(),
                    access,
                },
            );
        }
        &self.entries[&key]
    }

    /// Exact-pair allow lookup; `None` when the pair has no entry.
    ///
    /// With [`ActionSelector::All`] the answer is `true` only when all four
    /// flags are explicitly true. A single action compares against an
    /// explicit `true`; an indeterminate flag answers `false`.
    pub fn is_allowed(
        &self,
        role: &str,
        resource: &str,
        selector: ActionSelector,
    ) -> Option<bool> {
        let entry = self.lookup(role, resource)?;
        Some(match selector {
            ActionSelector::All => entry.access.is_all_true(),
            ActionSelector::One(action) => entry.access.get(action) == Some(true),
        })
    }

    /// Exact-pair deny lookup; `None` when the pair has no entry.
    ///
    /// The mirror of [`Chart::is_allowed`]: `All` requires all four flags
    /// explicitly false, a single action compares against an explicit
    /// `false`.
    pub fn is_denied(&self, role: &str, resource: &str, selector: ActionSelector) -> Option<bool> {
        let entry = self.lookup(role, resource)?;
        Some(match selector {
            ActionSelector::All => entry.access.is_all_false(),
            ActionSelector::One(action) => entry.access.get(action) == Some(false),
        })
    }

    fn lookup(&self, role: &str, resource: &str) -> Option<&ChartEntry> {
        let entry = self.entries.get(&(role.to_string(), resource.to_string()));
        match entry {
            None => {
                if self.trace.level2() {
                    debug!(
                        "Permission chart does not contain role \"{role}\" and resource \"{resource}\"."
                    );
                }
                None
            }
            Some(entry) => {
                if self.trace.level4() {
                    debug!(
                        "Permission chart contains {} for role \"{role}\" and resource \"{resource}\".",
                        entry.access
                    );
                }
                Some(entry)
            }
        }
    }

    /// Removes the selected actions from the exact pair.
    ///
    /// When the selection contains [`ActionSelector::All`] the entry is
    /// deleted and `None` is returned. Otherwise the named flags are made
    /// indeterminate, the reduced access is persisted in place and the
    /// updated entry is returned. Fails with [`Error::NotFound`] when the
    /// pair has no entry.
    pub fn remove(
        &mut self,
        role: &str,
        resource: &str,
        selectors: &[ActionSelector],
    ) -> Result<Option<ChartEntry>> {
        let key = (role.to_string(), resource.to_string());
        if self.trace.level3() {
            debug!(
                "Remove \"{}\" for {}.",
                selector_list(selectors),
                pair_key(role, resource)
            );
        }
        let Some(entry) = self.entries.get_mut(&key) else {
            return Err(Error::NotFound(format!(
                "permission \"{}\" not in chart",
                pair_key(role, resource)
            )));
        };
        let Some(reduced) = entry.access.subtract(selectors) else {
            if self.trace.level4() {
                debug!(
                    "Remove entry {} from permissions chart.",
                    pair_key(role, resource)
                );
            }
            self.entries.remove(&key);
            return Ok(None);
        };
        if self.trace.level4() {
            debug!(
                "Reducing \"{}\" to \"{reduced}\" for {}",
                entry.access,
                pair_key(role, resource)
            );
        }
        entry.access = reduced;
        Ok(Some(entry.clone()))
    }

    /// Applies [`Chart::remove`] to every entry matching the resource.
    ///
    /// Entries whose access becomes fully indeterminate are deleted. A
    /// snapshot of the matching keys is taken first, so removal never
    /// iterates a table it is mutating.
    pub fn remove_by_resource(&mut self, resource: &str, selectors: &[ActionSelector]) -> Result<()> {
        if self.trace.level3() {
            debug!(
                "Remove \"{}\" for resource \"{resource}\".",
                selector_list(selectors)
            );
        }
        let matching: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.resource == resource)
            .map(|entry| entry.role.clone())
            .collect();
        for role in matching {
            self.remove_and_prune(&role, resource, selectors)?;
        }
        Ok(())
    }

    /// Applies [`Chart::remove`] to every entry matching the role.
    ///
    /// Entries whose access becomes fully indeterminate are deleted.
    pub fn remove_by_role(&mut self, role: &str, selectors: &[ActionSelector]) -> Result<()> {
        if self.trace.level3() {
            debug!(
                "Remove \"{}\" for role \"{role}\".",
                selector_list(selectors)
            );
        }
        let matching: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.role == role)
            .map(|entry| entry.resource.clone())
            .collect();
        for resource in matching {
            self.remove_and_prune(role, &resource, selectors)?;
        }
        Ok(())
    }

    fn remove_and_prune(
        &mut self,
        role: &str,
        resource: &str,
        selectors: &[ActionSelector],
    ) -> Result<()> {
        if let Some(entry) = self.remove(role, resource, selectors)?
            && entry.access.is_empty()
        {
            self.entries
                .remove(&(role.to_string(), resource.to_string()));
        }
        Ok(())
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry exists.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether the exact pair has an entry.
    pub fn has_pair(&self, role: &str, resource: &str) -> bool {
        self.entries
            .contains_key(&(role.to_string(), resource.to_string()))
    }

    /// Deduplicated role ids present in the chart.
    pub fn roles(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .map(|entry| entry.role.clone())
            .collect()
    }

    /// Deduplicated resource ids present in the chart.
    pub fn resources(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Drops every entry. The trace level is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates the entries in deterministic key order.
    pub fn entries(&self) -> impl Iterator<Item = &ChartEntry> {
        self.entries.values()
    }

    /// Exports the entry map for persistence.
    pub fn export(&self) -> BTreeMap<(String, String), ChartEntry> {
        self.entries.clone()
    }

    /// Rebuilds a chart from a previously exported entry map.
    pub fn from_entries(entries: BTreeMap<(String, String), ChartEntry>) -> Self {
        Self {
            entries,
            trace: TraceLevel::OFF,
        }
    }

    /// Deterministic dump: one `role--resource` line per entry followed by
    /// the indented pretty-printed access.
    pub fn print_all(&self) -> String {
        self.entries
            .values()
            .map(|entry| {
                format!(
                    "{}\n  {}",
                    pair_key(&entry.role, &entry.resource),
                    entry.access
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
