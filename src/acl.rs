use crate::access::{Access, ActionSelector};
use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::resolver::Resolver;
use crate::trace::TraceLevel;
use crate::types::Entity;

/// Facade owning one permission chart and the role and resource registries.
///
/// Mutations go straight to the owned structures; queries go through the
/// [`Resolver`]. The facade adds only glue: default-policy construction,
/// insert-if-absent on [`Acl::assign`] and removal of permissions alongside
/// registry removals.
#[derive(Clone, Debug, Default)]
pub struct Acl {
    permissions: Chart,
    resources: Registry,
    roles: Registry,
}

impl Acl {
    /// Creates an ACL with no default policy installed.
    ///
    /// Queries that match no entry resolve to `false` for both
    /// [`Acl::is_allowed`] and [`Acl::is_denied`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ACL with a `(ROOT, ROOT)` catch-all: default-allow when
    /// `allow` is true, default-deny otherwise.
    pub fn with_default(allow: bool) -> Self {
        let mut acl = Self::new();
        if allow {
            acl.permissions.make_default_access();
        } else {
            acl.permissions.make_default_deny();
        }
        acl
    }

    /// Sets the diagnostic verbosity for chart operations, builder style.
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.permissions = self.permissions.with_trace(trace);
        self
    }

    /// Adds a role, optionally under a parent role.
    pub fn add_role(&mut self, role: &Entity, parent: Option<&Entity>) -> Result<()> {
        self.roles.add(role, parent)
    }

    /// Adds a resource, optionally under a parent resource.
    pub fn add_resource(&mut self, resource: &Entity, parent: Option<&Entity>) -> Result<()> {
        self.resources.add(resource, parent)
    }

    /// Assigns access for the (role, resource) pair, replacing any previous
    /// assignment.
    ///
    /// Unregistered roles and resources are registered at the root first;
    /// already-registered ones are left untouched. Accepts an [`Access`] or
    /// a plain `bool` (`true` = allow all, `false` = deny all).
    pub fn assign(
        &mut self,
        role: &Entity,
        resource: &Entity,
        access: impl Into<Access>,
    ) -> Result<()> {
        match self.resources.add(resource, None) {
            Ok(()) | Err(Error::Duplicate(_)) => {}
            Err(err) => return Err(err),
        }
        match self.roles.add(role, None) {
            Ok(()) | Err(Error::Duplicate(_)) => {}
            Err(err) => return Err(err),
        }
        self.permissions
            .assign(&role.id()?, &resource.id()?, access.into());
        Ok(())
    }

    /// Resolves whether the role may perform the action on the resource,
    /// honoring inheritance on both hierarchies.
    pub fn is_allowed(
        &self,
        role: &Entity,
        resource: &Entity,
        selector: ActionSelector,
    ) -> Result<bool> {
        let resolver = Resolver::new(&self.roles, &self.resources, &self.permissions);
        Ok(resolver.is_allowed(&role.id()?, &resource.id()?, selector))
    }

    /// Resolves whether the role is explicitly denied the action on the
    /// resource. Independent of [`Acl::is_allowed`]; both are `false` when
    /// no policy applies.
    pub fn is_denied(
        &self,
        role: &Entity,
        resource: &Entity,
        selector: ActionSelector,
    ) -> Result<bool> {
        let resolver = Resolver::new(&self.roles, &self.resources, &self.permissions);
        Ok(resolver.is_denied(&role.id()?, &resource.id()?, selector))
    }

    /// Removes a role and every permission entry tied to it.
    ///
    /// With `cascade` descendant roles are removed too; otherwise their
    /// parent link moves up to the removed role's parent.
    pub fn remove_role(&mut self, role: &Entity, cascade: bool) -> Result<()> {
        let removed = self.roles.remove(role, cascade)?;
        for entity in removed {
            self.permissions
                .remove_by_role(&entity.id()?, &[ActionSelector::All])?;
        }
        Ok(())
    }

    /// Removes a resource and every permission entry tied to it.
    pub fn remove_resource(&mut self, resource: &Entity, cascade: bool) -> Result<()> {
        let removed = self.resources.remove(resource, cascade)?;
        for entity in removed {
            self.permissions
                .remove_by_resource(&entity.id()?, &[ActionSelector::All])?;
        }
        Ok(())
    }

    /// Checks whether the role is registered. Invalid ids check as absent.
    pub fn has_role(&self, role: &Entity) -> bool {
        role.id().map(|id| self.roles.has(&id)).unwrap_or(false)
    }

    /// Checks whether the resource is registered.
    pub fn has_resource(&self, resource: &Entity) -> bool {
        resource
            .id()
            .map(|id| self.resources.has(&id))
            .unwrap_or(false)
    }

    /// Clears the chart and both registries, including any default policy.
    pub fn clear(&mut self) {
        self.permissions.clear();
        self.resources.clear();
        self.roles.clear();
    }

    /// Deep copy of the permission chart for persistence.
    pub fn export_permissions(&self) -> Chart {
        self.permissions.clone()
    }

    /// Deep copy of the resource registry for persistence.
    pub fn export_resources(&self) -> Registry {
        self.resources.clone()
    }

    /// Deep copy of the role registry for persistence.
    pub fn export_roles(&self) -> Registry {
        self.roles.clone()
    }
}
