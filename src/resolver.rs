use crate::access::ActionSelector;
use crate::chart::Chart;
use crate::registry::Registry;

/// Inheritance-aware query engine over two registries and one chart.
///
/// Both hierarchies are traversed from the queried id up to the root, and
/// every (role ancestor, resource ancestor) pair is looked up in the chart
/// until one answers. Role specificity is exhausted first: the whole
/// resource path is tried against the queried role before the role is
/// relaxed to its parent. That ordering decides which entry wins when
/// several pairs on the two paths carry one, so the loops must not be
/// swapped. The `(ROOT, ROOT)` default entry, when installed, is the last
/// pair visited.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    roles: &'a Registry,
    resources: &'a Registry,
    chart: &'a Chart,
}

impl<'a> Resolver<'a> {
    /// Borrows the three structures for querying.
    pub fn new(roles: &'a Registry, resources: &'a Registry, chart: &'a Chart) -> Self {
        Self {
            roles,
            resources,
            chart,
        }
    }

    /// Resolves whether the role may perform the action on the resource.
    ///
    /// `false` when no entry on either path answers, meaning no policy
    /// applies. Not the complement of [`Resolver::is_denied`].
    pub fn is_allowed(&self, role: &str, resource: &str, selector: ActionSelector) -> bool {
        self.resolve(role, resource, |r, x| self.chart.is_allowed(r, x, selector))
    }

    /// Resolves whether the role is explicitly denied the action on the
    /// resource. Independent of [`Resolver::is_allowed`]; both can be
    /// `false` at once when no policy applies.
    pub fn is_denied(&self, role: &str, resource: &str, selector: ActionSelector) -> bool {
        self.resolve(role, resource, |r, x| self.chart.is_denied(r, x, selector))
    }

    fn resolve<F>(&self, role: &str, resource: &str, lookup: F) -> bool
    where
        F: Fn(&str, &str) -> Option<bool>,
    {
        let role_path = self.roles.traverse_to_root(role);
        let resource_path = self.resources.traverse_to_root(resource);

        for role_ancestor in &role_path {
            for resource_ancestor in &resource_path {
                if let Some(answer) = lookup(role_ancestor.as_str(), resource_ancestor.as_str()) {
                    return answer;
                }
            }
        }
        false
    }
}
