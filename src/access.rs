use serde::{Deserialize, Serialize};
use std::fmt;

/// A single CRUD action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create access.
    Create,
    /// Read access.
    Read,
    /// Update access.
    Update,
    /// Delete access.
    Delete,
}

impl Action {
    /// All four actions.
    pub const ALL: [Action; 4] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
    ];

    /// Lowercase action name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects either a single action or all of them at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionSelector {
    /// Every CRUD action together.
    All,
    /// One named action.
    One(Action),
}

impl ActionSelector {
    /// Lowercase selector name, `"all"` for [`ActionSelector::All`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::One(action) => action.as_str(),
        }
    }
}

impl From<Action> for ActionSelector {
    fn from(action: Action) -> Self {
        Self::One(action)
    }
}

impl fmt::Display for ActionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state CRUD permission flags.
///
/// Each flag is independently `Some(true)` (allowed), `Some(false)` (denied)
/// or `None` (indeterminate, no statement either way).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    /// Create flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    /// Read flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    /// Update flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    /// Delete flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

impl Access {
    /// Access with every flag indeterminate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access with all four flags explicitly allowed.
    pub fn allow_all() -> Self {
        Self {
            create: Some(true),
            read: Some(true),
            update: Some(true),
            delete: Some(true),
        }
    }

    /// Access with all four flags explicitly denied.
    pub fn deny_all() -> Self {
        Self {
            create: Some(false),
            read: Some(false),
            update: Some(false),
            delete: Some(false),
        }
    }

    /// Sets one flag, builder style.
    pub fn with(mut self, action: Action, allowed: bool) -> Self {
        self.set(action, Some(allowed));
        self
    }

    /// Returns the flag for one action.
    pub fn get(&self, action: Action) -> Option<bool> {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    /// Sets the flag for one action.
    pub fn set(&mut self, action: Action, value: Option<bool>) {
        match action {
            Action::Create => self.create = value,
            Action::Read => self.read = value,
            Action::Update => self.update = value,
            Action::Delete => self.delete = value,
        }
    }

    /// True when all four flags are explicitly allowed.
    pub fn is_all_true(&self) -> bool {
        Action::ALL.iter().all(|&a| self.get(a) == Some(true))
    }

    /// True when all four flags are explicitly denied.
    pub fn is_all_false(&self) -> bool {
        Action::ALL.iter().all(|&a| self.get(a) == Some(false))
    }

    /// True when every flag is indeterminate.
    pub fn is_empty(&self) -> bool {
        Action::ALL.iter().all(|&a| self.get(a).is_none())
    }

    /// Computes a reduced Access with the selected flags made indeterminate.
    ///
    /// Returns `None` when the selection contains [`ActionSelector::All`],
    /// meaning the whole entry should be dropped rather than reduced.
    pub fn subtract(&self, selectors: &[ActionSelector]) -> Option<Access> {
        if selectors.contains(&ActionSelector::All) {
            return None;
        }
        let mut reduced = *self;
        for selector in selectors {
            if let ActionSelector::One(action) = selector {
                reduced.set(*action, None);
            }
        }
        Some(reduced)
    }
}

impl From<bool> for Access {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::allow_all()
        } else {
            Self::deny_all()
        }
    }
}

/// Human-friendly rendering of the flags.
///
/// All-true and all-false collapse to `ALL:true` / `ALL:false`; otherwise
/// the determinate flags are listed as `READ`, `CREATE`, `UPDATE`, `DELETE`
/// in that fixed order.
impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all_true() {
            return f.write_str("ALL:true");
        }
        if self.is_all_false() {
            return f.write_str("ALL:false");
        }
        let mut parts = Vec::new();
        for (label, flag) in [
            ("READ", self.read),
            ("CREATE", self.create),
            ("UPDATE", self.update),
            ("DELETE", self.delete),
        ] {
            if let Some(value) = flag {
                parts.push(format!("{label}:{value}"));
            }
        }
        f.write_str(&parts.join(", "))
    }
}
