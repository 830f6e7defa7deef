/// Diagnostic verbosity for chart operations.
///
/// Levels are ascending and cumulative: 2 adds lookup misses, 3 adds removal
/// requests, 4 adds all mutations and lookup hits. The default is off.
/// Messages are emitted through [`tracing::debug!`], so a subscriber is still
/// required to observe them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TraceLevel(u8);

/// Environment variable consulted by [`TraceLevel::from_env`].
pub const TRACE_ENV_VAR: &str = "HIERACL_TRACE";

impl TraceLevel {
    /// No diagnostics.
    pub const OFF: TraceLevel = TraceLevel(0);

    /// Creates a trace level; values above 4 are clamped to 4.
    pub fn new(level: u8) -> Self {
        Self(level.min(4))
    }

    /// Reads the level from `HIERACL_TRACE`; absent or non-numeric is off.
    pub fn from_env() -> Self {
        std::env::var(TRACE_ENV_VAR)
            .ok()
            .and_then(|value| value.trim().parse::<u8>().ok())
            .map(Self::new)
            .unwrap_or(Self::OFF)
    }

    /// Level 1 and above.
    pub fn level1(self) -> bool {
        self.0 >= 1
    }

    /// Level 2 and above: lookup misses.
    pub fn level2(self) -> bool {
        self.0 >= 2
    }

    /// Level 3 and above: removal requests.
    pub fn level3(self) -> bool {
        self.0 >= 3
    }

    /// Level 4: all mutations and lookup hits.
    pub fn level4(self) -> bool {
        self.0 >= 4
    }
}
