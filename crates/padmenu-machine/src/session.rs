#![forbid(unsafe_code)]

//! Session save/restore fan-out and the host lifecycle contract.
//!
//! A [`SessionRegistry`] holds an ordered set of subsystems, each owning
//! one opaque slot in the persisted blob (a JSON object keyed by subsystem
//! id). The host calls the module through [`ModuleLifecycle`], exactly
//! once per lifecycle point: load, checkpoint/unload, and teardown.
//!
//! # Design Invariants
//!
//! 1. **Every entry, every time**: save and restore visit every registry
//!    entry in registration order; a failing entry is reported and
//!    skipped, never allowed to mask the rest.
//! 2. **Shutdown is total**: teardown saves once, then releases every
//!    subsystem in registry order regardless of earlier failures. Partial
//!    failure is isolated, collected into the [`ShutdownReport`], and
//!    logged.
//! 3. **Missing slots degrade, not fail**: a subsystem restored without a
//!    sub-blob (first run, renamed id, foreign save) falls back to its own
//!    defaults.

use std::error::Error;
use std::fmt;

use serde_json::Value;
use tracing::{error, warn};

/// Error surfaced by a subsystem during save, restore, or release.
#[derive(Debug)]
pub enum SessionError {
    /// A persisted blob could not be encoded or decoded.
    Serialization(String),
    /// An engine-side resource failed to save, restore, or release.
    Resource(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            SessionError::Resource(msg) => write!(f, "resource error: {msg}"),
        }
    }
}

impl Error for SessionError {}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// One save/restore/release participant.
///
/// `C` is the shared module context; subsystem values themselves are
/// usually thin slots that reach into it.
pub trait Subsystem<C> {
    /// Produce this subsystem's opaque slot of the session blob.
    fn save_state(&mut self, ctx: &mut C) -> Result<Value, SessionError>;

    /// Re-establish state from this subsystem's slot; `None` means the
    /// slot was absent and defaults apply.
    fn restore_state(&mut self, ctx: &mut C, blob: Option<&Value>) -> Result<(), SessionError>;

    /// Release engine resources. Called exactly once, at teardown.
    fn release(&mut self, ctx: &mut C) -> Result<(), SessionError>;
}

/// Outcome of [`SessionRegistry::shutdown`].
#[derive(Debug)]
pub struct ShutdownReport {
    /// The final checkpoint, saved before any release ran.
    pub checkpoint: Value,
    /// Per-subsystem failures, in registry order.
    pub failures: Vec<(String, SessionError)>,
}

impl ShutdownReport {
    /// True when every subsystem released cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered registry of persistence subsystems.
pub struct SessionRegistry<C> {
    entries: Vec<(String, Box<dyn Subsystem<C>>)>,
}

impl<C> SessionRegistry<C> {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a subsystem under `id`. Registration order is the order
    /// of every later fan-out.
    pub fn register(&mut self, id: impl Into<String>, subsystem: impl Subsystem<C> + 'static) {
        self.entries.push((id.into(), Box::new(subsystem)));
    }

    /// Registered ids, in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Collect `{id: blob}` for every entry.
    ///
    /// An entry whose save fails is logged and omitted from the result;
    /// the remaining entries still save.
    pub fn save(&mut self, ctx: &mut C) -> Value {
        let mut map = serde_json::Map::new();
        for (id, subsystem) in &mut self.entries {
            match subsystem.save_state(ctx) {
                Ok(blob) => {
                    map.insert(id.clone(), blob);
                }
                Err(err) => warn!(subsystem = %id, %err, "save failed, slot omitted"),
            }
        }
        Value::Object(map)
    }

    /// Hand every entry its slot of `blob` (or `None` when absent).
    pub fn restore(&mut self, ctx: &mut C, blob: &Value) {
        for (id, subsystem) in &mut self.entries {
            let slot = blob.get(id.as_str());
            if let Err(err) = subsystem.restore_state(ctx, slot) {
                warn!(subsystem = %id, %err, "restore failed, subsystem left at defaults");
            }
        }
    }

    /// Save once, then release every entry in registry order.
    ///
    /// Release failures never block later entries; they are logged and
    /// returned in the report.
    pub fn shutdown(&mut self, ctx: &mut C) -> ShutdownReport {
        let checkpoint = self.save(ctx);
        let mut failures = Vec::new();
        for (id, subsystem) in &mut self.entries {
            if let Err(err) = subsystem.release(ctx) {
                error!(subsystem = %id, %err, "release failed during shutdown");
                failures.push((id.clone(), err));
            }
        }
        ShutdownReport {
            checkpoint,
            failures,
        }
    }
}

impl<C> Default for SessionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The three callback slots the host invokes, exactly once each, at
/// load, checkpoint/unload, and teardown. The module implements this
/// trait; it never calls it.
pub trait ModuleLifecycle {
    /// Host delivered a previously persisted session blob (load).
    fn on_restore(&mut self, blob: &Value);

    /// Host is checkpointing or unloading; return the session blob.
    fn on_save(&mut self) -> Value;

    /// Host is tearing the module down.
    fn on_exit(&mut self) -> ShutdownReport;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Shared context counting release calls per subsystem id.
    #[derive(Default)]
    struct World {
        log: Vec<String>,
    }

    /// Subsystem slot that stores a number and can be told to fail.
    struct Slot {
        id: &'static str,
        value: i64,
        fail_save: bool,
        fail_release: bool,
    }

    impl Slot {
        fn new(id: &'static str, value: i64) -> Self {
            Self {
                id,
                value,
                fail_save: false,
                fail_release: false,
            }
        }
    }

    impl Subsystem<World> for Slot {
        fn save_state(&mut self, _ctx: &mut World) -> Result<Value, SessionError> {
            if self.fail_save {
                return Err(SessionError::Resource("save exploded".into()));
            }
            Ok(json!({ "value": self.value }))
        }

        fn restore_state(
            &mut self,
            ctx: &mut World,
            blob: Option<&Value>,
        ) -> Result<(), SessionError> {
            self.value = blob
                .and_then(|b| b.get("value"))
                .and_then(Value::as_i64)
                .unwrap_or(0);
            ctx.log.push(format!("restore:{}", self.id));
            Ok(())
        }

        fn release(&mut self, ctx: &mut World) -> Result<(), SessionError> {
            ctx.log.push(format!("release:{}", self.id));
            if self.fail_release {
                return Err(SessionError::Resource("release exploded".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn save_produces_one_slot_per_entry_in_order() {
        let mut world = World::default();
        let mut registry = SessionRegistry::new();
        registry.register("alpha", Slot::new("alpha", 1));
        registry.register("beta", Slot::new("beta", 2));

        let blob = registry.save(&mut world);
        assert_eq!(
            blob,
            json!({ "alpha": { "value": 1 }, "beta": { "value": 2 } })
        );
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["alpha", "beta"]);
    }

    #[test]
    fn failed_save_omits_slot_but_keeps_the_rest() {
        let mut world = World::default();
        let mut registry = SessionRegistry::new();
        let mut bad = Slot::new("alpha", 1);
        bad.fail_save = true;
        registry.register("alpha", bad);
        registry.register("beta", Slot::new("beta", 2));

        let blob = registry.save(&mut world);
        assert_eq!(blob, json!({ "beta": { "value": 2 } }));
    }

    #[test]
    fn restore_feeds_each_entry_its_own_slot() {
        let mut world = World::default();
        let mut registry = SessionRegistry::new();
        registry.register("alpha", Slot::new("alpha", 0));
        registry.register("beta", Slot::new("beta", 0));

        registry.restore(
            &mut world,
            &json!({ "alpha": { "value": 7 }, "beta": { "value": 9 } }),
        );
        let blob = registry.save(&mut world);
        assert_eq!(
            blob,
            json!({ "alpha": { "value": 7 }, "beta": { "value": 9 } })
        );
        assert_eq!(world.log, ["restore:alpha", "restore:beta"]);
    }

    #[test]
    fn restore_with_missing_slot_defaults_that_entry_only() {
        let mut world = World::default();
        let mut registry = SessionRegistry::new();
        registry.register("alpha", Slot::new("alpha", 5));
        registry.register("beta", Slot::new("beta", 5));

        registry.restore(&mut world, &json!({ "beta": { "value": 9 } }));
        let blob = registry.save(&mut world);
        assert_eq!(
            blob,
            json!({ "alpha": { "value": 0 }, "beta": { "value": 9 } })
        );
    }

    #[test]
    fn shutdown_saves_once_then_releases_everything() {
        let mut world = World::default();
        let mut registry = SessionRegistry::new();
        registry.register("alpha", Slot::new("alpha", 1));
        registry.register("beta", Slot::new("beta", 2));

        let report = registry.shutdown(&mut world);
        assert!(report.is_clean());
        assert_eq!(
            report.checkpoint,
            json!({ "alpha": { "value": 1 }, "beta": { "value": 2 } })
        );
        assert_eq!(world.log, ["release:alpha", "release:beta"]);
    }

    #[test]
    fn shutdown_releases_later_entries_despite_earlier_failure() {
        let mut world = World::default();
        let mut registry = SessionRegistry::new();
        let mut bad = Slot::new("alpha", 1);
        bad.fail_release = true;
        registry.register("alpha", bad);
        registry.register("beta", Slot::new("beta", 2));

        let report = registry.shutdown(&mut world);
        assert!(!report.is_clean());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "alpha");
        // Both releases were attempted, in registry order.
        assert_eq!(world.log, ["release:alpha", "release:beta"]);
    }

    #[test]
    fn session_error_display_is_prefixed() {
        let err = SessionError::Resource("gone".into());
        assert_eq!(err.to_string(), "resource error: gone");
        let err = SessionError::Serialization("bad json".into());
        assert_eq!(err.to_string(), "serialization error: bad json");
    }

    #[test]
    fn serde_json_errors_convert_to_serialization() {
        let parse_err = serde_json::from_str::<Value>("{nope").unwrap_err();
        let err: SessionError = parse_err.into();
        assert!(matches!(err, SessionError::Serialization(_)));
    }
}
