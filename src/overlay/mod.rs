//! Adapter between polygon sets and a map's overlay layer.
//!
//! The tracing core is stateless. Whatever renders its output keeps an
//! [`OverlayState`] to turn each fresh [`PolygonSet`] into create, update and
//! remove calls against an [`OverlaySink`].

use std::collections::{BTreeSet, HashMap};

use crate::error::{OverlayError, Result};
use crate::geometry::{Polygon, PolygonSet};

/// Receives overlay changes. Implemented by map integrations.
pub trait OverlaySink {
    /// Adds a new shape under `id`.
    ///
    /// # Errors
    ///
    /// Returns `OverlayError::Sink` if the map rejects the shape.
    fn create(&mut self, id: &str, polygon: &Polygon) -> std::result::Result<(), OverlayError>;

    /// Replaces the vertices of the existing shape `id`.
    ///
    /// # Errors
    ///
    /// Returns `OverlayError::Sink` if the map rejects the update.
    fn update(&mut self, id: &str, polygon: &Polygon) -> std::result::Result<(), OverlayError>;

    /// Deletes the shape `id`.
    ///
    /// # Errors
    ///
    /// Returns `OverlayError::Sink` if the map fails to delete it.
    fn remove(&mut self, id: &str) -> std::result::Result<(), OverlayError>;
}

/// One change to apply to the overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayChange {
    Create(String, Polygon),
    Update(String, Polygon),
    Remove(String),
}

impl OverlayChange {
    /// Identity the change targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Create(id, _) | Self::Update(id, _) | Self::Remove(id) => id,
        }
    }

    fn send(&self, sink: &mut impl OverlaySink) -> std::result::Result<(), OverlayError> {
        match self {
            Self::Create(id, polygon) => sink.create(id, polygon),
            Self::Update(id, polygon) => sink.update(id, polygon),
            Self::Remove(id) => sink.remove(id),
        }
    }
}

/// Identities currently rendered, per owner.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    rendered: HashMap<String, BTreeSet<String>>,
}

impl OverlayState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identities rendered for `owner`, sorted.
    pub fn rendered(&self, owner: &str) -> impl Iterator<Item = &str> {
        self.rendered
            .get(owner)
            .into_iter()
            .flat_map(|ids| ids.iter().map(String::as_str))
    }

    /// Changes that bring `owner`'s overlays in line with `set`.
    ///
    /// Creates and updates follow the set's order; removals come last,
    /// sorted by identity.
    #[must_use]
    pub fn diff(&self, owner: &str, set: &PolygonSet) -> Vec<OverlayChange> {
        let previous = self.rendered.get(owner);
        let was_rendered = |id: &str| previous.is_some_and(|ids| ids.contains(id));

        let mut changes: Vec<OverlayChange> = set
            .iter()
            .map(|(id, polygon)| {
                if was_rendered(id) {
                    OverlayChange::Update(id.to_owned(), polygon.clone())
                } else {
                    OverlayChange::Create(id.to_owned(), polygon.clone())
                }
            })
            .collect();
        if let Some(ids) = previous {
            changes.extend(
                ids.iter()
                    .filter(|id| !set.contains(id))
                    .map(|id| OverlayChange::Remove(id.clone())),
            );
        }
        changes
    }

    /// Sends the diff for `owner` to `sink`, recording each identity as soon
    /// as its call succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first sink error. Changes sent before it stay recorded, so
    /// the next `apply` only resends what the sink has not accepted yet.
    pub fn apply(
        &mut self,
        owner: &str,
        set: &PolygonSet,
        sink: &mut impl OverlaySink,
    ) -> Result<Vec<OverlayChange>> {
        let changes = self.diff(owner, set);
        let outcome = changes.iter().try_for_each(|change| {
            change.send(sink)?;
            self.record(owner, change);
            Ok::<_, OverlayError>(())
        });

        let count = |f: fn(&OverlayChange) -> bool| changes.iter().filter(|c| f(c)).count();
        tracing::debug!(
            owner,
            created = count(|c| matches!(c, OverlayChange::Create(..))),
            updated = count(|c| matches!(c, OverlayChange::Update(..))),
            removed = count(|c| matches!(c, OverlayChange::Remove(..))),
            complete = outcome.is_ok(),
            "applied overlay changes"
        );

        outcome?;
        Ok(changes)
    }

    fn record(&mut self, owner: &str, change: &OverlayChange) {
        match change {
            OverlayChange::Create(id, _) | OverlayChange::Update(id, _) => {
                self.rendered
                    .entry(owner.to_owned())
                    .or_default()
                    .insert(id.clone());
            }
            OverlayChange::Remove(id) => {
                if let Some(ids) = self.rendered.get_mut(owner) {
                    ids.remove(id);
                    if ids.is_empty() {
                        self.rendered.remove(owner);
                    }
                }
            }
        }
    }

    /// Removes every overlay rendered for `owner`.
    ///
    /// # Errors
    ///
    /// Returns the first sink error; identities not yet removed stay recorded.
    pub fn forget(&mut self, owner: &str, sink: &mut impl OverlaySink) -> Result<()> {
        self.apply(owner, &PolygonSet::new(), sink).map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::OutlineError;
    use crate::math::Cell;
    use crate::operations::AssemblePolygons;

    /// Sink holding the live shapes. Like a web map, it refuses to create
    /// an id twice or touch an id it does not hold. `fail_once` rejects the
    /// next call for that id a single time.
    #[derive(Default)]
    struct MemorySink {
        shapes: HashMap<String, Polygon>,
        log: Vec<String>,
        fail_once: Option<String>,
    }

    impl MemorySink {
        fn check(&mut self, id: &str, must_exist: bool) -> std::result::Result<(), OverlayError> {
            let fail = |message: &str| {
                Err(OverlayError::Sink {
                    id: id.to_owned(),
                    message: message.into(),
                })
            };
            if self.fail_once.as_deref() == Some(id) {
                self.fail_once = None;
                return fail("transient");
            }
            match (must_exist, self.shapes.contains_key(id)) {
                (true, false) => fail("unknown"),
                (false, true) => fail("exists"),
                _ => Ok(()),
            }
        }
    }

    impl OverlaySink for MemorySink {
        fn create(&mut self, id: &str, polygon: &Polygon) -> std::result::Result<(), OverlayError> {
            self.check(id, false)?;
            self.log.push(format!("create {id}"));
            self.shapes.insert(id.to_owned(), polygon.clone());
            Ok(())
        }

        fn update(&mut self, id: &str, polygon: &Polygon) -> std::result::Result<(), OverlayError> {
            self.check(id, true)?;
            self.log.push(format!("update {id}"));
            self.shapes.insert(id.to_owned(), polygon.clone());
            Ok(())
        }

        fn remove(&mut self, id: &str) -> std::result::Result<(), OverlayError> {
            self.check(id, true)?;
            self.log.push(format!("remove {id}"));
            self.shapes.remove(id);
            Ok(())
        }
    }

    fn c(x: i32, z: i32) -> Cell {
        Cell::new(x, z)
    }

    fn assemble(owner: &str, cells: &[Cell]) -> PolygonSet {
        AssemblePolygons::new(owner, cells).execute().unwrap()
    }

    #[test]
    fn first_apply_creates_everything() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        let set = assemble("A", &[c(0, 0), c(5, 5)]);
        state.apply("A", &set, &mut sink).unwrap();
        assert_eq!(sink.log, vec!["create A__0", "create A__1"]);
        assert_eq!(state.rendered("A").collect::<Vec<_>>(), vec!["A__0", "A__1"]);
    }

    #[test]
    fn shrinking_territory_updates_and_removes() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        state
            .apply("A", &assemble("A", &[c(0, 0), c(5, 5), c(9, 9)]), &mut sink)
            .unwrap();
        sink.log.clear();

        let merged = assemble("A", &[c(0, 0), c(1, 0)]);
        let changes = state.apply("A", &merged, &mut sink).unwrap();
        assert_eq!(sink.log, vec!["update A__0", "remove A__1", "remove A__2"]);
        assert_eq!(changes.len(), 3);
        assert_eq!(sink.shapes.len(), 1);
        assert_eq!(sink.shapes.get("A__0"), merged.get("A__0"));
    }

    #[test]
    fn owners_are_independent() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        state.apply("A", &assemble("A", &[c(0, 0)]), &mut sink).unwrap();
        state.apply("B", &assemble("B", &[c(3, 3)]), &mut sink).unwrap();
        let diff = state.diff("A", &PolygonSet::new());
        assert_eq!(diff, vec![OverlayChange::Remove("A__0".into())]);
        state.forget("A", &mut sink).unwrap();
        assert_eq!(state.rendered("A").count(), 0);
        assert_eq!(state.rendered("B").collect::<Vec<_>>(), vec!["B__0"]);
        assert!(sink.shapes.contains_key("B__0"));
        assert!(!sink.shapes.contains_key("A__0"));
    }

    #[test]
    fn failed_create_is_retried_without_resending_accepted_calls() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        state.apply("A", &assemble("A", &[c(0, 0)]), &mut sink).unwrap();

        let grown = assemble("A", &[c(0, 0), c(4, 4)]);
        sink.fail_once = Some("A__1".into());
        let err = state.apply("A", &grown, &mut sink).unwrap_err();
        assert!(matches!(err, OutlineError::Overlay(OverlayError::Sink { .. })));
        assert_eq!(state.rendered("A").collect::<Vec<_>>(), vec!["A__0"]);

        for _ in 0..3 {
            state.apply("A", &grown, &mut sink).unwrap();
        }
        assert_eq!(state.rendered("A").collect::<Vec<_>>(), vec!["A__0", "A__1"]);
        assert_eq!(sink.shapes.get("A__1"), grown.get("A__1"));
        assert_eq!(sink.log.iter().filter(|l| *l == "create A__1").count(), 1);
    }

    #[test]
    fn failed_create_after_new_create_does_not_duplicate() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        let set = assemble("A", &[c(0, 0), c(4, 4)]);
        sink.fail_once = Some("A__1".into());
        assert!(state.apply("A", &set, &mut sink).is_err());

        let changes = state.apply("A", &set, &mut sink).unwrap();
        assert!(matches!(changes[0], OverlayChange::Update(..)));
        assert!(matches!(changes[1], OverlayChange::Create(..)));
        assert_eq!(sink.shapes.len(), 2);
    }

    #[test]
    fn failed_remove_is_retried_once_only() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        state
            .apply("A", &assemble("A", &[c(0, 0), c(5, 5), c(9, 9)]), &mut sink)
            .unwrap();

        let shrunk = assemble("A", &[c(0, 0)]);
        sink.fail_once = Some("A__2".into());
        assert!(state.apply("A", &shrunk, &mut sink).is_err());
        assert_eq!(state.rendered("A").collect::<Vec<_>>(), vec!["A__0", "A__2"]);

        let changes = state.apply("A", &shrunk, &mut sink).unwrap();
        assert_eq!(
            changes.iter().map(OverlayChange::id).collect::<Vec<_>>(),
            vec!["A__0", "A__2"]
        );
        assert_eq!(sink.shapes.len(), 1);
        assert!(sink.shapes.contains_key("A__0"));
        assert_eq!(state.rendered("A").collect::<Vec<_>>(), vec!["A__0"]);
    }

    #[test]
    fn failed_forget_resumes_where_it_stopped() {
        let mut state = OverlayState::new();
        let mut sink = MemorySink::default();
        state
            .apply("A", &assemble("A", &[c(0, 0), c(5, 5)]), &mut sink)
            .unwrap();

        sink.fail_once = Some("A__1".into());
        assert!(state.forget("A", &mut sink).is_err());
        assert_eq!(state.rendered("A").collect::<Vec<_>>(), vec!["A__1"]);

        state.forget("A", &mut sink).unwrap();
        assert_eq!(state.rendered("A").count(), 0);
        assert!(sink.shapes.is_empty());
    }
}
