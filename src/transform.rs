//! Pose lookup boundary.
//!
//! The layer never owns a transform tree; it asks a [`PoseSource`] for the
//! latest pose of each tracked frame. Lookup failures are expected in steady
//! state (robots join and leave, transforms go stale), so they are plain
//! `Result` variants rather than anything fatal.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, SystemTime};

use thiserror::Error;

use crate::types::Pose2;

/// Why a pose could not be produced. Per-entity and non-fatal: the update
/// pass logs it and moves on to the next frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("frame '{0}' is not known to the pose source")]
    UnknownFrame(String),
    #[error("no transform path from '{reference}' to '{frame}'")]
    NoPath { reference: String, frame: String },
    #[error("transform for '{frame}' is outside the extrapolation limit")]
    TooOld { frame: String },
}

/// Source of entity poses in a shared reference frame.
///
/// `at = None` asks for the latest known transform; `Some(t)` asks for the
/// most recent transform at or before `t`.
pub trait PoseSource: Send + Sync {
    fn lookup(
        &self,
        reference: &str,
        frame: &str,
        at: Option<SystemTime>,
    ) -> Result<Pose2, LookupError>;
}

/// In-memory pose provider: frame -> (pose, stamp), all expressed in a single
/// reference frame.
///
/// Mutators take `&self` so a feeder thread can keep updating poses behind an
/// `Arc` while layers read from it. An optional `max_age` turns entries older
/// than the limit into [`LookupError::TooOld`].
#[derive(Debug, Default)]
pub struct PoseBuffer {
    reference: String,
    max_age: Option<Duration>,
    poses: RwLock<HashMap<String, (Pose2, SystemTime)>>,
}

impl PoseBuffer {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            max_age: None,
            poses: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_max_age(reference: impl Into<String>, max_age: Duration) -> Self {
        Self {
            reference: reference.into(),
            max_age: Some(max_age),
            poses: RwLock::new(HashMap::new()),
        }
    }

    /// Record the current pose of `frame`, stamped now.
    pub fn insert(&self, frame: impl Into<String>, pose: Pose2) {
        self.insert_stamped(frame, pose, SystemTime::now());
    }

    /// Record the pose of `frame` with an explicit stamp.
    pub fn insert_stamped(&self, frame: impl Into<String>, pose: Pose2, stamp: SystemTime) {
        self.write_lock().insert(frame.into(), (pose, stamp));
    }

    /// Forget `frame`, e.g. when a robot leaves the fleet.
    pub fn remove(&self, frame: &str) {
        self.write_lock().remove(frame);
    }

    // A poisoned lock still guards a valid map; take the inner value.
    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, (Pose2, SystemTime)>> {
        self.poses.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PoseSource for PoseBuffer {
    fn lookup(
        &self,
        reference: &str,
        frame: &str,
        at: Option<SystemTime>,
    ) -> Result<Pose2, LookupError> {
        if reference != self.reference {
            return Err(LookupError::NoPath {
                reference: reference.to_string(),
                frame: frame.to_string(),
            });
        }

        let poses = self.poses.read().unwrap_or_else(PoisonError::into_inner);
        let (pose, stamp) = poses
            .get(frame)
            .ok_or_else(|| LookupError::UnknownFrame(frame.to_string()))?;

        // Only one sample per frame is kept, so a query older than the stamp
        // has no data at or before it.
        if let Some(at) = at
            && *stamp > at
        {
            return Err(LookupError::TooOld {
                frame: frame.to_string(),
            });
        }

        if let Some(max_age) = self.max_age {
            let age = SystemTime::now().duration_since(*stamp).unwrap_or_default();
            if age > max_age {
                return Err(LookupError::TooOld {
                    frame: frame.to_string(),
                });
            }
        }

        Ok(*pose)
    }
}
