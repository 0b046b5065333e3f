//! Immutable scene snapshots
//!
//! A snapshot is built once per engine call from the host's live scene
//! state. World AABBs are derived at construction time and never change
//! afterwards.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::error::{Result, SpatialError};
use crate::geometry::{self, AABB};
use super::object::SceneObject;

/// Point-in-time copy of every object plus optional room bounds
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    objects: Vec<SceneObject>,
    bounds: Vec<AABB>,
    index: HashMap<String, usize>,
    room: Option<AABB>,
}

impl SceneSnapshot {
    /// Build a snapshot, validating names and extents
    pub fn new(objects: Vec<SceneObject>, room: Option<AABB>) -> Result<Self> {
        let mut index = HashMap::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            if let Some(reason) = object.geometry_problem() {
                return Err(SpatialError::InvalidGeometry { name: object.name.clone(), reason });
            }
            if index.insert(object.name.clone(), i).is_some() {
                return Err(SpatialError::DuplicateObject(object.name.clone()));
            }
        }

        if let Some(room) = &room {
            let size = room.size();
            if !size.iter().all(|c| c.is_finite() && *c > 0.0) {
                return Err(SpatialError::InvalidGeometry {
                    name: "room".to_string(),
                    reason: format!("room bounds must have positive size, got {:?}", size.as_slice()),
                });
            }
        }

        let bounds = objects.iter().map(geometry::aabb_of).collect();
        log::trace!("Snapshot built with {} objects (room: {})", objects.len(), room.is_some());

        Ok(Self { objects, bounds, index, room })
    }

    /// Snapshot with no objects
    pub fn empty(room: Option<AABB>) -> Self {
        Self { objects: Vec::new(), bounds: Vec::new(), index: HashMap::new(), room }
    }

    /// Copy of this snapshot with one more object
    pub fn with_object(&self, object: SceneObject) -> Result<Self> {
        let mut objects = self.objects.clone();
        objects.push(object);
        Self::new(objects, self.room)
    }

    /// Copy of this snapshot with `name` replaced by `object`
    pub fn with_replaced(&self, name: &str, object: SceneObject) -> Result<Self> {
        let i = self.position_of(name)?;
        let mut objects = self.objects.clone();
        objects[i] = object;
        Self::new(objects, self.room)
    }

    /// Declared room bounds
    pub fn room(&self) -> Option<&AABB> {
        self.room.as_ref()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether there are no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects paired with their world AABBs, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&SceneObject, &AABB)> {
        self.objects.iter().zip(self.bounds.iter())
    }

    /// Look up an object by exact name
    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.index.get(name).map(|&i| &self.objects[i])
    }

    /// Look up an object, failing with [`SpatialError::ObjectNotFound`]
    pub fn require(&self, name: &str) -> Result<(&SceneObject, &AABB)> {
        let i = self.position_of(name)?;
        Ok((&self.objects[i], &self.bounds[i]))
    }

    /// World AABB of a named object
    pub fn aabb(&self, name: &str) -> Option<&AABB> {
        self.index.get(name).map(|&i| &self.bounds[i])
    }

    /// Whether a name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Bounds enclosing every object and the room, if any
    pub fn scene_bounds(&self) -> Option<AABB> {
        self.bounds.iter()
            .copied()
            .chain(self.room)
            .reduce(|acc, b| acc.union(&b))
    }

    fn position_of(&self, name: &str) -> Result<usize> {
        self.index.get(name).copied().ok_or_else(|| SpatialError::ObjectNotFound(name.to_string()))
    }
}

impl Serialize for SceneSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            objects: &'a [SceneObject],
            room: Option<&'a AABB>,
        }
        Repr { objects: &self.objects, room: self.room.as_ref() }.serialize(serializer)
    }
}
