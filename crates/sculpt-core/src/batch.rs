//! Per-material transform batches handed to the renderer.

use crate::layout::Role;
use crate::particle::{Ornament, Photo};
use bytemuck::{Pod, Zeroable};
use fnv::FnvHashMap;
use glam::Mat4;

/// One instance as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(model: Mat4, rgb: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], 1.0],
        }
    }

    pub fn for_photo(photo: &Photo, tint: [f32; 3]) -> Self {
        Self::new(photo.pose.model_matrix(), tint)
    }

    /// The same instance under a parent transform.
    pub fn under(&self, parent: Mat4) -> Self {
        Self {
            model: (parent * Mat4::from_cols_array_2d(&self.model)).to_cols_array_2d(),
            color: self.color,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Batch {
    role: Role,
    instances: Vec<InstanceRaw>,
    dirty: bool,
}

impl Batch {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer once the batch has been uploaded.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// One batch per ornament role, each bounded by the role's capacity.
#[derive(Clone, Debug, Default)]
pub struct Batches {
    by_role: FnvHashMap<Role, Batch>,
}

impl Batches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next slot in `role`'s batch, or `None` when it is full.
    pub fn reserve(&mut self, role: Role) -> Option<usize> {
        let batch = self.by_role.entry(role).or_insert_with(|| Batch {
            role,
            instances: Vec::new(),
            dirty: true,
        });
        if batch.instances.len() >= role.capacity() {
            return None;
        }
        batch.instances.push(InstanceRaw::zeroed());
        Some(batch.instances.len() - 1)
    }

    /// Refresh every ornament's instance record and flag the batches dirty.
    pub fn write(&mut self, ornaments: &[Ornament]) {
        for o in ornaments {
            if let Some(slot) = self
                .by_role
                .get_mut(&o.role)
                .and_then(|b| b.instances.get_mut(o.slot))
            {
                *slot = InstanceRaw::new(o.pose.model_matrix(), o.role.color_rgb());
            }
        }
        for batch in self.by_role.values_mut() {
            batch.dirty = true;
        }
    }

    pub fn get(&self, role: Role) -> Option<&Batch> {
        self.by_role.get(&role)
    }

    pub fn get_mut(&mut self, role: Role) -> Option<&mut Batch> {
        self.by_role.get_mut(&role)
    }

    /// Batches in a stable role order.
    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        Role::ALL.iter().filter_map(move |r| self.by_role.get(r))
    }

    pub fn total(&self) -> usize {
        self.by_role.values().map(Batch::len).sum()
    }
}
