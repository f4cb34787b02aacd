// Entity lifecycle management
//
// Entities live in insertion order inside an arena of slots. During an `act`
// pass the entity being updated is taken out of its slot, so it can freely
// read and mutate every other entity through `Others` without aliasing.
//
// Rules for a single pass:
// - entities added (from inside or outside the pass) are admitted at the
//   start of the next `act`, never retroactively
// - an entity flagged for disposal before its turn is skipped
// - disposed entities stay intact until the sweep after the pass, which
//   calls `destroy` on them in collection order

use crate::engine::renderer::RenderSurface;

/// Stable identifier of an entity for its whole lifetime
pub type EntityId = u64;

/// Per-kind behaviour invoked by the `EntityManager`
pub trait Entity: Sized {
    /// Shared state handed to every entity during a pass
    type Context;

    /// Per-tick update
    fn act(&mut self, cx: &mut ActContext<'_, Self>, dt: f32);

    /// Describe this entity to the render surface
    fn draw(&self, surface: &mut dyn RenderSurface, dt: f32);

    /// Draw order; higher depth is drawn first (further back)
    fn depth(&self) -> i32 {
        0
    }

    /// Called once when the entity is swept after disposal
    fn destroy(&mut self, _context: &mut Self::Context) {}
}

struct Slot<E> {
    id: EntityId,
    entity: Option<E>,
    disposed: bool,
}

impl<E> Slot<E> {
    fn live(&self) -> Option<&E> {
        if self.disposed {
            None
        } else {
            self.entity.as_ref()
        }
    }

    fn live_mut(&mut self) -> Option<&mut E> {
        if self.disposed {
            None
        } else {
            self.entity.as_mut()
        }
    }
}

/// View of every live entity except the one currently acting
pub struct Others<'a, E> {
    slots: &'a mut [Slot<E>],
}

impl<'a, E> Others<'a, E> {
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &E)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.live().map(|entity| (slot.id, entity)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut E)> + '_ {
        self.slots.iter_mut().filter_map(|slot| {
            let id = slot.id;
            slot.live_mut().map(|entity| (id, entity))
        })
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .and_then(Slot::live)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .and_then(Slot::live_mut)
    }

    /// Flag another entity for disposal
    pub fn dispose(&mut self, id: EntityId) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.disposed = true;
        }
    }
}

/// Everything an entity may touch while it acts
pub struct ActContext<'a, E: Entity> {
    id: EntityId,
    disposed: bool,
    pending: &'a mut Vec<Slot<E>>,
    next_id: &'a mut EntityId,
    /// Every other live entity
    pub others: Others<'a, E>,
    /// State shared by the whole simulation
    pub shared: &'a mut E::Context,
}

impl<'a, E: Entity> ActContext<'a, E> {
    /// Id of the acting entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Queue a new entity; it starts acting next pass
    pub fn spawn(&mut self, entity: E) -> EntityId {
        let id = *self.next_id;
        *self.next_id += 1;
        self.pending.push(Slot {
            id,
            entity: Some(entity),
            disposed: false,
        });
        id
    }

    /// Flag the acting entity for disposal
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Owns every live entity and runs the update/draw passes
pub struct EntityManager<E: Entity> {
    slots: Vec<Slot<E>>,
    pending: Vec<Slot<E>>,
    next_id: EntityId,
}

impl<E: Entity> Default for EntityManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityManager<E> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an entity; it is admitted at the start of the next `act`
    pub fn add(&mut self, entity: E) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Slot {
            id,
            entity: Some(entity),
            disposed: false,
        });
        id
    }

    /// Run one update pass, then sweep disposed entities
    pub fn act(&mut self, context: &mut E::Context, dt: f32) {
        self.slots.append(&mut self.pending);

        for index in 0..self.slots.len() {
            if self.slots[index].disposed {
                continue;
            }
            let Some(mut entity) = self.slots[index].entity.take() else {
                continue;
            };
            let id = self.slots[index].id;

            let mut cx = ActContext {
                id,
                disposed: false,
                pending: &mut self.pending,
                next_id: &mut self.next_id,
                others: Others {
                    slots: &mut self.slots,
                },
                shared: &mut *context,
            };
            entity.act(&mut cx, dt);
            let disposed = cx.disposed;

            let slot = &mut self.slots[index];
            slot.entity = Some(entity);
            slot.disposed |= disposed;
        }

        self.sweep(context);
    }

    fn sweep(&mut self, context: &mut E::Context) {
        let mut swept = Vec::new();
        self.slots.retain_mut(|slot| {
            if slot.disposed {
                if let Some(entity) = slot.entity.take() {
                    swept.push(entity);
                }
                false
            } else {
                true
            }
        });
        for mut entity in swept {
            entity.destroy(context);
        }
    }

    /// Draw live entities, back (high depth) to front
    pub fn draw(&self, surface: &mut dyn RenderSurface, dt: f32) {
        let mut visible: Vec<&E> = self.slots.iter().filter_map(Slot::live).collect();
        visible.sort_by_key(|entity| std::cmp::Reverse(entity.depth()));
        for entity in visible {
            entity.draw(surface, dt);
        }
    }

    /// Flag an entity for disposal; it is swept after the next pass
    pub fn dispose(&mut self, id: EntityId) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.disposed = true;
        }
        self.pending.retain(|slot| slot.id != id);
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .and_then(Slot::live)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .and_then(Slot::live_mut)
    }

    /// Live entities in collection order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &E)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.live().map(|entity| (slot.id, entity)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut E)> + '_ {
        self.slots.iter_mut().filter_map(|slot| {
            let id = slot.id;
            slot.live_mut().map(|entity| (id, entity))
        })
    }

    /// Number of admitted entities
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of entities waiting for admission
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
