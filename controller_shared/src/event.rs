//! Event and messaging system.
//!
//! This is a small typed event bus. Producers push at any time; the owner
//! drains each queue at one well-defined point per tick.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Typed event bus.
#[derive(Default)]
pub struct EventBus {
    queues: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EventBus {
    /// Pushes an event into the queue.
    pub fn push<E: 'static + Send + Sync>(&mut self, e: E) {
        let q = self
            .queues
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()));
        if let Some(q) = q.downcast_mut::<Vec<E>>() {
            q.push(e);
        }
    }

    /// Drains all queued events of a type, oldest first.
    pub fn drain<E: 'static + Send + Sync>(&mut self) -> Vec<E> {
        self.queues
            .remove(&TypeId::of::<E>())
            .and_then(|boxed| boxed.downcast::<Vec<E>>().ok())
            .map(|boxed| *boxed)
            .unwrap_or_default()
    }

    /// Number of queued events of a type.
    pub fn len<E: 'static + Send + Sync>(&self) -> usize {
        self.queues
            .get(&TypeId::of::<E>())
            .and_then(|boxed| boxed.downcast_ref::<Vec<E>>())
            .map_or(0, Vec::len)
    }
}
