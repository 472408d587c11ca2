//! # Consumer registry - owner of all registrations.
//!
//! The registry is the only place that knows which consumers exist, their
//! priority, and whether they are currently attached.
//!
//! ## Architecture
//! ```text
//! register(c, prio) ──► RwLock<Vec<Registration>> ◄── unregister(name)
//!                              │                  ◄── set_active(name, bool)
//!                              ▼
//!                     snapshot_active()  (copy, sorted)
//! ```
//!
//! ## Rules
//! - Identity is the consumer name.
//! - Re-registering the **same instance** updates its priority, reactivates it
//!   and keeps its original registration slot; a **different instance** under a
//!   taken name is rejected with [`RegistrationError::Duplicate`].
//! - Unregistering an unknown name is a no-op.
//! - [`FALLBACK_PRIORITY`] is reserved: only [`Registry::register_fallback`] may
//!   use it, and only one consumer can hold it, so the fallback is strictly last.
//! - Order: descending priority, then ascending registration sequence
//!   (earlier registrations first on ties).
//! - Snapshots are copies: a dispatch iterating an old snapshot is unaffected
//!   by later mutations, and holds no lock while it runs.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::consumers::ConsumerRef;
use crate::error::RegistrationError;

/// Priority used when nothing more specific applies.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Priority of the transient foreground consumer; delivered before the default.
pub const FOREGROUND_PRIORITY: i32 = 1;

/// Priority of the fallback consumer; delivered after everything else.
///
/// Reserved: [`Registry::register`] rejects it, use [`Registry::register_fallback`].
pub const FALLBACK_PRIORITY: i32 = i32::MIN;

/// One consumer entry as stored in the registry.
#[derive(Clone)]
pub struct Registration {
    /// The consumer itself.
    pub consumer: ConsumerRef,
    /// Registry identity (copy of `consumer.name()` at registration time).
    pub name: Arc<str>,
    /// Higher values are delivered first.
    pub priority: i32,
    /// Monotonic registration sequence, tie-breaker for equal priorities.
    pub seq: u64,
    /// Inactive registrations are skipped by snapshots.
    pub active: bool,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("seq", &self.seq)
            .field("active", &self.active)
            .finish()
    }
}

#[derive(Default)]
struct Inner {
    entries: Vec<Registration>,
    next_seq: u64,
}

impl Inner {
    fn upsert(&mut self, consumer: ConsumerRef, priority: i32) -> Result<(), RegistrationError> {
        let name = consumer.name();
        if name.is_empty() {
            return Err(RegistrationError::InvalidName);
        }

        if let Some(existing) = self.entries.iter_mut().find(|r| &*r.name == name) {
            if !same_instance(&existing.consumer, &consumer) {
                return Err(RegistrationError::Duplicate {
                    name: name.to_string(),
                });
            }
            existing.priority = priority;
            existing.active = true;
            tracing::debug!(consumer = %existing.name, priority, "registration updated");
            return Ok(());
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let name: Arc<str> = Arc::from(name);
        tracing::debug!(consumer = %name, priority, seq, "consumer registered");
        self.entries.push(Registration {
            consumer,
            name,
            priority,
            seq,
            active: true,
        });
        Ok(())
    }
}

/// Concurrency-safe set of consumer registrations.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers (or re-registers) a consumer as active with the given priority.
    ///
    /// ### Errors
    /// - [`RegistrationError::InvalidName`] if the consumer name is empty.
    /// - [`RegistrationError::ReservedPriority`] if `priority` is [`FALLBACK_PRIORITY`].
    /// - [`RegistrationError::Duplicate`] if another instance already holds the name.
    pub async fn register(
        &self,
        consumer: ConsumerRef,
        priority: i32,
    ) -> Result<(), RegistrationError> {
        if priority == FALLBACK_PRIORITY {
            return Err(RegistrationError::ReservedPriority { priority });
        }
        let mut inner = self.inner.write().await;
        inner.upsert(consumer, priority)
    }

    /// Registers the single consumer delivered after all others.
    ///
    /// Re-registering the same instance is a no-op.
    ///
    /// ### Errors
    /// - [`RegistrationError::ReservedPriority`] if a different consumer is
    ///   already registered as fallback.
    /// - Otherwise as [`register`](Self::register).
    pub async fn register_fallback(&self, consumer: ConsumerRef) -> Result<(), RegistrationError> {
        let mut inner = self.inner.write().await;
        let taken = inner
            .entries
            .iter()
            .any(|r| r.priority == FALLBACK_PRIORITY && !same_instance(&r.consumer, &consumer));
        if taken {
            return Err(RegistrationError::ReservedPriority {
                priority: FALLBACK_PRIORITY,
            });
        }
        inner.upsert(consumer, FALLBACK_PRIORITY)
    }

    /// Removes a registration. Returns `true` if something was removed.
    pub async fn unregister(&self, name: &str) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|r| &*r.name != name);
        let removed = inner.entries.len() != before;
        if removed {
            tracing::debug!(consumer = name, "consumer unregistered");
        }
        removed
    }

    /// Attaches or detaches a registered consumer without losing its slot.
    ///
    /// ### Errors
    /// [`RegistrationError::NotFound`] if no consumer is registered under `name`.
    pub async fn set_active(&self, name: &str, active: bool) -> Result<(), RegistrationError> {
        let mut inner = self.inner.write().await;
        match inner.entries.iter_mut().find(|r| &*r.name == name) {
            Some(r) => {
                r.active = active;
                Ok(())
            }
            None => Err(RegistrationError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Returns a copy of the active registrations in delivery order.
    pub async fn snapshot_active(&self) -> Vec<Registration> {
        let mut active: Vec<Registration> = {
            let inner = self.inner.read().await;
            inner.entries.iter().filter(|r| r.active).cloned().collect()
        };
        active.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.seq.cmp(&b.seq)));
        active
    }

    /// Returns sorted list of registered names (active or not).
    pub async fn names(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.entries.iter().map(|r| r.name.to_string()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registrations (active or not).
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Returns true if nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

/// Compares data pointers only; vtable pointers may differ across codegen units.
fn same_instance(a: &ConsumerRef, b: &ConsumerRef) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
