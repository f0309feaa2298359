//! Per-session flash message slots.

use crate::domain::FlashMessage;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Pending messages older than this are dropped undelivered.
pub const DEFAULT_FLASH_TTL: Duration = Duration::from_secs(10 * 60);
/// Upper bound on sessions holding pending messages.
pub const DEFAULT_FLASH_CAPACITY: usize = 10_000;

#[derive(Debug)]
struct Pending {
    seq: u64,
    stored_at: Instant,
    messages: Vec<FlashMessage>,
}

#[derive(Debug, Default)]
struct Slots {
    next_seq: u64,
    by_session: HashMap<String, Pending>,
}

/// Pending flash messages keyed by session id. Nothing is persisted.
///
/// Clients that never come back for their messages would otherwise pile up,
/// so every `set` first drops entries past the TTL and then, when still at
/// capacity, the oldest ones.
#[derive(Debug)]
pub struct FlashRegistry {
    ttl: Duration,
    capacity: usize,
    slots: Mutex<Slots>,
}

impl Default for FlashRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashRegistry {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_FLASH_TTL, DEFAULT_FLASH_CAPACITY)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            slots: Mutex::new(Slots::default()),
        }
    }

    /// The slot belonging to one session.
    pub fn slot<'a>(&'a self, session_id: &'a str) -> FlashSlot<'a> {
        FlashSlot {
            registry: self,
            session_id,
        }
    }

    /// Number of sessions with undelivered messages.
    pub fn pending_sessions(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.by_session.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slots>, AppError> {
        self.slots
            .lock()
            .map_err(|_| AppError::Internal("flash registry lock poisoned".into()))
    }

    fn is_stale(&self, pending: &Pending, now: Instant) -> bool {
        now.duration_since(pending.stored_at) >= self.ttl
    }
}

/// A session's flash slot: `set` overwrites, `drain` takes.
pub struct FlashSlot<'a> {
    registry: &'a FlashRegistry,
    session_id: &'a str,
}

impl FlashSlot<'_> {
    pub fn set(&self, messages: Vec<FlashMessage>) -> Result<(), AppError> {
        let registry = self.registry;
        let mut slots = registry.lock()?;
        let now = Instant::now();

        slots.by_session.remove(self.session_id);
        slots
            .by_session
            .retain(|_, p| !registry.is_stale(p, now));
        while slots.by_session.len() >= registry.capacity {
            let oldest = slots
                .by_session
                .iter()
                .min_by_key(|(_, p)| p.seq)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    slots.by_session.remove(&k);
                }
                None => break,
            }
        }

        if messages.is_empty() {
            return Ok(());
        }
        let seq = slots.next_seq;
        slots.next_seq += 1;
        slots.by_session.insert(
            self.session_id.to_string(),
            Pending {
                seq,
                stored_at: now,
                messages,
            },
        );
        Ok(())
    }

    pub fn drain(&self) -> Result<Vec<FlashMessage>, AppError> {
        let mut slots = self.registry.lock()?;
        match slots.by_session.remove(self.session_id) {
            Some(p) if !self.registry.is_stale(&p, Instant::now()) => Ok(p.messages),
            _ => Ok(Vec::new()),
        }
    }
}
