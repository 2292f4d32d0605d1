//! Pack draws and the cooldown between packs.

use std::rc::Rc;

use log::{debug, warn};

use crate::cards::{CardId, Catalog};
use crate::collection::{CollectionStore, Storage, NEXT_PACK_KEY};
use crate::core::{DrawPolicy, GameRng};

/// Draws packs and enforces the cooldown between them.
///
/// The cooldown is an absolute epoch deadline persisted as `nextPackTime`,
/// so it survives a reload.
pub struct PackDispenser {
    policy: DrawPolicy,
    rng: GameRng,
    next_pack_at: Option<u64>,
    storage: Rc<dyn Storage>,
}

impl std::fmt::Debug for PackDispenser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackDispenser")
            .field("policy", &self.policy)
            .field("next_pack_at", &self.next_pack_at)
            .finish_non_exhaustive()
    }
}

impl PackDispenser {
    pub fn new(policy: DrawPolicy, rng: GameRng, storage: Rc<dyn Storage>) -> Self {
        Self {
            policy,
            rng,
            next_pack_at: None,
            storage,
        }
    }

    #[must_use]
    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }

    /// The cooldown deadline, if one is set.
    #[must_use]
    pub fn next_pack_at(&self) -> Option<u64> {
        self.next_pack_at
    }

    fn pool(&self, catalog: &Catalog, store: &CollectionStore) -> Vec<CardId> {
        match self.policy {
            DrawPolicy::AllowDuplicates => catalog.cards().to_vec(),
            DrawPolicy::ExcludeOwned => catalog
                .cards()
                .iter()
                .filter(|card| !store.record(card).is_owned())
                .cloned()
                .collect(),
        }
    }

    /// Draw `count` cards.
    ///
    /// The pool is shuffled and a prefix taken. When `count` exceeds the
    /// pool, further shuffled passes are appended, so the result is short
    /// only when the pool is empty.
    pub fn draw(&mut self, catalog: &Catalog, store: &CollectionStore, count: usize) -> Vec<CardId> {
        let pool = self.pool(catalog, store);
        if pool.is_empty() {
            return Vec::new();
        }

        let mut picked = Vec::with_capacity(count);
        while picked.len() < count {
            let mut pass = pool.clone();
            self.rng.shuffle(&mut pass);
            let take = (count - picked.len()).min(pass.len());
            picked.extend(pass.into_iter().take(take));
        }
        debug!("drew {} cards from a pool of {}", picked.len(), pool.len());
        picked
    }

    /// Check if a pack may be opened at `now`.
    pub fn can_dispense(&mut self, now: u64, catalog: &Catalog, store: &CollectionStore) -> bool {
        if self.remaining_ms(now) > 0 {
            return false;
        }
        match self.policy {
            DrawPolicy::AllowDuplicates => true,
            DrawPolicy::ExcludeOwned => !self.pool(catalog, store).is_empty(),
        }
    }

    /// Start the cooldown at `now`.
    ///
    /// A deadline still in the future is kept (a resumed cooldown is never
    /// shortened or extended). A zero duration clears the cooldown.
    pub fn start_cooldown(&mut self, now: u64, duration_ms: u64) {
        if duration_ms == 0 {
            self.clear_cooldown();
            return;
        }
        if self.next_pack_at.is_some_and(|at| at > now) {
            debug!("cooldown already running until {:?}", self.next_pack_at);
            return;
        }

        let deadline = now.saturating_add(duration_ms);
        self.next_pack_at = Some(deadline);
        if let Err(err) = self.storage.set(NEXT_PACK_KEY, &deadline.to_string()) {
            warn!("failed to save pack cooldown: {err}");
        }
    }

    /// Milliseconds until the next pack, 0 when not on cooldown.
    ///
    /// An elapsed deadline is cleared.
    pub fn remaining_ms(&mut self, now: u64) -> u64 {
        match self.next_pack_at {
            Some(at) if at > now => at - now,
            Some(_) => {
                self.clear_cooldown();
                0
            }
            None => 0,
        }
    }

    /// Read the persisted deadline. Returns the time left at `now`.
    pub fn restore(&mut self, now: u64) -> u64 {
        self.next_pack_at = match self.storage.get(NEXT_PACK_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(at) => Some(at),
                Err(err) => {
                    warn!("ignoring stored pack cooldown {raw:?}: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("failed to load pack cooldown: {err}");
                None
            }
        };
        self.remaining_ms(now)
    }

    /// Drop the cooldown from memory and storage.
    pub fn clear_cooldown(&mut self) {
        self.next_pack_at = None;
        if let Err(err) = self.storage.remove(NEXT_PACK_KEY) {
            warn!("failed to clear pack cooldown: {err}");
        }
    }
}
