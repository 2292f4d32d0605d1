//! Pack opening: draw, show the stack, reveal cards one by one.
//!
//! The pack is handed to the presenter bottom card first. The top of the
//! stack (the last card drawn) is revealed first, and each card is added
//! to the collection once its fly-off animation ends (or its fallback
//! fires). A reset closes the reveal; cards not yet added are dropped.

use std::cell::RefCell;

use log::{info, warn};

use crate::album::Album;
use crate::cards::CardId;
use crate::core::error::PackError;
use crate::presentation::{with_fallback, Presenter, RevealStep, Timer};

/// Horizontal travel (px) that turns a touch release into a reveal swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Check if a pointer travel `(dx, dy)` counts as a reveal swipe.
///
/// The swipe must be mostly horizontal and strictly longer than
/// `SWIPE_THRESHOLD`.
#[must_use]
pub fn is_reveal_swipe(dx: f64, dy: f64) -> bool {
    dx.abs() > SWIPE_THRESHOLD && dx.abs() > dy.abs()
}

/// Closes the reveal however the pipeline ends, including when the future
/// is dropped mid-reveal.
struct RevealGuard<'a> {
    album: &'a RefCell<Album>,
    presenter: &'a dyn Presenter,
    reveal: u64,
}

impl Drop for RevealGuard<'_> {
    fn drop(&mut self) {
        match self.album.try_borrow_mut() {
            Ok(mut album) => {
                if album.end_pack(self.reveal) {
                    self.presenter.end_reveal();
                }
            }
            Err(_) => {
                warn!("album busy while closing pack reveal {}", self.reveal);
                self.presenter.end_reveal();
            }
        }
    }
}

/// Open a pack.
///
/// Fails without side effects while the cooldown runs, when the draw
/// policy has nothing left to give, or while another pack is open. Returns
/// the cards added to the collection, in reveal order; dismissing the
/// reveal keeps the cards revealed so far.
pub async fn open_pack(
    album: &RefCell<Album>,
    presenter: &dyn Presenter,
    timer: &dyn Timer,
) -> Result<Vec<CardId>, PackError> {
    let (cards, reveal, timeout) = {
        let mut album = album.borrow_mut();
        let cards = album.begin_pack()?;
        (cards, album.reveal_id(), album.config().animation_timeout_ms)
    };
    // An empty draw opens no reveal.
    let Some(reveal) = reveal else {
        return Ok(cards);
    };

    let _guard = RevealGuard {
        album,
        presenter,
        reveal,
    };
    presenter.begin_reveal(&cards);

    let mut committed = Vec::with_capacity(cards.len());
    for card in cards.iter().rev() {
        if presenter.await_reveal(card).await == RevealStep::Abandoned {
            info!("pack reveal dismissed after {} cards", committed.len());
            break;
        }
        with_fallback(presenter.animate_reveal(card), timer, timeout).await;

        let mut state = album.borrow_mut();
        if state.reveal_id() != Some(reveal) {
            info!("pack reveal {reveal} closed by reset after {} cards", committed.len());
            break;
        }
        match state.add_copy(card, presenter) {
            Ok(_) => committed.push(card.clone()),
            Err(err) => warn!("skipping {card}: {err}"),
        }
    }

    Ok(committed)
}
