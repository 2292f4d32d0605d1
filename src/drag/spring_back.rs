//! Spring-back animation for a drop that missed every zone.
//!
//! Timed rather than event-driven: the overshoot gets
//! `return_overshoot_ms`, the glide home gets `return_settle_ms`, then the
//! card's drag overrides are cleared.

use std::cell::RefCell;

use crate::album::Album;
use crate::cards::CardId;
use crate::presentation::{with_fallback, Presenter, ReturnStep, Timer};

use super::controller::ReturnPath;

/// Coast along the release velocity, then glide home.
///
/// Returns `false` when the card was grabbed again before the animation
/// finished. Its new gesture (or the newer spring-back it led to) then
/// owns the visual state and nothing is cleared.
pub async fn play_return(
    album: &RefCell<Album>,
    card: &CardId,
    path: ReturnPath,
    presenter: &dyn Presenter,
    timer: &dyn Timer,
) -> bool {
    let (overshoot_ms, settle_ms) = {
        let album = album.borrow();
        let config = album.config();
        (config.return_overshoot_ms, config.return_settle_ms)
    };

    with_fallback(
        presenter.animate_return(card, ReturnStep::Overshoot(path.overshoot)),
        timer,
        overshoot_ms,
    )
    .await;
    with_fallback(presenter.animate_return(card, ReturnStep::Origin), timer, settle_ms).await;

    let finished = album.borrow_mut().finish_return(card, path.generation);
    if finished {
        presenter.clear_drag_overrides(card);
    }
    finished
}
