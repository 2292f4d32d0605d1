//! Drives a started battle through its animations.

use std::cell::RefCell;

use log::debug;

use super::engine::BattleResult;
use crate::album::Album;
use crate::presentation::{with_fallback, BattleEvent, OutcomeEvent, Presenter, Timer};

/// Play the running battle to the end and commit the win.
///
/// Returns `None` when no battle was started, when another runner already
/// plays it, or when the winning slot was emptied before the result could
/// be recorded. The album is only borrowed between awaits.
pub async fn run_battle(
    album: &RefCell<Album>,
    presenter: &dyn Presenter,
    timer: &dyn Timer,
) -> Option<BattleResult> {
    let (id, script, config) = {
        let mut album = album.borrow_mut();
        let (id, script) = album.claim_battle()?;
        (id, script, album.config().clone())
    };
    let timeout = config.animation_timeout_ms;

    presenter.show_fight_text(true);
    timer.sleep(config.intro_ms).await;
    presenter.show_fight_text(false);

    for round in script.rounds() {
        debug!("round {}: {} attacks", round.index, round.attacker);
        for event in [BattleEvent::Attack, BattleEvent::React] {
            with_fallback(
                presenter.render_battle(round.index, round.attacker, event),
                timer,
                timeout,
            )
            .await;
        }
        timer.sleep(round.pause_ms).await;
    }

    if !album.borrow_mut().begin_deciding_battle(id) {
        debug!("battle {id} ended elsewhere");
        return None;
    }

    let winner = script.winner();
    for event in [OutcomeEvent::Defeat, OutcomeEvent::Victory] {
        with_fallback(presenter.render_battle_outcome(winner, event), timer, timeout).await;
    }

    timer.sleep(config.victory_settle_ms).await;
    presenter.fade_out_winner(winner);
    timer.sleep(config.fade_out_ms).await;

    album.borrow_mut().finish_battle(id, presenter)
}
