use super::controller::{BoardController, ClickOutcome};
use crate::chess_board::parse_coordinate_move;
use crate::engines::RulesEngine;
use crate::error::LuminaError;
use log::info;

/// Plays coordinate moves (`e2e4`, `e7e8n`) through the click state machine,
/// one origin click and one destination click per move.
///
/// Stops at the first move that does not apply; earlier moves stay played.
pub fn replay<E: RulesEngine>(controller: &mut BoardController<E>, moves: &[&str]) -> Result<(), LuminaError> {
    for text in moves {
        let m = parse_coordinate_move(text)?;
        controller.click(m.from);
        let outcome = match m.promotion {
            Some(kind) => controller.click_promoting(m.to, kind),
            None => controller.click(m.to),
        };
        match outcome {
            ClickOutcome::Moved(record) => info!("{} played as {}", text, record.san),
            _ => return Err(LuminaError::IllegalMove(text.to_string())),
        }
    }
    Ok(())
}

/// Plays random legal moves until the game ends or `plies` moves were made.
/// Returns the number of moves played.
pub fn play_random<E: RulesEngine>(controller: &mut BoardController<E>, plies: usize) -> usize {
    let mut played = 0;
    while played < plies && controller.random_move().is_some() {
        played += 1;
    }
    played
}
