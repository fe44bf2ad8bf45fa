use crate::chess_board::Color;
use crate::engines::RulesEngine;

/// Snapshot of the engine predicates the status line is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub turn: Color,
    pub checkmate: bool,
    pub stalemate: bool,
    pub threefold_repetition: bool,
    pub insufficient_material: bool,
    pub draw: bool,
    pub check: bool,
}

impl GameState {
    pub fn from_engine<E: RulesEngine>(engine: &E) -> Self {
        Self {
            turn: engine.turn(),
            checkmate: engine.is_checkmate(),
            stalemate: engine.is_stalemate(),
            threefold_repetition: engine.is_threefold_repetition(),
            insufficient_material: engine.is_insufficient_material(),
            draw: engine.is_draw(),
            check: engine.is_check(),
        }
    }
}

/// First matching condition wins; engines may raise several flags at once,
/// so checkmate has to be looked at before any of the draw flags.
pub fn describe_game_state(state: &GameState) -> String {
    if state.checkmate {
        return format!("{} wins by checkmate", state.turn.opposite());
    }
    if state.stalemate {
        return "Draw by stalemate".to_string();
    }
    if state.threefold_repetition {
        return "Draw by repetition".to_string();
    }
    if state.insufficient_material {
        return "Draw by insufficient material".to_string();
    }
    if state.draw {
        return "Drawn position".to_string();
    }
    if state.check {
        format!("{} to move (check!)", state.turn)
    } else {
        format!("{} to move", state.turn)
    }
}
