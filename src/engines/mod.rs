use crate::chess_board::{BoardMatrix, Color, PieceType, Square};
use crate::error::LuminaError;

pub mod shakmaty_engine;
pub use shakmaty_engine::ShakmatyEngine;

/// A move the engine would accept in the current position.
///
/// Castling is expressed by the king's own destination square. Promotions
/// produce one entry per promotion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub capture: Option<PieceType>,
}

/// One applied ply as recorded in the game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub san: String,
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
    pub fullmove_number: u32,
}

/// The rules collaborator. It owns the authoritative game state; the board
/// controller only ever reads it back and re-derives its own view.
pub trait RulesEngine {
    /// Back to the position the engine was created with.
    fn reset(&mut self);
    fn board(&self) -> BoardMatrix;
    fn turn(&self) -> Color;
    fn legal_moves(&self) -> Vec<LegalMove>;

    fn legal_moves_from(&self, origin: Square) -> Vec<LegalMove> {
        self.legal_moves().into_iter().filter(|m| m.from == origin).collect()
    }

    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveRecord, LuminaError>;
    /// Takes back the last ply. `None` when there is nothing to undo.
    fn undo(&mut self) -> Option<MoveRecord>;

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_threefold_repetition(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_draw(&self) -> bool;
    fn is_check(&self) -> bool;

    fn history(&self) -> &[MoveRecord];
}
