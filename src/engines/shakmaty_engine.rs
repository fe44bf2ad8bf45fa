use super::{LegalMove, MoveRecord, RulesEngine};
use crate::chess_board::{BoardMatrix, Color, Piece, PieceType, Square};
use crate::error::LuminaError;
use log::debug;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Position, Rank, Role};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const FIFTY_MOVE_HALFMOVES: u32 = 100;
const REPETITION_LIMIT: usize = 3;

/// Rules engine backed by `shakmaty`.
///
/// `shakmaty` positions are immutable snapshots without history, so undo is a
/// stack of earlier positions and repetitions are counted over the Zobrist
/// keys of every position reached since the start. Only a legal en-passant
/// capture makes a position distinct.
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    start: Chess,
    position: Chess,
    previous: Vec<Chess>,
    keys: Vec<Zobrist64>,
    history: Vec<MoveRecord>,
}

impl ShakmatyEngine {
    pub fn new() -> Self {
        Self::with_position(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, LuminaError> {
        let parsed = fen
            .parse::<Fen>()
            .map_err(|e| LuminaError::InvalidFen(format!("{}: {}", fen, e)))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| LuminaError::InvalidFen(format!("{}: {}", fen, e)))?;
        Ok(Self::with_position(position))
    }

    fn with_position(start: Chess) -> Self {
        let keys = vec![position_key(&start)];
        Self {
            position: start.clone(),
            start,
            previous: Vec::new(),
            keys,
            history: Vec::new(),
        }
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyEngine {
    fn reset(&mut self) {
        self.position = self.start.clone();
        self.previous.clear();
        self.history.clear();
        self.keys = vec![position_key(&self.start)];
    }

    fn board(&self) -> BoardMatrix {
        board_matrix(&self.position)
    }

    fn turn(&self) -> Color {
        self.position.turn().into()
    }

    fn legal_moves(&self) -> Vec<LegalMove> {
        self.position.legal_moves().iter().filter_map(to_legal_move).collect()
    }

    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveRecord, LuminaError> {
        let candidate = self
            .position
            .legal_moves()
            .into_iter()
            .find(|m| {
                to_legal_move(m).is_some_and(|l| l.from == from && l.to == to && l.promotion == promotion)
            })
            .ok_or_else(|| LuminaError::IllegalMove(format!("{}{}", from, to)))?;

        let color = Color::from(self.position.turn());
        let fullmove_number = self.position.fullmoves().get();
        let piece = candidate.role().into();
        let captured = candidate.capture().map(PieceType::from);
        let promotion = candidate.promotion().map(PieceType::from);

        // candidate is one of the legal moves of self.position
        let mut next = self.position.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut next, candidate).to_string();

        let record = MoveRecord {
            from,
            to,
            color,
            piece,
            san,
            captured,
            promotion,
            fullmove_number,
        };
        debug!("engine applied {} ({}{})", record.san, from, to);

        self.keys.push(position_key(&next));
        self.previous.push(std::mem::replace(&mut self.position, next));
        self.history.push(record.clone());
        Ok(record)
    }

    fn undo(&mut self) -> Option<MoveRecord> {
        let previous = self.previous.pop()?;
        self.position = previous;
        self.keys.pop();
        self.history.pop()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_threefold_repetition(&self) -> bool {
        self.keys.last().map_or(false, |current| {
            self.keys.iter().filter(|key| *key == current).count() >= REPETITION_LIMIT
        })
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn is_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn history(&self) -> &[MoveRecord] {
        &self.history
    }
}

impl From<Role> for PieceType {
    fn from(role: Role) -> Self {
        match role {
            Role::Pawn => PieceType::Pawn,
            Role::Knight => PieceType::Knight,
            Role::Bishop => PieceType::Bishop,
            Role::Rook => PieceType::Rook,
            Role::Queen => PieceType::Queen,
            Role::King => PieceType::King,
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

impl From<shakmaty::Piece> for Piece {
    fn from(piece: shakmaty::Piece) -> Self {
        Piece {
            color: piece.color.into(),
            kind: piece.role.into(),
        }
    }
}

fn from_shakmaty_square(square: shakmaty::Square) -> Option<Square> {
    Square::from_coords(square.file() as u8, square.rank() as u8)
}

fn to_legal_move(m: &Move) -> Option<LegalMove> {
    let from = m.from()?;
    // shakmaty encodes castling as king takes rook
    let to = match m {
        Move::Castle { king, rook } => {
            let file = if (rook.file() as u8) > (king.file() as u8) {
                File::G
            } else {
                File::C
            };
            shakmaty::Square::from_coords(file, king.rank())
        }
        _ => m.to(),
    };
    Some(LegalMove {
        from: from_shakmaty_square(from)?,
        to: from_shakmaty_square(to)?,
        promotion: m.promotion().map(PieceType::from),
        capture: m.capture().map(PieceType::from),
    })
}

fn board_matrix(position: &Chess) -> BoardMatrix {
    let mut matrix: BoardMatrix = [[None; 8]; 8];
    for (row, cells) in matrix.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let square = shakmaty::Square::from_coords(File::new(col as u32), Rank::new(7 - row as u32));
            *cell = position.board().piece_at(square).map(Piece::from);
        }
    }
    matrix
}

fn position_key(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::test_utils::{assert_squares, sq};

    fn play(engine: &mut ShakmatyEngine, moves: &[&str]) {
        for m in moves {
            engine.make_move(sq(&m[0..2]), sq(&m[2..4]), None).unwrap();
        }
    }

    #[test]
    fn test_initial_position() {
        let engine = ShakmatyEngine::new();
        let board = engine.board();
        assert_eq!(board[0][4], Some(Piece::new(Color::Black, PieceType::King)));
        assert_eq!(board[7][4], Some(Piece::new(Color::White, PieceType::King)));
        assert_eq!(board[6][0], Some(Piece::new(Color::White, PieceType::Pawn)));
        assert_eq!(board[4][4], None);
        assert_eq!(engine.turn(), Color::White);
        assert_eq!(engine.legal_moves().len(), 20);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_from_fen_matches_default() {
        let engine = ShakmatyEngine::from_fen(INITIAL_POSITION).unwrap();
        assert_eq!(engine.board(), ShakmatyEngine::new().board());
        assert!(ShakmatyEngine::from_fen("not a fen").is_err());
    }

    #[test]
    fn test_legal_moves_from_square() {
        let engine = ShakmatyEngine::new();
        assert_squares(engine.legal_moves_from(sq("e2")).iter().map(|m| m.to), vec!["e3", "e4"]);
        assert_squares(engine.legal_moves_from(sq("g1")).iter().map(|m| m.to), vec!["f3", "h3"]);
        assert!(engine.legal_moves_from(sq("e7")).is_empty());
    }

    #[test]
    fn test_castling_uses_king_destination() {
        let mut engine = ShakmatyEngine::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let targets: Vec<_> = engine.legal_moves_from(sq("e1")).iter().map(|m| m.to).collect();
        assert!(targets.contains(&sq("g1")));
        assert!(targets.contains(&sq("c1")));

        let record = engine.make_move(sq("e1"), sq("g1"), None).unwrap();
        assert_eq!(record.san, "O-O");
        let board = engine.board();
        assert_eq!(board[7][6], Some(Piece::new(Color::White, PieceType::King)));
        assert_eq!(board[7][5], Some(Piece::new(Color::White, PieceType::Rook)));
        assert_eq!(board[7][7], None);
    }

    #[test]
    fn test_promotion_choices_and_record() {
        let mut engine = ShakmatyEngine::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let promotions: Vec<_> = engine.legal_moves_from(sq("a7")).iter().map(|m| m.promotion).collect();
        assert_eq!(promotions.len(), 4);
        assert!(promotions.contains(&Some(PieceType::Queen)));
        assert!(promotions.contains(&Some(PieceType::Knight)));

        assert!(engine.make_move(sq("a7"), sq("a8"), None).is_err());
        let record = engine.make_move(sq("a7"), sq("a8"), Some(PieceType::Rook)).unwrap();
        assert_eq!(record.promotion, Some(PieceType::Rook));
        assert_eq!(record.san, "a8=R");
        assert_eq!(engine.board()[0][0], Some(Piece::new(Color::White, PieceType::Rook)));
    }

    #[test]
    fn test_en_passant_records_pawn_capture() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let record = engine.make_move(sq("e5"), sq("d6"), None).unwrap();
        assert_eq!(record.captured, Some(PieceType::Pawn));
        assert_eq!(record.san, "exd6");
        assert_eq!(engine.board()[3][3], None);
    }

    #[test]
    fn test_record_metadata() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["e2e4", "e7e5"]);
        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].color, Color::White);
        assert_eq!(history[0].san, "e4");
        assert_eq!(history[0].fullmove_number, 1);
        assert_eq!(history[1].color, Color::Black);
        assert_eq!(history[1].fullmove_number, 1);
        assert_eq!(history[1].piece, PieceType::Pawn);
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut engine = ShakmatyEngine::new();
        assert!(matches!(
            engine.make_move(sq("e2"), sq("e5"), None),
            Err(LuminaError::IllegalMove(_))
        ));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_undo_and_reset() {
        let mut engine = ShakmatyEngine::new();
        assert!(engine.undo().is_none());

        let before = engine.board();
        play(&mut engine, &["d2d4"]);
        let undone = engine.undo().unwrap();
        assert_eq!(undone.san, "d4");
        assert_eq!(engine.board(), before);
        assert_eq!(engine.turn(), Color::White);

        play(&mut engine, &["d2d4", "d7d5", "c2c4"]);
        engine.reset();
        assert_eq!(engine.board(), before);
        assert!(engine.history().is_empty());
        assert!(engine.undo().is_none());
    }

    #[test]
    fn test_three_fold_repetition() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(!engine.is_threefold_repetition());
        play(&mut engine, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(engine.is_threefold_repetition());
        assert!(engine.is_draw());

        engine.undo();
        assert!(!engine.is_threefold_repetition());
    }

    #[test]
    fn test_repetition_after_double_pawn_push() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["e2e4", "g8f6", "g1f3", "f6g8", "f3g1"]);
        assert!(!engine.is_threefold_repetition());
        play(&mut engine, &["g8f6", "g1f3", "f6g8", "f3g1"]);
        assert!(engine.is_threefold_repetition());
    }

    #[test]
    fn test_legal_en_passant_keeps_position_distinct() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut engine, &shuffle);
        play(&mut engine, &shuffle);
        assert!(!engine.is_threefold_repetition());
        play(&mut engine, &shuffle);
        assert!(engine.is_threefold_repetition());
    }

    #[test]
    fn test_checkmate_and_check_suffixes() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["f2f3", "e7e5", "g2g4"]);
        let record = engine.make_move(sq("d8"), sq("h4"), None).unwrap();
        assert_eq!(record.san, "Qh4#");
        assert!(engine.is_checkmate());
        assert!(engine.is_check());
        assert!(engine.legal_moves().is_empty());

        let mut engine = ShakmatyEngine::new();
        play(&mut engine, &["e2e4", "f7f6"]);
        let record = engine.make_move(sq("d1"), sq("h5"), None).unwrap();
        assert_eq!(record.san, "Qh5+");
        assert!(engine.is_check());
        assert!(!engine.is_checkmate());
    }

    #[test]
    fn test_stalemate() {
        let engine = ShakmatyEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(engine.is_stalemate());
        assert!(engine.is_draw());
        assert!(!engine.is_checkmate());
    }

    #[test]
    fn test_insufficient_material_and_fifty_moves() {
        let engine = ShakmatyEngine::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        assert!(engine.is_insufficient_material());
        assert!(engine.is_draw());

        let engine = ShakmatyEngine::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        assert!(!engine.is_insufficient_material());
        assert!(!engine.is_stalemate());
        assert!(engine.is_draw());
    }
}
