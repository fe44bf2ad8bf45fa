use crate::chess_board::{Color, PieceType};
use crate::engines::MoveRecord;

/// Captured piece kinds, grouped by the side that made the capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    pub white: Vec<PieceType>,
    pub black: Vec<PieceType>,
}

impl Captures {
    pub fn by(&self, color: Color) -> &[PieceType] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn glyphs(&self, color: Color) -> String {
        self.by(color).iter().map(|kind| kind.glyph()).collect()
    }
}

/// Rebuilt from the full history every time, never appended to, so that an
/// undo shrinks the tallies.
pub fn collect_captures(history: &[MoveRecord]) -> Captures {
    let mut captures = Captures::default();
    for record in history {
        let Some(captured) = record.captured else {
            continue;
        };
        match record.color {
            Color::White => captures.white.push(captured),
            Color::Black => captures.black.push(captured),
        }
    }
    captures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::test_utils::sq;

    fn record(color: Color, san: &str, captured: Option<PieceType>) -> MoveRecord {
        MoveRecord {
            from: sq("a1"),
            to: sq("a2"),
            color,
            piece: PieceType::Pawn,
            san: san.to_string(),
            captured,
            promotion: None,
            fullmove_number: 1,
        }
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(collect_captures(&[]), Captures::default());
    }

    #[test]
    fn test_partition_keeps_chronological_order() {
        let history = vec![
            record(Color::White, "exd5", Some(PieceType::Pawn)),
            record(Color::Black, "Qxd5", Some(PieceType::Pawn)),
            record(Color::White, "Nc3", None),
            record(Color::Black, "Qxa2", Some(PieceType::Pawn)),
            record(Color::White, "Rxa2", Some(PieceType::Queen)),
            record(Color::Black, "Bxc3", Some(PieceType::Knight)),
        ];
        let captures = collect_captures(&history);
        assert_eq!(captures.white, vec![PieceType::Pawn, PieceType::Queen]);
        assert_eq!(captures.black, vec![PieceType::Pawn, PieceType::Pawn, PieceType::Knight]);
        assert_eq!(captures.glyphs(Color::White), "♟♛");
        assert_eq!(captures.by(Color::Black).len(), 3);
    }

    #[test]
    fn test_truncated_history_matches_recomputation() {
        let history = vec![
            record(Color::White, "exd5", Some(PieceType::Pawn)),
            record(Color::Black, "Qxd5", Some(PieceType::Pawn)),
        ];
        let shorter = collect_captures(&history[..1]);
        assert_eq!(shorter.white, vec![PieceType::Pawn]);
        assert!(shorter.black.is_empty());
    }
}
