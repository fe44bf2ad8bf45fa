use crate::chess_board::Color;
use crate::engines::MoveRecord;

/// One numbered line of the move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRow {
    pub number: u32,
    pub white: Option<String>,
    pub black: Option<String>,
}

pub fn move_rows(history: &[MoveRecord]) -> Vec<MoveRow> {
    let mut rows: Vec<MoveRow> = Vec::new();
    for record in history {
        match record.color {
            Color::White => rows.push(MoveRow {
                number: record.fullmove_number,
                white: Some(record.san.clone()),
                black: None,
            }),
            Color::Black => match rows.last_mut() {
                Some(row) if row.black.is_none() => row.black = Some(record.san.clone()),
                _ => rows.push(MoveRow {
                    number: record.fullmove_number,
                    white: None,
                    black: Some(record.san.clone()),
                }),
            },
        }
    }
    rows
}
