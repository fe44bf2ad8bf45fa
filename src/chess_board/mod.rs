use crate::error::LuminaError;
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
pub mod test_utils;

const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Solid glyph, used for the capture tallies regardless of colour.
    pub fn glyph(&self) -> char {
        match self {
            PieceType::King => '♚',
            PieceType::Queen => '♛',
            PieceType::Rook => '♜',
            PieceType::Bishop => '♝',
            PieceType::Knight => '♞',
            PieceType::Pawn => '♟',
        }
    }

    /// Promotion suffix of a coordinate move, e.g. the `n` in `e7e8n`.
    pub fn from_promotion_letter(letter: &str) -> Option<Self> {
        match letter {
            "n" | "N" => Some(PieceType::Knight),
            "b" | "B" => Some(PieceType::Bishop),
            "r" | "R" => Some(PieceType::Rook),
            "q" | "Q" => Some(PieceType::Queen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind }
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceType::King) => '♔',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, kind) => kind.glyph(),
        }
    }
}

/// One of the 64 board squares. Index 0 is a1, 63 is h8.
///
/// The only ways to obtain a `Square` are the checked constructors, so an
/// out-of-range square cannot be represented.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct Square(u8);

impl Square {
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self(rank * BOARD_SIZE as u8 + file))
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// 0 = file a.
    pub fn file(&self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// 0 = rank 1.
    pub fn rank(&self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = LuminaError;

    fn from_str(algebraic: &str) -> Result<Self, Self::Err> {
        let invalid = || LuminaError::InvalidSquare(algebraic.to_string());
        let bytes = algebraic.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::from_coords(file, rank).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// Parses a coordinate move such as `e2e4`, or `e7e8n` for an
/// under-promotion.
pub fn parse_coordinate_move(text: &str) -> Result<CoordinateMove, LuminaError> {
    let invalid = || LuminaError::InvalidNotation(text.to_string());
    let (Some(from), Some(to), Some(suffix)) = (text.get(0..2), text.get(2..4), text.get(4..)) else {
        return Err(invalid());
    };
    let promotion = match suffix {
        "" => None,
        letter => Some(PieceType::from_promotion_letter(letter).ok_or_else(invalid)?),
    };
    Ok(CoordinateMove {
        from: from.parse()?,
        to: to.parse()?,
        promotion,
    })
}

/// Engine-native board snapshot: row 0 is rank 8, column 0 is file a.
pub type BoardMatrix = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// Total mapping from every square to its occupant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    squares: [Option<Piece>; BOARD_SIZE * BOARD_SIZE],
}

impl Placement {
    pub fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        for rank in (0..BOARD_SIZE as u8).rev() {
            out.push((b'1' + rank) as char);
            out.push(' ');
            for file in 0..BOARD_SIZE as u8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|square| self.get(square))
                    .map_or('.', |piece| piece.to_char());
                out.push(c);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_to_string())
    }
}

/// Maps the engine's rank-major matrix onto square identifiers.
pub fn project_placement(matrix: &BoardMatrix) -> Placement {
    let mut placement = Placement::empty();
    for (row, cells) in matrix.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(square) = Square::from_coords(col as u8, (BOARD_SIZE - 1 - row) as u8) {
                placement.squares[square.index()] = *cell;
            }
        }
    }
    placement
}
