use crate::chess_board::Square;

/// Click-to-move selection. Destinations only exist together with an origin;
/// `captures` is the subset of destinations that take a piece.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        origin: Square,
        destinations: Vec<Square>,
        captures: Vec<Square>,
    },
}

impl Selection {
    pub fn origin(&self) -> Option<Square> {
        match self {
            Selection::Idle => None,
            Selection::Selected { origin, .. } => Some(*origin),
        }
    }

    pub fn destinations(&self) -> &[Square] {
        match self {
            Selection::Idle => &[],
            Selection::Selected { destinations, .. } => destinations,
        }
    }

    pub fn is_destination(&self, square: Square) -> bool {
        self.destinations().contains(&square)
    }

    pub fn is_capture(&self, square: Square) -> bool {
        match self {
            Selection::Idle => false,
            Selection::Selected { captures, .. } => captures.contains(&square),
        }
    }
}
