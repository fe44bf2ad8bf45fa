use super::captures::{collect_captures, Captures};
use super::history::{move_rows, MoveRow};
use super::selection::Selection;
use super::status::{describe_game_state, GameState};
use crate::chess_board::{project_placement, Color, PieceType, Placement, Square};
use crate::engines::{MoveRecord, RulesEngine};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// What a primary click on a square did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Deselected,
    Moved(MoveRecord),
    /// No transition applied; the selection is cleared.
    Ignored,
}

/// Owns the rules engine and everything the board view is drawn from.
///
/// Placement, status text and capture tallies are recomputed wholesale from
/// the engine after every mutation; they are never patched.
pub struct BoardController<E: RulesEngine> {
    engine: E,
    selection: Selection,
    last_move: Option<(Square, Square)>,
    flipped: bool,
    placement: Placement,
    status: String,
    captures: Captures,
    rng: Pcg64,
}

impl<E: RulesEngine> BoardController<E> {
    /// `seed` makes random moves reproducible; `None` seeds from entropy.
    pub fn new(engine: E, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        let mut controller = Self {
            engine,
            selection: Selection::Idle,
            last_move: None,
            flipped: false,
            placement: Placement::empty(),
            status: String::new(),
            captures: Captures::default(),
            rng,
        };
        controller.sync();
        controller
    }

    pub fn click(&mut self, square: Square) -> ClickOutcome {
        self.handle_click(square, None)
    }

    /// Like [`click`](Self::click), but a promotion completed by this click
    /// becomes `promotion` instead of the default queen.
    pub fn click_promoting(&mut self, square: Square, promotion: PieceType) -> ClickOutcome {
        self.handle_click(square, Some(promotion))
    }

    fn handle_click(&mut self, square: Square, preferred: Option<PieceType>) -> ClickOutcome {
        let outcome = match std::mem::take(&mut self.selection) {
            Selection::Selected { origin, .. } if origin == square => ClickOutcome::Deselected,
            Selection::Selected { origin, destinations, .. } if destinations.contains(&square) => {
                let promotion = preferred.or_else(|| self.promotion_for(origin, square));
                match self.commit(origin, square, promotion) {
                    Some(record) => ClickOutcome::Moved(record),
                    None => ClickOutcome::Ignored,
                }
            }
            _ => self.select(square),
        };
        debug!("click {} -> {:?}", square, outcome);
        outcome
    }

    pub fn secondary_click(&mut self) {
        self.selection = Selection::Idle;
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.flipped = false;
        self.last_move = None;
        self.selection = Selection::Idle;
        self.sync();
        info!("new game");
    }

    /// Returns false, leaving everything untouched, when there is no move to
    /// take back.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.engine.undo() else {
            return false;
        };
        info!("took back {}", record.san);
        self.last_move = None;
        self.selection = Selection::Idle;
        self.sync();
        true
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Plays a uniformly chosen legal move. `None` at a terminal position.
    pub fn random_move(&mut self) -> Option<MoveRecord> {
        let legal = self.engine.legal_moves();
        let chosen = *legal.choose(&mut self.rng)?;
        self.commit(chosen.from, chosen.to, chosen.promotion)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn history(&self) -> &[MoveRecord] {
        self.engine.history()
    }

    pub fn move_rows(&self) -> Vec<MoveRow> {
        move_rows(self.engine.history())
    }

    pub fn turn(&self) -> Color {
        self.engine.turn()
    }

    pub fn can_undo(&self) -> bool {
        !self.engine.history().is_empty()
    }

    fn select(&mut self, square: Square) -> ClickOutcome {
        let turn = self.engine.turn();
        if !self.placement.get(square).is_some_and(|piece| piece.color == turn) {
            return ClickOutcome::Ignored;
        }
        let mut destinations = Vec::new();
        let mut captures = Vec::new();
        for m in self.engine.legal_moves_from(square) {
            if !destinations.contains(&m.to) {
                destinations.push(m.to);
                if m.capture.is_some() {
                    captures.push(m.to);
                }
            }
        }
        self.selection = Selection::Selected {
            origin: square,
            destinations,
            captures,
        };
        ClickOutcome::Selected(square)
    }

    /// Queen unless the engine only offers other promotion kinds for this
    /// destination.
    fn promotion_for(&self, origin: Square, target: Square) -> Option<PieceType> {
        let offered: Vec<PieceType> = self
            .engine
            .legal_moves_from(origin)
            .iter()
            .filter(|m| m.to == target)
            .filter_map(|m| m.promotion)
            .collect();
        if offered.contains(&PieceType::Queen) {
            Some(PieceType::Queen)
        } else {
            offered.first().copied()
        }
    }

    fn commit(&mut self, from: Square, to: Square, promotion: Option<PieceType>) -> Option<MoveRecord> {
        self.selection = Selection::Idle;
        match self.engine.make_move(from, to, promotion) {
            Ok(record) => {
                info!("{} played {}", record.color, record.san);
                self.last_move = Some((from, to));
                self.sync();
                Some(record)
            }
            Err(e) => {
                warn!("engine rejected {}{}: {}", from, to, e);
                None
            }
        }
    }

    fn sync(&mut self) {
        self.placement = project_placement(&self.engine.board());
        self.status = describe_game_state(&GameState::from_engine(&self.engine));
        self.captures = collect_captures(self.engine.history());
    }
}
