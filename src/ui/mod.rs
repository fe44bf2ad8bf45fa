use crate::chess_board::{Color, Square};
use crate::engines::ShakmatyEngine;
use crate::error::LuminaError;
use crate::game::BoardController;
use crate::{AppWindow, Field, MoveLine};
use log::warn;
use slint::{ComponentHandle, ModelRc, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

type Controller = BoardController<ShakmatyEngine>;

/// Squares in drawing order, top-left first, as (row, column, square).
pub fn board_layout(flipped: bool) -> impl Iterator<Item = (usize, usize, Square)> {
    (0..8usize)
        .flat_map(|row| (0..8usize).map(move |col| (row, col)))
        .filter_map(move |(row, col)| {
            let (file, rank) = if flipped { (7 - col, row) } else { (col, 7 - row) };
            Square::from_coords(file as u8, rank as u8).map(|square| (row, col, square))
        })
}

/// Maps the controller state to the fields drawn by the board grid.
pub fn board_fields(controller: &Controller) -> Vec<Field> {
    let selection = controller.selection();
    let last_move = controller.last_move();
    board_layout(controller.is_flipped())
        .map(|(row, col, square)| {
            let piece = controller.placement().get(square);
            Field {
                square: square.index() as i32,
                row: row as i32,
                column: col as i32,
                glyph: piece.map(|p| p.glyph().to_string()).unwrap_or_default().into(),
                label: square.to_string().into(),
                light: (row + col) % 2 == 0,
                selected: selection.origin() == Some(square),
                target: selection.is_destination(square),
                capture: selection.is_capture(square),
                last_move: last_move.is_some_and(|(from, to)| from == square || to == square),
            }
        })
        .collect()
}

pub fn move_lines(controller: &Controller) -> Vec<MoveLine> {
    controller
        .move_rows()
        .into_iter()
        .map(|row| MoveLine {
            number: format!("{}.", row.number).into(),
            white: row.white.unwrap_or_else(|| "—".to_string()).into(),
            black: row.black.unwrap_or_else(|| "—".to_string()).into(),
        })
        .collect()
}

fn refresh(ui: &AppWindow, controller: &Controller) {
    ui.set_fields(ModelRc::new(VecModel::from(board_fields(controller))));
    ui.set_moves(ModelRc::new(VecModel::from(move_lines(controller))));
    ui.set_status(SharedString::from(controller.status()));
    ui.set_turn(controller.turn().to_string().into());
    ui.set_move_count(controller.history().len() as i32);
    ui.set_white_captures(controller.captures().glyphs(Color::White).into());
    ui.set_black_captures(controller.captures().glyphs(Color::Black).into());
    ui.set_flipped(controller.is_flipped());
    ui.set_can_undo(controller.can_undo());
}

/// Runs `action` against the controller and redraws the window afterwards.
fn bind<F>(ui: &AppWindow, controller: &Rc<RefCell<Controller>>, action: F) -> impl FnMut() + 'static
where
    F: Fn(&mut Controller) + 'static,
{
    let weak = ui.as_weak();
    let controller = Rc::clone(controller);
    move || {
        action(&mut controller.borrow_mut());
        if let Some(ui) = weak.upgrade() {
            refresh(&ui, &controller.borrow());
        }
    }
}

fn bind_square<F>(ui: &AppWindow, controller: &Rc<RefCell<Controller>>, action: F) -> impl FnMut(i32) + 'static
where
    F: Fn(&mut Controller, Square) + 'static,
{
    let weak = ui.as_weak();
    let controller = Rc::clone(controller);
    move |index| {
        let Some(square) = usize::try_from(index).ok().and_then(Square::from_index) else {
            warn!("click on unknown square index {}", index);
            return;
        };
        action(&mut controller.borrow_mut(), square);
        if let Some(ui) = weak.upgrade() {
            refresh(&ui, &controller.borrow());
        }
    }
}

pub fn setup_ui(engine: ShakmatyEngine, seed: Option<u64>) -> Result<(), LuminaError> {
    let ui = AppWindow::new()?;
    let controller = Rc::new(RefCell::new(BoardController::new(engine, seed)));
    refresh(&ui, &controller.borrow());

    ui.on_square_clicked(bind_square(&ui, &controller, |c, square| {
        c.click(square);
    }));
    ui.on_square_right_clicked(bind_square(&ui, &controller, |c, _| c.secondary_click()));
    ui.on_new_game(bind(&ui, &controller, |c| c.reset()));
    ui.on_undo(bind(&ui, &controller, |c| {
        c.undo();
    }));
    ui.on_flip(bind(&ui, &controller, |c| c.flip()));
    ui.on_random_move(bind(&ui, &controller, |c| {
        c.random_move();
    }));

    ui.run()?;
    Ok(())
}
