pub mod chess_board;
pub mod config;
pub mod engines;
pub mod error;
pub mod game;
pub mod ui;

slint::include_modules!();

/// Browser entry point; the native binary goes through `main.rs` instead.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn play_in_browser() {
    let config = config::Config::default();
    let result = config
        .build_engine()
        .and_then(|engine| ui::setup_ui(engine, config.seed));
    if let Err(e) = result {
        log::error!("{}", e);
    }
}
