mod idle;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use idle::save::LocalStorage;
use idle::{host_request, HostRequest, IdleGame};
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// グリッドコンテナの矩形を取得し、ピクセル座標をセルに変換する。
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend は <body> 直下にグリッドコンテナの <div> を作る。
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// 入力イベントの振り分け。セーブ管理はブラウザのダイアログ経由、それ以外はゲームへ。
fn dispatch(game: &mut IdleGame, event: &InputEvent) {
    let now = time::now_ms();
    let Some(request) = host_request(event) else {
        game.handle_input(event, now);
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    match request {
        HostRequest::Export => {
            if let Some(token) = game.export(now) {
                let _ = window.prompt_with_message_and_default("Copy your save:", &token);
            }
        }
        HostRequest::Import => {
            if let Ok(Some(token)) = window.prompt_with_message("Paste save:") {
                if !token.trim().is_empty() {
                    let _ = game.import(&token, now);
                }
            }
        }
        HostRequest::Reset => {
            if window.confirm_with_message("Reset?").unwrap_or(false) {
                game.reset(now);
            }
        }
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(IdleGame::new(
        Box::new(LocalStorage),
        time::now_ms(),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // マウス/タッチのクリック
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                dispatch(&mut game.borrow_mut(), &InputEvent::Click(action_id));
            }
        }
    });

    // キーボード
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                dispatch(&mut game.borrow_mut(), &InputEvent::Key(c.to_ascii_lowercase()));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let now = time::now_ms();
            game.borrow_mut().update(now);
            let gs = game.borrow();
            let size = f.area();

            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            idle::render::render(&gs, f, size, &click_state, now);
        }
    });

    Ok(())
}
