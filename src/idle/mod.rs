//! Idle Forge: アップグレード、一度きりのストア、実績、プレステージを持つ放置ゲーム。

pub mod actions;
pub mod error;
pub mod format;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use crate::input::InputEvent;
use crate::time::Cadence;

use error::GameError;
use format::format_amount;
use save::{KeyValueStore, AUTOSAVE_INTERVAL_MS};
use state::EconomyState;

/// 生産加算ステップの間隔（ミリ秒）。
pub const TICK_INTERVAL_MS: f64 = 500.0;
/// トーストの表示時間。
pub const TOAST_LIFETIME_MS: f64 = 2_000.0;
/// 同時に表示するトースト数（新しいものが末尾）。
pub const MAX_VISIBLE_TOASTS: usize = 5;

/// 一時的な通知。
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub expires_ms: f64,
}

/// ホストページ（prompt/confirm ダイアログ）が必要なセーブ管理の要求。
#[derive(Clone, Debug, PartialEq)]
pub enum HostRequest {
    Export,
    Import,
    Reset,
}

/// 入力イベントがホスト要求ならそれに変換する。
pub fn host_request(event: &InputEvent) -> Option<HostRequest> {
    match event {
        InputEvent::Key('e') | InputEvent::Click(actions::EXPORT_SAVE) => Some(HostRequest::Export),
        InputEvent::Key('i') | InputEvent::Click(actions::IMPORT_SAVE) => Some(HostRequest::Import),
        InputEvent::Key('r') | InputEvent::Click(actions::RESET_SAVE) => Some(HostRequest::Reset),
        _ => None,
    }
}

pub struct IdleGame {
    pub state: EconomyState,
    pub toasts: Vec<Toast>,
    storage: Box<dyn KeyValueStore>,
    tick_cadence: Cadence,
    save_cadence: Cadence,
}

impl IdleGame {
    /// セッションを開始する。保存データがあれば再開する。
    pub fn new(mut storage: Box<dyn KeyValueStore>, now_ms: f64) -> Self {
        let state = save::load_game(storage.as_mut()).unwrap_or_else(|| EconomyState::new(now_ms));
        let mut tick_cadence = Cadence::new(TICK_INTERVAL_MS);
        let mut save_cadence = Cadence::new(AUTOSAVE_INTERVAL_MS);
        tick_cadence.due(now_ms);
        save_cadence.due(now_ms);
        Self {
            state,
            toasts: Vec::new(),
            storage,
            tick_cadence,
            save_cadence,
        }
    }

    /// 毎フレーム呼ぶ。tick とオートセーブを間隔どおりに走らせ、期限切れのトーストを消す。
    pub fn update(&mut self, now_ms: f64) {
        if self.tick_cadence.due(now_ms) {
            for name in logic::advance(&mut self.state, now_ms) {
                self.toast(&format!("Achievement: {}", name), now_ms);
            }
        }
        if self.save_cadence.due(now_ms) {
            self.save(now_ms);
        }
        self.toasts.retain(|t| t.expires_ms > now_ms);
    }

    /// ゲーム操作の入力を処理する。消費したら true。
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> bool {
        match event {
            InputEvent::Key('c') | InputEvent::Click(actions::CLICK_RESOURCE) => {
                logic::click(&mut self.state);
                true
            }
            InputEvent::Key('p') | InputEvent::Click(actions::PRESTIGE) => {
                self.prestige(now_ms);
                true
            }
            InputEvent::Key(c @ '1'..='9') => {
                let idx = (*c as u8 - b'1') as usize;
                self.buy_upgrade(idx, now_ms)
            }
            InputEvent::Key(c) => match actions::STORE_KEYS.iter().position(|k| k == c) {
                Some(idx) => self.buy_store_item(idx, now_ms),
                None => false,
            },
            InputEvent::Click(id)
                if (actions::BUY_UPGRADE_BASE..actions::BUY_STORE_BASE).contains(id) =>
            {
                self.buy_upgrade((id - actions::BUY_UPGRADE_BASE) as usize, now_ms)
            }
            InputEvent::Click(id)
                if (actions::BUY_STORE_BASE..actions::BUY_STORE_BASE + 100).contains(id) =>
            {
                self.buy_store_item((id - actions::BUY_STORE_BASE) as usize, now_ms)
            }
            _ => false,
        }
    }

    fn buy_upgrade(&mut self, idx: usize, now_ms: f64) -> bool {
        let Some(id) = self.state.upgrades.get(idx).map(|u| u.id.clone()) else {
            return false;
        };
        match logic::buy_upgrade(&mut self.state, &id) {
            Ok(level) => {
                let name = self.state.upgrades[idx].name.clone();
                self.toast(&format!("{} → lvl {}", name, level), now_ms);
                self.save(now_ms);
            }
            Err(_) => self.toast("Not enough", now_ms),
        }
        true
    }

    fn buy_store_item(&mut self, idx: usize, now_ms: f64) -> bool {
        let Some(id) = self.state.store.get(idx).map(|s| s.id.clone()) else {
            return false;
        };
        // 買えない商品や購入済みの商品は黙って無視する。
        if logic::buy_store_item(&mut self.state, &id).is_ok() {
            let name = self.state.store[idx].name.clone();
            self.toast(&format!("Bought {}", name), now_ms);
            self.save(now_ms);
        }
        true
    }

    fn prestige(&mut self, now_ms: f64) {
        match logic::prestige(&mut self.state) {
            Ok(count) => {
                self.toast(&format!("Prestige {}", count), now_ms);
                self.save(now_ms);
            }
            Err(GameError::InsufficientResource { required, .. }) => {
                self.toast(&format!("Need {}", format_amount(required)), now_ms);
            }
            Err(_) => {}
        }
    }

    /// 現在の状態を持ち運べるトークンにする。
    pub fn export(&mut self, now_ms: f64) -> Option<String> {
        match save::export_token(&self.state) {
            Ok(token) => {
                self.toast("Exported!", now_ms);
                Some(token)
            }
            Err(e) => {
                self.toast(&e.to_string(), now_ms);
                None
            }
        }
    }

    /// デコードしたトークンで状態を丸ごと置き換える。失敗時は現在の状態に触れない。
    pub fn import(&mut self, token: &str, now_ms: f64) -> Result<(), GameError> {
        match save::import_token(token) {
            Ok(state) => {
                self.state = state;
                self.toast("Imported!", now_ms);
                self.save(now_ms);
                Ok(())
            }
            Err(e) => {
                self.toast("Import failed", now_ms);
                Err(e)
            }
        }
    }

    /// セーブを消して初期状態からやり直す。
    pub fn reset(&mut self, now_ms: f64) {
        save::delete_save(self.storage.as_mut());
        self.state = EconomyState::new(now_ms);
        self.toasts.clear();
    }

    fn save(&mut self, now_ms: f64) {
        if !save::save_game(self.storage.as_mut(), &mut self.state, now_ms) {
            self.toast("Progress not saved", now_ms);
        }
    }

    fn toast(&mut self, text: &str, now_ms: f64) {
        self.toasts.push(Toast {
            text: text.to_string(),
            expires_ms: now_ms + TOAST_LIFETIME_MS,
        });
    }

    /// 描画するトースト（新しいものが末尾）。
    pub fn visible_toasts(&self) -> &[Toast] {
        let skip = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
        &self.toasts[skip..]
    }
}
