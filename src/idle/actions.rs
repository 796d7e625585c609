//! Idle Forge のクリックターゲット用アクション ID。
//!
//! 描画時に登録し、`InputEvent::Click` で配送する。

pub const CLICK_RESOURCE: u16 = 0;
pub const PRESTIGE: u16 = 1;

// ── 購入（base + 並び順のインデックス） ─────────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;
pub const BUY_STORE_BASE: u16 = 200;

/// ストア商品のキー（並び順）。c/e/i/p/r は他の操作が使うので避ける。
pub const STORE_KEYS: [char; 8] = ['a', 'b', 'd', 'f', 'g', 'h', 'j', 'k'];

// ── セーブ管理（ホストページ側で処理） ───────────────────────────
pub const EXPORT_SAVE: u16 = 900;
pub const IMPORT_SAVE: u16 = 901;
pub const RESET_SAVE: u16 = 902;
