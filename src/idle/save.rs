//! Idle Forge のセーブ/ロードとエクスポート/インポート。
//!
//! スナップショットは `EconomyState` 全体の JSON。ロード時は保存済みフィールドを
//! 初期値の上にマージする。保存データに無い列は既定の定義に丸ごと戻す
//! （要素単位のマージはしない）。派生値の生産レートは保存せず、ロードのたびに再計算する。
//!
//! エクスポートトークンは同じ JSON を標準 base64 にしたもの。圧縮もチェックサムもない。

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::error::{GameError, StorageError};
use super::state::EconomyState;

/// スナップショットの保存キー。
pub const STORAGE_KEY: &str = "awesome_idle_save";

/// オートセーブ間隔（ミリ秒）。
pub const AUTOSAVE_INTERVAL_MS: f64 = 5_000.0;

/// 永続的な文字列キーバリューストア（ブラウザの localStorage またはテスト用）。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// JSON スナップショットを初期値の上にマージして読む。
fn parse_snapshot(json: &str) -> Result<EconomyState, GameError> {
    let mut state: EconomyState =
        serde_json::from_str(json).map_err(|e| GameError::Decode(e.to_string()))?;
    state.recompute_rate();
    Ok(state)
}

/// 状態を持ち運べるテキストトークンにエンコードする。
pub fn export_token(state: &EconomyState) -> Result<String, GameError> {
    let json = serde_json::to_string(state).map_err(|e| GameError::Decode(e.to_string()))?;
    Ok(BASE64.encode(json))
}

/// [`export_token`] のトークンをデコードする。ここでは何も反映しない。
/// 成功したときだけ呼び出し側が差し替える。
pub fn import_token(token: &str) -> Result<EconomyState, GameError> {
    let bytes = BASE64
        .decode(token.trim())
        .map_err(|e| GameError::Decode(e.to_string()))?;
    let json = String::from_utf8(bytes).map_err(|e| GameError::Decode(e.to_string()))?;
    parse_snapshot(&json)
}

/// 状態をストアに書き込み、成功したら `last_saved_ms` を記録する。
/// 失敗はログに出して `false` を返す。プレイは保存なしで続く。
pub fn save_game(store: &mut dyn KeyValueStore, state: &mut EconomyState, now_ms: f64) -> bool {
    let previous = state.last_saved_ms.replace(now_ms);
    let json = match serde_json::to_string(state) {
        Ok(j) => j,
        Err(e) => {
            state.last_saved_ms = previous;
            warn(&format!("Idle Forge: failed to serialize save: {e}"));
            return false;
        }
    };

    match store.set(STORAGE_KEY, &json) {
        Ok(()) => true,
        Err(e) => {
            state.last_saved_ms = previous;
            warn(&format!("Idle Forge: progress not saved: {e}"));
            false
        }
    }
}

/// 保存済みスナップショットを読む。`None` なら新規開始。
/// 保存が無い場合、ストアに届かない場合、データが読めない場合（このときは削除する）。
pub fn load_game(store: &mut dyn KeyValueStore) -> Option<EconomyState> {
    let json = match store.get(STORAGE_KEY) {
        Ok(Some(j)) => j,
        Ok(None) => return None,
        Err(e) => {
            warn(&format!("Idle Forge: could not read save: {e}"));
            return None;
        }
    };

    match parse_snapshot(&json) {
        Ok(state) => Some(state),
        Err(e) => {
            warn(&format!("Idle Forge: discarding unreadable save: {e}"));
            let _ = store.remove(STORAGE_KEY);
            None
        }
    }
}

/// 保存済みスナップショットを削除する。
pub fn delete_save(store: &mut dyn KeyValueStore) {
    if let Err(e) = store.remove(STORAGE_KEY) {
        warn(&format!("Idle Forge: could not delete save: {e}"));
    }
}

/// ブラウザの localStorage。使えない環境（プライベートモード、無効化、ブラウザ外）では
/// すべての呼び出しが `StorageError` になる。
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StorageError("localStorage is not available".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError(format!("{e:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(msg: &str) {
    eprintln!("{msg}");
}

/// テスト用のインメモリストア。`fail` を立てるとすべての呼び出しが失敗する。
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    pub entries: std::collections::HashMap<String, String>,
    pub fail: bool,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail {
            return Err(StorageError("quota exceeded".into()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError("quota exceeded".into()));
        }
        self.entries.insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError("quota exceeded".into()));
        }
        self.entries.remove(key);
        Ok(())
    }
}
