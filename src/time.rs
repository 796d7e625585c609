//! 壁時計とフレーム間引き。
//!
//! `draw_web()` は約 60fps で呼ばれる。`Cadence` はそのフレームを
//! 一定間隔で高々 1 回のイベントに変換する（tick は 500ms、オートセーブは 5 秒）。
//! ゲーム側は経過時間ベースなので、フレームが遅れても次のイベントが遅れるだけで
//! 累積時間は失われない。

/// Unix エポックからの現在時刻（ミリ秒）。
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Unix エポックからの現在時刻（ミリ秒）。
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

pub struct Cadence {
    /// 発火間隔の最小値（ミリ秒）。
    interval_ms: f64,
    /// 最後に発火した時刻（ms）。最初のフレーム前は None。
    last_fire: Option<f64>,
}

impl Cadence {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_fire: None,
        }
    }

    /// 現在時刻を渡す。前回の発火から間隔が経過していれば true。
    /// 最初のフレームは起点を記録するだけ。
    pub fn due(&mut self, now_ms: f64) -> bool {
        match self.last_fire {
            None => {
                self.last_fire = Some(now_ms);
                false
            }
            Some(prev) if now_ms < prev => {
                // 時計が戻った。追いつくのを待たずに起点を取り直す。
                self.last_fire = Some(now_ms);
                false
            }
            Some(prev) if now_ms - prev >= self.interval_ms => {
                self.last_fire = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }
}
