//! 入力の正規化（キー/タップイベント、クリックターゲット、ピクセル→セル変換）。

use ratzilla::ratatui::layout::Rect;

/// キーボード・マウス・タッチから正規化した入力イベント。
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// キーボードのキー入力。
    Key(char),
    /// 登録済みターゲットへのタップ。`idle::actions` のアクション ID で識別する。
    Click(u16),
}

/// タップでアクションを起こせる画面上の領域。
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// ターミナルのセル座標での当たり判定領域。
    pub rect: Rect,
    pub action_id: u16,
}

/// 描画ループ（毎フレームターゲットを登録）とマウスハンドラ（当たり判定）で共有する。
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// 横幅いっぱい 1 行のターゲットを登録する。`row` が `area` の外なら無視。
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// セル上のアクションを探す。重なった場合は後から登録した方が勝つ。
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// この幅未満ではパネルを縦に積む。
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// グリッド内のピクセル位置をターミナルの行に変換する。
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let row = (click_y / (grid_height / terminal_rows as f64)) as u16;
    (row < terminal_rows).then_some(row)
}

/// グリッド内のピクセル位置をターミナルの列に変換する。
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let col = (click_x / (grid_width / terminal_cols as f64)) as u16;
    (col < terminal_cols).then_some(col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 3, 40, 1), 1);
        cs.add_click_target(Rect::new(0, 4, 40, 1), 2);
        assert_eq!(cs.hit_test(5, 3), Some(1));
        assert_eq!(cs.hit_test(5, 4), Some(2));
        assert_eq!(cs.hit_test(5, 5), None);
        assert_eq!(cs.hit_test(40, 3), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);
        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn row_target_clipped_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 10, 30, 5);
        cs.add_row_target(area, 9, 7);
        cs.add_row_target(area, 15, 8);
        cs.add_row_target(area, 12, 9);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(2, 12), Some(9));
        assert_eq!(cs.hit_test(1, 12), None);
    }

    #[test]
    fn clear_removes_all() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn narrow_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_to_col() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
    }

    #[test]
    fn tap_pipeline_hits_registered_row() {
        let mut cs = ClickState::new();
        cs.terminal_rows = 24;
        cs.terminal_cols = 80;
        cs.add_row_target(Rect::new(0, 0, 80, 24), 6, 42);
        let row = pixel_y_to_row(6.5 * 20.0, 480.0, cs.terminal_rows).unwrap();
        let col = pixel_x_to_col(100.0, 800.0, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(42));
    }
}
