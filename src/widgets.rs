//! クリック可能な行リスト。行を描画し、実際に表示される行位置にタップターゲットを登録する。

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// 描画する [`Line`] とクリックアクションの組。
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Upgrades"));
/// cl.push_clickable(Line::from(" [1] Generator I"), BUY_UPGRADE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, inner_width);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` の組。
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// クリック不可の行を追加する。
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// `action_id` に紐づく行を追加する。
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// クリック可能な行すべてのターゲットを登録する。
    ///
    /// `top_offset`/`bottom_offset` は内容の上下の枠線の行数。
    /// `inner_width > 0` ならそれより長い行は折り返すものとし、
    /// 折り返した各行がクリック可能になる。`0` なら 1 行 1 行として扱う。
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut starts = Vec::with_capacity(self.lines.len());
        let mut heights = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            let w = line.width();
            let h = if inner_width == 0 || w <= inner_width as usize {
                1
            } else {
                w.div_ceil(inner_width as usize) as u16
            };
            starts.push(cumulative);
            heights.push(h);
            cumulative = cumulative.saturating_add(h);
        }

        for &(idx, action_id) in &self.actions {
            for r in 0..heights[idx] {
                let row = content_y.saturating_add(starts[idx] + r);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_clickable_lines_register() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("buy"), 10);
        cl.push_clickable(Line::from("sell"), 11);
        cl.push(Line::from("footer"));
        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 7), Some(10));
        assert_eq!(cs.hit_test(3, 8), Some(11));
        assert_eq!(cs.hit_test(3, 9), None);
    }

    #[test]
    fn targets_clipped_by_bottom_border() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("item {}", i)), 50 + i);
        }
        let area = Rect::new(0, 0, 40, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(1, 3), Some(52));
        assert_eq!(cs.hit_test(1, 4), None);
    }

    #[test]
    fn wrapped_line_pushes_later_targets_down() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890")); // 幅 10 で 2 行
        cl.push_clickable(Line::from("123456789012345"), 7); // 2 行
        cl.push_clickable(Line::from("x"), 8);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 10);

        assert_eq!(cs.hit_test(1, 1), None);
        assert_eq!(cs.hit_test(1, 2), Some(7));
        assert_eq!(cs.hit_test(1, 3), Some(7));
        assert_eq!(cs.hit_test(1, 4), Some(8));
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 10, 10), &mut cs, 1, 1, 0);
        assert!(cs.targets.is_empty());
        assert!(cl.into_lines().is_empty());
    }
}
