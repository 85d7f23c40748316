//! 描画システム
//!
//! 配置済みツリーをキャンバスへ描き、ヘッダとミニバッファを添える。
//! キャンバス座標からスクリーン座標への変換はここで閉じる。

use crate::input::CommandProcessor;
use crate::map::display_title;
use crate::minibuffer::{Minibuffer, MinibufferMode};
use crate::ui::layout::{self, AppLayout, NodeBox, TreeLayout};
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::viewport::Viewport;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// レンダラー
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            theme: Theme::dark(),
        }
    }

    /// 1フレームを描画
    pub fn draw(
        &self,
        frame: &mut Frame,
        app_layout: &AppLayout,
        processor: &CommandProcessor,
        minibuffer: &Minibuffer,
        viewport: &Viewport,
    ) {
        let tree_layout = layout::layout_tree(processor.map().root(), viewport.zoom());

        self.draw_header(frame, app_layout.header, processor, viewport);
        self.draw_canvas(frame, app_layout.canvas, processor, &tree_layout, viewport);
        self.draw_minibuffer(frame, app_layout.minibuffer, minibuffer);
    }

    fn draw_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        processor: &CommandProcessor,
        viewport: &Viewport,
    ) {
        let title = display_title(processor.map().root());
        let zoom_percent = (viewport.zoom() * 100.0).round() as i32;
        let text = format!(
            " edaha │ {} │ 拡大率 {}% │ ノード数 {} ",
            title,
            zoom_percent,
            processor.map().node_count()
        );

        let header = Paragraph::new(text).style(self.theme.style(ComponentType::Header));
        frame.render_widget(header, area);
    }

    fn draw_canvas(
        &self,
        frame: &mut Frame,
        area: Rect,
        processor: &CommandProcessor,
        tree_layout: &TreeLayout,
        viewport: &Viewport,
    ) {
        let (scroll_x, scroll_y) = viewport.scroll();

        // 接続線はノード枠より先に描き、枠で上書きされても構わない
        for node_box in &tree_layout.boxes {
            self.draw_connector(frame, area, node_box, scroll_x, scroll_y);
        }

        for node_box in &tree_layout.boxes {
            self.draw_node(frame, area, processor, node_box, scroll_x, scroll_y);
        }
    }

    fn draw_connector(
        &self,
        frame: &mut Frame,
        area: Rect,
        node_box: &NodeBox,
        scroll_x: i32,
        scroll_y: i32,
    ) {
        let Some((_, parent_y)) = node_box.parent_anchor else {
            return;
        };
        let (child_x, child_y) = node_box.top_anchor();

        let style = self.theme.style(ComponentType::Connector);
        let buffer = frame.buffer_mut();

        // 子の上辺中央から親の下辺まで垂直線を引く
        for y in (parent_y + 1)..child_y {
            let Some((sx, sy)) = to_screen(area, child_x - scroll_x, y - scroll_y) else {
                continue;
            };
            if let Some(cell) = buffer.cell_mut((sx, sy)) {
                cell.set_symbol("│");
                cell.set_style(style);
            }
        }
    }

    fn draw_node(
        &self,
        frame: &mut Frame,
        area: Rect,
        processor: &CommandProcessor,
        node_box: &NodeBox,
        scroll_x: i32,
        scroll_y: i32,
    ) {
        let Some(rect) = clip_rect(
            area,
            node_box.x - scroll_x,
            node_box.y - scroll_y,
            node_box.width,
            node_box.height,
        ) else {
            return;
        };
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        let component = if node_box.id == *processor.selection() {
            ComponentType::SelectedNode
        } else if node_box.depth == 1 {
            ComponentType::RootNode
        } else {
            ComponentType::Node
        };

        let text = processor
            .map()
            .find(&node_box.id)
            .map(|n| n.text.as_str())
            .unwrap_or("");
        let label = layout::truncate_label(text, rect.width.saturating_sub(2) as usize);

        let node = Paragraph::new(label)
            .centered()
            .block(Block::default().borders(Borders::ALL))
            .style(self.theme.style(component));
        frame.render_widget(node, rect);
    }

    fn draw_minibuffer(&self, frame: &mut Frame, area: Rect, minibuffer: &Minibuffer) {
        match minibuffer.mode() {
            MinibufferMode::ErrorDisplay { message, .. } => {
                let line = Paragraph::new(message.as_str())
                    .style(self.theme.style(ComponentType::Error));
                frame.render_widget(line, area);
            }
            MinibufferMode::InfoDisplay { message, .. } => {
                let line = Paragraph::new(message.as_str())
                    .style(self.theme.style(ComponentType::Info));
                frame.render_widget(line, area);
            }
            MinibufferMode::Inactive => {
                let hint = "Tab:子追加  d:削除  Enter:編集  t:タイトル  s:書き出し  r:リセット  q:終了";
                let line = Paragraph::new(hint)
                    .style(self.theme.style(ComponentType::Connector));
                frame.render_widget(line, area);
            }
            _ => {
                let line = Line::from(vec![
                    Span::styled(
                        minibuffer.prompt().to_string(),
                        self.theme.style(ComponentType::MinibufferPrompt),
                    ),
                    Span::styled(
                        minibuffer.input().to_string(),
                        self.theme.style(ComponentType::MinibufferInput),
                    ),
                ]);
                frame.render_widget(Paragraph::new(line), area);

                // 入力中はカーソルを表示する
                let prefix: String = minibuffer
                    .input()
                    .chars()
                    .take(minibuffer.cursor_pos())
                    .collect();
                let cursor_x = area.x
                    + minibuffer.prompt().width() as u16
                    + prefix.width() as u16;
                frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// キャンバス相対座標をスクリーン座標へ変換（範囲外は None）
fn to_screen(area: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    if x < 0 || y < 0 {
        return None;
    }
    let sx = area.x as i32 + x;
    let sy = area.y as i32 + y;
    if sx >= area.right() as i32 || sy >= area.bottom() as i32 {
        return None;
    }
    Some((sx as u16, sy as u16))
}

/// キャンバス相対の矩形をクリップしてスクリーン座標の Rect にする
fn clip_rect(area: Rect, x: i32, y: i32, width: i32, height: i32) -> Option<Rect> {
    let left = x.max(0);
    let top = y.max(0);
    let right = (x + width).min(area.width as i32);
    let bottom = (y + height).min(area.height as i32);

    if left >= right || top >= bottom {
        return None;
    }

    Some(Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
