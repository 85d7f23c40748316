//! メインアプリケーション構造体
//!
//! 端末のライフサイクル、イベントループ、各コンポーネントへの振り分けを担う。
//! ツリー・ビューポート・ミニバッファの更新はすべてイベントハンドラ内で
//! 同期的に完了し、バックグラウンド処理は存在しない。

use crate::error::{setup_panic_handler, Result};
use crate::file;
use crate::input::{
    Command, CommandProcessor, CommandResult, ContactPoint, GestureEvent, KeyMap, SwipeDirection,
    TouchTracker,
};
use crate::logging::Logger;
use crate::map::display_title;
use crate::minibuffer::{Minibuffer, MinibufferMode, MinibufferOutcome};
use crate::ui::{calculate_layout, layout_tree, Renderer, Viewport};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// キーボードズームの1ステップ
const KEY_ZOOM_STEP: f64 = 0.1;
/// ホイール1ノッチぶんの生デルタ（符号は回転方向で決まる）
const WHEEL_TICK_DELTA: f64 = 10.0;
/// スクロールコマンドの移動量（セル）
const SCROLL_STEP_X: i32 = 4;
const SCROLL_STEP_Y: i32 = 2;

/// メインアプリケーション構造体
pub struct App {
    processor: CommandProcessor,
    minibuffer: Minibuffer,
    viewport: Viewport,
    keymap: KeyMap,
    touch: TouchTracker,
    renderer: Renderer,
    logger: Logger,
    /// 直近の描画で得たキャンバスの大きさ（ensure_visible用）
    canvas_size: (u16, u16),
    running: bool,
}

impl App {
    /// 新しいアプリケーションインスタンスを作成
    pub fn new() -> Result<Self> {
        Ok(App {
            processor: CommandProcessor::new(),
            minibuffer: Minibuffer::new(),
            viewport: Viewport::new(),
            keymap: KeyMap::new(),
            touch: TouchTracker::new(),
            renderer: Renderer::new(),
            logger: Logger::for_development(),
            canvas_size: (80, 22),
            running: true,
        })
    }

    /// メインイベントループを実行
    pub fn run(&mut self) -> Result<()> {
        setup_panic_handler();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.logger.log_info("起動しました", Some("app"));
        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while self.running {
            self.minibuffer.refresh();
            terminal.draw(|frame| self.draw_frame(frame))?;

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }

            match event::read()? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    self.handle_key_event(key_event);
                }
                Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
                // サイズ変更は次の描画で反映される
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    fn draw_frame(&mut self, frame: &mut Frame) {
        match calculate_layout(frame.area()) {
            Ok(layout) => {
                self.canvas_size = (layout.canvas.width, layout.canvas.height);
                self.renderer.draw(
                    frame,
                    &layout,
                    &self.processor,
                    &self.minibuffer,
                    &self.viewport,
                );
            }
            Err(_) => {
                let message = Paragraph::new("画面サイズが小さすぎます");
                frame.render_widget(message, frame.area());
            }
        }
    }

    /// キーイベントを処理
    ///
    /// ミニバッファがアクティブな間はすべてのキーがそちらへ向かう。
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        let mode = self.minibuffer.mode().clone();
        match self.minibuffer.handle_key(&key_event) {
            MinibufferOutcome::Submit(input) => self.handle_minibuffer_submit(mode, input),
            MinibufferOutcome::Cancel | MinibufferOutcome::Pending => {}
            MinibufferOutcome::NotConsumed => {
                if let Some(name) = self.keymap.lookup(&key_event) {
                    log::debug!("command dispatched: {}", name);
                    self.dispatch(Command::from_string(name));
                }
            }
        }
    }

    /// マウスイベントを処理
    ///
    /// Ctrl付きホイールはズーム専用で、通常のスクロールには回さない。
    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let precision = mouse_event.modifiers.contains(KeyModifiers::CONTROL);
        match mouse_event.kind {
            MouseEventKind::ScrollUp => {
                if !self.viewport.handle_wheel(-WHEEL_TICK_DELTA, precision) {
                    self.viewport.scroll_by(0, -SCROLL_STEP_Y);
                }
            }
            MouseEventKind::ScrollDown => {
                if !self.viewport.handle_wheel(WHEEL_TICK_DELTA, precision) {
                    self.viewport.scroll_by(0, SCROLL_STEP_Y);
                }
            }
            MouseEventKind::ScrollLeft => self.viewport.scroll_by(-SCROLL_STEP_X, 0),
            MouseEventKind::ScrollRight => self.viewport.scroll_by(SCROLL_STEP_X, 0),
            _ => {}
        }
    }

    /// タッチ開始（タッチ面を持つフロントエンド向けの入口）
    pub fn on_touch_start(&mut self, contacts: &[ContactPoint]) {
        let gesture = self.touch.touch_start(contacts);
        self.apply_gesture(gesture);
    }

    /// タッチ移動
    pub fn on_touch_move(&mut self, contacts: &[ContactPoint]) {
        let gesture = self.touch.touch_move(contacts);
        self.apply_gesture(gesture);
    }

    /// タッチ終了（全接点が離れたとき）
    pub fn on_touch_end(&mut self) {
        let gesture = self.touch.touch_end();
        self.apply_gesture(gesture);
    }

    fn apply_gesture(&mut self, gesture: Option<GestureEvent>) {
        match gesture {
            Some(GestureEvent::PinchStart { distance }) => self.viewport.pinch_start(distance),
            Some(GestureEvent::PinchMove { distance }) => {
                self.viewport.pinch_move(distance);
            }
            Some(GestureEvent::PinchEnd) => self.viewport.pinch_end(),
            Some(GestureEvent::Swipe(direction)) => self.apply_swipe(direction),
            None => {}
        }
    }

    /// スワイプをノード操作へ割り当てる（左=削除、右=子追加）
    fn apply_swipe(&mut self, direction: SwipeDirection) {
        let command = match direction {
            SwipeDirection::Left => Command::DeleteNode,
            SwipeDirection::Right => Command::AddChild,
        };
        let result = self.processor.execute(command);
        self.apply_result(result);
    }

    /// コマンドを実行する
    ///
    /// ミニバッファやビューポートが絡むものはここで処理し、
    /// ツリーに閉じたものはコマンド処理器へ委譲する。
    pub fn dispatch(&mut self, command: Command) {
        let result = match command {
            Command::EditText => {
                let target = self.processor.selection().clone();
                let current = self
                    .processor
                    .map()
                    .find(&target)
                    .map(|n| n.text.clone())
                    .unwrap_or_default();
                self.minibuffer.start_edit_text(target, &current);
                CommandResult::success_no_refresh()
            }
            Command::EditTitle => {
                let current = self.processor.map().root().title.clone();
                self.minibuffer.start_edit_title(&current);
                CommandResult::success_no_refresh()
            }
            Command::ResetMap => {
                self.minibuffer.start_reset_confirm();
                CommandResult::success_no_refresh()
            }
            Command::ExportMarkdown => {
                let suggested = self.suggested_file_name();
                self.minibuffer.start_export(&suggested);
                CommandResult::success_no_refresh()
            }
            Command::ZoomIn => {
                self.viewport.set_zoom(self.viewport.zoom() + KEY_ZOOM_STEP);
                CommandResult::success()
            }
            Command::ZoomOut => {
                self.viewport.set_zoom(self.viewport.zoom() - KEY_ZOOM_STEP);
                CommandResult::success()
            }
            Command::ZoomReset => {
                self.viewport.reset_zoom();
                self.viewport.reset_scroll();
                CommandResult::success()
            }
            Command::ScrollUp => {
                self.viewport.scroll_by(0, -SCROLL_STEP_Y);
                CommandResult::success()
            }
            Command::ScrollDown => {
                self.viewport.scroll_by(0, SCROLL_STEP_Y);
                CommandResult::success()
            }
            Command::ScrollLeft => {
                self.viewport.scroll_by(-SCROLL_STEP_X, 0);
                CommandResult::success()
            }
            Command::ScrollRight => {
                self.viewport.scroll_by(SCROLL_STEP_X, 0);
                CommandResult::success()
            }
            other => self.processor.execute(other),
        };

        self.apply_result(result);
    }

    fn apply_result(&mut self, result: CommandResult) {
        if result.should_quit {
            self.running = false;
            return;
        }

        if let Some(message) = result.message {
            if result.success {
                self.minibuffer.show_info(message);
            } else {
                self.minibuffer.show_error(message);
            }
        }

        if result.needs_refresh {
            self.ensure_selection_visible();
        }
    }

    /// 選択ノードが画面内に収まるようスクロールする
    fn ensure_selection_visible(&mut self) {
        let tree_layout = layout_tree(self.processor.map().root(), self.viewport.zoom());
        if let Some(node_box) = tree_layout.find(self.processor.selection()) {
            let (width, height) = self.canvas_size;
            self.viewport.ensure_visible(
                node_box.x,
                node_box.y,
                node_box.width,
                node_box.height,
                width as i32,
                height as i32,
            );
        }
    }

    fn handle_minibuffer_submit(&mut self, mode: MinibufferMode, input: String) {
        match mode {
            MinibufferMode::EditText { target } => {
                // 空入力は元のテキストを保持する（編集キャンセル相当）
                let trimmed = input.trim();
                if !trimmed.is_empty() {
                    let result = self.processor.apply_text_edit(&target, trimmed);
                    self.apply_result(result);
                }
            }
            MinibufferMode::EditTitle => {
                let trimmed = input.trim();
                if !trimmed.is_empty() {
                    let result = self.processor.apply_title_edit(trimmed);
                    self.apply_result(result);
                }
            }
            MinibufferMode::ExportPath => match self.export_to(&input) {
                Ok(path) => {
                    self.logger
                        .log_info(format!("書き出しました: {}", path.display()), Some("export"));
                    self.minibuffer
                        .show_info(format!("書き出しました: {}", path.display()));
                }
                Err(err) => {
                    self.minibuffer.show_error(format!("書き出しエラー: {}", err));
                }
            },
            MinibufferMode::ResetConfirm => {
                let result = self.processor.reset_map();
                self.viewport.reset_scroll();
                self.apply_result(result);
            }
            _ => {}
        }
    }

    /// エクスポート文書を指定先へ書き出し、実際のパスを返す
    pub fn export_to(&self, input_path: &str) -> Result<PathBuf> {
        let path = file::expand_export_path(input_path)?;
        let document = self.processor.export_markdown();
        file::write_export(&path, &document)?;
        Ok(path)
    }

    /// ルートタイトルから提案されるエクスポートファイル名
    pub fn suggested_file_name(&self) -> String {
        file::suggested_file_name(display_title(self.processor.map().root()))
    }

    /// コマンド処理器への参照（テスト用途）
    pub fn processor(&self) -> &CommandProcessor {
        &self.processor
    }

    /// ビューポートへの参照（テスト用途）
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// ミニバッファへの参照（テスト用途）
    pub fn minibuffer(&self) -> &Minibuffer {
        &self.minibuffer
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
    }
}
