//! ビューポート管理
//!
//! キャンバスの拡大率とスクロール位置を管理する。拡大率はホイールと
//! ピンチの2系統から更新され、どちらの経路も常に最新の値を起点にする。

/// 拡大率の下限
pub const MIN_ZOOM: f64 = 0.1;
/// 拡大率の上限
pub const MAX_ZOOM: f64 = 5.0;
/// 初期拡大率
pub const DEFAULT_ZOOM: f64 = 0.8;
/// ホイール1単位あたりの拡大率変化
pub const WHEEL_ZOOM_STEP: f64 = 0.01;

/// 値を [MIN_ZOOM, MAX_ZOOM] に収める
fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// ピンチ追跡の一時状態
///
/// `initial_distance == 0.0` を番兵とし、開始前の move イベントを無視する。
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchState {
    initial_distance: f64,
    initial_zoom: f64,
}

impl PinchState {
    fn idle() -> Self {
        Self {
            initial_distance: 0.0,
            initial_zoom: DEFAULT_ZOOM,
        }
    }

    fn is_active(&self) -> bool {
        self.initial_distance > 0.0
    }
}

/// ビューポート
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// 現在の拡大率
    zoom: f64,
    /// キャンバス座標での水平スクロール量
    scroll_x: i32,
    /// キャンバス座標での垂直スクロール量
    scroll_y: i32,
    /// ピンチ追跡状態
    pinch: PinchState,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            scroll_x: 0,
            scroll_y: 0,
            pinch: PinchState::idle(),
        }
    }

    /// 現在の拡大率
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// 拡大率を直接設定（クランプ付き）
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = clamp_zoom(zoom);
        }
    }

    /// 拡大率を初期値に戻す
    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    /// ホイールによる拡大率更新
    ///
    /// 精密スクロール修飾（Ctrl相当）が立っているときだけ処理し、
    /// 処理した場合は true を返す。呼び出し側はそのイベントを
    /// スクロールへ回してはならない。
    pub fn handle_wheel(&mut self, delta_y: f64, precision: bool) -> bool {
        if !precision || !delta_y.is_finite() {
            return false;
        }

        let delta = -delta_y * WHEEL_ZOOM_STEP;
        self.zoom = clamp_zoom(self.zoom + delta);
        true
    }

    /// ピンチ開始：2点間距離とその時点の拡大率を記録
    ///
    /// 拡大率はクロージャに閉じ込めた値ではなく現在値を読む。ホイール側が
    /// 直前に更新した値をそのまま起点にするため。
    pub fn pinch_start(&mut self, distance: f64) {
        if !distance.is_finite() || distance <= 0.0 {
            self.pinch = PinchState::idle();
            return;
        }
        self.pinch = PinchState {
            initial_distance: distance,
            initial_zoom: self.zoom,
        };
    }

    /// ピンチ移動：距離比で拡大率を更新
    ///
    /// 開始前（番兵状態）や退化した距離では何もしない。
    pub fn pinch_move(&mut self, distance: f64) -> bool {
        if !self.pinch.is_active() {
            return false;
        }
        if !distance.is_finite() || distance <= 0.0 {
            return false;
        }

        let scale = distance / self.pinch.initial_distance;
        if !scale.is_finite() {
            return false;
        }

        self.zoom = clamp_zoom(self.pinch.initial_zoom * scale);
        true
    }

    /// ピンチ終了：番兵状態に戻し、迷子の move イベントを無視できるようにする
    pub fn pinch_end(&mut self) {
        self.pinch = PinchState::idle();
    }

    /// ピンチ追跡中か
    pub fn pinch_active(&self) -> bool {
        self.pinch.is_active()
    }

    /// スクロール量
    pub fn scroll(&self) -> (i32, i32) {
        (self.scroll_x, self.scroll_y)
    }

    /// 相対スクロール
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_x = (self.scroll_x + dx).max(0);
        self.scroll_y = (self.scroll_y + dy).max(0);
    }

    /// スクロールを原点に戻す
    pub fn reset_scroll(&mut self) {
        self.scroll_x = 0;
        self.scroll_y = 0;
    }

    /// 指定矩形が表示域に収まるようスクロールする
    ///
    /// 矩形はキャンバス座標。戻り値はスクロールが発生したかどうか。
    pub fn ensure_visible(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        view_width: i32,
        view_height: i32,
    ) -> bool {
        let mut moved = false;

        if x < self.scroll_x {
            self.scroll_x = x.max(0);
            moved = true;
        } else if x + width > self.scroll_x + view_width {
            self.scroll_x = (x + width - view_width).max(0);
            moved = true;
        }

        if y < self.scroll_y {
            self.scroll_y = y.max(0);
            moved = true;
        } else if y + height > self.scroll_y + view_height {
            self.scroll_y = (y + height - view_height).max(0);
            moved = true;
        }

        moved
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
