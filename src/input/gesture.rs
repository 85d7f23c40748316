//! タッチジェスチャー認識
//!
//! 生のタッチ接点列からスワイプとピンチを判定する。端末入力には
//! タッチイベントが無いため、タッチ面を持つフロントエンドから
//! `App::on_touch_*` 経由で呼び出されることを想定した純粋なロジック。

/// スワイプと判定する最小の水平移動距離
pub const MIN_SWIPE_DISTANCE: f64 = 50.0;

/// タッチ接点の座標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub x: f64,
    pub y: f64,
}

impl ContactPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 2点間のユークリッド距離
    pub fn distance_to(&self, other: &ContactPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// スワイプの向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// 左スワイプ（選択ノードの削除に割り当て）
    Left,
    /// 右スワイプ（子ノードの追加に割り当て）
    Right,
}

/// 1本指スワイプの追跡
///
/// 一時状態はジェスチャー終了のたびにリセットする。指を動かさない
/// タップはスワイプとして扱わない。
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    touch_start_x: f64,
    touch_end_x: f64,
    has_moved: bool,
    min_distance: f64,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_min_distance(MIN_SWIPE_DISTANCE)
    }

    /// しきい値を指定して作成（テスト向け）
    pub fn with_min_distance(min_distance: f64) -> Self {
        Self {
            touch_start_x: 0.0,
            touch_end_x: 0.0,
            has_moved: false,
            min_distance,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = x;
        self.touch_end_x = x;
        self.has_moved = false;
    }

    pub fn touch_move(&mut self, x: f64) {
        self.touch_end_x = x;
        self.has_moved = true;
    }

    /// ジェスチャー終了。スワイプが成立した場合のみ向きを返す。
    pub fn touch_end(&mut self) -> Option<SwipeDirection> {
        let result = if self.has_moved {
            let swipe_distance = self.touch_start_x - self.touch_end_x;
            if swipe_distance > self.min_distance {
                Some(SwipeDirection::Left)
            } else if swipe_distance < -self.min_distance {
                Some(SwipeDirection::Right)
            } else {
                None
            }
        } else {
            // タップはスワイプ判定をスキップ
            None
        };

        self.reset();
        result
    }

    fn reset(&mut self) {
        self.touch_start_x = 0.0;
        self.touch_end_x = 0.0;
        self.has_moved = false;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// 接点列から組み立てられたジェスチャーイベント
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// 2本指ピンチの開始（2点間距離）
    PinchStart { distance: f64 },
    /// ピンチ中の距離更新
    PinchMove { distance: f64 },
    /// ピンチの終了
    PinchEnd,
    /// 1本指スワイプの成立
    Swipe(SwipeDirection),
}

/// 接点数に応じてスワイプとピンチへ振り分けるディスパッチャ
///
/// 2接点が現れた時点でピンチに切り替え、そのジェスチャーが終わるまで
/// スワイプ判定は行わない。
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    swipe: SwipeTracker,
    pinching: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self {
            swipe: SwipeTracker::new(),
            pinching: false,
        }
    }

    /// タッチ開始
    pub fn touch_start(&mut self, contacts: &[ContactPoint]) -> Option<GestureEvent> {
        match contacts {
            [a, b, ..] => {
                self.pinching = true;
                Some(GestureEvent::PinchStart {
                    distance: a.distance_to(b),
                })
            }
            [single] => {
                self.swipe.touch_start(single.x);
                None
            }
            [] => None,
        }
    }

    /// タッチ移動
    pub fn touch_move(&mut self, contacts: &[ContactPoint]) -> Option<GestureEvent> {
        match contacts {
            [a, b, ..] if self.pinching => Some(GestureEvent::PinchMove {
                distance: a.distance_to(b),
            }),
            [a, b, ..] => {
                // 開始イベントを取り逃した場合はここからピンチ扱いにする
                self.pinching = true;
                Some(GestureEvent::PinchStart {
                    distance: a.distance_to(b),
                })
            }
            [single] if !self.pinching => {
                self.swipe.touch_move(single.x);
                None
            }
            _ => None,
        }
    }

    /// タッチ終了（全接点が離れたとき）
    pub fn touch_end(&mut self) -> Option<GestureEvent> {
        if self.pinching {
            self.pinching = false;
            self.swipe = SwipeTracker::new();
            return Some(GestureEvent::PinchEnd);
        }

        self.swipe.touch_end().map(GestureEvent::Swipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_left_detection() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(200.0);
        tracker.touch_move(100.0);
        assert_eq!(tracker.touch_end(), Some(SwipeDirection::Left));
    }

    #[test]
    fn test_swipe_right_detection() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(100.0);
        tracker.touch_move(180.0);
        assert_eq!(tracker.touch_end(), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_tap_is_not_a_swipe() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(100.0);
        // move なしで終了
        assert_eq!(tracker.touch_end(), None);
    }

    #[test]
    fn test_short_movement_is_not_a_swipe() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(100.0);
        tracker.touch_move(130.0); // 50 未満
        assert_eq!(tracker.touch_end(), None);
    }

    #[test]
    fn test_tracker_resets_between_gestures() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(200.0);
        tracker.touch_move(100.0);
        tracker.touch_end();

        // 前回の移動が次のジェスチャーに漏れない
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(), None);
    }

    #[test]
    fn test_two_contacts_dispatch_to_pinch() {
        let mut tracker = TouchTracker::new();
        let a = ContactPoint::new(0.0, 0.0);
        let b = ContactPoint::new(60.0, 80.0);

        let started = tracker.touch_start(&[a, b]);
        assert_eq!(started, Some(GestureEvent::PinchStart { distance: 100.0 }));

        let moved = tracker.touch_move(&[a, ContactPoint::new(30.0, 40.0)]);
        assert_eq!(moved, Some(GestureEvent::PinchMove { distance: 50.0 }));

        assert_eq!(tracker.touch_end(), Some(GestureEvent::PinchEnd));
    }

    #[test]
    fn test_single_contact_dispatches_to_swipe() {
        let mut tracker = TouchTracker::new();
        tracker.touch_start(&[ContactPoint::new(300.0, 10.0)]);
        tracker.touch_move(&[ContactPoint::new(100.0, 12.0)]);

        assert_eq!(
            tracker.touch_end(),
            Some(GestureEvent::Swipe(SwipeDirection::Left))
        );
    }

    #[test]
    fn test_pinch_suppresses_swipe() {
        let mut tracker = TouchTracker::new();
        let a = ContactPoint::new(0.0, 0.0);
        let b = ContactPoint::new(100.0, 0.0);

        tracker.touch_start(&[a, b]);
        tracker.touch_move(&[a, ContactPoint::new(200.0, 0.0)]);

        // ピンチ終了後にスワイプは発火しない
        assert_eq!(tracker.touch_end(), Some(GestureEvent::PinchEnd));
        assert_eq!(tracker.touch_end(), None);
    }
}
