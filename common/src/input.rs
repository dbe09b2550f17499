//! 入力ルーティング
//!
//! キーボード・ポインタ入力をビューア命令に変換する。ビューアが閉じている間は何もしない。

use crate::error::ViewerError;
use crate::viewer::{ViewerCommand, ViewerController, ViewerState, ViewerSurface};

/// キー入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// クリック対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// ビューアの背景そのもの（子要素は含まない）
    Backdrop,
    /// 背景の内側にある要素（スライド・パネルなど）
    Content,
    /// 閉じるボタン
    CloseButton,
}

/// 入力イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Click(PointerTarget),
}

/// 入力ルータ
#[derive(Debug, Clone, Copy, Default)]
pub struct InputRouter;

impl InputRouter {
    /// イベントに対応する命令を返す（閉じている間は常に None）
    pub fn route(state: ViewerState, event: InputEvent) -> Option<ViewerCommand> {
        if !state.is_open() {
            return None;
        }
        match event {
            InputEvent::KeyDown(Key::ArrowLeft) => Some(ViewerCommand::Navigate(-1)),
            InputEvent::KeyDown(Key::ArrowRight) => Some(ViewerCommand::Navigate(1)),
            InputEvent::KeyDown(Key::Escape) => Some(ViewerCommand::Close),
            InputEvent::Click(PointerTarget::Backdrop | PointerTarget::CloseButton) => {
                Some(ViewerCommand::Close)
            }
            InputEvent::KeyDown(Key::Other) | InputEvent::Click(PointerTarget::Content) => None,
        }
    }

    /// イベントをコントローラへ配送する
    ///
    /// # Returns
    /// * `Ok(Some(state))` - 遷移後の状態
    /// * `Ok(None)` - 無視されたイベント
    pub fn dispatch<S: ViewerSurface>(
        controller: &mut ViewerController<S>,
        event: InputEvent,
    ) -> Result<Option<ViewerState>, ViewerError> {
        match Self::route(controller.state(), event) {
            Some(command) => controller.apply(command).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::tests::controller;

    #[test]
    fn test_closed_ignores_everything() {
        let events = [
            InputEvent::KeyDown(Key::ArrowLeft),
            InputEvent::KeyDown(Key::ArrowRight),
            InputEvent::KeyDown(Key::Escape),
            InputEvent::Click(PointerTarget::Backdrop),
            InputEvent::Click(PointerTarget::CloseButton),
        ];
        for event in events {
            assert_eq!(InputRouter::route(ViewerState::Closed, event), None);
        }
    }

    #[test]
    fn test_route_keys() {
        let open = ViewerState::Open { current_index: 0 };
        assert_eq!(
            InputRouter::route(open, InputEvent::KeyDown(Key::ArrowLeft)),
            Some(ViewerCommand::Navigate(-1))
        );
        assert_eq!(
            InputRouter::route(open, InputEvent::KeyDown(Key::ArrowRight)),
            Some(ViewerCommand::Navigate(1))
        );
        assert_eq!(
            InputRouter::route(open, InputEvent::KeyDown(Key::Escape)),
            Some(ViewerCommand::Close)
        );
        assert_eq!(InputRouter::route(open, InputEvent::KeyDown(Key::Other)), None);
    }

    #[test]
    fn test_route_clicks() {
        let open = ViewerState::Open { current_index: 1 };
        assert_eq!(
            InputRouter::route(open, InputEvent::Click(PointerTarget::Backdrop)),
            Some(ViewerCommand::Close)
        );
        // 背景の子要素のクリックでは閉じない
        assert_eq!(InputRouter::route(open, InputEvent::Click(PointerTarget::Content)), None);
    }

    #[test]
    fn test_escape_closes_and_unlocks_scroll() {
        let (mut viewer, log) = controller(3);
        viewer.open(0).unwrap();
        assert!(log.borrow().scroll_locked);

        let state = InputRouter::dispatch(&mut viewer, InputEvent::KeyDown(Key::Escape)).unwrap();
        assert_eq!(state, Some(ViewerState::Closed));
        assert!(!log.borrow().scroll_locked);
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let (mut viewer, _) = controller(3);
        viewer.open(0).unwrap();
        InputRouter::dispatch(&mut viewer, InputEvent::KeyDown(Key::ArrowLeft)).unwrap();
        assert_eq!(viewer.current_index(), Some(2));
        InputRouter::dispatch(&mut viewer, InputEvent::KeyDown(Key::ArrowRight)).unwrap();
        assert_eq!(viewer.current_index(), Some(0));
    }

    #[test]
    fn test_dispatch_ignored_event() {
        let (mut viewer, _) = controller(3);
        assert_eq!(
            InputRouter::dispatch(&mut viewer, InputEvent::KeyDown(Key::Escape)),
            Ok(None)
        );
        viewer.open(1).unwrap();
        assert_eq!(
            InputRouter::dispatch(&mut viewer, InputEvent::Click(PointerTarget::Content)),
            Ok(None)
        );
        assert_eq!(viewer.current_index(), Some(1));
    }
}
