//! ヘッドレスな Player 実装
//!
//! ## 責務
//!
//! - 埋め込みプレイヤーの再生状態（再生位置・再生/停止）の保持
//! - 状態遷移通知のキューイング（プレイヤーのコールバックの代替）
//!
//! ## 設計ノート
//!
//! 実際の映像デコードは行わず、再生位置はコマンド（seek）によってのみ
//! 変化します。スクラブ（seek）はプレイヤーの挙動に合わせて Buffering →
//! 元の再生状態の 2 つの遷移を通知します。既に同じ状態にある play/pause
//! は遷移を発生させません（実プレイヤーも発火しない）。

use crate::domain::{Player, PlayerState, PlayerTransition, VideoId};

/// 映像出力を持たない Player 実装
///
/// ルームのメタデータ取得後に一度だけ生成されます。
pub struct HeadlessPlayer {
    video_id: VideoId,
    /// 静止状態としては Playing / Paused のみを取る
    state: PlayerState,
    position: f64,
    /// まだ取り出されていない状態遷移通知
    transitions: Vec<PlayerTransition>,
}

impl HeadlessPlayer {
    /// 指定された動画に対するプレイヤーを生成
    pub fn new(video_id: VideoId) -> Self {
        tracing::info!("Player ready for video '{}'", video_id.as_str());
        Self {
            video_id,
            state: PlayerState::Paused,
            position: 0.0,
            transitions: Vec::new(),
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    fn notify(&mut self, state: PlayerState) {
        self.transitions.push(PlayerTransition {
            state,
            position: self.position,
        });
    }
}

impl Player for HeadlessPlayer {
    fn play(&mut self) {
        if self.state != PlayerState::Playing {
            self.state = PlayerState::Playing;
            self.notify(PlayerState::Playing);
        }
    }

    fn pause(&mut self) {
        if self.state != PlayerState::Paused {
            self.state = PlayerState::Paused;
            self.notify(PlayerState::Paused);
        }
    }

    fn seek_to(&mut self, seconds: f64) {
        let resume = self.state;
        self.position = seconds;
        self.notify(PlayerState::Buffering);
        self.notify(resume);
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn take_transitions(&mut self) -> Vec<PlayerTransition> {
        std::mem::take(&mut self.transitions)
    }
}
