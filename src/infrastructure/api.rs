//! HTTP API ゲートウェイ
//!
//! ## 責務
//!
//! - バックエンドの request/response API への唯一の窓口
//! - Bearer トークンの付与（リクエスト毎に資格情報を参照）
//! - ステータスコードのエラー分類（401 → Unauthorized）
//!
//! ## 設計ノート
//!
//! クライアント層は [`RoomsApi`] trait にのみ依存し、reqwest を使った実装
//! （[`HttpApi`]）には依存しません（依存性の逆転）。資格情報は
//! [`CredentialSource`] 経由で毎リクエスト読み直すため、ログイン直後から
//! 以降のリクエストに反映されます。

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{AuthToken, RoomId};
use crate::infrastructure::dto::http::{
    ActiveRooms, CreateRoomRequest, CreatedRoom, ErrorBody, LoginRequest, LoginResponse,
    MessageRecord, RegisterRequest, RoomDetailDto,
};

/// HTTP API のエラー分類
#[derive(Debug, Error)]
pub enum ApiError {
    /// 認証エラー（401）。呼び出し側はログイン画面へ誘導する
    #[error("unauthorized")]
    Unauthorized,

    /// バックエンドがリクエストを拒否した（バリデーションエラーなど）
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// ネットワーク・デコードなどの transport エラー
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// リクエスト毎に参照される資格情報の供給元
///
/// [`crate::client::auth::SessionContext`] が実装します。
pub trait CredentialSource: Send + Sync {
    /// 現在の Bearer トークン。未ログインなら `None`
    fn token(&self) -> Option<AuthToken>;
}

/// バックエンドの request/response API
///
/// クライアント層が必要とするインターフェースをクライアント側が定義し、
/// 具体的な実装（reqwest / テスト用モック）を注入します。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomsApi: Send + Sync {
    /// `POST /auth/register`
    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError>;

    /// `POST /auth/login`
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /rooms`
    async fn create_room(&self, request: CreateRoomRequest) -> Result<CreatedRoom, ApiError>;

    /// `GET /rooms/active`
    async fn active_rooms(&self) -> Result<ActiveRooms, ApiError>;

    /// `GET /rooms/:id`
    async fn room(&self, room_id: &RoomId) -> Result<RoomDetailDto, ApiError>;

    /// `GET /rooms/:id/messages`
    async fn room_messages(&self, room_id: &RoomId) -> Result<Vec<MessageRecord>, ApiError>;
}

/// reqwest を使った RoomsApi 実装
pub struct HttpApi {
    /// ベース URL（例: `https://example.com/api/v1`、末尾スラッシュなし）
    base_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialSource>,
}

impl HttpApi {
    /// 新しい HttpApi を作成
    pub fn new(base_url: String, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 資格情報があれば Bearer ヘッダーを付与する
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.token() {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// ステータスコードを分類し、成功レスポンスのみ返す
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RoomsApi for HttpApi {
    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_room(&self, request: CreateRoomRequest) -> Result<CreatedRoom, ApiError> {
        let response = self
            .authed(self.http.post(self.url("/rooms")))
            .json(&request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn active_rooms(&self) -> Result<ActiveRooms, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/rooms/active")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn room(&self, room_id: &RoomId) -> Result<RoomDetailDto, ApiError> {
        let response = self
            .authed(
                self.http
                    .get(self.url(&format!("/rooms/{}", room_id.as_str()))),
            )
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn room_messages(&self, room_id: &RoomId) -> Result<Vec<MessageRecord>, ApiError> {
        let response = self
            .authed(
                self.http
                    .get(self.url(&format!("/rooms/{}/messages", room_id.as_str()))),
            )
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
