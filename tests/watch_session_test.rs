//! Integration tests for the watch-party client against an in-process stub
//! backend: HTTP bootstrap endpoints plus a WebSocket channel that echoes
//! chat and forwards pushed playback events.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::sync::{Mutex, broadcast};

use watch_party_rs::client::auth::{Destination, SessionContext};
use watch_party_rs::client::bootstrap::{BootstrapError, open_room};
use watch_party_rs::client::chat::Alignment;
use watch_party_rs::client::watch::Update;
use watch_party_rs::domain::{AuthToken, Identity, PlaybackCommand, PlayerState, RoomId, Username};
use watch_party_rs::infrastructure::api::{HttpApi, RoomsApi};
use watch_party_rs::infrastructure::dto::http::LoginRequest;

const TEST_TOKEN: &str = "test-token";

/// Stub backend state shared by HTTP handlers and WebSocket sessions
struct StubState {
    /// Raw frames received from clients, in arrival order
    received: Mutex<Vec<String>>,
    /// Frames the test pushes to every connected client
    push: broadcast::Sender<String>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(&format!("Bearer {}", TEST_TOKEN))
}

async fn login_handler() -> Json<Value> {
    Json(json!({
        "token": TEST_TOKEN,
        "user": {"id": "u-1", "username": "alice", "email": "alice@example.com"}
    }))
}

async fn active_rooms_handler(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(
        json!({"rooms": [{"roomId": "room-1", "name": "movie night", "usersOnline": 1}]}),
    ))
}

async fn room_detail_handler(
    Path(_room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({"name": "movie night", "videoId": "vid-1"})))
}

async fn room_messages_handler(
    Path(_room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        {"username": "bob", "message": "hi", "createdAt": 1000}
    ])))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, StatusCode> {
    if params.get("token").map(String::as_str) != Some(TEST_TOKEN) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state)))
}

async fn handle_socket(socket: WebSocket, state: Arc<StubState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut push_rx = state.push.subscribe();

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    state.received.lock().await.push(text.to_string());

                    let Ok(frame) = serde_json::from_str::<Value>(&text) else {
                        continue;
                    };
                    match frame["event"].as_str() {
                        Some("joinRoom") => {
                            let count =
                                json!({"event": "room:usersUpdate", "data": {"count": 1}});
                            if sender
                                .send(Message::Text(count.to_string().into()))
                                .await
                                .is_err()
                            {
                                break;
                            }
                            let notice = json!({
                                "event": "room:systemMessage",
                                "data": {"message": "alice joined the room", "timestamp": 2000}
                            });
                            if sender
                                .send(Message::Text(notice.to_string().into()))
                                .await
                                .is_err()
                            {
                                break;
                            }
                        }
                        Some("chat:message") => {
                            // Echo to the room, sender included
                            let echo = json!({
                                "event": "chat:message",
                                "data": {
                                    "username": frame["data"]["username"],
                                    "message": frame["data"]["message"],
                                    "timestamp": 3000
                                }
                            });
                            if sender
                                .send(Message::Text(echo.to_string().into()))
                                .await
                                .is_err()
                            {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },

            pushed = push_rx.recv() => {
                if let Ok(frame) = pushed
                    && sender.send(Message::Text(frame.into())).await.is_err()
                {
                    break;
                }
            }
        }
    }
}

/// Start the stub backend on an ephemeral port
async fn start_stub() -> (Arc<StubState>, String, String) {
    let (push, _) = broadcast::channel(16);
    let state = Arc::new(StubState {
        received: Mutex::new(Vec::new()),
        push,
    });

    let app = Router::new()
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/rooms/active", get(active_rooms_handler))
        .route("/api/v1/rooms/{room_id}", get(room_detail_handler))
        .route("/api/v1/rooms/{room_id}/messages", get(room_messages_handler))
        .route("/ws", get(ws_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend died");
    });

    (
        state,
        format!("http://{}/api/v1", addr),
        format!("ws://{}/ws", addr),
    )
}

fn alice() -> Identity {
    Identity {
        id: "u-1".to_string(),
        username: Username::new("alice".to_string()).unwrap(),
        email: "alice@example.com".to_string(),
    }
}

fn token(value: &str) -> AuthToken {
    AuthToken::new(value.to_string()).unwrap()
}

fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

fn authed_context() -> Arc<SessionContext> {
    let ctx = Arc::new(SessionContext::new());
    ctx.login(alice(), token(TEST_TOKEN));
    ctx
}

#[tokio::test]
async fn test_bootstrap_join_and_chat_echo() {
    // テスト項目: ブートストラップ後の入室、エコー受信によるチャット追加までの一連の流れ
    // given (前提条件):
    let (_state, api_url, ws_url) = start_stub().await;
    let ctx = authed_context();
    let api = HttpApi::new(api_url, ctx.clone());

    // when (操作): ルームを開く
    let (mut session, mut channel) = open_room(&api, &ctx, &ws_url, &room_id("room-1"))
        .await
        .expect("open_room failed");

    // then (期待する結果): 履歴が先に読み込まれている
    assert_eq!(session.room().name, "movie night");
    assert_eq!(session.chat().log().len(), 1);

    // joinRoom への応答として視聴者数とシステム通知が届く
    let event = channel.next_event().await.unwrap().unwrap();
    assert_eq!(session.handle_event(event), Some(Update::Viewers(1)));
    assert_eq!(session.viewers(), 1);

    let event = channel.next_event().await.unwrap().unwrap();
    let update = session.handle_event(event).expect("expected an update");
    assert!(matches!(update, Update::Message(_)));
    assert!(session.chat().log()[1].is_system());

    // when (操作): メッセージを送信し、エコーを受信する
    session.chat_mut().set_compose("hello");
    let outbound = session.chat_mut().send().expect("expected outbound event");
    assert_eq!(session.chat().log().len(), 2); // まだ追加されない
    channel.send(&outbound).await.expect("send failed");

    let event = channel.next_event().await.unwrap().unwrap();
    let update = session.handle_event(event).expect("expected an update");

    // then (期待する結果): エコー受信で 1 件だけ追加され、右寄せで表示される
    assert!(matches!(update, Update::Message(_)));
    assert_eq!(session.chat().log().len(), 3);
    let entry = session.chat().log().last().unwrap().clone();
    assert_eq!(entry.author().map(|a| a.as_str()), Some("alice"));
    assert_eq!(session.chat().alignment(&entry), Alignment::Right);

    session.teardown();
    channel.close().await;
}

#[tokio::test]
async fn test_remote_pause_is_applied_but_never_echoed() {
    // テスト項目: 受信した video:pause が適用され、video:pause が送り返されない
    // given (前提条件):
    let (state, api_url, ws_url) = start_stub().await;
    let ctx = authed_context();
    let api = HttpApi::new(api_url, ctx.clone());
    let (mut session, mut channel) = open_room(&api, &ctx, &ws_url, &room_id("room-1"))
        .await
        .expect("open_room failed");

    // joinRoom への応答を消化しておく
    for _ in 0..2 {
        let event = channel.next_event().await.unwrap().unwrap();
        session.handle_event(event);
    }

    // ローカル操作による video:play は送出される
    session.play();
    for event in session.poll_outbound() {
        channel.send(&event).await.expect("send failed");
    }

    // when (操作): サーバーから video:pause が届く
    let pause = json!({"event": "video:pause", "data": {"roomId": "room-1", "time": 42.5}});
    state.push.send(pause.to_string()).unwrap();

    let event = channel.next_event().await.unwrap().unwrap();
    let update = session.handle_event(event);

    // then (期待する結果): プレイヤーは 42.5 秒で停止し、送信キューは空のまま
    assert_eq!(
        update,
        Some(Update::Playback(PlaybackCommand::Pause { time: 42.5 }))
    );
    assert_eq!(session.player_state(), Some(PlayerState::Paused));
    assert_eq!(session.player_position(), Some(42.5));
    assert!(session.poll_outbound().is_empty());

    // マーカーを往復させ、それまでに届いたフレームを検証する
    session.chat_mut().set_compose("marker");
    let marker = session.chat_mut().send().unwrap();
    channel.send(&marker).await.expect("send failed");
    let _ = channel.next_event().await.unwrap().unwrap();

    let received = state.received.lock().await.clone();
    assert!(received.iter().any(|frame| frame.contains("video:play")));
    assert!(
        !received.iter().any(|frame| frame.contains("video:pause")),
        "remote pause must not be echoed back: {:?}",
        received
    );

    session.teardown();
    channel.close().await;
}

#[tokio::test]
async fn test_unauthorized_bootstrap_redirects_then_login_resumes() {
    // テスト項目: 401 でログインへ誘導され、ログイン成功後に元のルームへ再開できる
    // given (前提条件): 無効なトークンでログイン済みのつもりになっている
    let (_state, api_url, ws_url) = start_stub().await;
    let ctx = Arc::new(SessionContext::new());
    ctx.login(alice(), token("stale-token"));
    let api = HttpApi::new(api_url, ctx.clone());

    // when (操作): ルームを開こうとする
    let result = open_room(&api, &ctx, &ws_url, &room_id("room-7")).await;

    // then (期待する結果): 再開先付きの Unauthorized になる
    let destination = match result {
        Err(BootstrapError::Unauthorized { destination }) => destination,
        Ok(_) => panic!("expected Unauthorized"),
        Err(other) => panic!("expected Unauthorized, got {:?}", other),
    };
    assert_eq!(destination.to_path(), "/watchroom/room-7");

    // ログインへリダイレクトされ、遷移先が記憶される
    ctx.logout();
    ctx.remember_destination(destination);

    // when (操作): 正しい資格情報でログインし直す
    let response = api
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("login failed");
    let identity: Identity = response.user.into();
    ctx.login(identity, token(&response.token));
    let resumed = ctx.take_destination().expect("destination must be resumed");
    assert_eq!(resumed, Destination::Room(room_id("room-7")));

    // then (期待する結果): 再開先のルームを開ける
    let Destination::Room(target) = resumed else {
        panic!("expected a room destination");
    };
    let (session, channel) = open_room(&api, &ctx, &ws_url, &target)
        .await
        .expect("resumed open_room failed");
    assert_eq!(session.room().name, "movie night");
    channel.close().await;
}

#[tokio::test]
async fn test_stale_room_command_after_switching_rooms_is_dropped() {
    // テスト項目: ルーム A から B へ移った後、A 宛ての再生コマンドは適用されない
    // given (前提条件): ルーム A を開いて閉じ、ルーム B に入り直す
    let (state, api_url, ws_url) = start_stub().await;
    let ctx = authed_context();
    let api = HttpApi::new(api_url, ctx.clone());

    let (mut session_a, channel_a) = open_room(&api, &ctx, &ws_url, &room_id("room-a"))
        .await
        .expect("open_room failed");
    session_a.teardown();
    channel_a.close().await;

    let (mut session_b, mut channel_b) = open_room(&api, &ctx, &ws_url, &room_id("room-b"))
        .await
        .expect("open_room failed");
    for _ in 0..2 {
        let event = channel_b.next_event().await.unwrap().unwrap();
        session_b.handle_event(event);
    }

    // when (操作): 遅れて届いたルーム A 宛てのコマンド
    let stale = json!({"event": "video:pause", "data": {"roomId": "room-a", "time": 42.5}});
    state.push.send(stale.to_string()).unwrap();

    let event = channel_b.next_event().await.unwrap().unwrap();
    let update = session_b.handle_event(event);

    // then (期待する結果): 何も適用されない
    assert_eq!(update, None);
    assert_eq!(session_b.player_state(), Some(PlayerState::Paused));
    assert_eq!(session_b.player_position(), Some(0.0));

    session_b.teardown();
    channel_b.close().await;
}
