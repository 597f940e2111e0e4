//! Session bootstrap for a room view.
//!
//! Two ordered fetches — room metadata, then message history — must both
//! resolve before the real-time connection opens, so no inbound event can
//! race against absent room or message state. An unauthorized response on
//! either fetch abandons the session and reports the destination to resume
//! after re-authentication.

use thiserror::Error;

use crate::client::auth::{Destination, SessionContext};
use crate::client::watch::WatchSession;
use crate::domain::{ChatEntry, Room, RoomId};
use crate::infrastructure::api::{ApiError, RoomsApi};
use crate::infrastructure::channel::{ChannelError, EventChannel};
use crate::infrastructure::dto::ws::{ClientEvent, JoinRoomPayload};
use crate::infrastructure::player::HeadlessPlayer;

/// Fetched room state, ready for a session to be built on
#[derive(Debug)]
pub struct RoomBootstrap {
    pub room: Room,
    pub history: Vec<ChatEntry>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Session abandoned; the caller redirects to login and resumes
    /// `destination` afterwards
    #[error("unauthorized; re-authentication required")]
    Unauthorized { destination: Destination },

    /// Any other fetch failure: logged by the caller, the room view simply
    /// does not populate (no retry)
    #[error(transparent)]
    Api(ApiError),

    /// The channel could not be opened or the join announcement failed
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

fn classify(error: ApiError, room_id: &RoomId) -> BootstrapError {
    match error {
        ApiError::Unauthorized => BootstrapError::Unauthorized {
            destination: Destination::Room(room_id.clone()),
        },
        other => BootstrapError::Api(other),
    }
}

/// Perform the two ordered fetches. Metadata strictly before history.
pub async fn fetch_room_state(
    api: &dyn RoomsApi,
    room_id: &RoomId,
) -> Result<RoomBootstrap, BootstrapError> {
    let detail = api.room(room_id).await.map_err(|e| classify(e, room_id))?;

    let records = api
        .room_messages(room_id)
        .await
        .map_err(|e| classify(e, room_id))?;

    let room = Room::from((room_id.clone(), detail));
    let history = records.into_iter().map(ChatEntry::from).collect();

    Ok(RoomBootstrap { room, history })
}

/// Open a full room session: fetches first, then the channel, then the
/// `joinRoom` announcement. The player is constructed here — exactly once —
/// now that the room metadata carries the video identifier.
pub async fn open_room(
    api: &dyn RoomsApi,
    ctx: &SessionContext,
    ws_url: &str,
    room_id: &RoomId,
) -> Result<(WatchSession, EventChannel), BootstrapError> {
    let (Some(identity), Some(token)) = (ctx.identity(), ctx.token()) else {
        return Err(BootstrapError::Unauthorized {
            destination: Destination::Room(room_id.clone()),
        });
    };

    let bootstrap = fetch_room_state(api, room_id).await?;

    let mut channel = EventChannel::connect(ws_url, &token).await?;
    channel
        .send(&ClientEvent::JoinRoom(JoinRoomPayload {
            room_id: room_id.as_str().to_string(),
            username: identity.username.as_str().to_string(),
        }))
        .await?;

    let video = bootstrap.room.video_id.clone();
    let mut session = WatchSession::new(bootstrap.room, identity, bootstrap.history);
    session.attach_player(Box::new(HeadlessPlayer::new(video)));

    Ok((session, channel))
}
