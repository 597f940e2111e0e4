//! The interactive shell: the client's navigation surface.
//!
//! Commands mirror the application's pages: register, login, browse, create
//! and join. Auth-gated commands redirect unauthenticated users to login and
//! remember the intended destination, which a successful login resumes.

use std::sync::Arc;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::client::auth::{Destination, SessionContext};
use crate::client::bootstrap::{BootstrapError, open_room};
use crate::client::command::{ShellCommand, parse_shell_command};
use crate::client::formatter::MessageFormatter;
use crate::client::session::{SessionEnd, run_room_session};
use crate::domain::{AuthToken, Identity, RoomId};
use crate::infrastructure::api::{ApiError, HttpApi, RoomsApi};
use crate::infrastructure::dto::http::{CreateRoomRequest, LoginRequest, RegisterRequest};

/// Connection endpoints of the backend service
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the HTTP API (e.g. `http://127.0.0.1:8080/api/v1`)
    pub api_url: String,
    /// URL of the real-time channel (e.g. `ws://127.0.0.1:8080/ws`)
    pub ws_url: String,
}

/// Run the interactive watch-party client
pub async fn run_client(options: ClientOptions) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Arc::new(SessionContext::new());
    let api: Arc<dyn RoomsApi> = Arc::new(HttpApi::new(options.api_url, ctx.clone()));

    println!("Welcome to the watch party. Type /help for commands.");

    // Readline runs on a dedicated thread; lines arrive over a channel so
    // the shell and any joined room share one input stream.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        rl.add_history_entry(&line).ok();
                        if input_tx.send(line).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    while let Some(line) = input_rx.recv().await {
        match parse_shell_command(&line) {
            ShellCommand::Register {
                username,
                email,
                password,
                confirm_password,
            } => {
                if password != confirm_password {
                    println!("Passwords do not match.");
                    continue;
                }
                let request = RegisterRequest {
                    username,
                    email,
                    password,
                    confirm_password,
                };
                match api.register(request).await {
                    Ok(()) => println!("Registration successful. /login to continue."),
                    Err(ApiError::Rejected { message, .. }) => println!("{}", message),
                    Err(e) => {
                        tracing::error!("Registration failed: {}", e);
                        println!("Registration failed.");
                    }
                }
            }

            ShellCommand::Login { email, password } => {
                match api.login(LoginRequest { email, password }).await {
                    Ok(response) => {
                        let Ok(token) = AuthToken::new(response.token) else {
                            println!("Login failed.");
                            continue;
                        };
                        let identity: Identity = response.user.into();
                        println!("Logged in as {}.", identity.username);
                        ctx.login(identity, token);

                        // Resume where the user was heading before login
                        if let Some(Destination::Room(room_id)) = ctx.take_destination()
                            && join_room(api.as_ref(), &ctx, &options.ws_url, room_id, &mut input_rx)
                                .await
                        {
                            break;
                        }
                    }
                    Err(ApiError::Rejected { message, .. }) => println!("{}", message),
                    Err(e) => {
                        tracing::error!("Login failed: {}", e);
                        println!("Login failed.");
                    }
                }
            }

            ShellCommand::Logout => {
                ctx.logout();
                println!("Logged out.");
            }

            ShellCommand::Profile => match ctx.identity() {
                Some(identity) => {
                    println!("{} <{}>", identity.username, identity.email);
                }
                None => println!("Not logged in."),
            },

            ShellCommand::Browse => match api.active_rooms().await {
                Ok(active) => print!("{}", MessageFormatter::format_active_rooms(&active.rooms)),
                Err(e) => {
                    tracing::warn!("Failed to fetch active rooms: {}", e);
                    println!("Could not fetch active rooms.");
                }
            },

            ShellCommand::Create { name, video_url } => {
                if !ctx.is_authenticated() {
                    ctx.remember_destination(Destination::Dashboard);
                    println!("Please /login first.");
                    continue;
                }
                match api.create_room(CreateRoomRequest { name, video_url }).await {
                    Ok(created) => match RoomId::new(created.room_id) {
                        Ok(room_id) => {
                            println!("Room created.");
                            if join_room(api.as_ref(), &ctx, &options.ws_url, room_id, &mut input_rx)
                                .await
                            {
                                break;
                            }
                        }
                        Err(e) => tracing::error!("Backend returned an invalid room id: {}", e),
                    },
                    Err(ApiError::Unauthorized) => {
                        ctx.logout();
                        ctx.remember_destination(Destination::Dashboard);
                        println!("Your session has expired. Please /login again.");
                    }
                    Err(ApiError::Rejected { message, .. }) => println!("{}", message),
                    Err(e) => {
                        tracing::error!("Failed to create room: {}", e);
                        println!("Failed to create room.");
                    }
                }
            }

            ShellCommand::Join { room_id } => {
                let room_id = match RoomId::new(room_id) {
                    Ok(room_id) => room_id,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                if !ctx.is_authenticated() {
                    ctx.remember_destination(Destination::Room(room_id));
                    println!("Please /login first; you will be taken to the room afterwards.");
                    continue;
                }
                if join_room(api.as_ref(), &ctx, &options.ws_url, room_id, &mut input_rx).await {
                    break;
                }
            }

            ShellCommand::Help => print_help(),

            ShellCommand::Quit => break,

            ShellCommand::Unknown(input) => {
                println!("Unknown command: {} (try /help)", input);
            }
        }
    }

    Ok(())
}

/// Bootstrap and run one room session. Returns `true` when the user quit the
/// client from inside the room.
async fn join_room(
    api: &dyn RoomsApi,
    ctx: &SessionContext,
    ws_url: &str,
    room_id: RoomId,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> bool {
    match open_room(api, ctx, ws_url, &room_id).await {
        Ok((session, channel)) => match run_room_session(session, channel, api, input_rx).await {
            SessionEnd::Quit => true,
            SessionEnd::Left => {
                println!("Left the room.");
                false
            }
            SessionEnd::ConnectionClosed => {
                // No automatic reconnection; back to the shell
                println!("Connection to the room was lost.");
                false
            }
        },
        Err(BootstrapError::Unauthorized { destination }) => {
            ctx.logout();
            println!(
                "Your session has expired. /login to continue to {}.",
                destination.to_path()
            );
            ctx.remember_destination(destination);
            false
        }
        Err(e) => {
            tracing::error!("Failed to open room '{}': {}", room_id.as_str(), e);
            println!("Could not open the room.");
            false
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /register <username> <email> <password> <confirm>");
    println!("  /login <email> <password>");
    println!("  /logout");
    println!("  /profile");
    println!("  /browse");
    println!("  /create <name...> <video-url>");
    println!("  /join <room-id>");
    println!("  /quit");
    println!("In a room: type to chat, or /play, /pause, /seek <secs>, /leave, /quit");
}
