//! Command parsing for the interactive shell.
//!
//! Pure functions without side effects, so the whole navigation surface is
//! testable without a terminal. Two command sets exist: the shell outside a
//! room, and the reduced set while a room is joined (where bare text is a
//! chat message).

/// Commands available at the shell, outside a room
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Register {
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Browse,
    Profile,
    Create {
        name: String,
        video_url: String,
    },
    Join {
        room_id: String,
    },
    Help,
    Quit,
    /// Anything unparseable; the shell answers with a usage hint
    Unknown(String),
}

/// Commands available while a room is joined
#[derive(Debug, Clone, PartialEq)]
pub enum RoomCommand {
    /// Bare text: a chat message
    Chat(String),
    Play,
    Pause,
    Seek(f64),
    Leave,
    Quit,
    Unknown(String),
}

/// Parse one shell input line
pub fn parse_shell_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let mut parts = line.split_whitespace();

    match parts.next() {
        Some("/register") => {
            let args: Vec<&str> = parts.collect();
            match args.as_slice() {
                [username, email, password, confirm_password] => ShellCommand::Register {
                    username: (*username).to_string(),
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                    confirm_password: (*confirm_password).to_string(),
                },
                _ => ShellCommand::Unknown(line.to_string()),
            }
        }
        Some("/login") => {
            let args: Vec<&str> = parts.collect();
            match args.as_slice() {
                [email, password] => ShellCommand::Login {
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                },
                _ => ShellCommand::Unknown(line.to_string()),
            }
        }
        Some("/logout") => ShellCommand::Logout,
        Some("/browse") => ShellCommand::Browse,
        Some("/profile") => ShellCommand::Profile,
        Some("/create") => {
            // `/create <name...> <video-url>`: the last token is the URL,
            // everything before it is the (possibly multi-word) room name
            let args: Vec<&str> = parts.collect();
            match args.as_slice() {
                [] | [_] => ShellCommand::Unknown(line.to_string()),
                [name @ .., video_url] => ShellCommand::Create {
                    name: name.join(" "),
                    video_url: (*video_url).to_string(),
                },
            }
        }
        Some("/join") => match parts.next() {
            Some(room_id) if parts.next().is_none() => ShellCommand::Join {
                room_id: room_id.to_string(),
            },
            _ => ShellCommand::Unknown(line.to_string()),
        },
        Some("/help") => ShellCommand::Help,
        Some("/quit") => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

/// Parse one input line while a room is joined
pub fn parse_room_command(line: &str) -> RoomCommand {
    let trimmed = line.trim();

    if !trimmed.starts_with('/') {
        return RoomCommand::Chat(line.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    match parts.next() {
        Some("/play") => RoomCommand::Play,
        Some("/pause") => RoomCommand::Pause,
        Some("/seek") => match parts.next().map(str::parse::<f64>) {
            Some(Ok(seconds)) if seconds >= 0.0 => RoomCommand::Seek(seconds),
            _ => RoomCommand::Unknown(trimmed.to_string()),
        },
        Some("/leave") => RoomCommand::Leave,
        Some("/quit") => RoomCommand::Quit,
        _ => RoomCommand::Unknown(trimmed.to_string()),
    }
}
