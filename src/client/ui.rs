//! UI utilities for the interactive shell.

use std::io::Write;

/// Redisplay the prompt after asynchronous output interrupted it
pub fn redisplay_prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}
