//! Terminal button source: every line on stdin is one press

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{info, warn};

use super::Event;

/// Forward a button press to the engine for each line read from stdin
pub async fn stdin_button_task(events: mpsc::UnboundedSender<Event>) {
    info!("Press Enter to push the watch button");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(_)) => {
                if events.send(Event::Button(None)).is_err() {
                    info!("Engine stopped, no longer reading button presses");
                    break;
                }
            }
            Ok(None) => {
                info!("stdin closed, no longer reading button presses");
                break;
            }
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        }
    }
}
