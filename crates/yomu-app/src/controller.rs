use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yomu_types::AppEvent;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::output::output_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_output: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            input_to_app: kanal::bounded_async(capacity),
            app_to_output: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, channel_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(channel_capacity.max(1)),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<R, W>(&self, input: R, output: W) -> JoinSet<anyhow::Result<()>>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop; a shutdown event cancels every task
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_output.0.clone(),
            self.cancel_token.clone(),
        ));

        // Output loop
        tasks.spawn(output_loop(
            self.state.clone(),
            self.channels.app_to_output.1.clone(),
            output,
            self.cancel_token.child_token(),
        ));

        // Input watcher
        tasks.spawn(watcher_io(
            self.state.clone(),
            input,
            self.cancel_token.child_token(),
            self.channels.input_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
