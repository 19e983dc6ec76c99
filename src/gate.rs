//! Start button: extraction waits until a human says the page is ready.
//!
//! The button lives in the page and flips a page-global flag when clicked. This side
//! only ever reads the flag, so the two tasks touching the page share no state here.

use core::time::Duration;
use std::sync::Arc;

use tokio::{task::JoinHandle, time::Instant};

/// Page-global flag set by the start button.
pub const FLAG: &str = "__jobfeedShouldStart";
pub const BUTTON_ID: &str = "jobfeed-start";

/// Installs the start button unless one is already there.
///
/// The flag is only initialized when absent, so a re-install after the feed re-rendered
/// never un-presses the button; if it was already pressed the new button shows progress.
pub const INSTALL_SCRIPT: &str = r"(() => {
    if (document.getElementById('jobfeed-start')) return 'present';
    if (!document.body) return 'no-body';
    if (window.__jobfeedShouldStart !== true) window.__jobfeedShouldStart = false;

    const btn = document.createElement('button');
    btn.id = 'jobfeed-start';
    Object.assign(btn.style, {
        position: 'fixed', top: '20px', right: '20px', zIndex: '99999',
        padding: '15px 25px', border: 'none', borderRadius: '5px',
        color: 'white', fontSize: '18px', fontWeight: 'bold', cursor: 'pointer',
        boxShadow: '0 4px 15px rgba(0,0,0,0.3)',
    });
    const busy = () => {
        btn.innerText = '⏳ Extracting jobs...';
        btn.style.backgroundColor = '#666';
        btn.disabled = true;
    };
    if (window.__jobfeedShouldStart === true) {
        busy();
    } else {
        btn.innerText = '⚡ Extract visible jobs';
        btn.style.backgroundColor = '#14a800';
        btn.onclick = () => { busy(); window.__jobfeedShouldStart = true; };
    }
    document.body.appendChild(btn);
    return 'installed';
})()";

pub const PROBE_SCRIPT: &str = "window.__jobfeedShouldStart === true";

/// What the gate needs from the page.
pub trait GateSurface: Send + Sync + 'static {
    /// Puts the start button on the page; a no-op when it is already there.
    fn install(&self) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Whether the button has been pressed. May fail while the page is navigating.
    fn is_triggered(&self) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn is_closed(&self) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    pub poll_interval: Duration,
    pub reassert_interval: Duration,
    /// `None` waits for as long as the operator needs.
    pub max_wait: Option<Duration>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            reassert_interval: Duration::from_secs(2),
            max_wait: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    /// Final for the run.
    Triggered,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    #[error("start button not pressed within {0:?}")]
    TimedOut(Duration),
    #[error("page was closed before the start button was pressed")]
    SurfaceClosed,
}

pub struct StartGate<S> {
    surface: Arc<S>,
    config: GateConfig,
    state: GateState,
}

impl<S: GateSurface> StartGate<S> {
    pub const fn new(surface: Arc<S>, config: GateConfig) -> Self {
        Self {
            surface,
            config,
            state: GateState::Waiting,
        }
    }

    #[inline]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Keeps the button on the page in the background until the page is closed.
    pub fn reassert(&self) -> JoinHandle<()> {
        spawn_reasserter(self.surface.clone(), self.config.reassert_interval)
    }

    /// Blocks until the button is pressed.
    ///
    /// Failed reads are retried on the next tick; only a closed page or an exhausted
    /// `max_wait` end the wait early.
    pub async fn wait(&mut self) -> Result<(), GateError> {
        if self.state == GateState::Triggered {
            return Ok(());
        }

        let start = Instant::now();
        loop {
            match self.surface.is_triggered().await {
                Ok(true) => {
                    self.state = GateState::Triggered;
                    tracing::info!(target: "gate", "\x1b[32mstart button pressed\x1b[0m");
                    return Ok(());
                }
                Ok(false) => (),
                Err(e) => {
                    if self.surface.is_closed().await {
                        return Err(GateError::SurfaceClosed);
                    }
                    tracing::debug!(target: "gate", "flag unreadable, retrying: {e}");
                }
            }

            if let Some(max) = self.config.max_wait
                && start.elapsed() >= max
            {
                return Err(GateError::TimedOut(max));
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

pub fn spawn_reasserter<S: GateSurface>(surface: Arc<S>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = surface.install().await {
                tracing::debug!(target: "gate", "install failed, will retry: {e}");
            }
            tokio::time::sleep(every).await;
            if surface.is_closed().await {
                tracing::info!(target: "gate", "page closed, no longer keeping the button");
                break;
            }
        }
    })
}
