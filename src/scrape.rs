use std::{sync::Arc, time::Duration};

use headless_chrome::{Browser, Tab};
use serde_json::Value;
use tokio::task::spawn_blocking;

use crate::{
    gate::{GateSurface, INSTALL_SCRIPT, PROBE_SCRIPT},
    page::Snapshot,
};

mod puppeteer;

pub use puppeteer::{Launch, content_async, evaluate_async, first_tab, navigate_to, puppeteer, tab_alive};

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// The operator's browser window: one tab the human drives and this program reads.
pub struct ChromePage {
    browser: Arc<Browser>,
    tab: Arc<Tab>,
}

impl ChromePage {
    pub fn open(launch: Launch<'_>) -> anyhow::Result<Self> {
        let browser = puppeteer(launch)?;
        let tab = first_tab(&browser)?;

        tab.enable_stealth_mode()?;
        tab.set_user_agent(USER_AGENT, None, None)?;
        tab.set_default_timeout(NAVIGATION_TIMEOUT);

        Ok(Self {
            browser: Arc::new(browser),
            tab,
        })
    }

    /// Slow or failed loads are logged and ignored: the operator can still fix the page by hand.
    pub async fn goto(&self, url: &str) {
        log::info!(target: "browser", "navigating to \x1b[1;36m{url}\x1b[0m ...");
        if let Err(e) = navigate_to(self.tab.clone(), url.to_owned()).await {
            log::warn!(target: "browser", "page load did not finish ({e}), continuing");
        }
    }

    /// Markup of the page as rendered right now.
    pub async fn snapshot(&self) -> anyhow::Result<Snapshot> {
        let html = content_async(self.tab.clone()).await?;
        log::info!(target: "browser", "captured {} bytes of markup", html.len());
        Ok(Snapshot::parse(html))
    }
}

impl GateSurface for ChromePage {
    async fn install(&self) -> anyhow::Result<()> {
        evaluate_async(self.tab.clone(), INSTALL_SCRIPT).await.map(|_| ())
    }

    async fn is_triggered(&self) -> anyhow::Result<bool> {
        match evaluate_async(self.tab.clone(), PROBE_SCRIPT).await? {
            Some(Value::Bool(b)) => Ok(b),
            Some(value) => anyhow::bail!("not a bool: {value}"),
            None => anyhow::bail!("returned nothing"),
        }
    }

    async fn is_closed(&self) -> bool {
        let browser = self.browser.clone();
        let tab = self.tab.clone();
        spawn_blocking(move || !tab_alive(&browser, &tab))
            .await
            .unwrap_or(true)
    }
}
