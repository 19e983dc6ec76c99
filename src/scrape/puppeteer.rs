use std::{ffi::OsStr, path::PathBuf, sync::Arc, time::Duration};

use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use tokio::task::spawn_blocking;

/// How the browser window is launched.
pub struct Launch<'a> {
    pub headless: bool,
    pub proxy: Option<&'a str>,
    pub chrome: Option<PathBuf>,
}

/// An operator may leave the window alone for a long time before pressing start.
const IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

pub fn puppeteer(launch: Launch<'_>) -> anyhow::Result<Browser> {
    Browser::new(LaunchOptions {
        args: vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--disable-infobars"),
            OsStr::new("--start-maximized"),
        ],
        headless: launch.headless,
        sandbox: false,
        window_size: Some((1280, 800)),
        path: launch.chrome,
        proxy_server: launch.proxy,
        idle_browser_timeout: IDLE_TIMEOUT,
        ..LaunchOptions::default()
    })
}

#[allow(clippy::significant_drop_tightening)]
pub fn first_tab(browser: &Browser) -> anyhow::Result<Arc<Tab>> {
    let tab = browser.new_tab()?;

    {
        let tabs_guard = browser
            .get_tabs()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for remain in &*tabs_guard {
            if !Arc::ptr_eq(&tab, remain) {
                remain.close(true)?;
            }
        }
    }

    Ok(tab)
}

pub fn tab_alive(browser: &Browser, tab: &Arc<Tab>) -> bool {
    let listed = browser
        .get_tabs()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .iter()
        .any(|t| Arc::ptr_eq(t, tab));
    listed && browser.get_version().is_ok()
}

pub async fn navigate_to(tab: Arc<Tab>, url: String) -> anyhow::Result<()> {
    spawn_blocking(move || tab.navigate_to(&url)?.wait_until_navigated().map(|_| ())).await?
}

pub async fn evaluate_async(tab: Arc<Tab>, expression: &'static str) -> anyhow::Result<Option<Value>> {
    spawn_blocking(move || tab.evaluate(expression, false).map(|object| object.value)).await?
}

pub async fn content_async(tab: Arc<Tab>) -> anyhow::Result<String> {
    spawn_blocking(move || tab.get_content()).await?
}
