use std::{path::PathBuf, sync::Arc, time::Duration};

use jfs::{
    assemble::Assembler,
    gate::{GateConfig, StartGate},
    harvest::harvest,
    output::{Saved, Sink},
    page::Snapshot,
    scrape::{ChromePage, Launch},
};

const DEFAULT_URL: &str = "https://www.upwork.com/nx/find-work/most-recent";

#[derive(clap::Parser)]
#[command(version, about = "Extract the job tiles visible in a browser window once you press start")]
struct Args {
    /// Page opened in the browser
    #[arg(long, env = "JOBFEED_URL", default_value = DEFAULT_URL)]
    url: String,
    /// Base for relative job links
    #[arg(long, env = "JOBFEED_ORIGIN", default_value = "https://www.upwork.com")]
    origin: url::Url,
    #[arg(short, long, value_name = "file", default_value = "jobs.json")]
    output: PathBuf,
    /// Where the page markup goes when no job tiles are recognized
    #[arg(long, value_name = "file", default_value = "debug_page.html")]
    debug_dump: PathBuf,
    #[arg(long)]
    headless: bool,
    #[arg(long, env = "JOBFEED_PROXY")]
    proxy: Option<String>,
    /// Chrome/Chromium executable; autodetected when omitted
    #[arg(long, value_name = "path")]
    chrome: Option<PathBuf>,
    #[arg(long, value_name = "ms", default_value_t = 1000)]
    poll_ms: u64,
    #[arg(long, value_name = "ms", default_value_t = 2000)]
    reassert_ms: u64,
    /// Give up if start is not pressed in time (default: wait forever)
    #[arg(long, value_name = "secs")]
    max_wait_secs: Option<u64>,
    /// Seconds to keep the window open after saving
    #[arg(long, value_name = "secs", default_value_t = 5)]
    linger_secs: u64,
    /// Extract from a saved page instead of a live browser
    #[arg(long, value_name = "file", conflicts_with_all = ["headless", "proxy", "chrome"])]
    from_file: Option<PathBuf>,
}

impl Args {
    fn gate(&self) -> GateConfig {
        GateConfig {
            poll_interval: Duration::from_millis(self.poll_ms),
            reassert_interval: Duration::from_millis(self.reassert_ms),
            max_wait: self.max_wait_secs.map(Duration::from_secs),
        }
    }
}

fn report(saved: &Saved) {
    match saved {
        Saved::Listings { count, path } => {
            println!("\n\x1b[1;32m✅ saved {count} jobs to {}\x1b[0m", path.display());
        }
        Saved::NoContainers { output, dump } => {
            println!(
                "\n\x1b[1;31m❌ no job tiles recognized\x1b[0m ({} is empty).\nInspect {} to see what the page looked like.",
                output.display(),
                dump.display(),
            );
        }
    }
}

fn instructions() {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!(" 1. Log in if needed.");
    println!(" 2. Scroll or load more jobs until everything you want is visible.");
    println!(" 3. Press the green \x1b[1m⚡ Extract visible jobs\x1b[0m button (top right).");
    println!("{rule}\n");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let args = Args::parse();
    let assembler = Assembler::new(args.origin.clone());
    let sink = Sink::new(&args.output, &args.debug_dump);

    if let Some(ref file) = args.from_file {
        tracing::info!(target: "main", "reading saved page {}", file.display());
        let page = Snapshot::parse(std::fs::read_to_string(file)?);
        let result = harvest(&page, &assembler);
        report(&sink.persist(&result, &page)?);
        return Ok(());
    }

    tracing::info!(target: "main", "launching browser ...");
    let page = Arc::new(ChromePage::open(Launch {
        headless: args.headless,
        proxy: args.proxy.as_deref(),
        chrome: args.chrome.clone(),
    })?);
    page.goto(&args.url).await;

    instructions();

    let mut gate = StartGate::new(page.clone(), args.gate());
    let _keeper = gate.reassert();
    gate.wait().await?;

    tracing::info!(target: "main", "extracting ...");
    let snapshot = page.snapshot().await?;
    let result = harvest(&snapshot, &assembler);
    report(&sink.persist(&result, &snapshot)?);

    println!("Done. The browser closes in {}s.", args.linger_secs);
    tokio::time::sleep(Duration::from_secs(args.linger_secs)).await;

    Ok(())
}
