use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info_span;

use timeline_stats::config::Config;
use timeline_stats::dom::LiveDocument;
use timeline_stats::message::Request;
use timeline_stats::shell::{
    is_platform_url, Background, ContentScript, LocalTransport, Tab, TabStatus, TabUpdate,
    Transport,
};
use timeline_stats::ui::{self, Popup};

const DEFAULT_URL: &str = "https://x.com/home";
const TAB_ID: u32 = 1;

#[derive(Parser, Debug)]
#[command(name = "timeline-stats", version, about = "Engagement stats for a saved X (Twitter) timeline page")]
struct Cli {
    /// Config file (default: <config dir>/timeline-stats/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect stats from a page and print the panel
    Stats {
        /// HTML of the rendered timeline, or `-` for stdin
        page: PathBuf,
        #[command(flatten)]
        tab: TabArgs,
        /// Print the raw JSON response instead of the panel
        #[arg(long)]
        json: bool,
    },
    /// Collect stats and show the interactive panel
    Popup {
        page: PathBuf,
        #[command(flatten)]
        tab: TabArgs,
    },
    /// Report whether a URL would receive the page-loaded notification
    CheckUrl { url: String },
}

#[derive(clap::Args, Debug)]
struct TabArgs {
    /// URL the page was loaded from
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,
    /// How long to wait for posts to appear
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Count the first post of each author run as original
    #[arg(long)]
    count_thread_starts: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    timeline_stats::logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Stats { page, tab, json } => {
            let config = apply_tab_args(config, &tab);
            let session = Session::open(&page, &tab.url, &config).await?;
            if json {
                let response = session
                    .transport
                    .send(TAB_ID, Request::GetStats)
                    .await
                    .context("Failed to reach the content script")?;
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let popup = session.popup(&config).await;
                print!("{}", popup.render_plain());
            }
        }
        Command::Popup { page, tab } => {
            let config = apply_tab_args(config, &tab);
            let session = Session::open(&page, &tab.url, &config).await?;
            let popup = session.popup(&config).await;
            ui::run(popup)?;
        }
        Command::CheckUrl { url } => {
            if is_platform_url(&url, &config.shell.platform_hosts) {
                println!("{url}: platform page");
            } else {
                println!("{url}: not a platform page");
            }
        }
    }

    Ok(())
}

fn apply_tab_args(mut config: Config, tab: &TabArgs) -> Config {
    if let Some(timeout_ms) = tab.timeout_ms {
        config.extractor.wait_timeout_ms = timeout_ms;
    }
    if tab.count_thread_starts {
        config.classifier.thread_starts_as_original = true;
    }
    config
}

/// One tab with its content script, wired to the background monitor.
struct Session {
    transport: LocalTransport,
    tab: Tab,
    span: tracing::Span,
}

impl Session {
    async fn open(page: &Path, url: &str, config: &Config) -> Result<Self> {
        let markup = read_page(page)?;
        let span = info_span!("session", tab = TAB_ID);

        let document = Arc::new(LiveDocument::new(markup));
        let mut transport = LocalTransport::new(info_span!(parent: &span, "transport"));
        transport.register(
            TAB_ID,
            ContentScript::new(
                document,
                config.clone(),
                info_span!(parent: &span, "content"),
            ),
        );

        let background = Background::new(&config.shell, info_span!(parent: &span, "background"));
        background.on_installed();
        background
            .on_tab_updated(
                &TabUpdate {
                    tab_id: TAB_ID,
                    status: Some(TabStatus::Complete),
                    url: Some(url.to_string()),
                },
                &transport,
            )
            .await;

        Ok(Self {
            transport,
            tab: Tab {
                id: TAB_ID,
                url: Some(url.to_string()),
            },
            span,
        })
    }

    async fn popup(&self, config: &Config) -> Popup {
        let mut popup = Popup::new(config);
        let span = info_span!(parent: &self.span, "popup");
        popup
            .load(&self.transport, Some(&self.tab), config, &span)
            .await;
        popup
    }
}

fn read_page(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut markup = String::new();
        std::io::stdin()
            .read_to_string(&mut markup)
            .context("Failed to read page from stdin")?;
        return Ok(markup);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))
}
