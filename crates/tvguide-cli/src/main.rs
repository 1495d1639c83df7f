//! STAR TV Guide command-line viewer
//!
//! Prints one channel's listings for a day as text, XML or JSON.
//!
//! ```text
//! tvguide plus --yyyy 2008 --mm 7 --dd 4 --format xml
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use tracing_subscriber::filter::EnvFilter;
use tvguide_core::schedule::DEFAULT_CHANNEL;
use tvguide_core::{render_text, render_xml, GuideConfig, ScheduleClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Xml,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tvguide", version, about = "Show a day's programmes on a STAR channel")]
struct Args {
    /// Channel key: gold, news, one or plus
    #[arg(default_value = DEFAULT_CHANNEL)]
    channel: String,
    /// Year (4 digits); give all of --yyyy, --mm and --dd or none
    #[arg(long)]
    yyyy: Option<i64>,
    /// Month (1-12)
    #[arg(long)]
    mm: Option<i64>,
    /// Day of month (1-31)
    #[arg(long)]
    dd: Option<i64>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Listings form URL, for pointing at a mirror or test server
    #[arg(long)]
    url: Option<String>,
}

impl Args {
    /// Date flags as the `{yyyy, mm, dd}` mapping the client expects.
    ///
    /// Only the flags actually given are included, so a partial set is
    /// rejected by the client rather than silently filled in.
    fn date_options(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in [("yyyy", self.yyyy), ("mm", self.mm), ("dd", self.dd)] {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::from(value));
            }
        }
        Value::Object(map)
    }

    fn guide_config(&self) -> GuideConfig {
        match &self.url {
            Some(url) => GuideConfig::with_base_url(url.as_str()),
            None => GuideConfig::default(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = run(&args).await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write listings to stdout")?;
    Ok(())
}

async fn run(args: &Args) -> Result<String> {
    let options = args.date_options();
    let mut guide = ScheduleClient::with_config(Some(&options), &args.guide_config())?;
    tracing::debug!(date = %guide.date(), channel = %args.channel, "Fetching listings");

    let listings = guide.get_listings(Some(&args.channel)).await?;
    let output = match args.format {
        Format::Text => render_text(&listings),
        Format::Xml => render_xml(&listings),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&*listings).context("failed to encode listings")?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}
