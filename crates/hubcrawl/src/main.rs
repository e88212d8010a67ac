use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use fs_err::File;
use hubcrawl_crawler::{CrawlRequest, Crawler, CrawlerConfig, Layout};
use tokio::runtime;

mod output;

/// Keyword search crawler
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[clap(name = "search")]
    Search(SearchArgs),
    #[clap(name = "extract")]
    Extract(ExtractArgs),
    #[clap(hide = true)]
    Completion,
}

/// Search every keyword and write the extracted results to a JSON file
#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Path to the JSON file holding `keywords`, `proxies` and `type`
    #[clap(parse(from_os_str))]
    pub input: PathBuf,
    /// Directory where the timestamped output file is written
    #[clap(parse(from_os_str), long, short, default_value = "outputs")]
    pub output_dir: PathBuf,
    /// Optional crawler yaml configuration file
    #[clap(env = "HUBCRAWL_CRAWLER_CONFIG", parse(from_os_str), long)]
    pub crawler_config: Option<PathBuf>,
    /// Override crawler's base url
    #[clap(long)]
    pub base_url: Option<String>,
    /// Override crawler's user agent
    #[clap(long)]
    pub user_agent: Option<String>,
    /// Override crawler's delay in seconds before each search
    #[clap(long)]
    pub delay: Option<f32>,
    /// When quiet no logs are outputted
    #[clap(long, short)]
    pub quiet: bool,
}

impl TryFrom<&SearchArgs> for CrawlerConfig {
    type Error = anyhow::Error;

    fn try_from(args: &SearchArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.crawler_config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            CrawlerConfig::default()
        };
        if let Some(base_url) = &args.base_url {
            conf.base_url = base_url.to_string();
        }
        if let Some(user_agent) = &args.user_agent {
            conf.user_agent = user_agent.to_string();
        }
        if let Some(delay) = args.delay {
            conf.delay = delay;
        }
        Ok(conf)
    }
}

pub fn search(args: SearchArgs) -> anyhow::Result<()> {
    let crawler = Crawler::new((&args).try_into()?)?;
    let request = CrawlRequest::from_reader(File::open(&args.input)?)?;

    let rt = runtime::Builder::new_current_thread().enable_all().build()?;
    let records = rt.block_on(crawler.run(request))?;

    let path = output::output_path(&args.output_dir, "search", chrono::Utc::now());
    output::write_records(&path, &records)?;
    log::info!("Wrote {} records", records.len());
    println!("{}", path.display());

    Ok(())
}

/// Extract results from a saved search page and print them to stdout
#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// A local html search page
    #[clap(parse(from_os_str), long)]
    pub file: PathBuf,
    /// Layout of the page
    #[clap(value_enum, long, default_value = "repositories")]
    pub layout: Layout,
    /// Base url prepended to relative links
    #[clap(long)]
    pub base_url: Option<String>,
}

pub fn extract(args: ExtractArgs) -> anyhow::Result<()> {
    let page = fs_err::read_to_string(&args.file)?;
    let base_url = args
        .base_url
        .unwrap_or_else(|| CrawlerConfig::default().base_url);
    let records = args.layout.extract(&page, &base_url)?.collect::<Vec<_>>();
    serde_json::to_writer_pretty(io::stdout().lock(), &records)?;
    println!();
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("hubcrawl=info,hubcrawl_crawler=info"),
    )
    .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Search(args) => {
            if !args.quiet {
                init_logger();
            }
            search(args)
        }
        SubCommand::Extract(args) => {
            init_logger();
            extract(args)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "hubcrawl", &mut io::stdout());
            Ok(())
        }
    }
}
