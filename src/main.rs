use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notion_md::{Config, Credentials, EnvFile, NotionClient, NotionError, report};

#[derive(Parser)]
#[command(name = "notion-md")]
#[command(about = "Search Notion pages and save Markdown files as new pages")]
struct Cli {
    /// Config file (defaults are used when it doesn't exist)
    #[arg(long, global = true, default_value = "notion-md.toml")]
    config: PathBuf,

    /// KEY=VALUE file consulted when the token isn't in the environment
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List pages shared with the integration
    Search,
    /// Convert a Markdown file and create it as a child page
    Save {
        /// ID of the page the new page is created under
        parent_id: String,
        /// Markdown file to upload
        file: PathBuf,
        /// Title for the new page (defaults to the configured title)
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Print the blocks `save` would send, without calling the API
    Convert {
        /// Markdown file to convert
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(&cli.config);

    match cli.command.unwrap_or(Command::Search) {
        Command::Search => {
            let client = connect(&config, &cli.env_file)?;
            search(&client, config.search.display_limit)?;
        }
        Command::Save {
            parent_id,
            file,
            title,
        } => {
            let client = connect(&config, &cli.env_file)?;
            let markdown = notion_md::read_markdown(&file)?;
            let title = title.unwrap_or_else(|| config.page.title.clone());
            save(&client, &parent_id, &title, &markdown)?;
        }
        Command::Convert { file } => {
            let markdown = notion_md::read_markdown(&file)?;
            println!("{}", notion_md::markdown_to_notion_json(&markdown)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn connect(config: &Config, env_file: &Path) -> Result<NotionClient> {
    let env = EnvFile::load(env_file)?;
    let credentials = match Credentials::from_env(&config.api.token_env, &env) {
        Ok(credentials) => credentials,
        Err(e @ NotionError::MissingToken(_)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    NotionClient::new(&config.api, &credentials).context("failed to build HTTP client")
}

fn search(client: &NotionClient, display_limit: usize) -> Result<()> {
    println!("Searching for accessible pages...");

    let pages = client.search_pages();
    report::print_search(&mut io::stdout(), &mut io::stderr(), pages, display_limit)?;
    Ok(())
}

fn save(client: &NotionClient, parent_id: &str, title: &str, markdown: &str) -> Result<()> {
    let blocks = notion_md::convert(markdown);

    // A failed create is reported, not raised
    let created = client.create_page(parent_id, title, &blocks);
    report::print_created(&mut io::stdout(), &mut io::stderr(), created)?;
    Ok(())
}
