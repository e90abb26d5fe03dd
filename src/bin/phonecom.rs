use clap::{Args, Parser, Subcommand};
use phonecom_sdk::cli::{self as prog_cli, QueryArgs};
use phonecom_sdk::config::SdkConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phonecom", version, about = "Phone.com API query builder CLI", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, the usual locations are searched.")]
    config: Option<PathBuf>,
    /// Output format: human, plain or json
    #[arg(long, default_value = "human")]
    format: String,
    /// Write app.log / requests.log under the configured log directory
    #[arg(long)]
    log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct QueryOpts {
    #[arg(help = "Collection path template, e.g. /accounts/{account}/sms")]
    path: String,
    #[arg(short = 'p', long = "param", help = "Path parameter name=value (repeatable)")]
    params: Vec<String>,
    #[arg(short = 'f', long = "filter", help = "Filter column:operator[:value] (repeatable)")]
    filters: Vec<String>,
    #[arg(short = 's', long = "sort", help = "Sort column[:asc|desc] (repeatable)")]
    sorts: Vec<String>,
    #[arg(long)]
    limit: Option<i64>,
    #[arg(long)]
    offset: Option<i64>,
    #[arg(long, help = "1-based page using the configured per_page")]
    page: Option<u64>,
}

impl QueryOpts {
    fn into_args(self) -> Result<QueryArgs, Box<dyn std::error::Error>> {
        let params = self
            .params
            .iter()
            .map(|p| prog_cli::parse_param(p))
            .collect::<Result<Vec<_>, _>>()?;
        let filters = self
            .filters
            .iter()
            .map(|f| prog_cli::parse_filter_expr(f))
            .collect::<Result<Vec<_>, _>>()?;
        let sorts = self.sorts.iter().map(|s| prog_cli::parse_sort(s)).collect();
        Ok(QueryArgs {
            path: self.path,
            params,
            filters,
            sorts,
            limit: self.limit,
            offset: self.offset,
            page: self.page,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Print the compiled URL and query parameters")]
    Compile {
        #[command(flatten)]
        query: QueryOpts,
    },
    #[command(about = "Strip @-prefixed hypermedia controls from a JSON document")]
    Strip {
        #[arg(help = "JSON file; reads stdin when omitted")]
        file: Option<PathBuf>,
    },
    #[command(about = "Run a query against a JSON fixture of collections")]
    Query {
        #[arg(long, help = "Fixture file: {\"/sms\": [{...}, ...]}")]
        fixture: PathBuf,
        #[arg(long, help = "Print the match count instead of the rows")]
        count: bool,
        #[command(flatten)]
        query: QueryOpts,
    },
}

fn main() {
    let cli = Cli::parse();
    let cfg = match SdkConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if cli.log
        && let Err(e) = phonecom_sdk::logger::configure_from_config(&cfg.log)
    {
        eprintln!("warning: logging disabled: {e}");
    }
    let mode = prog_cli::parse_output_mode(Some(cli.format.as_str()));

    let cmd: Result<prog_cli::Command, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compile { query } => query.into_args().map(|query| prog_cli::Command::Compile { query }),
        Commands::Strip { file } => Ok(prog_cli::Command::Strip { input: file }),
        Commands::Query { fixture, count, query } => {
            query.into_args().map(|query| prog_cli::Command::Query { fixture, query, count })
        }
    };
    let mut stdout = std::io::stdout().lock();
    let r = cmd.and_then(|c| prog_cli::run_with_format(c, mode, &cfg.query, &mut stdout));
    if let Err(e) = r {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
