use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};

use recipe_finder::{
    Diet, EdamamClient, FinderConfig, FinderError, NutritionAnalyzer, RecipeSearch, SearchQuery,
};

#[derive(Parser, Debug)]
#[command(
    name = "recipe-finder",
    version,
    about = "Search recipes and analyze recipe nutrition with the Edamam API"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Edamam application id (overrides config and EDAMAM_APP_ID)
    #[arg(long, global = true)]
    app_id: Option<String>,

    /// Edamam application key (overrides config and EDAMAM_APP_KEY)
    #[arg(long, global = true)]
    app_key: Option<String>,

    /// API base URL, e.g. a proxy that adds credentials itself
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search recipes by keyword and diet
    Search {
        /// Free-text query
        #[arg(default_value = "")]
        query: String,

        /// Diet filter: balanced, high-fiber, high-protein, low-carb, low-fat, low-sodium
        #[arg(long, value_parser = parse_diet)]
        diet: Option<Diet>,
    },
    /// Analyze the nutrition of a recipe
    Analyze {
        /// Recipe title
        #[arg(long)]
        title: String,

        /// File with one ingredient per line; reads stdin when omitted or "-"
        #[arg(long)]
        ingredients: Option<PathBuf>,
    },
}

fn parse_diet(value: &str) -> Result<Diet, String> {
    value.parse::<Diet>().map_err(|e| e.to_string())
}

fn build_client(cli: &Cli) -> Result<EdamamClient, FinderError> {
    let mut config = FinderConfig::load()?.edamam;
    if let Some(id) = &cli.app_id {
        config.app_id = Some(id.clone());
    }
    if let Some(key) = &cli.app_key {
        config.app_key = Some(key.clone());
    }
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    debug!("Using base URL {}", config.base_url);
    EdamamClient::from_config(&config)
}

async fn read_ingredients<R>(path: Option<&PathBuf>, mut stdin: R) -> Result<String, FinderError>
where
    R: AsyncRead + Unpin,
{
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(tokio::fs::read_to_string(path).await?),
        _ => {
            let mut text = String::new();
            stdin.read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// What a command printed and whether it succeeded
#[derive(Debug, Default)]
struct CommandOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

async fn run_search(
    client: EdamamClient,
    query: SearchQuery,
    json: bool,
) -> Result<CommandOutput, FinderError> {
    let mut search = RecipeSearch::new(client);
    // Failures are only logged; the result list stays empty
    let succeeded = search.search(query).await.is_ok();

    let cards = search.cards();
    let stdout = if json {
        serde_json::to_string_pretty(&cards)?
    } else {
        cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(CommandOutput {
        success: succeeded,
        stdout,
        stderr: String::new(),
    })
}

async fn run_analyze(
    client: EdamamClient,
    title: &str,
    ingredients: &str,
    json: bool,
) -> Result<CommandOutput, FinderError> {
    let mut analyzer = NutritionAnalyzer::new(client);
    if analyzer.analyze(title, ingredients).await.is_err() {
        return Ok(CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: analyzer.error().unwrap_or_default().to_string(),
        });
    }

    let stdout = match analyzer.view() {
        Some(view) if json => serde_json::to_string_pretty(&view)?,
        Some(view) => view.to_string(),
        None => String::new(),
    };
    Ok(CommandOutput {
        success: true,
        stdout,
        stderr: String::new(),
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let client = build_client(&cli)?;

    let output = match &cli.command {
        Command::Search { query, diet } => {
            let query = SearchQuery {
                query: query.clone(),
                diet: *diet,
            };
            run_search(client, query, cli.json).await?
        }
        Command::Analyze { title, ingredients } => {
            let text = read_ingredients(ingredients.as_ref(), tokio::io::stdin()).await?;
            run_analyze(client, title, &text, cli.json).await?
        }
    };

    if !output.stdout.is_empty() {
        println!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        eprintln!("{}", output.stderr);
    }
    Ok(output.exit_code())
}
