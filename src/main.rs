use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use cyphercheck::query_validator::CypherValidator;

/// CypherCheck - Schema conformance checking for Cypher queries
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema definition file (JSON, or YAML by extension)
    #[arg(long, env = "CYPHERCHECK_SCHEMA_PATH")]
    schema: Option<PathBuf>,

    /// Query text to check
    #[arg(long, conflicts_with = "query_file")]
    query: Option<String>,

    /// File holding the query to check
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Drop repeated items from the final RETURN list
    #[arg(long)]
    dedupe: bool,

    /// Return every pattern variable of the query (needs --schema)
    #[arg(long)]
    include_all: bool,

    /// Also run the query as a rolled-back trial transaction
    #[arg(long)]
    grammar: bool,

    /// Neo4j HTTP API base URL for --grammar
    #[arg(long, env = "CYPHERCHECK_NEO4J_URL", default_value = "http://localhost:7474")]
    neo4j_url: String,

    #[arg(long, env = "CYPHERCHECK_USERNAME", default_value = "neo4j")]
    username: String,

    #[arg(long, env = "CYPHERCHECK_PASSWORD", default_value = "")]
    password: String,
}

impl Cli {
    fn read_query(&self) -> anyhow::Result<String> {
        match (&self.query, &self.query_file) {
            (Some(query), _) => Ok(query.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read query file {}", path.display())),
            (None, None) => bail!("Pass the query with --query or --query-file"),
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut query = cli.read_query()?;
    let mut valid = true;

    let mut validator = CypherValidator::new();
    if let Some(schema) = &cli.schema {
        validator.enable_schema_validation(schema)?;
    }
    if cli.grammar {
        validator.enable_grammar_validation(&cli.neo4j_url, &cli.username, &cli.password)?;
    }

    if cli.dedupe {
        query = validator.dedupe_return_variables(&query)?;
    }

    if validator.schema_catalog().is_some() {
        let result = validator.validate_schema(&query)?;
        if let Err(e) = &result.outcome {
            log::error!("Schema check failed: {}", e);
        }
        valid &= result.is_valid();
        query = result.query;

        if cli.include_all && valid {
            query = validator.include_all_variables(&query)?;
        }
    } else if cli.include_all {
        bail!("--include-all needs a schema (--schema)");
    }

    if cli.grammar {
        let accepted = validator.validate_grammar(&query).await?;
        if !accepted {
            log::error!("Database rejected the query");
        }
        valid &= accepted;
    }

    println!("{}", query);
    eprintln!("{}", if valid { "valid" } else { "invalid" });
    Ok(valid)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
