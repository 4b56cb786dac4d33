use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flashcards::config;
use flashcards::db;
use flashcards::{CedictDictionary, EmptyDictionary, TermId, TermRecord, TermStore, Vocabulary};

const USAGE: &str = "usage: flashcards [--config PATH] [--json] <add|delete|find|list> [TERM...]";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Add,
    Delete,
    Find,
    List,
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    json: bool,
    command: Command,
    terms: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut json = false;
    let mut command = None;
    let mut terms = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config needs a path\n{}", USAGE),
            },
            "--json" => json = true,
            "add" | "delete" | "find" | "list" if command.is_none() => {
                command = Some(match arg.as_str() {
                    "add" => Command::Add,
                    "delete" => Command::Delete,
                    "find" => Command::Find,
                    _ => Command::List,
                });
            }
            _ if command.is_some() => terms.push(arg),
            _ => bail!("unknown argument {:?}\n{}", arg, USAGE),
        }
    }

    let Some(command) = command else {
        bail!("{}", USAGE);
    };
    if command != Command::List && terms.is_empty() {
        bail!("no terms given\n{}", USAGE);
    }

    Ok(Args { config, json, command, terms })
}

/// Print records sorted by id / 按ID顺序输出
fn print_terms(terms: &BTreeMap<TermId, TermRecord>, json: bool) -> Result<()> {
    if json {
        let records: Vec<&TermRecord> = terms.values().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    for record in terms.values() {
        println!("{}: {} {}", record.id, record.term, record.definition);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flashcards=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!("flashcards {} built {}", env!("CARGO_PKG_VERSION"), env!("BUILD_TIME"));

    let args = parse_args(std::env::args().skip(1))?;

    // Load configuration / 加载配置
    let app_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .map_err(anyhow::Error::msg)?;

    // Create data directory if not exists / 创建数据目录
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());

    let pool = db::connect(&database_url).await?;
    db::run_migrations(&pool, &app_config.database.table).await?;

    let store = TermStore::open(pool, &app_config.database.table).await?;
    let mut vocab = match app_config.get_dictionary_path() {
        Some(path) => Vocabulary::new(store, CedictDictionary::load(path)?),
        None => {
            tracing::info!("No dictionary configured, definitions will be empty");
            Vocabulary::new(store, EmptyDictionary)
        }
    };

    match args.command {
        Command::Add => {
            for term in &args.terms {
                let ids = vocab.add(term).await?;
                if ids.is_empty() {
                    println!("{} is already stored", term);
                } else {
                    println!("Added IDs: {:?}", ids);
                }
            }
        }
        Command::Delete => {
            for term in &args.terms {
                match vocab.delete(term).await {
                    Ok(()) => println!("Deleted {}", term),
                    Err(e) if e.is_not_found() => println!("{} is not stored", term),
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Command::Find => {
            for term in &args.terms {
                match vocab.find(term).await {
                    Ok(terms) => print_terms(&terms, args.json)?,
                    Err(e) if e.is_not_found() => println!("no terms found with {}", term),
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Command::List => {
            let terms = vocab.list().await?;
            if terms.is_empty() && !args.json {
                println!("No terms in flashcards database.");
            } else {
                print_terms(&terms, args.json)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let args = parse(&["add", "我们", "你"]).unwrap();
        assert_eq!(args.command, Command::Add);
        assert_eq!(args.terms, vec!["我们", "你"]);
        assert!(!args.json);

        let args = parse(&["--json", "--config", "cfg.json", "list"]).unwrap();
        assert_eq!(args.command, Command::List);
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(args.json);

        // A command word after the command is a term / 命令之后的参数都是词条
        let args = parse(&["find", "list"]).unwrap();
        assert_eq!(args.command, Command::Find);
        assert_eq!(args.terms, vec!["list"]);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["add"]).is_err());
        assert!(parse(&["remove", "我"]).is_err());
        assert!(parse(&["--config"]).is_err());
    }
}
