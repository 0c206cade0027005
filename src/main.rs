use catalog_search::config::Command;
use catalog_search::utils::error::ErrorCategory;
use catalog_search::utils::{logger, validation::Validate};
use catalog_search::{
    CatalogItem, CliArgs, DocumentRepository, HttpEngineClient, QueryLogEntry, SearchConfig,
    SearchError, SearchGateway,
};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    tracing::info!("🔌 Using search engine at {}", config.engine.endpoint);

    match run(args.command, &config).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
            exit_with(e)
        }
    }
}

async fn run(command: Command, config: &SearchConfig) -> catalog_search::Result<String> {
    let engine = HttpEngineClient::from_config(&config.engine)?;

    match command {
        Command::Search { query, size } => {
            let gateway = SearchGateway::new(engine, config);
            let items = gateway.search(&query, size).await?;
            to_json(&with_ids(&items))
        }
        Command::Autocomplete { prefix, size } => {
            let gateway = SearchGateway::new(engine, config);
            let items = gateway.autocomplete(&prefix, size).await?;
            to_json(&with_ids(&items))
        }
        Command::Popular { duration, size } => {
            let gateway = SearchGateway::new(engine, config);
            let ranks = gateway.popular_searches(&duration, size).await?;
            to_json(&ranks)
        }
        Command::PopularBetween { from, to, size } => {
            let gateway = SearchGateway::new(engine, config);
            let ranks = gateway.popular_searches_between(&from, &to, size).await?;
            to_json(&ranks)
        }
        Command::AddItem {
            name,
            description,
            category,
            suggestion_terms,
        } => {
            let repository = DocumentRepository::catalog(engine, config);
            let item = repository
                .save(CatalogItem::new(name, description, category, suggestion_terms))
                .await?;
            tracing::info!("✅ Saved catalog item {:?}", item.id);
            to_json(&Saved::new(item.id.clone(), &item))
        }
        Command::LogQuery {
            query,
            user_id,
            result_count,
        } => {
            let repository = DocumentRepository::search_log(engine, config);
            let mut entry = QueryLogEntry::new(query, chrono::Utc::now());
            entry.user_id = user_id;
            entry.result_count = result_count;

            let entry = repository.save(entry).await?;
            tracing::info!("✅ Logged query {:?}", entry.id);
            to_json(&Saved::new(entry.id.clone(), &entry))
        }
    }
}

/// 輸出文件時連同引擎指派的 id
#[derive(Serialize)]
struct Saved<'a, T: Serialize> {
    id: Option<String>,
    #[serde(flatten)]
    document: &'a T,
}

impl<'a, T: Serialize> Saved<'a, T> {
    fn new(id: Option<String>, document: &'a T) -> Self {
        Self { id, document }
    }
}

fn with_ids(items: &[CatalogItem]) -> Vec<Saved<'_, CatalogItem>> {
    items
        .iter()
        .map(|item| Saved::new(item.id.clone(), item))
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> catalog_search::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn exit_with(error: SearchError) -> ! {
    eprintln!("❌ {}", error);
    eprintln!("💡 Suggestion: {}", error.recovery_suggestion());

    // 依錯誤類別決定退出碼
    let exit_code = match error.category() {
        ErrorCategory::Configuration => 1,
        ErrorCategory::InvalidArgument => 2,
        ErrorCategory::EngineUnavailable => 3,
        ErrorCategory::Internal => 4,
    };
    std::process::exit(exit_code);
}
