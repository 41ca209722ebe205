mod error;
mod logging;
mod paths;

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use comedor_lib::config::{PageSize, SearchConfig, TableConfig};
use comedor_lib::error::GridError;
use comedor_lib::model::{Dataset, FieldPath, Record, RowId};
use comedor_lib::render::render_text;
use comedor_lib::schedule::{Clock, SystemClock};
use comedor_lib::sort::{Direction, SortState};
use comedor_lib::table::Column;
use comedor_lib::DataTable;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "comedor")]
#[command(about = "Search, sort and page through a JSON array of records")]
struct Cli {
    /// JSON file holding an array of objects
    file: PathBuf,

    /// Columns as KEY or KEY:TITLE (default: fields of the first record)
    #[arg(long, short, value_delimiter = ',')]
    columns: Vec<String>,

    /// Show only rows containing this text
    #[arg(long, short)]
    search: Option<String>,

    /// Fields searched (default: the shown columns)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Sort by this field
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show
    #[arg(long, short, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Rows per page: 5, 10, 25 or 50
    #[arg(long)]
    page_size: Option<usize>,

    /// Mark these row ids as selected
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Table configuration file (default: <config dir>/table.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at trace level
    #[arg(long, short)]
    verbose: bool,
}

/// Reads the table configuration, falling back to defaults when the
/// default location holds no file.
fn load_config(explicit: Option<&Path>) -> Result<TableConfig, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::table_config() {
            Some(path) if path.exists() => path,
            _ => return Ok(TableConfig::default()),
        },
    };
    let json = fs::read_to_string(&path).map_err(|e| CliError::read(&path, e))?;
    log::info!("Config: loaded {}", path.display());
    let config = TableConfig::from_json(&json).map_err(GridError::from)?;
    Ok(config)
}

fn parse_columns(
    specs: &[String],
    dataset: &Dataset<Record>,
) -> Result<Vec<(FieldPath, String)>, CliError> {
    if specs.is_empty() {
        let first = dataset.get(0).ok_or(CliError::NoColumns)?;
        return Ok(first
            .fields()
            .keys()
            .map(|key| (FieldPath::from(key.as_str()), key.clone()))
            .collect());
    }

    specs
        .iter()
        .map(|spec| {
            let (key, title) = spec.split_once(':').unwrap_or((spec.as_str(), spec.as_str()));
            let path = FieldPath::parse(key.trim())
                .map_err(|_| CliError::InvalidColumn(spec.clone()))?;
            Ok((path, title.trim().to_string()))
        })
        .collect()
}

fn parse_row_id(raw: &str) -> RowId {
    match raw.trim().parse::<i64>() {
        Ok(n) => RowId::Int(n),
        Err(_) => RowId::Text(raw.trim().to_string()),
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(size) = cli.page_size {
        PageSize::try_from(size).map_err(GridError::from)?;
        config.page_size = size;
    }
    if !cli.select.is_empty() {
        config.selectable = true;
    }

    let json = tokio::fs::read_to_string(&cli.file)
        .await
        .map_err(|e| CliError::read(&cli.file, e))?;
    let dataset = Dataset::from_json(&json).map_err(GridError::from)?;
    log::info!("Loaded {} rows from {}", dataset.len(), cli.file.display());

    let columns = parse_columns(&cli.columns, &dataset)?;
    let fields: Vec<FieldPath> = if cli.fields.is_empty() {
        columns.iter().map(|(key, _)| key.clone()).collect()
    } else {
        cli.fields.iter().map(|f| FieldPath::from(f.as_str())).collect()
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut table = DataTable::new(
        columns
            .into_iter()
            .map(|(key, title)| Column::new(key, title))
            .collect(),
        config,
    )
    .map_err(GridError::from)?
    .with_clock(Arc::clone(&clock))
    .with_search(SearchConfig::new(fields));
    table.set_dataset(dataset);

    if let Some(term) = &cli.search {
        table.set_search_term(term);
        if let Some(deadline) = table.search().and_then(|s| s.deadline()) {
            tokio::time::sleep(deadline.saturating_duration_since(clock.now())).await;
            table.tick();
        }
    }

    if let Some(key) = &cli.sort {
        let direction = if cli.desc {
            Direction::Desc
        } else {
            Direction::Asc
        };
        let key = FieldPath::parse(key).map_err(GridError::from)?;
        table.set_sort(SortState::by(key, direction));
    }

    for raw in &cli.select {
        let id = parse_row_id(raw);
        if !table.set_row_selected(&id, true) {
            log::warn!("No row with id {}", id);
        }
    }

    table.go_to_page(cli.page);

    let mut out = render_text(&table.view());
    if !table.selection().is_empty() {
        out.push_str(&format!("\n\n{} selected", table.selection().len()));
    }
    Ok(out)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(out) => println!("{}", out),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
