use anyhow::Result;
use clap::{Parser, ValueEnum};
use netlify_datasource::netlify::http::format_api_error;
use netlify_datasource::query::{ParsingOptions, QuerySpec, VariableBindings};
use netlify_datasource::{Datasource, Settings};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Run Netlify dashboard queries from the command line
#[derive(Parser, Debug)]
#[command(name = "nfds", version = netlify_datasource::VERSION, about, long_about = None)]
struct Args {
    /// Entity kind to query (builds, deployments, forms, ...)
    #[arg(short, long)]
    entity: Option<String>,

    /// Site id the query is scoped to (may contain $variables)
    #[arg(short, long)]
    site_id: Option<String>,

    /// Comma-separated fields to keep in the result
    #[arg(short, long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Template variable binding (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// Scoped variable binding, wins over --var (repeatable)
    #[arg(long = "scoped-var", value_name = "NAME=VALUE")]
    scoped_vars: Vec<String>,

    /// Enumerate variable options instead of printing a result table
    #[arg(long)]
    enumerate: bool,

    /// List the cached site ids
    #[arg(long)]
    list_sites: bool,

    /// Force a refresh of the cached site ids
    #[arg(long)]
    refresh_sites: bool,

    /// Check connectivity against the configured API
    #[arg(long)]
    check: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("nfds started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("netlify-datasource").join("nfds.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".netlify-datasource").join("nfds.log");
    }
    PathBuf::from("nfds.log")
}

/// Parse repeated NAME=VALUE flags into bindings
fn parse_bindings(vars: &[String], scoped_vars: &[String]) -> Result<VariableBindings> {
    let mut bindings = VariableBindings::new();

    for (raw, scoped) in vars
        .iter()
        .map(|v| (v, false))
        .chain(scoped_vars.iter().map(|v| (v, true)))
    {
        let Some((name, value)) = raw.split_once('=') else {
            anyhow::bail!("invalid variable binding '{}', expected NAME=VALUE", raw);
        };

        if scoped {
            bindings.set_scoped(name, value);
        } else {
            bindings.set(name, value);
        }
    }

    Ok(bindings)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let settings = Settings::load();
    let datasource = Datasource::new(settings)?;
    let bindings = parse_bindings(&args.vars, &args.scoped_vars)?;

    if args.check {
        match datasource.check_health().await {
            Ok(message) => println!("{}", message),
            Err(e) => {
                eprintln!("Health check failed: {}", format_api_error(&e));
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if args.refresh_sites {
        let ids = datasource.refresh_site_ids().await?;
        return print_json(&ids);
    }

    if args.list_sites {
        let ids = datasource.site_ids().await?;
        return print_json(&ids);
    }

    // A plain --enumerate is the dashboard variable path: site ids
    if args.enumerate && args.entity.is_none() {
        let options = datasource.enumerate(&bindings).await?;
        return print_json(&options);
    }

    let spec = QuerySpec {
        entity: args
            .entity
            .unwrap_or_else(|| QuerySpec::seeded().entity),
        site_id: args.site_id.unwrap_or_default(),
        parsing_options: ParsingOptions {
            selected_fields: args.fields,
        },
        ..QuerySpec::default()
    };

    if args.enumerate {
        let options = datasource.enumerate_query(&spec, &bindings).await?;
        print_json(&options)
    } else {
        let result = datasource.query(&spec, &bindings).await?;
        print_json(&result)
    }
}
