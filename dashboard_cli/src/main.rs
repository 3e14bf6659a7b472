use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use dashboard_cli::config::{AppConfig, ConfigManager, get_config};
use dashboard_cli::error::{CliError, ExitCode};
use dashboard_cli::orchestrators::taxes::RateArgument;
use dashboard_cli::orchestrators::{
    ConsoleOptions, ProductChanges, ProductUpdateOrchestrator, TaxOrchestrator,
    TransactionOrchestrator, parse_rate,
};
use dashboard_cli::output::{MoneyReport, OutputFormat, OutputFormatter, create_formatter};
use dashboard_cli::terminal;
use dashboard_core::money::{Locale, Money, MoneyDisplay};
use dashboard_core::orders::TransactionAction;
use dashboard_core::SaleorApi;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(author, version, about = "Merchant dashboard client - catalog, tax and order management", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// GraphQL endpoint, overriding the configuration
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Locale used to format numbers, overriding the configuration
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },

    /// Manage tax configuration per country
    Taxes {
        #[command(subcommand)]
        command: TaxesCommand,
    },

    /// Manage orders
    Order {
        #[command(subcommand)]
        command: OrderCommand,
    },

    /// Format an amount the way the dashboard displays it
    Money {
        /// Amount, e.g. 1234.5
        amount: Decimal,

        /// ISO 4217 currency code
        currency: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProductCommand {
    /// Save changes to a product, uploading files and updating variants,
    /// channels and metadata
    Update {
        /// Product ID
        id: String,

        /// JSON file describing the changes
        #[arg(short, long, value_name = "FILE")]
        changes: PathBuf,
    },
}

#[derive(Subcommand)]
enum TaxesCommand {
    /// Show tax rates per country
    List {
        /// Country code to select
        #[arg(long)]
        country: Option<String>,
    },

    /// Change the tax rates of a configured country
    Update {
        /// Country code
        country: String,

        /// Rate as CLASS=RATE; "default" is the country rate (repeatable)
        #[arg(short, long = "rate", value_name = "CLASS=RATE", value_parser = parse_rate, required = true)]
        rates: Vec<RateArgument>,
    },

    /// Add shop countries to the tax configuration
    AddCountry {
        /// Country codes
        #[arg(required = true)]
        countries: Vec<String>,

        /// Rate as CLASS=RATE for every added country (repeatable)
        #[arg(short, long = "rate", value_name = "CLASS=RATE", value_parser = parse_rate)]
        rates: Vec<RateArgument>,
    },
}

#[derive(Subcommand)]
enum OrderCommand {
    /// Capture, refund or cancel a payment transaction
    TransactionAction {
        /// Transaction ID
        id: String,

        /// capture, refund or cancel
        action: TransactionAction,

        /// Amount for partial capture or refund
        #[arg(long)]
        amount: Option<Decimal>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., client.api_url)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., client.api_url)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

/// Presentation settings shared by the commands
struct Presentation {
    formatter: Box<dyn OutputFormatter>,
    console: ConsoleOptions,
}

impl Presentation {
    fn new(config: &AppConfig, flag: Option<&str>) -> Result<Self> {
        let format = OutputFormat::resolve(
            flag,
            &config.output.default_format,
            terminal::is_interactive(),
        )?;
        let use_color = config.output.color_enabled && terminal::supports_ansi();
        let text = format == OutputFormat::Text;

        Ok(Self {
            formatter: create_formatter(format, use_color),
            console: ConsoleOptions {
                live_notifications: text && terminal::stderr_is_terminal(),
                use_color: config.output.color_enabled && terminal::stderr_is_terminal(),
                show_spinner: text
                    && config.output.spinner_enabled
                    && terminal::should_show_spinner_by_default(),
            },
        })
    }
}

fn init_logging(debug: bool) {
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("dashboard_core", log::LevelFilter::Debug)
            .filter_module("dashboard_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    let debug = cli.debug;

    match run(cli).await {
        Ok(ExitCode::Success) => {}
        Ok(code) => std::process::exit(code as i32),
        Err(error) => {
            let error = CliError::from(error);
            eprint!("{}", error.format_for_user(debug));
            std::process::exit(error.exit_code() as i32);
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let command = match cli.command {
        Commands::Config { command } => {
            config_command(command)?;
            return Ok(ExitCode::Success);
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            return Ok(ExitCode::Success);
        }
        command => command,
    };

    let mut config = get_config().context("Failed to load configuration")?;
    config.apply_cli_overrides(cli.api_url, cli.locale);
    let presentation = Presentation::new(&config, cli.format.as_deref())?;

    match command {
        Commands::Product {
            command: ProductCommand::Update { id, changes },
        } => product_update(&config, &presentation, &id, &changes).await,
        Commands::Taxes { command } => taxes_command(&config, &presentation, command).await,
        Commands::Order {
            command:
                OrderCommand::TransactionAction {
                    id,
                    action,
                    amount,
                    yes,
                },
        } => transaction_action(&config, &presentation, &id, action, amount, yes).await,
        Commands::Money { amount, currency } => {
            money_command(&config, &presentation, amount, &currency)
        }
        Commands::Config { .. } | Commands::Completions { .. } => Ok(ExitCode::Success),
    }
}

fn connect(config: &AppConfig) -> Result<Arc<SaleorApi>> {
    log::debug!("Using API at {}", config.client.api_url);
    let api = SaleorApi::new(&config.client).context("Failed to create API client")?;
    Ok(Arc::new(api))
}

async fn product_update(
    config: &AppConfig,
    presentation: &Presentation,
    id: &str,
    changes_path: &Path,
) -> Result<ExitCode> {
    let changes = ProductChanges::from_file(changes_path).await?;
    let base_dir = changes_path.parent().unwrap_or_else(|| Path::new("."));

    let orchestrator = ProductUpdateOrchestrator::new(connect(config)?, presentation.console);
    let report = orchestrator.update(id, changes, base_dir).await?;

    println!("{}", presentation.formatter.format_product_update(&report)?);
    Ok(if report.is_success() {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    })
}

async fn taxes_command(
    config: &AppConfig,
    presentation: &Presentation,
    command: TaxesCommand,
) -> Result<ExitCode> {
    let orchestrator = TaxOrchestrator::new(connect(config)?, presentation.console);

    let reports = match command {
        TaxesCommand::List { country } => {
            let report = orchestrator.list(country.as_deref()).await?;
            println!("{}", presentation.formatter.format_tax_list(&report)?);
            return Ok(ExitCode::Success);
        }
        TaxesCommand::Update { country, rates } => {
            vec![orchestrator.update(&country, &rates).await?]
        }
        TaxesCommand::AddCountry { countries, rates } => {
            orchestrator.add_countries(&countries, &rates).await?
        }
    };

    println!("{}", presentation.formatter.format_tax_updates(&reports)?);
    Ok(if reports.iter().all(|report| report.is_success()) {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    })
}

async fn transaction_action(
    config: &AppConfig,
    presentation: &Presentation,
    id: &str,
    action: TransactionAction,
    amount: Option<Decimal>,
    yes: bool,
) -> Result<ExitCode> {
    let orchestrator = TransactionOrchestrator::new(connect(config)?);

    let report = orchestrator
        .run(id, action, amount, |dialog| {
            if yes {
                return Ok(true);
            }
            if !terminal::is_interactive() {
                return Err(CliError::misuse(&format!(
                    "{} needs confirmation; pass --yes when not running in a terminal",
                    dialog.title()
                ))
                .into());
            }
            eprintln!("{}", dialog.title().bold());
            eprintln!("{}", dialog.warning_text());
            let confirmed = Confirm::new()
                .with_prompt(dialog.confirm_label())
                .default(false)
                .interact()
                .context("Failed to read confirmation")?;
            Ok(confirmed)
        })
        .await?;

    println!("{}", presentation.formatter.format_transaction(&report)?);
    Ok(if report.confirmed && !report.is_success() {
        ExitCode::GeneralError
    } else {
        ExitCode::Success
    })
}

fn money_command(
    config: &AppConfig,
    presentation: &Presentation,
    amount: Decimal,
    currency: &str,
) -> Result<ExitCode> {
    let locale: Locale = config.client.locale();
    let money = Money::new(amount, currency.to_uppercase());
    let display = MoneyDisplay::new(&locale, Some(&money))
        .context("Nothing to display")?;

    let report = MoneyReport {
        currency: display.currency,
        amount: display.amount,
        locale: locale.tag().to_string(),
    };
    println!("{}", presentation.formatter.format_money(&report)?);
    Ok(ExitCode::Success)
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            let value = manager.get(&key)?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut sections: std::collections::BTreeMap<String, Vec<(String, String)>> =
                std::collections::BTreeMap::new();
            for (key, value) in items {
                let section = key.split('.').next().unwrap_or("general").to_string();
                sections.entry(section).or_default().push((key, value));
            }

            for (section, mut items) in sections {
                println!("[{section}]");
                items.sort_by(|a, b| a.0.cmp(&b.0));
                for (key, value) in items {
                    let display_key = key.split_once('.').map_or(key.as_str(), |(_, rest)| rest);
                    println!("  {display_key} = {value}");
                }
                println!();
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
