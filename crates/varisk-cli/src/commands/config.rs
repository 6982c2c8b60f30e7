//! Config command implementation.
//!
//! Manages persistent CLI defaults. Values set here fill in any flag the
//! user leaves out; explicit flags always win.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use varisk_core::config::MAX_PRECISION;
use varisk_core::{VaRMethod, DEFAULT_HORIZON_DAYS, DEFAULT_TRIALS};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "VARISK_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Default VaR method
    DefaultMethod,
    /// Default Monte Carlo horizon
    DefaultDays,
    /// Default Monte Carlo trial count
    DefaultTrials,
    /// Decimal places of reported VaR
    DecimalPrecision,
    /// Default price file
    PriceFile,
    /// Default Monte Carlo seed
    Seed,
}

impl ConfigKey {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_method" | "method" => Some(Self::DefaultMethod),
            "default_days" | "days" => Some(Self::DefaultDays),
            "default_trials" | "trials" => Some(Self::DefaultTrials),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "price_file" | "prices" => Some(Self::PriceFile),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultMethod => "default_method",
            Self::DefaultDays => "default_days",
            Self::DefaultTrials => "default_trials",
            Self::DecimalPrecision => "decimal_precision",
            Self::PriceFile => "price_file",
            Self::Seed => "seed",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultMethod => "Default method (variance-covariance, historical, monte-carlo)",
            Self::DefaultDays => "Default Monte Carlo horizon in days (>= 1)",
            Self::DefaultTrials => "Default Monte Carlo trial count (>= 1)",
            Self::DecimalPrecision => "Number of decimal places for VaR (0-12)",
            Self::PriceFile => "CSV file with instrument_id,date,close columns",
            Self::Seed => "Monte Carlo seed (unsigned integer)",
        }
    }

    fn default_value(&self) -> String {
        match self {
            Self::DefaultFormat => "table".to_string(),
            Self::DefaultMethod => VaRMethod::VarianceCovariance.as_str().to_string(),
            Self::DefaultDays => DEFAULT_HORIZON_DAYS.to_string(),
            Self::DefaultTrials => DEFAULT_TRIALS.to_string(),
            Self::DecimalPrecision => varisk_core::config::DEFAULT_PRECISION.to_string(),
            Self::PriceFile => String::new(),
            Self::Seed => varisk_risk::calculator::DEFAULT_SEED.to_string(),
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultMethod,
            Self::DefaultDays,
            Self::DefaultTrials,
            Self::DecimalPrecision,
            Self::PriceFile,
            Self::Seed,
        ]
    }
}

/// Persisted CLI settings.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Settings {
    /// Loads settings, or defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }

    fn value(&self, key: ConfigKey) -> String {
        self.get(key)
            .map_or_else(|| key.default_value(), ToString::to_string)
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    /// Configured output format.
    pub fn format(&self) -> Result<OutputFormat> {
        let value = self.value(ConfigKey::DefaultFormat);
        OutputFormat::from_str(&value, true)
            .map_err(|_| anyhow::anyhow!("Invalid configured format: {}", value))
    }

    /// Configured VaR method.
    pub fn method(&self) -> Result<VaRMethod> {
        Ok(self.value(ConfigKey::DefaultMethod).parse()?)
    }

    /// Configured Monte Carlo horizon.
    pub fn days(&self) -> Result<u32> {
        parse_number(ConfigKey::DefaultDays, &self.value(ConfigKey::DefaultDays))
    }

    /// Configured Monte Carlo trial count.
    pub fn trials(&self) -> Result<u32> {
        parse_number(ConfigKey::DefaultTrials, &self.value(ConfigKey::DefaultTrials))
    }

    /// Configured rounding precision.
    pub fn precision(&self) -> Result<u32> {
        parse_number(ConfigKey::DecimalPrecision, &self.value(ConfigKey::DecimalPrecision))
    }

    /// Configured Monte Carlo seed.
    pub fn seed(&self) -> Result<u64> {
        parse_number(ConfigKey::Seed, &self.value(ConfigKey::Seed))
    }

    /// Configured price file, if any.
    pub fn price_file(&self) -> Option<PathBuf> {
        self.get(ConfigKey::PriceFile)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }
}

fn parse_number<T: std::str::FromStr>(key: ConfigKey, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {}: {}. Must be a number.", key.as_str(), value))
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("varisk").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(get_args, format),
        ConfigCommand::Set(set_args) => execute_set(set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let settings = Settings::load()?;

    let results: Vec<_> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), settings.value(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<_, _> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), settings.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), settings.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load()?;

    let key = ConfigKey::parse(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;
    let value = settings.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs) -> Result<()> {
    let key = ConfigKey::parse(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;

    validate_config_value(key, &args.value)?;

    let mut settings = Settings::load()?;
    settings.set(key, args.value.clone());
    settings.save()?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<_> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value().as_str()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    if args.all {
        // A corrupt file is replaced rather than parsed.
        Settings::default().save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key_str))?;
        let mut settings = Settings::load()?;
        settings.remove(key);
        settings.save()?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::DefaultFormat => {
            if OutputFormat::from_str(value, true).is_err() {
                return Err(anyhow::anyhow!(
                    "Invalid format: {}. Use table, json, csv, or minimal.",
                    value
                ));
            }
        }
        ConfigKey::DefaultMethod => {
            value.parse::<VaRMethod>()?;
        }
        ConfigKey::DefaultDays | ConfigKey::DefaultTrials => {
            let n: u32 = parse_number(key, value)?;
            if n < 1 {
                return Err(anyhow::anyhow!(
                    "Invalid {}: {}. Must be at least 1.",
                    key.as_str(),
                    n
                ));
            }
        }
        ConfigKey::DecimalPrecision => {
            let precision: u32 = parse_number(key, value)?;
            if precision > MAX_PRECISION {
                return Err(anyhow::anyhow!(
                    "Invalid precision: {}. Must be between 0 and {}.",
                    precision,
                    MAX_PRECISION
                ));
            }
        }
        ConfigKey::PriceFile => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("Price file path must not be empty"));
            }
        }
        ConfigKey::Seed => {
            parse_number::<u64>(key, value)?;
        }
    }
    Ok(())
}
