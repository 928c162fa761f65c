use anyhow::{Context, Result};
use clap::Parser;
use std::{env, fs, path::PathBuf};
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use modelgen::codegen::{CodeGenConfig, GoGenerator, UnmappedTypePolicy};
use modelgen::config::{self, ConnectionOverrides};
use modelgen::generate::generate_models;
use modelgen::introspect::FixtureIntrospector;

#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Destination directory for generated models
    #[arg(short, long, default_value = ".")]
    dest: PathBuf,

    /// Path to .env file
    #[arg(long = "env", default_value = ".env")]
    env_file: PathBuf,

    /// Database user [env: DB_USER]
    #[arg(long = "dbuser")]
    db_user: Option<String>,

    /// Database password [env: DB_PASSWORD]
    #[arg(long = "dbpassword")]
    db_password: Option<String>,

    /// Database host [env: DB_HOST, default: 127.0.0.1]
    #[arg(long = "dbhost")]
    db_host: Option<String>,

    /// Database port [env: DB_PORT, default: 3306]
    #[arg(long = "dbport")]
    db_port: Option<String>,

    /// Database name [env: DB_NAME]
    #[arg(long = "dbname")]
    db_name: Option<String>,

    /// Comma-separated list of tables to generate models for [env: TABLES]
    #[arg(long, value_delimiter = ',')]
    tables: Option<Vec<String>>,

    /// Read table columns from a TOML schema file instead of a database
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// Replacement model template (minijinja)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Package name of the generated files
    #[arg(long, default_value = "models")]
    package: String,

    /// Fail on columns whose type has no mapping instead of emitting it verbatim
    #[arg(long)]
    strict_types: bool,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn connection_overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            host: self.db_host.clone(),
            port: self.db_port.clone(),
            database: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!(error = ?e, "Fatal error");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("modelgen v{}", env!("CARGO_PKG_VERSION"));
    info!(
        dest = ?cli.dest,
        schema_file = ?cli.schema_file,
        template = ?cli.template,
        package = ?cli.package,
        strict_types = ?cli.strict_types,
        "Starting model generation"
    );

    config::load_env_file(&cli.env_file).context("Failed to load environment file")?;

    let tables = config::resolve_tables(cli.tables.as_deref(), |key| env::var(key).ok())
        .context("Failed to resolve table list")?;

    let generator = match &cli.template {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            GoGenerator::with_template(source).context("Failed to load template")?
        }
        None => GoGenerator::new(),
    };

    let unmapped_types = if cli.strict_types {
        UnmappedTypePolicy::Deny
    } else {
        UnmappedTypePolicy::Passthrough
    };
    let codegen_config = CodeGenConfig::new(cli.dest.clone())
        .with_package(cli.package.clone())
        .with_unmapped_types(unmapped_types);
    debug!(codegen_config = ?codegen_config, "Code generation config");

    let written = match &cli.schema_file {
        Some(path) => {
            let mut introspector =
                FixtureIntrospector::from_path(path).context("Failed to load schema file")?;
            generate_models(&mut introspector, &generator, &codegen_config, &tables)
                .context("Model generation failed")?
        }
        None => generate_from_mysql(&cli, &generator, &codegen_config, &tables)?,
    };

    for path in &written {
        info!(path = ?path, "Wrote model");
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[cfg(feature = "mysql")]
fn generate_from_mysql(
    cli: &Cli,
    generator: &GoGenerator,
    codegen_config: &CodeGenConfig,
    tables: &[String],
) -> Result<Vec<PathBuf>> {
    use modelgen::config::DbConfig;
    use modelgen::{connect_mysql, MySqlIntrospector};

    let db_config = DbConfig::from_env(&cli.connection_overrides())
        .context("Failed to load database configuration")?;
    debug!(connection = ?db_config.redacted_connection_string(), "Loaded configuration");

    let mut conn = connect_mysql(&db_config).with_context(|| {
        format!(
            "Failed to connect to MySQL at {}",
            db_config.redacted_connection_string()
        )
    })?;

    let mut introspector = MySqlIntrospector::new(&mut conn);
    let written = generate_models(&mut introspector, generator, codegen_config, tables)
        .context("Model generation failed")?;

    Ok(written)
}

#[cfg(not(feature = "mysql"))]
fn generate_from_mysql(
    cli: &Cli,
    _generator: &GoGenerator,
    _codegen_config: &CodeGenConfig,
    _tables: &[String],
) -> Result<Vec<PathBuf>> {
    // Still validate configuration so missing parameters are reported first
    modelgen::config::DbConfig::from_env(&cli.connection_overrides())
        .context("Failed to load database configuration")?;
    anyhow::bail!("MySQL support not enabled. Rebuild with --features mysql or pass --schema-file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "modelgen",
            "--dbuser",
            "root",
            "--dbport",
            "3307",
            "--tables",
            "users,categories",
            "--strict-types",
        ])
        .unwrap();

        assert_eq!(cli.dest, PathBuf::from("."));
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        assert_eq!(cli.package, "models");
        assert!(cli.strict_types);
        assert_eq!(
            cli.tables,
            Some(vec!["users".to_string(), "categories".to_string()])
        );

        let overrides = cli.connection_overrides();
        assert_eq!(overrides.user.as_deref(), Some("root"));
        assert_eq!(overrides.port.as_deref(), Some("3307"));
        assert_eq!(overrides.host, None);
    }
}
