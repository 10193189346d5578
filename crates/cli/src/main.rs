// taxcheck - verify species names in a field survey table against a
// taxonomic name authority (ITIS by default)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use taxcheck_cli::exit_codes::{
    pipeline_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_OUTPUT_IO, EXIT_SUCCESS, EXIT_UNKNOWN_GROUP,
    EXIT_USAGE,
};
use taxcheck_cli::export;
use taxcheck_cli::logging::{init_tracing, level_for};
use taxcheck_cli::pipeline::{list_groups, run_pipeline, PipelineError, VerifyRequest};
use taxcheck_config::{ConfigError, Settings};
use taxcheck_itis_client::{ClientOptions, ItisClient, USER_AGENT};
use taxcheck_recon::{normalize, CancelToken, ReconConfig, ResponseShape, Throttle};

#[derive(Parser)]
#[command(name = "taxcheck")]
#[command(about = "Verify species names in a survey table against a taxonomic authority")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Log each request
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Log as newline-delimited JSON (stderr)
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct values of componente_biologico
    #[command(after_help = "\
Examples:
  taxcheck groups muestreo.csv
  taxcheck groups muestreo.csv --encoding windows-1252")]
    Groups {
        /// Survey table (CSV, TSV, semicolon or pipe delimited)
        file: PathBuf,

        /// Text encoding label (utf-8, windows-1252, latin1, ...)
        #[arg(long, short = 'e')]
        encoding: Option<String>,

        /// Config file (default: ~/.config/taxcheck/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Look up every distinct species name of one group
    #[command(after_help = "\
Lookups run one at a time with at least 500 ms between them.

Examples:
  taxcheck verify muestreo.csv
  taxcheck verify muestreo.csv --group flora --out resultados.csv
  taxcheck verify muestreo.csv --json > informe.json")]
    Verify {
        /// Survey table (CSV, TSV, semicolon or pipe delimited)
        file: PathBuf,

        /// Group to verify (default: first group in the file)
        #[arg(long, short = 'g')]
        group: Option<String>,

        /// Text encoding label (utf-8, windows-1252, latin1, ...)
        #[arg(long, short = 'e')]
        encoding: Option<String>,

        /// Print the full report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write especie,estado,nombre_encontrado CSV here
        #[arg(long, short = 'o', value_name = "CSV")]
        out: Option<PathBuf>,

        /// Authority search URL
        #[arg(long, env = "TAXCHECK_ENDPOINT")]
        endpoint: Option<String>,

        /// Pause after each lookup, milliseconds (minimum 500)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Per-request timeout, seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Config file (default: ~/.config/taxcheck/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print names with sp./cf./aff. qualifiers removed
    Normalize {
        /// Species names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json, level_for(cli.quiet, cli.verbose));

    let result = match cli.command {
        Commands::Groups { file, encoding, config } => cmd_groups(file, encoding, config),
        Commands::Verify {
            file,
            group,
            encoding,
            json,
            out,
            endpoint,
            delay_ms,
            timeout,
            config,
        } => cmd_verify(VerifyArgs {
            file,
            group,
            encoding,
            json,
            out,
            endpoint,
            delay_ms,
            timeout,
            config,
        }),
        Commands::Normalize { names } => cmd_normalize(names),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT_IO, message: msg.into(), hint: None }
    }

    pub fn config(err: ConfigError) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: err.to_string(),
            hint: Some(format!("default config path: {}", Settings::config_path().display())),
        }
    }

    pub fn pipeline(err: PipelineError) -> Self {
        let hint = match &err {
            PipelineError::Schema(_) => {
                Some("the header needs columns named exactly componente_biologico and especie".to_string())
            }
            PipelineError::UnknownGroup { .. } => Some("run `taxcheck groups FILE` to list groups".to_string()),
            PipelineError::Load(taxcheck_io::LoadError::UnknownEncoding(_)) => {
                Some("use a WHATWG label such as utf-8, windows-1252 or latin1".to_string())
            }
            _ => None,
        };
        Self { code: pipeline_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// groups
// ============================================================================

fn cmd_groups(file: PathBuf, encoding: Option<String>, config: Option<PathBuf>) -> Result<(), CliError> {
    let settings = Settings::load(config.as_deref()).map_err(CliError::config)?;
    let encoding = encoding.unwrap_or(settings.input.encoding);
    let bytes = read_input(&file)?;

    let groups = list_groups(&bytes, &encoding).map_err(CliError::pipeline)?;
    if groups.is_empty() {
        return Err(CliError {
            code: EXIT_UNKNOWN_GROUP,
            message: PipelineError::NoGroups.to_string(),
            hint: None,
        });
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for group in groups {
        writeln!(handle, "{}", group).map_err(|e| CliError::output(e.to_string()))?;
    }
    Ok(())
}

// ============================================================================
// verify
// ============================================================================

struct VerifyArgs {
    file: PathBuf,
    group: Option<String>,
    encoding: Option<String>,
    json: bool,
    out: Option<PathBuf>,
    endpoint: Option<String>,
    delay_ms: Option<u64>,
    timeout: Option<u64>,
    config: Option<PathBuf>,
}

fn cmd_verify(args: VerifyArgs) -> Result<(), CliError> {
    let mut settings = Settings::load(args.config.as_deref()).map_err(CliError::config)?;
    if let Some(endpoint) = args.endpoint {
        settings.authority.endpoint = endpoint;
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.lookup.delay_ms = delay_ms;
    }
    if let Some(timeout) = args.timeout {
        settings.authority.timeout_secs = timeout;
    }
    if let Some(encoding) = args.encoding {
        settings.input.encoding = encoding;
    }
    settings.validate().map_err(CliError::config)?;

    let request = VerifyRequest {
        uploaded_bytes: read_input(&args.file)?,
        encoding: settings.input.encoding.clone(),
        selected_group: args.group,
    };

    let client = ItisClient::new(ClientOptions {
        endpoint: settings.authority.endpoint.clone(),
        search_param: settings.authority.search_param.clone(),
        timeout: Duration::from_secs(settings.authority.timeout_secs),
        user_agent: USER_AGENT.to_string(),
    })
    .map_err(|e| CliError {
        code: EXIT_CONFIG,
        message: e.to_string(),
        hint: Some("set [authority] endpoint in the config file or pass --endpoint".to_string()),
    })?;

    let recon_config = ReconConfig {
        authority_name: settings.authority.name.clone(),
        shape: ResponseShape {
            candidates_field: settings.authority.candidates_field.clone(),
            display_field: settings.authority.display_field.clone(),
        },
    };
    let mut throttle = Throttle::new(Duration::from_millis(settings.lookup.delay_ms));

    let outcome = run_pipeline(&request, &client, &recon_config, &mut throttle, &CancelToken::new())
        .map_err(CliError::pipeline)?;

    if let Some(path) = &args.out {
        export::write_csv_file(path, &outcome.report).map_err(CliError::output)?;
    }

    let rendered = if args.json {
        let mut json = serde_json::to_string_pretty(&outcome).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        })?;
        json.push('\n');
        json
    } else {
        format!(
            "Grupo: {}\n\n{}\n{}",
            outcome.group,
            export::render_summary(&outcome.report),
            export::render_table(&outcome.report)
        )
    };
    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .map_err(|e| CliError::output(e.to_string()))?;

    if outcome.report.meta.cancelled {
        tracing::warn!(done = outcome.report.summary.total, "run cancelled; results are partial");
    }
    Ok(())
}

// ============================================================================
// normalize
// ============================================================================

fn cmd_normalize(names: Vec<String>) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for name in names {
        writeln!(handle, "{}", normalize(&name)).map_err(|e| CliError::output(e.to_string()))?;
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|e| {
        CliError::usage(format!("cannot read {}: {}", path.display(), e)).with_hint("check the input path")
    })
}
