mod formatter;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use keylog::{Domain, Engine, EquationRequest, GeometryRequest, PolynomialRequest};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "keylog")]
#[command(about = "Calculator keylog encoding engine and solver.")]
#[command(
    long_about = "Converts LaTeX-like mathematical input into calculator keystroke sequences (keylogs)\nand solves the same input numerically. Supports geometry operations, systems of linear\nequations, and polynomial root finding, per calculator model version."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory of JSON config files overriding the built-in catalog
    #[arg(short = 'c', long = "config", global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodeDomain {
    Geometry,
    Equation,
    Polynomial,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one expression into keystroke tokens
    ///
    /// Runs the expression through the selected domain's rewrite-rule table
    /// and prints the keystroke token string. Use this to inspect how a
    /// single coefficient will appear inside a keylog.
    Encode {
        /// Expression to encode, e.g. "\frac{1}{2}" or "sqrt(2)*pi"
        input: String,
        /// Rule table to use
        #[arg(short = 'm', long = "domain", value_enum, default_value = "geometry")]
        domain: EncodeDomain,
    },
    /// Process a geometry request from a JSON file
    ///
    /// The file holds {operation, shape_A, data_A, shape_B?, data_B?,
    /// dimension_A?, dimension_B?, version?}. Prints the encoded operands
    /// and the final keylog, or validation errors.
    Geometry {
        /// Path to the JSON request file
        file: PathBuf,
        /// Validate only, without producing a keylog
        #[arg(long)]
        validate: bool,
        /// Output the full result as JSON (for piping to other tools)
        #[arg(short = 'j', long)]
        json: bool,
    },
    /// Solve a system of linear equations and build its keylog
    ///
    /// Each row is a comma-joined coefficient list "c1,c2,...,const"; the
    /// number of rows determines the variable count (2, 3, or 4).
    /// Coefficients may be LaTeX-like expressions.
    Equation {
        /// Equation rows, one argument per row (e.g. "1,0,5" "0,1,3")
        #[arg(required = true)]
        rows: Vec<String>,
        /// Calculator model version
        #[arg(short = 'V', long)]
        version: Option<String>,
        /// Output the full result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },
    /// Encode a polynomial and optionally compute its roots
    ///
    /// Coefficients are ordered per the catalog's degree entry
    /// (highest-degree-first by default).
    Poly {
        /// Degree key, e.g. 2, 3, or 4
        degree: String,
        /// Coefficient expressions, e.g. 1 -5 6
        #[arg(required = true)]
        coefficients: Vec<String>,
        /// Compute roots alongside the keylog
        #[arg(short = 's', long)]
        solve: bool,
        /// Calculator model version
        #[arg(short = 'V', long)]
        version: Option<String>,
        /// Output the full result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },
    /// List catalog contents: shapes, operations, versions, templates
    ///
    /// Use this to discover what a given configuration supports before
    /// building requests.
    Catalog,
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// Exposes the engine over HTTP: geometry processing/validation/batch,
    /// equation solving, polynomial solving, and catalog metadata.
    Server {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();
    let engine = build_engine(cli.config_dir.as_deref());

    let result = match &cli.command {
        Commands::Encode { input, domain } => encode_command(&engine, input, *domain),
        Commands::Geometry {
            file,
            validate,
            json,
        } => geometry_command(&engine, file, *validate, *json),
        Commands::Equation {
            rows,
            version,
            json,
        } => equation_command(&engine, rows, version.clone(), *json),
        Commands::Poly {
            degree,
            coefficients,
            solve,
            version,
            json,
        } => poly_command(&engine, degree, coefficients, *solve, version.clone(), *json),
        Commands::Catalog => catalog_command(&engine),
        Commands::Server { host, port } => server_command(engine, host, *port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_engine(config_dir: Option<&Path>) -> Engine {
    match config_dir {
        Some(dir) => Engine::from_config_dir(dir),
        None => Engine::new(),
    }
}

fn encode_command(engine: &Engine, input: &str, domain: EncodeDomain) -> Result<()> {
    let domain = match domain {
        EncodeDomain::Geometry => Domain::Geometry,
        EncodeDomain::Equation => Domain::Equation,
        EncodeDomain::Polynomial => Domain::Polynomial,
    };
    println!("{}", engine.encode(input, domain));
    Ok(())
}

fn geometry_command(engine: &Engine, file: &Path, validate: bool, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let request: GeometryRequest =
        serde_json::from_str(&text).with_context(|| format!("invalid request in {}", file.display()))?;

    if validate {
        let report = engine.validate_geometry(&request);
        print!("{}", formatter::format_validation(&report, json)?);
        if !report.valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    let result = engine.process_geometry(&request)?;
    print!("{}", formatter::format_geometry(&result, json)?);
    Ok(())
}

fn equation_command(
    engine: &Engine,
    rows: &[String],
    version: Option<String>,
    json: bool,
) -> Result<()> {
    let request = EquationRequest {
        operation: format!("Giải hệ {} ẩn", rows.len().clamp(2, 4)),
        equations: rows.to_vec(),
        version,
    };
    let report = engine.process_equation(&request)?;
    print!("{}", formatter::format_equation(&report, json)?);
    Ok(())
}

fn poly_command(
    engine: &Engine,
    degree: &str,
    coefficients: &[String],
    solve: bool,
    version: Option<String>,
    json: bool,
) -> Result<()> {
    let request = PolynomialRequest {
        degree: degree.to_string(),
        coefficients: coefficients.to_vec(),
        version,
        solve,
    };
    let report = engine.process_polynomial(&request)?;
    print!("{}", formatter::format_polynomial(&report, json)?);
    Ok(())
}

fn catalog_command(engine: &Engine) -> Result<()> {
    print!("{}", formatter::format_catalog(engine));
    Ok(())
}

#[cfg(feature = "server")]
fn server_command(engine: Engine, host: &str, port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::http::start_server(engine, host, port))
}

#[cfg(not(feature = "server"))]
fn server_command(_engine: Engine, _host: &str, _port: u16) -> Result<()> {
    anyhow::bail!("this binary was built without the 'server' feature")
}
