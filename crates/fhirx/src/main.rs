use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

mod commands;

use commands::CliError;

/// Standardized exit codes for CLI.
/// 0 = OK, 2 = input error, 3 = conflict, 4 = auth (401/403), 1 = other.
const EXIT_OK: i32 = 0;
const EXIT_OTHER: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFLICT: i32 = 3;
const EXIT_AUTH: i32 = 4;

#[derive(Parser)]
#[command(name = "fhirx", version, about = "Care-context CLI: generate OTP, validate, link")]
struct Cli {
    /// Gate server URL (default: http://localhost:3000)
    #[arg(long, env = "FHIR_GATE_URL", default_value = "http://localhost:3000")]
    gate: String,

    /// Value sent as the Authorization header
    #[arg(long, env = "FHIR_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request an OTP for linking a care context
    GenerateOtp {
        /// Path to request JSON file (or - for stdin); ignored with --health-id
        #[arg(default_value = "-")]
        file: String,
        /// Build the request from flags instead of a file
        #[arg(long)]
        health_id: Option<String>,
        #[arg(long, default_value = "MOBILE_OTP")]
        auth_mode: String,
        #[arg(long)]
        health_id_number: Option<String>,
    },
    /// Validate an OTP and create the care context
    ValidateOtp {
        /// Path to request JSON file (or - for stdin); ignored with --health-id
        #[arg(default_value = "-")]
        file: String,
        #[arg(long)]
        health_id: Option<String>,
        #[arg(long)]
        otp: Option<String>,
        #[arg(long)]
        txn_id: Option<String>,
        #[arg(long)]
        visit_code: Option<String>,
        #[arg(long)]
        beneficiary_id: Option<String>,
        #[arg(long)]
        beneficiary_reg_id: Option<String>,
        #[arg(long)]
        visit_category: Option<String>,
        #[arg(long)]
        health_id_number: Option<String>,
    },
    /// Save a care context record through the gate
    Save {
        /// Path to request JSON file (or - for stdin)
        #[arg(default_value = "-")]
        file: String,
    },
    /// Check gate server health
    Health,
}

/// Map an error to an exit code by its exact envelope status.
fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Status { code: 401 | 403, .. } => EXIT_AUTH,
        CliError::Status { code: 409, .. } => EXIT_CONFLICT,
        CliError::Status {
            code: 400 | 415 | 422,
            ..
        }
        | CliError::Input(_) => EXIT_INPUT,
        CliError::Status { .. } | CliError::Other(_) => EXIT_OTHER,
    }
}

fn main() {
    let cli = Cli::parse();
    let client = commands::Client::new(&cli.gate, cli.token.as_deref());

    let result = match cli.command {
        Commands::GenerateOtp {
            file,
            health_id,
            auth_mode,
            health_id_number,
        } => {
            commands::generate_otp_body(&file, health_id, auth_mode, health_id_number)
                .and_then(|body| commands::generate_otp(&client, &body))
        }
        Commands::ValidateOtp {
            file,
            health_id,
            otp,
            txn_id,
            visit_code,
            beneficiary_id,
            beneficiary_reg_id,
            visit_category,
            health_id_number,
        } => commands::validate_otp_body(
            &file,
            health_id,
            commands::ValidateFlags {
                otp,
                txn_id,
                visit_code,
                beneficiary_id,
                beneficiary_reg_id,
                visit_category,
                health_id_number,
            },
        )
        .and_then(|body| commands::validate_otp(&client, &body)),
        Commands::Save { file } => {
            commands::read_input(&file).and_then(|body| commands::save(&client, &body))
        }
        Commands::Health => commands::health(&client),
    };

    let code = match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            exit_code_for(&e)
        }
    };
    process::exit(code);
}
