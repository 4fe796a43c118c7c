use care_context::{GenerateOtpRequest, OutputResponse, ValidateOtpRequest};
use colored::Colorize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::{self, Read};

/// Command failure; the exit code is chosen from the variant, never the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Local input could not be read or was incomplete.
    Input(String),
    /// The gate answered with an error envelope or a failing HTTP status.
    Status { code: i32, message: String },
    Other(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Input(msg) | CliError::Other(msg) => f.write_str(msg),
            CliError::Status { code, message } => write!(f, "status {code}: {message}"),
        }
    }
}

pub struct Client {
    base: String,
    http: reqwest::blocking::Client,
    token: Option<String>,
}

impl Client {
    pub fn new(base: &str, token: Option<&str>) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
            token: token.map(|t| t.to_string()),
        }
    }

    fn get(&self, path: &str) -> Result<reqwest::blocking::Response, CliError> {
        let url = format!("{}{}", self.base, path);
        self.http
            .get(&url)
            .send()
            .map_err(|e| CliError::Other(format!("request failed: {e}")))
    }

    /// POST the raw request; the Authorization value is passed as given.
    fn post_raw(&self, path: &str, body: &str) -> Result<OutputResponse, CliError> {
        let url = format!("{}{}", self.base, path);
        let mut req = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(ref tok) = self.token {
            req = req.header(reqwest::header::AUTHORIZATION, tok.as_str());
        }
        let resp = req
            .send()
            .map_err(|e| CliError::Other(format!("request failed: {e}")))?;
        let text = resp
            .text()
            .map_err(|e| CliError::Other(format!("read response: {e}")))?;
        OutputResponse::parse(&text).map_err(|e| CliError::Other(format!("parse envelope: {e}")))
    }
}

// ── input ───────────────────────────────────────────────────────

pub fn read_input(file: &str) -> Result<String, CliError> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::Input(format!("read stdin: {e}")))?;
        Ok(buf)
    } else {
        fs::read_to_string(file).map_err(|e| CliError::Input(format!("read file: {e}")))
    }
}

pub fn generate_otp_body(
    file: &str,
    health_id: Option<String>,
    auth_mode: String,
    health_id_number: Option<String>,
) -> Result<String, CliError> {
    let Some(health_id) = health_id else {
        return read_input(file);
    };
    let req = GenerateOtpRequest {
        health_id,
        authentication_mode: auth_mode,
        health_id_number,
    };
    serde_json::to_string(&req).map_err(|e| CliError::Other(format!("encode request: {e}")))
}

fn missing(flag: &str) -> CliError {
    CliError::Input(format!("missing {flag}"))
}

pub struct ValidateFlags {
    pub otp: Option<String>,
    pub txn_id: Option<String>,
    pub visit_code: Option<String>,
    pub beneficiary_id: Option<String>,
    pub beneficiary_reg_id: Option<String>,
    pub visit_category: Option<String>,
    pub health_id_number: Option<String>,
}

pub fn validate_otp_body(
    file: &str,
    health_id: Option<String>,
    flags: ValidateFlags,
) -> Result<String, CliError> {
    let Some(health_id) = health_id else {
        return read_input(file);
    };
    let req = ValidateOtpRequest {
        health_id,
        otp: flags.otp.ok_or_else(|| missing("--otp"))?,
        txn_id: flags.txn_id.ok_or_else(|| missing("--txn-id"))?,
        visit_code: flags.visit_code,
        beneficiary_id: flags.beneficiary_id,
        beneficiary_reg_id: flags.beneficiary_reg_id,
        visit_category: flags.visit_category,
        health_id_number: flags.health_id_number,
    };
    serde_json::to_string(&req).map_err(|e| CliError::Other(format!("encode request: {e}")))
}

// ── operations ──────────────────────────────────────────────────

pub fn generate_otp(client: &Client, body: &str) -> Result<(), CliError> {
    let env = client.post_raw("/careContext/generateOTPForCareContext", body)?;
    print_envelope(&env)
}

pub fn validate_otp(client: &Client, body: &str) -> Result<(), CliError> {
    let env = client.post_raw("/careContext/validateOTPAndCreateCareContext", body)?;
    print_envelope(&env)
}

pub fn save(client: &Client, body: &str) -> Result<(), CliError> {
    let env = client.post_raw("/careContext/saveCareContextToMongo", body)?;
    print_envelope(&env)
}

/// Print the success slot; turn the error slot into an `Err` for exit mapping.
fn print_envelope(env: &OutputResponse) -> Result<(), CliError> {
    if let Some(err) = env.error() {
        return Err(CliError::Status {
            code: err.status_code,
            message: format!("{} ({})", err.error_message, err.status),
        });
    }
    let Some(response) = env.response() else {
        return Err(CliError::Other(
            "parse envelope: neither response nor error".into(),
        ));
    };
    println!("{}", "OK".green().bold());
    // Pretty-print when the payload is itself JSON.
    match serde_json::from_str::<Value>(response) {
        Ok(v) => println!(
            "{}",
            serde_json::to_string_pretty(&v).unwrap_or_else(|_| response.to_string())
        ),
        Err(_) => println!("{}", response),
    }
    Ok(())
}

// ── health ──────────────────────────────────────────────────────

pub fn health(client: &Client) -> Result<(), CliError> {
    let resp = client.get("/healthz")?;
    let status = resp.status();
    let json: Value = resp
        .json()
        .map_err(|e| CliError::Other(format!("parse response: {e}")))?;
    if status.is_success() && json.get("ok").and_then(|o| o.as_bool()) == Some(true) {
        println!("{} {}", "gate".dimmed(), "healthy".green().bold());
        Ok(())
    } else {
        Err(CliError::Status {
            code: i32::from(status.as_u16()),
            message: "gate unhealthy".into(),
        })
    }
}
