//! nanofi-cli: drive the patent vault wizard from the terminal.
//!
//! Answers are a JSON object keyed by section id (`inventor`, `patent`, ...),
//! each holding that section's field values. The wizard is walked exactly as the
//! browser does it, so a missing or invalid field blocks at the same section.

use std::path::PathBuf;
use std::process;

use nanofi::auth::{AccountStore, AuthState, User};
use nanofi::config::AppConfig;
use nanofi::error::WizardError;
use nanofi::fields::{section_fields, SectionDraft, SectionForm};
use nanofi::kv::FileStore;
use nanofi::notice::Notice;
use nanofi::section::{SectionId, SECTIONS};
use nanofi::submission::PersistenceGateway;
use nanofi::vault::{ApplicationStatus, StoredApplication, VaultStorage};
use nanofi::wizard::{Submitted, Wizard};
use serde_json::Value;
use tracing::{debug, info};

fn usage() -> ! {
    eprintln!("nanofi-cli (patent vault wizard, local store)");
    eprintln!("Usage: nanofi-cli [--data-dir path] [--config path] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  sections                         List wizard sections and their fields");
    eprintln!("  submit <answers.json> [--email addr]  Walk the wizard and store the application");
    eprintln!("  list [--email addr]              List stored applications");
    eprintln!("  show <id>                        Print one stored application as JSON");
    eprintln!("  review <id> <approve|reject>     Record the review outcome for an application");
    eprintln!("  paths                            Show data directory and file paths");
    process::exit(1);
}

struct Options {
    data_dir: PathBuf,
    config: Option<PathBuf>,
    email: Option<String>,
    args: Vec<String>,
}

impl Options {
    fn store_file(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    fn config_file(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.data_dir.join("config.json"))
    }
}

fn default_data_dir() -> Result<PathBuf, String> {
    let base = dirs::data_dir().ok_or("Could not determine data directory")?;
    Ok(base.join("nanofi"))
}

fn parse_args() -> Result<Options, String> {
    let mut data_dir = None;
    let mut config = None;
    let mut email = None;
    let mut args = Vec::new();

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--data-dir" => data_dir = Some(PathBuf::from(it.next().ok_or("--data-dir needs a path")?)),
            "--config" => config = Some(PathBuf::from(it.next().ok_or("--config needs a path")?)),
            "--email" => email = Some(it.next().ok_or("--email needs an address")?),
            "-h" | "--help" => usage(),
            _ => args.push(arg),
        }
    }
    if args.is_empty() {
        usage();
    }

    let data_dir = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    Ok(Options {
        data_dir,
        config,
        email,
        args,
    })
}

/// Why an answer file did not produce a stored application.
#[derive(Debug)]
enum RunError {
    Blocked {
        section: SectionId,
        errors: Vec<(&'static str, String)>,
    },
    Wizard(WizardError),
}

impl From<WizardError> for RunError {
    fn from(e: WizardError) -> Self {
        RunError::Wizard(e)
    }
}

/// Walks every section with its answers and submits from the last one.
fn run_answers<G>(
    wizard: &mut Wizard,
    answers: &Value,
    gateway: &mut G,
    auth: &AuthState,
) -> Result<Submitted, RunError>
where
    G: PersistenceGateway,
{
    for id in SectionId::all() {
        let draft = SectionDraft::from_snapshot(id, answers.get(id.label()));
        wizard.apply_form(&draft);
        match wizard.continue_from(id) {
            Ok(t) => debug!(section = %id, transition = ?t, "section accepted"),
            Err(WizardError::ValidationBlocked { .. }) => return Err(blocked(&draft)),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(wizard.submit(gateway, auth)?)
}

fn blocked(draft: &SectionDraft) -> RunError {
    RunError::Blocked {
        section: draft.section(),
        errors: draft
            .errors()
            .into_iter()
            .map(|(key, e)| (key, e.to_string()))
            .collect(),
    }
}

fn parse_decision(s: &str) -> Option<ApplicationStatus> {
    match s.to_ascii_lowercase().as_str() {
        "approve" | "approved" => Some(ApplicationStatus::Approved),
        "reject" | "rejected" => Some(ApplicationStatus::Rejected),
        "pending" => Some(ApplicationStatus::Pending),
        _ => None,
    }
}

fn print_application(app: &StoredApplication) {
    println!(
        "{:<36} {:<24} {:<16} {}",
        app.id,
        app.submitted_at.format("%Y-%m-%d %H:%M"),
        app.status.label(),
        app.patent_title().unwrap_or("(untitled)"),
    );
}

fn main() {
    tracing_subscriber::fmt::init();

    let make_error = |msg: &str| -> ! {
        eprintln!("{msg}");
        process::exit(1);
    };

    let opts = parse_args().unwrap_or_else(|e| make_error(&e));
    let cmd = opts.args[0].as_str();

    if cmd == "sections" {
        for (i, s) in SECTIONS.iter().enumerate() {
            println!("{}. {} ({})", i + 1, s.title, s.id);
            println!("   {}", s.description);
            for f in section_fields(s.id) {
                let req = if f.required { "*" } else { " " };
                println!("   {req} {:<28} {}", f.key, f.label);
            }
        }
        return;
    }
    if cmd == "paths" {
        println!("Data directory: {}", opts.data_dir.display());
        println!("Store file: {}", opts.store_file().display());
        println!("Config file: {}", opts.config_file().display());
        return;
    }

    let config = AppConfig::load_or_default(&opts.config_file())
        .unwrap_or_else(|e| make_error(&format!("Error: {e}")));
    if let Err(e) = std::fs::create_dir_all(&opts.data_dir) {
        make_error(&format!("Failed to create data directory: {e}"));
    }
    let store = FileStore::open(opts.store_file())
        .unwrap_or_else(|e| make_error(&format!("Error: {e}")));

    match cmd {
        "submit" => {
            let Some(path) = opts.args.get(1) else { usage() };
            let raw = std::fs::read_to_string(path)
                .unwrap_or_else(|e| make_error(&format!("Failed to read {path}: {e}")));
            let answers: Value = serde_json::from_str(&raw)
                .unwrap_or_else(|e| make_error(&format!("Failed to parse {path}: {e}")));

            // Submitting on behalf of an account needs that account to exist locally.
            let (auth, store) = match &opts.email {
                Some(email) => {
                    let accounts = AccountStore::new(store, &config);
                    let user = match accounts.profile(email) {
                        Ok(Some(p)) => User {
                            email: p.email,
                            name: p.name,
                        },
                        Ok(None) => make_error(&format!("No account found for {email}")),
                        Err(e) => make_error(&format!("Error: {e}")),
                    };
                    (AuthState::signed_in(user), accounts.into_inner())
                }
                None => (AuthState::anonymous(), store),
            };

            let mut vault = VaultStorage::new(store, &config);
            let mut wizard = Wizard::with_config(&config);
            match run_answers(&mut wizard, &answers, &mut vault, &auth) {
                Ok(done) => {
                    info!(id = %done.id, "stored");
                    let notice = Notice::submitted(&config.review_window);
                    println!("{}", notice.title);
                    println!("{}", notice.description);
                    println!("Application id: {}", done.id);
                }
                Err(RunError::Blocked { section, errors }) => {
                    let notice = Notice::validation_blocked();
                    eprintln!("{}: {}", notice.title, notice.description);
                    eprintln!("Section '{}' ({}):", section.descriptor().title, section);
                    for (key, msg) in errors {
                        eprintln!("  {key}: {msg}");
                    }
                    process::exit(1);
                }
                Err(RunError::Wizard(e)) => {
                    if let Some(notice) = Notice::for_error(&e) {
                        eprintln!("{}: {}", notice.title, notice.description);
                    }
                    make_error(&format!("Error: {e}"));
                }
            }
        }
        "list" => {
            let vault = VaultStorage::new(store, &config);
            let apps = match &opts.email {
                Some(email) => vault.applications_by(email),
                None => vault.applications(),
            }
            .unwrap_or_else(|e| make_error(&format!("Error: {e}")));
            if apps.is_empty() {
                println!("No applications stored.");
            }
            for app in &apps {
                print_application(app);
            }
        }
        "show" => {
            let Some(id) = opts.args.get(1) else { usage() };
            let vault = VaultStorage::new(store, &config);
            match vault.application(id) {
                Ok(Some(app)) => match serde_json::to_string_pretty(&app) {
                    Ok(json) => println!("{json}"),
                    Err(e) => make_error(&format!("Error: {e}")),
                },
                Ok(None) => make_error(&format!("No application with id {id}")),
                Err(e) => make_error(&format!("Error: {e}")),
            }
        }
        "review" => {
            let (Some(id), Some(decision)) = (opts.args.get(1), opts.args.get(2)) else {
                usage()
            };
            let Some(status) = parse_decision(decision) else {
                make_error(&format!("Unknown decision '{decision}' (expected approve or reject)"))
            };
            let mut vault = VaultStorage::new(store, &config);
            match vault.set_status(id, status) {
                Ok(Some(app)) => {
                    info!(%id, ?status, "reviewed");
                    print_application(&app);
                }
                Ok(None) => make_error(&format!("No application with id {id}")),
                Err(e) => make_error(&format!("Error: {e}")),
            }
        }
        _ => usage(),
    }
}
