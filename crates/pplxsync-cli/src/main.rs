//! pplxsync — forward Perplexity and ChatGPT auth cookies from a local
//! Chrome session to a perplexity-api-free API server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod popup;

use popup::{StatusKind, StatusLine};
use pplxsync_client::{setup, sync_cookies, ApiClient, SetupOutcome, SystemClipboard};
use pplxsync_cookies::{CdpCookieJar, CookieJar, DEFAULT_CDP_URL};
use pplxsync_core::{mask_key, SettingsStore, Target};
use pplxsync_relay::{Relay, RelayRequest, RelayResponse};

fn resolve_data_dir() -> PathBuf {
    std::env::var("PPLXSYNC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

fn cdp_url() -> String {
    std::env::var("PPLXSYNC_CDP_URL").unwrap_or_else(|_| DEFAULT_CDP_URL.to_string())
}

fn print_status(line: &StatusLine) {
    match line.kind {
        StatusKind::Error => eprintln!("{}", line.text),
        _ => println!("{}", line.text),
    }
}

fn usage() {
    println!("pplxsync — sync Perplexity/ChatGPT auth cookies to your API server");
    println!();
    println!("Usage: pplxsync <command>");
    println!();
    println!("Commands:");
    println!("  setup <api-key> <server-url>   Verify the server, copy the MCP config");
    println!("                                 to the clipboard and save settings");
    println!("  sync [perplexity|chatgpt]      Send cookies for one target (or both)");
    println!("  health                         Authenticated health check of the server");
    println!("  status                         Show saved settings and server reachability");
    println!("  set key <value>                Save the API key");
    println!("  set url <value>                Save the server URL");
    println!("  instructions                   Open the setup instructions page");
    println!();
    println!("Environment:");
    println!("  PPLXSYNC_DATA_DIR              Settings directory (default: ./data)");
    println!(
        "  PPLXSYNC_CDP_URL               Chrome DevTools endpoint (default: {})",
        DEFAULT_CDP_URL
    );
    println!("  RUST_LOG                       Log filter (default: info)");
}

async fn open_instructions(relay: &Relay) {
    if let Err(e) = relay.request(RelayRequest::OpenInstructions).await {
        warn!("Could not open instructions page: {}", e);
    }
}

async fn run_sync(store: &SettingsStore, jar: &dyn CookieJar, targets: &[Target]) -> bool {
    let mut ok = true;
    for &target in targets {
        let result = sync_cookies(store, jar, target).await;
        print_status(&popup::sync_status(target, &result));
        ok &= result.is_ok();
    }
    ok
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let data_dir = resolve_data_dir();
    let (store, first_run) = SettingsStore::load(&data_dir);

    let jar: Arc<dyn CookieJar> = Arc::new(CdpCookieJar::new(&cdp_url()));
    let relay = Relay::spawn(jar.clone());

    let command = args.get(1).map(String::as_str).unwrap_or("");
    match command {
        "setup" => {
            let (Some(api_key), Some(server_url)) = (args.get(2), args.get(3)) else {
                eprintln!("Usage: pplxsync setup <api-key> <server-url>");
                std::process::exit(1);
            };
            let form = popup::PopupForm::new(api_key, server_url);
            if let Some(line) = form.validate() {
                print_status(&line);
                std::process::exit(1);
            }

            let result = setup(&store, &SystemClipboard, &form.api_key, &form.server_url).await;
            print_status(&popup::setup_status(&result));
            match result {
                Ok(SetupOutcome::Copied) => {
                    open_instructions(&relay).await;
                }
                Ok(SetupOutcome::ConfigReady { config_json }) => {
                    println!("{}", config_json);
                }
                Err(_) => std::process::exit(1),
            }
        }
        "sync" => {
            let targets: Vec<Target> = match args.get(2) {
                Some(name) => match Target::from_name(name) {
                    Some(target) => vec![target],
                    None => {
                        eprintln!("Unknown sync target: {} (expected perplexity or chatgpt)", name);
                        std::process::exit(1);
                    }
                },
                None => Target::all().to_vec(),
            };
            if !run_sync(&store, jar.as_ref(), &targets).await {
                std::process::exit(1);
            }
        }
        "health" => {
            let settings = store.get();
            if settings.server_url.is_empty() {
                eprintln!("Please enter server URL");
                std::process::exit(1);
            }
            let client = ApiClient::new(&settings.server_url, &settings.api_key)?;
            match client.health().await {
                Ok(()) => println!("Server health check passed: {}", settings.server_url),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        "status" => {
            let settings = store.get();
            println!("Settings directory: {}", data_dir.display());
            println!(
                "API key:    {}",
                if settings.api_key.is_empty() {
                    "(not set)".to_string()
                } else {
                    mask_key(&settings.api_key)
                }
            );
            println!(
                "Server URL: {}",
                if settings.server_url.is_empty() {
                    "(not set)"
                } else {
                    &settings.server_url
                }
            );
            for target in Target::all() {
                match settings.last_sync.get(target.name()) {
                    Some(at) => println!("Last {} sync: {}", target.label(), at),
                    None => println!("Last {} sync: never", target.label()),
                }
            }
            if !settings.server_url.is_empty() {
                let response = relay
                    .request(RelayRequest::ValidateServer {
                        server_url: settings.server_url.clone(),
                    })
                    .await?;
                let reachable = matches!(response, RelayResponse::ServerValid(true));
                println!(
                    "Server:     {}",
                    if reachable { "reachable" } else { "unreachable" }
                );
            }
        }
        "set" => {
            match (args.get(2).map(String::as_str), args.get(3)) {
                (Some("key"), Some(value)) => {
                    store.set_api_key(value);
                    println!("API key saved ({})", mask_key(value.trim()));
                }
                (Some("url"), Some(value)) => {
                    store.set_server_url(value);
                    println!("Server URL saved: {}", value.trim());
                }
                _ => {
                    eprintln!("Usage: pplxsync set <key|url> <value>");
                    std::process::exit(1);
                }
            }
        }
        "instructions" => {
            open_instructions(&relay).await;
        }
        "help" | "--help" | "-h" => usage(),
        "" => {
            if first_run {
                info!("First run, opening setup instructions");
                open_instructions(&relay).await;
            }
            usage();
        }
        other => {
            eprintln!("Unknown command: {}", other);
            usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
