use crate::cli::commands::session::open_store;
use crate::cli::output;
use crate::config::app_config::{AppConfig, DEFAULT_CONFIG};
use crate::core::errors::Result;
use crate::core::traits::log_store::LogStore;

/// Sample host snapshot written on first install.
const SAMPLE_HOST: &str = r#"# Snapshot of the host application, kept current by the integration.
[site]
home_url = "http://localhost"

[[users]]
id = 1
login = "admin"
capabilities = ["manage_options", "edit_posts", "activate_plugins", "delete_plugins"]
"#;

/// Execute the `actlog install` command.
///
/// Creates the actlog directory with default config and host snapshot,
/// then installs the log schema. Safe to re-run: existing files and log
/// entries are left alone.
pub fn execute(verbose: bool) -> Result<()> {
    let dir = crate::cli::context::actlog_dir();

    output::header("actlog: installing activity log");

    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        output::success(&format!("Created {}/", dir.display()));
    }

    let config_path = dir.join("config.toml");
    let existed = config_path.exists();
    if !existed {
        std::fs::write(&config_path, DEFAULT_CONFIG)?;
        output::success("Generated config.toml with defaults");
    }

    let config = AppConfig::load(dir)?;
    if existed {
        output::success(&format!(
            "config.toml v{} already present, keeping it",
            config.actlog.version
        ));
    }

    let host_path = dir.join(&config.host.snapshot);
    if !host_path.exists() {
        std::fs::write(&host_path, SAMPLE_HOST)?;
        output::success(&format!("Created sample {}", config.host.snapshot));
    }

    let store = open_store(dir, &config)?;
    store.install()?;
    log::debug!("schema ensured for {:?} store", config.store.backend);
    output::success(&format!("Activity log ready ({})", config.store.file));

    if verbose {
        println!();
        println!("  Files:");
        println!("     config.toml    store backend, display timezone");
        println!("     {:<14} users and posts known to the host", config.host.snapshot);
        println!("     {:<14} the activity log itself", config.store.file);
    }

    Ok(())
}
