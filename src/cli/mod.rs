pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Append-only activity audit log for content-management hosts.
#[derive(Parser, Debug)]
#[command(name = "actlog", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Login of the authenticated actor making the request
    #[arg(long = "as", global = true, env = "ACTLOG_ACTOR")]
    pub actor: Option<String>,

    /// Network origin of the request (e.g. the client IP)
    #[arg(long, global = true, env = "ACTLOG_ORIGIN")]
    pub origin: Option<String>,

    /// Path to an alternative actlog directory
    #[arg(long, global = true)]
    pub dir: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the actlog directory and install the log schema
    Install,

    /// Record one host event
    Emit {
        /// Event as JSON; read from stdin when omitted
        event: Option<String>,
    },

    /// Browse the activity log
    Logs {
        /// Only entries created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Only entries created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// Only entries by this user login
        #[arg(long)]
        username: Option<String>,
        /// Page number, 20 entries per page; values below 1 show page 1
        #[arg(
            long,
            default_value_t = 1,
            allow_negative_numbers = true,
            value_parser = parse_page
        )]
        page: u64,
    },
}

/// Any integer is a valid page; values below 1 clamp to 1.
fn parse_page(s: &str) -> Result<u64, String> {
    let n: i128 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a page number"))?;
    Ok(u64::try_from(n.max(1)).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_values_clamp_instead_of_failing() {
        assert_eq!(parse_page("-1"), Ok(1));
        assert_eq!(parse_page("0"), Ok(1));
        assert_eq!(parse_page("3"), Ok(3));
        assert_eq!(parse_page("18446744073709551615"), Ok(u64::MAX));
        assert_eq!(parse_page("99999999999999999999"), Ok(u64::MAX));
        assert!(parse_page("two").is_err());
    }
}
