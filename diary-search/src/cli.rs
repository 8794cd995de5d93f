//! Command-line interface definition.

use clap::{Parser, Subcommand};

/// Demo client for SigV4-signed requests against a managed search domain.
#[derive(Parser, Debug)]
#[command(name = "diary-search", version, about = "SigV4-signed search domain demo")]
pub struct Cli {
    /// Search domain endpoint, e.g. https://search-mydomain.eu-west-1.es.amazonaws.com
    #[arg(long, env = "SEARCH_ENDPOINT")]
    pub endpoint: String,

    /// AWS region the domain lives in. Falls back to the default provider
    /// chain when omitted.
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS service name used for signature scoping.
    #[arg(long, env = "SEARCH_SERVICE", default_value = "es")]
    pub service: String,

    /// Index the demo operates on.
    #[arg(long, env = "SEARCH_INDEX", default_value = "diary")]
    pub index: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch cluster statistics with a single signed GET request.
    Stats,
    /// Run the full index lifecycle demo against the domain.
    Demo,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_stats_with_defaults() {
        let cli = Cli::try_parse_from([
            "diary-search",
            "--endpoint",
            "https://search-demo.eu-west-1.es.amazonaws.com",
            "--region",
            "eu-west-1",
            "stats",
        ])
        .unwrap();

        assert_eq!(cli.service, "es");
        assert_eq!(cli.index, "diary");
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_parse_demo_with_overrides() {
        let cli = Cli::try_parse_from([
            "diary-search",
            "--endpoint",
            "https://localhost:9200",
            "--index",
            "journal",
            "--service",
            "aoss",
            "demo",
        ])
        .unwrap();

        assert_eq!(cli.index, "journal");
        assert_eq!(cli.service, "aoss");
        assert!(matches!(cli.command, Commands::Demo));
    }
}
