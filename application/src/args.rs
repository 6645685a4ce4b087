//! [`Args`] definitions.

use std::path::PathBuf;

use clap::Parser;

/// Read-only JSON API over a catalog of judicial real-estate auctions.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Local static data directory to serve, overriding the configured
    /// dataset location.
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn parses_data_override() {
        let args =
            Args::try_parse_from(["application", "-d", "public/data"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert_eq!(
            args.data.as_deref().and_then(|p| p.to_str()),
            Some("public/data"),
        );
    }
}
