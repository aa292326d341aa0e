use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use miette::{Context, IntoDiagnostic};
use shiftwatch_core::WorkplaceSettings;

/// Command line configuration
#[derive(Parser, Clone, Debug)]
#[command(version, about = "Shift tracking server with geofenced clock-in")]
pub struct Cli {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Port for the HTTP API
    #[arg(short, long, default_value_t = 3001)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// JSON file with the initial workplace settings
    #[arg(short, long)]
    pub workplace: Option<PathBuf>,
}

impl Cli {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Read the seed workplace, if one was given on the command line
    pub fn load_workplace(&self) -> miette::Result<Option<WorkplaceSettings>> {
        match &self.workplace {
            Some(path) => load_workplace_file(path).map(Some),
            None => Ok(None),
        }
    }
}

pub fn load_workplace_file(path: &Path) -> miette::Result<WorkplaceSettings> {
    let json = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot read workplace file {}", path.display()))?;
    let settings = WorkplaceSettings::from_json(&json)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid workplace file {}", path.display()))?;

    log::info!(
        "Loaded workplace '{}' at {} with {} m perimeter",
        settings.name,
        settings.location,
        settings.radius_meters
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["shiftwatch-server"]);
        assert_eq!(cli.port, 3001);
        assert_eq!(cli.socket_addr().to_string(), "0.0.0.0:3001");
        assert!(cli.load_workplace().unwrap().is_none());
    }

    #[test]
    fn test_load_workplace_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name":"Riverside","location":{{"latitude":51.5,"longitude":-0.12}},"radiusMeters":1200}}"#
        )
        .unwrap();

        let cli = Cli::parse_from([
            "shiftwatch-server",
            "--port",
            "8080",
            "--workplace",
            file.path().to_str().unwrap(),
        ]);
        let workplace = cli.load_workplace().unwrap().unwrap();
        assert_eq!(workplace.name, "Riverside");
        assert_eq!(workplace.radius_meters, 1200.0);
        assert_eq!(cli.port, 8080);
    }

    #[test]
    fn test_rejects_invalid_workplace_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name":"X","location":{{"latitude":123,"longitude":0}},"radiusMeters":1200}}"#
        )
        .unwrap();

        assert!(load_workplace_file(file.path()).is_err());
        assert!(load_workplace_file(Path::new("/nonexistent/workplace.json")).is_err());
    }
}
