use std::path::PathBuf;
use std::time::Duration;

/// Global configuration options for a reconnaissance run.
///
/// This struct controls the runtime behavior of the application, including
/// UI verbosity, external database locations, and probe time bounds.
/// It is typically constructed via CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Toggles the display of the startup ASCII banner.
    ///
    /// If `true`, the application starts immediately with log output
    /// without printing the stylized branding. Useful for clean logs or
    /// frequent executions.
    pub no_banner: bool,

    /// Controls the visual density and formatting of the terminal output.
    ///
    /// This value is typically mapped from the `-q` or `--quiet` CLI flags.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, spinner, and section headers.
    /// * **1+**: Reduced styling. Headers collapse to blank separators.
    pub quiet: u8,

    /// Enables privacy mode for sensitive data in the output.
    ///
    /// When enabled, hardware identifiers discovered on the local link
    /// (MAC addresses) are masked. Use this when sharing screenshots or
    /// logs publicly.
    pub redact: bool,

    /// Location of the GeoLite2 City database used for geolocation.
    ///
    /// The file must be provisioned out of band (MaxMind requires an
    /// account for downloads). A missing or unreadable file is not fatal:
    /// the geolocation section of the report degrades to "not available".
    pub geo_db: PathBuf,

    /// Optional GeoLite2 ASN database for network-ownership attribution.
    ///
    /// The City database carries no ISP data, so the `ISP` field of the
    /// report is only populated when this second database is supplied.
    pub asn_db: Option<PathBuf>,

    /// Upper bound for each external reachability probe.
    ///
    /// The operating system's `ping` and `traceroute` commands impose no
    /// usable total limit of their own, so every invocation is wrapped in
    /// this timeout. A probe that exceeds it is reported as absent.
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            redact: false,
            geo_db: PathBuf::from("GeoLite2-City.mmdb"),
            asn_db: None,
            probe_timeout: Duration::from_secs(20),
        }
    }
}
