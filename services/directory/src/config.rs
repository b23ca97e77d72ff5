use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_USERS_FILE: &str = "users.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub users_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("DIRECTORY_HOST")
                .and_then(|value| value.parse::<IpAddr>().ok())
                .unwrap_or(defaults.host),
            port: lookup("DIRECTORY_PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            users_file: lookup("USERS_FILE")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.users_file),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
