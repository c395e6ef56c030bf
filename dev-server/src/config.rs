use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::proxy::{normalize_prefix, ProxyError};

/// Serve the built client and forward API paths to the backend.
#[derive(Debug, Clone, Parser)]
#[command(name = "ragask-dev-server", version, about)]
pub struct DevServerConfig {
    /// Port to listen on
    #[arg(long, env = "RAGASK_DEV_PORT", default_value_t = 5173)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "RAGASK_DEV_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Backend origin that proxied requests are forwarded to
    #[arg(long, env = "RAGASK_API_PROXY_TARGET", default_value = "http://localhost:8000")]
    pub proxy_target: String,

    /// Path prefix to forward (repeatable)
    #[arg(long = "proxy-prefix", value_name = "PREFIX", default_values_t = [String::from("/api"), String::from("/query")])]
    pub proxy_prefixes: Vec<String>,

    /// Directory holding the built client bundle
    #[arg(long, env = "RAGASK_DIST_DIR", default_value = "dist")]
    pub dist: PathBuf,

    /// Directory for rolling log files (defaults to ~/.ragask)
    #[arg(long, env = "RAGASK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl DevServerConfig {
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Proxy target without a trailing slash.
    pub fn target_origin(&self) -> Result<String, ProxyError> {
        let target = self.proxy_target.trim().trim_end_matches('/');
        if !(target.starts_with("http://") || target.starts_with("https://")) {
            return Err(ProxyError::InvalidTarget(self.proxy_target.clone()));
        }
        Ok(target.to_string())
    }

    /// Normalized, de-duplicated proxy prefixes.
    pub fn prefixes(&self) -> Result<Vec<String>, ProxyError> {
        let mut prefixes = Vec::with_capacity(self.proxy_prefixes.len());
        for raw in &self.proxy_prefixes {
            let prefix = normalize_prefix(raw)?;
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }
        Ok(prefixes)
    }
}
