//! 環境変数からのアプリケーション設定
//!
//! - `DATABASE_URL`: PostgreSQL接続文字列（未設定ならインメモリストアで起動）
//! - `DATABASE_MAX_CONNECTIONS`: コネクションプールの最大数（既定: 5）
//! - `HOST`: バインドするホスト（既定: "0.0.0.0"）
//! - `PORT`: 待ち受けポート（既定: 3000）
//! - `DEFAULT_SLOT_CAPACITY`: 容量未指定で作成したスロットの残席数（既定: 10）
//! - `RUN_MIGRATIONS`: 起動時にマイグレーションを実行するか（既定: true）

use std::str::FromStr;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SLOT_CAPACITY: i32 = 10;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub default_slot_capacity: i32,
    pub run_migrations: bool,
}

impl AppConfig {
    /// プロセスの環境変数から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から読み込む（テストでは環境変数を汚さないために使う）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_slot_capacity =
            parse_or(&lookup, "DEFAULT_SLOT_CAPACITY", DEFAULT_SLOT_CAPACITY)?;
        if default_slot_capacity < 0 {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_SLOT_CAPACITY",
                value: default_slot_capacity.to_string(),
            });
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            default_slot_capacity,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    /// バインドアドレス（"host:port"）
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.default_slot_capacity, 10);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/gym"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DEFAULT_SLOT_CAPACITY", "20"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/gym")
        );
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.default_slot_capacity, 20);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_negative_default_capacity_is_rejected() {
        assert!(load(&[("DEFAULT_SLOT_CAPACITY", "-1")]).is_err());
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }
}
