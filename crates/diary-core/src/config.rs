use std::{env, fs, net::SocketAddr, path::Path};

use url::Url;

use crate::{errors::Error, Result};

const DEFAULT_PORT: u16 = 8080;

/// How updates reach the bot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transport {
    /// Long polling `getUpdates`.
    Polling,
    /// Telegram pushes updates to `url`; we listen on `listen_addr`.
    Webhook { url: Url, listen_addr: SocketAddr },
}

impl Transport {
    pub fn name(&self) -> &'static str {
        match self {
            Transport::Polling => "polling",
            Transport::Webhook { .. } => "webhook",
        }
    }
}

/// Typed process configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_token: String,
    pub transport: Transport,
}

impl Config {
    /// Load from the environment, after applying an optional `.env` file.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .and_then(non_empty)
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN").and_then(non_empty))
            .ok_or_else(|| {
                Error::Config("TELEGRAM_TOKEN environment variable is required".to_string())
            })?;

        let mode = lookup("BOT_TRANSPORT")
            .and_then(non_empty)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| "polling".to_string());

        let transport = match mode.as_str() {
            "polling" | "poll" => Transport::Polling,
            "webhook" => {
                let raw_url = lookup("WEBHOOK_URL").and_then(non_empty).ok_or_else(|| {
                    Error::Config("WEBHOOK_URL is required when BOT_TRANSPORT=webhook".to_string())
                })?;
                let url = Url::parse(raw_url.trim())
                    .map_err(|e| Error::Config(format!("invalid WEBHOOK_URL {raw_url:?}: {e}")))?;
                let listen_addr = listen_addr(&lookup)?;
                Transport::Webhook { url, listen_addr }
            }
            other => {
                return Err(Error::Config(format!(
                    "unknown BOT_TRANSPORT {other:?} (expected polling or webhook)"
                )))
            }
        };

        Ok(Self {
            telegram_token,
            transport,
        })
    }
}

fn listen_addr(lookup: &impl Fn(&str) -> Option<String>) -> Result<SocketAddr> {
    if let Some(raw) = lookup("LISTEN_ADDR").and_then(non_empty) {
        return raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("invalid LISTEN_ADDR {raw:?}: {e}")));
    }

    let port = match lookup("PORT").and_then(non_empty) {
        Some(p) => p
            .trim()
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid PORT {p:?}: {e}")))?,
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::from(([0, 0, 0, 0], port)))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = &val[1..val.len() - 1];
        }

        out.push((key.to_string(), val.to_string()));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn cfg(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn token_is_required() {
        assert!(matches!(cfg(&[]), Err(Error::Config(_))));
        assert!(matches!(cfg(&[("TELEGRAM_TOKEN", "  ")]), Err(Error::Config(_))));
    }

    #[test]
    fn defaults_to_polling() {
        let c = cfg(&[("TELEGRAM_TOKEN", "123:abc")]).unwrap();
        assert_eq!(c.telegram_token, "123:abc");
        assert_eq!(c.transport, Transport::Polling);
    }

    #[test]
    fn legacy_token_name_is_accepted() {
        let c = cfg(&[("TELEGRAM_BOT_TOKEN", "t")]).unwrap();
        assert_eq!(c.telegram_token, "t");
    }

    #[test]
    fn webhook_needs_url() {
        let err = cfg(&[("TELEGRAM_TOKEN", "t"), ("BOT_TRANSPORT", "webhook")]).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_URL"));
    }

    #[test]
    fn webhook_uses_port_fallback() {
        let c = cfg(&[
            ("TELEGRAM_TOKEN", "t"),
            ("BOT_TRANSPORT", "Webhook"),
            ("WEBHOOK_URL", "https://diary.example.com/webhook"),
            ("PORT", "9000"),
        ])
        .unwrap();

        let Transport::Webhook { url, listen_addr } = c.transport else {
            panic!("expected webhook transport");
        };
        assert_eq!(url.path(), "/webhook");
        assert_eq!(listen_addr, "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn listen_addr_overrides_port() {
        let c = cfg(&[
            ("TELEGRAM_TOKEN", "t"),
            ("BOT_TRANSPORT", "webhook"),
            ("WEBHOOK_URL", "https://diary.example.com/"),
            ("LISTEN_ADDR", "127.0.0.1:3000"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(
            c.transport,
            Transport::Webhook {
                url: Url::parse("https://diary.example.com/").unwrap(),
                listen_addr: "127.0.0.1:3000".parse().unwrap(),
            }
        );
    }

    #[test]
    fn rejects_unknown_transport_and_bad_values() {
        assert!(cfg(&[("TELEGRAM_TOKEN", "t"), ("BOT_TRANSPORT", "carrier-pigeon")]).is_err());
        assert!(cfg(&[
            ("TELEGRAM_TOKEN", "t"),
            ("BOT_TRANSPORT", "webhook"),
            ("WEBHOOK_URL", "not a url"),
        ])
        .is_err());
        assert!(cfg(&[
            ("TELEGRAM_TOKEN", "t"),
            ("BOT_TRANSPORT", "webhook"),
            ("WEBHOOK_URL", "https://x.example/"),
            ("PORT", "http"),
        ])
        .is_err());
    }

    #[test]
    fn dotenv_parsing_strips_quotes_and_comments() {
        let parsed = parse_dotenv("# comment\nTELEGRAM_TOKEN=\"abc\"\n\nBAD LINE\nPORT = '81'\n=x\n");
        assert_eq!(
            parsed,
            vec![
                ("TELEGRAM_TOKEN".to_string(), "abc".to_string()),
                ("PORT".to_string(), "81".to_string()),
            ]
        );
    }
}
