//! Typed request options.
//!
//! Each option is a variant carrying an already-typed value, so an invalid
//! option cannot reach the transport. [`RequestOption::from_name`] keeps the
//! textual `CURLOPT_*`-style names usable by mapping them onto the variants.

use std::time::Duration;

use crate::config::{Config, OPTION_NAME_PREFIX};
use crate::error_handling::ClientError;

/// A single transfer setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// `User-Agent` header sent with every hop.
    UserAgent(String),
    /// `Referer` header sent with every hop.
    Referer(String),
    /// Follow `3xx` responses that carry a `Location` header.
    FollowLocation(bool),
    /// Maximum number of redirect hops to follow.
    MaxRedirects(usize),
    /// Timeout for each hop.
    Timeout(Duration),
    /// Basic authentication credentials, sent only to the original host.
    BasicAuth {
        /// User name.
        username: String,
        /// Password, if any.
        password: Option<String>,
    },
}

impl RequestOption {
    /// Maps a textual option name and value onto a typed option.
    ///
    /// Names are case-insensitive and may carry a `CURLOPT_` prefix:
    ///
    /// | name             | value                            |
    /// |------------------|----------------------------------|
    /// | `USERAGENT`      | any text                         |
    /// | `REFERER`        | any text                         |
    /// | `FOLLOWLOCATION` | `1`/`0`/`true`/`false`           |
    /// | `MAXREDIRS`      | non-negative integer             |
    /// | `TIMEOUT`        | seconds                          |
    /// | `TIMEOUT_MS`     | milliseconds                     |
    /// | `USERPWD`        | `user` or `user:password`        |
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for unknown names and for values
    /// that do not parse.
    pub fn from_name(name: &str, value: &str) -> Result<Self, ClientError> {
        let upper = name.trim().to_ascii_uppercase();
        let key = upper.strip_prefix(OPTION_NAME_PREFIX).unwrap_or(&upper);

        let option = match key {
            "USERAGENT" => RequestOption::UserAgent(value.to_string()),
            "REFERER" => RequestOption::Referer(value.to_string()),
            "FOLLOWLOCATION" => RequestOption::FollowLocation(parse_flag(key, value)?),
            "MAXREDIRS" => RequestOption::MaxRedirects(parse_number(key, value)?),
            "TIMEOUT" => RequestOption::Timeout(Duration::from_secs(parse_number(key, value)?)),
            "TIMEOUT_MS" => {
                RequestOption::Timeout(Duration::from_millis(parse_number(key, value)?))
            }
            "USERPWD" => {
                let (username, password) = match value.split_once(':') {
                    Some((user, pass)) => (user.to_string(), Some(pass.to_string())),
                    None => (value.to_string(), None),
                };
                RequestOption::BasicAuth { username, password }
            }
            _ => {
                return Err(ClientError::InvalidArgument(format!(
                    "{OPTION_NAME_PREFIX}{key} is not a supported option"
                )))
            }
        };

        Ok(option)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ClientError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ClientError::InvalidArgument(format!(
            "{OPTION_NAME_PREFIX}{key} expects a boolean, got `{value}`"
        ))),
    }
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N, ClientError> {
    value.trim().parse().map_err(|_| {
        ClientError::InvalidArgument(format!(
            "{OPTION_NAME_PREFIX}{key} expects a non-negative integer, got `{value}`"
        ))
    })
}

/// Resolved transfer settings for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSettings {
    /// User-Agent header value.
    pub user_agent: String,
    /// Referer header value.
    pub referer: Option<String>,
    /// Whether redirects are followed.
    pub follow_redirects: bool,
    /// Hop limit when following redirects.
    pub max_redirects: usize,
    /// Per-hop timeout; the client-wide timeout applies when `None`.
    pub timeout: Option<Duration>,
    /// Basic authentication credentials.
    pub basic_auth: Option<(String, Option<String>)>,
}

impl TransferSettings {
    /// Defaults taken from the client configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            referer: None,
            follow_redirects: config.follow_redirects(),
            max_redirects: config.max_redirects,
            timeout: None,
            basic_auth: None,
        }
    }

    /// Applies one option, replacing any earlier value for the same setting.
    pub fn apply(&mut self, option: RequestOption) {
        match option {
            RequestOption::UserAgent(agent) => self.user_agent = agent,
            RequestOption::Referer(referer) => self.referer = Some(referer),
            RequestOption::FollowLocation(follow) => self.follow_redirects = follow,
            RequestOption::MaxRedirects(max) => self.max_redirects = max,
            RequestOption::Timeout(timeout) => self.timeout = Some(timeout),
            RequestOption::BasicAuth { username, password } => {
                self.basic_auth = Some((username, password))
            }
        }
    }
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_prefix_and_any_case() {
        assert_eq!(
            RequestOption::from_name("CURLOPT_USERAGENT", "probe/1.0").unwrap(),
            RequestOption::UserAgent("probe/1.0".into())
        );
        assert_eq!(
            RequestOption::from_name("followlocation", "0").unwrap(),
            RequestOption::FollowLocation(false)
        );
        assert_eq!(
            RequestOption::from_name("curlopt_maxredirs", "3").unwrap(),
            RequestOption::MaxRedirects(3)
        );
    }

    #[test]
    fn test_from_name_timeouts() {
        assert_eq!(
            RequestOption::from_name("TIMEOUT", "5").unwrap(),
            RequestOption::Timeout(Duration::from_secs(5))
        );
        assert_eq!(
            RequestOption::from_name("TIMEOUT_MS", "250").unwrap(),
            RequestOption::Timeout(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_from_name_userpwd() {
        assert_eq!(
            RequestOption::from_name("USERPWD", "alice:s3:cret").unwrap(),
            RequestOption::BasicAuth {
                username: "alice".into(),
                password: Some("s3:cret".into()),
            }
        );
        assert_eq!(
            RequestOption::from_name("USERPWD", "bob").unwrap(),
            RequestOption::BasicAuth {
                username: "bob".into(),
                password: None,
            }
        );
    }

    #[test]
    fn test_from_name_rejects_unknown_option() {
        let err = RequestOption::from_name("INVALID_CURLOPTION", "1").unwrap_err();
        match err {
            ClientError::InvalidArgument(msg) => {
                assert_eq!(msg, "CURLOPT_INVALID_CURLOPTION is not a supported option")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_name_rejects_bad_values() {
        assert!(matches!(
            RequestOption::from_name("FOLLOWLOCATION", "maybe"),
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(matches!(
            RequestOption::from_name("MAXREDIRS", "-1"),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_apply_overrides_settings() {
        let mut settings = TransferSettings::default();
        assert!(settings.follow_redirects);

        settings.apply(RequestOption::FollowLocation(false));
        settings.apply(RequestOption::Referer("http://ref/".into()));
        settings.apply(RequestOption::MaxRedirects(2));

        assert!(!settings.follow_redirects);
        assert_eq!(settings.referer.as_deref(), Some("http://ref/"));
        assert_eq!(settings.max_redirects, 2);
    }
}
