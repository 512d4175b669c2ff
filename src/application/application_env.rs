use crate::service::push_service::Urgency;
use anyhow::anyhow;
use jsonwebtoken::{Algorithm, DecodingKey};
use jwt_auth::util::{parse_jwt_algorithms, parse_jwt_key};
use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_VAPID_SUBJECT: &str = "mailto:support@speaklife.app";

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub max_http_content_len: usize,

    /// Algorithms must belong to the same family
    pub jwt_algorithms: Vec<Algorithm>,
    pub jwt_key: DecodingKey,

    pub supabase_url: String,
    pub supabase_service_role_key: String,

    /// Both keys are optional at startup. Without them
    /// the service runs but refuses to dispatch notifications
    pub vapid_public_key: Option<String>,
    pub vapid_private_key: Option<String>,
    pub vapid_subject: String,

    pub push_ttl: Duration,
    pub push_urgency: Urgency,
    pub request_timeout: Duration,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("SPEAKLIFE_PUSH_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("SPEAKLIFE_PUSH_LOG_FILENAME")?;
        let bind_address = Self::env_var("SPEAKLIFE_PUSH_BIND_ADDRESS")?.parse()?;
        let max_http_content_len =
            Self::env_var("SPEAKLIFE_PUSH_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let jwt_algorithms = parse_jwt_algorithms(&Self::env_var("SPEAKLIFE_PUSH_JWT_ALGORITHMS")?)?;
        let jwt_algorithm = jwt_algorithms.first().ok_or(anyhow!(
            "SPEAKLIFE_PUSH_JWT_ALGORITHMS need to contain at least one algorithm"
        ))?;
        let jwt_key = parse_jwt_key(jwt_algorithm, &Self::env_var("SPEAKLIFE_PUSH_JWT_KEY")?)?;
        let supabase_url = Self::env_var("SUPABASE_URL")?;
        let supabase_service_role_key = Self::env_var("SUPABASE_SERVICE_ROLE_KEY")?;
        let vapid_public_key = Self::optional_env_var("VAPID_PUBLIC_KEY");
        let vapid_private_key = Self::optional_env_var("VAPID_PRIVATE_KEY");
        let vapid_subject = Self::optional_env_var("VAPID_SUBJECT")
            .unwrap_or_else(|| DEFAULT_VAPID_SUBJECT.to_string());
        let push_ttl = Self::env_var("SPEAKLIFE_PUSH_TTL")?.parse()?;
        let push_ttl = Duration::from_secs(push_ttl);
        let push_urgency = Self::env_var("SPEAKLIFE_PUSH_URGENCY")?
            .parse()
            .map_err(|err| anyhow!("SPEAKLIFE_PUSH_URGENCY invalid: {err}"))?;
        let request_timeout = Self::env_var("SPEAKLIFE_PUSH_REQUEST_TIMEOUT")?.parse()?;
        let request_timeout = Duration::from_secs(request_timeout);

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            max_http_content_len,
            jwt_algorithms,
            jwt_key,
            supabase_url,
            supabase_service_role_key,
            vapid_public_key,
            vapid_private_key,
            vapid_subject,
            push_ttl,
            push_urgency,
            request_timeout,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn optional_env_var(name: &'static str) -> Option<String> {
        std::env::var(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}
