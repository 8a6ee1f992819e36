use super::Config;
use crate::config::AuditBackend;

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env("NOVIBE_API_KEY")
            .or_else(|| non_empty_env("GEMINI_API_KEY"))
            .or_else(|| non_empty_env("API_KEY"))
        {
            self.provider.api_key = Some(key);
        }

        if let Some(model) = non_empty_env("NOVIBE_MODEL") {
            self.provider.model = model;
        }

        if let Some(base_url) = non_empty_env("NOVIBE_PROVIDER_URL") {
            self.provider.base_url = base_url;
        }

        if let Some(base_url) = non_empty_env("NOVIBE_LEDGER_URL") {
            self.ledger.base_url = base_url;
        }

        if let Ok(port_str) =
            std::env::var("NOVIBE_GATEWAY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = non_empty_env("NOVIBE_GATEWAY_HOST").or_else(|| non_empty_env("HOST"))
        {
            self.gateway.host = host;
        }

        if let Ok(temp_str) = std::env::var("NOVIBE_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.provider.temperature = temp;
        }

        // Supabase credentials switch a disabled audit log on.
        let supabase_url = non_empty_env("SUPABASE_URL");
        let supabase_key = non_empty_env("SUPABASE_KEY");
        if let (Some(url), Some(key)) = (supabase_url, supabase_key) {
            self.audit.url = Some(url);
            self.audit.api_key = Some(key);
            if self.audit.backend == AuditBackend::Disabled {
                self.audit.backend = AuditBackend::Postgrest;
            }
        }
    }
}
