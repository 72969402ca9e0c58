use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout_secs: u64,
    pub fallback_enabled: bool,
    pub app_password: String,
    pub state_path: PathBuf,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("fallback_enabled", &self.fallback_enabled)
            .field("app_password", &"[redacted]")
            .field("state_path", &self.state_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
