use serde::Serialize;

/// Fingerprint values exposed to the evasion scripts as `window.__stealthConfig`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthConfig {
    #[serde(skip)]
    pub accept_language: String,
    #[serde(skip)]
    pub platform: String,
    pub language: String,
    pub languages: Vec<String>,
    pub webgl_vendor: String,
    pub webgl_renderer: String,
    pub hardware_concurrency: u32,
}

impl Default for StealthConfig {
    fn default() -> Self {
        Self {
            accept_language: "en-US,en;q=0.9".to_string(),
            platform: "Linux x86_64".to_string(),
            language: "en-US".to_string(),
            languages: vec!["en-US".to_string(), "en".to_string()],
            webgl_vendor: "Intel Inc.".to_string(),
            webgl_renderer: "Mesa Intel(R) UHD Graphics 620 (KBL GT2)".to_string(),
            hardware_concurrency: 8,
        }
    }
}
