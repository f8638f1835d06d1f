use crate::log::LogLevel;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[cfg(any(target_arch = "wasm32", test))]
pub use page_config::*;

#[cfg(any(target_arch = "wasm32", test))]
mod page_config {
    use super::{parse_log_level, parse_non_empty_string, parse_u32_with_bounds, DEFAULT_LOG_LEVEL};
    use crate::log::LogLevel;

    pub const DEFAULT_ROLES: [&str; 3] = [
        "Mahasiswa Sistem Informasi",
        "Pengembang Web & Frontend",
        "Penggemar Data & UX",
    ];
    pub const DEFAULT_TYPE_DELAY_MS: u32 = 50;
    pub const DEFAULT_FULL_PAUSE_MS: u32 = 900;
    pub const DEFAULT_ERASE_DELAY_MS: u32 = 28;
    pub const DEFAULT_EMPTY_PAUSE_MS: u32 = 250;
    pub const DEFAULT_REVEAL_STEP_MS: u32 = 80;
    pub const DEFAULT_SKILL_THRESHOLD: f64 = 0.25;
    pub const DEFAULT_SKILL_FILL: u8 = 60;
    pub const DEFAULT_FEEDBACK_CLEAR_MS: u32 = 1_400;
    pub const DEFAULT_CLOSE_DELAY_MS: u32 = 1_200;
    pub const DEFAULT_CONTACT_ACTION: &str = "https://formspree.io/f/yourFormId";
    pub const DEFAULT_CONTACT_EMAIL: &str = "halo@example.com";
    pub const DEFAULT_OWNER_NAME: &str = "Portofolio";
    pub const DEFAULT_THEME_KEY: &str = "preferred-theme";

    const DELAY_MS_BOUNDS: (u32, u32) = (1, 10_000);
    const SKILL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
    const SKILL_FILL_BOUNDS: (u8, u8) = (0, 100);

    /// Page tunables, read from the `data-*` attributes of the mount element.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PageConfig {
        pub owner_name: String,
        pub roles: Vec<String>,
        pub type_delay_ms: u32,
        pub full_pause_ms: u32,
        pub erase_delay_ms: u32,
        pub empty_pause_ms: u32,
        pub reveal_step_ms: u32,
        pub skill_threshold: f64,
        pub default_fill: u8,
        pub feedback_clear_ms: u32,
        pub close_delay_ms: u32,
        pub contact_action: String,
        pub contact_email: String,
        pub theme_key: String,
        pub log_level: LogLevel,
    }

    impl Default for PageConfig {
        fn default() -> Self {
            Self::from_lookup(|_| None)
        }
    }

    impl PageConfig {
        /// `lookup` receives attribute names without the `data-` prefix.
        pub fn from_lookup<F>(lookup: F) -> Self
        where
            F: Fn(&str) -> Option<String>,
        {
            let delay = |name: &str, default: u32| {
                parse_u32_with_bounds(lookup(name), default, DELAY_MS_BOUNDS)
            };

            let roles = parse_non_empty_string(lookup("roles"))
                .map(|value| {
                    value
                        .split('|')
                        .map(str::trim)
                        .filter(|role| !role.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .filter(|roles| !roles.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLES.iter().map(|role| role.to_string()).collect());

            Self {
                owner_name: parse_non_empty_string(lookup("owner-name"))
                    .unwrap_or_else(|| DEFAULT_OWNER_NAME.to_string()),
                roles,
                type_delay_ms: delay("type-delay-ms", DEFAULT_TYPE_DELAY_MS),
                full_pause_ms: delay("full-pause-ms", DEFAULT_FULL_PAUSE_MS),
                erase_delay_ms: delay("erase-delay-ms", DEFAULT_ERASE_DELAY_MS),
                empty_pause_ms: delay("empty-pause-ms", DEFAULT_EMPTY_PAUSE_MS),
                reveal_step_ms: delay("reveal-step-ms", DEFAULT_REVEAL_STEP_MS),
                skill_threshold: lookup("skill-threshold")
                    .and_then(|value| value.trim().parse::<f64>().ok())
                    .filter(|value| (SKILL_THRESHOLD_BOUNDS.0..=SKILL_THRESHOLD_BOUNDS.1).contains(value))
                    .unwrap_or(DEFAULT_SKILL_THRESHOLD),
                default_fill: lookup("default-fill")
                    .and_then(|value| value.trim().parse::<u8>().ok())
                    .filter(|value| (SKILL_FILL_BOUNDS.0..=SKILL_FILL_BOUNDS.1).contains(value))
                    .unwrap_or(DEFAULT_SKILL_FILL),
                feedback_clear_ms: delay("feedback-clear-ms", DEFAULT_FEEDBACK_CLEAR_MS),
                close_delay_ms: delay("close-delay-ms", DEFAULT_CLOSE_DELAY_MS),
                contact_action: parse_non_empty_string(lookup("contact-action"))
                    .unwrap_or_else(|| DEFAULT_CONTACT_ACTION.to_string()),
                contact_email: parse_non_empty_string(lookup("contact-email"))
                    .unwrap_or_else(|| DEFAULT_CONTACT_EMAIL.to_string()),
                theme_key: parse_non_empty_string(lookup("theme-key"))
                    .unwrap_or_else(|| DEFAULT_THEME_KEY.to_string()),
                log_level: parse_log_level(lookup("log-level"), DEFAULT_LOG_LEVEL),
            }
        }
    }
}

#[cfg(any(target_arch = "wasm32", test))]
pub fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn parse_u16_with_bounds(raw: Option<String>, default: u16, bounds: (u16, u16)) -> u16 {
    raw.and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_non_empty_string(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_log_level(raw: Option<String>, default: LogLevel) -> LogLevel {
    match parse_non_empty_string(raw)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use server_config::ServerConfig;

#[cfg(not(target_arch = "wasm32"))]
mod server_config {
    use super::{parse_log_level, parse_non_empty_string, parse_u16_with_bounds, DEFAULT_LOG_LEVEL};
    use crate::log::LogLevel;
    use std::path::PathBuf;

    const DEFAULT_PORT: u16 = 8080;
    const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
    const DEFAULT_DIST_DIR: &str = "dist";

    #[derive(Clone, Debug)]
    pub struct ServerConfig {
        pub port: u16,
        pub dist_dir: PathBuf,
        pub log_level: LogLevel,
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            let var = |name: &str| std::env::var(name).ok();

            Self {
                port: parse_u16_with_bounds(var("PORT"), DEFAULT_PORT, PORT_BOUNDS),
                dist_dir: parse_non_empty_string(var("DIST_DIR"))
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
                log_level: parse_log_level(var("LOG_LEVEL"), DEFAULT_LOG_LEVEL),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> PageConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        PageConfig::from_lookup(|name| attributes.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_attributes() {
        let config = PageConfig::default();

        assert_eq!(config.owner_name, "Portofolio");
        assert_eq!(config.roles.len(), 3);
        assert_eq!(config.roles[0], "Mahasiswa Sistem Informasi");
        assert_eq!(config.type_delay_ms, 50);
        assert_eq!(config.full_pause_ms, 900);
        assert_eq!(config.erase_delay_ms, 28);
        assert_eq!(config.empty_pause_ms, 250);
        assert_eq!(config.reveal_step_ms, 80);
        assert_eq!(config.default_fill, 60);
        assert_eq!(config.feedback_clear_ms, 1_400);
        assert_eq!(config.close_delay_ms, 1_200);
        assert_eq!(config.theme_key, "preferred-theme");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn roles_are_split_on_pipes_and_trimmed() {
        let config = config_from(&[("roles", " Engineer | | Writer ")]);

        assert_eq!(config.roles, vec!["Engineer".to_string(), "Writer".to_string()]);
    }

    #[test]
    fn blank_roles_fall_back_to_defaults() {
        let config = config_from(&[("roles", " | ")]);

        assert_eq!(config.roles.len(), DEFAULT_ROLES.len());
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("type-delay-ms", "0"),
            ("erase-delay-ms", "abc"),
            ("skill-threshold", "1.5"),
            ("default-fill", "250"),
            ("log-level", "verbose"),
        ]);

        assert_eq!(config.type_delay_ms, DEFAULT_TYPE_DELAY_MS);
        assert_eq!(config.erase_delay_ms, DEFAULT_ERASE_DELAY_MS);
        assert_eq!(config.skill_threshold, DEFAULT_SKILL_THRESHOLD);
        assert_eq!(config.default_fill, DEFAULT_SKILL_FILL);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn valid_overrides_are_used() {
        let config = config_from(&[
            ("type-delay-ms", " 75 "),
            ("contact-action", "https://example.com/send"),
            ("contact-email", "me@example.com"),
            ("log-level", "DEBUG"),
        ]);

        assert_eq!(config.type_delay_ms, 75);
        assert_eq!(config.contact_action, "https://example.com/send");
        assert_eq!(config.contact_email, "me@example.com");
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
