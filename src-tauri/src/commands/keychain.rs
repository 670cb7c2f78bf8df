use keyring::Entry;
use tracing::{info, warn};

/// Keychain service holding the Gemini API key.
pub const GEMINI_KEY_SERVICE: &str = "seo-audit-gemini-api";
const KEYRING_USER: &str = "seo-audit";

/// Environment variables consulted when the keychain has no key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

fn entry() -> Result<Entry, String> {
    Entry::new(GEMINI_KEY_SERVICE, KEYRING_USER).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", GEMINI_KEY_SERVICE, e);
        e.to_string()
    })
}

/// Read the stored key. A missing entry is `Ok(None)`.
pub fn read_stored_key() -> Result<Option<String>, String> {
    match entry()?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => {
            info!("No API key found for service: {}", GEMINI_KEY_SERVICE);
            Ok(None)
        }
        Err(e) => {
            warn!("Failed to get password for {}: {}", GEMINI_KEY_SERVICE, e);
            Err(e.to_string())
        }
    }
}

/// Pick the key to use: the keychain entry, else the first non-blank
/// environment variable.
pub fn resolve_api_key(
    stored: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    stored
        .into_iter()
        .chain(API_KEY_ENV_VARS.iter().filter_map(|name| env(name)))
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

/// Key for the audit call. Keychain read errors fall back to the environment.
pub fn load_api_key() -> Option<String> {
    let stored = read_stored_key().unwrap_or_else(|e| {
        warn!("Keychain unavailable, falling back to environment: {}", e);
        None
    });
    resolve_api_key(stored, |name| std::env::var(name).ok())
}

#[tauri::command]
pub fn set_api_key(key: &str) -> Result<(), String> {
    info!("Setting API key for service: {}", GEMINI_KEY_SERVICE);
    entry()?.set_password(key.trim()).map_err(|e| {
        warn!("Failed to set password for {}: {}", GEMINI_KEY_SERVICE, e);
        e.to_string()
    })
}

#[tauri::command]
pub fn get_api_key() -> Result<Option<String>, String> {
    info!("Getting API key for service: {}", GEMINI_KEY_SERVICE);
    read_stored_key()
}

#[tauri::command]
pub fn delete_api_key() -> Result<(), String> {
    info!("Deleting API key for service: {}", GEMINI_KEY_SERVICE);
    entry()?.delete_credential().map_err(|e| {
        warn!("Failed to delete credential for {}: {}", GEMINI_KEY_SERVICE, e);
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_stored_key_wins() {
        let key = resolve_api_key(Some("stored".to_string()), |_| Some("env".to_string()));
        assert_eq!(key.as_deref(), Some("stored"));
    }

    #[test]
    fn test_env_fallback_order() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("gemini".to_string()),
            "API_KEY" => Some("generic".to_string()),
            _ => None,
        };
        assert_eq!(resolve_api_key(None, env).as_deref(), Some("gemini"));

        let only_generic = |name: &str| (name == "API_KEY").then(|| "generic".to_string());
        assert_eq!(resolve_api_key(None, only_generic).as_deref(), Some("generic"));
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some(" k ".to_string()),
            _ => None,
        };
        assert_eq!(resolve_api_key(Some(String::new()), env).as_deref(), Some("k"));
        assert_eq!(resolve_api_key(None, no_env), None);
    }
}
