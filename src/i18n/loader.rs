//! Translation loader and string table lookup
//!
//! Translation files are nested JSON objects (`section -> key -> text`)
//! addressed with dotted keys such as `profile_prompts.enter_full_name`.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::config::I18nConfig;
use crate::utils::errors::{AmiHelperError, Result};

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    default_language: String,
    supported_languages: Vec<String>,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
        }
    }

    /// Load every supported language from `dir`; the default language is mandatory
    pub async fn load_translations(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let translations_dir = dir.as_ref();

        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang_code));

            if !file_path.exists() {
                warn!("Translation file not found: {}", file_path.display());
                if lang_code == &self.default_language {
                    return Err(AmiHelperError::Config(format!(
                        "Default language translation file not found: {}",
                        file_path.display()
                    )));
                }
                continue;
            }

            match self.load_language_file(&file_path, lang_code).await {
                Ok(_) => info!("Loaded translations for language: {}", lang_code),
                Err(e) => {
                    error!("Failed to load translations for {}: {}", lang_code, e);
                    if lang_code == &self.default_language {
                        return Err(AmiHelperError::Config(format!(
                            "Failed to load default language translations: {}",
                            e
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    async fn load_language_file(&mut self, file_path: &Path, lang_code: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        let translations: Value = serde_json::from_str(&content)?;
        self.insert_language(lang_code, translations)
    }

    /// Register an already parsed translation tree
    pub fn insert_language(&mut self, lang_code: &str, translations: Value) -> Result<()> {
        match translations {
            Value::Object(map) => {
                debug!("Loaded {} translation sections for {}", map.len(), lang_code);
                self.translations.insert(lang_code.to_string(), map);
                Ok(())
            }
            _ => Err(AmiHelperError::Config(format!(
                "Invalid translation file format for {}",
                lang_code
            ))),
        }
    }

    /// Get a translated message.
    ///
    /// Falls back to the default language, then to the key itself.
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);

        let text = self
            .lookup(key, &effective_lang)
            .or_else(|| self.lookup(key, &self.default_language));

        match text {
            Some(text) => self.format_message(&text, params),
            None => {
                warn!("Translation key '{}' not found", key);
                key.to_string()
            }
        }
    }

    /// Shorthand for [`I18n::t`] with inline parameters
    pub fn t_args(&self, key: &str, lang: &str, args: &[(&str, &str)]) -> String {
        let params: TranslationParams = args
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.t(key, lang, Some(&params))
    }

    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|l| l == lang)
    }

    fn get_effective_language(&self, lang: &str) -> String {
        if self.is_language_supported(lang) && self.translations.contains_key(lang) {
            lang.to_string()
        } else {
            self.default_language.clone()
        }
    }

    fn lookup(&self, key: &str, lang: &str) -> Option<String> {
        let mut current = self.translations.get(lang)?.get(key.split('.').next()?)?;
        for part in key.split('.').skip(1) {
            current = current.get(part)?;
        }
        match current {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn format_message(&self, template: &str, params: Option<&TranslationParams>) -> String {
        let mut result = template.to_string();
        if let Some(params) = params {
            for (key, value) in params {
                result = result.replace(&format!("{{{}}}", key), value);
            }
        }
        result
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Check whether `text` equals the translation of `key` in any loaded language
    pub fn matches_any_language(&self, key: &str, text: &str) -> bool {
        self.translations
            .keys()
            .any(|lang| self.lookup(key, lang).as_deref() == Some(text))
    }

    /// Detect user language from a Telegram language code like `en-US`
    pub fn detect_user_language(&self, telegram_lang: Option<&str>) -> String {
        if let Some(lang) = telegram_lang {
            let lang_code = lang.split('-').next().unwrap_or(lang);
            if self.is_language_supported(lang_code) {
                return lang_code.to_string();
            }
        }

        self.default_language.clone()
    }
}
