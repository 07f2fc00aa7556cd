use crate::config::Language;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// User-facing strings of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, StrumDisplay)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Key {
    AppName,
    ButtonTasksOk,
    TaskLabel,
    ResultPrefix,
    EmptySlice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: Key) -> &'static str {
        match (self.language, key) {
            (Language::EnUs, Key::AppName) => "Wheel of Fun",
            (Language::EnUs, Key::ButtonTasksOk) => "OK",
            (Language::EnUs, Key::TaskLabel) => "Task",
            (Language::EnUs, Key::ResultPrefix) => "The wheel picked:",
            (Language::EnUs, Key::EmptySlice) => "Nothing to do. Spin again!",
            (Language::DeDe, Key::AppName) => "Glücksrad",
            (Language::DeDe, Key::ButtonTasksOk) => "OK",
            (Language::DeDe, Key::TaskLabel) => "Aufgabe",
            (Language::DeDe, Key::ResultPrefix) => "Das Rad hat gewählt:",
            (Language::DeDe, Key::EmptySlice) => "Nichts zu tun. Nochmal drehen!",
        }
    }

    /// Looks up a key by name, e.g. `APP_NAME`. Unknown keys come back unchanged.
    pub fn lookup(&self, key: &str) -> String {
        match Key::from_str(key) {
            Ok(key) => self.get(key).to_string(),
            Err(_) => {
                log::error!("No translation for key {key}");
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_key_is_translated() {
        for language in Language::iter() {
            let i18n = I18n::new(language);
            for key in Key::iter() {
                assert!(!i18n.get(key).is_empty(), "{language} {key}");
            }
        }
    }

    #[test]
    fn test_lookup() {
        let i18n = I18n::new(Language::DeDe);
        assert_eq!(i18n.lookup("APP_NAME"), "Glücksrad");
        assert_eq!(i18n.lookup("BUTTON_TASKS_OK"), "OK");
        assert_eq!(i18n.lookup("TASK_LABEL"), "Aufgabe");
        assert_eq!(i18n.lookup("MENU_QUIT"), "MENU_QUIT");
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(I18n::default().get(Key::AppName), "Wheel of Fun");
    }
}
