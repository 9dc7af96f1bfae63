//! Load, validate, save and render a single JSON5 configuration file.

use crate::codec;
use crate::error::ConfigError;
use crate::grammar::JsonGrammar;
use crate::schema::ConfigClass;
use crate::writer::Json5Writer;
use blossom_common::{display_file_name, error_chain, normalize_indentation};
use std::any::type_name;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// File name suffix every managed configuration file must carry.
pub const CONFIG_EXTENSION: &str = ".json5";

const EMPTY_OBJECT: &str = "{}";

/// Produces the configuration written when the file does not exist yet.
pub type ConfigFactory<T> = fn() -> anyhow::Result<T>;

/// Manages the configuration file of one schema type.
///
/// The manager is bound to its schema and path at construction. It starts
/// without a configuration; [`load_config`](Self::load_config) either reads the
/// file or, when the file is missing, creates and saves a default one.
///
/// Mutating operations take `&mut self`. Hosts that share a manager between
/// threads must wrap it in their own lock.
pub struct ConfigManager<T: ConfigClass> {
    path: PathBuf,
    file_name: String,
    factory: ConfigFactory<T>,
    grammar: JsonGrammar,
    config: Option<T>,
}

impl<T: ConfigClass> ConfigManager<T> {
    /// Creates a manager whose defaults come from [`ConfigClass::instantiate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfigFile`] when the final path segment
    /// does not end with `.json5`. No file is touched.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::with_factory(path, T::instantiate)
    }

    /// Creates a manager whose defaults come from `factory`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfigFile`] when the final path segment
    /// does not end with `.json5`. No file is touched.
    pub fn with_factory(
        path: impl Into<PathBuf>,
        factory: ConfigFactory<T>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let file_name = display_file_name(&path);

        debug!("Checking file extension of {}", file_name);
        if path.file_name().is_none() || !file_name.ends_with(CONFIG_EXTENSION) {
            return Err(ConfigError::invalid_extension(file_name));
        }

        Ok(Self {
            path,
            file_name,
            factory,
            grammar: JsonGrammar::default(),
            config: None,
        })
    }

    /// Sets the grammar used by [`save_config`](Self::save_config).
    #[must_use]
    pub fn with_grammar(mut self, grammar: JsonGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Loads the configuration, creating a default file if none exists.
    ///
    /// When the file is missing the factory is called, its result stored and
    /// immediately saved. A failing factory is logged and swallowed, leaving the
    /// current configuration untouched. When the file exists it is parsed,
    /// deserialized and validated; the loaded value replaces the current one only
    /// if all three steps succeed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfigFile`] when the existing file cannot
    /// be read, is not valid JSON5, does not match the schema, or fails
    /// validation.
    pub fn load_config(&mut self) -> Result<(), ConfigError> {
        if !self.path.exists() {
            debug!("Creating new config file for class: {}", type_name::<T>());
            match (self.factory)() {
                Ok(config) => {
                    self.config = Some(config);
                    self.save_config();
                }
                Err(source) => {
                    let error = ConfigError::Instantiation {
                        type_name: type_name::<T>(),
                        source: source.into(),
                    };
                    error!(
                        "Something went wrong while loading config file {}: {}",
                        self.file_name,
                        error_chain(&error)
                    );
                }
            }
            return Ok(());
        }

        let config = self.read_config()?;
        debug!("Loaded config file: {}", self.file_name);
        self.config = Some(config);
        Ok(())
    }

    fn read_config(&self) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::invalid_contents(&self.file_name, e))?;

        let mut config: T = codec::from_str(&contents)
            .map_err(|e| ConfigError::invalid_contents(&self.file_name, e))?;

        config
            .validate()
            .map_err(|e| ConfigError::invalid_contents(&self.file_name, e))?;

        Ok(config)
    }

    /// Writes the current configuration to disk, logging instead of failing.
    ///
    /// See [`try_save_config`](Self::try_save_config) for the fallible variant.
    pub fn save_config(&self) {
        match self.try_save_config() {
            Ok(()) => {}
            Err(ConfigError::NotLoaded { file_name }) => {
                warn!("No config loaded, not saving config file: {}", file_name);
            }
            Err(error) => {
                error!(
                    "Something went wrong while saving config file {}: {}",
                    self.file_name,
                    error_chain(&error)
                );
            }
        }
    }

    /// Writes the current configuration to disk, replacing the file contents.
    ///
    /// Missing parent directories are created first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotLoaded`] when there is nothing to save,
    /// [`ConfigError::Serialization`] when the configuration cannot be
    /// represented as JSON5, and [`ConfigError::Io`] when writing fails.
    pub fn try_save_config(&self) -> Result<(), ConfigError> {
        let config = self.loaded()?;
        let rendered = self.render(config, self.grammar)?;

        write_file(&self.path, &rendered).map_err(|source| ConfigError::Io {
            file_name: self.file_name.clone(),
            source,
        })?;

        debug!("Saved to config file: {}", self.file_name);
        Ok(())
    }

    /// Renders the current configuration as JSON5 text.
    ///
    /// `comments` and `newlines` override the manager grammar. Tabs in the
    /// output are replaced by two spaces. Returns `{}` when nothing is loaded.
    pub fn get_config_json_as_string(&self, comments: bool, newlines: bool) -> String {
        let Some(config) = self.config.as_ref() else {
            return EMPTY_OBJECT.to_string();
        };

        let grammar = self.grammar.with_comments(comments).with_newlines(newlines);
        match self.render(config, grammar) {
            Ok(rendered) => normalize_indentation(&rendered),
            Err(error) => {
                error!(
                    "Something went wrong while rendering config file {}: {}",
                    self.file_name,
                    error_chain(&error)
                );
                EMPTY_OBJECT.to_string()
            }
        }
    }

    /// Returns the current configuration, if one has been loaded.
    pub const fn get_config(&self) -> Option<&T> {
        self.config.as_ref()
    }

    /// Whether a configuration is currently held.
    pub const fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// Path of the managed file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final segment of the managed path.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Grammar used when saving.
    pub const fn grammar(&self) -> JsonGrammar {
        self.grammar
    }

    fn loaded(&self) -> Result<&T, ConfigError> {
        self.config.as_ref().ok_or_else(|| ConfigError::NotLoaded {
            file_name: self.file_name.clone(),
        })
    }

    fn render(&self, config: &T, grammar: JsonGrammar) -> Result<String, ConfigError> {
        let value = codec::to_value(config).map_err(|source| ConfigError::Serialization {
            file_name: self.file_name.clone(),
            source,
        })?;

        Ok(Json5Writer::new(grammar)
            .with_comments(T::comments())
            .render(&value))
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{clamp_range, ensure_non_empty, ValidationError};
    use blossom_common::test_utils::init_test_logging;
    use serde::{Deserialize, Serialize};
    use std::collections::{BTreeMap, HashMap};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Settings {
        volume: u32,
        name: String,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                volume: 50,
                name: "default".to_string(),
            }
        }
    }

    impl ConfigClass for Settings {
        fn validate(&mut self) -> Result<(), ValidationError> {
            self.volume = clamp_range("volume", self.volume, 0, 100);
            ensure_non_empty("name", &self.name)
        }

        fn comments() -> &'static [(&'static str, &'static str)] {
            &[("volume", "Playback volume\tfrom 0 to 100")]
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Unrenderable {
        by_pair: BTreeMap<(u8, u8), u8>,
    }

    impl ConfigClass for Unrenderable {}

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Gain {
        ceiling: f64,
        floor: f64,
        trim: f64,
    }

    impl ConfigClass for Gain {}

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Limits {
        max_bytes: u64,
        names: HashMap<u32, String>,
    }

    impl ConfigClass for Limits {}

    fn settings_manager(dir: &TempDir) -> ConfigManager<Settings> {
        ConfigManager::new(dir.path().join("settings.json5")).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_extension() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();

        for name in ["cfg.json", "cfg", "cfg.json5.bak", "cfg.JSON5"] {
            let result = ConfigManager::<Settings>::new(dir.path().join(name));
            let error = result.err().unwrap();
            assert!(error.is_invalid_config_file(), "{name} should be rejected");
            assert!(error.to_string().ends_with(name));
        }

        assert!(ConfigManager::<Settings>::new("/").is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_new_holds_no_config() {
        let dir = tempfile::tempdir().unwrap();
        let manager = settings_manager(&dir);

        assert!(!manager.is_loaded());
        assert!(manager.get_config().is_none());
        assert_eq!(manager.file_name(), "settings.json5");
        assert_eq!(manager.grammar(), JsonGrammar::JANKSON);
        assert!(!manager.path().exists());
    }

    #[test]
    fn test_load_creates_default_file() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let mut manager = settings_manager(&dir);

        manager.load_config().unwrap();

        assert_eq!(manager.get_config(), Some(&Settings::default()));
        let written = fs::read_to_string(manager.path()).unwrap();
        assert!(written.contains("// Playback volume"));
        let reparsed: Settings = codec::from_str(&written).unwrap();
        assert_eq!(reparsed, Settings::default());
    }

    #[test]
    fn test_load_reads_and_validates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = settings_manager(&dir);
        fs::write(manager.path(), "{ volume: 250, name: 'kitchen', }").unwrap();

        manager.load_config().unwrap();

        let config = manager.get_config().unwrap();
        assert_eq!(config.volume, 100);
        assert_eq!(config.name, "kitchen");
    }

    #[test]
    fn test_load_failure_keeps_previous_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = settings_manager(&dir);
        manager.load_config().unwrap();

        fs::write(manager.path(), "{ volume: ").unwrap();
        let error = manager.load_config().unwrap_err();
        assert!(error.is_invalid_config_file());
        assert_eq!(manager.get_config(), Some(&Settings::default()));

        fs::write(manager.path(), "{ name: '' }").unwrap();
        let error = manager.load_config().unwrap_err();
        assert!(error.is_invalid_config_file());
        assert_eq!(manager.get_config(), Some(&Settings::default()));
    }

    #[test]
    fn test_failing_factory_is_swallowed() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ConfigManager::<Settings>::with_factory(
            dir.path().join("settings.json5"),
            || Err(anyhow::anyhow!("defaults unavailable")),
        )
        .unwrap();

        assert!(manager.load_config().is_ok());
        assert!(manager.get_config().is_none());
        assert!(!manager.path().exists());
    }

    #[test]
    fn test_custom_factory_supplies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ConfigManager::<Settings>::with_factory(
            dir.path().join("settings.json5"),
            || {
                Ok(Settings {
                    volume: 10,
                    name: "quiet".to_string(),
                })
            },
        )
        .unwrap();

        manager.load_config().unwrap();
        assert_eq!(manager.get_config().unwrap().volume, 10);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut manager = ConfigManager::<Settings>::new(blocker.join("settings.json5")).unwrap();
        assert!(manager.load_config().is_ok());
        assert_eq!(manager.get_config(), Some(&Settings::default()));

        manager.save_config();
        assert!(matches!(
            manager.try_save_config(),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_save_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let manager = settings_manager(&dir);

        manager.save_config();
        assert!(!manager.path().exists());
        assert!(matches!(
            manager.try_save_config(),
            Err(ConfigError::NotLoaded { .. })
        ));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("settings.json5");
        let mut manager = ConfigManager::<Settings>::new(&path).unwrap();

        manager.load_config().unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_save_uses_configured_grammar() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = settings_manager(&dir).with_grammar(JsonGrammar::STRICT);

        manager.load_config().unwrap();

        let written = fs::read_to_string(manager.path()).unwrap();
        assert_eq!(written, "{\n\t\"volume\": 50,\n\t\"name\": \"default\"\n}");
    }

    #[test]
    fn test_json_string_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = settings_manager(&dir);
        assert_eq!(manager.get_config_json_as_string(true, true), "{}");

        manager.load_config().unwrap();

        let pretty = manager.get_config_json_as_string(true, true);
        assert_eq!(
            pretty,
            "{\n  // Playback volume  from 0 to 100\n  \"volume\": 50,\n  \"name\": \"default\",\n}"
        );

        let compact = manager.get_config_json_as_string(false, false);
        assert_eq!(compact, "{ \"volume\": 50, \"name\": \"default\" }");
    }

    #[test]
    fn test_unrenderable_config_falls_back() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ConfigManager::<Unrenderable>::with_factory(
            dir.path().join("pairs.json5"),
            || {
                let mut config = Unrenderable::default();
                config.by_pair.insert((1, 2), 3);
                Ok(config)
            },
        )
        .unwrap();

        manager.load_config().unwrap();

        assert!(manager.is_loaded());
        assert!(!manager.path().exists());
        assert_eq!(manager.get_config_json_as_string(true, true), "{}");
        assert!(matches!(
            manager.try_save_config(),
            Err(ConfigError::Serialization { .. })
        ));
    }

    #[test]
    fn test_loaded_file_saves_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = settings_manager(&dir);
        fs::write(manager.path(), "{ volume: 33, name: \"studio\\u2028b\" }").unwrap();

        manager.load_config().unwrap();
        manager.try_save_config().unwrap();

        let mut reloaded = settings_manager(&dir);
        reloaded.load_config().unwrap();
        assert_eq!(
            reloaded.get_config(),
            Some(&Settings {
                volume: 33,
                name: "studio\u{2028}b".to_string(),
            })
        );
    }

    #[test]
    fn test_non_finite_floats_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gain.json5");
        fs::write(&path, "{ ceiling: Infinity, floor: -Infinity, trim: NaN }").unwrap();

        let mut manager = ConfigManager::<Gain>::new(&path).unwrap();
        manager.load_config().unwrap();
        manager.try_save_config().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n\t\"ceiling\": Infinity,\n\t\"floor\": -Infinity,\n\t\"trim\": NaN,\n}"
        );

        let mut reloaded = ConfigManager::<Gain>::new(&path).unwrap();
        reloaded.load_config().unwrap();
        let gain = reloaded.get_config().unwrap();
        assert_eq!(gain.ceiling, f64::INFINITY);
        assert_eq!(gain.floor, f64::NEG_INFINITY);
        assert!(gain.trim.is_nan());
    }

    #[test]
    fn test_large_integers_and_numeric_keys_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.json5");
        let mut manager = ConfigManager::<Limits>::with_factory(&path, || {
            Ok(Limits {
                max_bytes: (1 << 60) | 1,
                names: HashMap::from([(7, "x".to_string())]),
            })
        })
        .unwrap();
        manager.load_config().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"max_bytes\": 1152921504606846977,"));
        assert!(written.contains("\"7\": \"x\","));

        let mut reloaded = ConfigManager::<Limits>::new(&path).unwrap();
        reloaded.load_config().unwrap();
        assert_eq!(reloaded.get_config(), manager.get_config());
    }
}
