// Mon Oct 19 2026 - Alex

use crate::header::preprocessor::DEFAULT_EDITOR_MACROS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No classes configured")]
    NoClasses,
    #[error("Class definition {0} has an empty name")]
    EmptyClassName(usize),
    #[error("Class {0} has an empty header path")]
    EmptyHeaderPath(String),
    #[error("Class {0} is configured more than once")]
    DuplicateClass(String),
    #[error("Class {0} is configured as its own parent")]
    SelfParent(String),
}

/// One configured class: its parent and the header that declares it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub header: String,
}

impl ClassDefinition {
    pub fn new(name: &str, parent: Option<&str>, header: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(|p| p.to_string()),
            header: header.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: String,
    pub source_root: PathBuf,
    pub classes: Vec<ClassDefinition>,
    pub editor_macros: Vec<String>,
    pub parallel_scan: bool,
    pub max_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "4.26".to_string(),
            source_root: PathBuf::from("."),
            classes: default_class_definitions(),
            editor_macros: DEFAULT_EDITOR_MACROS.iter().map(|m| m.to_string()).collect(),
            parallel_scan: false,
            max_threads: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load either a full config object or a bare array of class definitions
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.is_array() {
            let classes: Vec<ClassDefinition> = serde_json::from_value(value)?;
            return Ok(Self::default().with_classes(classes));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_source_root(mut self, root: PathBuf) -> Self {
        self.source_root = root;
        self
    }

    pub fn with_classes(mut self, classes: Vec<ClassDefinition>) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_editor_macros(mut self, macros: Vec<String>) -> Self {
        self.editor_macros = macros;
        self
    }

    pub fn with_parallel_scan(mut self, parallel: bool) -> Self {
        self.parallel_scan = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classes.is_empty() {
            return Err(ConfigError::NoClasses);
        }

        let mut seen = HashSet::new();
        for (i, class) in self.classes.iter().enumerate() {
            if class.name.trim().is_empty() {
                return Err(ConfigError::EmptyClassName(i));
            }
            if class.header.trim().is_empty() {
                return Err(ConfigError::EmptyHeaderPath(class.name.clone()));
            }
            if class.parent.as_deref() == Some(class.name.as_str()) {
                return Err(ConfigError::SelfParent(class.name.clone()));
            }
            if !seen.insert(class.name.as_str()) {
                return Err(ConfigError::DuplicateClass(class.name.clone()));
            }
        }
        Ok(())
    }
}

/// The engine classes whose vtables annotation tooling cares about
pub fn default_class_definitions() -> Vec<ClassDefinition> {
    const RUNTIME: &str = "Engine/Source/Runtime";
    let defs: &[(&str, Option<&str>, &str)] = &[
        ("UObjectBase", None, "CoreUObject/Public/UObject/UObjectBase.h"),
        ("UObjectBaseUtility", Some("UObjectBase"), "CoreUObject/Public/UObject/UObjectBaseUtility.h"),
        ("UObject", Some("UObjectBaseUtility"), "CoreUObject/Public/UObject/Object.h"),
        ("AActor", Some("UObject"), "Engine/Classes/GameFramework/Actor.h"),
        ("APawn", Some("AActor"), "Engine/Classes/GameFramework/Pawn.h"),
        ("ACharacter", Some("APawn"), "Engine/Classes/GameFramework/Character.h"),
        ("AController", Some("AActor"), "Engine/Classes/GameFramework/Controller.h"),
        ("APlayerController", Some("AController"), "Engine/Classes/GameFramework/PlayerController.h"),
        ("UGameViewportClient", Some("UObject"), "Engine/Classes/Engine/GameViewportClient.h"),
        ("AHUD", Some("AActor"), "Engine/Classes/GameFramework/HUD.h"),
        ("UEngine", Some("UObject"), "Engine/Classes/Engine/Engine.h"),
        ("UGameEngine", Some("UEngine"), "Engine/Classes/Engine/GameEngine.h"),
        ("UWorld", Some("UObject"), "Engine/Classes/Engine/World.h"),
        ("UGameInstance", Some("UObject"), "Engine/Classes/Engine/GameInstance.h"),
        ("APlayerState", Some("AActor"), "Engine/Classes/GameFramework/PlayerState.h"),
        ("AGameStateBase", Some("AActor"), "Engine/Classes/GameFramework/GameStateBase.h"),
        ("AGameModeBase", Some("AActor"), "Engine/Classes/GameFramework/GameModeBase.h"),
    ];

    defs.iter()
        .map(|(name, parent, header)| {
            ClassDefinition::new(name, *parent, &format!("{}/{}", RUNTIME, header))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classes.len(), 17);
        assert_eq!(config.classes[0].parent, None);
        assert_eq!(
            config.classes[2].header,
            "Engine/Source/Runtime/CoreUObject/Public/UObject/Object.h"
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = Config::new().with_classes(vec![
            ClassDefinition::new("A", None, "A.h"),
            ClassDefinition::new("A", None, "B.h"),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateClass(name)) if name == "A"));
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        assert!(matches!(Config::new().with_classes(vec![]).validate(), Err(ConfigError::NoClasses)));

        let config = Config::new().with_classes(vec![ClassDefinition::new(" ", None, "A.h")]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyClassName(0))));

        let config = Config::new().with_classes(vec![ClassDefinition::new("A", Some("A"), "A.h")]);
        assert!(matches!(config.validate(), Err(ConfigError::SelfParent(_))));

        let config = Config::new().with_classes(vec![ClassDefinition::new("A", None, "")]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyHeaderPath(_))));
    }

    #[test]
    fn test_load_class_list() {
        let config = Config::from_json(
            r#"[{"name": "Root", "header": "Root.h"}, {"name": "Mid", "parent": "Root", "header": "Mid.h"}]"#,
        )
        .unwrap();

        assert_eq!(config.classes.len(), 2);
        assert_eq!(config.classes[1].parent.as_deref(), Some("Root"));
        assert_eq!(config.version, "4.26");
    }

    #[test]
    fn test_load_full_config() {
        let config = Config::from_json(
            r#"{"version": "5.3", "classes": [{"name": "Root", "header": "Root.h"}], "editor_macros": ["WITH_EDITOR"]}"#,
        )
        .unwrap();

        assert_eq!(config.version, "5.3");
        assert_eq!(config.editor_macros, vec!["WITH_EDITOR".to_string()]);
        assert!(!config.parallel_scan);
    }
}
