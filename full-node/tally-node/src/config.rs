//! Node configuration and scenario files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tally_election::{CallMessage, ElectionConfig};
use tally_modules_api::utils::generate_address;
use tally_modules_api::Context;

/// Genesis configuration. Identities are key names that map onto addresses through
/// [`generate_address`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenesisConfig {
    /// Key name of the election admin.
    pub admin: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_owned()
}

/// Node configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeConfig {
    /// Genesis configuration.
    pub genesis: GenesisConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// The module genesis config derived from this node config.
    pub fn election_config<C: Context>(&self) -> ElectionConfig<C> {
        ElectionConfig {
            admin: generate_address::<C>(&self.genesis.admin),
        }
    }
}

/// One transaction of a replayed scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioStep {
    /// Key name of the sender.
    pub sender: String,
    /// The call to execute.
    pub message: CallMessage,
}

/// Reads and deserializes a TOML file.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}

/// Reads a JSON list of [`ScenarioStep`]s.
pub fn scenario_from_json_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ScenarioStep>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tally_modules_api::default_context::DefaultContext;
    use tempfile::NamedTempFile;

    use super::*;

    fn create_config_from(content: &str) -> NamedTempFile {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(content.as_bytes()).unwrap();
        config_file
    }

    #[test]
    fn test_correct_config() {
        let config = r#"
            [genesis]
            admin = "deployer"
            [logging]
            filter = "debug"
        "#;

        let config_file = create_config_from(config);

        let config: NodeConfig = from_toml_path(config_file.path()).unwrap();
        let expected = NodeConfig {
            genesis: GenesisConfig {
                admin: "deployer".to_owned(),
            },
            logging: LoggingConfig {
                filter: "debug".to_owned(),
            },
        };
        assert_eq!(config, expected);
        assert_eq!(
            config.election_config::<DefaultContext>().admin,
            generate_address::<DefaultContext>("deployer")
        );
    }

    #[test]
    fn test_logging_defaults_to_info() {
        let config_file = create_config_from("[genesis]\nadmin = \"a\"\n");

        let config: NodeConfig = from_toml_path(config_file.path()).unwrap();
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_missing_admin_is_rejected() {
        let config_file = create_config_from("[genesis]\n");
        assert!(from_toml_path::<_, NodeConfig>(config_file.path()).is_err());
    }

    #[test]
    fn test_scenario() {
        let scenario = r#"[
            { "sender": "deployer", "message": { "add_candidate": { "name": "Tinubu" } } },
            { "sender": "voter1", "message": { "vote": { "candidate_index": 0 } } },
            { "sender": "deployer", "message": "end_voting" }
        ]"#;
        let scenario_file = create_config_from(scenario);

        let steps = scenario_from_json_path(scenario_file.path()).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].sender, "voter1");
        assert_eq!(
            steps[1].message,
            CallMessage::Vote { candidate_index: 0 }
        );
        assert_eq!(steps[2].message, CallMessage::EndVoting);
    }
}
