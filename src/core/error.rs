use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Word list is empty")]
    EmptyVocabulary,

    #[error("Word pool exhausted: all {in_use} words are in use")]
    ExhaustedPool { in_use: usize },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node name: {0}")]
    DuplicateNode(String),

    #[error("Node {0} is connected to itself")]
    SelfLoop(String),

    #[error("Adjacency is not symmetric: {from} lists {to} but not the reverse")]
    AsymmetricAdjacency { from: String, to: String },

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
