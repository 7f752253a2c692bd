use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlgoLabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, AlgoLabError>;
