#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The graph has a cycle. `node` names a node on it when the walk found one.
    #[error("graph contains a cycle{}", through(.node))]
    Cycle { node: Option<String> },
    #[error("invalid layout config: {0}")]
    Config(#[from] serde_json::Error),
}

fn through(node: &Option<String>) -> String {
    node.as_ref()
        .map(|n| format!(" through {n}"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;
