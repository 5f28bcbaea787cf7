use thiserror::Error;

/// Convenient result alias for the evacuation routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// "No route" is never an error: searches report it as `None` or an empty
/// collection. Only malformed requests and structural problems end up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Raised when an edge weight is negative, NaN or infinite.
    #[error("invalid edge weight {weight} between {from} and {to}; weights must be finite and non-negative")]
    InvalidEdgeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// Raised when fewer than one path is requested.
    #[error("k must be at least 1 (got {k})")]
    InvalidK { k: usize },

    /// Raised when a ranking request asks for zero routes.
    #[error("route count must be at least 1 (got {count})")]
    InvalidRouteCount { count: usize },

    /// Raised when an identifier does not name a registered node.
    #[error("unknown node id: {id}{}", format_suggestions(.suggestions))]
    UnknownNode {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when registering a node whose identifier is already taken.
    #[error("node {id} is already registered")]
    DuplicateNode { id: String },

    /// Raised by [`Graph::validate`](crate::Graph::validate) for a node without neighbours.
    #[error("node {id} has no connections")]
    IsolatedNode { id: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
