//! Iteration order used by the traversal algorithms.

use std::fmt;
use std::str::FromStr;

/// Order in which the graph visits its nodes when starting a traversal.
///
/// Governs the DFS start order of cycle search and the seeding of the
/// zero-in-degree queue in topological sort. Edge order within a node is
/// always the order in which edges were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterationOrder {
    /// Nodes in the order they were added
    #[default]
    Insertion,
    /// Nodes sorted by id
    Lexical,
}

impl fmt::Display for IterationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insertion => write!(f, "insertion"),
            Self::Lexical => write!(f, "lexical"),
        }
    }
}

impl FromStr for IterationOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insertion" | "insert" => Ok(Self::Insertion),
            "lexical" | "id" => Ok(Self::Lexical),
            _ => Err(format!(
                "Unknown iteration order: '{}'. Valid orders: insertion, lexical",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_insertion() {
        assert_eq!(IterationOrder::default(), IterationOrder::Insertion);
    }

    #[test]
    fn test_parse_round_trip() {
        for order in [IterationOrder::Insertion, IterationOrder::Lexical] {
            assert_eq!(order.to_string().parse::<IterationOrder>(), Ok(order));
        }
        assert_eq!("ID".parse::<IterationOrder>(), Ok(IterationOrder::Lexical));
        assert!("random".parse::<IterationOrder>().is_err());
    }
}
