use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Glyphs used when printing levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Xsb,
    /// Same as XSB except the worker on a target is `!`.
    Warehouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    SumOfMinima,
    Assignment,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::SumOfMinima => write!(f, "sum-of-minima"),
            Strategy::Assignment => write!(f, "assignment"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum-of-minima" | "minima" => Ok(Strategy::SumOfMinima),
            "assignment" => Ok(Strategy::Assignment),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub strategy: Strategy,
    /// Added to the estimate of a box configuration that was already estimated before.
    /// Zero disables it. Anything else makes the heuristic inadmissible.
    pub revisit_penalty: u64,
    /// Max number of expanded states, `None` means unlimited.
    pub max_nodes: Option<u64>,
}

impl Config {
    pub fn new(strategy: Strategy) -> Self {
        Config {
            strategy,
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strategy: Strategy::Assignment,
            revisit_penalty: 0,
            max_nodes: None,
        }
    }
}
