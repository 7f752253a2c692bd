use crate::{AlgoLabError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Vertices are dense indices into a graph's adjacency table.
pub type VertexId = usize;

/// Identity of a tree node, stable across layout and rendering passes.
pub type TreeNodeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AlgoLabError::InvalidOperation(format!(
                "invalid hex color: {hex}"
            )));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                AlgoLabError::InvalidOperation(format!("invalid hex color: {hex}"))
            })
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    Dfs,
    Bfs,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TraversalOrder::Dfs => "dfs",
            TraversalOrder::Bfs => "bfs",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TraversalOrder {
    type Err = AlgoLabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" => Ok(TraversalOrder::Dfs),
            "bfs" => Ok(TraversalOrder::Bfs),
            other => Err(AlgoLabError::InvalidOperation(format!(
                "unknown traversal order: {other}"
            ))),
        }
    }
}
