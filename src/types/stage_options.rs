//! This module defines the canonical, type-safe names for the selectable stage
//! behaviours of the pipeline.
//!
//! Names arrive as strings from configuration files and command lines. Parsing is
//! case-insensitive, and an empty name means "none". Anything unknown is an
//! `UnsupportedOption` error rather than a silent fallback.

use crate::error::MemconvError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The elementwise nonlinearity applied after convolution.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    /// Passthrough. Also accepted as `identity`.
    #[default]
    #[serde(alias = "identity")]
    None,
    Relu,
    /// Negative inputs are divided by a fixed 4. Also accepted as `lrelu`,
    /// `leaky` and `leaky-relu`.
    #[serde(alias = "lrelu", alias = "leaky", alias = "leaky-relu")]
    LeakyRelu,
}

impl FromStr for ActivationKind {
    type Err = MemconvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "identity" => Ok(Self::None),
            "relu" => Ok(Self::Relu),
            "lrelu" | "leaky" | "leaky_relu" | "leaky-relu" => Ok(Self::LeakyRelu),
            _ => Err(MemconvError::UnsupportedOption {
                kind: "activation",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Relu => "relu",
            Self::LeakyRelu => "leaky_relu",
        };
        f.write_str(name)
    }
}

/// The reduction used by the selectable 2x2 stride-2 pooling primitive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PoolMode {
    #[default]
    None,
    Avg,
    Max,
}

impl FromStr for PoolMode {
    type Err = MemconvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "avg" => Ok(Self::Avg),
            "max" => Ok(Self::Max),
            _ => Err(MemconvError::UnsupportedOption {
                kind: "pooling",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Avg => "avg",
            Self::Max => "max",
        };
        f.write_str(name)
    }
}
