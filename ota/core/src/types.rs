use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::utils::eq_ignore_ascii_case;

/**
    Request mode, sent verbatim in the `mode` header.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Manual,
    ServerAuto,
    ClientAuto,
    /// Early-access builds. Not served by the gray hosts.
    Taste,
}

impl Mode {
    pub const fn from_name(name: &[u8]) -> Option<Self> {
        let name = name.trim_ascii();
        match name.len() {
            5 if eq_ignore_ascii_case(name, b"taste") => Some(Self::Taste),
            6 if eq_ignore_ascii_case(name, b"manual") => Some(Self::Manual),
            11 if eq_ignore_ascii_case(name, b"server_auto") => Some(Self::ServerAuto),
            11 if eq_ignore_ascii_case(name, b"client_auto") => Some(Self::ClientAuto),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::ServerAuto => "server_auto",
            Self::ClientAuto => "client_auto",
            Self::Taste => "taste",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.as_bytes()).ok_or_else(|| ParseError {
            kind: "mode",
            value: s.to_owned(),
        })
    }
}

/**
    Server region. Each region has its own host and public key.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Cn,
    Eu,
    In,
    Sg,
    Ru,
    Tr,
    Th,
    Gl,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Self::Cn,
        Self::Eu,
        Self::In,
        Self::Sg,
        Self::Ru,
        Self::Tr,
        Self::Th,
        Self::Gl,
    ];

    pub const fn from_name(name: &[u8]) -> Option<Self> {
        let name = name.trim_ascii();
        if name.len() != 2 {
            return None;
        }
        match [name[0].to_ascii_uppercase(), name[1].to_ascii_uppercase()] {
            [b'C', b'N'] => Some(Self::Cn),
            [b'E', b'U'] => Some(Self::Eu),
            [b'I', b'N'] => Some(Self::In),
            [b'S', b'G'] => Some(Self::Sg),
            [b'R', b'U'] => Some(Self::Ru),
            [b'T', b'R'] => Some(Self::Tr),
            [b'T', b'H'] => Some(Self::Th),
            [b'G', b'L'] => Some(Self::Gl),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Cn => "CN",
            Self::Eu => "EU",
            Self::In => "IN",
            Self::Sg => "SG",
            Self::Ru => "RU",
            Self::Tr => "TR",
            Self::Th => "TH",
            Self::Gl => "GL",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Region {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.as_bytes()).ok_or_else(|| ParseError {
            kind: "region",
            value: s.to_owned(),
        })
    }
}
