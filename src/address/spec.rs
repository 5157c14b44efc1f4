// src/address/spec.rs
use std::fmt;

/// Which half of a `min-max` port range failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    Min,
    Max,
}

impl fmt::Display for RangeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSide::Min => f.write_str("min"),
            RangeSide::Max => f.write_str("max"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid {side} port in range: {value:?}")]
    MalformedRange { side: RangeSide, value: String },

    #[error("Invalid port range, max is below min: {min}-{max}")]
    InvalidRangeOrder { min: u16, max: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortMode {
    /// No port section at all; binds an ephemeral port.
    None,
    /// Port section without a dash, kept verbatim for the bind primitive.
    /// May be empty.
    Single(String),
    /// Inclusive range, `min <= max`.
    Range { min: u16, max: u16 },
}

/// A listen address decomposed into host and port descriptor.
///
/// Grammar: `host[":" (port | min "-" max)]`.
///
/// Only the first `:` separates host from port, and only the first `-` of
/// the port section separates the range halves. `"h:1:2"` is therefore host
/// `h` with single port `"1:2"`, and `"h:1-2:3"` fails on its max half. IPv6
/// literals are not understood here and degrade the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpec {
    host: String,
    port: PortMode,
}

impl AddressSpec {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let Some((host, port_section)) = raw.split_once(':') else {
            return Ok(Self {
                host: raw.to_string(),
                port: PortMode::None,
            });
        };

        let port = match port_section.split_once('-') {
            None => PortMode::Single(port_section.to_string()),
            Some((min, max)) => {
                let min = parse_port(min, RangeSide::Min)?;
                let max = parse_port(max, RangeSide::Max)?;
                if max < min {
                    return Err(AddressError::InvalidRangeOrder { min, max });
                }
                PortMode::Range { min, max }
            }
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &PortMode {
        &self.port
    }
}

fn parse_port(value: &str, side: RangeSide) -> Result<u16, AddressError> {
    value.parse().map_err(|_| AddressError::MalformedRange {
        side,
        value: value.to_string(),
    })
}
