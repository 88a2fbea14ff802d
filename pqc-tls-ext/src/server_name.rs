//! `server_name` extension body (RFC 6066 §3).
//!
//! ```text
//! struct { NameType name_type; opaque HostName<1..2^16-1>; } ServerName;
//! struct { ServerName server_name_list<1..2^16-1>; } ServerNameList;
//! ```

use crate::codec::{len_to_u16, write_opaque16, write_u16, Reader};
use crate::error::{ExtensionError, ExtensionResult};
use crate::extensions::{TlsExtension, EXT_SERVER_NAME};

pub const NAME_TYPE_HOST_NAME: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ServerName {
    /// ASCII DNS host name without a trailing dot.
    HostName(String),
}

impl ServerName {
    pub fn host_name(name: impl Into<String>) -> Self {
        ServerName::HostName(name.into())
    }

    pub fn name_type(&self) -> u8 {
        match self {
            ServerName::HostName(_) => NAME_TYPE_HOST_NAME,
        }
    }

    fn encode(&self, out: &mut Vec<u8>) -> ExtensionResult<()> {
        match self {
            ServerName::HostName(name) => {
                if name.is_empty() {
                    return Err(ExtensionError::InternalError("empty host name"));
                }
                if !name.is_ascii() {
                    return Err(ExtensionError::InternalError("host name is not ASCII"));
                }
                out.push(NAME_TYPE_HOST_NAME);
                write_opaque16(out, name.as_bytes(), "host name too long")
            }
        }
    }

    fn parse(reader: &mut Reader<'_>) -> ExtensionResult<Self> {
        match reader.read_u8("truncated server name type")? {
            NAME_TYPE_HOST_NAME => {
                let raw = reader.read_opaque16("truncated host name")?;
                if raw.is_empty() {
                    return Err(ExtensionError::Decode("empty host name"));
                }
                if !raw.is_ascii() {
                    return Err(ExtensionError::Decode("host name is not ASCII"));
                }
                let name = std::str::from_utf8(raw)
                    .map_err(|_| ExtensionError::Decode("host name is not ASCII"))?;
                Ok(ServerName::HostName(name.to_owned()))
            }
            _ => Err(ExtensionError::Decode("unknown server name type")),
        }
    }
}

/// Non-empty list holding at most one name per name type.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ServerNameList {
    names: Vec<ServerName>,
}

impl ServerNameList {
    pub fn new(names: Vec<ServerName>) -> Self {
        Self { names }
    }

    pub fn single_host(name: impl Into<String>) -> Self {
        Self::new(vec![ServerName::host_name(name)])
    }

    pub fn names(&self) -> &[ServerName] {
        &self.names
    }

    /// First `host_name` entry, if any.
    pub fn host_name(&self) -> Option<&str> {
        self.names.iter().find_map(|name| match name {
            ServerName::HostName(host) => Some(host.as_str()),
        })
    }
}

fn has_duplicate_type(names: &[ServerName]) -> bool {
    names
        .iter()
        .enumerate()
        .any(|(i, name)| names[..i].iter().any(|seen| seen.name_type() == name.name_type()))
}

impl TlsExtension for ServerNameList {
    const EXTENSION_TYPE: u16 = EXT_SERVER_NAME;

    fn encode(&self, out: &mut Vec<u8>) -> ExtensionResult<()> {
        if self.names.is_empty() {
            return Err(ExtensionError::InternalError("server name list is empty"));
        }
        if has_duplicate_type(&self.names) {
            return Err(ExtensionError::InternalError("duplicate server name type"));
        }
        let mut body = Vec::new();
        for name in &self.names {
            name.encode(&mut body)?;
        }
        write_u16(out, len_to_u16(body.len(), "server name list too long")?);
        out.extend_from_slice(&body);
        Ok(())
    }

    fn parse(reader: &mut Reader<'_>) -> ExtensionResult<Self> {
        let mut list = reader.sub_reader16("truncated server name list")?;
        if list.is_empty() {
            return Err(ExtensionError::Decode("empty server name list"));
        }
        let mut names = Vec::new();
        while !list.is_empty() {
            names.push(ServerName::parse(&mut list)?);
        }
        if has_duplicate_type(&names) {
            return Err(ExtensionError::Decode("duplicate server name type"));
        }
        Ok(Self { names })
    }
}
