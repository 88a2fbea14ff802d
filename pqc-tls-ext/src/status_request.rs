//! `status_request` extension body (RFC 6066 §8).
//!
//! ```text
//! struct {
//!     CertificateStatusType status_type;      // ocsp(1)
//!     ResponderID responder_id_list<0..2^16-1>;
//!     Extensions  request_extensions;          // opaque<0..2^16-1>
//! } CertificateStatusRequest;
//! ```

use crate::codec::{len_to_u16, write_opaque16, write_u16, Reader};
use crate::error::{ExtensionError, ExtensionResult};
use crate::extensions::{TlsExtension, EXT_STATUS_REQUEST};

pub const STATUS_TYPE_OCSP: u8 = 1;

/// OCSP request parameters. Responder ids and request extensions are opaque
/// DER blobs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct OcspStatusRequest {
    pub responder_ids: Vec<Vec<u8>>,
    pub request_extensions: Vec<u8>,
}

impl OcspStatusRequest {
    pub fn new(responder_ids: Vec<Vec<u8>>, request_extensions: Vec<u8>) -> Self {
        Self {
            responder_ids,
            request_extensions,
        }
    }

    fn encode(&self, out: &mut Vec<u8>) -> ExtensionResult<()> {
        let mut ids = Vec::new();
        for id in &self.responder_ids {
            if id.is_empty() {
                return Err(ExtensionError::InternalError("empty responder id"));
            }
            write_opaque16(&mut ids, id, "responder id too long")?;
        }
        write_u16(out, len_to_u16(ids.len(), "responder id list too long")?);
        out.extend_from_slice(&ids);
        write_opaque16(out, &self.request_extensions, "request extensions too long")
    }

    fn parse(reader: &mut Reader<'_>) -> ExtensionResult<Self> {
        let mut list = reader.sub_reader16("truncated responder id list")?;
        let mut responder_ids = Vec::new();
        while !list.is_empty() {
            let id = list.read_opaque16("truncated responder id")?;
            if id.is_empty() {
                return Err(ExtensionError::Decode("empty responder id"));
            }
            responder_ids.push(id.to_vec());
        }
        let request_extensions = reader
            .read_opaque16("truncated request extensions")?
            .to_vec();
        Ok(Self {
            responder_ids,
            request_extensions,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificateStatusRequest {
    Ocsp(OcspStatusRequest),
}

impl CertificateStatusRequest {
    pub fn status_type(&self) -> u8 {
        match self {
            CertificateStatusRequest::Ocsp(_) => STATUS_TYPE_OCSP,
        }
    }

    pub fn ocsp(&self) -> Option<&OcspStatusRequest> {
        match self {
            CertificateStatusRequest::Ocsp(request) => Some(request),
        }
    }
}

impl TlsExtension for CertificateStatusRequest {
    const EXTENSION_TYPE: u16 = EXT_STATUS_REQUEST;

    fn encode(&self, out: &mut Vec<u8>) -> ExtensionResult<()> {
        match self {
            CertificateStatusRequest::Ocsp(request) => {
                let mut body = vec![STATUS_TYPE_OCSP];
                request.encode(&mut body)?;
                out.extend_from_slice(&body);
                Ok(())
            }
        }
    }

    fn parse(reader: &mut Reader<'_>) -> ExtensionResult<Self> {
        match reader.read_u8("truncated status type")? {
            STATUS_TYPE_OCSP => OcspStatusRequest::parse(reader).map(CertificateStatusRequest::Ocsp),
            _ => Err(ExtensionError::Decode("unknown certificate status type")),
        }
    }
}
