//! Identifier-keyed extension table and the add/get/create/read helpers.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::codec::Reader;
use crate::error::{ExtensionError, ExtensionResult};
use crate::server_name::ServerNameList;
use crate::status_request::CertificateStatusRequest;

pub const EXT_SERVER_NAME: u16 = 0;
pub const EXT_STATUS_REQUEST: u16 = 5;

/// Extension type → encoded extension value.
pub type ExtensionMap = BTreeMap<u16, Vec<u8>>;

/// An extension value with a fixed extension type and its own wire layout.
pub trait TlsExtension: Sized {
    const EXTENSION_TYPE: u16;

    fn encode(&self, out: &mut Vec<u8>) -> ExtensionResult<()>;

    /// Parse from the reader's position; bytes after the value stay unread.
    fn parse(reader: &mut Reader<'_>) -> ExtensionResult<Self>;
}

/// Encoded bytes of `extension`, exactly as its own encoder writes them.
pub fn create_extension<E: TlsExtension>(extension: Option<&E>) -> ExtensionResult<Vec<u8>> {
    let extension =
        extension.ok_or(ExtensionError::InternalError("no extension value to encode"))?;
    let mut out = Vec::new();
    extension.encode(&mut out)?;
    Ok(out)
}

/// Parse an extension value that must be consumed completely.
pub fn read_extension<E: TlsExtension>(value: Option<&[u8]>) -> ExtensionResult<E> {
    let value = value.ok_or(ExtensionError::InvalidArgument("extension value is absent"))?;
    let mut reader = Reader::new(value);
    let extension = E::parse(&mut reader)?;
    if let Err(err) = reader.expect_end() {
        warn!(extension_type = E::EXTENSION_TYPE, %err, "rejecting extension value");
        return Err(err);
    }
    Ok(extension)
}

/// `Ok(None)` when the map is absent or lacks `E`'s type.
pub fn get_extension<E: TlsExtension>(extensions: Option<&ExtensionMap>) -> ExtensionResult<Option<E>> {
    match extensions.and_then(|map| map.get(&E::EXTENSION_TYPE)) {
        Some(value) => read_extension(Some(value.as_slice())).map(Some),
        None => Ok(None),
    }
}

/// Encode and store under `E::EXTENSION_TYPE`, replacing any earlier value.
/// The map is untouched when encoding fails.
pub fn add_extension<E: TlsExtension>(
    extensions: &mut ExtensionMap,
    extension: Option<&E>,
) -> ExtensionResult<()> {
    let value = create_extension(extension)?;
    debug!(extension_type = E::EXTENSION_TYPE, len = value.len(), "extension added");
    extensions.insert(E::EXTENSION_TYPE, value);
    Ok(())
}

pub fn add_server_name_extension(
    extensions: &mut ExtensionMap,
    server_names: Option<&ServerNameList>,
) -> ExtensionResult<()> {
    add_extension(extensions, server_names)
}

pub fn add_status_request_extension(
    extensions: &mut ExtensionMap,
    status_request: Option<&CertificateStatusRequest>,
) -> ExtensionResult<()> {
    add_extension(extensions, status_request)
}

pub fn get_server_name_extension(
    extensions: Option<&ExtensionMap>,
) -> ExtensionResult<Option<ServerNameList>> {
    get_extension(extensions)
}

pub fn get_status_request_extension(
    extensions: Option<&ExtensionMap>,
) -> ExtensionResult<Option<CertificateStatusRequest>> {
    get_extension(extensions)
}

pub fn create_server_name_extension(
    server_names: Option<&ServerNameList>,
) -> ExtensionResult<Vec<u8>> {
    create_extension(server_names)
}

pub fn create_status_request_extension(
    status_request: Option<&CertificateStatusRequest>,
) -> ExtensionResult<Vec<u8>> {
    create_extension(status_request)
}

pub fn read_server_name_extension(value: Option<&[u8]>) -> ExtensionResult<ServerNameList> {
    read_extension(value)
}

pub fn read_status_request_extension(
    value: Option<&[u8]>,
) -> ExtensionResult<CertificateStatusRequest> {
    read_extension(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status_request::OcspStatusRequest;

    #[test]
    fn absent_entities_are_internal_errors() {
        assert_eq!(
            create_server_name_extension(None),
            Err(ExtensionError::InternalError("no extension value to encode"))
        );
        let mut map = ExtensionMap::new();
        assert!(add_status_request_extension(&mut map, None).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn absent_bytes_are_invalid_arguments() {
        assert_eq!(
            read_status_request_extension(None),
            Err(ExtensionError::InvalidArgument("extension value is absent"))
        );
    }

    #[test]
    fn add_then_get_uses_registered_ids() {
        let mut map = ExtensionMap::new();
        let names = ServerNameList::single_host("example.com");
        let status = CertificateStatusRequest::Ocsp(OcspStatusRequest::default());
        add_server_name_extension(&mut map, Some(&names)).unwrap();
        add_status_request_extension(&mut map, Some(&status)).unwrap();

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [EXT_SERVER_NAME, EXT_STATUS_REQUEST]);
        assert_eq!(get_server_name_extension(Some(&map)).unwrap(), Some(names));
        assert_eq!(get_status_request_extension(Some(&map)).unwrap(), Some(status));
    }

    #[test]
    fn add_overwrites_previous_value() {
        let mut map = ExtensionMap::new();
        add_server_name_extension(&mut map, Some(&ServerNameList::single_host("old.io"))).unwrap();
        add_server_name_extension(&mut map, Some(&ServerNameList::single_host("new.io"))).unwrap();
        assert_eq!(map.len(), 1);
        let names = get_server_name_extension(Some(&map)).unwrap().unwrap();
        assert_eq!(names.host_name(), Some("new.io"));
    }

    #[test]
    fn absent_map_or_id_is_none() {
        assert_eq!(get_server_name_extension(None), Ok(None));
        let map = ExtensionMap::from([(42u16, vec![1, 2, 3])]);
        assert_eq!(get_status_request_extension(Some(&map)), Ok(None));
    }

    #[test]
    fn stored_garbage_surfaces_on_get() {
        let map = ExtensionMap::from([(EXT_SERVER_NAME, vec![0x00, 0x00])]);
        assert_eq!(
            get_server_name_extension(Some(&map)),
            Err(ExtensionError::Decode("empty server name list"))
        );
    }

    #[test]
    fn trailing_byte_is_rejected() {
        let mut bytes =
            create_status_request_extension(Some(&CertificateStatusRequest::Ocsp(OcspStatusRequest::default())))
                .unwrap();
        bytes.push(0);
        assert_eq!(
            read_status_request_extension(Some(bytes.as_slice())),
            Err(ExtensionError::TrailingData(1))
        );
    }
}
