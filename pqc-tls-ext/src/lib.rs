//! Encoding and strict decoding of the `server_name` and `status_request`
//! hello extensions.
//!
//! Extension values live in an [`ExtensionMap`] keyed by extension type.
//! Reading a value fails unless every byte is consumed by the parser.
//!
//! ```
//! use pqc_tls_ext::{
//!     add_server_name_extension, get_server_name_extension, ExtensionMap, ServerNameList,
//! };
//!
//! let mut extensions = ExtensionMap::new();
//! let names = ServerNameList::single_host("relay.pqcnet.io");
//! add_server_name_extension(&mut extensions, Some(&names)).unwrap();
//! assert_eq!(get_server_name_extension(Some(&extensions)).unwrap(), Some(names));
//! ```

pub mod codec;
pub mod error;
pub mod extensions;
pub mod server_name;
pub mod status_request;

pub use codec::Reader;
pub use error::{ExtensionError, ExtensionResult};
pub use extensions::{
    add_extension, add_server_name_extension, add_status_request_extension, create_extension,
    create_server_name_extension, create_status_request_extension, get_extension,
    get_server_name_extension, get_status_request_extension, read_extension,
    read_server_name_extension, read_status_request_extension, ExtensionMap, TlsExtension,
    EXT_SERVER_NAME, EXT_STATUS_REQUEST,
};
pub use server_name::{ServerName, ServerNameList, NAME_TYPE_HOST_NAME};
pub use status_request::{CertificateStatusRequest, OcspStatusRequest, STATUS_TYPE_OCSP};
