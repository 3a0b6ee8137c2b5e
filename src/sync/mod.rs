//! Synchronization between the request draft and its derived representations.
//!
//! - **params**: URL ↔ structured query parameters
//! - **address**: draft ↔ browser-visible address
//! - **debounce**: debounced values used to throttle address and snippet updates

pub mod address;
pub mod debounce;
pub mod params;

pub use address::{
    build_address, parse_address, sync_address, Address, AddressBar, AddressRequest,
    AddressSynchronizer, MemoryAddressBar, RESTORE_FLAG,
};
pub use debounce::Debounced;
pub use params::{build_query, derive_params_from_url, rebuild_url_from_params, strip_query};
