#![allow(clippy::doc_overindented_list_items)]

mod constants;
mod error;
mod pssh;
mod reader;
mod types;

pub mod utils;

pub use self::constants::{
    BOX_TYPE, CLEARKEY_SYSTEM_ID, FAIRPLAY_SYSTEM_ID, KEY_ID_LEN, MIN_BOX_LEN, PLAYREADY_SYSTEM_ID,
    WIDEVINE_SYSTEM_ID,
};
pub use self::error::{ParseError, PsshError};
pub use self::pssh::{PsshBox, decode, decode_strict, downgrade_to_v0, encode};
pub use self::reader::{ReadError, Reader};
pub use self::types::{KeyId, SystemId};
pub use self::utils::parse_hex16;
