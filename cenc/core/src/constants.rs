use hex_literal::hex;

/**
    Widevine DRM System ID: `edef8ba9-79d6-4ace-a3c8-27dcd51d21ed`

    Used as the scheme of a box whenever the caller does not name one.
*/
pub const WIDEVINE_SYSTEM_ID: [u8; 16] = hex!(
    "edef8ba9"
    "79d6"
    "4ace"
    "a3c8"
    "27dcd51d21ed"
);

/**
    PlayReady DRM System ID: `9a04f079-9840-4286-ab92-e65be0885f95`
*/
pub const PLAYREADY_SYSTEM_ID: [u8; 16] = hex!(
    "9a04f079"
    "9840"
    "4286"
    "ab92"
    "e65be0885f95"
);

/**
    Apple FairPlay DRM System ID: `94ce86fb-07ff-4f43-adb8-93d2fa968ca2`
*/
pub const FAIRPLAY_SYSTEM_ID: [u8; 16] = hex!(
    "94ce86fb"
    "07ff"
    "4f43"
    "adb8"
    "93d2fa968ca2"
);

/**
    W3C ClearKey System ID: `1077efec-c0b2-4d02-ace3-3c1e52e2fb4b`
*/
pub const CLEARKEY_SYSTEM_ID: [u8; 16] = hex!(
    "1077efec"
    "c0b2"
    "4d02"
    "ace3"
    "3c1e52e2fb4b"
);

/**
    Box type tag written at offset 4 of every encoded box (`pssh`).
*/
pub const BOX_TYPE: [u8; 4] = hex!("70737368");

/**
    Length of a system ID or key ID.
*/
pub const KEY_ID_LEN: usize = 16;

/**
    Size of a v0 box with an empty payload:
    length (4) + type (4) + version (4) + system ID (16) + payload length (4).
*/
pub const MIN_BOX_LEN: usize = 32;
