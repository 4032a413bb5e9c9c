use core::fmt;
use core::str::FromStr;

use crate::constants::KEY_ID_LEN;
use crate::error::ParseError;
use crate::utils::{bytes_equal, parse_hex16};

/**
    DRM content protection system identifier.

    Recognizes the major DRM systems by their DASH-IF registered UUIDs.
    Unrecognized system IDs are captured in the `Unknown` variant.

    Reference: <https://dashif.org/identifiers/content_protection/>
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemId {
    Widevine,
    PlayReady,
    FairPlay,
    ClearKey,
    Unknown([u8; 16]),
}

impl SystemId {
    /**
        Identify a DRM system from its 16-byte UUID.
    */
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        use crate::constants::*;
        if bytes_equal(&bytes, &WIDEVINE_SYSTEM_ID) {
            Self::Widevine
        } else if bytes_equal(&bytes, &PLAYREADY_SYSTEM_ID) {
            Self::PlayReady
        } else if bytes_equal(&bytes, &FAIRPLAY_SYSTEM_ID) {
            Self::FairPlay
        } else if bytes_equal(&bytes, &CLEARKEY_SYSTEM_ID) {
            Self::ClearKey
        } else {
            Self::Unknown(bytes)
        }
    }

    /**
        Return the raw 16-byte UUID for this system.
    */
    pub const fn to_bytes(self) -> [u8; 16] {
        use crate::constants::*;
        match self {
            Self::Widevine => WIDEVINE_SYSTEM_ID,
            Self::PlayReady => PLAYREADY_SYSTEM_ID,
            Self::FairPlay => FAIRPLAY_SYSTEM_ID,
            Self::ClearKey => CLEARKEY_SYSTEM_ID,
            Self::Unknown(bytes) => bytes,
        }
    }

    /**
        Human-readable name for this system.
    */
    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Widevine => "Widevine",
            Self::PlayReady => "PlayReady",
            Self::FairPlay => "FairPlay",
            Self::ClearKey => "ClearKey",
            Self::Unknown(_) => "Unknown",
        }
    }

    /**
        Parse a UUID string into a `SystemId`.

        Accepts both hyphenated (`edef8ba9-79d6-4ace-a3c8-27dcd51d21ed`) and
        plain (`edef8ba979d64acea3c827dcd51d21ed`) formats. Hex digits are
        case-insensitive.
    */
    pub const fn from_uuid(s: &[u8]) -> Option<Self> {
        match parse_hex16(s) {
            Some(bytes) => Some(Self::from_bytes(bytes)),
            None => None,
        }
    }

    /**
        Format as a standard UUID string (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`).
    */
    pub fn to_uuid(self) -> String {
        let h = hex::encode(self.to_bytes());
        format!(
            "{}-{}-{}-{}-{}",
            &h[0..8],
            &h[8..12],
            &h[12..16],
            &h[16..20],
            &h[20..32]
        )
    }

    /**
        Returns `true` for recognized DRM systems.
    */
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /**
        Returns `true` for unrecognized DRM systems.
    */
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<[u8; 16]> for SystemId {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_name(), self.to_uuid())
    }
}

/**
    Parse a system ID from a UUID string or one of the names
    `widevine`, `playready`, `fairplay`, `clearkey` (case-insensitive).
*/
impl FromStr for SystemId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let named = [
            Self::Widevine,
            Self::PlayReady,
            Self::FairPlay,
            Self::ClearKey,
        ]
        .into_iter()
        .find(|id| id.to_name().eq_ignore_ascii_case(name));

        named
            .or_else(|| Self::from_uuid(name.as_bytes()))
            .ok_or_else(|| ParseError {
                kind: "system ID",
                value: s.to_owned(),
            })
    }
}

/**
    A 16-byte content key identifier.

    `Display` prints lowercase hex without separators.
*/
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId([u8; KEY_ID_LEN]);

impl KeyId {
    pub const fn new(bytes: [u8; KEY_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; KEY_ID_LEN] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; KEY_ID_LEN] {
        &self.0
    }

    /**
        Parse a key ID from 32 hex digits, with or without UUID hyphens.
    */
    pub const fn from_hex(s: &[u8]) -> Option<Self> {
        match parse_hex16(s) {
            Some(bytes) => Some(Self(bytes)),
            None => None,
        }
    }

    /**
        Key ID as a lowercase hex string.
    */
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; KEY_ID_LEN]> for KeyId {
    fn from(bytes: [u8; KEY_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<KeyId> for [u8; KEY_ID_LEN] {
    fn from(kid: KeyId) -> Self {
        kid.0
    }
}

impl AsRef<[u8]> for KeyId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.to_hex())
    }
}

impl FromStr for KeyId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.as_bytes()).ok_or_else(|| ParseError {
            kind: "key ID",
            value: s.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn system_id_from_known_bytes() {
        use crate::constants::*;
        assert_eq!(SystemId::from_bytes(WIDEVINE_SYSTEM_ID), SystemId::Widevine);
        assert_eq!(
            SystemId::from_bytes(PLAYREADY_SYSTEM_ID),
            SystemId::PlayReady
        );
        assert_eq!(SystemId::from_bytes(FAIRPLAY_SYSTEM_ID), SystemId::FairPlay);
        assert_eq!(SystemId::from_bytes(CLEARKEY_SYSTEM_ID), SystemId::ClearKey);
    }

    #[test]
    fn system_id_unknown_preserves_bytes() {
        let bytes: [u8; 16] = hex!("00112233445566778899aabbccddeeff");
        let id = SystemId::from_bytes(bytes);
        assert_eq!(id, SystemId::Unknown(bytes));
        assert_eq!(id.to_bytes(), bytes);
        assert!(id.is_unknown());
        assert!(!id.is_known());
    }

    #[test]
    fn system_id_display() {
        assert_eq!(
            format!("{}", SystemId::Widevine),
            "Widevine (edef8ba9-79d6-4ace-a3c8-27dcd51d21ed)"
        );
        assert_eq!(
            format!("{}", SystemId::Unknown([0; 16])),
            "Unknown (00000000-0000-0000-0000-000000000000)"
        );
    }

    #[test]
    fn system_id_from_uuid_round_trip() {
        for id in [
            SystemId::Widevine,
            SystemId::PlayReady,
            SystemId::FairPlay,
            SystemId::ClearKey,
            SystemId::Unknown(hex!("00112233445566778899aabbccddeeff")),
        ] {
            let uuid = id.to_uuid();
            assert_eq!(SystemId::from_uuid(uuid.as_bytes()), Some(id));
        }
    }

    #[test]
    fn system_id_from_str_accepts_names() {
        assert_eq!("widevine".parse::<SystemId>().unwrap(), SystemId::Widevine);
        assert_eq!(
            "PlayReady".parse::<SystemId>().unwrap(),
            SystemId::PlayReady
        );
        assert_eq!(
            "edef8ba9-79d6-4ace-a3c8-27dcd51d21ed"
                .parse::<SystemId>()
                .unwrap(),
            SystemId::Widevine
        );
        let err = "nope".parse::<SystemId>().unwrap_err();
        assert_eq!(err.kind, "system ID");
    }

    #[test]
    fn key_id_display_and_debug() {
        let kid = KeyId::new(hex!("00000000000000000000000000000001"));
        assert_eq!(kid.to_string(), "00000000000000000000000000000001");
        assert_eq!(format!("{kid:?}"), "KeyId(00000000000000000000000000000001)");
    }

    #[test]
    fn key_id_from_str() {
        let kid: KeyId = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa".parse().unwrap();
        assert_eq!(kid.to_bytes(), [0xAA; 16]);
        let kid: KeyId = "BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB".parse().unwrap();
        assert_eq!(kid, KeyId::from([0xBB; 16]));
    }

    #[test]
    fn key_id_from_str_invalid() {
        let err = "0001".parse::<KeyId>().unwrap_err();
        assert_eq!(
            err,
            ParseError {
                kind: "key ID",
                value: "0001".into(),
            }
        );
    }
}
