use tracing::{debug, trace};

use crate::constants::{BOX_TYPE, KEY_ID_LEN, MIN_BOX_LEN, WIDEVINE_SYSTEM_ID};
use crate::error::PsshError;
use crate::reader::Reader;
use crate::types::{KeyId, SystemId};

/**
    PSSH box as exchanged with manifests and license requests.

    Wire layout:
      [0..4]    box_size: u32 big-endian (total box size including this field)
      [4..8]    box_type: "pssh"
      [8..12]   version: u32 little-endian (0 or 1)
      [12..28]  system_id: 16 bytes
      if version == 1:
        [28..32]  key_id_count: u32 big-endian
        [32..]    key_ids: key_id_count * 16 bytes
      [..]      data_size: u32 big-endian
      [..]      data: data_size bytes

    The version is a little-endian u32 rather than the ISOBMFF u8 version
    plus 24-bit flags. With zero flags both read the same bytes.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsshBox {
    /**
        Box version. Encoding only ever produces 0 or 1.
    */
    pub version: u32,
    /**
        16-byte DRM system identifier.
    */
    pub system_id: [u8; 16],
    /**
        Key IDs from the box header (v1 only). Empty for v0 boxes.
    */
    pub key_ids: Vec<KeyId>,
    /**
        Opaque init data. For Widevine this is a serialized WidevinePsshData
        protobuf; it is never interpreted here.
    */
    pub data: Vec<u8>,
}

impl PsshBox {
    /**
        Build a box. The version is 1 when `key_ids` is non-empty, else 0.
    */
    pub fn new(
        system_id: [u8; 16],
        key_ids: impl Into<Vec<KeyId>>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        let key_ids = key_ids.into();
        Self {
            version: u32::from(!key_ids.is_empty()),
            system_id,
            key_ids,
            data: data.into(),
        }
    }

    /**
        Build a Widevine box.
    */
    pub fn widevine(key_ids: impl Into<Vec<KeyId>>, data: impl Into<Vec<u8>>) -> Self {
        Self::new(WIDEVINE_SYSTEM_ID, key_ids, data)
    }

    /**
        Parse a base64-encoded PSSH box.

        The declared box length is read but not checked against the input;
        use [`PsshBox::from_base64_strict`] to enforce it.
    */
    pub fn from_base64(pssh: &str) -> Result<Self, PsshError> {
        Self::from_bytes(&decode_base64(pssh)?)
    }

    /**
        Parse a base64-encoded PSSH box, rejecting a declared length that
        differs from the decoded length.
    */
    pub fn from_base64_strict(pssh: &str) -> Result<Self, PsshError> {
        Self::from_bytes_strict(&decode_base64(pssh)?)
    }

    /**
        Parse a PSSH box from raw bytes, consuming fields strictly in order.

        Bytes after the payload are ignored.
    */
    pub fn from_bytes(input: &[u8]) -> Result<Self, PsshError> {
        parse_box(input).map(|(pssh, _)| pssh)
    }

    /**
        Like [`PsshBox::from_bytes`], but the declared box length must equal
        the input length.
    */
    pub fn from_bytes_strict(input: &[u8]) -> Result<Self, PsshError> {
        let (pssh, declared) = parse_box(input)?;
        if declared as usize != input.len() {
            return Err(PsshError::LengthMismatch {
                declared,
                actual: input.len(),
            });
        }
        Ok(pssh)
    }

    /**
        Total encoded size of this box, which is also the value written to
        its length field.
    */
    pub fn encoded_len(&self) -> usize {
        let mut size = MIN_BOX_LEN + self.data.len();
        if self.version == 1 {
            size += 4 + self.key_ids.len() * KEY_ID_LEN;
        }
        size
    }

    /**
        Serialize to PSSH box bytes.

        The key ID region is written only for version 1, so a decoded box
        re-encodes to the same bytes it was parsed from. Length fields are
        u32, so boxes larger than `u32::MAX` bytes cannot be represented.
    */
    pub fn to_bytes(&self) -> Vec<u8> {
        let size = self.encoded_len();
        let mut buf = Vec::with_capacity(size);

        buf.extend_from_slice(&(size as u32).to_be_bytes());
        buf.extend_from_slice(&BOX_TYPE);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.system_id);

        if self.version == 1 {
            buf.extend_from_slice(&(self.key_ids.len() as u32).to_be_bytes());
            for kid in &self.key_ids {
                buf.extend_from_slice(kid.as_bytes());
            }
        }

        buf.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.data);

        debug_assert_eq!(buf.len(), size);
        buf
    }

    /**
        Serialize to a base64-encoded PSSH box string.
    */
    pub fn to_base64(&self) -> String {
        data_encoding::BASE64.encode(&self.to_bytes())
    }

    /**
        Key IDs from the box header (v1 only).
    */
    pub fn key_ids(&self) -> &[KeyId] {
        &self.key_ids
    }

    /**
        Raw init data payload (the `data` field inside the PSSH box).
    */
    pub fn init_data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_v1(&self) -> bool {
        self.version == 1
    }

    /**
        Identify the DRM system from the PSSH box's system ID.
    */
    pub fn system_id(&self) -> SystemId {
        SystemId::from_bytes(self.system_id)
    }

    /**
        Check that this PSSH box belongs to the given DRM system.
        Returns `Err(PsshError::SystemIdMismatch)` if it does not.
    */
    pub fn ensure_system_id(&self, expected: SystemId) -> Result<(), PsshError> {
        let actual = self.system_id();
        if actual == expected {
            Ok(())
        } else {
            Err(PsshError::SystemIdMismatch(actual, expected))
        }
    }

    /**
        The equivalent v0 box with the key ID list dropped.

        Returns `None` unless this is a v1 Widevine box with a non-empty
        payload. Key IDs are discarded, so only use this when the consumer
        reads them from the payload instead.
    */
    pub fn to_v0(&self) -> Option<PsshBox> {
        if self.version != 1 {
            debug!(version = self.version, "not downgrading: box is not v1");
            return None;
        }
        if self.data.is_empty() {
            debug!("not downgrading: empty payload");
            return None;
        }
        if self.system_id != WIDEVINE_SYSTEM_ID {
            debug!(system_id = %self.system_id(), "not downgrading: not a Widevine box");
            return None;
        }
        Some(PsshBox::new(self.system_id, Vec::<KeyId>::new(), self.data.clone()))
    }
}

/**
    Encode a PSSH box and return its base64 form.

    `system_id` defaults to [`WIDEVINE_SYSTEM_ID`]. The box is version 1
    when `key_ids` is non-empty, else version 0.
*/
pub fn encode(data: &[u8], system_id: Option<[u8; 16]>, key_ids: &[KeyId]) -> String {
    let pssh = PsshBox::new(system_id.unwrap_or(WIDEVINE_SYSTEM_ID), key_ids, data);
    trace!(
        version = pssh.version,
        key_ids = key_ids.len(),
        data_size = data.len(),
        "encoding PSSH box"
    );
    pssh.to_base64()
}

/**
    Decode a base64 PSSH box. See [`PsshBox::from_base64`].
*/
pub fn decode(pssh: &str) -> Result<PsshBox, PsshError> {
    PsshBox::from_base64(pssh)
}

/**
    Decode a base64 PSSH box, enforcing the declared length.
    See [`PsshBox::from_base64_strict`].
*/
pub fn decode_strict(pssh: &str) -> Result<PsshBox, PsshError> {
    PsshBox::from_base64_strict(pssh)
}

/**
    Rewrite a v1 Widevine box as v0, dropping its key ID list.

    Returns the input unchanged when it does not decode, is not v1, is
    not Widevine, or has an empty payload. Never fails.
*/
pub fn downgrade_to_v0(pssh: &str) -> String {
    match decode(pssh) {
        Ok(parsed) => match parsed.to_v0() {
            Some(v0) => v0.to_base64(),
            None => pssh.to_owned(),
        },
        Err(e) => {
            debug!(error = %e, "not downgrading: input does not decode");
            pssh.to_owned()
        }
    }
}

/**
    Parse the fixed fields in order, returning the box and its declared length.
*/
fn parse_box(input: &[u8]) -> Result<(PsshBox, u32), PsshError> {
    let mut r = Reader::new(input);

    let declared = r.read_u32_be("box_size")?;
    let _box_type: [u8; 4] = r.read_array("box_type")?;
    let version = r.read_u32_le("version")?;
    let system_id = r.read_array::<KEY_ID_LEN>("system_id")?;

    let mut key_ids = Vec::new();
    if version == 1 {
        let count = r.read_u32_be("key_id_count")? as usize;
        key_ids.reserve(count.min(r.remaining() / KEY_ID_LEN));
        for _ in 0..count {
            key_ids.push(KeyId::new(r.read_array("key_id")?));
        }
    }

    let data_size = r.read_u32_be("data_size")? as usize;
    let data = r.read_bytes(data_size, "data")?.to_vec();

    trace!(
        declared,
        actual = input.len(),
        version,
        key_ids = key_ids.len(),
        data_size,
        "parsed PSSH box"
    );

    let pssh = PsshBox {
        version,
        system_id,
        key_ids,
        data,
    };
    Ok((pssh, declared))
}

/**
    Decode standard base64, skipping ASCII whitespace so that boxes copied
    out of manifests with padding or line breaks still parse.
*/
fn decode_base64(pssh: &str) -> Result<Vec<u8>, PsshError> {
    let compact: Vec<u8> = pssh
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    data_encoding::BASE64
        .decode(&compact)
        .map_err(|e| PsshError::InvalidBase64(format!("PSSH: {e}")))
}
