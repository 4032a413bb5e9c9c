use thiserror::Error;

/**
    A read that ran past the end of the input.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: need {needed} bytes, {remaining} remaining")]
pub struct ReadError {
    pub field: &'static str,
    pub needed: usize,
    pub remaining: usize,
}

/**
    Sequential, bounds-checked cursor over a byte slice.

    Every read names the field it is consuming so that a failure can
    report exactly where the input ran out. Reads never backtrack.
*/
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /**
        Number of bytes consumed so far.
    */
    pub const fn position(&self) -> usize {
        self.pos
    }

    /**
        Number of bytes not yet consumed.
    */
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], ReadError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(ReadError {
                field,
                needed: len,
                remaining,
            });
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], ReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, field)?);
        Ok(out)
    }

    pub fn read_u32_be(&mut self, field: &'static str) -> Result<u32, ReadError> {
        self.read_array(field).map(u32::from_be_bytes)
    }

    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32, ReadError> {
        self.read_array(field).map(u32::from_le_bytes)
    }
}
