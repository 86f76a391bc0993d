use crate::error::MemoryError;

/// Capacity of the full 8080 address space.
pub const DEFAULT_CAPACITY: usize = 0x10000;

/// Flat byte-addressable memory.
///
/// Every access is bounds-checked against the configured capacity, so a
/// machine with less than 64 KiB reports stray accesses instead of wrapping.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy `data` into memory starting at `address`.
    ///
    /// Nothing is written if the data would run past the end of memory.
    pub fn load(&mut self, data: &[u8], address: usize) -> Result<(), MemoryError> {
        let range = self.range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    pub fn read(&self, address: u16) -> Result<u8, MemoryError> {
        self.check(address)?;
        Ok(self.bytes[address as usize])
    }

    pub fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        self.check(address)?;
        self.bytes[address as usize] = value;
        Ok(())
    }

    /// Fail unless `address` lies inside memory.
    pub fn check(&self, address: u16) -> Result<(), MemoryError> {
        self.range(address as usize, 1).map(|_| ())
    }

    /// Borrow `len` bytes starting at `start`, e.g. a video RAM window.
    pub fn slice(&self, start: usize, len: usize) -> Result<&[u8], MemoryError> {
        let range = self.range(start, len)?;
        Ok(&self.bytes[range])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn range(&self, address: usize, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        let capacity = self.bytes.len();
        match address.checked_add(len) {
            Some(end) if end <= capacity => Ok(address..end),
            _ => Err(MemoryError::OutOfBounds {
                address,
                len,
                capacity,
            }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("capacity", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_copies_bytes_at_address() {
        let mut memory = Memory::default();
        memory.load(&[0xde, 0xad, 0xbe, 0xef], 0x0100).unwrap();
        assert_eq!(memory.slice(0x0100, 4).unwrap(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(memory.read(0x00ff).unwrap(), 0);
        assert_eq!(memory.read(0x0104).unwrap(), 0);
    }

    #[test]
    fn load_up_to_the_last_byte_is_allowed() {
        let mut memory = Memory::new(0x100);
        memory.load(&[1, 2], 0xfe).unwrap();
        assert_eq!(memory.read(0xff).unwrap(), 2);
    }

    #[test]
    fn load_past_capacity_fails_without_writing() {
        let mut memory = Memory::new(0x100);
        let err = memory.load(&[1, 2, 3], 0xfe).unwrap_err();
        assert_eq!(
            err,
            MemoryError::OutOfBounds {
                address: 0xfe,
                len: 3,
                capacity: 0x100,
            }
        );
        assert_eq!(memory.read(0xfe).unwrap(), 0);
        assert_eq!(memory.read(0xff).unwrap(), 0);
    }

    #[test]
    fn access_outside_capacity_fails() {
        // Same size as the Space Invaders reference build, one byte short.
        let mut memory = Memory::new(0xffff);
        assert!(memory.read(0xfffe).is_ok());
        assert!(memory.read(0xffff).is_err());
        assert!(memory.write(0xffff, 1).is_err());
        assert!(memory.check(0xffff).is_err());
    }

    #[test]
    fn default_covers_the_full_address_space() {
        let mut memory = Memory::default();
        assert_eq!(memory.len(), 0x10000);
        memory.write(0xffff, 0x42).unwrap();
        assert_eq!(memory.read(0xffff).unwrap(), 0x42);
    }
}
