//! Emulator memory access.
//!
//! The host exposes the game's RDRAM through [`Rdram`] and a few derived
//! facts through [`GameCore`]. Reads never fail: an emulator always has some
//! byte at every address.

/// Size of RDRAM with the expansion pak.
pub const RDRAM_SIZE: usize = 0x80_0000;

/// Mask from a KSEG0/KSEG1 virtual address to a physical RDRAM offset.
const PHYSICAL_MASK: u32 = 0x1FFF_FFFF;

/// Byte-level reads against live RDRAM, big-endian.
pub trait Rdram {
    fn read_u8(&self, addr: u32) -> u8;

    fn read_u16(&self, addr: u32) -> u16 {
        u16::from_be_bytes([self.read_u8(addr), self.read_u8(addr.wrapping_add(1))])
    }

    /// Fill `buf` with consecutive bytes starting at `addr`.
    fn read_into(&self, addr: u32, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u32));
        }
    }
}

/// Game-level state the host derives for us.
pub trait GameCore: Rdram {
    /// True while the pause menu is up.
    fn is_paused(&self) -> bool;

    /// Base address of the save context in RDRAM.
    fn save_context(&self) -> u32;
}

/// A captured RDRAM image in console byte order.
#[derive(Clone)]
pub struct RamSnapshot {
    data: Vec<u8>,
}

impl RamSnapshot {
    /// Zeroed RDRAM of the full expansion pak size.
    pub fn new() -> Self {
        Self {
            data: vec![0; RDRAM_SIZE],
        }
    }

    /// Wrap a raw big-endian dump.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write_u8(&mut self, addr: u32, value: u8) {
        if let Some(byte) = self.data.get_mut(offset(addr)) {
            *byte = value;
        }
    }

    pub fn write_u16(&mut self, addr: u32, value: u16) {
        self.write_bytes(addr, &value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, addr: u32, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), b);
        }
    }
}

impl Default for RamSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RamSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RamSnapshot")
            .field("len", &self.data.len())
            .finish()
    }
}

impl Rdram for RamSnapshot {
    fn read_u8(&self, addr: u32) -> u8 {
        self.data.get(offset(addr)).copied().unwrap_or(0)
    }
}

fn offset(addr: u32) -> usize {
    (addr & PHYSICAL_MASK) as usize
}

/// A [`GameCore`] over a snapshot, with the pause flag and save context
/// supplied by the caller.
#[derive(Clone, Debug)]
pub struct SnapshotCore {
    pub ram: RamSnapshot,
    pub paused: bool,
    pub save_context: u32,
}

impl SnapshotCore {
    pub fn new(ram: RamSnapshot, save_context: u32) -> Self {
        Self {
            ram,
            paused: false,
            save_context,
        }
    }
}

impl Rdram for SnapshotCore {
    fn read_u8(&self, addr: u32) -> u8 {
        self.ram.read_u8(addr)
    }

    fn read_into(&self, addr: u32, buf: &mut [u8]) {
        self.ram.read_into(addr, buf)
    }
}

impl GameCore for SnapshotCore {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn save_context(&self) -> u32 {
        self.save_context
    }
}
