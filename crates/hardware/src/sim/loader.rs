//! Program image loading.
//!
//! Two formats are accepted:
//! 1. **ELF:** loadable segments are copied to their physical addresses
//!    and the entry point comes from the header.
//! 2. **Flat binary:** everything else is copied verbatim to the base of
//!    RAM and entered at the configured reset PC.

use std::fs;
use std::path::Path;

use object::{Object, ObjectSegment};

use crate::common::SimError;
use crate::soc::SystemBus;

const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

/// Loads a program image into RAM and returns its entry address.
pub fn load_program(
    bus: &mut SystemBus,
    path: &Path,
    ram_base: u32,
    reset_pc: u32,
) -> Result<u32, SimError> {
    let bytes = fs::read(path).map_err(|source| SimError::Image {
        path: path.display().to_string(),
        source,
    })?;

    if bytes.starts_with(&ELF_MAGIC) {
        load_elf(bus, &bytes, ram_base)
    } else {
        bus.ram_mut().load(0, &bytes)?;
        tracing::info!(
            path = %path.display(),
            len = bytes.len(),
            "loaded flat image at RAM base"
        );
        Ok(reset_pc)
    }
}

fn load_elf(bus: &mut SystemBus, bytes: &[u8], ram_base: u32) -> Result<u32, SimError> {
    let file = object::File::parse(bytes)?;
    for segment in file.segments() {
        let data = segment.data()?;
        if data.is_empty() {
            continue;
        }
        let addr = segment.address() as u32;
        bus.ram_mut().load(addr.wrapping_sub(ram_base), data)?;
        tracing::debug!(
            addr = format_args!("{addr:#010x}"),
            len = data.len(),
            "loaded ELF segment"
        );
    }
    Ok(file.entry() as u32)
}
