//! Just enough ELF to tell a shared object apart from a resource and to read
//! the architecture it was built for.

use abipick_schema::{X86, X86_64};

pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];
/// Byte offset of `e_machine` in both ELF32 and ELF64 headers.
pub const ELF_MACHINE_OFFSET: usize = 18;

pub const EM_386: u16 = 3;
pub const EM_ARM: u16 = 40;
pub const EM_X86_64: u16 = 62;
pub const EM_AARCH64: u16 = 183;

pub fn is_valid_elf(buf: &[u8]) -> bool {
    buf.starts_with(&ELF_MAGIC)
}

/// `e_machine`, read little-endian. `None` when the buffer is too short.
pub fn machine_code(buf: &[u8]) -> Option<u16> {
    let bytes = buf.get(ELF_MACHINE_OFFSET..ELF_MACHINE_OFFSET + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Machine code a folder must carry to not count as mixed. Only the x86
/// folders are checked.
pub fn expected_machine(abi: &str) -> Option<u16> {
    match abi {
        X86 => Some(EM_386),
        X86_64 => Some(EM_X86_64),
        _ => None,
    }
}

/// True when `buf` does not carry the machine code `abi` expects.
pub fn is_mixed_lib(abi: &str, buf: &[u8]) -> bool {
    match expected_machine(abi) {
        Some(expected) => machine_code(buf) != Some(expected),
        None => false,
    }
}

/// Minimal ELF header with the given machine code, for tests and fixtures.
pub fn stub_elf(machine: u16) -> Vec<u8> {
    let mut buf = vec![0u8; 64];
    buf[..4].copy_from_slice(&ELF_MAGIC);
    buf[4] = 2; // ELFCLASS64
    buf[5] = 1; // little-endian
    buf[6] = 1; // EV_CURRENT
    buf[16] = 3; // ET_DYN
    buf[ELF_MACHINE_OFFSET..ELF_MACHINE_OFFSET + 2].copy_from_slice(&machine.to_le_bytes());
    buf
}
