use pinocchio::program_error::ProgramError;

/// Trait for records that can be read in place from account data.
///
/// Implementors must be `#[repr(C)]` and built only from byte-sized fields so
/// any byte slice of `LEN` bytes is a valid value.
pub trait Transmutable: Sized {
    const LEN: usize;

    /// Load from bytes without copying
    fn load(data: &[u8]) -> Result<&Self, ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(unsafe { &*(data.as_ptr() as *const Self) })
    }
}

/// Trait for mutable in-place access
pub trait TransmutableMut: Transmutable {
    fn load_mut(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(unsafe { &mut *(data.as_mut_ptr() as *mut Self) })
    }
}

/// Trait for records that can be viewed as their raw account bytes
pub trait IntoBytes {
    fn into_bytes(&self) -> &[u8];
}
