#[cfg(target_os = "solana")]
use pinocchio::syscalls::sol_memcmp_;
use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};
use pinocchio_pubkey::declare_id;
use pinocchio_system::ID as SYSTEM_ID;

declare_id!("Keystone11111111111111111111111111111111111");

#[allow(unused_imports)]
use std::mem::MaybeUninit;

#[inline(always)]
#[cfg(target_os = "solana")]
pub fn sol_assert_bytes_eq(left: &[u8], right: &[u8], len: usize) -> bool {
    if left.len() < len || right.len() < len {
        return false;
    }
    unsafe {
        let mut result = MaybeUninit::<i32>::uninit();
        sol_memcmp_(
            left.as_ptr(),
            right.as_ptr(),
            len as u64,
            result.as_mut_ptr() as *mut i32,
        );
        result.assume_init() == 0
    }
}

#[cfg(not(target_os = "solana"))]
pub fn sol_assert_bytes_eq(left: &[u8], right: &[u8], len: usize) -> bool {
    left.len() >= len && right.len() >= len && left[..len] == right[..len]
}

macro_rules! sol_assert {
  ($func_name:ident, $($param:ident: $type:ty),* $(,)? | $check:expr) => {
      #[inline(always)]
      pub fn $func_name<E: Into<ProgramError>>($($param: $type,)* error: E) -> ProgramResult {
          if $check {
              Ok(())
          } else {
              Err(error.into())
          }
      }
  };
}

macro_rules! sol_assert_return {
  ($func_name:ident, $return_type:ty, $($param:ident: $type:ty),* $(,)? | $check:expr) => {
      #[inline(always)]
      pub fn $func_name<E: Into<ProgramError>>($($param: $type,)* error: E) -> Result<$return_type, ProgramError> {
          match $check {
              Some(value) => Ok(value),
              None => Err(error.into()),
          }
      }
  };
}

/// Canonical program address and bump for `seeds` under this program.
#[cfg(target_os = "solana")]
pub fn find_self_address(seeds: &[&[u8]]) -> Option<(Pubkey, u8)> {
    pinocchio::pubkey::try_find_program_address(seeds, &crate::ID)
}

#[cfg(not(target_os = "solana"))]
pub fn find_self_address(seeds: &[&[u8]]) -> Option<(Pubkey, u8)> {
    let program_id = solana_pubkey::Pubkey::new_from_array(crate::ID);
    solana_pubkey::Pubkey::try_find_program_address(seeds, &program_id)
        .map(|(pda, bump)| (pda.to_bytes(), bump))
}

// seeds exclude the bump; returns the canonical one
sol_assert_return!(find_self_pda, u8, seeds: &[&[u8]], target_key: &Pubkey | {
  match find_self_address(seeds) {
    Some((pda, bump)) if sol_assert_bytes_eq(pda.as_ref(), target_key.as_ref(), 32) => Some(bump),
    _ => None,
  }
});

sol_assert!(check_canonical_bump, bump: u8, canonical: u8 |
  bump == canonical
);

sol_assert!(check_writable_signer, account: &AccountInfo |
  account.is_writable() && account.is_signer()
);

sol_assert!(check_writable, account: &AccountInfo |
  account.is_writable()
);

sol_assert!(check_signer, account: &AccountInfo |
  account.is_signer()
);

sol_assert!(check_key_match, account: &AccountInfo, target_key: &Pubkey |
  sol_assert_bytes_eq(account.key().as_ref(), target_key.as_ref(), 32)
);

sol_assert!(check_bytes_match, left: &[u8], right: &[u8], len: usize |
  sol_assert_bytes_eq(left, right, len)
);

sol_assert!(check_system_program, account: &AccountInfo |
  sol_assert_bytes_eq(account.key().as_ref(), SYSTEM_ID.as_ref(), 32)
);

sol_assert!(check_system_owner, account: &AccountInfo |
  account.is_owned_by(&SYSTEM_ID)
);

sol_assert!(check_self_owned, account: &AccountInfo |
  account.is_owned_by(&crate::ID)
);

sol_assert!(check_zero_data, account: &AccountInfo |
  account.data_len() == 0
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_eq() {
        assert!(sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 3], 3));
        assert!(sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 4], 2));
        assert!(!sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 4], 3));
        assert!(!sol_assert_bytes_eq(&[1, 2], &[1, 2, 3], 3));
    }

    #[test]
    fn test_check_bytes_match() {
        assert_eq!(
            check_bytes_match(&[7; 32], &[7; 32], 32, ProgramError::InvalidSeeds),
            Ok(())
        );
        assert_eq!(
            check_bytes_match(&[7; 32], &[8; 32], 32, ProgramError::InvalidSeeds),
            Err(ProgramError::InvalidSeeds)
        );
    }

    #[test]
    fn test_find_self_pda_is_canonical() {
        let seeds: [&[u8]; 2] = [b"record", &[0xac; 32]];
        let (pda, bump) = find_self_address(&seeds).unwrap();
        assert_eq!(find_self_pda(&seeds, &pda, ProgramError::InvalidSeeds), Ok(bump));
        assert_eq!(
            find_self_pda(&seeds, &[0xac; 32], ProgramError::InvalidSeeds),
            Err(ProgramError::InvalidSeeds)
        );

        let program_id = solana_pubkey::Pubkey::new_from_array(crate::ID);
        let bump_seed = [bump];
        let seeds_with_bump: [&[u8]; 3] = [seeds[0], seeds[1], &bump_seed];
        let expected = solana_pubkey::Pubkey::create_program_address(&seeds_with_bump, &program_id)
            .unwrap();
        assert_eq!(pda, expected.to_bytes());

        assert_eq!(check_canonical_bump(bump, bump, ProgramError::InvalidSeeds), Ok(()));
        assert_eq!(
            check_canonical_bump(bump.wrapping_sub(1), bump, ProgramError::InvalidSeeds),
            Err(ProgramError::InvalidSeeds)
        );
    }

    #[test]
    fn test_program_id() {
        assert_ne!(crate::ID, SYSTEM_ID);
    }
}
