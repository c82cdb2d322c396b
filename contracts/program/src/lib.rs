//! Keystone Program - Main Entry Point
//!
//! Hosts the multichain ECDSA validator and the session key manager for
//! smart accounts. Accounts bind an owner and a session root through this
//! program and ask it to validate their operations.

pub mod actions;
pub mod error;
pub mod instruction;
pub mod policies;
pub mod processor;

use pinocchio_pubkey::declare_id;

declare_id!("Keystone11111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint {
    use core::mem::MaybeUninit;
    use pinocchio::{
        account_info::AccountInfo,
        lazy_entrypoint::{InstructionContext, MaybeAccount},
        lazy_program_entrypoint,
        program_error::ProgramError,
        ProgramResult,
    };

    lazy_program_entrypoint!(process_instruction);

    fn process_instruction(mut ctx: InstructionContext) -> ProgramResult {
        // no instruction takes more than four accounts
        const MAX_ACCOUNTS: usize = 8;
        const AI: MaybeUninit<AccountInfo> = MaybeUninit::<AccountInfo>::uninit();
        let mut accounts_storage = [AI; MAX_ACCOUNTS];
        let mut accounts_len = 0;

        while let Ok(acc) = ctx.next_account() {
            if accounts_len >= MAX_ACCOUNTS {
                return Err(ProgramError::InvalidArgument);
            }
            match acc {
                MaybeAccount::Account(account) => {
                    accounts_storage[accounts_len].write(account);
                },
                MaybeAccount::Duplicated(idx) => {
                    let original =
                        unsafe { accounts_storage[idx as usize].assume_init_ref().clone() };
                    accounts_storage[accounts_len].write(original);
                },
            }
            accounts_len += 1;
        }

        let accounts = unsafe {
            core::slice::from_raw_parts(
                accounts_storage.as_ptr() as *const AccountInfo,
                accounts_len,
            )
        };

        let instruction_data = unsafe { ctx.instruction_data_unchecked() };

        crate::processor::process_instruction(&crate::ID, accounts, instruction_data)
    }
}
