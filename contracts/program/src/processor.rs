//! Instruction Processor
//!
//! Thin dispatcher that routes instructions to individual handlers.

use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

use crate::actions;
use crate::instruction::KeystoneInstruction;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = KeystoneInstruction::unpack(instruction_data).map_err(|e| {
        msg!("Failed to unpack instruction: {:?}", e);
        e
    })?;
    msg!("Instruction: {:?}", instruction.discriminator());

    match instruction {
        KeystoneInstruction::InitOwner { owner, bump } => {
            actions::process_init_owner(program_id, accounts, owner, bump)
        },

        KeystoneInstruction::SetSessionRoot { root, bump } => {
            actions::process_set_session_root(program_id, accounts, root, bump)
        },

        KeystoneInstruction::ValidateOperation {
            operation,
            operation_hash,
        } => actions::process_validate_operation(program_id, accounts, &operation, &operation_hash),
    }
}
