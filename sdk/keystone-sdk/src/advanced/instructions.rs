use keystone_program::instruction::KeystoneInstruction;
use keystone_state::{Address, UserOperation};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::error::Result;
use crate::utils::{derive_owner_pda, derive_session_pda};

/// Bind `owner` to the smart account. The smart account must sign.
pub fn init_owner(
    program_id: &Pubkey,
    smart_account: &Pubkey,
    payer: &Pubkey,
    owner: Address,
) -> Result<Instruction> {
    let (owner_pda, bump) = derive_owner_pda(program_id, smart_account);

    let instruction = KeystoneInstruction::InitOwner { owner, bump };

    let accounts = vec![
        AccountMeta::new_readonly(*smart_account, true),
        AccountMeta::new(owner_pda, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: borsh::to_vec(&instruction)?,
    })
}

/// Replace the session root of the smart account. The smart account must sign.
pub fn set_session_root(
    program_id: &Pubkey,
    smart_account: &Pubkey,
    payer: &Pubkey,
    root: [u8; 32],
) -> Result<Instruction> {
    let (session_pda, bump) = derive_session_pda(program_id, smart_account);

    let instruction = KeystoneInstruction::SetSessionRoot { root, bump };

    let accounts = vec![
        AccountMeta::new_readonly(*smart_account, true),
        AccountMeta::new(session_pda, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: borsh::to_vec(&instruction)?,
    })
}

/// Ask the program to validate `operation` for its sender.
pub fn validate_operation(
    program_id: &Pubkey,
    operation: UserOperation,
    operation_hash: [u8; 32],
) -> Result<Instruction> {
    let smart_account = Pubkey::new_from_array(operation.sender);
    let (owner_pda, _) = derive_owner_pda(program_id, &smart_account);
    let (session_pda, _) = derive_session_pda(program_id, &smart_account);

    let instruction = KeystoneInstruction::ValidateOperation {
        operation,
        operation_hash,
    };

    let accounts = vec![
        AccountMeta::new_readonly(smart_account, false),
        AccountMeta::new_readonly(owner_pda, false),
        AccountMeta::new_readonly(session_pda, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: borsh::to_vec(&instruction)?,
    })
}
