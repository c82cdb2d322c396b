//! Keystone Instruction Definitions

use borsh::{BorshDeserialize, BorshSerialize};
use keystone_state::{Address, UserOperation};
use pinocchio::program_error::ProgramError;

/// Instruction discriminators, the leading byte of every instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstructionDiscriminator {
    InitOwner = 0,
    SetSessionRoot = 1,
    ValidateOperation = 2,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum KeystoneInstruction {
    /// Bind the owner of a smart account for the multichain validator
    ///
    /// Accounts:
    /// 0. `[signer]` Smart account
    /// 1. `[writable]` Owner record (PDA: ["keystone-owner", smart_account])
    /// 2. `[writable, signer]` Payer
    /// 3. `[]` System program
    InitOwner {
        /// Owner address
        owner: Address,
        /// PDA bump seed for the owner record
        bump: u8,
    },

    /// Replace the session root of a smart account
    ///
    /// Accounts:
    /// 0. `[signer]` Smart account
    /// 1. `[writable]` Session record (PDA: ["keystone-session", smart_account])
    /// 2. `[writable, signer]` Payer
    /// 3. `[]` System program
    SetSessionRoot {
        /// Root of the tree of enabled session leaves
        root: [u8; 32],
        /// PDA bump seed for the session record
        bump: u8,
    },

    /// Validate an operation on behalf of a smart account
    ///
    /// Accounts:
    /// 0. `[]` Smart account
    /// 1. `[]` Owner record
    /// 2. `[]` Session record
    ValidateOperation {
        operation: UserOperation,
        /// Hash computed by the entry point
        operation_hash: [u8; 32],
    },
}

impl KeystoneInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }

    pub fn discriminator(&self) -> InstructionDiscriminator {
        match self {
            KeystoneInstruction::InitOwner { .. } => InstructionDiscriminator::InitOwner,
            KeystoneInstruction::SetSessionRoot { .. } => InstructionDiscriminator::SetSessionRoot,
            KeystoneInstruction::ValidateOperation { .. } => {
                InstructionDiscriminator::ValidateOperation
            },
        }
    }
}
