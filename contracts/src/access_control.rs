//! Timelocked address rotation.
//!
//! A rotatable address (trade gateway, authorized trader) changes in two
//! phases: a request records the candidate and the request time, and a
//! commit after the cooldown makes it current.
//!
//! States: `Idle -> Requested -> Committed -> Requested -> ...`

use odra::prelude::*;
use crate::errors::VaultError;
use crate::types::is_zero_address;

/// Rotation phase
#[odra::odra_type]
#[derive(Copy)]
pub enum RotationStatus {
    /// No change requested yet
    Idle,
    /// Candidate recorded, waiting for cooldown
    Requested,
    /// Last request committed
    Committed,
}

/// Two-phase rotation of a single address
#[odra::odra_type]
pub struct AddressRotation {
    /// Address in effect
    pub current: Option<Address>,
    /// Candidate of the open request
    pub pending: Option<Address>,
    /// Block time of the open request (ms)
    pub requested_at: u64,
    pub status: RotationStatus,
}

impl Default for AddressRotation {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AddressRotation {
    pub fn new(current: Option<Address>) -> Self {
        Self {
            current,
            pending: None,
            requested_at: 0,
            status: RotationStatus::Idle,
        }
    }

    /// Records `candidate`, replacing any open request.
    pub fn request(&mut self, candidate: Address, now: u64) -> Result<(), VaultError> {
        if is_zero_address(&candidate) {
            return Err(VaultError::InvalidAddress);
        }
        self.pending = Some(candidate);
        self.requested_at = now;
        self.status = RotationStatus::Requested;
        Ok(())
    }

    /// Makes the pending candidate current once `cooldown` has passed.
    pub fn commit(&mut self, now: u64, cooldown: u64) -> Result<Address, VaultError> {
        let candidate = match (self.status, self.pending) {
            (RotationStatus::Requested, Some(candidate)) => candidate,
            _ => return Err(VaultError::NoPendingChange),
        };
        if now.saturating_sub(self.requested_at) < cooldown {
            return Err(VaultError::CooldownNotElapsed);
        }

        self.current = Some(candidate);
        self.pending = None;
        self.status = RotationStatus::Committed;
        Ok(candidate)
    }

    pub fn is(&self, address: &Address) -> bool {
        self.current.as_ref() == Some(address)
    }
}
