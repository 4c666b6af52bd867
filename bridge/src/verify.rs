//! Signature recovery and the threshold power policy.
//!
//! Recovery is deliberately total: malformed signature parts never abort a
//! submission, they count as abstentions. The bridge compares each recovered
//! identity against the validator at the same position in the parallel
//! arrays, so relayers can submit `None` for non-participating validators
//! while preserving positional alignment with the authoritative set.

use cosmwasm_std::Api;

use common::Signature;

use crate::error::ContractError;
use crate::hash::{eth_signed_message_hash, keccak256, EthAddress};
use crate::state::THRESHOLD_DENOMINATOR;

/// Recover the 20-byte signer identity from a digest and signature parts.
///
/// Returns `None` for any malformed input (wrong component length, invalid
/// recovery id, unrecoverable point) so the caller can treat the slot as an
/// abstention rather than aborting the whole batch.
pub fn recover_signer(api: &dyn Api, digest: &[u8; 32], sig: &Signature) -> Option<EthAddress> {
    if sig.r.len() != 32 || sig.s.len() != 32 {
        return None;
    }

    // Accept both raw (0/1) and Ethereum-style (27/28) recovery ids.
    let recovery_param = match sig.v {
        0 | 1 => sig.v,
        27 | 28 => sig.v - 27,
        _ => return None,
    };

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(sig.r.as_slice());
    compact[32..].copy_from_slice(sig.s.as_slice());

    let message_hash = eth_signed_message_hash(digest);
    let pubkey = api
        .secp256k1_recover_pubkey(&message_hash, &compact, recovery_param)
        .ok()?;
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }

    // Identity is the last 20 bytes of the keccak256 of the raw public key.
    let hash = keccak256(&pubkey[1..]);
    let mut identity = [0u8; 20];
    identity.copy_from_slice(&hash[12..]);
    Some(identity)
}

/// Sum the powers of every validator set as u128 (no overflow for any
/// realistic set: u64 powers, bounded set size).
pub fn total_power(powers: &[u64]) -> u128 {
    powers.iter().map(|p| *p as u128).sum()
}

/// Check that the signatures over `digest` accumulate enough validator power.
///
/// `identities`, `powers` and `signatures` are parallel arrays; the caller
/// has already verified both the alignment and that the set hashes to the
/// stored checkpoint. A `None` slot or a recovered identity that does not
/// match its position counts zero power. Passes iff
/// `cumulative * 10000 >= total * threshold_bps` (fixed-point basis points,
/// no floating point), returning as soon as the bar is cleared.
pub fn check_validator_power(
    api: &dyn Api,
    digest: &[u8; 32],
    identities: &[EthAddress],
    powers: &[u64],
    signatures: &[Option<Signature>],
    threshold_bps: u64,
) -> Result<(), ContractError> {
    debug_assert_eq!(identities.len(), powers.len());
    debug_assert_eq!(identities.len(), signatures.len());

    let total = total_power(powers);
    let required_scaled = total * threshold_bps as u128;

    let mut cumulative: u128 = 0;
    for ((identity, power), slot) in identities.iter().zip(powers).zip(signatures) {
        let Some(sig) = slot else {
            continue;
        };
        match recover_signer(api, digest, sig) {
            Some(recovered) if recovered == *identity => {
                cumulative += *power as u128;
                if cumulative * THRESHOLD_DENOMINATOR as u128 >= required_scaled {
                    return Ok(());
                }
            }
            // Mismatch or unrecoverable: abstention, not a hard error.
            _ => continue,
        }
    }

    // Zero total power only occurs for an empty set, rejected upstream.
    let denominator = THRESHOLD_DENOMINATOR as u128;
    Err(ContractError::InsufficientPower {
        cumulative_power: cumulative,
        required_power: (required_scaled + denominator - 1) / denominator,
    })
}
