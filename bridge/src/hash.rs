//! Digest computation for checkpoint and logic-call authorization.
//!
//! Every privileged call is authorized by validator signatures over a
//! keccak256 digest of an ABI-style encoding. The field order below is part
//! of the wire contract shared with off-chain signers: any reordering or
//! omission changes the digest and invalidates all collected signatures.
//!
//! # Checkpoint digest (validator set commitment)
//! `keccak256(abi.encode(bridge_id, b32"checkpoint", valset_nonce,
//! validator_identities[], powers[]))`
//!
//! # Logic-call digest
//! `keccak256(abi.encode(bridge_id, b32"logicCall", transfer_amounts[],
//! transfer_tokens[], fee_amounts[], fee_tokens[], logic_contract, payload,
//! time_out, invalidation_id, invalidation_nonce))`
//!
//! The two method discriminators guarantee the digests can never collide
//! even for identical field bytes.
//!
//! # ABI layout
//! Standard head/tail encoding: one 32-byte head slot per field; static
//! fields hold their value, dynamic fields (arrays, bytes) hold the byte
//! offset of their tail. Array tails are a length word followed by one word
//! per element; bytes tails are a length word followed by the data padded to
//! a 32-byte boundary. Integers are big-endian, left-padded; 20-byte
//! identities are left-padded into a word.

use cosmwasm_std::{Addr, Deps, StdError, StdResult};
use tiny_keccak::{Hasher, Keccak};

/// A 20-byte secp256k1-derived validator identity.
pub type EthAddress = [u8; 20];

/// Method discriminator for validator-set updates.
pub const METHOD_CHECKPOINT: &str = "checkpoint";

/// Method discriminator for logic calls.
pub const METHOD_LOGIC_CALL: &str = "logicCall";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Wrap a digest the way Ethereum-compatible signers do before signing.
///
/// Relayer tooling collects signatures via standard wallet signing, which
/// prefixes the 32-byte digest with `"\x19Ethereum Signed Message:\n32"`.
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 28 + 32];
    data[0..28].copy_from_slice(b"\x19Ethereum Signed Message:\n32");
    data[28..].copy_from_slice(digest);
    keccak256(&data)
}

/// Encode an ASCII method name as a left-aligned, zero-padded 32-byte word.
pub fn method_word(name: &str) -> [u8; 32] {
    let bytes = name.as_bytes();
    debug_assert!(bytes.len() <= 32);
    let mut word = [0u8; 32];
    word[..bytes.len()].copy_from_slice(bytes);
    word
}

/// Left-pad a u128 into a 32-byte big-endian word.
pub fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Left-pad a 20-byte identity into a 32-byte word.
pub fn identity_word(identity: &EthAddress) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(identity);
    word
}

/// Encode a local contract address as a 32-byte word (left-padded canonical
/// form). Canonical Cosmos addresses are at most 32 bytes.
pub fn contract_word(deps: Deps, addr: &Addr) -> StdResult<[u8; 32]> {
    let canonical = deps.api.addr_canonicalize(addr.as_str())?;
    let bytes = canonical.as_slice();
    if bytes.len() > 32 {
        return Err(StdError::generic_err(format!(
            "canonical address exceeds 32 bytes: {}",
            bytes.len()
        )));
    }

    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// One field of an ABI-style encoding.
enum AbiToken<'a> {
    /// A static 32-byte word
    Word([u8; 32]),
    /// A dynamic array of 32-byte words
    Words(&'a [[u8; 32]]),
    /// Dynamic opaque bytes
    Bytes(&'a [u8]),
}

/// Head/tail encode a field sequence.
fn abi_encode(tokens: &[AbiToken]) -> Vec<u8> {
    let head_size = 32 * tokens.len();

    let mut head = Vec::with_capacity(head_size);
    let mut tail: Vec<u8> = Vec::new();

    for token in tokens {
        match token {
            AbiToken::Word(word) => head.extend_from_slice(word),
            AbiToken::Words(words) => {
                head.extend_from_slice(&uint_word((head_size + tail.len()) as u128));
                tail.extend_from_slice(&uint_word(words.len() as u128));
                for word in *words {
                    tail.extend_from_slice(word);
                }
            }
            AbiToken::Bytes(data) => {
                head.extend_from_slice(&uint_word((head_size + tail.len()) as u128));
                tail.extend_from_slice(&uint_word(data.len() as u128));
                tail.extend_from_slice(data);
                let pad = (32 - data.len() % 32) % 32;
                tail.extend_from_slice(&[0u8; 32][..pad]);
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Compute the checkpoint digest committing to a validator set.
///
/// `identities` and `powers` must be parallel; the caller validates that.
/// The contract persists only this hash, never the set itself, so the digest
/// must be reproducible from the canonical submission order.
pub fn checkpoint_digest(
    bridge_id: &[u8; 32],
    valset_nonce: u64,
    identities: &[EthAddress],
    powers: &[u64],
) -> [u8; 32] {
    let identity_words: Vec<[u8; 32]> = identities.iter().map(identity_word).collect();
    let power_words: Vec<[u8; 32]> = powers.iter().map(|p| uint_word(*p as u128)).collect();

    let encoded = abi_encode(&[
        AbiToken::Word(*bridge_id),
        AbiToken::Word(method_word(METHOD_CHECKPOINT)),
        AbiToken::Word(uint_word(valset_nonce as u128)),
        AbiToken::Words(&identity_words),
        AbiToken::Words(&power_words),
    ]);

    keccak256(&encoded)
}

/// Pre-encoded fields of a logic call, ready for digest computation.
///
/// Token contracts and the logic contract are already encoded as 32-byte
/// words (see [`contract_word`]); the execute layer does that once after
/// address validation.
pub struct LogicCallDigestInput<'a> {
    pub transfer_amounts: &'a [u128],
    pub transfer_tokens: &'a [[u8; 32]],
    pub fee_amounts: &'a [u128],
    pub fee_tokens: &'a [[u8; 32]],
    pub logic_contract: [u8; 32],
    pub payload: &'a [u8],
    pub time_out: u64,
    pub invalidation_id: [u8; 32],
    pub invalidation_nonce: u64,
}

/// Compute the digest authorizing one logic call.
pub fn logic_call_digest(bridge_id: &[u8; 32], input: &LogicCallDigestInput) -> [u8; 32] {
    let transfer_amount_words: Vec<[u8; 32]> =
        input.transfer_amounts.iter().map(|a| uint_word(*a)).collect();
    let fee_amount_words: Vec<[u8; 32]> =
        input.fee_amounts.iter().map(|a| uint_word(*a)).collect();

    let encoded = abi_encode(&[
        AbiToken::Word(*bridge_id),
        AbiToken::Word(method_word(METHOD_LOGIC_CALL)),
        AbiToken::Words(&transfer_amount_words),
        AbiToken::Words(input.transfer_tokens),
        AbiToken::Words(&fee_amount_words),
        AbiToken::Words(input.fee_tokens),
        AbiToken::Word(input.logic_contract),
        AbiToken::Bytes(input.payload),
        AbiToken::Word(uint_word(input.time_out as u128)),
        AbiToken::Word(input.invalidation_id),
        AbiToken::Word(uint_word(input.invalidation_nonce as u128)),
    ]);

    keccak256(&encoded)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
