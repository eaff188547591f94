//! Deployment accounts: private key handling, address derivation and signing.

use std::fmt;

use alloy_consensus::{SignableTransaction, TxEnvelope};
use alloy_core::primitives::{Address, B256, Bytes};
use alloy_eips::eip2718::Encodable2718;
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use anyhow::Context;
use k256::ecdsa::SigningKey;
use rand::Rng;

use crate::rollup_creator::PreparedTransaction;

/// Parse a private key given as hex, with or without the `0x` prefix.
pub fn sanitize_private_key(key: &str) -> anyhow::Result<B256> {
    let key = key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);

    let private_key_bytes: [u8; 32] = hex::decode(key)
        .context("Private key is not valid hex")?
        .try_into()
        .map_err(|_| anyhow::anyhow!("Private key must be exactly 32 bytes"))?;

    Ok(B256::from(private_key_bytes))
}

/// Draw random bytes until they form a valid secp256k1 scalar.
fn random_signing_key() -> SigningKey {
    let mut rng = rand::rng();
    loop {
        let private_key_bytes: [u8; 32] = rng.random();
        if let Ok(signing_key) = SigningKey::from_bytes(&private_key_bytes.into()) {
            return signing_key;
        }
    }
}

/// Generate a fresh random private key.
pub fn generate_private_key() -> B256 {
    B256::from_slice(&random_signing_key().to_bytes())
}

/// Use the supplied key, or generate a fresh one when none was configured.
pub fn resolve_private_key(key: Option<B256>) -> B256 {
    match key {
        Some(key) => key,
        None => generate_private_key(),
    }
}

/// A private key together with its derived address.
#[derive(Clone)]
pub struct Account {
    signer: PrivateKeySigner,
}

impl Account {
    /// Load an account from a raw private key.
    pub fn from_private_key(private_key: B256) -> anyhow::Result<Self> {
        let signing_key = SigningKey::from_bytes(&private_key.0.into())
            .map_err(|e| anyhow::anyhow!("Invalid secp256k1 private key: {}", e))?;

        Ok(Self {
            signer: PrivateKeySigner::from_signing_key(signing_key),
        })
    }

    /// The account address derived from the public key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn private_key(&self) -> B256 {
        self.signer.to_bytes()
    }

    /// The private key as a `0x`-prefixed hex string.
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.private_key()))
    }

    /// Sign a prepared transaction and return its EIP-2718 encoding, ready for
    /// `eth_sendRawTransaction`.
    pub fn sign_transaction(&self, transaction: &PreparedTransaction) -> anyhow::Result<Bytes> {
        let tx = transaction.to_eip1559();

        let signature = self
            .signer
            .sign_hash_sync(&tx.signature_hash())
            .context("Failed to sign transaction")?;

        let envelope = TxEnvelope::from(tx.into_signed(signature));
        Ok(Bytes::from(envelope.encoded_2718()))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
