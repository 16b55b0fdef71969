use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub const SEED_SIZE: usize = 32;
/// Encoded private keys carry the seed followed by the public key.
pub const PRIVATE_KEY_SIZE: usize = 64;
pub const PUBLIC_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 64;
pub const ADDRESS_SIZE: usize = 20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyError {
    #[error("invalid key length {0}")]
    InvalidLength(usize),

    #[error(transparent)]
    InvalidHex(#[from] hex::FromHexError),
}

/// An Ed25519 signing key. Lives only in memory; the daemon generates a fresh
/// one per mining node and the genesis key is derived from a well-known seed.
#[derive(Clone, PartialEq)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    pub fn from_seed(seed: [u8; SEED_SIZE]) -> Self {
        Self(SigningKey::from_bytes(&seed))
    }

    /// Accepts the hex of either the 32-byte seed or the 64-byte seed‖public
    /// encoding.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str)?;
        match bytes.len() {
            SEED_SIZE | PRIVATE_KEY_SIZE => Ok(Self::from_seed(bytes[..SEED_SIZE].try_into().unwrap())),
            invalid => Err(KeyError::InvalidLength(invalid)),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key().to_bytes())
    }

    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature(self.0.sign(msg).to_bytes())
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0.to_keypair_bytes()
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.write_str("PrivateKey(..)")
    }
}

macro_rules! fixed_bytes_newtype {
    ($name:ident, $size:expr) => {
        impl $name {
            pub const fn from_bytes(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = KeyError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Ok(Self(bytes.try_into().map_err(|_| KeyError::InvalidLength(bytes.len()))?))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = KeyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; $size];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_str(&s).map_err(de::Error::custom)
            }
        }
    };
}

/// Raw 32-byte Ed25519 public key. Kept as plain bytes since keys arrive off
/// the wire; point validity is checked at verification time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        key.verify(msg, &ed25519_dalek::Signature::from_bytes(&signature.0)).is_ok()
    }

    /// The address owning this key: the last 20 bytes of the public key.
    pub fn address(&self) -> Address {
        Address(self.0[PUBLIC_KEY_SIZE - ADDRESS_SIZE..].try_into().unwrap())
    }
}

fixed_bytes_newtype!(PublicKey, PUBLIC_KEY_SIZE);

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_SIZE]);

fixed_bytes_newtype!(Signature, SIGNATURE_SIZE);

/// Destination of a transaction output. Outputs are locked by address
/// equality only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_SIZE]);

fixed_bytes_newtype!(Address, ADDRESS_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let key = PrivateKey::from_seed([7u8; SEED_SIZE]);
        let msg = b"message";
        let sig = key.sign(msg);
        assert!(key.public_key().verify(msg, &sig));
        assert!(!key.public_key().verify(b"other message", &sig));

        let other = PrivateKey::from_seed([8u8; SEED_SIZE]);
        assert!(!other.public_key().verify(msg, &sig));
    }

    #[test]
    fn test_address_is_public_key_tail() {
        let key = PrivateKey::from_seed([9u8; SEED_SIZE]);
        let public_key = key.public_key();
        let address = public_key.address();
        assert_eq!(address.as_bytes()[..], public_key.as_bytes()[PUBLIC_KEY_SIZE - ADDRESS_SIZE..]);
    }

    #[test]
    fn test_private_key_from_hex() {
        let key = PrivateKey::from_seed([1u8; SEED_SIZE]);
        let full = hex::encode(key.to_bytes());
        let seed_only = &full[..SEED_SIZE * 2];

        assert_eq!(PrivateKey::from_hex(&full).unwrap().public_key(), key.public_key());
        assert_eq!(PrivateKey::from_hex(seed_only).unwrap().public_key(), key.public_key());
        assert_eq!(PrivateKey::from_hex("aabb"), Err(KeyError::InvalidLength(2)));
    }

    #[test]
    fn test_hex_roundtrip() {
        let key = PrivateKey::from_seed([3u8; SEED_SIZE]);
        let public_key = key.public_key();
        assert_eq!(PublicKey::from_str(&public_key.to_string()).unwrap(), public_key);

        let address = public_key.address();
        assert_eq!(Address::from_str(&address.to_string()).unwrap(), address);
    }
}
