//! Conversions between the protobuf wire records and the consensus domain
//! model. Inbound conversions are fallible: every byte field carries an
//! exact expected length.

use crate::error::ConversionError;
use crate::pb;
use crate::peer::Version;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::header::Header;
use blocknet_consensus_core::keys::{PublicKey, Signature};
use blocknet_consensus_core::tx::{Transaction, TransactionInput, TransactionOutpoint, TransactionOutput};
use blocknet_hashes::Hash;
use itertools::Itertools;

impl From<Version> for pb::VersionMessage {
    fn from(version: Version) -> Self {
        Self { version: version.version, listen_address: version.listen_address, peers: version.peers }
    }
}

impl From<pb::VersionMessage> for Version {
    fn from(msg: pb::VersionMessage) -> Self {
        Self { version: msg.version, listen_address: msg.listen_address, peers: msg.peers }
    }
}

fn hash_from_bytes(bytes: &[u8], field: &'static str) -> Result<Hash, ConversionError> {
    Hash::try_from(bytes).map_err(|_| ConversionError::InvalidLength(field))
}

fn signature_from_bytes(bytes: &[u8], field: &'static str) -> Result<Option<Signature>, ConversionError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(Signature::try_from(bytes).map_err(|_| ConversionError::InvalidLength(field))?))
}

impl From<&TransactionInput> for pb::TransactionInputMessage {
    fn from(input: &TransactionInput) -> Self {
        Self {
            prev_tx_hash: input.previous_outpoint.transaction_id.as_ref().to_vec(),
            out_index: input.previous_outpoint.index,
            public_key: input.public_key.as_ref().to_vec(),
            signature: input.signature.map(|sig| sig.as_ref().to_vec()).unwrap_or_default(),
        }
    }
}

impl TryFrom<pb::TransactionInputMessage> for TransactionInput {
    type Error = ConversionError;

    fn try_from(msg: pb::TransactionInputMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            previous_outpoint: TransactionOutpoint::new(hash_from_bytes(&msg.prev_tx_hash, "prev_tx_hash")?, msg.out_index),
            public_key: PublicKey::try_from(msg.public_key.as_slice()).map_err(|_| ConversionError::InvalidLength("public_key"))?,
            signature: signature_from_bytes(&msg.signature, "signature")?,
        })
    }
}

impl From<&TransactionOutput> for pb::TransactionOutputMessage {
    fn from(output: &TransactionOutput) -> Self {
        Self { value: output.value, address: output.address.as_ref().to_vec() }
    }
}

impl TryFrom<pb::TransactionOutputMessage> for TransactionOutput {
    type Error = ConversionError;

    fn try_from(msg: pb::TransactionOutputMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            value: msg.value,
            address: msg.address.as_slice().try_into().map_err(|_| ConversionError::InvalidLength("address"))?,
        })
    }
}

impl From<&Transaction> for pb::TransactionMessage {
    fn from(tx: &Transaction) -> Self {
        Self { inputs: tx.inputs.iter().map_into().collect(), outputs: tx.outputs.iter().map_into().collect() }
    }
}

impl TryFrom<pb::TransactionMessage> for Transaction {
    type Error = ConversionError;

    fn try_from(msg: pb::TransactionMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            inputs: msg.inputs.into_iter().map(TryInto::try_into).try_collect()?,
            outputs: msg.outputs.into_iter().map(TryInto::try_into).try_collect()?,
        })
    }
}

impl From<&Header> for pb::HeaderMessage {
    fn from(header: &Header) -> Self {
        Self {
            height: header.height,
            prev_block_hash: header.prev_block_hash.as_ref().to_vec(),
            merkle_root: header.merkle_root.as_ref().to_vec(),
            timestamp: header.timestamp,
            nonce: header.nonce,
        }
    }
}

impl TryFrom<pb::HeaderMessage> for Header {
    type Error = ConversionError;

    fn try_from(msg: pb::HeaderMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            height: msg.height,
            prev_block_hash: hash_from_bytes(&msg.prev_block_hash, "prev_block_hash")?,
            merkle_root: hash_from_bytes(&msg.merkle_root, "merkle_root")?,
            timestamp: msg.timestamp,
            nonce: msg.nonce,
        })
    }
}

impl From<&Block> for pb::BlockMessage {
    fn from(block: &Block) -> Self {
        Self {
            header: Some((&block.header).into()),
            transactions: block.transactions.iter().map_into().collect(),
            public_key: block.public_key.map(|key| key.as_ref().to_vec()).unwrap_or_default(),
            signature: block.signature.map(|sig| sig.as_ref().to_vec()).unwrap_or_default(),
        }
    }
}

impl TryFrom<pb::BlockMessage> for Block {
    type Error = ConversionError;

    fn try_from(msg: pb::BlockMessage) -> Result<Self, Self::Error> {
        let public_key = if msg.public_key.is_empty() {
            None
        } else {
            Some(PublicKey::try_from(msg.public_key.as_slice()).map_err(|_| ConversionError::InvalidLength("public_key"))?)
        };
        Ok(Self {
            header: msg.header.ok_or(ConversionError::MissingField("header"))?.try_into()?,
            transactions: msg.transactions.into_iter().map(TryInto::try_into).try_collect()?,
            public_key,
            signature: signature_from_bytes(&msg.signature, "signature")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknet_consensus_core::config::Params;
    use blocknet_consensus_core::config::genesis::genesis_block;
    use blocknet_consensus_core::sign::sign_transaction;
    use blocknet_consensus_core::testutils::test_key;
    use blocknet_hashes::ZERO_HASH;

    #[test]
    fn test_version_roundtrip() {
        let version =
            Version { version: "0.0.1".into(), listen_address: ":4000".into(), peers: vec![":4001".into(), ":4002".into()] };
        let back: Version = pb::VersionMessage::from(version.clone()).into();
        assert_eq!(back.version, version.version);
        assert_eq!(back.listen_address, version.listen_address);
        assert_eq!(back.peers, version.peers);
    }

    #[test]
    fn test_transaction_roundtrip() {
        let key = test_key(21);
        let mut tx = Transaction::new(
            vec![TransactionInput::new(TransactionOutpoint::new(ZERO_HASH, 7), key.public_key())],
            vec![TransactionOutput::new(55, key.public_key().address())],
        );
        tx.inputs[0].signature = Some(sign_transaction(&tx, &key));

        let back = Transaction::try_from(pb::TransactionMessage::from(&tx)).unwrap();
        assert_eq!(back, tx);
        assert_eq!(back.id(), tx.id());
    }

    #[test]
    fn test_block_roundtrip() {
        let block = genesis_block(&Params::default());
        let back = Block::try_from(pb::BlockMessage::from(&block)).unwrap();
        assert_eq!(back, block);
        assert_eq!(back.hash(), block.hash());
    }

    #[test]
    fn test_rejects_malformed_fields() {
        let block = genesis_block(&Params::default());
        let mut msg = pb::BlockMessage::from(&block);
        msg.header = None;
        assert_eq!(Block::try_from(msg), Err(ConversionError::MissingField("header")));

        let mut msg = pb::BlockMessage::from(&block);
        msg.signature = vec![1, 2, 3];
        assert_eq!(Block::try_from(msg), Err(ConversionError::InvalidLength("signature")));

        let tx = &block.transactions[0];
        let mut msg = pb::TransactionMessage::from(tx);
        msg.outputs[0].address = vec![0; 19];
        assert_eq!(Transaction::try_from(msg), Err(ConversionError::InvalidLength("address")));
    }
}
