use blocknet_consensus::Chain;
use blocknet_consensus::model::stores::factory::MemoryStoreFactory;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::config::Params;
use blocknet_consensus_core::config::genesis::{genesis_address, genesis_key};
use blocknet_consensus_core::errors::block::RuleError;
use blocknet_consensus_core::errors::tx::TxRuleError;
use blocknet_consensus_core::header::Header;
use blocknet_consensus_core::sign::{sign_block, verify_block};
use blocknet_consensus_core::testutils::{create_transaction, test_key};
use blocknet_consensus_core::tx::{Transaction, TransactionOutpoint, TransactionOutput};
use std::sync::Arc;

const TEST_TIMESTAMP: u64 = 1_700_000_000_000;

fn test_chain() -> Chain {
    Chain::new(Arc::new(Params::default()), &MemoryStoreFactory::new())
}

/// A signed block extending the current tip with the given transactions.
fn build_child_block(chain: &Chain, transactions: Vec<Transaction>) -> Block {
    let tip = chain.block_by_height(chain.height()).unwrap();
    let header = Header::new(tip.header.height + 1, tip.hash(), TEST_TIMESTAMP);
    let mut block = Block::new(header, transactions);
    sign_block(&mut block, &test_key(99));
    block
}

/// Spends the genesis coinbase, paying `value` to `recipient_seed`'s address
/// and the change back to the genesis address.
fn spend_genesis(chain: &Chain, value: u64, recipient_seed: u8) -> Transaction {
    let genesis = chain.block_by_height(0).unwrap();
    let reward = genesis.transactions[0].outputs[0].value;
    create_transaction(
        &genesis.transactions[0],
        0,
        &genesis_key(),
        vec![
            TransactionOutput::new(value, test_key(recipient_seed).public_key().address()),
            TransactionOutput::new(reward - value, genesis_address()),
        ],
    )
}

#[test]
fn test_genesis_determinism() {
    let one = test_chain();
    let two = test_chain();

    assert_eq!(one.height(), 0);
    assert_eq!(one.block_by_height(0).unwrap().hash(), two.block_by_height(0).unwrap().hash());

    // Identical initial UTXO sets: the single genesis coinbase output, unspent
    let mine = one.utxos_by_address(genesis_address());
    let theirs = two.utxos_by_address(genesis_address());
    assert_eq!(mine, theirs);
    assert_eq!(mine.len(), 1);
    assert!(!mine[0].is_spent);
    assert_eq!(mine[0].output.value, one.params().genesis_reward);
}

#[test]
fn test_lookup_bounds() {
    let chain = test_chain();
    let genesis = chain.block_by_height(0).unwrap();
    assert_eq!(chain.block_by_hash(genesis.hash()).unwrap(), genesis);
    assert!(chain.block_by_height(1).is_err());
}

#[test]
fn test_add_block_extends_chain() {
    let chain = test_chain();
    let tx = spend_genesis(&chain, 1_000, 1);
    let block = build_child_block(&chain, vec![tx.clone()]);

    chain.add_block(block.clone()).unwrap();

    assert_eq!(chain.height(), 1);
    let stored = chain.block_by_height(1).unwrap();
    assert!(verify_block(&stored));
    assert_eq!(stored.header.prev_block_hash, chain.block_by_height(0).unwrap().hash());

    // Every transaction of the stored block is in the transaction store,
    // and the spent genesis coinbase is flipped while the new outputs are live
    let genesis_coinbase = chain.block_by_height(0).unwrap().transactions[0].clone();
    assert!(chain.utxo_by_outpoint(&TransactionOutpoint::new(genesis_coinbase.id(), 0)).unwrap().is_spent);
    assert!(!chain.utxo_by_outpoint(&TransactionOutpoint::new(tx.id(), 0)).unwrap().is_spent);
    assert!(!chain.utxo_by_outpoint(&TransactionOutpoint::new(tx.id(), 1)).unwrap().is_spent);
    assert_eq!(chain.transaction_count(), 2);
}

#[test]
fn test_rejects_wrong_height_and_parent() {
    let chain = test_chain();

    let mut wrong_height = build_child_block(&chain, Vec::new());
    wrong_height.header.height = 5;
    sign_block(&mut wrong_height, &test_key(99));
    assert!(matches!(chain.add_block(wrong_height), Err(RuleError::WrongBlockHeight(5, 0))));

    let mut wrong_parent = build_child_block(&chain, Vec::new());
    wrong_parent.header.prev_block_hash = Default::default();
    sign_block(&mut wrong_parent, &test_key(99));
    assert!(matches!(chain.add_block(wrong_parent), Err(RuleError::WrongParentHash(..))));
}

#[test]
fn test_rejects_replayed_block() {
    let chain = test_chain();
    let block = build_child_block(&chain, vec![spend_genesis(&chain, 500, 2)]);
    chain.add_block(block.clone()).unwrap();

    // The same block no longer links: its height equals the current height
    assert!(matches!(chain.add_block(block), Err(RuleError::WrongBlockHeight(1, 1))));
}

#[test]
fn test_rejects_unsigned_and_tampered_blocks() {
    let chain = test_chain();

    let tip = chain.block_by_height(0).unwrap();
    let unsigned = Block::new(Header::new(1, tip.hash(), TEST_TIMESTAMP), Vec::new());
    assert!(matches!(chain.add_block(unsigned), Err(RuleError::MissingBlockSignature(_))));

    let mut tampered = build_child_block(&chain, vec![spend_genesis(&chain, 500, 2)]);
    tampered.transactions[0].outputs[0].value -= 1;
    assert!(matches!(chain.add_block(tampered), Err(RuleError::BadMerkleRoot(..))));
}

#[test]
fn test_rejects_overspending_transaction() {
    let chain = test_chain();
    let genesis = chain.block_by_height(0).unwrap();
    let reward = genesis.transactions[0].outputs[0].value;

    let overspend = create_transaction(
        &genesis.transactions[0],
        0,
        &genesis_key(),
        vec![TransactionOutput::new(reward + 1, test_key(3).public_key().address())],
    );
    assert_eq!(chain.validate_transaction(&overspend), Err(TxRuleError::SpendTooHigh(reward + 1, reward)));

    let block = build_child_block(&chain, vec![overspend]);
    assert!(matches!(chain.add_block(block), Err(RuleError::TxInContextFailed(_, TxRuleError::SpendTooHigh(..)))));
}

#[test]
fn test_rejects_double_spend_across_blocks() {
    let chain = test_chain();
    let first = spend_genesis(&chain, 500, 2);
    chain.add_block(build_child_block(&chain, vec![first])).unwrap();

    let second = spend_genesis(&chain, 600, 3);
    assert!(matches!(chain.validate_transaction(&second), Err(TxRuleError::UtxoAlreadySpent(_))));
}

#[test]
fn test_rejects_unknown_outpoint() {
    let chain = test_chain();
    let phantom = Transaction::new(Vec::new(), vec![TransactionOutput::new(1, test_key(4).public_key().address())]);
    let spend = create_transaction(&phantom, 0, &test_key(4), vec![TransactionOutput::new(1, genesis_address())]);
    assert!(matches!(chain.validate_transaction(&spend), Err(TxRuleError::MissingUtxoEntry(_))));
}

#[test]
fn test_rejects_bad_input_signature() {
    let chain = test_chain();
    let mut tx = spend_genesis(&chain, 500, 2);
    // Re-sign with a key that does not match the declared public key
    let forged = blocknet_consensus_core::sign::sign_transaction(&tx, &test_key(5));
    tx.inputs[0].signature = Some(forged);
    assert_eq!(chain.validate_transaction(&tx), Err(TxRuleError::SignatureInvalid));
}

#[test]
fn test_rejects_chained_spend_within_block() {
    // Validation runs against the committed UTXO set, so an output created
    // earlier in the same block is not yet spendable
    let chain = test_chain();
    let first = spend_genesis(&chain, 1_000, 6);
    let second = create_transaction(&first, 0, &test_key(6), vec![TransactionOutput::new(1_000, genesis_address())]);

    let block = build_child_block(&chain, vec![first, second]);
    assert!(matches!(chain.add_block(block), Err(RuleError::TxInContextFailed(_, TxRuleError::MissingUtxoEntry(_)))));
    assert_eq!(chain.height(), 0);
}
