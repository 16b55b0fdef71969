use crate::model::stores::blocks::BlockStore;
use crate::model::stores::factory::StoreFactory;
use crate::model::stores::transactions::TransactionStore;
use crate::model::stores::utxo_set::UtxoSetStore;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::config::Params;
use blocknet_consensus_core::config::genesis::genesis_block;
use blocknet_consensus_core::errors::block::{BlockProcessResult, RuleError};
use blocknet_consensus_core::errors::store::{StoreError, StoreResult};
use blocknet_consensus_core::errors::tx::{TxResult, TxRuleError};
use blocknet_consensus_core::header::Header;
use blocknet_consensus_core::keys::Address;
use blocknet_consensus_core::merkle::calc_hash_merkle_root;
use blocknet_consensus_core::sign::verify_transaction;
use blocknet_consensus_core::tx::{Transaction, TransactionOutpoint, UtxoEntry};
use blocknet_hashes::Hash;
use parking_lot::RwLock;
use std::sync::Arc;

/// The linear UTXO-ledger chain: the accepted header sequence plus the three
/// stores it keeps consistent.
///
/// `add_block` is serialized by the headers write lock, so concurrent appends
/// from the miner and the sync loop cannot interleave: whichever takes the
/// lock first commits and the other fails the linkage checks.
pub struct Chain {
    params: Arc<Params>,
    headers: RwLock<Vec<Header>>,
    transaction_store: Arc<dyn TransactionStore>,
    block_store: Arc<dyn BlockStore>,
    utxo_set_store: Arc<dyn UtxoSetStore>,
}

impl Chain {
    /// Builds the chain over freshly created stores and installs the genesis
    /// block through the internal unchecked commit.
    pub fn new(params: Arc<Params>, factory: &dyn StoreFactory) -> Self {
        let chain = Self {
            params: params.clone(),
            headers: RwLock::new(Vec::new()),
            transaction_store: factory.transaction_store(),
            block_store: factory.block_store(),
            utxo_set_store: factory.utxo_set_store(),
        };
        {
            let mut headers = chain.headers.write();
            chain.commit_block(&mut headers, genesis_block(&params)).expect("genesis commit over empty stores");
        }
        chain
    }

    /// Chain height: number of accepted headers minus one. Genesis-only
    /// chains are at height 0.
    pub fn height(&self) -> u64 {
        self.headers.read().len() as u64 - 1
    }

    /// Validates `block` against the current tip and, if it passes, appends
    /// it and updates the UTXO index.
    pub fn add_block(&self, block: Block) -> BlockProcessResult<()> {
        let mut headers = self.headers.write();
        self.validate_block(&headers, &block)?;
        self.commit_block(&mut headers, block)
    }

    fn validate_block(&self, headers: &[Header], block: &Block) -> BlockProcessResult<()> {
        let hash = block.hash();

        if !block.transactions.is_empty() {
            let calculated = calc_hash_merkle_root(block.transactions.iter());
            if calculated != block.header.merkle_root {
                return Err(RuleError::BadMerkleRoot(block.header.merkle_root, calculated));
            }
        }
        match (&block.public_key, &block.signature) {
            (Some(public_key), Some(signature)) => {
                if !public_key.verify(hash.as_ref(), signature) {
                    return Err(RuleError::BadBlockSignature(hash));
                }
            }
            _ => return Err(RuleError::MissingBlockSignature(hash)),
        }

        let tip = headers.last().expect("the chain always contains genesis");
        if block.header.height != tip.height + 1 {
            return Err(RuleError::WrongBlockHeight(block.header.height, tip.height));
        }
        let tip_hash = tip.hash();
        if block.header.prev_block_hash != tip_hash {
            return Err(RuleError::WrongParentHash(block.header.prev_block_hash, tip_hash));
        }

        for tx in block.transactions.iter() {
            self.validate_transaction(tx).map_err(|err| RuleError::TxInContextFailed(tx.id(), err))?;
        }
        Ok(())
    }

    /// Validates a transaction against the current UTXO set: every input
    /// signature verifies over the stripped-transaction hash, every spent
    /// outpoint exists and is unspent, and inputs cover outputs.
    ///
    /// Note that inputs are not required to prove ownership of the spent
    /// output's address; any key whose signature verifies may spend any
    /// live outpoint. Outputs are locked by address equality only.
    pub fn validate_transaction(&self, tx: &Transaction) -> TxResult<()> {
        if !verify_transaction(tx) {
            return Err(TxRuleError::SignatureInvalid);
        }

        let mut inputs_sum: u64 = 0;
        for input in tx.inputs.iter() {
            let entry = match self.utxo_set_store.get(&input.previous_outpoint) {
                Ok(entry) => entry,
                Err(StoreError::KeyNotFound(_)) => return Err(TxRuleError::MissingUtxoEntry(input.previous_outpoint)),
            };
            if entry.is_spent {
                return Err(TxRuleError::UtxoAlreadySpent(input.previous_outpoint));
            }
            inputs_sum = inputs_sum.checked_add(entry.output.value).ok_or(TxRuleError::InputAmountOverflow)?;
        }

        let mut outputs_sum: u64 = 0;
        for output in tx.outputs.iter() {
            outputs_sum = outputs_sum.checked_add(output.value).ok_or(TxRuleError::OutputsValueOverflow)?;
        }

        if inputs_sum < outputs_sum {
            return Err(TxRuleError::SpendTooHigh(outputs_sum, inputs_sum));
        }
        Ok(())
    }

    /// The unchecked append: stores the block, extends the header list and
    /// updates the UTXO index per transaction in block order.
    fn commit_block(&self, headers: &mut Vec<Header>, block: Block) -> BlockProcessResult<()> {
        let block = Arc::new(block);
        self.block_store.insert(block.clone())?;
        headers.push(block.header.clone());

        for tx in block.transactions.iter() {
            self.transaction_store.insert(Arc::new(tx.clone()))?;
            self.update_utxo_set(tx)?;
        }
        Ok(())
    }

    /// Inserts one fresh unspent entry per output, then flips the entries
    /// consumed by the inputs. Creation precedes spending; genesis (no
    /// inputs) yields unspent entries only.
    fn update_utxo_set(&self, tx: &Transaction) -> BlockProcessResult<()> {
        let id = tx.id();
        for (index, output) in tx.outputs.iter().enumerate() {
            let outpoint = TransactionOutpoint::new(id, index as u32);
            self.utxo_set_store.insert(UtxoEntry::new(outpoint, *output))?;
        }
        for input in tx.inputs.iter() {
            self.utxo_set_store.mark_spent(&input.previous_outpoint)?;
        }
        Ok(())
    }

    /// Looks the header up in the accepted sequence, hashes it and fetches
    /// the block from the block store.
    pub fn block_by_height(&self, height: u64) -> StoreResult<Arc<Block>> {
        let hash = {
            let headers = self.headers.read();
            headers.get(height as usize).ok_or_else(|| StoreError::KeyNotFound(format!("block height {height}")))?.hash()
        };
        self.block_store.get(hash)
    }

    pub fn block_by_hash(&self, hash: Hash) -> StoreResult<Arc<Block>> {
        self.block_store.get(hash)
    }

    pub fn utxo_by_outpoint(&self, outpoint: &TransactionOutpoint) -> StoreResult<UtxoEntry> {
        self.utxo_set_store.get(outpoint)
    }

    pub fn utxos_by_address(&self, address: Address) -> Vec<UtxoEntry> {
        self.utxo_set_store.utxos_by_address(address)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    // Store sizes, surfaced for the periodic node-info log line

    pub fn block_count(&self) -> usize {
        self.block_store.list().len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_store.list().len()
    }

    pub fn utxo_count(&self) -> usize {
        self.utxo_set_store.list().len()
    }
}
