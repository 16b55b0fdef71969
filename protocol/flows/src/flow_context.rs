use async_trait::async_trait;
use blocknet_addressmanager::AddressManager;
use blocknet_consensus::Chain;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::config::Params;
use blocknet_consensus_core::tx::Transaction;
use blocknet_mining::Mempool;
use blocknet_p2p_lib::{Adaptor, Message, PeerApi, PeerClient, ProtocolError, Version};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared state of every protocol flow: the chain, the mempool, the live
/// peer adaptor and the known-address table. Also the node-side
/// implementation of the four-method peer RPC.
pub struct FlowContext {
    params: Arc<Params>,
    chain: Arc<Chain>,
    mempool: Arc<Mempool>,
    adaptor: Arc<Adaptor>,
    amgr: Arc<Mutex<AddressManager>>,
}

impl FlowContext {
    pub fn new(
        params: Arc<Params>,
        chain: Arc<Chain>,
        mempool: Arc<Mempool>,
        adaptor: Arc<Adaptor>,
        amgr: Arc<Mutex<AddressManager>>,
    ) -> Arc<Self> {
        Arc::new(Self { params, chain, mempool, adaptor, amgr })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn chain(&self) -> &Arc<Chain> {
        &self.chain
    }

    pub fn mempool(&self) -> &Arc<Mempool> {
        &self.mempool
    }

    pub fn adaptor(&self) -> &Arc<Adaptor> {
        &self.adaptor
    }

    pub fn amgr(&self) -> &Arc<Mutex<AddressManager>> {
        &self.amgr
    }

    /// Seeds bootstrap or gossiped addresses into the known-address table,
    /// skipping our own listen address and already live peers.
    pub fn seed_addresses(&self, addresses: &[String]) {
        let mut amgr = self.amgr.lock();
        for address in addresses {
            if self.adaptor.can_connect_with(address) {
                amgr.add_address(address);
            }
        }
    }
}

#[async_trait]
impl PeerApi for FlowContext {
    /// Registers the caller as a live peer (dialing back to its advertised
    /// listen address), seeds any peers it gossiped, and answers with our
    /// own version record.
    async fn handshake(&self, their_version: Version) -> Result<Version, ProtocolError> {
        let client = PeerClient::connect(&their_version.listen_address).await?;
        info!("handshake with {}, version {}", their_version.listen_address, their_version.version);
        let gossiped = self.adaptor.register_peer(client, their_version);
        self.seed_addresses(&gossiped);
        Ok(self.adaptor.version())
    }

    /// Admits a non-duplicate transaction into the mempool and schedules its
    /// relay. No validation happens at ingress; a transaction is validated
    /// once a block including it arrives.
    async fn new_transaction(&self, transaction: Transaction) -> Result<Transaction, ProtocolError> {
        let transaction = Arc::new(transaction);
        self.mempool.add(transaction.clone())?;
        debug!("transaction {} added to mempool", transaction.id());
        self.adaptor.hub().broadcast(Message::Transaction(transaction.clone()));
        Ok((*transaction).clone())
    }

    /// Runs full block validation, prunes included transactions from the
    /// mempool and schedules the relay. A validation failure is returned to
    /// the caller unchanged.
    async fn new_block(&self, block: Block) -> Result<Block, ProtocolError> {
        let block = Arc::new(block);
        self.chain.add_block((*block).clone())?;
        info!("block {} at height {} added to the chain", block.hash(), block.header.height);

        for tx in block.transactions.iter() {
            self.mempool.remove(&tx.id());
        }
        self.adaptor.hub().broadcast(Message::Block(block.clone()));
        Ok((*block).clone())
    }

    /// Returns every block in `[0, height)`, in order. The tip itself is
    /// never included, so followers trail the source by one block per pass.
    async fn get_blocks(&self, _their_version: Version) -> Result<Vec<Block>, ProtocolError> {
        let mut blocks = Vec::new();
        for height in 0..self.chain.height() {
            blocks.push((*self.chain.block_by_height(height)?).clone());
        }
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknet_consensus::model::stores::factory::MemoryStoreFactory;
    use blocknet_consensus_core::config::genesis::{genesis_address, genesis_key};
    use blocknet_consensus_core::header::Header;
    use blocknet_consensus_core::sign::sign_block;
    use blocknet_consensus_core::testutils::{create_transaction, test_key};
    use blocknet_consensus_core::tx::TransactionOutput;
    use blocknet_mining::errors::MempoolError;

    const TEST_TIMESTAMP: u64 = 1_700_000_000_000;

    fn test_context() -> Arc<FlowContext> {
        let params = Arc::new(Params::default());
        let chain = Arc::new(Chain::new(params.clone(), &MemoryStoreFactory::new()));
        let mempool = Arc::new(Mempool::new());
        let adaptor = Adaptor::new(params.protocol_version.clone(), ":4000".to_string());
        let amgr = AddressManager::new(":4000".to_string());
        FlowContext::new(params, chain, mempool, adaptor, amgr)
    }

    fn spend_genesis(ctx: &FlowContext) -> Transaction {
        let genesis = ctx.chain().block_by_height(0).unwrap();
        let reward = genesis.transactions[0].outputs[0].value;
        create_transaction(&genesis.transactions[0], 0, &genesis_key(), vec![TransactionOutput::new(reward, genesis_address())])
    }

    fn child_block(ctx: &FlowContext, transactions: Vec<Transaction>) -> Block {
        let tip = ctx.chain().block_by_height(ctx.chain().height()).unwrap();
        let mut block = Block::new(Header::new(tip.header.height + 1, tip.hash(), TEST_TIMESTAMP), transactions);
        sign_block(&mut block, &test_key(42));
        block
    }

    #[tokio::test]
    async fn test_new_transaction_rejects_duplicates() {
        let ctx = test_context();
        let tx = spend_genesis(&ctx);

        ctx.new_transaction(tx.clone()).await.unwrap();
        assert!(ctx.mempool().contains(&tx.id()));

        let result = ctx.new_transaction(tx).await;
        assert!(matches!(result, Err(ProtocolError::Mempool(MempoolError::TransactionAlreadyKnown(_)))));
    }

    #[tokio::test]
    async fn test_new_block_prunes_mempool() {
        let ctx = test_context();
        let tx = spend_genesis(&ctx);
        ctx.new_transaction(tx.clone()).await.unwrap();

        ctx.new_block(child_block(&ctx, vec![tx.clone()])).await.unwrap();
        assert_eq!(ctx.chain().height(), 1);
        assert!(!ctx.mempool().contains(&tx.id()));

        // An invalid block surfaces the chain error unchanged
        let tip = ctx.chain().block_by_height(0).unwrap();
        let bogus = Block::new(Header::new(7, tip.hash(), TEST_TIMESTAMP), Vec::new());
        assert!(matches!(ctx.new_block(bogus).await, Err(ProtocolError::Rule(_))));
    }

    #[tokio::test]
    async fn test_get_blocks_excludes_the_tip() {
        let ctx = test_context();
        // Genesis-only chain: nothing below the tip
        assert!(ctx.get_blocks(ctx.adaptor().version()).await.unwrap().is_empty());

        let tx = spend_genesis(&ctx);
        ctx.new_block(child_block(&ctx, vec![tx])).await.unwrap();

        let blocks = ctx.get_blocks(ctx.adaptor().version()).await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header.height, 0);
    }
}
