use blend_primitives::{
    Bytes, NetworkId, Operation, OperationKind, SorobanData, Transaction, TransactionEnvelope,
};
use blend_rpc::{LedgerRpc, RestorePreamble, SimulateSuccess};
use blend_txbuilder::prelude::*;
use blend_wallet::{is_signed_by, Signer};
use tracing::{debug, error, info, instrument, warn};

use crate::{parse, Error, ParseError, PollPolicy, SimulationFailure, TxParams};

/// Drives transactions from an operation to a parsed result.
pub struct Pipeline<R> {
    pub(crate) rpc: R,
    pub(crate) policy: PollPolicy,
}

impl<R> Pipeline<R>
where
    R: LedgerRpc,
{
    pub fn new(rpc: R) -> Self {
        Self::with_policy(rpc, PollPolicy::default())
    }

    pub fn with_policy(rpc: R, policy: PollPolicy) -> Self {
        Self { rpc, policy }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Builds a single-operation transaction on top of a freshly fetched
    /// account cursor.
    async fn build<S>(
        &self,
        operation: Operation,
        params: &TxParams<S>,
        soroban_data: Option<SorobanData>,
    ) -> Result<Transaction, Error> {
        let cursor = self.rpc.get_account(&params.account).await?;

        debug!(sequence = cursor.sequence, "account cursor refreshed");

        let mut builder = TransactionBuilder::new(cursor, &params.options).operation(operation);

        if let Some(data) = soroban_data {
            builder = builder.soroban_data(data);
        }

        Ok(builder.build()?)
    }

    async fn simulate(&self, tx: &Transaction) -> Result<SimulateSuccess, Error> {
        let envelope = TransactionEnvelope::unsigned(tx.clone());
        let response = self.rpc.simulate_transaction(&envelope).await?;

        response.into_result().map_err(|failure| {
            let failure = SimulationFailure::from(failure);
            warn!(kind = %failure.kind, message = %failure.message, "simulation failed");
            Error::Simulation(failure)
        })
    }

    /// Hands the unsigned envelope to the signer and checks that what comes
    /// back is the same transaction, signed by the source account for the
    /// configured network.
    async fn sign<S>(&self, tx: Transaction, params: &TxParams<S>) -> Result<TransactionEnvelope, Error>
    where
        S: Signer,
    {
        let passphrase = &params.options.network_passphrase;
        let network = NetworkId::from_passphrase(passphrase);
        let expected = tx.hash(&network)?;

        let unsigned = TransactionEnvelope::unsigned(tx).to_base64()?;
        let signed = params.signer.sign(unsigned, passphrase).await?;
        let signed = TransactionEnvelope::from_base64(&signed)?;

        if signed.hash(&network)? != expected {
            return Err(Error::EnvelopeAltered { expected });
        }

        if !is_signed_by(&signed, &params.account, &network)? {
            warn!(hash = %expected, "no source signature valid for this network");

            return Err(Error::NetworkMismatch {
                passphrase: passphrase.clone(),
            });
        }

        debug!(hash = %expected, signatures = signed.signatures.len(), "envelope signed");

        Ok(signed)
    }

    /// Simulates, signs and submits a soroban operation, then parses the
    /// value it returned.
    ///
    /// When `soroban_data` is given it is attached as-is and simulation is
    /// skipped; the transaction fee includes its resource fee.
    #[instrument(skip_all, fields(account = %params.account, kind = ?operation.kind))]
    pub async fn invoke_operation<S, T, P>(
        &self,
        operation: Operation,
        parser: P,
        params: &TxParams<S>,
        soroban_data: Option<SorobanData>,
    ) -> Result<T, Error>
    where
        S: Signer,
        P: FnOnce(Option<Bytes>) -> Result<T, ParseError>,
    {
        let tx = match soroban_data {
            Some(data) => self.build(operation, params, Some(data)).await?,
            None => {
                let tx = self.build(operation, params, None).await?;
                let simulated = self.simulate(&tx).await?;

                assemble(
                    tx,
                    simulated.transaction_data,
                    simulated.min_resource_fee,
                    simulated.auth,
                )?
            }
        };

        let signed = self.sign(tx, params).await?;

        self.submit_and_confirm(&signed, parser).await
    }

    /// Runs a classic operation: no simulation, return value discarded.
    ///
    /// Soroban operations are refused before anything is fetched or signed.
    #[instrument(skip_all, fields(account = %params.account, kind = ?operation.kind))]
    pub async fn invoke_classic_operation<S>(
        &self,
        operation: Operation,
        params: &TxParams<S>,
    ) -> Result<(), Error>
    where
        S: Signer,
    {
        self.classic(operation, params).await.map_err(|err| {
            error!(%err, "classic operation failed");
            Error::ClassicOperationFailed(Box::new(err))
        })
    }

    async fn classic<S>(&self, operation: Operation, params: &TxParams<S>) -> Result<(), Error>
    where
        S: Signer,
    {
        if operation.kind.is_soroban() {
            return Err(TxBuilderError::RequiresSimulation(operation.kind).into());
        }

        let tx = self.build(operation, params, None).await?;
        let signed = self.sign(tx, params).await?;

        self.submit_and_confirm(&signed, parse::ignore).await
    }

    /// Restores the archived entries listed in a restore preamble.
    pub async fn restore_footprint<S>(
        &self,
        preamble: RestorePreamble,
        params: &TxParams<S>,
    ) -> Result<(), Error>
    where
        S: Signer,
    {
        let mut data = preamble.transaction_data;
        data.resource_fee = data.resource_fee.max(preamble.min_resource_fee);

        info!(
            entries = data.footprint.read_write.len(),
            resource_fee = data.resource_fee,
            "restoring archived entries"
        );

        let operation = Operation::new(OperationKind::RestoreFootprint, Vec::<u8>::new());

        self.invoke_operation(operation, parse::ignore, params, Some(data))
            .await
    }

    /// Builds and simulates without signing or submitting anything.
    pub async fn simulate_only<S>(
        &self,
        operation: Operation,
        params: &TxParams<S>,
    ) -> Result<SimulateSuccess, Error> {
        let tx = self.build(operation, params, None).await?;
        self.simulate(&tx).await
    }
}
