use blend_primitives::{Bytes, TransactionEnvelope, TxHash};
use blend_rpc::{GetTransactionStatus, LedgerRpc, SendStatus};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, instrument, trace, warn};

use crate::{Error, ExecutionFailure, ParseError, Pipeline};

/// Terminal status of an accepted transaction
enum Outcome {
    Applied(Option<Bytes>),
    Failed(ExecutionFailure),
}

impl<R> Pipeline<R>
where
    R: LedgerRpc,
{
    /// Submits a signed envelope and waits until the ledger applies or
    /// fails it.
    ///
    /// A `TRY_AGAIN_LATER` answer is retried every poll interval until the
    /// submit window closes. Once accepted, the transaction is polled every
    /// poll interval for as long as it is not found, bounded only by the
    /// optional confirmation timeout. Dropping the returned future stops
    /// the wait.
    #[instrument(skip_all)]
    pub async fn submit_and_confirm<T, P>(
        &self,
        envelope: &TransactionEnvelope,
        parser: P,
    ) -> Result<T, Error>
    where
        P: FnOnce(Option<Bytes>) -> Result<T, ParseError>,
    {
        let hash = self.submit(envelope).await?;

        let outcome = match self.policy.confirm_timeout {
            Some(limit) => timeout(limit, self.wait_for_ledger(&hash))
                .await
                .map_err(|_| {
                    warn!(%hash, ?limit, "gave up waiting for confirmation");
                    Error::ConfirmationTimeout { hash }
                })??,
            None => self.wait_for_ledger(&hash).await?,
        };

        match outcome {
            Outcome::Applied(value) => Ok(parser(value)?),
            Outcome::Failed(failure) => Err(Error::ExecutionFailed { hash, failure }),
        }
    }

    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<TxHash, Error> {
        let started = Instant::now();

        loop {
            let response = self.rpc.send_transaction(envelope).await?;
            let hash = response.hash;

            match response.status {
                SendStatus::Pending | SendStatus::Duplicate => {
                    info!(%hash, status = ?response.status, "transaction accepted");
                    return Ok(hash);
                }
                SendStatus::Error => {
                    warn!(
                        %hash,
                        result = ?response.error_result,
                        "transaction rejected on submission"
                    );

                    return Err(Error::SubmissionRejected {
                        hash,
                        result_code: response.error_result,
                        diagnostics: response.diagnostic_events,
                    });
                }
                SendStatus::TryAgainLater => {
                    let waited = started.elapsed();

                    if waited >= self.policy.submit_window {
                        warn!(%hash, ?waited, "ledger kept deferring the submission");
                        return Err(Error::SubmissionTimeout { hash, waited });
                    }

                    debug!(%hash, ?waited, "ledger busy, resubmitting");
                    sleep(self.policy.poll_interval).await;
                }
            }
        }
    }

    async fn wait_for_ledger(&self, hash: &TxHash) -> Result<Outcome, Error> {
        let mut polls = 0u32;

        loop {
            let response = self.rpc.get_transaction(hash).await?;

            match response.status {
                GetTransactionStatus::NotFound => {
                    polls += 1;
                    trace!(%hash, polls, "transaction not in a ledger yet");
                    sleep(self.policy.poll_interval).await;
                }
                GetTransactionStatus::Success => {
                    info!(%hash, ledger = ?response.ledger, "transaction applied");
                    return Ok(Outcome::Applied(response.return_value));
                }
                GetTransactionStatus::Failed => {
                    let failure =
                        ExecutionFailure::new(response.result_code, response.diagnostic_events);

                    warn!(%hash, kind = %failure.kind, "transaction failed");
                    return Ok(Outcome::Failed(failure));
                }
            }
        }
    }
}
