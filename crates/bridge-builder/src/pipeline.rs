use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use bridge_horizon::AccountLoader;
use bridge_protocol::{BuildError, BuilderRequest, BuilderResponse, RequestError, ValidatedRequest};
use bridge_tx::{compose, ComposeError, TransactionEnvelope, TransactionMutator};
use bridge_types::SequenceNumber;

use crate::config::BuilderConfig;
use crate::sequence::resolve_sequence;

// ---------------------------------------------------------------------------
// BuiltTransaction
// ---------------------------------------------------------------------------

/// A signed envelope and its transport encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltTransaction {
    pub envelope: TransactionEnvelope,
    /// Standard base64 of the binary envelope.
    pub encoded: String,
}

impl BuiltTransaction {
    pub fn into_response(self) -> BuilderResponse {
        BuilderResponse {
            transaction_envelope: self.encoded,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Assembles signed transactions from build requests.
///
/// Holds only immutable configuration and the loader handle, so one builder
/// serves any number of concurrent requests.
#[derive(Clone)]
pub struct TransactionBuilder {
    config: BuilderConfig,
    loader: Arc<dyn AccountLoader>,
}

impl TransactionBuilder {
    pub fn new(config: BuilderConfig, loader: Arc<dyn AccountLoader>) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Run a decoded request through the pipeline.
    pub async fn build(&self, request: BuilderRequest) -> Result<BuiltTransaction, BuildError> {
        let request_id = Uuid::now_v7();
        self.run(request)
            .instrument(tracing::info_span!("build", %request_id))
            .await
    }

    /// Decode a JSON body and run it through the pipeline.
    pub async fn build_json(&self, body: &[u8]) -> Result<BuilderResponse, BuildError> {
        let request_id = Uuid::now_v7();
        async {
            let request = BuilderRequest::from_json(body).inspect_err(|e| {
                tracing::warn!(error = %e, bytes = body.len(), "malformed build request");
            })?;
            self.run(request).await.map(BuiltTransaction::into_response)
        }
        .instrument(tracing::info_span!("build", %request_id))
        .await
    }

    async fn run(&self, request: BuilderRequest) -> Result<BuiltTransaction, BuildError> {
        let processed = request
            .process()
            .map_err(|e| rejected(e, "process"))?;
        let validated = processed
            .validate()
            .map_err(|e| rejected(e, "validate"))?;

        let sequence = resolve_sequence(&validated, self.loader.as_ref()).await?;

        let mutators = self.mutators(&validated, sequence).map_err(|e| {
            tracing::error!(error = %e, request = ?validated, "operation encoding failed");
            BuildError::internal(e.to_string())
        })?;
        let tx = compose(mutators).map_err(|e| {
            tracing::error!(error = %e, request = ?validated, "transaction composition failed");
            BuildError::internal(e.to_string())
        })?;

        let envelope = TransactionEnvelope::sign(tx, validated.signers()).map_err(|e| {
            tracing::error!(error = %e, "transaction signing failed");
            BuildError::internal(e.to_string())
        })?;
        let encoded = envelope.to_base64().map_err(|e| {
            tracing::error!(error = %e, "envelope encoding failed");
            BuildError::internal(e.to_string())
        })?;

        tracing::info!(
            source = %envelope.tx.source,
            sequence = %envelope.tx.sequence,
            operations = envelope.tx.operations.len(),
            signatures = envelope.signatures.len(),
            "transaction built"
        );
        Ok(BuiltTransaction { envelope, encoded })
    }

    /// Header mutators first, then one per operation in request order.
    fn mutators(
        &self,
        request: &ValidatedRequest,
        sequence: SequenceNumber,
    ) -> Result<Vec<TransactionMutator>, ComposeError> {
        let mut mutators = Vec::with_capacity(request.operations().len() + 3);
        mutators.push(TransactionMutator::SourceAccount(request.source().clone()));
        mutators.push(TransactionMutator::Sequence(sequence));
        mutators.push(TransactionMutator::Network(
            self.config.network_passphrase.clone(),
        ));
        for (i, op) in request.operations().iter().enumerate() {
            mutators.push(op.to_mutator(i)?);
        }
        Ok(mutators)
    }
}

fn rejected(error: RequestError, stage: &'static str) -> BuildError {
    tracing::warn!(
        stage,
        field = error.field(),
        value = error.value(),
        error = %error,
        "request rejected"
    );
    error.into()
}
