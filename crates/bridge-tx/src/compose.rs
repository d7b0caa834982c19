use bridge_crypto::ContentHasher;
use bridge_types::{AccountId, NetworkPassphrase, SequenceNumber};

use crate::error::ComposeError;
use crate::operation::{Operation, OperationBody};
use crate::transaction::{Transaction, BASE_FEE, MAX_OPERATIONS};

// ---------------------------------------------------------------------------
// Mutator trait
// ---------------------------------------------------------------------------

/// A single contribution to a transaction under composition.
pub trait Mutator {
    fn mutate(&self, draft: &mut TransactionDraft) -> Result<(), ComposeError>;
}

/// The closed set of contributions [`compose`] accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionMutator {
    SourceAccount(AccountId),
    Sequence(SequenceNumber),
    Network(NetworkPassphrase),
    Operation(Operation),
}

impl Mutator for TransactionMutator {
    fn mutate(&self, draft: &mut TransactionDraft) -> Result<(), ComposeError> {
        match self {
            Self::SourceAccount(source) => {
                set_once(&mut draft.source, source.clone(), "source account")
            }
            Self::Sequence(sequence) => set_once(&mut draft.sequence, *sequence, "sequence"),
            Self::Network(passphrase) => set_once(
                &mut draft.network_id,
                ContentHasher::network_id(passphrase),
                "network",
            ),
            Self::Operation(operation) => draft.push_operation(operation.clone()),
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<(), ComposeError> {
    if slot.is_some() {
        return Err(ComposeError::DuplicateField(field));
    }
    *slot = Some(value);
    Ok(())
}

// ---------------------------------------------------------------------------
// TransactionDraft
// ---------------------------------------------------------------------------

/// A transaction under composition.
#[derive(Debug, Default)]
pub struct TransactionDraft {
    source: Option<AccountId>,
    sequence: Option<SequenceNumber>,
    network_id: Option<[u8; 32]>,
    operations: Vec<Operation>,
    merged: Vec<AccountId>,
}

impl TransactionDraft {
    /// Append an operation, enforcing the operation limit and rejecting any
    /// operation whose effective source was merged away earlier.
    fn push_operation(&mut self, operation: Operation) -> Result<(), ComposeError> {
        let index = self.operations.len();
        if index >= MAX_OPERATIONS {
            return Err(ComposeError::TooManyOperations {
                max: MAX_OPERATIONS,
            });
        }

        let effective_source = operation
            .source
            .as_ref()
            .or(self.source.as_ref())
            .ok_or(ComposeError::MissingField("source account"))?
            .clone();

        if self.merged.contains(&effective_source) {
            return Err(ComposeError::OperationAfterMerge {
                index,
                account: effective_source,
            });
        }

        if let OperationBody::AccountMerge { destination } = &operation.body {
            if *destination == effective_source {
                return Err(ComposeError::MergeIntoSelf {
                    index,
                    account: effective_source,
                });
            }
            self.merged.push(effective_source);
        }

        self.operations.push(operation);
        Ok(())
    }

    /// Close the draft into a transaction.
    pub fn finish(self) -> Result<Transaction, ComposeError> {
        let source = self
            .source
            .ok_or(ComposeError::MissingField("source account"))?;
        let sequence = self.sequence.ok_or(ComposeError::MissingField("sequence"))?;
        let network_id = self.network_id.ok_or(ComposeError::MissingField("network"))?;
        if self.operations.is_empty() {
            return Err(ComposeError::NoOperations);
        }

        // Bounded by MAX_OPERATIONS, so the product fits in u32.
        let fee = BASE_FEE * self.operations.len() as u32;

        Ok(Transaction {
            source,
            fee,
            sequence,
            network_id,
            operations: self.operations,
        })
    }
}

/// Fold mutators, in order, into a single transaction.
///
/// Fails fast on the first mutator that cannot be applied.
pub fn compose<I>(mutators: I) -> Result<Transaction, ComposeError>
where
    I: IntoIterator<Item = TransactionMutator>,
{
    let mut draft = TransactionDraft::default();
    for mutator in mutators {
        mutator.mutate(&mut draft)?;
    }
    let tx = draft.finish()?;
    tracing::debug!(
        source = %tx.source,
        sequence = %tx.sequence,
        operations = tx.operations.len(),
        fee = tx.fee,
        "composed transaction"
    );
    Ok(tx)
}
