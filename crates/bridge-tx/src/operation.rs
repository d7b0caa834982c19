use serde::{Deserialize, Serialize};

use bridge_types::{AccountId, Amount, Asset, AssetCode, Price};

/// Maximum length of a data entry name.
pub const MAX_DATA_NAME_LEN: usize = 64;
/// Maximum length of a data entry value in bytes.
pub const MAX_DATA_VALUE_LEN: usize = 64;
/// Maximum length of an account home domain.
pub const MAX_HOME_DOMAIN_LEN: usize = 32;
/// Maximum number of intermediate assets in a path payment.
pub const MAX_PATH_LEN: usize = 5;
/// Union of the account authorization flags (required, revocable, immutable).
pub const AUTH_FLAGS_MASK: u32 = 0b111;

/// A single ledger action inside a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Account the operation acts on; the transaction source when `None`.
    pub source: Option<AccountId>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self { source: None, body }
    }
}

/// The typed payload of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
    CreateAccount {
        destination: AccountId,
        starting_balance: Amount,
    },
    Payment {
        destination: AccountId,
        asset: Asset,
        amount: Amount,
    },
    PathPayment {
        send_asset: Asset,
        send_max: Amount,
        destination: AccountId,
        dest_asset: Asset,
        dest_amount: Amount,
        path: Vec<Asset>,
    },
    /// Create, update (non-zero `offer_id`) or delete (zero `amount`) an offer.
    ManageOffer {
        selling: Asset,
        buying: Asset,
        amount: Amount,
        price: Price,
        offer_id: u64,
    },
    CreatePassiveOffer {
        selling: Asset,
        buying: Asset,
        amount: Amount,
        price: Price,
    },
    SetOptions(SetOptions),
    ChangeTrust {
        asset: Asset,
        limit: Amount,
    },
    AllowTrust {
        trustor: AccountId,
        asset_code: AssetCode,
        authorize: bool,
    },
    AccountMerge {
        destination: AccountId,
    },
    Inflation,
    /// Set (`Some`) or delete (`None`) a named data entry.
    ManageData {
        name: String,
        value: Option<Vec<u8>>,
    },
}

impl OperationBody {
    /// Stable snake_case name of the operation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateAccount { .. } => "create_account",
            Self::Payment { .. } => "payment",
            Self::PathPayment { .. } => "path_payment",
            Self::ManageOffer { .. } => "manage_offer",
            Self::CreatePassiveOffer { .. } => "create_passive_offer",
            Self::SetOptions(_) => "set_options",
            Self::ChangeTrust { .. } => "change_trust",
            Self::AllowTrust { .. } => "allow_trust",
            Self::AccountMerge { .. } => "account_merge",
            Self::Inflation => "inflation",
            Self::ManageData { .. } => "manage_data",
        }
    }
}

/// Account settings changed by a `set_options` operation. Unset fields are
/// left untouched on the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOptions {
    pub inflation_destination: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u8>,
    pub low_threshold: Option<u8>,
    pub medium_threshold: Option<u8>,
    pub high_threshold: Option<u8>,
    pub home_domain: Option<String>,
    pub signer: Option<SignerUpdate>,
}

/// Add, reweight, or (with weight zero) remove an account signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerUpdate {
    pub key: AccountId,
    pub weight: u8,
}
