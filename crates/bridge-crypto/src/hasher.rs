use bridge_types::NetworkPassphrase;

/// Domain-separated BLAKE3 hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so a network id and a transaction payload with identical
/// bytes never hash to the same value.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for network passphrases.
    pub const NETWORK: Self = Self {
        domain: "bridge-network-v1",
    };
    /// Hasher for transaction signature payloads.
    pub const TRANSACTION: Self = Self {
        domain: "bridge-tx-v1",
    };

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// The 32-byte identifier of a network.
    pub fn network_id(passphrase: &NetworkPassphrase) -> [u8; 32] {
        Self::NETWORK.hash(passphrase.as_str().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let a = ContentHasher::TRANSACTION.hash(b"payload");
        let b = ContentHasher::TRANSACTION.hash(b"payload");
        assert_eq!(a, b);
    }

    #[test]
    fn domains_separate() {
        let data = b"same content";
        assert_ne!(
            ContentHasher::NETWORK.hash(data),
            ContentHasher::TRANSACTION.hash(data)
        );
        assert_ne!(ContentHasher::NETWORK.hash(data), *blake3::hash(data).as_bytes());
    }

    #[test]
    fn network_ids_differ_per_network() {
        let test = ContentHasher::network_id(&NetworkPassphrase::testnet());
        let public = ContentHasher::network_id(&NetworkPassphrase::public());
        assert_ne!(test, public);
        assert_eq!(test, ContentHasher::network_id(&NetworkPassphrase::testnet()));
    }
}
