//! Deterministic entry identifier derivation.

use merit_crypto::{CanonicalHasher, StructuralEncoder};
use merit_types::{ChainAddress, ChainSpaceId, ContentDigest, EntryUri, Ident, MessageId};

/// Derive the unique, reproducible URI naming a dispatched record.
///
/// Inputs are encoded in fixed order — digest, entity uid, message id,
/// chain space, provider — and hashed under the entry-uri domain.
/// Identical inputs always yield the identical URI; the external ledger
/// layer relies on this for idempotent resubmission detection. A
/// collision on the ledger is a hard failure, not a retry condition.
pub fn derive_entry_uri(
    digest: &ContentDigest,
    entity_uid: &str,
    message_id: &MessageId,
    chain_space: &ChainSpaceId,
    provider: &ChainAddress,
) -> EntryUri {
    let mut enc = StructuralEncoder::new();
    enc.put_hash(digest.as_bytes())
        .put_str(entity_uid)
        .put_str(message_id.as_str())
        .put_hash(chain_space.ident().as_bytes())
        .put_str(provider.as_str());
    let hash = CanonicalHasher::ENTRY_URI.hash(&enc.finish());
    EntryUri::from_ident(Ident::from_hash(*hash.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> (ContentDigest, MessageId, ChainSpaceId, ChainAddress) {
        (
            ContentDigest::from_hash([1; 32]),
            MessageId::generate(),
            ChainSpaceId::from_ident(Ident::from_hash([2; 32])),
            ChainAddress::parse("3xProvider").unwrap(),
        )
    }

    #[test]
    fn identical_inputs_yield_identical_uri() {
        let (digest, message_id, space, provider) = inputs();
        let a = derive_entry_uri(&digest, "e1", &message_id, &space, &provider);
        let b = derive_entry_uri(&digest, "e1", &message_id, &space, &provider);
        assert_eq!(a, b);
    }

    #[test]
    fn every_input_contributes() {
        let (digest, message_id, space, provider) = inputs();
        let base = derive_entry_uri(&digest, "e1", &message_id, &space, &provider);

        let other_digest = ContentDigest::from_hash([9; 32]);
        assert_ne!(
            base,
            derive_entry_uri(&other_digest, "e1", &message_id, &space, &provider)
        );
        assert_ne!(
            base,
            derive_entry_uri(&digest, "e2", &message_id, &space, &provider)
        );
        let other_message = MessageId::generate();
        assert_ne!(
            base,
            derive_entry_uri(&digest, "e1", &other_message, &space, &provider)
        );
        let other_space = ChainSpaceId::from_ident(Ident::from_hash([7; 32]));
        assert_ne!(
            base,
            derive_entry_uri(&digest, "e1", &message_id, &other_space, &provider)
        );
        let other_provider = ChainAddress::parse("3xOther").unwrap();
        assert_ne!(
            base,
            derive_entry_uri(&digest, "e1", &message_id, &space, &other_provider)
        );
    }

    #[test]
    fn derivation_is_stable_across_threads() {
        let (digest, message_id, space, provider) = inputs();
        let expected = derive_entry_uri(&digest, "e1", &message_id, &space, &provider);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (digest, message_id, space, provider) =
                    (digest, message_id.clone(), space, provider.clone());
                std::thread::spawn(move || {
                    derive_entry_uri(&digest, "e1", &message_id, &space, &provider)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn derived_uri_uses_entry_scheme() {
        let (digest, message_id, space, provider) = inputs();
        let uri = derive_entry_uri(&digest, "e1", &message_id, &space, &provider);
        assert!(uri.to_uri().starts_with("entry:merit:"));
    }
}
