//! The dispatch builder: fail-fast pipelines enforcing the two-party
//! signature protocol.

use std::sync::Arc;

use tracing::{debug, warn};

use merit_canon::{validate_canonical, SignedEntry, SignedRevocation};
use merit_crypto::{sign_digest, verify_signature, KeyResolver, SigningCapability};
use merit_types::{ChainSpaceId, ContentDigest, DidUri};

use crate::derive::derive_entry_uri;
use crate::error::{Pipeline, RatingPropertiesError};
use crate::record::{DispatchRecord, DispatchedRating, EntryBody, RevokeBody};

/// Builds ledger-ready dispatch records for one chain space and author.
///
/// The provider signature is verified before anything else is signed; a
/// verification failure terminates the pipeline with no author
/// signature ever produced. Pipelines are single-pass with no retry —
/// failure is terminal for the invocation and the caller resubmits
/// corrected content. Each build operates on its own local values, so
/// concurrent builds need no coordination.
pub struct DispatchBuilder {
    chain_space: ChainSpaceId,
    author: DidUri,
    signer: Arc<dyn SigningCapability>,
    resolver: Arc<dyn KeyResolver>,
}

impl DispatchBuilder {
    pub fn new(
        chain_space: ChainSpaceId,
        author: DidUri,
        signer: Arc<dyn SigningCapability>,
        resolver: Arc<dyn KeyResolver>,
    ) -> Self {
        Self {
            chain_space,
            author,
            signer,
            resolver,
        }
    }

    /// The chain space records are dispatched to.
    pub fn chain_space(&self) -> &ChainSpaceId {
        &self.chain_space
    }

    /// The author identity countersigning dispatches.
    pub fn author(&self) -> &DidUri {
        &self.author
    }

    /// Run a provider-signed entry through the create pipeline.
    pub async fn build_create(
        &self,
        entry: &SignedEntry,
    ) -> Result<DispatchRecord, RatingPropertiesError> {
        self.build_entry(Pipeline::Create, entry).await
    }

    /// Run a provider-signed entry through the revise pipeline.
    ///
    /// Identical to create, except the content must carry a reference to
    /// the entry being revised.
    pub async fn build_revise(
        &self,
        entry: &SignedEntry,
    ) -> Result<DispatchRecord, RatingPropertiesError> {
        if entry.content.reference_id.is_none() {
            let error = RatingPropertiesError::MissingReference;
            warn!(pipeline = %Pipeline::Revise, %error, "dispatch rejected");
            return Err(error);
        }
        self.build_entry(Pipeline::Revise, entry).await
    }

    /// Run a provider-signed revocation through the revoke pipeline.
    ///
    /// The revocation body is dispatched unmodified — unlike entries, it
    /// carries no display-only redundancy to strip.
    pub async fn build_revoke(
        &self,
        revocation: &SignedRevocation,
    ) -> Result<DispatchRecord, RatingPropertiesError> {
        let pipeline = Pipeline::Revoke;
        debug!(%pipeline, message_id = %revocation.intent.message_id, "building dispatch record");
        let result = self.assemble_revoke(revocation).await;
        match &result {
            Ok(record) => debug!(%pipeline, entry_uri = %record.entry_uri, "dispatch record built"),
            Err(error) => warn!(%pipeline, %error, "dispatch rejected"),
        }
        result
    }

    async fn build_entry(
        &self,
        pipeline: Pipeline,
        entry: &SignedEntry,
    ) -> Result<DispatchRecord, RatingPropertiesError> {
        debug!(%pipeline, message_id = %entry.message_id, "building dispatch record");
        let result = self.assemble_entry(pipeline, entry).await;
        match &result {
            Ok(record) => debug!(%pipeline, entry_uri = %record.entry_uri, "dispatch record built"),
            Err(error) => warn!(%pipeline, %error, "dispatch rejected"),
        }
        result
    }

    async fn assemble_entry(
        &self,
        pipeline: Pipeline,
        entry: &SignedEntry,
    ) -> Result<DispatchRecord, RatingPropertiesError> {
        validate_canonical(&entry.content)
            .map_err(|cause| RatingPropertiesError::Content { pipeline, cause })?;

        // Gate: nothing is countersigned unless the provider signature
        // holds for the claimed provider identity.
        verify_signature(
            &entry.digest,
            &entry.provider_signature,
            &entry.provider,
            self.resolver.as_ref(),
        )
        .await
        .map_err(|cause| RatingPropertiesError::ProviderSignature { pipeline, cause })?;

        check_required(pipeline, &entry.content.entity_uid, &entry.digest)?;

        let author_signature = sign_digest(&entry.digest, &self.author, self.signer.as_ref())
            .await
            .map_err(|cause| RatingPropertiesError::AuthorSigning { pipeline, cause })?;

        let entry_uri = derive_entry_uri(
            &entry.digest,
            &entry.content.entity_uid,
            &entry.message_id,
            &self.chain_space,
            &entry.content.provider,
        );

        let body = match pipeline {
            Pipeline::Create => EntryBody::Create(DispatchedRating::from(&entry.content)),
            Pipeline::Revise => EntryBody::Revise(DispatchedRating::from(&entry.content)),
            Pipeline::Revoke => unreachable!("revocations go through build_revoke"),
        };

        Ok(DispatchRecord {
            entry_uri,
            chain_space: self.chain_space,
            message_id: entry.message_id.clone(),
            digest: entry.digest,
            author: self.author.clone(),
            author_signature,
            body,
        })
    }

    async fn assemble_revoke(
        &self,
        revocation: &SignedRevocation,
    ) -> Result<DispatchRecord, RatingPropertiesError> {
        let pipeline = Pipeline::Revoke;

        verify_signature(
            &revocation.digest,
            &revocation.provider_signature,
            &revocation.intent.provider,
            self.resolver.as_ref(),
        )
        .await
        .map_err(|cause| RatingPropertiesError::ProviderSignature { pipeline, cause })?;

        check_required(pipeline, &revocation.entity_uid, &revocation.digest)?;

        let author_signature = sign_digest(&revocation.digest, &self.author, self.signer.as_ref())
            .await
            .map_err(|cause| RatingPropertiesError::AuthorSigning { pipeline, cause })?;

        let entry_uri = derive_entry_uri(
            &revocation.digest,
            &revocation.entity_uid,
            &revocation.intent.message_id,
            &self.chain_space,
            revocation.intent.provider.address(),
        );

        Ok(DispatchRecord {
            entry_uri,
            chain_space: self.chain_space,
            message_id: revocation.intent.message_id.clone(),
            digest: revocation.digest,
            author: self.author.clone(),
            author_signature,
            body: EntryBody::Revoke(RevokeBody {
                intent: revocation.intent.clone(),
                entity_uid: revocation.entity_uid.clone(),
            }),
        })
    }
}

fn check_required(
    pipeline: Pipeline,
    entity_uid: &str,
    digest: &ContentDigest,
) -> Result<(), RatingPropertiesError> {
    if entity_uid.trim().is_empty() {
        return Err(RatingPropertiesError::MissingField {
            pipeline,
            field: "entity_uid",
        });
    }
    if digest.is_null() {
        return Err(RatingPropertiesError::MissingField {
            pipeline,
            field: "digest",
        });
    }
    Ok(())
}
