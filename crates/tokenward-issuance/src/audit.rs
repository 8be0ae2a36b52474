//! Issuance audit events.
//!
//! The generator reports its progress through an [`IssuanceAudit`] handed to
//! it at construction. [`TracingAudit`] turns the events into structured
//! `tracing` records. Token values and refresh handles are never part of an
//! event.

use crate::error::IssuanceError;
use crate::issuance::dispatcher::Flow;
use crate::issuance::response::TokenResponse;
use crate::types::refresh_token::RefreshTokenRecord;
use crate::types::request::ValidatedTokenRequest;

/// Receiver of issuance lifecycle events.
pub trait IssuanceAudit: Send + Sync {
    /// A request entered the pipeline.
    fn issuance_started(&self, request: &ValidatedTokenRequest);

    /// A refresh token record was durably stored.
    fn refresh_token_stored(&self, record: &RefreshTokenRecord);

    /// A token response was produced.
    fn issuance_completed(
        &self,
        request: &ValidatedTokenRequest,
        flow: &Flow<'_>,
        response: &TokenResponse,
    );

    /// Issuance was aborted.
    fn issuance_failed(&self, request: &ValidatedTokenRequest, error: &IssuanceError);
}

/// Audit sink writing `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudit;

impl IssuanceAudit for TracingAudit {
    fn issuance_started(&self, request: &ValidatedTokenRequest) {
        tracing::info!(
            grant_type = %request.grant_type,
            client_id = %request.client.client_id,
            assertion = request.has_assertion(),
            "Creating token response"
        );
    }

    fn refresh_token_stored(&self, record: &RefreshTokenRecord) {
        tracing::debug!(
            client_id = %record.client_id,
            lifetime = record.lifetime,
            "refresh token stored"
        );
    }

    fn issuance_completed(
        &self,
        request: &ValidatedTokenRequest,
        flow: &Flow<'_>,
        response: &TokenResponse,
    ) {
        tracing::info!(
            grant_type = %request.grant_type,
            client_id = %request.client.client_id,
            flow = flow.name(),
            expires_in = response.expires_in,
            refresh_token = response.refresh_token.is_some(),
            identity_token = response.id_token.is_some(),
            "token response created"
        );
    }

    fn issuance_failed(&self, request: &ValidatedTokenRequest, error: &IssuanceError) {
        if error.is_client_error() {
            tracing::warn!(
                grant_type = %request.grant_type,
                client_id = %request.client.client_id,
                error_code = error.oauth_error_code(),
                category = %error.category(),
                error = %error,
                "token issuance failed"
            );
        } else {
            tracing::error!(
                grant_type = %request.grant_type,
                client_id = %request.client.client_id,
                error_code = error.oauth_error_code(),
                category = %error.category(),
                error = %error,
                "token issuance failed"
            );
        }
    }
}

/// Audit sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAudit;

impl IssuanceAudit for NoopAudit {
    fn issuance_started(&self, _request: &ValidatedTokenRequest) {}

    fn refresh_token_stored(&self, _record: &RefreshTokenRecord) {}

    fn issuance_completed(
        &self,
        _request: &ValidatedTokenRequest,
        _flow: &Flow<'_>,
        _response: &TokenResponse,
    ) {
    }

    fn issuance_failed(&self, _request: &ValidatedTokenRequest, _error: &IssuanceError) {}
}
