use docanchor_crypto::{encoding, Digest, FingerprintEngine, KeyCodec, SchemeConfig, Verifier};
use docanchor_types::{AuthenticityRequest, AuthenticityVerdict};
use tracing::{debug, info, warn};

/// Decides integrity and authenticity of a presented document against its
/// anchored values.
///
/// The two checks are independent. Undecodable input degrades the affected
/// check to `false` and leaves a note on the verdict; evaluation itself
/// never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthenticityEvaluation {
    scheme: SchemeConfig,
    engine: FingerprintEngine,
    codec: KeyCodec,
    verifier: Verifier,
}

impl AuthenticityEvaluation {
    pub fn new(scheme: SchemeConfig) -> Self {
        Self {
            scheme,
            engine: FingerprintEngine::new(&scheme),
            codec: KeyCodec::new(scheme.signature),
            verifier: Verifier::new(&scheme),
        }
    }

    pub fn scheme(&self) -> &SchemeConfig {
        &self.scheme
    }

    pub fn evaluate(&self, request: &AuthenticityRequest) -> AuthenticityVerdict {
        let mut verdict = AuthenticityVerdict::pending(
            request,
            self.scheme.key_algorithm(),
            self.scheme.curve(),
        );

        let stored = self.engine.parse(&verdict.stored_digest);
        match (&stored, self.engine.parse(&verdict.new_digest)) {
            (Ok(stored), Ok(new)) => verdict.integrated = stored.ct_eq(&new),
            (Err(err), _) => verdict.note(format!("stored digest unusable: {err}")),
            (_, Err(err)) => verdict.note(format!("new digest unusable: {err}")),
        }

        match stored {
            Ok(digest) => match self.check_signature(&digest, &verdict) {
                Ok(authenticated) => verdict.authenticated = authenticated,
                Err(message) => verdict.note(message),
            },
            Err(_) => verdict.note("signature not checked: stored digest unusable"),
        }

        for note in &verdict.notes {
            warn!(file = %verdict.file_name, "{note}");
        }
        info!(
            file = %verdict.file_name,
            integrated = verdict.integrated,
            authenticated = verdict.authenticated,
            "authenticity evaluated"
        );
        verdict
    }

    fn check_signature(&self, digest: &Digest, verdict: &AuthenticityVerdict) -> Result<bool, String> {
        let public = self
            .codec
            .decode_public_key(&verdict.stored_public_key)
            .map_err(|e| format!("stored public key unusable: {e}"))?;
        let signature = encoding::decode(&verdict.stored_signature)
            .map_err(|e| format!("stored signature unusable: {e}"))?;
        let ok = self
            .verifier
            .verify(digest.as_bytes(), &signature, &public)
            .map_err(|e| format!("stored signature unusable: {e}"))?;
        debug!(file = %verdict.file_name, ok, "stored signature checked");
        Ok(ok)
    }
}
