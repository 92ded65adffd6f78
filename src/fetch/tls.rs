use std::{sync::Arc, time::SystemTime};

use rustls::{
    client::{ServerCertVerified, ServerCertVerifier},
    Certificate, ClientConfig, OwnedTrustAnchor, RootCertStore, ServerName,
};

/// TLS negotiation settings for the legacy menu host.
///
/// The upstream serves a broken certificate chain and only completes the
/// handshake with a wider cipher selection than modern defaults, so the
/// relaxations live in one named policy instead of being scattered over the
/// client builder. Only the one outbound client is built from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyTlsPolicy {
    pub verify_certificates: bool,
    pub verify_hostname: bool,
    pub widened_cipher_suites: bool,
}

impl Default for LegacyTlsPolicy {
    fn default() -> Self {
        Self {
            verify_certificates: false,
            verify_hostname: false,
            widened_cipher_suites: true,
        }
    }
}

impl LegacyTlsPolicy {
    /// Builds the rustls config this policy describes.
    ///
    /// rustls performs chain and hostname checks inside a single verifier, so
    /// turning either `verify_*` flag back on restores full webpki
    /// verification. An `Err` here means the suite/version combination was
    /// rejected; callers treat that as non-fatal and fall back to the stock
    /// cipher set.
    pub fn client_config(&self) -> Result<ClientConfig, rustls::Error> {
        let suites = if self.widened_cipher_suites {
            rustls::ALL_CIPHER_SUITES
        } else {
            rustls::DEFAULT_CIPHER_SUITES
        };
        let builder = ClientConfig::builder()
            .with_cipher_suites(suites)
            .with_safe_default_kx_groups()
            .with_protocol_versions(rustls::ALL_VERSIONS)?;
        let config = if self.verify_certificates || self.verify_hostname {
            builder
                .with_root_certificates(webpki_root_store())
                .with_no_client_auth()
        } else {
            builder
                .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
                .with_no_client_auth()
        };
        Ok(config)
    }
}

fn webpki_root_store() -> RootCertStore {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));
    roots
}

/// Verifier that waves every presented certificate through, hostname
/// included. Installed only when both `verify_*` flags are off.
struct AcceptAnyServerCert;

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}
