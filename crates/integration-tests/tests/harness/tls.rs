//! Self-signed certificate material for HTTPS tests

use std::path::PathBuf;

use tempfile::TempDir;

/// PEM files that live as long as this value
pub struct TlsFiles {
    _dir: TempDir,
    pub certificate: PathBuf,
    pub private_key: PathBuf,
}

/// Generate a certificate for `localhost` and `127.0.0.1`
pub fn self_signed() -> TlsFiles {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_owned(), "127.0.0.1".to_owned()]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let certificate = dir.path().join("cert.pem");
    let private_key = dir.path().join("key.pem");
    std::fs::write(&certificate, cert.pem()).unwrap();
    std::fs::write(&private_key, key_pair.serialize_pem()).unwrap();

    TlsFiles {
        _dir: dir,
        certificate,
        private_key,
    }
}

/// Client that trusts the self-signed certificate
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .unwrap()
}
