use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::{ProvenanceError, Result};

/// Algorithm name → lowercase hex digest.
pub type DigestSet = BTreeMap<String, String>;

/// Content digest algorithms the generator can emit.
///
/// Names follow the in-toto digest set conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    fn hasher(&self) -> Hasher {
        match self {
            DigestAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
            DigestAlgorithm::Sha384 => Hasher::Sha384(Sha384::new()),
            DigestAlgorithm::Sha512 => Hasher::Sha512(Sha512::new()),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ProvenanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha384" => Ok(DigestAlgorithm::Sha384),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            other => Err(ProvenanceError::Config(format!(
                "unsupported digest algorithm: {other}"
            ))),
        }
    }
}

enum Hasher {
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl Hasher {
    fn update(&mut self, chunk: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(chunk),
            Hasher::Sha384(h) => h.update(chunk),
            Hasher::Sha512(h) => h.update(chunk),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Hasher::Sha256(h) => hex::encode(h.finalize()),
            Hasher::Sha384(h) => hex::encode(h.finalize()),
            Hasher::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

/// Digest everything `reader` yields with each of `algorithms` in one pass.
pub fn digest_reader<R: Read>(
    mut reader: R,
    algorithms: &[DigestAlgorithm],
) -> std::io::Result<DigestSet> {
    let mut hashers: Vec<(DigestAlgorithm, Hasher)> =
        algorithms.iter().map(|alg| (*alg, alg.hasher())).collect();

    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for (_, hasher) in hashers.iter_mut() {
            hasher.update(&buf[..n]);
        }
    }

    Ok(hashers
        .into_iter()
        .map(|(alg, hasher)| (alg.as_str().to_string(), hasher.finalize_hex()))
        .collect())
}

/// Compute the digest set of a file.
///
/// The result depends only on the file bytes; metadata such as timestamps
/// and permissions is ignored. Existence is the caller's concern: any
/// open or read failure surfaces as [`ProvenanceError::DigestCalculation`].
pub fn digest_file(path: &Path, algorithms: &[DigestAlgorithm]) -> Result<DigestSet> {
    if algorithms.is_empty() {
        return Err(ProvenanceError::Config(
            "at least one digest algorithm is required".into(),
        ));
    }

    let to_error = |source| ProvenanceError::DigestCalculation {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_error)?;
    let digests = digest_reader(BufReader::new(file), algorithms).map_err(to_error)?;

    tracing::debug!(path = %path.display(), algorithms = digests.len(), "computed digests");
    Ok(digests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_artifact(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn computes_known_sha256() {
        let file = temp_artifact(b"abc");

        let digests = digest_file(file.path(), &[DigestAlgorithm::Sha256]).unwrap();

        assert_eq!(digests.len(), 1);
        assert_eq!(
            digests["sha256"],
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn computes_every_requested_algorithm() {
        let file = temp_artifact(b"abc");

        let digests = digest_file(
            file.path(),
            &[DigestAlgorithm::Sha512, DigestAlgorithm::Sha256],
        )
        .unwrap();

        let keys: Vec<&str> = digests.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["sha256", "sha512"]);
        assert!(digests["sha512"].starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn same_bytes_produce_identical_digests() {
        let a = digest_file(temp_artifact(b"payload").path(), &[DigestAlgorithm::Sha256]).unwrap();
        let b = digest_file(temp_artifact(b"payload").path(), &[DigestAlgorithm::Sha256]).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_produce_different_digests() {
        let a = digest_file(temp_artifact(b"data-a").path(), &[DigestAlgorithm::Sha256]).unwrap();
        let b = digest_file(temp_artifact(b"data-b").path(), &[DigestAlgorithm::Sha256]).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn streams_inputs_larger_than_the_buffer() {
        let data = vec![0x5au8; 200 * 1024];
        let from_file =
            digest_file(temp_artifact(&data).path(), &[DigestAlgorithm::Sha256]).unwrap();

        let expected = hex::encode(Sha256::digest(&data));
        assert_eq!(from_file["sha256"], expected);
    }

    #[test]
    fn unreadable_file_is_digest_error() {
        let err = digest_file(Path::new("non_existent.war"), &[DigestAlgorithm::Sha256])
            .unwrap_err();
        assert!(matches!(err, ProvenanceError::DigestCalculation { .. }));
    }

    #[test]
    fn empty_algorithm_set_is_config_error() {
        let file = temp_artifact(b"abc");
        let err = digest_file(file.path(), &[]).unwrap_err();
        assert!(matches!(err, ProvenanceError::Config(_)));
    }

    #[test]
    fn parses_algorithm_names_leniently() {
        assert_eq!("SHA-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!(" sha512 ".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }
}
