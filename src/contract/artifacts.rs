use ethers::types::Bytes;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("couldn't read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("artifact {path} is not valid hex: {source}")]
    InvalidHex {
        path: PathBuf,
        source: hex::FromHexError,
    },
    #[error("artifact {0} contains no bytecode")]
    Empty(PathBuf),
}

/// Directory of compiled contracts, one `<Name>.bin` hex file per contract.
#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, contract: &str) -> PathBuf {
        self.dir.join(format!("{contract}.bin"))
    }

    pub fn bytecode(&self, contract: &str) -> Result<Bytes, ArtifactError> {
        let path = self.path(contract);
        let content = std::fs::read_to_string(&path).map_err(|source| ArtifactError::Read {
            path: path.clone(),
            source,
        })?;
        let content = content.trim();
        let content = content.strip_prefix("0x").unwrap_or(content);
        if content.is_empty() {
            return Err(ArtifactError::Empty(path));
        }
        let bytecode =
            hex::decode(content).map_err(|source| ArtifactError::InvalidHex { path, source })?;
        Ok(Bytes::from(bytecode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_prefixed_and_bare_hex() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A.bin"), "0x6001\n").unwrap();
        std::fs::write(dir.path().join("B.bin"), "6002").unwrap();
        let artifacts = Artifacts::new(dir.path());

        assert_eq!(artifacts.bytecode("A").unwrap().to_vec(), vec![0x60, 0x01]);
        assert_eq!(artifacts.bytecode("B").unwrap().to_vec(), vec![0x60, 0x02]);
    }

    #[test]
    fn broken_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Empty.bin"), "0x").unwrap();
        std::fs::write(dir.path().join("Bad.bin"), "0xzz").unwrap();
        let artifacts = Artifacts::new(dir.path());

        assert!(matches!(
            artifacts.bytecode("Empty"),
            Err(ArtifactError::Empty(_))
        ));
        assert!(matches!(
            artifacts.bytecode("Bad"),
            Err(ArtifactError::InvalidHex { .. })
        ));
        assert!(matches!(
            artifacts.bytecode("Missing"),
            Err(ArtifactError::Read { .. })
        ));
    }
}
