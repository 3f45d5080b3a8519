use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use ndarray::Array2;

use super::corpus::{to_hex, Corpus};
use super::similarity::SimilarityMatrix;
use crate::config::SimilaritySource;
use crate::error::{PipelineError, PipelineResult};

const MAGIC: &[u8; 4] = b"CSIM";
pub const FORMAT_VERSION: u16 = 1;

/// Persisted similarity matrix tied to the corpus snapshot that produced it
///
/// Layout, little-endian:
///
/// | field          | size       |
/// |----------------|------------|
/// | magic `CSIM`   | 4          |
/// | format version | u16        |
/// | item count `n` | u64        |
/// | corpus SHA-256 | 32         |
/// | source         | u8         |
/// | values         | n·n × f32  |
///
/// Row and column `i` refer to item `i` of the corpus. A reader must check
/// the hash against its own corpus before mapping indices back to titles;
/// `read_for` does that.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityArtifact {
    corpus_hash: [u8; 32],
    source: SimilaritySource,
    matrix: SimilarityMatrix,
}

impl SimilarityArtifact {
    /// Fails with `StaleArtifact` unless the matrix has one row per corpus item
    pub fn new(
        corpus: &Corpus,
        source: SimilaritySource,
        matrix: SimilarityMatrix,
    ) -> PipelineResult<Self> {
        if matrix.len() != corpus.len() {
            return Err(PipelineError::StaleArtifact {
                expected: format!("{} items, corpus {}", corpus.len(), corpus.hash_hex()),
                found: format!("{} items", matrix.len()),
            });
        }
        Ok(Self {
            corpus_hash: *corpus.hash(),
            source,
            matrix,
        })
    }

    pub fn corpus_hash_hex(&self) -> String {
        to_hex(&self.corpus_hash)
    }

    pub fn source(&self) -> SimilaritySource {
        self.source
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn item_count(&self) -> usize {
        self.matrix.len()
    }

    pub fn write(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        tracing::info!(
            path = %path.display(),
            items = self.item_count(),
            corpus = %self.corpus_hash_hex(),
            "Similarity artifact written"
        );
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> PipelineResult<()> {
        writer.write_all(MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        writer.write_all(&(self.item_count() as u64).to_le_bytes())?;
        writer.write_all(&self.corpus_hash)?;
        writer.write_all(&[source_tag(self.source)])?;
        for value in self.matrix.values().iter() {
            writer.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Reads an artifact and rejects it unless it was built from `corpus`
    pub fn read_for(path: impl AsRef<Path>, corpus: &Corpus) -> PipelineResult<Self> {
        let artifact = Self::read(path)?;
        artifact.ensure_matches(corpus)?;
        Ok(artifact)
    }

    pub fn ensure_matches(&self, corpus: &Corpus) -> PipelineResult<()> {
        if &self.corpus_hash != corpus.hash() || self.item_count() != corpus.len() {
            return Err(PipelineError::StaleArtifact {
                expected: format!("{} items, corpus {}", corpus.len(), corpus.hash_hex()),
                found: format!("{} items, corpus {}", self.item_count(), self.corpus_hash_hex()),
            });
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> PipelineResult<Self> {
        let mut magic = [0u8; 4];
        read_header_field(reader, &mut magic)?;
        if &magic != MAGIC {
            return Err(PipelineError::BadArtifact("unrecognized magic bytes".to_string()));
        }

        let mut version = [0u8; 2];
        read_header_field(reader, &mut version)?;
        let version = u16::from_le_bytes(version);
        if version != FORMAT_VERSION {
            return Err(PipelineError::BadArtifact(format!(
                "unsupported format version {version}"
            )));
        }

        let mut count = [0u8; 8];
        read_header_field(reader, &mut count)?;
        let n = usize::try_from(u64::from_le_bytes(count))
            .map_err(|_| PipelineError::BadArtifact("item count overflows".to_string()))?;
        let cells = n
            .checked_mul(n)
            .ok_or_else(|| PipelineError::BadArtifact("item count overflows".to_string()))?;

        let mut corpus_hash = [0u8; 32];
        read_header_field(reader, &mut corpus_hash)?;

        let mut tag = [0u8; 1];
        read_header_field(reader, &mut tag)?;
        let source = match tag[0] {
            0 => SimilaritySource::Raw,
            1 => SimilaritySource::Reduced,
            other => {
                return Err(PipelineError::BadArtifact(format!(
                    "unknown similarity source {other}"
                )))
            }
        };

        let mut values = Vec::with_capacity(cells.min(1 << 24));
        let mut cell = [0u8; 4];
        for _ in 0..cells {
            read_header_field(reader, &mut cell)?;
            values.push(f32::from_le_bytes(cell));
        }

        let mut trailing = [0u8; 1];
        if reader.read(&mut trailing)? != 0 {
            return Err(PipelineError::BadArtifact(
                "unexpected data after matrix".to_string(),
            ));
        }

        let values = Array2::from_shape_vec((n, n), values)
            .map_err(|e| PipelineError::BadArtifact(e.to_string()))?;

        Ok(Self {
            corpus_hash,
            source,
            matrix: SimilarityMatrix::from_values(values),
        })
    }
}

fn source_tag(source: SimilaritySource) -> u8 {
    match source {
        SimilaritySource::Raw => 0,
        SimilaritySource::Reduced => 1,
    }
}

fn read_header_field<R: Read>(reader: &mut R, buf: &mut [u8]) -> PipelineResult<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => PipelineError::BadArtifact("file is truncated".to_string()),
        _ => PipelineError::Io(e),
    })
}
