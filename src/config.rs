//! Conversion configuration.

use crate::engine::{ScalarKey, DEFAULT_PRIMARY_DIMENSION};
use crate::error::{NcflattenError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Settings shared by every file in a conversion batch.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Directory the output files are written to.
    pub output_dir: PathBuf,
    /// Write a `.json` metadata file next to the data files.
    pub metadata: bool,
    /// Dimension indexing the table in faceted mode.
    pub primary_dimension: String,
    /// Key convention for the scalar table in collection mode.
    pub scalar_key: ScalarKey,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./data"),
            metadata: true,
            primary_dimension: DEFAULT_PRIMARY_DIMENSION.to_string(),
            scalar_key: ScalarKey::BaseName,
        }
    }
}

impl ConvertConfig {
    /// Output base for an input file: the output directory joined with the
    /// file name minus its extension.
    pub fn output_base(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "output".into());
        self.output_dir.join(stem)
    }

    /// Output bases for a batch, in input order.
    ///
    /// Files in a batch are converted concurrently, so no two may share an
    /// output base. An input whose base is already taken by an earlier one
    /// gets an [`NcflattenError::OutputConflict`].
    pub fn output_bases(&self, inputs: &[PathBuf]) -> Vec<Result<PathBuf>> {
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
        inputs
            .iter()
            .map(|input| {
                let base = self.output_base(input);
                match claimed.get(&base) {
                    Some(other) => Err(NcflattenError::OutputConflict {
                        base,
                        other: other.to_path_buf(),
                    }),
                    None => {
                        claimed.insert(base.clone(), input);
                        Ok(base)
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_base_drops_extension() {
        let config = ConvertConfig {
            output_dir: PathBuf::from("out"),
            ..ConvertConfig::default()
        };
        assert_eq!(
            config.output_base(Path::new("/in/buoy.20220405.000000.nc")),
            Path::new("out/buoy.20220405.000000")
        );
    }

    #[test]
    fn shared_stems_conflict() {
        let config = ConvertConfig {
            output_dir: PathBuf::from("out"),
            ..ConvertConfig::default()
        };
        let inputs = [
            PathBuf::from("a/x.nc"),
            PathBuf::from("b/y.nc"),
            PathBuf::from("b/x.nc"),
        ];
        let bases = config.output_bases(&inputs);

        assert_eq!(bases[0].as_ref().unwrap(), Path::new("out/x"));
        assert_eq!(bases[1].as_ref().unwrap(), Path::new("out/y"));
        assert!(matches!(
            &bases[2],
            Err(NcflattenError::OutputConflict { base, other })
                if base == Path::new("out/x") && other == Path::new("a/x.nc")
        ));
    }
}
