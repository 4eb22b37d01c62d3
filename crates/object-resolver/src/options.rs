use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{OptionsError, Path};

/// Configuration for [`clone_structure_with`](crate::clone_structure_with).
///
/// ```
/// # use object_resolver::CloneOptions;
/// let opts = CloneOptions::default().with_transfer(["payload.raw"])?;
/// assert_eq!(opts.transfer().len(), 1);
/// # Ok::<(), object_resolver::OptionsError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCloneOptions")]
pub struct CloneOptions {
    transfer: Vec<Path>,
}

#[derive(Deserialize)]
struct RawCloneOptions {
    #[serde(default)]
    transfer: Vec<Path>,
}

impl TryFrom<RawCloneOptions> for CloneOptions {
    type Error = OptionsError;

    fn try_from(raw: RawCloneOptions) -> Result<Self, Self::Error> {
        let options = Self { transfer: raw.transfer };
        options.validate()?;
        Ok(options)
    }
}

impl CloneOptions {
    /// Paths of the byte buffers moved, rather than copied, into the clone.
    #[must_use]
    pub fn transfer(&self) -> &[Path] {
        &self.transfer
    }

    /// Adds buffers to the transfer list.
    ///
    /// ```
    /// # use object_resolver::{CloneOptions, OptionsError};
    /// let err = CloneOptions::default().with_transfer(["a", "b", "a"]).unwrap_err();
    /// assert!(matches!(err, OptionsError::DuplicateTransfer { .. }));
    /// ```
    pub fn with_transfer<I, P>(mut self, paths: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Path>,
    {
        self.transfer.extend(paths.into_iter().map(Into::into));
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        let mut seen = HashSet::with_capacity(self.transfer.len());
        for path in &self.transfer {
            if !seen.insert(path) {
                return Err(OptionsError::DuplicateTransfer { path: path.clone() });
            }
        }
        Ok(())
    }
}
