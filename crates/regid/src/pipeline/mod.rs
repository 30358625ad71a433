//! The export pipeline.
//!
//! A run proceeds strictly in sequence:
//!
//! 1. fetch the region list (fatal on failure)
//! 2. assign identifiers in service order against a growing claimed set
//! 3. sort the assigned regions by Vietnamese collation
//! 4. for each region: fetch sub-regions, reshape, write the region document,
//!    then pause. Failures are recorded and the region is skipped.
//! 5. write the index over *every* assigned region
//!
//! Step 5 includes regions whose document was skipped in step 4,
//! so the index may reference files that do not exist. [`RunReport`] lists
//! those regions.


use core::{marker::PhantomData, time::Duration};
use std::{collections::HashSet, path::PathBuf};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    AssignedRegion, ClaimedSet, CodeAssigner, Directory, DocumentStore, Error, IndexDocument,
    RegionDocument, RegionError, RegionSummary, Result, SleepProvider, sort_vietnamese_by,
};

/// Default pause between directory requests.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// A region document that was written successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenRegion {
    pub identifier: String,
    pub sub_regions: usize,
    pub path: PathBuf,
}

/// A region whose document was skipped.
#[derive(Debug)]
pub struct RegionFailure {
    pub region: AssignedRegion,
    pub error: RegionError,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Every assigned region, in output (collation) order.
    pub regions: Vec<AssignedRegion>,
    pub written: Vec<WrittenRegion>,
    pub failures: Vec<RegionFailure>,
    pub index_path: PathBuf,
}

impl RunReport {
    /// Returns `true` if every region's document was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives a [`Directory`] into a [`DocumentStore`].
///
/// `S` selects how the pipeline pauses between requests.
pub struct Pipeline<D, S> {
    directory: D,
    store: DocumentStore,
    assigner: CodeAssigner,
    delay: Duration,
    _sleep: PhantomData<S>,
}

impl<D, S> Pipeline<D, S>
where
    D: Directory,
    S: SleepProvider,
{
    pub fn new(directory: D, store: DocumentStore, assigner: CodeAssigner) -> Self {
        Self {
            directory,
            store,
            assigner,
            delay: DEFAULT_DELAY,
            _sleep: PhantomData,
        }
    }

    /// Sets the pause applied after every region, successful or not.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Runs the export.
    ///
    /// # Errors
    ///
    /// Fails only when nothing consistent can be produced: the region list
    /// cannot be fetched or is malformed, or the index cannot be written.
    /// Per-region problems, including an unusable regions directory, are
    /// reported in [`RunReport::failures`] instead.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self), fields(root = %self.store.root().display())))]
    pub async fn run(&self) -> Result<RunReport> {
        let summaries = self
            .directory
            .list_regions()
            .await
            .map_err(Error::RegionList)?;
        #[cfg(feature = "tracing")]
        tracing::info!(regions = summaries.len(), "fetched region list");

        let mut regions = assign_regions(&self.assigner, &summaries)?;
        sort_vietnamese_by(&mut regions, |region| region.name.as_str());

        // Not fatal: each region write below fails and is recorded.
        if let Err(_error) = self.store.prepare() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_error, "regions directory unavailable");
        }

        let mut written = Vec::new();
        let mut failures = Vec::new();
        for region in &regions {
            match self.export_region(region).await {
                Ok(done) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(
                        identifier = %region.identifier,
                        name = %region.name,
                        sub_regions = done.sub_regions,
                        "wrote region document"
                    );
                    written.push(done);
                }
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        identifier = %region.identifier,
                        name = %region.name,
                        code = %region.service_code,
                        %error,
                        "skipping region"
                    );
                    failures.push(RegionFailure {
                        region: region.clone(),
                        error,
                    });
                }
            }
            S::sleep_for(self.delay).await;
        }

        let index_path = self
            .store
            .write_index(&IndexDocument::from_regions(&regions))?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            path = %index_path.display(),
            entries = regions.len(),
            written = written.len(),
            failed = failures.len(),
            "wrote index"
        );

        Ok(RunReport {
            regions,
            written,
            failures,
            index_path,
        })
    }

    async fn export_region(
        &self,
        region: &AssignedRegion,
    ) -> core::result::Result<WrittenRegion, RegionError> {
        let sub_regions = self
            .directory
            .list_sub_regions(&region.service_code)
            .await?;
        let document = RegionDocument::new(region, &sub_regions);
        let path = self.store.write_region(&document)?;
        Ok(WrittenRegion {
            identifier: region.identifier.clone(),
            sub_regions: document.sub_regions.len(),
            path,
        })
    }
}

/// Assigns an identifier to every region, in the given order.
///
/// Each identifier is claimed before the next region is processed, so the
/// result depends on the order of `regions`.
///
/// # Errors
///
/// Returns [`Error::MalformedRegion`] for a blank name, a blank code, or a
/// name that appears twice.
pub fn assign_regions(
    assigner: &CodeAssigner,
    regions: &[RegionSummary],
) -> Result<Vec<AssignedRegion>> {
    let mut claimed = ClaimedSet::with_capacity(regions.len());
    let mut names = HashSet::with_capacity(regions.len());
    let mut assigned = Vec::with_capacity(regions.len());

    for (position, region) in regions.iter().enumerate() {
        let malformed = |reason| Error::MalformedRegion {
            position,
            code: region.code.clone(),
            name: region.name.clone(),
            reason,
        };
        if region.name.trim().is_empty() {
            return Err(malformed("blank name"));
        }
        if region.code.trim().is_empty() {
            return Err(malformed("blank service code"));
        }
        if !names.insert(region.name.as_str()) {
            return Err(malformed("duplicate name"));
        }

        let identifier = assigner.assign(&region.name, &claimed);
        #[cfg(feature = "tracing")]
        tracing::debug!(name = %region.name, %identifier, "assigned identifier");
        claimed.insert(identifier.clone());
        assigned.push(AssignedRegion {
            service_code: region.code.clone(),
            identifier,
            name: region.name.clone(),
        });
    }

    debug_assert_eq!(claimed.len(), assigned.len());
    Ok(assigned)
}
