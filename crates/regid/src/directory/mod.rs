#[cfg(feature = "http")]
mod http;

#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
#[cfg(feature = "http")]
pub use http::*;

use crate::{DirectoryError, RegionSummary, SubRegion};

/// The read side of the remote directory service.
///
/// Both calls are issued strictly one at a time by the pipeline. Any
/// transport, status or decoding problem is reported as a
/// [`DirectoryError`]; implementations never retry.
///
/// Tests implement this over in-memory data; production uses
/// [`HttpDirectory`](crate::HttpDirectory).
pub trait Directory {
    /// Lists every top-level region, in the order the service returns them.
    fn list_regions(&self) -> impl Future<Output = Result<Vec<RegionSummary>, DirectoryError>>;

    /// Lists the sub-regions of the region with the given service code.
    fn list_sub_regions(
        &self,
        region_code: &str,
    ) -> impl Future<Output = Result<Vec<SubRegion>, DirectoryError>>;
}

impl<D: Directory> Directory for &D {
    fn list_regions(&self) -> impl Future<Output = Result<Vec<RegionSummary>, DirectoryError>> {
        (**self).list_regions()
    }

    fn list_sub_regions(
        &self,
        region_code: &str,
    ) -> impl Future<Output = Result<Vec<SubRegion>, DirectoryError>> {
        (**self).list_sub_regions(region_code)
    }
}
