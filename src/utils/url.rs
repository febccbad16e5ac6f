use url::Url;

use crate::CrepoError;
/// Extension for [url::Url] for repository paths
pub trait RepoUrlExt {
    /// Appends path segments to the current URL path, percent encoding each one.
    ///
    /// A bucket name containing `/` stays a single segment. Do not use [Url::join] for
    /// repository paths, it drops the last segment of a base without a trailing slash.
    fn append_segments<'segment>(
        &mut self,
        segments: impl IntoIterator<Item = &'segment str>,
    ) -> Result<(), CrepoError>;
    /// Appends a trailing slash unless there already is one.
    fn ensure_trailing_slash(&mut self) -> Result<(), CrepoError>;
}
impl RepoUrlExt for Url {
    fn append_segments<'segment>(
        &mut self,
        segments: impl IntoIterator<Item = &'segment str>,
    ) -> Result<(), CrepoError> {
        let base = self.clone();
        let mut path = self
            .path_segments_mut()
            .map_err(|_| CrepoError::CannotBeABase(base))?;
        path.pop_if_empty();
        path.extend(segments);
        Ok(())
    }
    fn ensure_trailing_slash(&mut self) -> Result<(), CrepoError> {
        if !self.path().ends_with('/') {
            self.append_segments([""])?;
        }
        Ok(())
    }
}
