//! URL building for the catalog API and filename derivation for assets.

mod path;

pub use path::filename_from_url_path;

use crate::config::FileNaming;

/// List endpoint URL for one page: appends `page_size` and `page` query parameters.
pub fn page_url(list_endpoint: &str, page_size: u32, page: u32) -> Result<String, url::ParseError> {
    let mut url = url::Url::parse(list_endpoint)?;
    url.query_pairs_mut()
        .append_pair("page_size", &page_size.to_string())
        .append_pair("page", &page.to_string());
    Ok(url.into())
}

/// Detail endpoint URL for one record: `<endpoint>/<id>`.
pub fn detail_url(detail_endpoint: &str, id: i64) -> String {
    format!("{}/{}", detail_endpoint.trim_end_matches('/'), id)
}

/// Joins the asset base URL and a relative asset path with exactly one `/`.
pub fn asset_url(base_url: &str, asset_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        asset_path.trim_start_matches('/')
    )
}

/// Local filename for an asset URL under the given naming mode.
///
/// # Examples
///
/// - `local_filename("http://h/bt/a.rar", FileNaming::Basename, 7)` → `"a.rar"`
/// - `local_filename("http://h/bt/a.rar", FileNaming::OwnerPrefixed, 7)` → `"7-a.rar"`
pub fn local_filename(url: &str, naming: FileNaming, owner_id: i64) -> Option<String> {
    let name = filename_from_url_path(url)?;
    Some(match naming {
        FileNaming::Basename => name,
        FileNaming::OwnerPrefixed => format!("{}-{}", owner_id, name),
    })
}
