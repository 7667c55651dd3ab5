//! Request plumbing shared by every read-only endpoint of the procedure
//! service: URL building under `<base>/api/`, the status check, JSON
//! decoding and failure logging.

use crate::err::Error;
use crate::procedure::ProcedureId;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

const API_SEGMENT: &str = "api";
const PROCEDURES_SEGMENT: &str = "procedures";
const VALIDATE_SEGMENT: &str = "validate";

/// Build `<base>/api/<segments...>`. Each segment is percent-encoded.
pub(crate) fn api_url(base_url: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| Error::UrlFormat("the base URL must be a valid base URL".to_owned()))?
        .pop_if_empty()
        .push(API_SEGMENT)
        .extend(segments);
    Ok(url)
}

/// `<base>/api/procedures`
pub(crate) fn procedures_url(base_url: &Url) -> Result<Url, Error> {
    api_url(base_url, &[PROCEDURES_SEGMENT])
}

/// `<base>/api/procedures/<id>`
pub(crate) fn procedure_url(
    base_url: &Url,
    procedure_id: &ProcedureId,
) -> Result<Url, Error> {
    api_url(base_url, &[PROCEDURES_SEGMENT, procedure_id.as_str()])
}

/// `<base>/api/procedures/<id>/validate`
pub(crate) fn validate_url(
    base_url: &Url,
    procedure_id: &ProcedureId,
) -> Result<Url, Error> {
    api_url(
        base_url,
        &[PROCEDURES_SEGMENT, procedure_id.as_str(), VALIDATE_SEGMENT],
    )
}

/// Send a GET request and decode the JSON body of a successful response.
pub(crate) async fn fetch_json<T>(client: &Client, url: Url) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    debug!(%url, "sending GET request");
    let res = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;
    ensure_success(res.status())?;
    Ok(res.json().await?)
}

/// Any status outside 200-299 is a failed request, whatever the body says.
pub(crate) fn ensure_success(status: StatusCode) -> Result<(), Error> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::RequestFailed { status })
    }
}

/// Log a failed request and hand the result back unchanged. `action` reads
/// as the end of "Error ...", for example "chaining waypoints".
pub(crate) fn log_failure<T>(
    action: &str,
    procedure_id: Option<&ProcedureId>,
    res: Result<T, Error>,
) -> Result<T, Error> {
    if let Err(err) = &res {
        match procedure_id {
            Some(procedure_id) => {
                error!(%procedure_id, error = %err, "Error {}", action)
            }
            None => error!(error = %err, "Error {}", action),
        }
    }
    res
}
