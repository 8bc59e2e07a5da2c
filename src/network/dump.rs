//! Raw json dump for poking at the APIs

use std::io::Write;

use crate::error::OstackError;
use crate::openstack::{ControlPlane, Ostack};

impl<C: ControlPlane> Ostack<C> {
    /// GET `path` relative to the compute endpoint and write the body to `out`.
    ///
    /// A failed request is written to `out` as well. Errors raised before the
    /// request goes out (endpoint, auth) are only returned.
    pub async fn dump_json<W: Write>(&self, path: &str, out: &mut W) -> Result<(), OstackError> {
        let url = self.compute_url(path)?;

        match self.fetch(&url).await {
            Ok(body) => {
                writeln!(out, "json= {}", String::from_utf8_lossy(&body))?;
                Ok(())
            }
            Err(e) => {
                if e.is_request_failure() {
                    writeln!(out, "error: {}", e)?;
                }
                Err(e)
            }
        }
    }
}
