use crate::error::Error;
use log::{debug, trace};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of gitignore templates.
pub(crate) trait TemplateService {
    /// Names of every template the service offers.
    fn list(&self) -> Result<Vec<String>, Error>;
    /// Raw template content for one or more subjects.
    fn fetch(&self, subjects: &[String]) -> Result<Vec<u8>, Error>;
}

/// The gitignore.io (Toptal) HTTP API.
pub(crate) struct ToptalApi {
    base_url: String,
}

impl ToptalApi {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
    fn get(&self, path: &str) -> Result<minreq::Response, Error> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);
        let response = minreq::get(&url)
            .with_header("User-Agent", USER_AGENT)
            .send()
            .map_err(Error::Network)?;
        debug!("{} {}", response.status_code, response.reason_phrase);
        Ok(response)
    }
}

impl TemplateService for ToptalApi {
    fn list(&self) -> Result<Vec<String>, Error> {
        let response = self.get("list")?;
        check_status(&response, &[])?;
        let body = response.as_str().map_err(Error::Read)?;
        let names = parse_template_names(body);
        trace!("catalog holds {} templates", names.len());
        Ok(names)
    }
    fn fetch(&self, subjects: &[String]) -> Result<Vec<u8>, Error> {
        let response = self.get(&subjects.join(","))?;
        check_status(&response, subjects)?;
        Ok(response.into_bytes())
    }
}

fn check_status(response: &minreq::Response, subjects: &[String]) -> Result<(), Error> {
    match response.status_code {
        200 => Ok(()),
        404 => Err(Error::NotFound {
            subjects: subjects.to_vec(),
        }),
        status => Err(Error::Fetch {
            status,
            reason: response.reason_phrase.clone(),
        }),
    }
}

/// The list endpoint answers with comma separated names spread over several lines.
pub(crate) fn parse_template_names(body: &str) -> Vec<String> {
    body.split('\n')
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
