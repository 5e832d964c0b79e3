// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ATNF pulsar catalogue web interface, and saved copies of its output.

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, trace};

use super::{CatalogError, CatalogSource, CatalogTable, MISSING_VALUE};

/// The ATNF catalogue's query form handler.
pub const ATNF_QUERY_URL: &str = "https://www.atnf.csiro.au/research/pulsar/psrcat/proc_form.php";

/// How long to wait for the catalogue service by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Form fields sent alongside the requested parameters. The table comes back
/// as plain text inside a `<pre>` block.
const FORM_FIELDS: [(&str, &str); 17] = [
    ("startUserDefined", "true"),
    ("sort_attr", "jname"),
    ("sort_order", "asc"),
    ("condition", ""),
    ("pulsar_names", ""),
    ("ephemeris", "short"),
    ("coords_unit", "raj/decj"),
    ("radius", ""),
    ("coords_1", ""),
    ("coords_2", ""),
    ("style", "Short without errors"),
    ("no_value", MISSING_VALUE),
    ("fsize", "3"),
    ("x_axis", ""),
    ("y_axis", ""),
    ("state", "query"),
    ("table_bottom.x", "40"),
];

/// Queries the ATNF pulsar catalogue over HTTP.
#[derive(Debug, Clone)]
pub struct AtnfWebCatalog {
    url: String,
    timeout: Duration,
}

impl AtnfWebCatalog {
    pub fn new() -> AtnfWebCatalog {
        AtnfWebCatalog {
            url: ATNF_QUERY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> AtnfWebCatalog {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> AtnfWebCatalog {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for AtnfWebCatalog {
    fn default() -> Self {
        AtnfWebCatalog::new()
    }
}

impl CatalogSource for AtnfWebCatalog {
    fn query(&self, params: &[&str]) -> Result<CatalogTable, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        // Each requested parameter is a checkbox named after itself.
        let mut form: Vec<(&str, &str)> = params.iter().map(|&p| (p, p)).collect();
        form.extend(FORM_FIELDS);
        debug!("Querying {} for {}", self.url, params.join(","));

        let response = client.get(&self.url).query(&form).send()?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }
        let text = response.text()?;
        trace!("Catalogue response is {} bytes", text.len());
        parse_response(&text, params)
    }
}

/// Reads a catalogue table that was saved to disk, either the whole web
/// response or only its table.
#[derive(Debug, Clone)]
pub struct CatalogFileSource {
    path: PathBuf,
}

impl CatalogFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> CatalogFileSource {
        CatalogFileSource { path: path.into() }
    }
}

impl CatalogSource for CatalogFileSource {
    fn query(&self, params: &[&str]) -> Result<CatalogTable, CatalogError> {
        debug!("Reading catalogue table from {}", self.path.display());
        let text = std::fs::read_to_string(&self.path)?;
        parse_response(&text, params)
    }
}

/// Parse the table in a catalogue response. If the response has a `<pre>`
/// block, only its contents are considered.
///
/// The header is the first line starting with `#`; it names the columns. Data
/// lines start with an integer (the row number) followed by one value per
/// column. Every other line (units, rulers) is ignored. All of `params` must
/// be columns of the table.
pub fn parse_response(text: &str, params: &[&str]) -> Result<CatalogTable, CatalogError> {
    let body = pre_block(text).unwrap_or(text);

    let mut lines = body.lines().enumerate();
    let columns: Vec<String> = loop {
        match lines.next() {
            Some((_, line)) => {
                if let Some(header) = line.trim_start().strip_prefix('#') {
                    break header.split_whitespace().map(|s| s.to_string()).collect();
                }
            }
            None => return Err(CatalogError::NoTable),
        }
    };
    if columns.is_empty() {
        return Err(CatalogError::NoTable);
    }

    let mut table = CatalogTable::new(columns);
    for p in params {
        if table.column_index(p).is_none() {
            return Err(CatalogError::MissingColumn(p.to_string()));
        }
    }

    let num_columns = table.columns().len();
    for (i_line, line) in lines {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some(first) if first.parse::<usize>().is_ok() => (),
            _ => continue,
        }
        let cells: Vec<&str> = tokens.collect();
        if cells.len() != num_columns {
            return Err(CatalogError::MalformedRow {
                line_num: i_line + 1,
                expected: num_columns,
                found: cells.len(),
            });
        }
        table.push_raw_row(&cells)?;
    }

    debug!("Parsed {} catalogue rows", table.num_rows());
    Ok(table)
}

/// The text between the first `<pre>` tag and the following `</pre>` tag.
fn pre_block(text: &str) -> Option<&str> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find("<pre>")? + "<pre>".len();
    let end = lower[start..].find("</pre>").map_or(text.len(), |e| start + e);
    Some(&text[start..end])
}
